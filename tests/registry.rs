//! Registry identity, eviction, and concurrency guarantees.

use std::sync::Arc;
use std::thread;

use anyhow::Result;
use centime::{ProfileError, ProfileRegistry};

#[test]
fn one_canonical_profile_per_pair() -> Result<()>
{
    let registry = ProfileRegistry::new();

    let a = registry.get_or_create("USD", "en-US")?;
    let b = registry.get_or_create("usd", "en_us")?;

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.currency, "USD");
    assert_eq!(a.locale, "en-US");

    Ok(())
}

#[test]
fn eviction_invalidates_exactly_one_key() -> Result<()>
{
    let registry = ProfileRegistry::new();

    let us = registry.get_or_create("USD", "en-US")?;
    let ca = registry.get_or_create("USD", "en-CA")?;

    assert!(registry.evict("USD", "en-US"));

    let us_again = registry.get_or_create("USD", "en-US")?;
    let ca_again = registry.get_or_create("USD", "en-CA")?;

    assert!(!Arc::ptr_eq(&us, &us_again));
    assert!(Arc::ptr_eq(&ca, &ca_again));

    Ok(())
}

#[test]
fn concurrent_first_requests_share_one_profile()
{
    let registry = ProfileRegistry::new();

    let profiles: Vec<Arc<centime::Profile>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = &registry;
                scope.spawn(move || {
                    registry
                        .get_or_create("CAD", "fr-CA")
                        .expect("profile")
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("thread"))
            .collect()
    });

    for p in &profiles[1..]
    {
        assert!(Arc::ptr_eq(&profiles[0], p));
    }
}

#[test]
fn construction_error_taxonomy_is_stable()
{
    let registry = ProfileRegistry::new();

    let unsupported = registry
        .get_or_create("ZZZ", "en-US")
        .expect_err("unsupported code");
    assert!(matches!(unsupported, ProfileError::UnsupportedCurrency { ref code } if code == "ZZZ"));

    let invalid = registry
        .get_or_create("USD", "english")
        .expect_err("bad tag");
    assert!(matches!(invalid, ProfileError::InvalidLocale { .. }));

    // Failed derivations are not cached; a valid retry succeeds
    assert!(!registry.contains("ZZZ", "en-US"));
    assert!(registry.get_or_create("USD", "en-US").is_ok());
}
