//! End-to-end detection scenarios through the public API.

use centime::{Assume, DetectOptions, ProfileRegistry, detect};

fn defaults() -> DetectOptions
{
    DetectOptions::default()
}

// RUST_LOG=centime=trace surfaces per-candidate scoring while debugging
fn init_tracing()
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn en_us_dollar_is_an_exact_match()
{
    init_tracing();

    let registry = ProfileRegistry::new();
    let hit = detect(&registry, "$1,234.56", &defaults()).expect("detection");

    assert_eq!(hit.locale, "en-US");
    assert_eq!(hit.currency, "USD");
    assert_eq!(hit.amount, 1234.56);
    assert_eq!(hit.score, 1.0);
    assert_eq!(hit.original, "$1,234.56");
    assert_eq!(hit.formatted, "$1,234.56");
}

#[test]
fn fr_ca_dollar_detects_from_suffix_conventions()
{
    init_tracing();

    let registry = ProfileRegistry::new();
    let hit = detect(&registry, "1 234,56 $", &defaults()).expect("detection");

    assert_eq!(hit.locale, "fr-CA");
    assert_eq!(hit.currency, "CAD");
    assert_eq!(hit.amount, 1234.56);
    assert!(hit.score > 0.0);
}

#[test]
fn double_decimal_marker_defeats_every_candidate()
{
    let registry = ProfileRegistry::new();

    assert!(detect(&registry, "$1,234.56.23", &defaults()).is_none());
}

#[test]
fn free_text_yields_no_result()
{
    let registry = ProfileRegistry::new();

    assert!(detect(&registry, "abc", &defaults()).is_none());
    assert!(detect(&registry, "", &defaults()).is_none());
}

#[test]
fn numeric_input_resolves_through_assume_only()
{
    let registry = ProfileRegistry::new();

    assert!(detect(&registry, 123, &defaults()).is_none());

    let opts = defaults().assuming("en-US", "USD");
    let hit = detect(&registry, 123, &opts).expect("fallback");

    assert_eq!(hit.locale, "en-US");
    assert_eq!(hit.currency, "USD");
    assert_eq!(hit.score, 0.0);
    assert_eq!(hit.amount, 123.0);
}

#[test]
fn scoped_candidate_lists_detect_sterling()
{
    let registry = ProfileRegistry::new();
    let opts = DetectOptions {
        currencies: vec!["GBP".into()],
        languages: vec!["en".into()],
        countries: vec!["GB".into()],
        assume: None,
    };

    let hit = detect(&registry, "\u{a3}1,234.56", &opts).expect("detection");

    assert_eq!(hit.locale, "en-GB");
    assert_eq!(hit.currency, "GBP");
}

#[test]
fn structural_evidence_beats_the_assume_fallback()
{
    let registry = ProfileRegistry::new();
    let opts = defaults().assuming("fr-CA", "CAD");

    // The input carries full en-US evidence; assume must not hijack it
    let hit = detect(&registry, "$1,234.56", &opts).expect("detection");

    assert_eq!(hit.locale, "en-US");
    assert_eq!(hit.currency, "USD");
    assert_eq!(hit.score, 1.0);
}

#[test]
fn assume_with_unsupported_pair_degrades_to_none()
{
    let registry = ProfileRegistry::new();
    let opts = DetectOptions {
        assume: Some(Assume { locale: "en-US".into(), currency: "XXX".into() }),
        ..defaults()
    };

    // The fallback profile cannot be built; detection stays a no-result
    assert!(detect(&registry, 123, &opts).is_none());
}

#[test]
fn detection_reports_serialize_for_callers()
{
    let registry = ProfileRegistry::new();
    let hit = detect(&registry, "$1,234.56", &defaults()).expect("detection");

    let json = serde_json::to_value(&hit).expect("serializable");

    assert_eq!(json["locale"], "en-US");
    assert_eq!(json["currency"], "USD");
    assert_eq!(json["score"], 1.0);
}

#[test]
fn repeated_detects_share_cached_profiles()
{
    let registry = ProfileRegistry::new();

    let first = detect(&registry, "$1,234.56", &defaults()).expect("detection");
    let second = detect(&registry, "$9.99", &defaults()).expect("detection");

    assert!(std::sync::Arc::ptr_eq(&first.profile, &second.profile));
}
