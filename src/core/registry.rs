//! Injectable profile registry with get-or-create semantics.
//!
//! One registry owns one formatting service and memoizes every profile it
//! derives. Construction is explicit (no process-global singleton): create
//! the registry once at startup and hand out references.

use std::sync::Arc;

use moka::sync::Cache;
use tracing::debug;

use crate::core::profile::{Profile, ProfileError};
use crate::intl::service::LocaleFormatter;
use crate::intl::tables::CldrTables;

/// Memoized store of derived profiles, keyed by `currency|locale`.
///
/// `get_or_create` is atomic per key: concurrent first requests for the
/// same pair race on one initialization slot, so exactly one canonical
/// `Arc<Profile>` ever lives under a key. Unbounded by design; the key
/// space is the caller-supplied currency and locale lists.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    service: Arc<dyn LocaleFormatter>,
    cache: Cache<String, Arc<Profile>>,
}

impl ProfileRegistry {
    /// Registry over the built-in table-backed formatter.
    pub fn new() -> Self {
        Self::with_service(Arc::new(CldrTables::new()))
    }

    /// Registry over a caller-supplied formatting service.
    pub fn with_service(service: Arc<dyn LocaleFormatter>) -> Self {
        Self {
            service,
            cache: Cache::new(u64::MAX),
        }
    }

    /// Canonical cache key for a pair; requires valid inputs.
    fn key(&self, currency: &str, locale: &str) -> Result<String, ProfileError> {
        let canonical = self.service.canonicalize(locale)?;
        let code = currency.trim().to_ascii_uppercase();

        Ok(format!("{code}|{canonical}"))
    }

    /// Fetch the profile for a pair, deriving and memoizing on first use.
    ///
    /// Identical arguments always return the same `Arc` until eviction;
    /// derivation runs at most once per key even under concurrency.
    pub fn get_or_create(
        &self,
        currency: &str,
        locale: &str,
    ) -> Result<Arc<Profile>, ProfileError> {
        let key = self.key(currency, locale)?;

        self.cache
            .try_get_with(key, || {
                Profile::derive(self.service.clone(), currency, locale).map(Arc::new)
            })
            .map_err(|shared: Arc<ProfileError>| (*shared).clone())
    }

    /// Panicking convenience over [`Self::get_or_create`].
    ///
    /// A thin wrapper, not a second construction path: use it where an
    /// unsupported pair is a programming error.
    pub fn expect_profile(&self, currency: &str, locale: &str) -> Arc<Profile> {
        self.get_or_create(currency, locale)
            .unwrap_or_else(|e| panic!("profile for {currency}/{locale}: {e}"))
    }

    /// Drop the cached profile for a pair; the next request re-derives.
    ///
    /// Invalid pairs evict nothing and report `false`.
    pub fn evict(&self, currency: &str, locale: &str) -> bool {
        match self.key(currency, locale) {
            Ok(key) => {
                let present = self.cache.contains_key(&key);
                self.cache.invalidate(&key);

                if present {
                    debug!(%key, "evicted profile");
                }

                present
            }
            Err(_) => false,
        }
    }

    /// Whether a pair is currently cached (no derivation side effect).
    pub fn contains(&self, currency: &str, locale: &str) -> bool {
        self.key(currency, locale)
            .map(|key| self.cache.contains_key(&key))
            .unwrap_or(false)
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}
