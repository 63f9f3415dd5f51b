//! **centime** - Locale-aware currency formatting, stripping, and detection
//!
//! Derives immutable locale-currency profiles from a formatting service,
//! memoizes them in an injectable registry, and runs a small scored
//! classification over candidate (currency, locale) pairs to guess which
//! one produced an unlabeled formatted string.
//!
//! ```
//! use centime::{DetectOptions, ProfileRegistry, detect};
//!
//! let registry = ProfileRegistry::new();
//!
//! let hit = detect(&registry, "$1,234.56", &DetectOptions::default()).unwrap();
//! assert_eq!(hit.locale, "en-US");
//! assert_eq!(hit.currency, "USD");
//! assert_eq!(hit.amount, 1234.56);
//! ```

/// Core profile, registry, and detection logic
pub mod core {
    /// Profile derivation plus bidirectional strip/format conversion
    pub mod profile;
    pub use profile::{Profile, ProfileError};

    /// Injectable memoized profile store with get-or-create semantics
    pub mod registry;
    pub use registry::ProfileRegistry;

    /// Currency-symbol placement classification (string and parts forms)
    pub mod symbol;
    pub use symbol::SymbolPosition;

    /// Scored locale/currency detection over candidate cross-products
    pub mod detect;
    pub use detect::{Assume, DetectOptions, Detection, detect};
}

/// Locale-aware formatting backend - trait seam plus embedded tables
pub mod intl {
    /// The `LocaleFormatter` trait and typed rendering parts
    pub mod service;
    pub use service::{FormatPart, LocaleFormatter, PartKind};

    /// Built-in CLDR-derived convention tables (no ICU dependency)
    pub mod tables;
    pub use tables::{CldrTables, Placement};
}

// Strategic re-exports for a flat public surface
pub use core::detect::{Assume, DetectOptions, Detection, detect};
pub use core::profile::{Profile, ProfileError};
pub use core::registry::ProfileRegistry;
pub use core::symbol::SymbolPosition;
pub use intl::service::{FormatPart, LocaleFormatter, PartKind};
pub use intl::tables::CldrTables;
