//! Locale-currency profiles: the derived formatting facts for one
//! (currency, locale) pair, plus bidirectional conversion through them.
//!
//! A profile is derived once from a reference rendering and is immutable
//! afterwards. Stripping never fails: a string the profile cannot explain
//! yields `f64::NAN`, which is normal detection feedback rather than an
//! error.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::core::symbol::{self, SymbolPosition};
use crate::intl::service::{FormatPart, LocaleFormatter, PartKind};

/// Reference amount used for derivation: two grouping boundaries plus a
/// fractional part, so every marker the locale uses shows up.
const REFERENCE_VALUE: f64 = 123_456_789.123;

/// Fallbacks when the formatting service emits no marker of a given kind.
const DEFAULT_GROUP: &str = ",";
const DEFAULT_DECIMAL: &str = ".";
const DEFAULT_SYMBOL: &str = "$";

/// Construction-time failures. Parse failures are NOT here: stripping
/// reports them as `f64::NAN` values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError
{
    /// Currency code outside the formatting service's supported set
    #[error("unsupported currency code: {code}")]
    UnsupportedCurrency
    {
        code: String,
    },

    /// Locale tag the formatting service cannot canonicalize
    #[error("invalid locale tag: {tag}")]
    InvalidLocale
    {
        tag: String,
    },

    /// Formatting service capability missing in this runtime
    #[error("formatting runtime unsupported: {reason}")]
    UnsupportedRuntime
    {
        reason: String,
    },
}

/// Immutable formatting facts for one (currency, locale) pair.
#[derive(Debug, Clone, Serialize)]
pub struct Profile
{
    /// Upper-cased ISO-style currency code
    pub currency: String,
    /// Canonical `lang-REGION` tag
    pub locale: String,
    /// Thousands grouping separator
    pub group_separator: String,
    /// Decimal separator
    pub decimal_separator: String,
    /// Rendered currency symbol (may be multi-character)
    pub currency_symbol: String,
    /// Symbol placement in the reference rendering
    pub symbol_position: SymbolPosition,
    /// Reference rendering the facts were scanned from
    pub reference: String,

    #[serde(skip)]
    service: Arc<dyn LocaleFormatter>,
}

/// First part of `kind` with visible text, if any.
fn first_part_text(
    parts: &[FormatPart],
    kind: PartKind,
) -> Option<&str>
{
    parts
        .iter()
        .find(|p| p.kind == kind && !p.text.is_empty())
        .map(|p| p.text.as_str())
}

/// Fresh matcher for a literal chunk of separator/symbol text.
///
/// Escaped literals always compile; the expect can only fire on a regex
/// crate defect.
fn literal_matcher(text: &str) -> Regex
{
    Regex::new(&regex::escape(text)).expect("escaped literal pattern compiles")
}

impl Profile
{
    /// Derive a profile from one reference rendering.
    ///
    /// The currency must be in the service's supported set and the locale
    /// must canonicalize; otherwise the respective [`ProfileError`] comes
    /// back. Registration in a cache is the registry's job, not ours.
    #[instrument(skip(service), level = "debug")]
    pub fn derive(
        service: Arc<dyn LocaleFormatter>,
        currency: &str,
        locale: &str,
    ) -> Result<Self, ProfileError>
    {
        let code = currency
            .trim()
            .to_ascii_uppercase();

        if !service
            .supported_currencies()
            .contains(&code.as_str())
        {
            return Err(ProfileError::UnsupportedCurrency { code });
        }

        let canonical = service.canonicalize(locale)?;

        let parts = service.render_to_parts(&canonical, &code, REFERENCE_VALUE);

        let group_separator = first_part_text(&parts, PartKind::Group)
            .unwrap_or(DEFAULT_GROUP)
            .to_string();
        let decimal_separator = first_part_text(&parts, PartKind::Decimal)
            .unwrap_or(DEFAULT_DECIMAL)
            .to_string();
        let currency_symbol = first_part_text(&parts, PartKind::Currency)
            .unwrap_or(DEFAULT_SYMBOL)
            .to_string();

        let symbol_position = symbol::locate_in_parts(&parts);

        let reference: String = parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();

        debug!(
            currency = %code,
            locale = %canonical,
            group = %group_separator,
            decimal = %decimal_separator,
            symbol = %currency_symbol,
            position = %symbol_position,
            "derived profile"
        );

        Ok(Self {
            currency: code,
            locale: canonical,
            group_separator,
            decimal_separator,
            currency_symbol,
            symbol_position,
            reference,
            service,
        })
    }

    /// Fresh group-separator matcher.
    ///
    /// Matchers are rebuilt on every call by design: no compiled matcher
    /// state (and in particular no match position) survives between uses.
    pub fn group_matcher(&self) -> Regex
    {
        literal_matcher(&self.group_separator)
    }

    /// Fresh decimal-separator matcher.
    pub fn decimal_matcher(&self) -> Regex
    {
        literal_matcher(&self.decimal_separator)
    }

    /// Fresh currency-symbol matcher (literal, case-sensitive).
    pub fn symbol_matcher(&self) -> Regex
    {
        literal_matcher(&self.currency_symbol)
    }

    /// Reduce `value` to a plain number through this profile's conventions.
    ///
    /// The value is coerced to text first (the explicit normalization step
    /// at this boundary), then group separators are deleted, the decimal
    /// separator becomes `.`, the symbol is deleted as a literal substring,
    /// and the remainder is parsed. A remainder that is not a number yields
    /// `f64::NAN`: "this profile does not explain this string".
    pub fn strip(
        &self,
        value: impl fmt::Display,
    ) -> f64
    {
        let text = value.to_string();

        let no_groups = self
            .group_matcher()
            .replace_all(&text, "");
        let dotted = self
            .decimal_matcher()
            .replace_all(&no_groups, ".");
        let bare = self
            .symbol_matcher()
            .replace_all(&dotted, "");

        bare.trim()
            .parse::<f64>()
            .unwrap_or(f64::NAN)
    }

    /// Render `value` the way this profile's locale writes this currency.
    ///
    /// Plain numeric input is parsed as-is; only text that is not already a
    /// number strips through the profile's conventions first. A `.` group
    /// separator must never touch the decimal point of plain input.
    pub fn format(
        &self,
        value: impl fmt::Display,
    ) -> String
    {
        let text = value.to_string();

        let amount = text
            .trim()
            .parse::<f64>()
            .unwrap_or_else(|_| self.strip(&text));

        self.service
            .render(&self.locale, &self.currency, amount)
    }

    /// Classify where this profile's symbol sits in `input`.
    pub fn locate_symbol(
        &self,
        input: &str,
    ) -> SymbolPosition
    {
        symbol::locate_in_str(input, &self.currency_symbol)
    }

    /// Classify the symbol position in a typed-parts sequence.
    pub fn locate_symbol_in_parts(
        &self,
        parts: &[FormatPart],
    ) -> SymbolPosition
    {
        symbol::locate_in_parts(parts)
    }

    /// Occurrences of the group separator in `input`.
    pub(crate) fn count_group(
        &self,
        input: &str,
    ) -> usize
    {
        self.group_matcher()
            .find_iter(input)
            .count()
    }

    /// Occurrences of the decimal separator in `input`.
    pub(crate) fn count_decimal(
        &self,
        input: &str,
    ) -> usize
    {
        self.decimal_matcher()
            .find_iter(input)
            .count()
    }

    /// Occurrences of the currency symbol in `input`.
    pub(crate) fn count_symbol(
        &self,
        input: &str,
    ) -> usize
    {
        self.symbol_matcher()
            .find_iter(input)
            .count()
    }
}
