//! Formatting-service seam: everything the profile layer needs from a
//! locale-aware number formatter, behind one trait.
//!
//! Profiles never hardcode locale knowledge; they interrogate a
//! `LocaleFormatter` once at derivation time and work off the answers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::profile::ProfileError;

/// Part classification for a typed rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartKind
{
    /// A run of integer digits
    Integer,
    /// Thousands grouping separator
    Group,
    /// Decimal separator
    Decimal,
    /// A run of fractional digits
    Fraction,
    /// Currency symbol or code
    Currency,
    /// Literal text (spacing, sign)
    Literal,
}

/// One typed piece of a rendered amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatPart
{
    pub kind: PartKind,
    pub text: String,
}

impl FormatPart
{
    pub fn new(
        kind: PartKind,
        text: impl Into<String>,
    ) -> Self
    {
        Self { kind, text: text.into() }
    }
}

/// Locale-aware formatting backend.
///
/// The default implementation is [`crate::intl::CldrTables`]; tests may
/// substitute their own to exercise profiles against unusual conventions.
pub trait LocaleFormatter: Send + Sync + fmt::Debug
{
    /// Canonicalize a `lang-REGION` tag (`en_us` -> `en-US`).
    ///
    /// Structurally invalid tags yield [`ProfileError::InvalidLocale`].
    fn canonicalize(
        &self,
        tag: &str,
    ) -> Result<String, ProfileError>;

    /// Currency codes this backend can render.
    fn supported_currencies(&self) -> Vec<&'static str>;

    /// Render `value` as an ordered typed-parts sequence.
    ///
    /// `locale` must already be canonical and `currency` upper-case;
    /// [`crate::core::profile::Profile`] guarantees both.
    fn render_to_parts(
        &self,
        locale: &str,
        currency: &str,
        value: f64,
    ) -> Vec<FormatPart>;

    /// Render `value` as a plain string.
    ///
    /// Invariant: equals the concatenation of [`Self::render_to_parts`]
    /// texts, so string and parts classifications stay comparable.
    fn render(
        &self,
        locale: &str,
        currency: &str,
        value: f64,
    ) -> String
    {
        let mut out = String::new();

        for part in self.render_to_parts(locale, currency, value)
        {
            out.push_str(&part.text);
        }

        out
    }
}
