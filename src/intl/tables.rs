//! Embedded CLDR-derived formatting tables.
//!
//! Deliberately lightweight: per-language number conventions plus a small
//! per-currency table with locale-specific symbol overrides. No ICU data
//! files, no system locale probing. Unknown languages fall back to `en`
//! conventions the same way lightweight formatters in the wild do.

use serde::{Deserialize, Serialize};

use crate::core::profile::ProfileError;
use crate::intl::service::{FormatPart, LocaleFormatter, PartKind};

/// Where a locale places the currency symbol relative to the digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement
{
    /// Symbol immediately before the digits (`$1,234.56`)
    Prefix,
    /// Symbol before the digits with a space (`R$ 1.234,56`)
    PrefixSpace,
    /// Symbol after the digits with a space (`1 234,56 $`)
    SuffixSpace,
}

/// Number conventions for one language (with optional region overrides).
#[derive(Debug, Clone, Copy)]
struct Convention
{
    group: &'static str,
    decimal: &'static str,
    placement: Placement,
}

const EN_LIKE: Convention =
    Convention { group: ",", decimal: ".", placement: Placement::Prefix };

fn convention(
    lang: &str,
    region: &str,
) -> Convention
{
    // Region overrides first: a handful of locales break with their
    // language's home conventions.
    if lang == "es" && region == "US"
    {
        return EN_LIKE;
    }

    match lang
    {
        "en" | "ja" | "zh" | "ko" => EN_LIKE,
        "es" | "de" | "it" =>
        {
            Convention { group: ".", decimal: ",", placement: Placement::SuffixSpace }
        }
        "fr" | "sv" | "nb" | "da" | "ru" | "pl" =>
        {
            Convention { group: " ", decimal: ",", placement: Placement::SuffixSpace }
        }
        "pt" | "nl" =>
        {
            Convention { group: ".", decimal: ",", placement: Placement::PrefixSpace }
        }
        _ => EN_LIKE,
    }
}

/// (code, plain symbol, fraction digits)
const CURRENCIES: &[(&str, &str, usize)] = &[
    ("USD", "$", 2),
    ("CAD", "$", 2),
    ("AUD", "$", 2),
    ("MXN", "$", 2),
    ("BRL", "R$", 2),
    ("EUR", "\u{20ac}", 2),
    ("GBP", "\u{a3}", 2),
    ("CHF", "CHF", 2),
    ("JPY", "\u{a5}", 0),
    ("CNY", "\u{a5}", 2),
    ("KRW", "\u{20a9}", 0),
    ("INR", "\u{20b9}", 2),
    ("SEK", "kr", 2),
    ("NOK", "kr", 2),
    ("DKK", "kr", 2),
    ("PLN", "z\u{142}", 2),
    ("RUB", "\u{20bd}", 2),
];

/// Locale-specific symbol overrides, most specific key first at lookup.
///
/// Keys are either a full `lang-REGION` tag or a bare language; the bare
/// language rows disambiguate shared symbols abroad (`CA$`, `$US`), the
/// full-tag rows restore the home form where the currency is native.
///
/// Symbol text must never contain a separator its locales also use:
/// stripping deletes separators before the symbol literal runs.
const SYMBOL_OVERRIDES: &[(&str, &str, &str)] = &[
    ("en", "CAD", "CA$"),
    ("en", "AUD", "A$"),
    ("en", "MXN", "MX$"),
    ("en", "CNY", "CN\u{a5}"),
    ("en", "SEK", "SEK"),
    ("en", "NOK", "NOK"),
    ("en", "DKK", "DKK"),
    ("en-CA", "CAD", "$"),
    ("en-CA", "USD", "US$"),
    ("en-AU", "AUD", "$"),
    ("es", "USD", "US$"),
    ("es", "CAD", "CA$"),
    ("es-US", "USD", "$"),
    ("es-MX", "MXN", "$"),
    ("fr", "USD", "$US"),
    ("fr", "CAD", "$CA"),
    ("fr-CA", "CAD", "$"),
];

/// Table-backed [`LocaleFormatter`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CldrTables;

impl CldrTables
{
    pub fn new() -> Self
    {
        CldrTables
    }

    fn currency_entry(code: &str) -> Option<(&'static str, &'static str, usize)>
    {
        CURRENCIES
            .iter()
            .copied()
            .find(|(c, _, _)| *c == code)
    }

    fn symbol_for<'a>(
        locale: &str,
        lang: &str,
        code: &str,
        plain: &'a str,
    ) -> &'a str
    {
        let exact = SYMBOL_OVERRIDES
            .iter()
            .find(|(key, c, _)| *key == locale && *c == code);

        if let Some(&(_, _, sym)) = exact
        {
            return sym;
        }

        SYMBOL_OVERRIDES
            .iter()
            .find(|(key, c, _)| *key == lang && *c == code)
            .map(|(_, _, sym)| *sym)
            .unwrap_or(plain)
    }
}

/// Split a canonical tag into (language, region); region may be empty.
fn split_tag(locale: &str) -> (&str, &str)
{
    match locale.split_once('-')
    {
        Some((lang, region)) => (lang, region),
        None => (locale, ""),
    }
}

/// Fixed-point digit text for `value` (absolute value, `digits` fractional).
fn digit_text(
    value: f64,
    digits: usize,
) -> String
{
    if value.is_nan()
    {
        return "NaN".to_string();
    }

    if value.is_infinite()
    {
        return "\u{221e}".to_string();
    }

    format!("{:.*}", digits, value.abs())
}

impl LocaleFormatter for CldrTables
{
    fn canonicalize(
        &self,
        tag: &str,
    ) -> Result<String, ProfileError>
    {
        let mut segments = tag.split(['-', '_']);

        let lang = segments
            .next()
            .unwrap_or_default();

        let lang_ok = (2..=3).contains(&lang.len())
            && lang
                .chars()
                .all(|c| c.is_ascii_alphabetic());

        if !lang_ok
        {
            return Err(ProfileError::InvalidLocale { tag: tag.to_string() });
        }

        let region = segments.next();

        // Anything after a second segment is out of scope for lang-REGION tags
        if segments
            .next()
            .is_some()
        {
            return Err(ProfileError::InvalidLocale { tag: tag.to_string() });
        }

        match region
        {
            None => Ok(lang.to_ascii_lowercase()),
            Some(r)
                if r.len() == 2
                    && r.chars()
                        .all(|c| c.is_ascii_alphabetic()) =>
            {
                Ok(format!("{}-{}", lang.to_ascii_lowercase(), r.to_ascii_uppercase()))
            }
            Some(_) => Err(ProfileError::InvalidLocale { tag: tag.to_string() }),
        }
    }

    fn supported_currencies(&self) -> Vec<&'static str>
    {
        CURRENCIES
            .iter()
            .map(|(code, _, _)| *code)
            .collect()
    }

    fn render_to_parts(
        &self,
        locale: &str,
        currency: &str,
        value: f64,
    ) -> Vec<FormatPart>
    {
        let (lang, region) = split_tag(locale);
        let conv = convention(lang, region);

        let (_, plain, digits) =
            Self::currency_entry(currency).unwrap_or((currency, "\u{a4}", 2));
        let symbol = Self::symbol_for(locale, lang, currency, plain);

        let text = digit_text(value, digits);
        let (int_text, frac_text) = match text.split_once('.')
        {
            Some((i, f)) => (i, Some(f)),
            None => (text.as_str(), None),
        };

        let mut body: Vec<FormatPart> = Vec::new();

        // Integer digits in 3-digit groups, locale group separator between
        let chunks = group_chunks(int_text);

        for (i, chunk) in chunks
            .iter()
            .enumerate()
        {
            if i > 0
            {
                body.push(FormatPart::new(PartKind::Group, conv.group));
            }

            body.push(FormatPart::new(PartKind::Integer, *chunk));
        }

        if let Some(frac) = frac_text
        {
            body.push(FormatPart::new(PartKind::Decimal, conv.decimal));
            body.push(FormatPart::new(PartKind::Fraction, frac));
        }

        let mut parts: Vec<FormatPart> = Vec::new();

        if value.is_sign_negative() && !value.is_nan()
        {
            parts.push(FormatPart::new(PartKind::Literal, "-"));
        }

        match conv.placement
        {
            Placement::Prefix =>
            {
                parts.push(FormatPart::new(PartKind::Currency, symbol));
                parts.extend(body);
            }
            Placement::PrefixSpace =>
            {
                parts.push(FormatPart::new(PartKind::Currency, symbol));
                parts.push(FormatPart::new(PartKind::Literal, " "));
                parts.extend(body);
            }
            Placement::SuffixSpace =>
            {
                parts.extend(body);
                parts.push(FormatPart::new(PartKind::Literal, " "));
                parts.push(FormatPart::new(PartKind::Currency, symbol));
            }
        }

        parts
    }
}

/// Split an unsigned digit run into 3-digit groups, left to right.
fn group_chunks(digits: &str) -> Vec<&str>
{
    // Non-digit runs (NaN, infinity) stay whole
    if !digits
        .chars()
        .all(|c| c.is_ascii_digit())
    {
        return vec![digits];
    }

    let len = digits.len();
    let head = len % 3;
    let mut out = Vec::with_capacity(len / 3 + 1);

    if head > 0
    {
        out.push(&digits[..head]);
    }

    let mut i = head;

    while i < len
    {
        out.push(&digits[i..i + 3]);
        i += 3;
    }

    out
}
