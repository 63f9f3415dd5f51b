//! Currency-symbol placement classification.
//!
//! One classification rule applied to two input shapes (plain string and
//! typed-parts sequence) so the placements stay comparable: index 0 is
//! leading, the last valid index is trailing, anything else in between is
//! within, and no occurrence at all is missing.

use memchr::memmem;
use serde::{Deserialize, Serialize};

use crate::intl::service::{FormatPart, PartKind};

/// Where the currency symbol sits relative to the rest of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolPosition
{
    Leading,
    Trailing,
    Within,
    Missing,
}

impl std::fmt::Display for SymbolPosition
{
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result
    {
        match self
        {
            SymbolPosition::Leading => write!(f, "leading"),
            SymbolPosition::Trailing => write!(f, "trailing"),
            SymbolPosition::Within => write!(f, "within"),
            SymbolPosition::Missing => write!(f, "missing"),
        }
    }
}

/// Classify the currency part's position within a typed-parts sequence.
///
/// Empty-text parts are ignored; they carry no visible placement evidence.
pub fn locate_in_parts(parts: &[FormatPart]) -> SymbolPosition
{
    let visible: Vec<&FormatPart> = parts
        .iter()
        .filter(|p| !p.text.is_empty())
        .collect();

    let index = visible
        .iter()
        .position(|p| p.kind == PartKind::Currency);

    match index
    {
        None => SymbolPosition::Missing,
        Some(0) => SymbolPosition::Leading,
        Some(i) if i == visible.len() - 1 => SymbolPosition::Trailing,
        Some(_) => SymbolPosition::Within,
    }
}

/// Classify the first occurrence of `symbol` within `haystack`.
pub fn locate_in_str(
    haystack: &str,
    symbol: &str,
) -> SymbolPosition
{
    if symbol.is_empty()
    {
        return SymbolPosition::Missing;
    }

    match memmem::find(haystack.as_bytes(), symbol.as_bytes())
    {
        None => SymbolPosition::Missing,
        Some(0) => SymbolPosition::Leading,
        Some(i) if i == haystack.len() - symbol.len() => SymbolPosition::Trailing,
        Some(_) => SymbolPosition::Within,
    }
}
