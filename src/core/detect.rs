//! Heuristic locale/currency detection for unlabeled formatted strings.
//!
//! Fans out over the caller's candidate currencies and `language-country`
//! locales, strips the input through each candidate profile, and scores
//! the string-pattern evidence (separator occurrences, symbol placement).
//! A character-exact round trip short-circuits at score 1.0; everything
//! else competes on a per-locale scoreboard with documented tie-breaking.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::core::profile::Profile;
use crate::core::registry::ProfileRegistry;

/// Raw scores clamp into 0..=MAX_RAW before normalizing to [0, 1].
const MAX_RAW: i32 = 6;

/// Fallback pair for inputs carrying no structural evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assume
{
    pub locale: String,
    pub currency: String,
}

/// Candidate space for one `detect` call.
///
/// Candidate locales are every `language-country` combination; candidates
/// are evaluated currency-major, then locale-minor, in the order given
/// here. That iteration order is the tie-breaking contract: the first
/// candidate to reach the winning score keeps it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectOptions
{
    pub currencies: Vec<String>,
    pub languages: Vec<String>,
    pub countries: Vec<String>,
    pub assume: Option<Assume>,
}

impl Default for DetectOptions
{
    fn default() -> Self
    {
        Self {
            currencies: vec!["USD".into(), "CAD".into()],
            languages: vec!["en".into(), "es".into(), "fr".into()],
            countries: vec!["US".into(), "CA".into()],
            assume: None,
        }
    }
}

impl DetectOptions
{
    /// Set the zero-evidence fallback pair.
    pub fn assuming(
        mut self,
        locale: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self
    {
        self.assume = Some(Assume { locale: locale.into(), currency: currency.into() });
        self
    }
}

/// One resolved detection.
#[derive(Debug, Clone, Serialize)]
pub struct Detection
{
    /// Winning canonical locale tag
    pub locale: String,
    /// Winning currency code
    pub currency: String,
    /// Stripped numeric amount (NaN only on the assume fallback path)
    pub amount: f64,
    /// The input re-rendered through the winning profile
    pub formatted: String,
    /// The input, post string coercion
    pub original: String,
    /// Normalized confidence in [0, 1]
    pub score: f64,

    /// The winning profile
    #[serde(skip)]
    pub profile: Arc<Profile>,
}

/// Scoreboard slot: best candidate seen so far for one locale.
struct Candidate
{
    profile: Arc<Profile>,
    amount: f64,
    formatted: String,
    score: f64,
}

impl Candidate
{
    fn into_detection(
        self,
        original: &str,
    ) -> Detection
    {
        Detection {
            locale: self
                .profile
                .locale
                .clone(),
            currency: self
                .profile
                .currency
                .clone(),
            amount: self.amount,
            formatted: self.formatted,
            original: original.to_string(),
            score: self.score,
            profile: self.profile,
        }
    }
}

/// Pattern-evidence score for one candidate, or None when disqualified.
///
/// Counts run over the raw input; symbol placement is compared between the
/// input and the candidate's own re-rendering so both sides go through the
/// same classification rule.
fn raw_score(
    profile: &Profile,
    input: &str,
    reformatted: &str,
) -> Option<i32>
{
    let decimals = profile.count_decimal(input);

    // More than one decimal marker is invalid evidence, full stop
    if decimals > 1
    {
        return None;
    }

    let mut raw = 0i32;

    let groups = profile.count_group(input);

    if groups > 0
    {
        raw += 1;
    }

    if groups > 1
    {
        raw += 1;
    }

    if decimals == 1
    {
        // One point for presence, one for exact singularity
        raw += 2;
    }

    if profile.count_symbol(input) > 0
    {
        raw += 1;

        // Placement agreement is worth a point; disagreement costs one
        if profile.locate_symbol(input) == profile.locate_symbol(reformatted)
        {
            raw += 1;
        }
        else
        {
            raw -= 1;
        }
    }

    Some(raw)
}

/// Best-effort guess at which (locale, currency) pair produced `input`.
///
/// The input is coerced to text up front; that coercion is the documented
/// normalization boundary. Returns `None` when no candidate explains the
/// input and no usable `assume` fallback was given. Never fails: candidate
/// profiles that cannot be built are skipped.
#[instrument(skip_all, level = "debug")]
pub fn detect(
    registry: &ProfileRegistry,
    input: impl fmt::Display,
    opts: &DetectOptions,
) -> Option<Detection>
{
    let original = input.to_string();

    let locales: Vec<String> = opts
        .languages
        .iter()
        .cartesian_product(opts.countries.iter())
        .map(|(lang, country)| format!("{lang}-{country}"))
        .collect();

    debug!(
        input = %original,
        currencies = opts.currencies.len(),
        locales = locales.len(),
        "scoring candidates"
    );

    // One slot per locale; a later currency takes the slot only by scoring
    // strictly higher
    let mut board: IndexMap<String, Candidate> = IndexMap::new();

    for currency in &opts.currencies
    {
        for locale in &locales
        {
            let profile = match registry.get_or_create(currency, locale)
            {
                Ok(p) => p,
                Err(e) =>
                {
                    trace!(%currency, %locale, error = %e, "skipping candidate");
                    continue;
                }
            };

            let amount = profile.strip(&original);

            if amount.is_nan()
            {
                trace!(%currency, %locale, "candidate cannot explain input");
                continue;
            }

            let reformatted = profile.format(amount);

            // Perfect round trip: first exact match wins outright
            if reformatted == original
            {
                debug!(%currency, %locale, "exact round-trip match");

                return Some(
                    Candidate { profile, amount, formatted: reformatted, score: 1.0 }
                        .into_detection(&original),
                );
            }

            let Some(raw) = raw_score(&profile, &original, &reformatted)
            else
            {
                trace!(%currency, %locale, "disqualified: repeated decimal marker");
                continue;
            };

            let score = f64::from(raw.clamp(0, MAX_RAW)) / f64::from(MAX_RAW);

            trace!(%currency, %locale, raw, score, "scored candidate");

            let slot = board.get(profile.locale.as_str());

            if slot.is_none_or(|held| score > held.score)
            {
                board.insert(
                    profile
                        .locale
                        .clone(),
                    Candidate { profile, amount, formatted: reformatted, score },
                );
            }
        }
    }

    // First slot reaching the maximum keeps it; later equals never replace
    let mut best: Option<usize> = None;

    for (i, candidate) in board
        .values()
        .enumerate()
    {
        let leading = best.map_or(0.0, |b| board[b].score);

        if candidate.score > leading
        {
            best = Some(i);
        }
    }

    if let Some(i) = best
    {
        let (_, winner) = board.swap_remove_index(i)?;

        debug!(locale = %winner.profile.locale, score = winner.score, "detection resolved");

        return Some(winner.into_detection(&original));
    }

    // Zero structural evidence: honor an explicit assume fallback
    if let Some(assume) = &opts.assume
    {
        if let Ok(profile) = registry.get_or_create(&assume.currency, &assume.locale)
        {
            let amount = profile.strip(&original);
            let formatted = profile.format(&original);

            debug!(locale = %profile.locale, "resolved via assume fallback");

            return Some(
                Candidate { profile, amount, formatted, score: 0.0 }
                    .into_detection(&original),
            );
        }
    }

    debug!("no candidate explains the input");

    None
}
