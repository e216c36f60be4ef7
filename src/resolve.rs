//! Text resolution pipeline.
//!
//! Strategies run as an explicit ordered chain and stop at the first
//! success; there is no exception-driven control flow. The top-level order
//! is:
//!
//! 1. Structured parsers on the raw trimmed input (a shape match is final)
//! 2. Exact named lookup of the normalized phrase
//! 3. Component-wise averaging when two or more tokens resolve on their
//!    own (`"red yellow"` means the blend, not one of the two)
//! 4. Phrase-reduction candidates (last/first token, bigrams, stop-list
//!    adjectives removed), each tried against the structured parsers and
//!    then the named table
//! 5. A single resolvable token anywhere in the phrase
//! 6. Fuzzy matching: whole phrase, then per token at a relaxed cutoff

use phf::phf_set;

use crate::color::Rgb;
use crate::error::ResolveError;
use crate::names;
use crate::normalize::normalize;
use crate::parse::{Structured, parse_structured};

/// Similarity floor for a fuzzy match of the whole phrase.
const FUZZY_PHRASE_CUTOFF: f64 = 0.6;
/// Relaxed similarity floor for per-token fuzzy retries.
const FUZZY_TOKEN_CUTOFF: f64 = 0.55;

/// Descriptive adjectives stripped during phrase reduction (whole-token
/// match only).
static ADJECTIVES: phf::Set<&'static str> = phf_set! {
    "light", "dark", "pale", "deep", "medium", "very", "vivid", "bright",
};

/// A resolved color together with its canonical hex form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedColor {
    /// The resolved RGB triple.
    pub rgb: Rgb,
    /// Canonical `#RRGGBB` (uppercase) rendering of `rgb`.
    pub hex: String,
}

impl From<Rgb> for ResolvedColor {
    fn from(rgb: Rgb) -> Self {
        Self {
            hex: rgb.to_hex(),
            rgb,
        }
    }
}

/// Resolves free-form text to a color.
///
/// Accepts hex (3/6-digit, `#` optional), `rgb()`/`rgba()`, `hsl()`/
/// `hsla()`, plain numeric triples, CSS color names, and descriptive
/// phrases (`"light blue"`, `"crimson yellow"`).
///
/// # Examples
///
/// ```rust
/// use huecast::text_to_color;
///
/// assert_eq!(text_to_color("f0a").unwrap().hex, "#FF00AA");
/// assert_eq!(text_to_color("light blue").unwrap().hex, "#0000FF");
/// assert!(text_to_color("zzzqqq123").is_err());
/// ```
pub fn text_to_color(text: &str) -> Result<ResolvedColor, ResolveError> {
    resolve_text(text).map(ResolvedColor::from)
}

fn resolve_text(text: &str) -> Result<Rgb, ResolveError> {
    let raw = text.trim();
    if raw.is_empty() {
        return Err(ResolveError::EmptyInput);
    }

    match parse_structured(raw) {
        Structured::Parsed(rgb) => {
            log::debug!("resolved {raw:?} structurally -> {rgb}");
            return Ok(rgb);
        }
        Structured::Malformed(reason) => {
            return Err(ResolveError::MalformedStructuredColor {
                input: text.to_string(),
                reason,
            });
        }
        Structured::NoMatch => {}
    }

    let phrase = normalize(raw);
    if let Some(rgb) = names::lookup(&phrase) {
        log::debug!("resolved {raw:?} by exact name -> {rgb}");
        return Ok(rgb);
    }

    let tokens: Vec<&str> = phrase.split(' ').filter(|t| !t.is_empty()).collect();

    // A phrase naming several colors means their blend, so averaging takes
    // precedence over picking one token out of the phrase.
    let resolved: Vec<Rgb> = tokens.iter().filter_map(|t| resolve_candidate(t)).collect();
    if resolved.len() >= 2 {
        let mean = average(&resolved);
        log::debug!(
            "resolved {raw:?} by averaging {} tokens -> {mean}",
            resolved.len()
        );
        return Ok(mean);
    }

    for candidate in reduction_candidates(&tokens) {
        if let Some(rgb) = resolve_candidate(&candidate) {
            log::debug!("resolved {raw:?} via subphrase {candidate:?} -> {rgb}");
            return Ok(rgb);
        }
    }

    // Reduction covers leading/trailing tokens; a lone resolvable token in
    // the middle of a noisy phrase lands here.
    if let Some(&rgb) = resolved.first() {
        return Ok(rgb);
    }

    if let Some(rgb) = crate::fuzzy::closest(&phrase, FUZZY_PHRASE_CUTOFF) {
        return Ok(rgb);
    }
    for token in &tokens {
        if let Some(rgb) = crate::fuzzy::closest(token, FUZZY_TOKEN_CUTOFF) {
            return Ok(rgb);
        }
    }

    Err(ResolveError::UnrecognizedColor {
        input: text.to_string(),
    })
}

/// Reduction candidates, in priority order: last token, first token,
/// last-two bigram, first-two bigram, phrase with stop-list adjectives
/// removed. Duplicates are dropped while preserving order.
fn reduction_candidates(tokens: &[&str]) -> Vec<String> {
    fn push(candidate: String, candidates: &mut Vec<String>) {
        if !candidate.is_empty() && !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }

    let mut candidates: Vec<String> = Vec::new();

    if let (Some(last), Some(first)) = (tokens.last(), tokens.first()) {
        push(last.to_string(), &mut candidates);
        push(first.to_string(), &mut candidates);
    }
    if tokens.len() >= 2 {
        push(tokens[tokens.len() - 2..].join(" "), &mut candidates);
        push(tokens[..2].join(" "), &mut candidates);
    }

    let filtered: Vec<&str> = tokens
        .iter()
        .filter(|t| !ADJECTIVES.contains(**t))
        .copied()
        .collect();
    if !filtered.is_empty() {
        push(filtered.join(" "), &mut candidates);
    }

    candidates
}

/// Tries a single candidate against the structured parsers, then the named
/// table. Failures (including malformed shapes) are simply unsuccessful
/// here; candidate trying never aborts the chain.
fn resolve_candidate(candidate: &str) -> Option<Rgb> {
    if let Structured::Parsed(rgb) = parse_structured(candidate) {
        return Some(rgb);
    }
    names::lookup(candidate)
}

/// Component-wise integer-rounded arithmetic mean.
fn average(colors: &[Rgb]) -> Rgb {
    let n = colors.len() as f64;
    let sum = colors.iter().fold((0.0, 0.0, 0.0), |acc, c| {
        (acc.0 + c.r as f64, acc.1 + c.g as f64, acc.2 + c.b as f64)
    });
    Rgb::from_clamped(sum.0 / n, sum.1 / n, sum.2 / n)
}
