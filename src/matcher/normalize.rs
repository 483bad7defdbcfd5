//! Text normalization shared by the catalog index and the resolver.
//!
//! Titles and queries are reduced to three forms:
//! - `lowered`: lowercase, whitespace runs collapsed to one space, trimmed
//! - `stripped`: letters and digits only, lowercase (`A Hard Day's Night` -> `aharddaysnight`)
//! - `tokens`: an unordered bag of words with contraction-aware expansion
//!
//! Full stops are not token boundaries, so titles like `Mr. Moonlight` keep `mr.`.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Characters (besides whitespace) that separate tokens.
const TOKEN_SEPARATORS: &[char] = &[';', ':', ',', '-', '(', ')', '"', '!', '?'];

const POSSESSIVE_SUFFIX: &str = "'s";

/// The derived forms of one piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    /// Lowercase, whitespace-collapsed text.
    pub lowered: String,
    /// Letters and digits only, lowercase.
    pub stripped: String,
    /// Position-independent token set.
    pub tokens: HashSet<String>,
}

/// Normalize a title or a query into all of its matching forms.
pub fn normalize(text: &str) -> NormalizedText {
    let lowered = collapse_whitespace(text).to_lowercase();
    let stripped = strip_to_alnum(&lowered);
    let tokens = tokenize(&lowered);
    NormalizedText {
        lowered,
        stripped,
        tokens,
    }
}

/// Collapse whitespace runs to a single space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Remove every character that is not a letter or digit and lowercase the rest.
pub fn strip_to_alnum(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Split text into a lowercase token set.
///
/// `day's` yields `day's` and `day`; `don't` yields `don't` and `dont`.
pub fn tokenize(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    let mut tokens = HashSet::new();

    for raw in lowered.split(|c: char| c.is_whitespace() || TOKEN_SEPARATORS.contains(&c)) {
        if raw.is_empty() {
            continue;
        }
        if let Some(stem) = raw.strip_suffix(POSSESSIVE_SUFFIX) {
            if !stem.is_empty() {
                tokens.insert(stem.to_string());
            }
        }
        if raw.contains('\'') {
            let bare: String = raw.chars().filter(|&c| c != '\'').collect();
            if !bare.is_empty() {
                tokens.insert(bare);
            }
        }
        tokens.insert(raw.to_string());
    }

    tokens
}
