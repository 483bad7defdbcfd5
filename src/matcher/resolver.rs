//! Four-tier song title resolution.
//!
//! Ranking, highest first:
//! 1. exact match (lowercase or punctuation-free equality) short-circuits
//! 2. a single partial (substring) match
//! 3. token overlap through the inverted index
//! 4. two or more partial matches
//! 5. minimum windowed edit distance
//!
//! The output is always a list: empty means not found, one title means
//! resolved, several mean the caller should ask the user to pick.

use std::collections::HashMap;

use tracing::debug;

use crate::config::MatcherConfig;

use super::distance::windowed_distance;
use super::index::TitleIndex;
use super::normalize::normalize;

/// Outcome of a resolution, for callers that branch on the count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No title matched.
    NotFound,
    /// Exactly one title matched.
    Resolved(String),
    /// Several titles matched; ask the user to disambiguate.
    Ambiguous(Vec<String>),
}

impl From<Vec<String>> for Resolution {
    fn from(mut titles: Vec<String>) -> Self {
        match titles.len() {
            0 => Resolution::NotFound,
            1 => Resolution::Resolved(titles.remove(0)),
            _ => Resolution::Ambiguous(titles),
        }
    }
}

impl Resolution {
    /// Matched titles, in the order the resolver produced them.
    pub fn titles(&self) -> Vec<&str> {
        match self {
            Resolution::NotFound => Vec::new(),
            Resolution::Resolved(title) => vec![title.as_str()],
            Resolution::Ambiguous(titles) => titles.iter().map(String::as_str).collect(),
        }
    }
}

/// Resolves free-text queries against a [`TitleIndex`].
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: MatcherConfig,
}

impl Resolver {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Resolve `query` and classify the result.
    pub fn resolution(&self, index: &TitleIndex, query: &str) -> Resolution {
        Resolution::from(self.resolve(index, query))
    }

    /// Resolve `query` to zero, one or many catalog titles.
    pub fn resolve(&self, index: &TitleIndex, query: &str) -> Vec<String> {
        let query = normalize(query);
        let lowered_len = query.lowered.chars().count();
        let stripped_len = query.stripped.chars().count();
        let min_partial = self.config.min_partial_len;

        let mut partial: Vec<usize> = Vec::new();
        let mut min_distance = usize::MAX;
        let mut nearest: Vec<usize> = Vec::new();

        for (pos, entry) in index.entries().iter().enumerate() {
            // Tier 1: exact
            let lowered_equal = !query.lowered.is_empty() && query.lowered == entry.lowered;
            let stripped_equal = !query.stripped.is_empty() && query.stripped == entry.stripped;
            if lowered_equal || stripped_equal {
                debug!(query = %query.lowered, title = %entry.title, "Exact title match");
                return vec![entry.title.clone()];
            }

            // Tier 2: partial, with a length floor against short false positives
            let lowered_partial =
                lowered_len >= min_partial && entry.lowered.contains(&query.lowered);
            let stripped_partial =
                stripped_len >= min_partial && entry.stripped.contains(&query.stripped);
            if lowered_partial || stripped_partial {
                partial.push(pos);
            }

            // Tier 3: edit distance
            if stripped_len == 0 {
                continue;
            }
            let distance = windowed_distance(&query.stripped, &entry.stripped);
            let ratio = distance as f64 / stripped_len as f64;
            if ratio >= self.config.distance_threshold {
                continue;
            }
            if distance < min_distance {
                min_distance = distance;
                nearest.clear();
                nearest.push(pos);
            } else if distance == min_distance {
                nearest.push(pos);
            }
        }

        // Tier 4: token overlap
        let mut tally: HashMap<usize, usize> = HashMap::new();
        for token in &query.tokens {
            if let Some(positions) = index.positions_for(token) {
                for &pos in positions {
                    *tally.entry(pos).or_insert(0) += 1;
                }
            }
        }
        let max_tally = tally.values().copied().max().unwrap_or(0);
        let mut token_matches: Vec<usize> = tally
            .into_iter()
            .filter(|&(_, count)| count == max_tally)
            .map(|(pos, _)| pos)
            .collect();
        token_matches.sort_unstable();

        let (tier, picked) = if partial.len() == 1 {
            ("partial", partial)
        } else if max_tally >= 1 {
            ("token", token_matches)
        } else if partial.len() >= 2 {
            ("partial", partial)
        } else {
            ("distance", nearest)
        };

        debug!(
            query = %query.lowered,
            tier,
            candidates = picked.len(),
            "Resolved title query"
        );

        picked
            .into_iter()
            .map(|pos| index.entries()[pos].title.clone())
            .collect()
    }
}
