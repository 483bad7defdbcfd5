//! Inverted index over catalog titles.

use std::collections::{BTreeSet, HashMap};

use super::normalize::{normalize, tokenize};

/// One title with its precomputed match forms.
#[derive(Debug, Clone)]
pub struct IndexedTitle {
    /// Title exactly as it appears in the catalog.
    pub title: String,
    /// Lowercase, whitespace-collapsed title.
    pub lowered: String,
    /// Letters and digits only, lowercase.
    pub stripped: String,
}

/// Ordered title list plus a token -> titles inverted index.
///
/// Built once per catalog and never mutated while being read; a reload builds
/// a fresh index.
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    entries: Vec<IndexedTitle>,
    positions: HashMap<String, usize>,
    postings: HashMap<String, BTreeSet<usize>>,
}

impl TitleIndex {
    /// Build the index from titles in catalog order.
    ///
    /// Duplicate titles are indexed once, at their first position.
    pub fn new<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::default();
        for title in titles {
            index.push(title.into());
        }
        index
    }

    fn push(&mut self, title: String) {
        if self.positions.contains_key(&title) {
            return;
        }
        let pos = self.entries.len();
        let norm = normalize(&title);
        for token in norm.tokens {
            self.postings.entry(token).or_default().insert(pos);
        }
        self.positions.insert(title.clone(), pos);
        self.entries.push(IndexedTitle {
            title,
            lowered: norm.lowered,
            stripped: norm.stripped,
        });
    }

    /// Index every token of `alias` as pointing at `title`.
    ///
    /// Returns `false` when the title is not in the index.
    pub fn add_alias(&mut self, alias: &str, title: &str) -> bool {
        let Some(&pos) = self.positions.get(title) else {
            return false;
        };
        for token in tokenize(alias) {
            self.postings.entry(token).or_default().insert(pos);
        }
        true
    }

    /// Titles containing `token`, in catalog order. Empty when unknown.
    pub fn lookup_token(&self, token: &str) -> Vec<&str> {
        self.postings
            .get(token)
            .map(|positions| {
                positions
                    .iter()
                    .map(|&pos| self.entries[pos].title.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Catalog positions of the titles containing `token`.
    pub(crate) fn positions_for(&self, token: &str) -> Option<&BTreeSet<usize>> {
        self.postings.get(token)
    }

    /// Indexed titles in catalog order.
    pub fn entries(&self) -> &[IndexedTitle] {
        &self.entries
    }

    /// Titles in catalog order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.title.as_str())
    }

    /// Number of distinct tokens in the index.
    pub fn token_count(&self) -> usize {
        self.postings.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_token_many_to_many() {
        let index = TitleIndex::new(["Love Me Do", "Can't Buy Me Love", "Yesterday"]);

        assert_eq!(index.lookup_token("love"), vec!["Love Me Do", "Can't Buy Me Love"]);
        assert_eq!(index.lookup_token("me"), vec!["Love Me Do", "Can't Buy Me Love"]);
        assert_eq!(index.lookup_token("cant"), vec!["Can't Buy Me Love"]);
        assert_eq!(index.lookup_token("yesterday"), vec!["Yesterday"]);
    }

    #[test]
    fn test_lookup_unknown_token_is_empty() {
        let index = TitleIndex::new(["Help!"]);
        assert!(index.lookup_token("submarine").is_empty());
        assert!(index.lookup_token("help!").is_empty());
        assert_eq!(index.lookup_token("help"), vec!["Help!"]);
    }

    #[test]
    fn test_every_title_token_is_indexed() {
        let titles = ["A Hard Day's Night", "When I'm Sixty-Four", "Hey Jude"];
        let index = TitleIndex::new(titles);
        for title in titles {
            for token in tokenize(title) {
                assert!(
                    index.lookup_token(&token).contains(&title),
                    "token {} should map to {}",
                    token,
                    title
                );
            }
        }
    }

    #[test]
    fn test_add_alias() {
        let mut index = TitleIndex::new(["When I'm Sixty-Four"]);
        assert!(index.lookup_token("64").is_empty());

        assert!(index.add_alias("64", "When I'm Sixty-Four"));
        assert_eq!(index.lookup_token("64"), vec!["When I'm Sixty-Four"]);

        assert!(!index.add_alias("revolver", "Taxman"));
    }

    #[test]
    fn test_entries_keep_catalog_order() {
        let index = TitleIndex::new(["Get Back", "Let It Be", "Get Back"]);
        let titles: Vec<&str> = index.titles().collect();
        assert_eq!(titles, vec!["Get Back", "Let It Be"]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.entries()[1].stripped, "letitbe");
    }

    #[test]
    fn test_empty_index() {
        let index = TitleIndex::new(Vec::<String>::new());
        assert!(index.is_empty());
        assert_eq!(index.token_count(), 0);
        assert!(index.lookup_token("anything").is_empty());
    }
}
