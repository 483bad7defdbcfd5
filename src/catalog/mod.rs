//! Song catalog and its title index.
//!
//! The catalog is loaded once from a JSON array of songs and held read-only.
//! Loading validates the titles: they must be unique, contain at least one
//! letter or digit, and must not contain `&` or `=`, which delimit quiz
//! session tokens. A title may not be the quiz token's no-answer sentinel.

mod store;
mod types;

pub use store::CatalogStore;
pub use types::{Song, SongField, SongLinks};

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::{info, warn};

use crate::error::{Result, SongbotError};
use crate::matcher::{strip_to_alnum, TitleIndex};
use crate::quiz::NO_ANSWER;

/// Characters a title may not contain (quiz token delimiters).
pub const RESERVED_TITLE_CHARS: &[char] = &['&', '='];

/// Line break marker used by some lyric exports.
const HTML_LINE_BREAK: &str = "<br>";

/// Immutable song catalog with a prebuilt title index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: Vec<Song>,
    by_title: HashMap<String, usize>,
    index: TitleIndex,
}

impl Catalog {
    /// Build a catalog from songs in display order.
    ///
    /// An empty song list is accepted; every query against it is not found.
    pub fn new(songs: Vec<Song>) -> Result<Self> {
        let mut seen = HashSet::new();
        for song in &songs {
            validate_title(&song.title)?;
            if !seen.insert(song.title.as_str()) {
                return Err(SongbotError::Catalog(format!(
                    "Duplicate song title '{}'",
                    song.title
                )));
            }
        }

        let mut index = TitleIndex::new(songs.iter().map(|s| s.title.clone()));
        for song in &songs {
            for alias in &song.aliases {
                index.add_alias(alias, &song.title);
            }
        }

        let by_title = songs
            .iter()
            .enumerate()
            .map(|(pos, song)| (song.title.clone(), pos))
            .collect();

        Ok(Self {
            songs,
            by_title,
            index,
        })
    }

    /// Parse a JSON array of songs.
    pub fn from_json(raw: &str) -> Result<Self> {
        let mut songs: Vec<Song> = serde_json::from_str(raw)?;
        for song in &mut songs {
            if song.lyrics.contains(HTML_LINE_BREAK) {
                song.lyrics = song.lyrics.replace(HTML_LINE_BREAK, "\n");
            }
        }
        Self::new(songs)
    }

    /// Load a catalog file. An empty catalog is a startup error here.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SongbotError::Catalog(format!("Cannot read catalog {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json(&raw)?;
        if catalog.is_empty() {
            return Err(SongbotError::Catalog(format!(
                "Catalog {} contains no songs",
                path.display()
            )));
        }

        let without_lyrics = catalog.songs.iter().filter(|s| s.lyrics.trim().is_empty()).count();
        if without_lyrics > 0 {
            warn!(count = without_lyrics, "Songs without lyrics are skipped by the quiz");
        }
        info!(
            path = %path.display(),
            songs = catalog.len(),
            tokens = catalog.index.token_count(),
            "Loaded song catalog"
        );
        Ok(catalog)
    }

    /// Look up a song by exact title.
    pub fn get(&self, title: &str) -> Option<&Song> {
        self.by_title.get(title).map(|&pos| &self.songs[pos])
    }

    /// Songs in catalog order.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Title index built from this catalog.
    pub fn index(&self) -> &TitleIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

fn validate_title(title: &str) -> Result<()> {
    if strip_to_alnum(title).is_empty() {
        return Err(SongbotError::Catalog(format!(
            "Song title '{}' has no letters or digits",
            title
        )));
    }
    if title == NO_ANSWER {
        return Err(SongbotError::Catalog(format!(
            "Song title '{}' is reserved by quiz session tokens",
            title
        )));
    }
    if let Some(c) = title.chars().find(|c| RESERVED_TITLE_CHARS.contains(c)) {
        return Err(SongbotError::Catalog(format!(
            "Song title '{}' contains reserved character '{}'",
            title, c
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "title": "Get Back",
            "lyrics": "Jojo was a man who thought he was a loner<br>But he knew it couldn't last",
            "album": "Let It Be",
            "year": 1970,
            "links": {"official_youtube": "GjbD4JmUgUM"}
        },
        {"title": "When I'm Sixty-Four", "aliases": ["64"]},
        {"title": "Hey Jude"}
    ]"#;

    #[test]
    fn test_from_json() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);

        let song = catalog.get("Get Back").unwrap();
        assert_eq!(song.year, Some(1970));
        assert!(song.lyrics.contains('\n'));
        assert!(!song.lyrics.contains("<br>"));
        assert_eq!(song.links.official_youtube.as_deref(), Some("GjbD4JmUgUM"));
    }

    #[test]
    fn test_aliases_are_indexed() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.index().lookup_token("64"), vec!["When I'm Sixty-Four"]);
    }

    #[test]
    fn test_duplicate_title_rejected() {
        let songs = vec![Song::new("Help!", ""), Song::new("Help!", "")];
        let err = Catalog::new(songs).unwrap_err();
        assert!(matches!(err, SongbotError::Catalog(_)));
    }

    #[test]
    fn test_reserved_characters_rejected() {
        let err = Catalog::new(vec![Song::new("Rock & Roll Music", "")]).unwrap_err();
        assert!(err.to_string().contains("reserved character '&'"));

        let err = Catalog::new(vec![Song::new("E=MC2", "")]).unwrap_err();
        assert!(matches!(err, SongbotError::Catalog(_)));
    }

    #[test]
    fn test_reserved_sentinel_title_rejected() {
        let err = Catalog::new(vec![Song::new(NO_ANSWER, "")]).unwrap_err();
        assert!(err.to_string().contains("reserved by quiz session tokens"));

        // only the exact sentinel is reserved
        assert!(Catalog::new(vec![Song::new("None of Us", "")]).is_ok());
        assert!(Catalog::new(vec![Song::new("none", "")]).is_ok());
    }

    #[test]
    fn test_title_without_alnum_rejected() {
        assert!(Catalog::new(vec![Song::new("?!", "")]).is_err());
    }

    #[test]
    fn test_empty_catalog_builds() {
        let catalog = Catalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.index().is_empty());
    }

    #[test]
    fn test_load_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("catalog.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.songs()[2].title, "Hey Jude");
    }

    #[test]
    fn test_load_empty_file_is_fatal() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("catalog.json");
        std::fs::write(&path, "[]").unwrap();

        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, SongbotError::Catalog(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = Catalog::load(&tmp.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, SongbotError::Catalog(_)));
    }
}
