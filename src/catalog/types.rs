//! Catalog type definitions.

use serde::{Deserialize, Serialize};

/// One catalog song. `title` is the primary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Song title, unique within the catalog.
    pub title: String,
    /// Lyrics: paragraphs separated by a blank line, lines by a newline.
    #[serde(default)]
    pub lyrics: String,
    /// Album the song first appeared on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    /// Release year of that album.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    /// Extra words that should find this song (e.g. `64`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Reference links, opaque to the matcher.
    #[serde(default)]
    pub links: SongLinks,
}

/// Reference links attached to a song.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SongLinks {
    /// YouTube video ID of the official recording.
    pub official_youtube: Option<String>,
    /// YouTube video ID of a harmony breakdown.
    pub harmony_youtube: Option<String>,
    /// YouTube video ID of a bass cover.
    pub bass_youtube: Option<String>,
    /// Bass tablature URL.
    pub bass_tab: Option<String>,
    /// Song database entry URL.
    pub database_url: Option<String>,
}

/// Which piece of a song a lookup asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SongField {
    /// Official video (the default lookup).
    Video,
    Lyrics,
    Harmony,
    Bass,
    BassTab,
    Info,
}

impl SongField {
    /// Every field that is selected by a leading keyword.
    pub const KEYWORD_FIELDS: [SongField; 5] = [
        SongField::Lyrics,
        SongField::Harmony,
        SongField::Bass,
        SongField::BassTab,
        SongField::Info,
    ];

    /// Leading keyword that selects this field, `None` for the default.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            SongField::Video => None,
            SongField::Lyrics => Some("lyrics"),
            SongField::Harmony => Some("harmony"),
            SongField::Bass => Some("bass"),
            SongField::BassTab => Some("basstab"),
            SongField::Info => Some("info"),
        }
    }

    /// Field selected by `keyword` (case-insensitive).
    pub fn from_keyword(keyword: &str) -> Option<SongField> {
        let keyword = keyword.to_lowercase();
        Self::KEYWORD_FIELDS
            .into_iter()
            .find(|field| field.keyword() == Some(keyword.as_str()))
    }

    /// Text to put in front of a title so a re-submitted choice keeps this field.
    pub fn prefix(self) -> String {
        self.keyword()
            .map(|k| format!("{} ", k))
            .unwrap_or_default()
    }
}

impl Song {
    /// Create a song with a title and lyrics and no other data.
    pub fn new(title: impl Into<String>, lyrics: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lyrics: lyrics.into(),
            album: None,
            year: None,
            aliases: Vec::new(),
            links: SongLinks::default(),
        }
    }

    pub fn with_album(mut self, album: impl Into<String>, year: u16) -> Self {
        self.album = Some(album.into());
        self.year = Some(year);
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn with_links(mut self, links: SongLinks) -> Self {
        self.links = links;
        self
    }

    /// Lyrics split into paragraphs of lines.
    pub fn paragraphs(&self) -> Vec<Vec<&str>> {
        self.lyrics
            .split("\n\n")
            .map(|p| p.trim_matches('\n'))
            .filter(|p| !p.trim().is_empty())
            .map(|p| p.split('\n').collect())
            .collect()
    }

    /// Whitespace-delimited lyric words.
    pub fn lyric_words(&self) -> Vec<&str> {
        self.lyrics.split_whitespace().collect()
    }

    /// Raw stored value for a link field. `None` for lyrics and missing data.
    pub fn link(&self, field: SongField) -> Option<&str> {
        let value = match field {
            SongField::Video => &self.links.official_youtube,
            SongField::Harmony => &self.links.harmony_youtube,
            SongField::Bass => &self.links.bass_youtube,
            SongField::BassTab => &self.links.bass_tab,
            SongField::Info => &self.links.database_url,
            SongField::Lyrics => return None,
        };
        value.as_deref().filter(|v| !v.trim().is_empty())
    }
}
