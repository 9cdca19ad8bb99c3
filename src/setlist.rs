//! # Setlists
//!
//! A setlist owns its songs and the settings every song is rendered with.
//! Setlists are stored as YAML:
//!
//! ```yaml
//! title: Sunday Evening
//! settings:
//!   naming: flats
//!   wrap-width: 72
//! songs:
//!   - id: amazing-grace
//!     title: Amazing Grace
//!     transpose: 2
//!     body: |
//!       [Verse 1]
//!       [ch]G[/ch]        [ch]C[/ch]
//!       Amazing grace how sweet the sound
//! ```
//!
//! Every field except `songs[].id` has a default.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chord::NamingStyle;
use crate::error::SheetError;
use crate::import::ImportedSong;
use crate::paginate::{PageGeometry, DEFAULT_MIN_SECTION_LINES};
use crate::transpose::{transpose_tagged_body, MAX_SEMITONES};

/// Rendering and transposition settings shared by a whole setlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub naming: NamingStyle,
    /// Reduce chords to root and quality when printing
    pub simplify: bool,
    pub page: PageGeometry,
    /// Printed characters per line; 0 disables wrapping
    pub wrap_width: usize,
    pub min_section_lines: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            naming: NamingStyle::default(),
            simplify: false,
            page: PageGeometry::default(),
            wrap_width: 80,
            min_section_lines: DEFAULT_MIN_SECTION_LINES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub title: String,
    /// Tagged body as written, never rewritten by transposition
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub transpose: i32,
}

impl Song {
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            artist: String::new(),
            title: title.into(),
            body: body.into(),
            transpose: 0,
        }
    }

    /// Set the song's offset, clamped to `[-12, 12]`.
    pub fn set_transpose(&mut self, semitones: i32) {
        let clamped = semitones.clamp(-MAX_SEMITONES, MAX_SEMITONES);
        if clamped != semitones {
            log::warn!(
                "Transpose {} for '{}' clamped to {}",
                semitones,
                self.id,
                clamped
            );
        }
        self.transpose = clamped;
    }

    /// The body as it should be shown: transposed by the song's offset and
    /// printed with the setlist's naming.
    pub fn transposed_body(&self, settings: &Settings) -> Result<String, SheetError> {
        transpose_tagged_body(
            &self.body,
            self.transpose,
            &settings.naming.table(),
            settings.simplify,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Setlist {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub songs: Vec<Song>,
}

impl Setlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a setlist document.
    ///
    /// Out-of-range offsets are clamped with a warning. Duplicate or empty
    /// song ids are rejected.
    pub fn from_yaml(content: &str) -> Result<Self, SheetError> {
        let mut setlist: Setlist =
            serde_yaml::from_str(content).map_err(|e| SheetError::Metadata(e.to_string()))?;

        let mut seen = HashSet::new();
        for song in &mut setlist.songs {
            if song.id.trim().is_empty() {
                return Err(SheetError::Metadata("song id must not be empty".to_string()));
            }
            if !seen.insert(song.id.clone()) {
                return Err(SheetError::Metadata(format!("duplicate song id '{}'", song.id)));
            }
            song.set_transpose(song.transpose);
        }

        log::info!(
            "Loaded setlist '{}' with {} songs",
            setlist.title.as_deref().unwrap_or("untitled"),
            setlist.songs.len()
        );
        Ok(setlist)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SheetError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SheetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn to_yaml(&self) -> Result<String, SheetError> {
        serde_yaml::to_string(self).map_err(|e| SheetError::Metadata(e.to_string()))
    }

    pub fn song(&self, id: &str) -> Option<&Song> {
        self.songs.iter().find(|song| song.id == id)
    }

    pub fn song_mut(&mut self, id: &str) -> Option<&mut Song> {
        self.songs.iter_mut().find(|song| song.id == id)
    }

    fn position(&self, id: &str) -> Result<usize, SheetError> {
        self.songs
            .iter()
            .position(|song| song.id == id)
            .ok_or_else(|| SheetError::UnknownSong(id.to_string()))
    }

    /// Append a song. Its offset is clamped like any other.
    pub fn add_song(&mut self, mut song: Song) -> Result<(), SheetError> {
        if self.song(&song.id).is_some() {
            return Err(SheetError::Metadata(format!("duplicate song id '{}'", song.id)));
        }
        song.set_transpose(song.transpose);
        self.songs.push(song);
        Ok(())
    }

    /// Append an imported song under an id derived from its title.
    ///
    /// Returns the id the song was stored under.
    pub fn add_imported(&mut self, imported: ImportedSong) -> String {
        let title = imported.title.unwrap_or_default();
        let base = slugify(&title);
        let mut id = base.clone();
        let mut suffix = 2;
        while self.song(&id).is_some() {
            id = format!("{}-{}", base, suffix);
            suffix += 1;
        }

        self.songs.push(Song {
            id: id.clone(),
            artist: imported.artist.unwrap_or_default(),
            title,
            body: imported.body,
            transpose: 0,
        });
        id
    }

    pub fn remove_song(&mut self, id: &str) -> Result<Song, SheetError> {
        let index = self.position(id)?;
        Ok(self.songs.remove(index))
    }

    /// Move a song to `to`, or to the end if `to` is past it.
    pub fn move_song(&mut self, id: &str, to: usize) -> Result<(), SheetError> {
        let index = self.position(id)?;
        let song = self.songs.remove(index);
        let to = to.min(self.songs.len());
        self.songs.insert(to, song);
        Ok(())
    }

    pub fn transpose_song(&mut self, id: &str, semitones: i32) -> Result<(), SheetError> {
        let song = self
            .song_mut(id)
            .ok_or_else(|| SheetError::UnknownSong(id.to_string()))?;
        song.set_transpose(semitones);
        Ok(())
    }

    /// Every song's transposed body, in setlist order.
    pub fn transposed(&self) -> Result<Vec<String>, SheetError> {
        self.songs
            .iter()
            .map(|song| song.transposed_body(&self.settings))
            .collect()
    }
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "song".to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SETLIST: &str = r#"
title: Sunday Evening
settings:
  naming: flats
  wrap-width: 40
songs:
  - id: grace
    title: Amazing Grace
    transpose: 1
    body: "[ch]C[/ch]  [ch]F[/ch]"
  - id: loud
    transpose: 30
"#;

    #[test]
    fn test_from_yaml() {
        let setlist = Setlist::from_yaml(SETLIST).unwrap();
        assert_eq!(setlist.title.as_deref(), Some("Sunday Evening"));
        assert_eq!(setlist.settings.naming, NamingStyle::Flats);
        assert_eq!(setlist.settings.wrap_width, 40);
        assert_eq!(setlist.settings.min_section_lines, DEFAULT_MIN_SECTION_LINES);
        assert_eq!(setlist.songs.len(), 2);
        assert_eq!(setlist.song("loud").map(|s| s.transpose), Some(12));
    }

    #[test]
    fn test_transposed_bodies() {
        let setlist = Setlist::from_yaml(SETLIST).unwrap();
        let bodies = setlist.transposed().unwrap();
        assert_eq!(bodies, vec!["[ch]Db[/ch]  [ch]Gb[/ch]", ""]);
        // Stored body is untouched
        assert_eq!(setlist.songs[0].body, "[ch]C[/ch]  [ch]F[/ch]");
    }

    #[test]
    fn test_invalid_documents() {
        let duplicate = "songs:\n  - id: a\n  - id: a\n";
        assert!(matches!(
            Setlist::from_yaml(duplicate),
            Err(SheetError::Metadata(_))
        ));
        assert!(matches!(
            Setlist::from_yaml("songs: 3"),
            Err(SheetError::Metadata(_))
        ));
        assert!(matches!(
            Setlist::from_yaml("songs:\n  - title: no id\n"),
            Err(SheetError::Metadata(_))
        ));
    }

    #[test]
    fn test_yaml_round_trip() {
        let setlist = Setlist::from_yaml(SETLIST).unwrap();
        let yaml = setlist.to_yaml().unwrap();
        assert_eq!(Setlist::from_yaml(&yaml).unwrap(), setlist);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Setlist::load("/nonexistent/setlist.yaml");
        assert!(matches!(result, Err(SheetError::Io { .. })));
    }

    #[test]
    fn test_song_management() {
        let mut setlist = Setlist::new();
        setlist.add_song(Song::new("a", "A", "")).unwrap();
        setlist.add_song(Song::new("b", "B", "")).unwrap();
        setlist.add_song(Song::new("c", "C", "")).unwrap();
        assert!(setlist.add_song(Song::new("a", "Again", "")).is_err());

        setlist.move_song("c", 0).unwrap();
        setlist.move_song("a", 99).unwrap();
        let ids: Vec<&str> = setlist.songs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);

        let removed = setlist.remove_song("b").unwrap();
        assert_eq!(removed.title, "B");
        assert!(matches!(
            setlist.remove_song("b"),
            Err(SheetError::UnknownSong(_))
        ));

        setlist.transpose_song("a", -20).unwrap();
        assert_eq!(setlist.song("a").map(|s| s.transpose), Some(-12));
        assert!(setlist.transpose_song("zzz", 1).is_err());
    }

    #[test]
    fn test_add_imported_ids() {
        let mut setlist = Setlist::new();
        let song = ImportedSong {
            title: Some("It's Alright, Ma!".to_string()),
            body: "[ch]G[/ch]".to_string(),
            ..ImportedSong::default()
        };
        assert_eq!(setlist.add_imported(song.clone()), "it-s-alright-ma");
        assert_eq!(setlist.add_imported(song), "it-s-alright-ma-2");
        assert_eq!(setlist.add_imported(ImportedSong::default()), "song");
        assert_eq!(setlist.songs[0].title, "It's Alright, Ma!");
    }
}
