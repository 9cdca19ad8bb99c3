//! # Paste Import
//!
//! Turns plain pasted chord-over-lyrics text into a tagged song body.
//!
//! ## Format
//! ```text
//! Title: Let It Be
//! Artist: The Beatles
//! Capo: 0
//!
//! C          G
//! When I find myself in times of trouble
//! ```
//!
//! Leading `Key: value` lines with keys Title, Artist, Key or Capo (any case)
//! are metadata. Blank lines between them are skipped; the first other line
//! starts the body. Each body line that classifies as a chord line has its
//! chords wrapped in `[ch]` markers; every other line is kept as is.

use serde::{Deserialize, Serialize};

use crate::grammar::{chordify_line, is_likely_chord_line};

/// Metadata and tagged body read from pasted text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedSong {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub key: Option<String>,
    pub capo: Option<String>,
    pub body: String,
}

enum MetadataKey {
    Title,
    Artist,
    Key,
    Capo,
}

fn parse_metadata_line(line: &str) -> Option<(MetadataKey, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = match key.trim().to_ascii_lowercase().as_str() {
        "title" => MetadataKey::Title,
        "artist" => MetadataKey::Artist,
        "key" => MetadataKey::Key,
        "capo" => MetadataKey::Capo,
        _ => return None,
    };
    Some((key, value.trim()))
}

/// Import pasted text.
///
/// # Example
/// ```
/// use chordsheet::import::import_pasted;
///
/// let song = import_pasted("Title: Hello\n\nD      G\nHello there");
/// assert_eq!(song.title.as_deref(), Some("Hello"));
/// assert_eq!(song.body, "[ch]D[/ch]      [ch]G[/ch]\nHello there");
/// ```
pub fn import_pasted(text: &str) -> ImportedSong {
    let text = text.replace("\r\n", "\n");
    let lines: Vec<&str> = text.split('\n').collect();
    let mut song = ImportedSong::default();

    let mut body_start = 0;
    while body_start < lines.len() {
        let line = lines[body_start].trim();
        if !line.is_empty() {
            let Some((key, value)) = parse_metadata_line(line) else {
                break;
            };
            let value = (!value.is_empty()).then(|| value.to_string());
            match key {
                MetadataKey::Title => song.title = value,
                MetadataKey::Artist => song.artist = value,
                MetadataKey::Key => song.key = value,
                MetadataKey::Capo => song.capo = value,
            }
        }
        body_start += 1;
    }

    let mut chord_lines = 0;
    let body: Vec<String> = lines[body_start..]
        .iter()
        .map(|line| {
            if is_likely_chord_line(line) {
                chord_lines += 1;
                chordify_line(line)
            } else {
                line.to_string()
            }
        })
        .collect();
    song.body = body.join("\n").trim_end().to_string();

    log::info!(
        "Imported '{}': {} lines, {} chord lines",
        song.title.as_deref().unwrap_or("untitled"),
        body.len(),
        chord_lines
    );
    song
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_metadata_and_body() {
        let pasted = "title: Let It Be\nARTIST: The Beatles\n\nKey: C\nCapo: 2\n\n[Verse 1]\nC          G\nWhen I find myself\n";
        let song = import_pasted(pasted);
        assert_eq!(song.title.as_deref(), Some("Let It Be"));
        assert_eq!(song.artist.as_deref(), Some("The Beatles"));
        assert_eq!(song.key.as_deref(), Some("C"));
        assert_eq!(song.capo.as_deref(), Some("2"));
        assert_eq!(
            song.body,
            "[Verse 1]\n[ch]C[/ch]          [ch]G[/ch]\nWhen I find myself"
        );
    }

    #[test]
    fn test_metadata_stops_at_first_other_line() {
        let song = import_pasted("Title: X\nAm  G\nTitle: not metadata");
        assert_eq!(song.title.as_deref(), Some("X"));
        assert_eq!(song.body, "[ch]Am[/ch]  [ch]G[/ch]\nTitle: not metadata");
    }

    #[test]
    fn test_unknown_keys_start_the_body() {
        let song = import_pasted("Tempo: 120\nG");
        assert_eq!(song.title, None);
        assert_eq!(song.body, "Tempo: 120\n[ch]G[/ch]");
    }

    #[test]
    fn test_no_metadata() {
        let song = import_pasted("| Em / / / | C / / / |\nHello Dolly\r\n");
        assert_eq!(song, ImportedSong {
            body: "| [ch]Em[/ch] / / / | [ch]C[/ch] / / / |\nHello Dolly".to_string(),
            ..ImportedSong::default()
        });
    }
}
