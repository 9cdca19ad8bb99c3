//! Chord chart transposition, realignment and section-aware pagination.
//!
//! Song bodies are plain text with chords tagged inline (`[ch]Am[/ch]`). The
//! library transposes those chords while keeping lyric and tab columns in
//! place, imports pasted chord-over-lyrics text, and lays setlists out on
//! pages without splitting short sections.

pub mod chord;
pub mod error;
pub mod grammar;
pub mod import;
pub mod layout;
pub mod markup;
pub mod paginate;
pub mod render;
pub mod setlist;
pub mod tagged;
pub mod transpose;

pub use chord::{parse_chord, ChordValue, NamingStyle, NamingTable, PitchClass};
pub use error::*;
pub use grammar::{chordify_line, is_chord_token, is_likely_chord_line};
pub use import::{import_pasted, ImportedSong};
pub use paginate::{plan_page_breaks, PageGeometry, PlannedLine};
pub use setlist::{Setlist, Settings, Song};
pub use transpose::{transpose_tagged_body, TransposeOptions};

/// Transpose a tagged body using a built-in naming style.
/// This is the main entry point for one-off transposition.
pub fn transpose_body(body: &str, semitones: i32, naming: NamingStyle) -> Result<String, SheetError> {
    transpose_tagged_body(body, semitones, &naming.table(), false)
}

/// Import pasted text and transpose it in one step.
pub fn import_and_transpose(
    text: &str,
    semitones: i32,
    naming: NamingStyle,
) -> Result<ImportedSong, SheetError> {
    let mut song = import_pasted(text);
    song.body = transpose_body(&song.body, semitones, naming)?;
    Ok(song)
}
