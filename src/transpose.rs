//! # Transposition & Realignment
//!
//! Transposes every chord of a tagged song body and repairs the whitespace
//! around it, so lyric and tab characters keep their column when a chord name
//! changes width (`C` becoming `C#`, `F#m` becoming `Gm`).
//!
//! ## Pipeline
//! 1. Split the body into text and chord segments
//! 2. Parse, transpose, optionally simplify and print each chord. A chord that
//!    fails any step is kept exactly as written.
//! 3. Pad each printed chord:
//!    - grown by `n`: `n` filler characters after the closing marker, and a
//!      collapse pattern of `n` dashes followed by `n` spaces is recorded
//!    - shrunk by `n`: `n` spaces after the closing marker
//! 4. Join, then clean up:
//!    - remove every collapse pattern, longest first; the grown chord eats
//!      into the spaces that follow it
//!    - drop any filler left over
//!    - normalize spacing between adjacent chords
//!
//! The collapse step matches dashes in lyrics and tabs as well as filler. A
//! literal `"- "` on a line where a chord grew by one is removed with it.
//!
//! ## Example
//! ```rust
//! use chordsheet::{transpose_tagged_body, NamingTable};
//!
//! let body = "[ch]C[/ch]  [ch]F[/ch]";
//! let out = transpose_tagged_body(body, 1, &NamingTable::flats(), false).unwrap();
//! assert_eq!(out, "[ch]Db[/ch]  [ch]Gb[/ch]");
//! ```

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::chord::{is_no_chord, parse_chord, NamingStyle, NamingTable};
use crate::error::{ChordError, SheetError};
use crate::tagged::{split_segments, wrap_chord, Segment};

/// Largest offset accepted in either direction.
pub const MAX_SEMITONES: i32 = 12;

/// Filler placed after a grown chord. Counts as a dash for collapse patterns
/// and never survives cleanup.
const FILLER: char = '\u{E000}';

static CLOSE_BEFORE_WORD: OnceLock<Regex> = OnceLock::new();

fn close_before_word() -> &'static Regex {
    CLOSE_BEFORE_WORD
        .get_or_init(|| Regex::new(r"\[/ch\](\w)").expect("invalid regex pattern"))
}

/// Transpose every chord in a tagged body by `semitones`.
///
/// # Errors
/// Returns [`SheetError::OffsetOutOfRange`] if `semitones` is outside
/// `[-12, 12]`. Chords that cannot be parsed never cause an error.
pub fn transpose_tagged_body(
    body: &str,
    semitones: i32,
    naming: &NamingTable,
    simplify: bool,
) -> Result<String, SheetError> {
    if !(-MAX_SEMITONES..=MAX_SEMITONES).contains(&semitones) {
        return Err(SheetError::OffsetOutOfRange(semitones));
    }

    let mut joined = String::with_capacity(body.len() + body.len() / 4);
    let mut collapse_widths = BTreeSet::new();

    for segment in split_segments(body) {
        let original = match segment {
            Segment::Text(text) => {
                joined.push_str(text);
                continue;
            }
            Segment::Chord(chord) => chord,
        };

        if is_no_chord(original) {
            joined.push_str(&wrap_chord(original));
            continue;
        }

        let printed = match transpose_chord(original, semitones, naming, simplify) {
            Ok(printed) => printed,
            Err(e) => {
                log::debug!("Leaving chord '{}' as written: {}", original, e);
                joined.push_str(&wrap_chord(original));
                continue;
            }
        };

        let old_width = original.chars().count();
        let new_width = printed.chars().count();
        joined.push_str(&wrap_chord(&printed));

        if new_width >= old_width {
            let grown = new_width - old_width;
            joined.extend(std::iter::repeat(FILLER).take(grown));
            collapse_widths.insert(grown);
        } else {
            joined.extend(std::iter::repeat(' ').take(old_width - new_width));
        }
    }

    // A zero-width pattern is empty and would match everywhere
    let mut realigned = joined;
    for &width in collapse_widths.iter().rev().filter(|&&w| w > 0) {
        realigned = remove_collapse_runs(&realigned, width);
    }
    realigned.retain(|c| c != FILLER);

    Ok(normalize_chord_spacing(&realigned))
}

/// Transpose and print a single chord token.
pub fn transpose_chord(
    chord: &str,
    semitones: i32,
    naming: &NamingTable,
    simplify: bool,
) -> Result<String, ChordError> {
    let value = parse_chord(chord)?;
    if semitones.rem_euclid(12) == 0 && !simplify {
        // Same pitch, so the spelling as written wins over the table
        return Ok(chord.trim().to_string());
    }
    let value = value.transpose(semitones);
    let value = if simplify { value.simplified() } else { value };
    Ok(value.pretty_print(naming))
}

/// Remove every run of `width` dashes (or filler) directly followed by
/// `width` spaces, scanning left to right without overlap.
fn remove_collapse_runs(text: &str, width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let window = &chars[i..];
        let is_run = window.len() >= width * 2
            && window[..width].iter().all(|&c| c == '-' || c == FILLER)
            && window[width..width * 2].iter().all(|&c| c == ' ');
        if is_run {
            i += width * 2;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// One or two spaces between adjacent chords, one space between a chord and
/// a following word.
fn normalize_chord_spacing(text: &str) -> String {
    let spaced = text
        .replace("[/ch] [ch]", "[/ch]  [ch]")
        .replace("[/ch][ch]", "[/ch] [ch]");
    close_before_word()
        .replace_all(&spaced, "[/ch] ${1}")
        .into_owned()
}

/// The inputs a transposed body is derived from, apart from the body itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransposeOptions {
    pub semitones: i32,
    pub naming: NamingStyle,
    pub simplify: bool,
}

impl TransposeOptions {
    pub fn new(semitones: i32, naming: NamingStyle, simplify: bool) -> Self {
        Self {
            semitones,
            naming,
            simplify,
        }
    }

    pub fn apply(&self, body: &str) -> Result<String, SheetError> {
        transpose_tagged_body(body, self.semitones, &self.naming.table(), self.simplify)
    }
}
