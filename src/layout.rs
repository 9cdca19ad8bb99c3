//! Line layout shared by every renderer: tab-marker stripping,
//! character-count wrapping and styled runs.
//!
//! Wrapping counts printed characters only (chord and markup delimiters
//! excluded) and never splits a chord name. It is not word-aware.

use crate::markup::{delimiters, parse_inline};
use crate::tagged::{split_segments, strip_tab_markers, wrap_chord, Segment};

/// A piece of a printed line with uniform styling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub chord: bool,
    pub bold: bool,
    pub underline: bool,
}

impl StyledRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            chord: false,
            bold: false,
            underline: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::plain(text)
        }
    }
}

/// Split a tagged body into layout lines: tab markers removed, line endings
/// normalized, long lines wrapped at `width` printed characters.
///
/// A `width` of 0 disables wrapping.
pub fn prepare_body(body: &str, width: usize) -> Vec<String> {
    let body = strip_tab_markers(body).replace("\r\n", "\n");
    body.split('\n')
        .flat_map(|line| wrap_tagged_line(line, width))
        .collect()
}

/// Wrap one tagged line at `width` printed characters.
///
/// # Example
/// ```
/// use chordsheet::layout::wrap_tagged_line;
///
/// let lines = wrap_tagged_line("[ch]Am[/ch] la la [ch]G[/ch]", 9);
/// assert_eq!(lines, vec!["[ch]Am[/ch] la la ", "[ch]G[/ch]"]);
/// ```
pub fn wrap_tagged_line(line: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![line.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut column = 0;

    for segment in split_segments(line) {
        match segment {
            Segment::Chord(name) => {
                let chord_width = name.chars().count();
                if column > 0 && column + chord_width > width {
                    lines.push(std::mem::take(&mut current));
                    column = 0;
                }
                current.push_str(&wrap_chord(name));
                column += chord_width;
            }
            Segment::Text(text) => {
                // Delimiters take no columns. A span cut by a wrap is closed
                // and reopened so each line still parses on its own.
                let mut markers = delimiters(text).into_iter().peekable();
                let mut open: Vec<&str> = Vec::new();
                let mut offset = 0;

                while let Some(c) = text[offset..].chars().next() {
                    if let Some((_, marker)) = markers.next_if(|&(at, _)| at == offset) {
                        match open.iter().position(|&m| m == marker) {
                            Some(i) => {
                                open.remove(i);
                            }
                            None => open.push(marker),
                        }
                        current.push_str(marker);
                        offset += marker.len();
                        continue;
                    }

                    if column >= width {
                        open.iter().rev().for_each(|m| current.push_str(m));
                        lines.push(std::mem::take(&mut current));
                        open.iter().for_each(|m| current.push_str(m));
                        column = 0;
                    }
                    current.push(c);
                    column += 1;
                    offset += c.len_utf8();
                }
            }
        }
    }

    lines.push(current);
    lines
}

/// Styled runs for one tagged line. Chords are bold; text goes through the
/// inline markup parser.
pub fn styled_runs(line: &str) -> Vec<StyledRun> {
    let mut runs = Vec::new();
    for segment in split_segments(line) {
        match segment {
            Segment::Chord(name) => runs.push(StyledRun {
                text: name.to_string(),
                chord: true,
                bold: true,
                underline: false,
            }),
            Segment::Text(text) => {
                runs.extend(parse_inline(text).into_iter().map(|span| StyledRun {
                    text: span.text,
                    chord: false,
                    bold: span.bold,
                    underline: span.underline,
                }));
            }
        }
    }
    runs
}

/// The printed text of a set of runs.
pub fn runs_text(runs: &[StyledRun]) -> String {
    runs.iter().map(|run| run.text.as_str()).collect()
}
