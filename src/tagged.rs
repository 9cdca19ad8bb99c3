//! # Tagged Song Bodies
//!
//! Song bodies carry chord symbols inline, wrapped as `[ch]Am7[/ch]`, and may
//! wrap tablature blocks in `[tab]` ... `[/tab]`. The marker syntax is shared
//! with stored setlists and must stay bit-exact.
//!
//! A chord marker pair never spans a line break. An opening marker without a
//! closing marker on the same line, or a stray closing marker, is plain text.

pub const CHORD_OPEN: &str = "[ch]";
pub const CHORD_CLOSE: &str = "[/ch]";
pub const TAB_OPEN: &str = "[tab]";
pub const TAB_CLOSE: &str = "[/tab]";

/// A piece of a tagged body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Lyrics, tablature or whitespace
    Text(&'a str),
    /// The text between a `[ch]` and `[/ch]` pair
    Chord(&'a str),
}

/// Split a tagged body into alternating text and chord segments.
///
/// # Example
/// ```
/// use chordsheet::tagged::{split_segments, Segment};
///
/// let segments = split_segments("Let's go [ch]C[/ch] home");
/// assert_eq!(
///     segments,
///     vec![Segment::Text("Let's go "), Segment::Chord("C"), Segment::Text(" home")]
/// );
/// ```
pub fn split_segments(body: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = body;
    // Start of plain text not yet emitted, as an offset into `body`
    let mut text_start = 0;
    let mut cursor = 0;

    while let Some(open) = rest.find(CHORD_OPEN) {
        let after_open = &rest[open + CHORD_OPEN.len()..];
        let paired = after_open.find(CHORD_CLOSE).filter(|&close| {
            let inner = &after_open[..close];
            !inner.contains('\n') && !inner.contains(CHORD_OPEN)
        });

        match paired {
            Some(close) => {
                let chord_start = cursor + open + CHORD_OPEN.len();
                if cursor + open > text_start {
                    segments.push(Segment::Text(&body[text_start..cursor + open]));
                }
                segments.push(Segment::Chord(&body[chord_start..chord_start + close]));
                cursor = chord_start + close + CHORD_CLOSE.len();
                text_start = cursor;
                rest = &body[cursor..];
            }
            None => {
                log::warn!("Unpaired chord marker at byte {}, kept as text", cursor + open);
                cursor += open + CHORD_OPEN.len();
                rest = &body[cursor..];
            }
        }
    }

    if text_start < body.len() {
        segments.push(Segment::Text(&body[text_start..]));
    }
    segments
}

/// Wrap a chord name in chord markers.
pub fn wrap_chord(name: &str) -> String {
    format!("{}{}{}", CHORD_OPEN, name, CHORD_CLOSE)
}

/// All chord tokens in a body, in order.
pub fn chord_names(body: &str) -> Vec<&str> {
    split_segments(body)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Chord(name) => Some(name),
            Segment::Text(_) => None,
        })
        .collect()
}

/// Body text with chord markers removed, as it is printed.
pub fn visible_text(body: &str) -> String {
    split_segments(body)
        .into_iter()
        .map(|segment| match segment {
            Segment::Text(text) | Segment::Chord(text) => text,
        })
        .collect()
}

/// Whether a line carries any chord marker.
pub fn has_chord_marker(line: &str) -> bool {
    line.contains(CHORD_OPEN) || line.contains(CHORD_CLOSE)
}

/// Remove `[tab]` / `[/tab]` wrappers; they carry no meaning for layout.
pub fn strip_tab_markers(body: &str) -> String {
    body.replace(TAB_OPEN, "").replace(TAB_CLOSE, "")
}
