//! # Chord Token Grammar
//!
//! Decides which whitespace-separated tokens of plain text are chord symbols.
//! Used when scanning pasted text to find chord lines and wrap their chords in
//! `[ch]` markers.
//!
//! ## Classification Rules
//! - A token is a chord if, after stripping surrounding brackets, quotes and
//!   punctuation, it matches the chord pattern (or is `N.C.`). The root is
//!   optional, so `sus4` or `m7` alone count, but something must remain
//! - A line is a chord line only if it has at least one chord token and no
//!   lettered token that fails the chord test. One lyric word disqualifies the
//!   whole line, since tagging lyrics as chords corrupts the layout.
//! - Bar and slash filler (`|`, `/`, `\`) is ignored
//!
//! Short words that are also chord names ("A", "Am") are classified as chords.
//!
//! ## Example
//! ```rust
//! use chordsheet::grammar::{chordify_line, is_likely_chord_line};
//!
//! assert!(is_likely_chord_line("D      G"));
//! assert!(!is_likely_chord_line("Hello Dolly"));
//! assert_eq!(chordify_line("D      G"), "[ch]D[/ch]      [ch]G[/ch]");
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::tagged::wrap_chord;

/// Optional root and accidental, quality keyword, extension, alterations,
/// trailing sus/add, parenthesized modifier group, slash bass.
///
/// Letters and keywords match in either case. Accidentals and the major `M`
/// are case-sensitive, so `Cb` is C flat while `CB` is not a chord, and every
/// rooted token this accepts is one `parse_chord` can read.
const CHORD_PATTERN: &str = concat!(
    r"(?i)^(?:N\.C\.?|",
    r"(?:[A-G](?-i:[#b])?)?",
    r"(?:maj|min|m|dim|aug)?\d{0,2}",
    r"(?:(?-i:[#b])\d{1,2})*",
    r"(?:sus\d{0,2})?(?:add\d{1,2})*",
    r"(?:\(MOD(?:[ ,]*MOD)*[ ,]*\))?",
    r"(?:/[A-G](?-i:[#b])?)?",
    r")$",
);

/// One entry of a parenthesized modifier group, spliced in for `MOD`
const MODIFIER_PATTERN: &str =
    r"(?:maj\d{1,2}|(?-i:M)\d{1,2}|\d{1,2}|sus\d{0,2}|add\d{1,2}|(?-i:[#b])\d{1,2})";

const WORD_PATTERN: &str = r"\s+|\S+";

const LEADING_CHARS: [char; 7] = ['[', '(', '{', '"', '\'', '“', '‘'];

const TRAILING_CHARS: [char; 13] = [
    '.', ',', ';', ':', '!', '?', ']', ')', '}', '"', '\'', '”', '’',
];

/// Bar lines and rhythm slashes
const BAR_CHARS: [char; 3] = ['|', '/', '\\'];

static CHORD_REGEX: OnceLock<Regex> = OnceLock::new();
static WORD_REGEX: OnceLock<Regex> = OnceLock::new();

fn chord_regex() -> &'static Regex {
    CHORD_REGEX.get_or_init(|| {
        Regex::new(&CHORD_PATTERN.replace("MOD", MODIFIER_PATTERN)).expect("invalid regex pattern")
    })
}

fn word_regex() -> &'static Regex {
    WORD_REGEX.get_or_init(|| Regex::new(WORD_PATTERN).expect("invalid regex pattern"))
}

/// Whether a single token looks like a chord symbol.
pub fn is_chord_token(token: &str) -> bool {
    let lead_stripped = token.trim_start_matches(&LEADING_CHARS[..]);
    let core = lead_stripped.trim_end_matches(&TRAILING_CHARS[..]);

    if !core.is_empty() && chord_regex().is_match(core) {
        return true;
    }
    // `C7(b9)`: the closing paren belongs to the chord
    !lead_stripped.is_empty() && chord_regex().is_match(lead_stripped)
}

/// Whether a whole line of plain text consists of chords.
pub fn is_likely_chord_line(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || (trimmed.starts_with('[') && trimmed.ends_with(']')) {
        return false;
    }

    let mut chords = 0;
    for token in trimmed.split_whitespace() {
        let core = token.trim_matches(&BAR_CHARS[..]);
        if core.is_empty() {
            continue;
        }
        if is_chord_token(core) {
            chords += 1;
        } else if core.chars().any(char::is_alphabetic) {
            return false;
        }
    }
    chords > 0
}

/// Wrap every chord token of a chord line in `[ch]` markers, keeping all
/// whitespace and any bar/slash affixes outside the markers.
pub fn chordify_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len() * 2);

    for word in word_regex().find_iter(line) {
        let token = word.as_str();
        if token.trim().is_empty() {
            out.push_str(token);
            continue;
        }

        let core_start = token.len() - token.trim_start_matches(&BAR_CHARS[..]).len();
        let core_end = token.trim_end_matches(&BAR_CHARS[..]).len();
        if core_start >= core_end {
            out.push_str(token);
            continue;
        }

        let core = &token[core_start..core_end];
        if is_chord_token(core) {
            out.push_str(&token[..core_start]);
            out.push_str(&wrap_chord(core));
            out.push_str(&token[core_end..]);
        } else {
            out.push_str(token);
        }
    }
    out
}
