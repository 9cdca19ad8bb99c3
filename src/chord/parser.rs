//! Chord symbol parsing
//!
//! Reads chord symbols (C, Am, G7, Dm7b5, Cmaj7/G, C7(b9), etc.) into a
//! [`ChordValue`]. Anything outside this grammar is rejected so the caller can
//! leave the token untouched.

use super::naming::PitchClass;
use super::types::ChordValue;
use crate::error::ChordError;

/// Quality keywords, longest spellings first so `min` wins over `m`.
/// Word keywords match in any case; `m` and `M` do not.
const QUALITIES: [&str; 10] = ["maj", "min", "dim", "aug", "m", "M", "-", "+", "°", "ø"];

/// Parse a chord symbol
///
/// # Grammar
/// - **Root**: `A`-`G` (either case) with optional `#`/`b` (or `♯`/`♭`)
/// - **Quality**: `m`, `min`, `-`, `dim`, `°`, `ø`, `aug`, `+`, `maj`, `M`
/// - **Extension**: one or two digits, or `maj`/`M` followed by digits (`maj7`)
/// - **Suspension**: `sus`, `sus2`, `sus4`
/// - **Added tones**: `add` followed by digits, repeatable
/// - **Alterations**: `#` or `b` followed by digits, repeatable
/// - **Group**: one trailing parenthesized list of the above (`C7(b9)`)
/// - **Bass**: `/` and a note name
///
/// # Examples
/// ```
/// use chordsheet::chord::{parse_chord, NamingTable};
///
/// let chord = parse_chord("Cmaj7/G").unwrap();
/// assert_eq!(chord.extended.as_deref(), Some("maj7"));
/// assert_eq!(chord.transpose(2).pretty_print(&NamingTable::sharps()), "Dmaj7/A");
///
/// assert!(parse_chord("Hello").is_err());
/// ```
pub fn parse_chord(text: &str) -> Result<ChordValue, ChordError> {
    let chord = text.trim();
    if chord.is_empty() {
        return Err(ChordError::Empty);
    }

    let (root, consumed) =
        parse_note(chord).ok_or_else(|| ChordError::InvalidRoot(chord.to_string()))?;
    let mut value = ChordValue::new(root);
    let mut descriptor = &chord[consumed..];

    // Slash bass
    if let Some(slash) = descriptor.rfind('/') {
        let bass_text = &descriptor[slash + 1..];
        match parse_note(bass_text) {
            Some((bass, used)) if used == bass_text.len() => {
                value.overriding_root = Some(bass);
            }
            _ => return Err(ChordError::InvalidBass(bass_text.to_string())),
        }
        descriptor = &descriptor[..slash];
    }

    parse_descriptor(chord, descriptor, &mut value)?;
    Ok(value)
}

/// `N.C.` (no chord) markers, which are never transposed.
pub fn is_no_chord(token: &str) -> bool {
    let token = token.trim();
    token.eq_ignore_ascii_case("N.C.") || token.eq_ignore_ascii_case("N.C")
}

/// Parse a note name at the start of `s`. Returns the pitch class and the
/// number of bytes consumed.
fn parse_note(s: &str) -> Option<(PitchClass, usize)> {
    let mut chars = s.chars();
    let letter = chars.next()?;
    if !letter.is_ascii_alphabetic() {
        return None;
    }
    let mut consumed = letter.len_utf8();

    let accidental = match chars.next() {
        Some(c @ ('#' | '♯')) => {
            consumed += c.len_utf8();
            1
        }
        Some(c @ ('b' | '♭')) => {
            consumed += c.len_utf8();
            -1
        }
        _ => 0,
    };

    PitchClass::from_letter(letter, accidental).map(|pitch| (pitch, consumed))
}

fn parse_descriptor<'a>(
    chord: &str,
    mut rest: &'a str,
    value: &mut ChordValue,
) -> Result<(), ChordError> {
    let unexpected = |rest: &str| ChordError::UnexpectedDescriptor {
        chord: chord.to_string(),
        rest: rest.to_string(),
    };

    // `maj7` is an extension, bare `maj` is a quality
    if major_extension(rest).is_none() {
        if let Some((quality, after)) = QUALITIES.iter().find_map(|q| strip_keyword(rest, q)) {
            value.quality = quality.to_string();
            rest = after;
        }
    }

    while !rest.is_empty() {
        if let Some((extension, after)) = major_extension(rest).or_else(|| take_digits(rest)) {
            if value.extended.is_some() {
                return Err(unexpected(rest));
            }
            value.extended = Some(extension);
            rest = after;
        } else if let Some((suspension, after)) = suspension(rest) {
            if value.suspended.is_some() {
                return Err(unexpected(rest));
            }
            value.suspended = Some(suspension);
            rest = after;
        } else if let Some((added, after)) = added_tone(rest) {
            value.added.push(added);
            rest = after;
        } else if let Some((alteration, after)) = alteration(rest) {
            value.alterations.push(alteration);
            rest = after;
        } else if let Some(inner) = rest.strip_prefix('(') {
            let close = inner.find(')').ok_or_else(|| unexpected(rest))?;
            let group = &inner[..close];
            if value.parenthesized.is_some() || !is_modifier_list(group) {
                return Err(unexpected(rest));
            }
            value.parenthesized = Some(group.to_string());
            rest = &inner[close + 1..];
        } else {
            return Err(unexpected(rest));
        }
    }

    Ok(())
}

/// One or two ASCII digits.
fn take_digits(s: &str) -> Option<(String, &str)> {
    let len = s.bytes().take(2).take_while(|b| b.is_ascii_digit()).count();
    if len == 0 {
        return None;
    }
    Some((s[..len].to_string(), &s[len..]))
}

/// Split a leading keyword off `s`, returning it as written. Multi-letter
/// ASCII keywords ignore case.
fn strip_keyword<'a>(s: &'a str, keyword: &str) -> Option<(&'a str, &'a str)> {
    let head = s.get(..keyword.len())?;
    let matches = if keyword.len() > 1 && keyword.is_ascii() {
        head.eq_ignore_ascii_case(keyword)
    } else {
        head == keyword
    };
    matches.then(|| (head, &s[keyword.len()..]))
}

fn major_extension(s: &str) -> Option<(String, &str)> {
    ["maj", "M"].iter().find_map(|prefix| {
        let (written, after) = strip_keyword(s, prefix)?;
        let (digits, after) = take_digits(after)?;
        Some((format!("{}{}", written, digits), after))
    })
}

fn suspension(s: &str) -> Option<(String, &str)> {
    let (written, after) = strip_keyword(s, "sus")?;
    match take_digits(after) {
        Some((digits, after)) => Some((format!("{}{}", written, digits), after)),
        None => Some((written.to_string(), after)),
    }
}

fn added_tone(s: &str) -> Option<(String, &str)> {
    let (written, after) = strip_keyword(s, "add")?;
    let (digits, after) = take_digits(after)?;
    Some((format!("{}{}", written, digits), after))
}

fn alteration(s: &str) -> Option<(String, &str)> {
    let sign = s.chars().next()?;
    if !matches!(sign, '#' | 'b' | '♯' | '♭') {
        return None;
    }
    let (digits, after) = take_digits(&s[sign.len_utf8()..])?;
    Some((format!("{}{}", sign, digits), after))
}

/// Contents of a parenthesized group: modifiers optionally separated by
/// commas or spaces.
fn is_modifier_list(group: &str) -> bool {
    let mut rest = group.trim();
    if rest.is_empty() {
        return false;
    }
    while !rest.is_empty() {
        let next = major_extension(rest)
            .or_else(|| take_digits(rest))
            .or_else(|| suspension(rest))
            .or_else(|| added_tone(rest))
            .or_else(|| alteration(rest));
        match next {
            Some((_, after)) => rest = after.trim_start_matches([',', ' ']),
            None => return false,
        }
    }
    true
}
