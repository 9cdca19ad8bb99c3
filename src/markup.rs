//! Inline bold/underline micro-syntax used in song bodies.
//!
//! `**bold**` and `__underline__`, nestable. A delimiter with no closing
//! partner later on the line is printed literally.

const BOLD: &str = "**";
const UNDERLINE: &str = "__";

/// A run of text with uniform styling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub underline: bool,
}

/// Split `text` into styled spans, dropping the delimiters.
///
/// # Example
/// ```
/// use chordsheet::markup::parse_inline;
///
/// let spans = parse_inline("sing **loud** now");
/// assert_eq!(spans.len(), 3);
/// assert!(spans[1].bold);
/// assert_eq!(spans[1].text, "loud");
/// ```
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut bold = false;
    let mut underline = false;
    let mut start = 0;

    for (offset, marker) in delimiters(text) {
        push_span(&mut spans, &text[start..offset], bold, underline);
        if marker == BOLD {
            bold = !bold;
        } else {
            underline = !underline;
        }
        start = offset + marker.len();
    }

    push_span(&mut spans, &text[start..], bold, underline);
    spans
}

/// Byte offsets of the delimiters that toggle styling, with the delimiter.
/// Unpaired delimiters are text and are not listed.
pub fn delimiters(text: &str) -> Vec<(usize, &'static str)> {
    let mut found = Vec::new();
    let mut bold = false;
    let mut underline = false;
    let mut offset = 0;

    while let Some(rest) = text.get(offset..).filter(|rest| !rest.is_empty()) {
        if let Some(after) = rest.strip_prefix(BOLD) {
            if bold || after.contains(BOLD) {
                found.push((offset, BOLD));
                bold = !bold;
                offset += BOLD.len();
                continue;
            }
        }
        if let Some(after) = rest.strip_prefix(UNDERLINE) {
            if underline || after.contains(UNDERLINE) {
                found.push((offset, UNDERLINE));
                underline = !underline;
                offset += UNDERLINE.len();
                continue;
            }
        }
        offset += rest.chars().next().map_or(1, char::len_utf8);
    }
    found
}

/// Text with markup delimiters removed.
pub fn strip_markup(text: &str) -> String {
    parse_inline(text).into_iter().map(|span| span.text).collect()
}

fn push_span(spans: &mut Vec<Span>, text: &str, bold: bool, underline: bool) {
    if !text.is_empty() {
        spans.push(Span {
            text: text.to_string(),
            bold,
            underline,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, bold: bool, underline: bool) -> Span {
        Span {
            text: text.to_string(),
            bold,
            underline,
        }
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(parse_inline("just words"), vec![span("just words", false, false)]);
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn test_bold_and_underline() {
        assert_eq!(
            parse_inline("**Chorus** x2 __slow__"),
            vec![
                span("Chorus", true, false),
                span(" x2 ", false, false),
                span("slow", false, true),
            ]
        );
    }

    #[test]
    fn test_nested() {
        assert_eq!(
            parse_inline("**all __of__ it**"),
            vec![
                span("all ", true, false),
                span("of", true, true),
                span(" it", true, false),
            ]
        );
    }

    #[test]
    fn test_delimiter_offsets() {
        assert_eq!(delimiters("a **b** __c"), vec![(2, BOLD), (5, BOLD)]);
        assert!(delimiters("no markup").is_empty());
    }

    #[test]
    fn test_unmatched_delimiters_are_literal() {
        assert_eq!(parse_inline("a ** b"), vec![span("a ** b", false, false)]);
        assert_eq!(strip_markup("snake__case"), "snake__case");
        assert_eq!(strip_markup("**x** and __y"), "x and __y");
    }
}
