//! # Section-Aware Pagination
//!
//! Decides where to force page breaks so a song section (verse, chorus, ...)
//! is not split across two pages, without wasting pages.
//!
//! ## Sections
//! A section starts at a header line (`[Chorus]`) or after a blank-line gap:
//! - a header line begins a new section
//! - a blank line directly before a header ends the current section and stays
//!   with it
//! - a blank line after content, followed by another blank line or the end of
//!   input, ends the current section
//!
//! ## Placement
//! A page break is inserted before a section when all of these hold:
//! - the section does not fit in what is left of the current page
//! - the current page already holds lines
//! - the section fits on one full page (longer sections overflow regardless)
//! - the section has at least `min_section_lines_to_break` lines
//!
//! Every export format uses the same planner and the same minimum, so text and
//! document output break pages identically.
//!
//! ## Example
//! ```rust
//! use chordsheet::paginate::{plan_page_breaks, PlannedLine};
//!
//! let lines = ["[Verse]", "a", "b", "[Chorus]", "c", "d", "e"];
//! let planned = plan_page_breaks(&lines, 5, 0, 3);
//! assert_eq!(planned[3], PlannedLine::PageBreak);
//! assert_eq!(planned[4], PlannedLine::Line("[Chorus]"));
//! ```

use serde::{Deserialize, Serialize};

use crate::tagged::has_chord_marker;

/// Sections shorter than this never trigger an early page break.
pub const DEFAULT_MIN_SECTION_LINES: usize = 3;

/// A line of planned output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedLine<'a> {
    Line(&'a str),
    /// Sentinel: start a new page here
    PageBreak,
}

impl<'a> PlannedLine<'a> {
    pub fn text(&self) -> Option<&'a str> {
        match self {
            PlannedLine::Line(text) => Some(text),
            PlannedLine::PageBreak => None,
        }
    }
}

/// A `[Label]` line that is not a chord.
pub fn is_section_header(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() > 2
        && trimmed.starts_with('[')
        && trimmed.ends_with(']')
        && !has_chord_marker(trimmed)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Group lines into logical sections.
pub fn split_sections<S: AsRef<str>>(lines: &[S]) -> Vec<&[S]> {
    let mut sections = Vec::new();
    let mut start = 0;

    for (i, line) in lines.iter().enumerate() {
        let line = line.as_ref();

        if is_section_header(line) {
            if i > start {
                sections.push(&lines[start..i]);
                start = i;
            }
            continue;
        }

        if is_blank(line) {
            let has_content = lines[start..i].iter().any(|l| !is_blank(l.as_ref()));
            let ends_section = match lines.get(i + 1).map(|l| l.as_ref()) {
                Some(next) if is_section_header(next) => true,
                Some(next) if is_blank(next) => has_content,
                None => has_content,
                Some(_) => false,
            };
            if ends_section {
                sections.push(&lines[start..=i]);
                start = i + 1;
            }
        }
    }

    if start < lines.len() {
        sections.push(&lines[start..]);
    }
    sections
}

/// Insert page-break sentinels so short sections are not split.
///
/// # Parameters
/// - `lines` - Body lines; never altered, only interleaved with breaks
/// - `max_lines_per_page` - Capacity of a full page
/// - `first_page_used_lines` - Lines taken by the title header on page one
/// - `min_section_lines_to_break` - Shorter sections never force a break
pub fn plan_page_breaks<S: AsRef<str>>(
    lines: &[S],
    max_lines_per_page: usize,
    first_page_used_lines: usize,
    min_section_lines_to_break: usize,
) -> Vec<PlannedLine<'_>> {
    let capacity = max_lines_per_page.max(1);
    let first_capacity = capacity.saturating_sub(first_page_used_lines);
    let page_capacity = |page: usize| if page == 0 { first_capacity } else { capacity };

    let mut planned = Vec::with_capacity(lines.len() + lines.len() / capacity + 1);
    let mut page = 0;
    let mut used = 0;

    for section in split_sections(lines) {
        let len = section.len();
        let available = page_capacity(page).saturating_sub(used);

        let would_split = len > available;
        if would_split && used > 0 && len <= capacity && len >= min_section_lines_to_break {
            planned.push(PlannedLine::PageBreak);
            page += 1;
            used = 0;
        }

        planned.extend(section.iter().map(|line| PlannedLine::Line(line.as_ref())));

        used += len;
        while used >= page_capacity(page) {
            used -= page_capacity(page);
            page += 1;
        }
    }

    planned
}

/// Page size and line metrics, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PageGeometry {
    pub page_height: f32,
    pub margin: f32,
    pub line_height: f32,
    /// Where the body starts on the first page, below the title header
    pub start_y: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        // US Letter, 12pt monospace with 1.2 leading
        Self {
            page_height: 792.0,
            margin: 36.0,
            line_height: 14.4,
            start_y: 36.0,
        }
    }
}

impl PageGeometry {
    pub fn usable_height(&self) -> f32 {
        (self.page_height - 2.0 * self.margin).max(0.0)
    }

    pub fn max_lines_per_page(&self) -> usize {
        if self.line_height <= 0.0 {
            return 0;
        }
        (self.usable_height() / self.line_height).floor() as usize
    }

    pub fn first_page_used_lines(&self) -> usize {
        if self.line_height <= 0.0 {
            return 0;
        }
        ((self.start_y - self.margin) / self.line_height).ceil().max(0.0) as usize
    }

    /// Same page with the body starting below `header_lines` header lines.
    pub fn with_header_lines(self, header_lines: usize) -> Self {
        Self {
            start_y: self.margin + header_lines as f32 * self.line_height,
            ..self
        }
    }

    pub fn plan<'a, S: AsRef<str>>(
        &self,
        lines: &'a [S],
        min_section_lines_to_break: usize,
    ) -> Vec<PlannedLine<'a>> {
        plan_page_breaks(
            lines,
            self.max_lines_per_page(),
            self.first_page_used_lines(),
            min_section_lines_to_break,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(header: &str, body_lines: usize) -> Vec<String> {
        let mut lines = vec![header.to_string()];
        lines.extend((0..body_lines).map(|i| format!("{} line {}", header, i)));
        lines
    }

    fn break_positions(planned: &[PlannedLine]) -> Vec<usize> {
        planned
            .iter()
            .enumerate()
            .filter(|(_, line)| **line == PlannedLine::PageBreak)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_section_headers() {
        assert!(is_section_header("[Verse 1]"));
        assert!(is_section_header("  [Chorus]  "));
        assert!(!is_section_header("[]"));
        assert!(!is_section_header("[ch]Am[/ch]"));
        assert!(!is_section_header("[ch]Am[/ch]  [ch]G[/ch]"));
        assert!(!is_section_header("lyrics [here]!"));
    }

    #[test]
    fn test_split_sections_on_headers_and_blanks() {
        let lines = ["[Verse]", "a", "b", "", "[Chorus]", "c", "", ""];
        let sections = split_sections(&lines);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0], &["[Verse]", "a", "b", ""]);
        assert_eq!(sections[1], &["[Chorus]", "c", ""]);
        assert_eq!(sections[2], &[""]);
    }

    #[test]
    fn test_single_blank_does_not_split() {
        let lines = ["a", "b", "", "c", "d"];
        assert_eq!(split_sections(&lines).len(), 1);
    }

    #[test]
    fn test_paragraph_end_at_end_of_input() {
        let lines = ["a", "b", "", "", "c", ""];
        let sections = split_sections(&lines);
        assert_eq!(sections[0], &["a", "b", ""]);
        assert_eq!(sections[1], &["", "c", ""]);
    }

    #[test]
    fn test_short_section_moves_to_next_page() {
        let mut lines = section("[Verse]", 37);
        lines.extend(section("[Chorus]", 3));

        let planned = plan_page_breaks(&lines, 40, 0, DEFAULT_MIN_SECTION_LINES);
        assert_eq!(break_positions(&planned), vec![38]);
        assert_eq!(planned[39], PlannedLine::Line("[Chorus]"));
    }

    #[test]
    fn test_section_longer_than_a_page_is_left_alone() {
        let mut lines = section("[Intro]", 9);
        lines.extend(section("[Solo]", 49));

        let planned = plan_page_breaks(&lines, 40, 0, DEFAULT_MIN_SECTION_LINES);
        assert!(break_positions(&planned).is_empty());
    }

    #[test]
    fn test_small_sections_do_not_force_breaks() {
        let mut lines = section("[Verse]", 8);
        lines.extend(section("[Tag]", 1));

        let planned = plan_page_breaks(&lines, 10, 0, DEFAULT_MIN_SECTION_LINES);
        assert!(break_positions(&planned).is_empty());

        let planned = plan_page_breaks(&lines, 10, 0, 1);
        assert_eq!(break_positions(&planned), vec![9]);
    }

    #[test]
    fn test_first_page_header_reduces_capacity() {
        let mut lines = section("[A]", 3);
        lines.extend(section("[B]", 2));

        // 10 lines fit, 4 are taken by the title: B no longer fits on page one
        let planned = plan_page_breaks(&lines, 10, 4, DEFAULT_MIN_SECTION_LINES);
        assert_eq!(break_positions(&planned), vec![4]);

        let planned = plan_page_breaks(&lines, 10, 0, DEFAULT_MIN_SECTION_LINES);
        assert!(break_positions(&planned).is_empty());
    }

    #[test]
    fn test_rollover_across_several_pages() {
        // 12 lines on 5-line pages leave 2 lines on the third page
        let mut lines = section("[Long]", 11);
        lines.extend(section("[Next]", 3));

        let planned = plan_page_breaks(&lines, 5, 0, DEFAULT_MIN_SECTION_LINES);
        assert_eq!(break_positions(&planned), vec![12]);
    }

    #[test]
    fn test_exactly_full_page_needs_no_break() {
        let mut lines = section("[A]", 4);
        lines.extend(section("[B]", 4));

        let planned = plan_page_breaks(&lines, 5, 0, DEFAULT_MIN_SECTION_LINES);
        assert!(break_positions(&planned).is_empty());
    }

    #[test]
    fn test_lines_are_never_altered() {
        let mut lines = section("[Verse]", 30);
        lines.push(String::new());
        lines.extend(section("[Chorus]", 12));

        let planned = plan_page_breaks(&lines, 32, 3, DEFAULT_MIN_SECTION_LINES);
        let texts: Vec<&str> = planned.iter().filter_map(PlannedLine::text).collect();
        assert_eq!(texts, lines.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_geometry() {
        let geometry = PageGeometry {
            page_height: 800.0,
            margin: 50.0,
            line_height: 14.0,
            start_y: 50.0,
        };
        assert_eq!(geometry.max_lines_per_page(), 50);
        assert_eq!(geometry.first_page_used_lines(), 0);

        let with_title = geometry.with_header_lines(3);
        assert_eq!(with_title.start_y, 92.0);
        assert_eq!(with_title.first_page_used_lines(), 3);

        let partial = PageGeometry {
            start_y: 71.0,
            ..geometry
        };
        assert_eq!(partial.first_page_used_lines(), 2);
    }
}
