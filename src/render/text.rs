use crate::layout::{runs_text, StyledRun};

use super::canvas::Canvas;

/// Form feed, the page separator of plain-text output
pub const PAGE_SEPARATOR: char = '\u{c}';

/// Plain-text canvas. Styling is dropped; chords print without markers.
#[derive(Debug, Clone, Default)]
pub struct TextCanvas {
    pages: Vec<Vec<String>>,
}

impl TextCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[Vec<String>] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every line followed by a newline, pages separated by form feeds.
    pub fn into_string(self) -> String {
        let pages: Vec<String> = self
            .pages
            .into_iter()
            .map(|page| page.into_iter().map(|line| line + "\n").collect())
            .collect();
        pages.join(&PAGE_SEPARATOR.to_string())
    }
}

impl Canvas for TextCanvas {
    fn start_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn draw_line(&mut self, row: usize, runs: &[StyledRun]) {
        if self.pages.is_empty() {
            self.start_page();
        }
        let Some(page) = self.pages.last_mut() else {
            return;
        };
        if page.len() <= row {
            page.resize(row + 1, String::new());
        }
        page[row] = runs_text(runs);
    }
}
