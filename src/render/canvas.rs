use crate::layout::{styled_runs, StyledRun};
use crate::paginate::PlannedLine;

use super::PreparedSong;

/// A page-oriented drawing surface.
pub trait Canvas {
    /// Begin a new, empty page. Rows restart at 0.
    fn start_page(&mut self);

    /// Draw one line of styled runs at `row` of the current page.
    fn draw_line(&mut self, row: usize, runs: &[StyledRun]);
}

/// Draw prepared songs onto a canvas.
///
/// Each song starts on a new page. A page-break sentinel opens a new page, and
/// so does a line that would fall below the last row.
pub fn render_to_canvas<C: Canvas>(songs: &[PreparedSong], canvas: &mut C) {
    let mut pages = 0;

    for song in songs {
        let capacity = song.max_lines_per_page.max(1);
        canvas.start_page();
        pages += 1;

        let mut row = 0;
        for run in &song.header {
            canvas.draw_line(row, std::slice::from_ref(run));
            row += 1;
        }

        for planned in song.planned() {
            match planned {
                PlannedLine::PageBreak => {
                    canvas.start_page();
                    pages += 1;
                    row = 0;
                }
                PlannedLine::Line(line) => {
                    if row >= capacity {
                        canvas.start_page();
                        pages += 1;
                        row = 0;
                    }
                    canvas.draw_line(row, &styled_runs(line));
                    row += 1;
                }
            }
        }
    }

    log::info!("Rendered {} songs on {} pages", songs.len(), pages);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::runs_text;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Canvas for Recorder {
        fn start_page(&mut self) {
            self.calls.push("page".to_string());
        }

        fn draw_line(&mut self, row: usize, runs: &[StyledRun]) {
            self.calls.push(format!("{}:{}", row, runs_text(runs)));
        }
    }

    fn song(lines: &[&str], max_lines_per_page: usize) -> PreparedSong {
        PreparedSong {
            id: "song".to_string(),
            header: vec![StyledRun::bold("Title")],
            lines: lines.iter().map(|l| l.to_string()).collect(),
            max_lines_per_page,
            first_page_used_lines: 1,
            min_section_lines: 3,
        }
    }

    #[test]
    fn test_overflow_opens_new_page() {
        let mut canvas = Recorder::default();
        render_to_canvas(&[song(&["a", "b", "c"], 2)], &mut canvas);
        assert_eq!(
            canvas.calls,
            vec!["page", "0:Title", "1:a", "page", "0:b", "1:c"]
        );
    }

    #[test]
    fn test_each_song_starts_a_page() {
        let mut canvas = Recorder::default();
        render_to_canvas(&[song(&["[ch]Am[/ch] x"], 10), song(&[], 10)], &mut canvas);
        assert_eq!(canvas.calls, vec!["page", "0:Title", "1:Am x", "page", "0:Title"]);
    }

    #[test]
    fn test_sentinel_opens_new_page() {
        let lines = ["[A]", "a", "b", "[B]", "c", "d"];
        let mut canvas = Recorder::default();
        render_to_canvas(&[song(&lines, 5)], &mut canvas);
        let pages = canvas.calls.iter().filter(|c| *c == "page").count();
        assert_eq!(pages, 2);
        assert_eq!(canvas.calls[5], "page");
        assert_eq!(canvas.calls[6], "0:[B]");
    }
}
