//! # Rendering
//!
//! Every export format starts from the same [`PreparedSong`]: a header, the
//! transposed and wrapped body, and the page metrics the pagination planner
//! needs. Backends only decide how a line and a page break are drawn, so all
//! of them break pages in the same places.
//!
//! ## Backends
//! - [`TextCanvas`] - monospaced pages separated by form feeds
//! - [`wordml`] - a Word 2003 XML flow document

pub mod canvas;
pub mod text;
pub mod wordml;

pub use canvas::{render_to_canvas, Canvas};
pub use text::TextCanvas;

use crate::error::SheetError;
use crate::layout::{prepare_body, StyledRun};
use crate::paginate::{plan_page_breaks, PlannedLine};
use crate::setlist::{Setlist, Settings, Song};

/// A song ready to be drawn
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSong {
    pub id: String,
    /// One run per header line: title, artist if any, then a blank line
    pub header: Vec<StyledRun>,
    /// Transposed, tab-stripped and wrapped body lines, still tagged
    pub lines: Vec<String>,
    pub max_lines_per_page: usize,
    pub first_page_used_lines: usize,
    pub min_section_lines: usize,
}

impl PreparedSong {
    /// Body lines interleaved with page-break sentinels.
    pub fn planned(&self) -> Vec<PlannedLine<'_>> {
        plan_page_breaks(
            &self.lines,
            self.max_lines_per_page,
            self.first_page_used_lines,
            self.min_section_lines,
        )
    }
}

pub fn prepare_song(song: &Song, settings: &Settings) -> Result<PreparedSong, SheetError> {
    let body = song.transposed_body(settings)?;
    let lines = prepare_body(&body, settings.wrap_width);

    let title = if song.title.is_empty() { &song.id } else { &song.title };
    let mut header = vec![StyledRun::bold(title.as_str())];
    if !song.artist.is_empty() {
        header.push(StyledRun::plain(song.artist.as_str()));
    }
    header.push(StyledRun::plain(""));

    Ok(PreparedSong {
        id: song.id.clone(),
        first_page_used_lines: header.len(),
        header,
        lines,
        max_lines_per_page: settings.page.max_lines_per_page(),
        min_section_lines: settings.min_section_lines,
    })
}

pub fn prepare_setlist(setlist: &Setlist) -> Result<Vec<PreparedSong>, SheetError> {
    setlist
        .songs
        .iter()
        .map(|song| prepare_song(song, &setlist.settings))
        .collect()
}

/// Render a whole setlist as plain-text pages.
pub fn render_text(setlist: &Setlist) -> Result<String, SheetError> {
    let songs = prepare_setlist(setlist)?;
    let mut canvas = TextCanvas::new();
    render_to_canvas(&songs, &mut canvas);
    Ok(canvas.into_string())
}

/// Render a whole setlist as a Word XML document.
pub fn render_wordml(setlist: &Setlist) -> Result<String, SheetError> {
    let songs = prepare_setlist(setlist)?;
    wordml::render_document(&songs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paginate::PageGeometry;
    use pretty_assertions::assert_eq;

    fn small_page() -> Settings {
        Settings {
            page: PageGeometry {
                page_height: 6.0,
                margin: 0.0,
                line_height: 1.0,
                start_y: 0.0,
            },
            ..Settings::default()
        }
    }

    #[test]
    fn test_prepare_song_header_and_body() {
        let mut song = Song::new("hello", "", "[tab]e|--0--|[/tab]\n[ch]C[/ch] hi");
        song.artist = "Someone".to_string();
        song.transpose = 2;

        let prepared = prepare_song(&song, &Settings::default()).unwrap();
        assert_eq!(
            prepared.header,
            vec![
                StyledRun::bold("hello"),
                StyledRun::plain("Someone"),
                StyledRun::plain(""),
            ]
        );
        assert_eq!(prepared.first_page_used_lines, 3);
        assert_eq!(prepared.lines, vec!["e|--0--|", "[ch]D[/ch] hi"]);
    }

    #[test]
    fn test_planned_uses_header_height() {
        let song = Song::new("s", "S", "[A]\na\nb\n[B]\nc\nd");
        let prepared = prepare_song(&song, &small_page()).unwrap();
        assert_eq!(prepared.max_lines_per_page, 6);
        assert_eq!(prepared.planned()[3], PlannedLine::PageBreak);
    }

    #[test]
    fn test_render_text_pages() {
        let mut setlist = Setlist::new();
        setlist.settings = small_page();
        setlist
            .add_song(Song::new("s", "S", "[A]\na\nb\n[B]\nc\nd"))
            .unwrap();
        setlist.add_song(Song::new("t", "T", "x")).unwrap();

        let text = render_text(&setlist).unwrap();
        assert_eq!(text, "S\n\n[A]\na\nb\n\u{c}[B]\nc\nd\n\u{c}T\n\nx\n");
    }
}
