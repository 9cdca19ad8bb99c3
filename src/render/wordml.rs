//! Word 2003 XML (WordprocessingML) flow document.
//!
//! One paragraph per line in a monospaced font, so chord columns line up.
//! Page-break sentinels and song boundaries become explicit page breaks; any
//! other page break is left to the word processor.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::SheetError;
use crate::layout::{styled_runs, StyledRun};
use crate::paginate::PlannedLine;

use super::PreparedSong;

const WORDML_NAMESPACE: &str = "http://schemas.microsoft.com/office/word/2003/wordml";
const FONT: &str = "Courier New";

type XmlWriter = Writer<Vec<u8>>;

pub fn render_document(songs: &[PreparedSong]) -> Result<String, SheetError> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    let mut root = BytesStart::new("w:wordDocument");
    root.push_attribute(("xmlns:w", WORDML_NAMESPACE));
    writer.write_event(Event::Start(root))?;
    writer.write_event(Event::Start(BytesStart::new("w:body")))?;

    for (i, song) in songs.iter().enumerate() {
        if i > 0 {
            write_page_break(&mut writer)?;
        }
        for run in &song.header {
            write_paragraph(&mut writer, std::slice::from_ref(run))?;
        }
        for planned in song.planned() {
            match planned {
                PlannedLine::PageBreak => write_page_break(&mut writer)?,
                PlannedLine::Line(line) => write_paragraph(&mut writer, &styled_runs(line))?,
            }
        }
    }

    writer.write_event(Event::End(BytesEnd::new("w:body")))?;
    writer.write_event(Event::End(BytesEnd::new("w:wordDocument")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_paragraph(writer: &mut XmlWriter, runs: &[StyledRun]) -> Result<(), SheetError> {
    let runs: Vec<&StyledRun> = runs.iter().filter(|run| !run.text.is_empty()).collect();
    if runs.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new("w:p")))?;
        return Ok(());
    }

    writer.write_event(Event::Start(BytesStart::new("w:p")))?;
    for run in runs {
        writer.write_event(Event::Start(BytesStart::new("w:r")))?;

        writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;
        let mut fonts = BytesStart::new("w:rFonts");
        fonts.push_attribute(("w:ascii", FONT));
        fonts.push_attribute(("w:h-ansi", FONT));
        writer.write_event(Event::Empty(fonts))?;
        if run.bold {
            writer.write_event(Event::Empty(BytesStart::new("w:b")))?;
        }
        if run.underline {
            let mut underline = BytesStart::new("w:u");
            underline.push_attribute(("w:val", "single"));
            writer.write_event(Event::Empty(underline))?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;

        let mut text = BytesStart::new("w:t");
        text.push_attribute(("xml:space", "preserve"));
        writer.write_event(Event::Start(text))?;
        writer.write_event(Event::Text(BytesText::new(&run.text)))?;
        writer.write_event(Event::End(BytesEnd::new("w:t")))?;

        writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

fn write_page_break(writer: &mut XmlWriter) -> Result<(), SheetError> {
    writer.write_event(Event::Start(BytesStart::new("w:p")))?;
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;
    let mut br = BytesStart::new("w:br");
    br.push_attribute(("w:type", "page"));
    writer.write_event(Event::Empty(br))?;
    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}
