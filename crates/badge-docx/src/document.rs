//! `word/document.xml` generation.
//!
//! Each page is one fixed-layout outer table with the badge grid's geometry.
//! A filled slot holds a nested one-row table: logo on the left, text on the
//! right. Pages after the first are preceded by a page-break paragraph.

use badge_layout::{BadgeCell, BadgePage, BadgePlan, LayoutConfig, TextLine};
use badge_model::Centimeters;
use quick_xml::events::{BytesStart, BytesText, Event};

use crate::common::{
    A_NS, LOGO_REL_ID, PIC_NS, PICTURE_URI, R_NS, W_NS, WP_NS, XmlWriter, empty, end, new_writer,
    start, w_val,
};
use crate::error::{DocxError, Result};
use crate::logo::LogoImage;

/// Fixed inputs shared by every badge on the sheet.
#[derive(Debug, Clone, Copy)]
pub struct DocumentOptions<'a> {
    pub config: &'a LayoutConfig,
    pub logo: &'a LogoImage,
}

#[derive(Debug, Clone, Copy)]
struct LogoExtent {
    cx: u64,
    cy: u64,
}

/// Serialize `plan` as the main document part.
pub fn render_document_xml(plan: &BadgePlan, options: DocumentOptions<'_>) -> Result<Vec<u8>> {
    let config = options.config;
    let extent = LogoExtent {
        cx: config.logo_width.emu(),
        cy: options.logo.height_for_width(config.logo_width).emu(),
    };
    let media_name = options.logo.media_name();

    let mut xml = new_writer()?;
    let root = BytesStart::new("w:document").with_attributes([
        ("xmlns:w", W_NS),
        ("xmlns:r", R_NS),
        ("xmlns:wp", WP_NS),
        ("xmlns:a", A_NS),
        ("xmlns:pic", PIC_NS),
    ]);
    start(&mut xml, root)?;
    start(&mut xml, BytesStart::new("w:body"))?;

    for (page_number, page) in plan.pages.iter().enumerate() {
        if page_number > 0 {
            write_page_break(&mut xml)?;
        }
        write_page_table(&mut xml, page, config, extent, &media_name)?;
    }

    write_section_properties(&mut xml, config)?;
    end(&mut xml, "w:body")?;
    end(&mut xml, "w:document")?;
    Ok(xml.into_inner())
}

fn write_page_break(xml: &mut XmlWriter) -> Result<()> {
    start(xml, BytesStart::new("w:p"))?;
    start(xml, BytesStart::new("w:r"))?;
    empty(xml, "w:br", &[("w:type", "page")])?;
    end(xml, "w:r")?;
    end(xml, "w:p")
}

fn write_table_properties(xml: &mut XmlWriter, width: Centimeters) -> Result<()> {
    let width = width.twips().to_string();
    start(xml, BytesStart::new("w:tblPr"))?;
    empty(xml, "w:tblW", &[("w:w", width.as_str()), ("w:type", "dxa")])?;
    w_val(xml, "w:tblLayout", "fixed")?;
    // Remove the default cell padding so regions keep their nominal widths.
    start(xml, BytesStart::new("w:tblCellMar"))?;
    empty(xml, "w:left", &[("w:w", "0"), ("w:type", "dxa")])?;
    empty(xml, "w:right", &[("w:w", "0"), ("w:type", "dxa")])?;
    end(xml, "w:tblCellMar")?;
    end(xml, "w:tblPr")
}

fn write_grid(xml: &mut XmlWriter, columns: &[Centimeters]) -> Result<()> {
    start(xml, BytesStart::new("w:tblGrid"))?;
    for column in columns {
        let width = column.twips().to_string();
        empty(xml, "w:gridCol", &[("w:w", width.as_str())])?;
    }
    end(xml, "w:tblGrid")
}

fn write_cell_properties(xml: &mut XmlWriter, width: Centimeters, v_align: &str) -> Result<()> {
    let width = width.twips().to_string();
    start(xml, BytesStart::new("w:tcPr"))?;
    empty(xml, "w:tcW", &[("w:w", width.as_str()), ("w:type", "dxa")])?;
    w_val(xml, "w:vAlign", v_align)?;
    end(xml, "w:tcPr")
}

fn write_empty_paragraph(xml: &mut XmlWriter) -> Result<()> {
    empty(xml, "w:p", &[])
}

fn write_page_table(
    xml: &mut XmlWriter,
    page: &BadgePage,
    config: &LayoutConfig,
    extent: LogoExtent,
    media_name: &str,
) -> Result<()> {
    let grid = config.grid;
    let row_height = config.badge_height.twips().to_string();

    start(xml, BytesStart::new("w:tbl"))?;
    write_table_properties(xml, config.sheet_width())?;
    write_grid(xml, &vec![config.badge_width; grid.badges_per_row()])?;

    for row in 0..grid.badges_per_column() {
        start(xml, BytesStart::new("w:tr"))?;
        start(xml, BytesStart::new("w:trPr"))?;
        empty(
            xml,
            "w:trHeight",
            &[("w:val", row_height.as_str()), ("w:hRule", "exact")],
        )?;
        end(xml, "w:trPr")?;

        for column in 0..grid.badges_per_row() {
            start(xml, BytesStart::new("w:tc"))?;
            write_cell_properties(xml, config.badge_width, "top")?;
            if let Some(cell) = page.cell_at(row, column) {
                let drawing_id = page.index * grid.badges_per_page()
                    + row * grid.badges_per_row()
                    + column
                    + 1;
                write_badge(xml, cell, extent, media_name, drawing_id)?;
            }
            // A table cell must end with a paragraph.
            write_empty_paragraph(xml)?;
            end(xml, "w:tc")?;
        }
        end(xml, "w:tr")?;
    }
    end(xml, "w:tbl")
}

fn write_badge(
    xml: &mut XmlWriter,
    cell: &BadgeCell,
    extent: LogoExtent,
    media_name: &str,
    drawing_id: usize,
) -> Result<()> {
    start(xml, BytesStart::new("w:tbl"))?;
    write_table_properties(xml, Centimeters(cell.logo.width.0 + cell.text.width.0))?;
    write_grid(xml, &[cell.logo.width, cell.text.width])?;
    start(xml, BytesStart::new("w:tr"))?;

    // Logo region
    start(xml, BytesStart::new("w:tc"))?;
    write_cell_properties(xml, cell.logo.width, "top")?;
    start(xml, BytesStart::new("w:p"))?;
    write_centered_paragraph_properties(xml)?;
    write_logo_run(xml, extent, media_name, drawing_id)?;
    end(xml, "w:p")?;
    end(xml, "w:tc")?;

    // Text region
    start(xml, BytesStart::new("w:tc"))?;
    write_cell_properties(xml, cell.text.width, "center")?;
    for line in &cell.text.lines {
        write_text_paragraph(xml, line, drawing_id)?;
    }
    end(xml, "w:tc")?;

    end(xml, "w:tr")?;
    end(xml, "w:tbl")
}

fn write_centered_paragraph_properties(xml: &mut XmlWriter) -> Result<()> {
    start(xml, BytesStart::new("w:pPr"))?;
    w_val(xml, "w:jc", "center")?;
    end(xml, "w:pPr")
}

fn write_text_paragraph(xml: &mut XmlWriter, line: &TextLine, badge: usize) -> Result<()> {
    if let Some(character) = line.text.chars().find(|&c| !is_document_char(c)) {
        return Err(DocxError::UnsupportedCharacter {
            badge,
            code: u32::from(character),
        });
    }
    let size = line.size.half_points().to_string();
    start(xml, BytesStart::new("w:p"))?;
    write_centered_paragraph_properties(xml)?;
    start(xml, BytesStart::new("w:r"))?;

    start(xml, BytesStart::new("w:rPr"))?;
    empty(xml, "w:b", &[])?;
    empty(xml, "w:bCs", &[])?;
    if let Some(color) = line.color {
        w_val(xml, "w:color", &color.hex())?;
    }
    w_val(xml, "w:sz", &size)?;
    w_val(xml, "w:szCs", &size)?;
    end(xml, "w:rPr")?;

    write_run_text(xml, &line.text)?;

    end(xml, "w:r")?;
    end(xml, "w:p")
}

/// XML 1.0 `Char`. Word rejects a document with anything else in its text.
fn is_document_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Write run text, turning tabs into `w:tab` and line breaks into `w:br`.
fn write_run_text(xml: &mut XmlWriter, text: &str) -> Result<()> {
    let mut pending = String::new();
    for character in text.chars() {
        let element = match character {
            '\t' => "w:tab",
            '\n' | '\r' => "w:br",
            _ => {
                pending.push(character);
                continue;
            }
        };
        flush_text(xml, &mut pending)?;
        empty(xml, element, &[])?;
    }
    flush_text(xml, &mut pending)
}

fn flush_text(xml: &mut XmlWriter, pending: &mut String) -> Result<()> {
    if pending.is_empty() {
        return Ok(());
    }
    start(
        xml,
        BytesStart::new("w:t").with_attributes([("xml:space", "preserve")]),
    )?;
    xml.write_event(Event::Text(BytesText::new(pending.as_str())))?;
    end(xml, "w:t")?;
    pending.clear();
    Ok(())
}

fn write_logo_run(
    xml: &mut XmlWriter,
    extent: LogoExtent,
    media_name: &str,
    drawing_id: usize,
) -> Result<()> {
    let cx = extent.cx.to_string();
    let cy = extent.cy.to_string();
    let id = drawing_id.to_string();
    let name = format!("Logo {drawing_id}");

    start(xml, BytesStart::new("w:r"))?;
    start(xml, BytesStart::new("w:drawing"))?;
    start(
        xml,
        BytesStart::new("wp:inline").with_attributes([
            ("distT", "0"),
            ("distB", "0"),
            ("distL", "0"),
            ("distR", "0"),
        ]),
    )?;
    empty(xml, "wp:extent", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    empty(xml, "wp:docPr", &[("id", id.as_str()), ("name", name.as_str())])?;
    start(xml, BytesStart::new("wp:cNvGraphicFramePr"))?;
    empty(xml, "a:graphicFrameLocks", &[("noChangeAspect", "1")])?;
    end(xml, "wp:cNvGraphicFramePr")?;

    start(xml, BytesStart::new("a:graphic"))?;
    start(
        xml,
        BytesStart::new("a:graphicData").with_attributes([("uri", PICTURE_URI)]),
    )?;
    start(xml, BytesStart::new("pic:pic"))?;

    start(xml, BytesStart::new("pic:nvPicPr"))?;
    empty(xml, "pic:cNvPr", &[("id", "0"), ("name", media_name)])?;
    empty(xml, "pic:cNvPicPr", &[])?;
    end(xml, "pic:nvPicPr")?;

    start(xml, BytesStart::new("pic:blipFill"))?;
    empty(xml, "a:blip", &[("r:embed", LOGO_REL_ID)])?;
    start(xml, BytesStart::new("a:stretch"))?;
    empty(xml, "a:fillRect", &[])?;
    end(xml, "a:stretch")?;
    end(xml, "pic:blipFill")?;

    start(xml, BytesStart::new("pic:spPr"))?;
    start(xml, BytesStart::new("a:xfrm"))?;
    empty(xml, "a:off", &[("x", "0"), ("y", "0")])?;
    empty(xml, "a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    end(xml, "a:xfrm")?;
    start(
        xml,
        BytesStart::new("a:prstGeom").with_attributes([("prst", "rect")]),
    )?;
    empty(xml, "a:avLst", &[])?;
    end(xml, "a:prstGeom")?;
    end(xml, "pic:spPr")?;

    end(xml, "pic:pic")?;
    end(xml, "a:graphicData")?;
    end(xml, "a:graphic")?;
    end(xml, "wp:inline")?;
    end(xml, "w:drawing")?;
    end(xml, "w:r")
}

fn write_section_properties(xml: &mut XmlWriter, config: &LayoutConfig) -> Result<()> {
    let page_width = config.page_width.twips().to_string();
    let page_height = config.page_height.twips().to_string();
    let margin = config.page_margin.twips().to_string();

    start(xml, BytesStart::new("w:sectPr"))?;
    empty(
        xml,
        "w:pgSz",
        &[("w:w", page_width.as_str()), ("w:h", page_height.as_str())],
    )?;
    empty(
        xml,
        "w:pgMar",
        &[
            ("w:top", margin.as_str()),
            ("w:right", margin.as_str()),
            ("w:bottom", margin.as_str()),
            ("w:left", margin.as_str()),
            ("w:header", "708"),
            ("w:footer", "708"),
            ("w:gutter", "0"),
        ],
    )?;
    end(xml, "w:sectPr")
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::Path;

    use badge_layout::plan_badges;
    use badge_model::AttendeeRecord;
    use image::{ImageBuffer, ImageFormat, Rgba};

    use super::*;

    fn logo() -> LogoImage {
        let image = ImageBuffer::from_pixel(20, 10, Rgba([0u8, 0, 0, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        LogoImage::from_bytes(bytes, Path::new("logo.png")).unwrap()
    }

    fn render(records: &[AttendeeRecord]) -> String {
        let config = LayoutConfig::default();
        let logo = logo();
        let plan = plan_badges(records, &config);
        let bytes = render_document_xml(
            &plan,
            DocumentOptions {
                config: &config,
                logo: &logo,
            },
        )
        .unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn empty_plan_has_only_section_properties() {
        let xml = render(&[]);
        assert!(!xml.contains("<w:tbl>"));
        assert!(!xml.contains("w:type=\"page\""));
        assert!(xml.contains("<w:pgSz w:w=\"11906\" w:h=\"16838\"/>"));
        assert!(xml.contains("w:top=\"567\""));
    }

    #[test]
    fn text_is_escaped() {
        let xml = render(&[AttendeeRecord::new("Tom", "O'Neil", "R&D <Labs>", "")]);
        assert!(xml.contains("R&amp;D &lt;Labs&gt;"));
    }

    #[test]
    fn annotation_uses_accent_colour() {
        let xml = render(&[AttendeeRecord::new("Ada", "Lovelace", "AE", "Plenary")]);
        assert!(xml.contains("<w:color w:val=\"008000\"/>"));
        assert!(xml.contains(">Plenary</w:t>"));
        assert_eq!(xml.matches("<w:color ").count(), 1);
    }

    #[test]
    fn embedded_line_breaks_become_break_runs() {
        let xml = render(&[AttendeeRecord::new("Ada", "Lovelace", "AE Ltd\nLondon", "Day\t1")]);
        assert!(xml.contains(
            "<w:t xml:space=\"preserve\">AE Ltd</w:t><w:br/><w:t xml:space=\"preserve\">London</w:t>"
        ));
        assert!(xml.contains(
            "<w:t xml:space=\"preserve\">Day</w:t><w:tab/><w:t xml:space=\"preserve\">1</w:t>"
        ));
        assert!(!xml.contains('\n'));
    }

    #[test]
    fn control_characters_are_rejected() {
        let config = LayoutConfig::default();
        let logo = logo();
        let records = vec![
            AttendeeRecord::new("Grace", "Hopper", "Navy", ""),
            AttendeeRecord::new("Ada\u{b}Lee", "Love\u{1}lace", "AE", ""),
        ];
        let plan = plan_badges(&records, &config);
        let result = render_document_xml(
            &plan,
            DocumentOptions {
                config: &config,
                logo: &logo,
            },
        );
        match result {
            Err(DocxError::UnsupportedCharacter { badge, code }) => {
                assert_eq!(badge, 2);
                assert_eq!(code, 0x0B);
            }
            other => panic!("expected unsupported character, got {other:?}"),
        }
    }

    #[test]
    fn document_text_stays_within_xml_chars() {
        assert!(is_document_char('a'));
        assert!(is_document_char('é'));
        assert!(is_document_char('\u{1F600}'));
        assert!(!is_document_char('\u{0}'));
        assert!(!is_document_char('\u{1B}'));
        assert!(!is_document_char('\u{FFFE}'));
    }

    #[test]
    fn logo_extent_keeps_aspect_ratio() {
        let xml = render(&[AttendeeRecord::new("Ada", "Lovelace", "AE", "")]);
        assert!(xml.contains("<wp:extent cx=\"1440000\" cy=\"720000\"/>"));
        assert!(xml.contains("r:embed=\"rIdLogo\""));
    }

    #[test]
    fn page_break_between_pages_only() {
        let records: Vec<AttendeeRecord> = (0..17)
            .map(|i| AttendeeRecord::new(format!("A{i}"), "B", "C", ""))
            .collect();
        let xml = render(&records);
        assert_eq!(xml.matches("<w:br w:type=\"page\"/>").count(), 2);
        // Three outer tables, seventeen nested badge tables.
        assert_eq!(xml.matches("<w:tbl>").count(), 3 + 17);
        // Drawing ids are unique per badge.
        assert!(xml.contains("<wp:docPr id=\"17\" name=\"Logo 17\"/>"));
    }
}
