//! Document package assembly.
//!
//! The whole archive is built in memory and only then written next to the
//! destination and renamed over it, so a failed run never leaves a partial
//! document behind.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use badge_layout::{BadgePlan, LayoutConfig};
use chrono::{SecondsFormat, Utc};
use quick_xml::events::{BytesStart, BytesText, Event};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::common::{
    APPLICATION_NAME, CONTENT_TYPES_NS, CORE_PROPS_NS, CT_CORE_PROPERTIES, CT_DOCUMENT,
    CT_EXTENDED_PROPERTIES, CT_RELATIONSHIPS, CT_XML, DC_NS, DCTERMS_NS, EXTENDED_PROPS_NS,
    LOGO_REL_ID, PACKAGE_RELS_NS, REL_CORE_PROPERTIES, REL_EXTENDED_PROPERTIES, REL_IMAGE,
    REL_OFFICE_DOCUMENT, XSI_NS, empty, end, new_writer, start, write_text_element,
};
use crate::document::{DocumentOptions, render_document_xml};
use crate::error::{DocxError, Result};
use crate::logo::LogoImage;

const DOCUMENT_TITLE: &str = "Name badges";

/// What was written by [`write_docx`].
#[derive(Debug, Clone)]
pub struct DocxSummary {
    pub path: PathBuf,
    pub bytes: usize,
    pub pages: usize,
    pub badges: usize,
}

/// Assemble the complete `.docx` archive in memory.
pub fn build_docx(plan: &BadgePlan, config: &LayoutConfig, logo: &LogoImage) -> Result<Vec<u8>> {
    let document = render_document_xml(plan, DocumentOptions { config, logo })?;
    let media_name = logo.media_name();

    let parts: Vec<(String, Vec<u8>)> = vec![
        ("[Content_Types].xml".to_string(), content_types_xml(logo)?),
        ("_rels/.rels".to_string(), package_rels_xml()?),
        ("docProps/core.xml".to_string(), core_properties_xml()?),
        ("docProps/app.xml".to_string(), app_properties_xml(plan)?),
        ("word/document.xml".to_string(), document),
        (
            "word/_rels/document.xml.rels".to_string(),
            document_rels_xml(&media_name)?,
        ),
        (format!("word/media/{media_name}"), logo.bytes().to_vec()),
    ];

    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, data) in &parts {
        archive.start_file(name.as_str(), options)?;
        archive
            .write_all(data)
            .map_err(zip::result::ZipError::Io)?;
        debug!(part = %name, bytes = data.len(), "added package part");
    }
    let cursor = archive.finish()?;
    Ok(cursor.into_inner())
}

/// Build the document and atomically write it to `path`.
pub fn write_docx(
    path: &Path,
    plan: &BadgePlan,
    config: &LayoutConfig,
    logo: &LogoImage,
) -> Result<DocxSummary> {
    let bytes = build_docx(plan, config, logo)?;
    persist_atomically(path, &bytes)?;
    info!(
        path = %path.display(),
        bytes = bytes.len(),
        pages = plan.pages.len(),
        badges = plan.badge_count(),
        "wrote badge document"
    );
    Ok(DocxSummary {
        path: path.to_path_buf(),
        bytes: bytes.len(),
        pages: plan.pages.len(),
        badges: plan.badge_count(),
    })
}

fn persist_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let write_error = |source: std::io::Error| DocxError::Write {
        path: path.to_path_buf(),
        source,
    };
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp_file = NamedTempFile::new_in(directory).map_err(write_error)?;
    temp_file.write_all(bytes).map_err(write_error)?;
    temp_file.flush().map_err(write_error)?;
    temp_file
        .persist(path)
        .map_err(|error| write_error(error.error))?;
    Ok(())
}

fn content_types_xml(logo: &LogoImage) -> Result<Vec<u8>> {
    let mut xml = new_writer()?;
    start(
        &mut xml,
        BytesStart::new("Types").with_attributes([("xmlns", CONTENT_TYPES_NS)]),
    )?;
    empty(
        &mut xml,
        "Default",
        &[("Extension", "rels"), ("ContentType", CT_RELATIONSHIPS)],
    )?;
    empty(
        &mut xml,
        "Default",
        &[("Extension", "xml"), ("ContentType", CT_XML)],
    )?;
    empty(
        &mut xml,
        "Default",
        &[
            ("Extension", logo.format().extension()),
            ("ContentType", logo.format().content_type()),
        ],
    )?;
    for (part, content_type) in [
        ("/word/document.xml", CT_DOCUMENT),
        ("/docProps/core.xml", CT_CORE_PROPERTIES),
        ("/docProps/app.xml", CT_EXTENDED_PROPERTIES),
    ] {
        empty(
            &mut xml,
            "Override",
            &[("PartName", part), ("ContentType", content_type)],
        )?;
    }
    end(&mut xml, "Types")?;
    Ok(xml.into_inner())
}

fn relationships_xml(relationships: &[(&str, &str, &str)]) -> Result<Vec<u8>> {
    let mut xml = new_writer()?;
    start(
        &mut xml,
        BytesStart::new("Relationships").with_attributes([("xmlns", PACKAGE_RELS_NS)]),
    )?;
    for (id, kind, target) in relationships {
        empty(
            &mut xml,
            "Relationship",
            &[("Id", id), ("Type", kind), ("Target", target)],
        )?;
    }
    end(&mut xml, "Relationships")?;
    Ok(xml.into_inner())
}

fn package_rels_xml() -> Result<Vec<u8>> {
    relationships_xml(&[
        ("rId1", REL_OFFICE_DOCUMENT, "word/document.xml"),
        ("rId2", REL_CORE_PROPERTIES, "docProps/core.xml"),
        ("rId3", REL_EXTENDED_PROPERTIES, "docProps/app.xml"),
    ])
}

fn document_rels_xml(media_name: &str) -> Result<Vec<u8>> {
    let target = format!("media/{media_name}");
    relationships_xml(&[(LOGO_REL_ID, REL_IMAGE, target.as_str())])
}

fn core_properties_xml() -> Result<Vec<u8>> {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut xml = new_writer()?;
    start(
        &mut xml,
        BytesStart::new("cp:coreProperties").with_attributes([
            ("xmlns:cp", CORE_PROPS_NS),
            ("xmlns:dc", DC_NS),
            ("xmlns:dcterms", DCTERMS_NS),
            ("xmlns:xsi", XSI_NS),
        ]),
    )?;
    write_text_element(&mut xml, "dc:title", DOCUMENT_TITLE)?;
    write_text_element(&mut xml, "dc:creator", APPLICATION_NAME)?;
    for name in ["dcterms:created", "dcterms:modified"] {
        start(
            &mut xml,
            BytesStart::new(name).with_attributes([("xsi:type", "dcterms:W3CDTF")]),
        )?;
        xml.write_event(Event::Text(BytesText::new(&timestamp)))?;
        end(&mut xml, name)?;
    }
    end(&mut xml, "cp:coreProperties")?;
    Ok(xml.into_inner())
}

fn app_properties_xml(plan: &BadgePlan) -> Result<Vec<u8>> {
    let mut xml = new_writer()?;
    start(
        &mut xml,
        BytesStart::new("Properties").with_attributes([("xmlns", EXTENDED_PROPS_NS)]),
    )?;
    write_text_element(&mut xml, "Application", APPLICATION_NAME)?;
    // Word shows at least one page even for an empty body.
    write_text_element(&mut xml, "Pages", &plan.pages.len().max(1).to_string())?;
    end(&mut xml, "Properties")?;
    Ok(xml.into_inner())
}
