//! Shared XML helpers and Office Open XML constants.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::Result;

// Namespaces
pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const WP_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
pub const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const PIC_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
pub const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
pub const PACKAGE_RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
pub const CORE_PROPS_NS: &str =
    "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
pub const EXTENDED_PROPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties";
pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
pub const DCTERMS_NS: &str = "http://purl.org/dc/terms/";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

// Relationship types
pub const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
pub const REL_EXTENDED_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
pub const REL_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

// Content types
pub const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
pub const CT_XML: &str = "application/xml";
pub const CT_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
pub const CT_CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
pub const CT_EXTENDED_PROPERTIES: &str =
    "application/vnd.openxmlformats-officedocument.extended-properties+xml";

pub const PICTURE_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";

/// Relationship id of the embedded logo inside `word/document.xml`.
pub const LOGO_REL_ID: &str = "rIdLogo";

pub const APPLICATION_NAME: &str = "badge-maker";

pub type XmlWriter = Writer<Vec<u8>>;

pub fn new_writer() -> Result<XmlWriter> {
    let mut xml = Writer::new(Vec::new());
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    Ok(xml)
}

pub fn start(xml: &mut XmlWriter, element: BytesStart<'_>) -> Result<()> {
    xml.write_event(Event::Start(element))?;
    Ok(())
}

pub fn end(xml: &mut XmlWriter, name: &str) -> Result<()> {
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Write `<name attr="value" .../>`.
pub fn empty(xml: &mut XmlWriter, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
    let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
    xml.write_event(Event::Empty(element))?;
    Ok(())
}

/// Write `<name>text</name>`.
pub fn write_text_element(xml: &mut XmlWriter, name: &str, text: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Shorthand for a single `w:val` attribute, the most common WordprocessingML shape.
pub fn w_val(xml: &mut XmlWriter, name: &str, value: &str) -> Result<()> {
    empty(xml, name, &[("w:val", value)])
}
