//! Badge sheet output.
//!
//! Renders a [`BadgePlan`](badge_layout::BadgePlan) as an Office Open XML
//! word-processing document:
//!
//! - **Logo**: loaded and verified once, embedded once, referenced by every badge
//! - **Document body**: one fixed-layout table per page, a nested logo/text
//!   table per badge
//! - **Package**: assembled in memory, then written atomically

mod common;
mod document;
mod error;
mod logo;
mod package;

pub use document::{DocumentOptions, render_document_xml};
pub use error::{DocxError, Result};
pub use logo::{LogoFormat, LogoImage};
pub use package::{DocxSummary, build_docx, write_docx};
