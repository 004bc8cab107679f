use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while producing the badge document.
#[derive(Debug, Error)]
pub enum DocxError {
    // === Logo Errors ===
    #[error("failed to read logo {path}: {source}")]
    LogoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode logo {path}: {source}")]
    LogoDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("unsupported logo format in {path} (expected PNG, JPEG, GIF, BMP or TIFF)")]
    UnsupportedLogoFormat { path: PathBuf },

    // === Content Errors ===
    /// Badge text holds a control character that XML cannot carry.
    #[error("badge {badge} contains character U+{code:04X}, which a document cannot store")]
    UnsupportedCharacter { badge: usize, code: u32 },

    // === Serialization Errors ===
    #[error("failed to serialize document XML: {0}")]
    XmlWrite(#[from] std::io::Error),

    #[error("failed to assemble document package: {0}")]
    Package(#[from] zip::result::ZipError),

    // === Output Errors ===
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DocxError>;
