//! Logo loading.
//!
//! The logo is required on every badge, so any failure to read or decode it
//! aborts the run before a document is assembled.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use badge_model::Centimeters;
use image::{GenericImageView, ImageFormat, ImageReader};
use tracing::debug;

use crate::error::{DocxError, Result};

/// Raster formats that can be embedded in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
}

impl LogoFormat {
    fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Gif => Some(Self::Gif),
            ImageFormat::Bmp => Some(Self::Bmp),
            ImageFormat::Tiff => Some(Self::Tiff),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
        }
    }
}

/// A verified logo image, kept as the original encoded bytes.
#[derive(Debug, Clone)]
pub struct LogoImage {
    bytes: Vec<u8>,
    format: LogoFormat,
    width_px: u32,
    height_px: u32,
}

impl LogoImage {
    /// Read the logo at `path` and decode it fully to reject corrupt files.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| DocxError::LogoRead {
            path: path.to_path_buf(),
            source,
        })?;
        let logo = Self::from_bytes(bytes, path)?;
        debug!(
            path = %path.display(),
            format = logo.format.extension(),
            width = logo.width_px,
            height = logo.height_px,
            "loaded logo"
        );
        Ok(logo)
    }

    /// Verify already-read logo bytes. `path` is used for error messages.
    pub fn from_bytes(bytes: Vec<u8>, path: &Path) -> Result<Self> {
        let reader = ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()
            .map_err(|source| DocxError::LogoRead {
                path: path.to_path_buf(),
                source,
            })?;
        let format = reader
            .format()
            .and_then(LogoFormat::from_image_format)
            .ok_or_else(|| DocxError::UnsupportedLogoFormat {
                path: path.to_path_buf(),
            })?;
        let decoded = reader.decode().map_err(|source| DocxError::LogoDecode {
            path: path.to_path_buf(),
            source,
        })?;
        let (width_px, height_px) = decoded.dimensions();
        Ok(Self {
            bytes,
            format,
            width_px,
            height_px,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> LogoFormat {
        self.format
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }

    /// Display height for a display width, keeping the aspect ratio.
    pub fn height_for_width(&self, width: Centimeters) -> Centimeters {
        if self.width_px == 0 {
            return Centimeters(0.0);
        }
        Centimeters(width.0 * f64::from(self.height_px) / f64::from(self.width_px))
    }

    /// Part name inside the document package.
    pub fn media_name(&self) -> String {
        format!("logo.{}", self.format.extension())
    }
}
