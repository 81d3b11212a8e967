//! Plain-text extraction from OCR engine output.
//!
//! Supports ALTO (`<String CONTENT="..."/>` word elements) and HOCR
//! (`<span class="ocrx_word">` word elements). Words are joined by single
//! spaces in document order; layout is discarded.

use std::path::Path;

use thiserror::Error;

pub mod alto;
pub mod convert;
pub mod hocr;

pub use alto::{alto_text, extract_text_from_alto};
pub use convert::{ConversionSummary, convert_dir};
pub use hocr::{extract_text_from_hocr, hocr_text};

#[derive(Error, Debug)]
pub enum OcrXmlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed XML: {0}")]
    Xml(String),
}

/// OCR output flavour, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrFormat {
    Alto,
    Hocr,
}

impl OcrFormat {
    /// `.xml`/`.alto` are ALTO, `.hocr`/`.html` are HOCR. Anything else is
    /// not OCR output.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xml" | "alto" => Some(Self::Alto),
            "hocr" | "html" => Some(Self::Hocr),
            _ => None,
        }
    }

    pub fn extract(&self, path: &Path) -> Result<String, OcrXmlError> {
        match self {
            Self::Alto => extract_text_from_alto(path),
            Self::Hocr => extract_text_from_hocr(path),
        }
    }
}

pub(crate) fn xml_error(err: impl std::fmt::Display, position: u64) -> OcrXmlError {
    OcrXmlError::Xml(format!("{err} at byte {position}"))
}
