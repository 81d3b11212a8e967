use thiserror::Error;

pub mod classifier;
pub mod config_file;
pub mod detector;
pub mod filter;
pub mod language;
pub mod mock;

// Re-export for convenience
pub use classifier::{Candidate, ClassifierError, LanguageClassifier, WhatlangClassifier};
pub use detector::{DetectorKind, DetectorOptions, LanguageDetector};
pub use filter::{FilterPolicy, LanguageFilter};

/// A language code such as `"en"` or `"zh-cn"`. Compared by string equality only.
pub type LanguageCode = String;

#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    #[error("unknown language detector: {0}")]
    UnknownDetector(String),
    #[error("threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),
}
