//! Folder-level curation: tokenize, detect and filter every text file of an
//! input directory into a mirrored output directory.

use std::path::PathBuf;

use thiserror::Error;

pub mod batch;

// Re-export batch API
pub use batch::{BatchConfig, BatchProcessor, FileOutcome, FileReport, FileStats, RunSummary};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("failed to list input directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
