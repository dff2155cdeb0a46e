//! KrackedRepo Core - Data Models and Repository Collection
//!
//! This crate provides the shared foundation of the KrackedRepo pipeline:
//! - Data models for collected files and the synthesized MVP report
//! - Best-effort file collection over a directory tree
//! - The in-memory funding ledger consumed by the showcase boundary
//! - Logging initialization shared by the binaries

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod collector;
pub mod funding;
pub mod logging;
pub mod models;

// Re-export commonly used types for convenience
pub use collector::{collect_files, CollectorConfig};
pub use funding::{Funder, FunderLedger};
pub use models::{FileRecord, MvpReport, TechItem};

/// Result type used throughout KrackedRepo core
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A file could not be read during collection
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}
