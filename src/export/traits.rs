//! Export sink trait and error types
//!
//! This module defines the interface exported payloads are handed to and the
//! errors that can occur while encoding or saving them.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during export operations
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to build workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Destination for exported files
///
/// The sink owns the file once saved; the encoders only produce bytes.
pub trait FileSink {
    fn save(&self, filename: &str, bytes: &[u8]) -> ExportResult<()>;
}

/// Sink that writes files into a directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Creates a sink for `dir`; the directory is created on first save
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a file with this name is written to
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

impl FileSink for DirectorySink {
    fn save(&self, filename: &str, bytes: &[u8]) -> ExportResult<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(filename);
        fs::write(&path, bytes)?;
        tracing::info!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}
