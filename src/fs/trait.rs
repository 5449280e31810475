//! FileSystem trait definition

use anyhow::Result;
use std::path::Path;
use std::time::SystemTime;

/// Metadata about a file
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub file_type: FileType,
    /// Last modification time, when the platform reports one
    pub modified: Option<SystemTime>,
}

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
}

/// Read-side file system operations used while classifying sources and
/// deciding staleness. Abstracted so classification can run against an
/// in-memory tree.
pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` exists and is not a directory.
    fn is_file(&self, path: &Path) -> bool;

    fn metadata(&self, path: &Path) -> Result<FileMetadata>;

    /// Read file contents; invalid UTF-8 is replaced rather than rejected.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Modification time of `path`, `None` if it does not exist.
    fn modified(&self, path: &Path) -> Option<SystemTime> {
        self.metadata(path).ok().and_then(|meta| meta.modified)
    }
}
