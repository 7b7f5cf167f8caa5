//! Immediate-children directory listing feeding tree construction.
//!
//! Listing is non-recursive; the builder drives descent. Entries are
//! sorted by name so that visitation order is deterministic regardless of
//! how the underlying filesystem enumerates a directory.

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Name of the entry within its directory.
    pub name: String,
    /// Full on-disk path of the entry.
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Lists the immediate children of `dir`, sorted by name.
///
/// Symlinks are classified as files: hashing later opens the path, which
/// follows the link, and a dangling link surfaces as a per-file read
/// failure rather than an error here.
pub fn list_directory(dir: &Path) -> Result<Vec<DirEntry>, WalkError> {
    let read_dir = std::fs::read_dir(dir).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            WalkError::PermissionDenied(dir.to_path_buf())
        } else {
            WalkError::Io(e)
        }
    })?;

    let mut entries = Vec::new();

    for entry in read_dir {
        let entry = entry.map_err(WalkError::Io)?;
        let path = entry.path();

        let metadata = std::fs::symlink_metadata(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                WalkError::PermissionDenied(path.clone())
            } else {
                WalkError::Io(e)
            }
        })?;

        let kind = if metadata.file_type().is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };

        entries.push(DirEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path,
            kind,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(entries)
}
