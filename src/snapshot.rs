//! Binary snapshot persistence for finished trees.
//!
//! A snapshot is a bincode-encoded envelope of a version number followed
//! by the full node graph. Paths, hashes, and child order round-trip
//! losslessly; parent links are implicit in the children lists and are
//! reconstructable on load.

use crate::node::TreeNode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SUPPORTED_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Failed to encode snapshot: {0}")]
    Encode(bincode::Error),
    #[error("Failed to decode snapshot: {0}")]
    Decode(bincode::Error),
    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    root: &'a TreeNode,
}

#[derive(Deserialize)]
struct Snapshot {
    // Checked via VersionHeader before the full decode.
    #[allow(dead_code)]
    version: u32,
    root: TreeNode,
}

/// Decodes only the leading version field. Lets us report an unsupported
/// version as such instead of failing on whatever the rest of the payload
/// happens to look like in that version.
#[derive(Deserialize)]
struct VersionHeader {
    version: u32,
}

/// Writes `root` to `path` atomically: encode to a temporary file in the
/// destination directory, sync, then rename into place.
pub fn save(root: &TreeNode, path: &Path) -> Result<(), SnapshotError> {
    use std::io::Write;

    let encoded = bincode::serialize(&SnapshotRef {
        version: SUPPORTED_VERSION,
        root,
    })
    .map_err(SnapshotError::Encode)?;

    let parent = path.parent().unwrap_or(Path::new("."));

    let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            SnapshotError::PermissionDenied(parent.to_path_buf())
        } else {
            SnapshotError::Io(e)
        }
    })?;

    temp_file.write_all(&encoded).map_err(SnapshotError::Io)?;

    temp_file.as_file().sync_all().map_err(SnapshotError::Io)?;

    temp_file.persist(path).map_err(|e| {
        if e.error.kind() == std::io::ErrorKind::PermissionDenied {
            SnapshotError::PermissionDenied(path.to_path_buf())
        } else {
            SnapshotError::Io(e.error)
        }
    })?;

    Ok(())
}

/// Reconstructs a tree from a snapshot written by [`save`].
pub fn load(path: &Path) -> Result<TreeNode, SnapshotError> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            SnapshotError::PermissionDenied(path.to_path_buf())
        } else {
            SnapshotError::Io(e)
        }
    })?;

    let header: VersionHeader = bincode::deserialize(&bytes).map_err(SnapshotError::Decode)?;
    if header.version != SUPPORTED_VERSION {
        return Err(SnapshotError::UnsupportedVersion(header.version));
    }

    let snapshot: Snapshot = bincode::deserialize(&bytes).map_err(SnapshotError::Decode)?;
    Ok(snapshot.root)
}
