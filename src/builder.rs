//! Depth-first construction of an integrity tree.
//!
//! Construction recurses over the directory structure: each call builds
//! the node for one directory, with the node under construction held as
//! local state and ascent expressed by returning. Files become leaves
//! hashed from their content as soon as they are visited; a directory's
//! hash is finalized only after its entire subtree has been built.

use crate::hashing;
use crate::node::TreeNode;
use crate::walker::{self, EntryKind, WalkError};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Path stored for the traversal root; all other nodes store paths
/// relative to it.
pub const ROOT_PATH: &str = ".";

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

impl From<WalkError> for BuildError {
    fn from(err: WalkError) -> Self {
        match err {
            WalkError::Io(e) => BuildError::Io(e),
            WalkError::PermissionDenied(path) => BuildError::PermissionDenied(path),
        }
    }
}

/// An entry that could not be read during the walk. The entry gets no
/// node; the build as a whole continues.
#[derive(Debug)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub error: BuildError,
}

/// A finished tree plus the entries the walk had to skip.
#[derive(Debug)]
pub struct BuiltTree {
    pub root: TreeNode,
    pub skipped: Vec<SkippedEntry>,
}

/// Builds the integrity tree for `root`.
///
/// Unreadable files and unreadable nested directories are skipped and
/// reported in the result. A `root` that is not a directory, or whose own
/// listing fails, aborts the build.
pub fn build_tree(root: &Path) -> Result<BuiltTree, BuildError> {
    let metadata = std::fs::metadata(root).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            BuildError::PermissionDenied(root.to_path_buf())
        } else {
            BuildError::Io(e)
        }
    })?;

    if !metadata.is_dir() {
        return Err(BuildError::NotADirectory(root.to_path_buf()));
    }

    // Only the root listing is fatal; failures further down are skips.
    let entries = walker::list_directory(root)?;

    let mut skipped = Vec::new();
    let root_node = build_directory(entries, ROOT_PATH.to_string(), &mut skipped);

    info!(
        "Built tree for {} ({} skipped entries)",
        root.display(),
        skipped.len()
    );

    Ok(BuiltTree {
        root: root_node,
        skipped,
    })
}

/// Builds the node for one directory whose children are `entries`.
///
/// Children are attached in visitation order. The directory's own hash is
/// assigned exactly once, after the loop: an empty directory hashes its
/// stored path (so empty directories at different paths stay distinct),
/// and a non-empty directory hashes the concatenation of its children's
/// hash strings sorted lexicographically. The sort makes the aggregate
/// independent of enumeration order.
fn build_directory(
    entries: Vec<walker::DirEntry>,
    rel_path: String,
    skipped: &mut Vec<SkippedEntry>,
) -> TreeNode {
    let mut node = TreeNode::new(rel_path);
    let mut child_hashes: Vec<String> = Vec::new();

    for entry in entries {
        let child_rel = join_relative(&node.path, &entry.name);

        match entry.kind {
            EntryKind::Directory => match walker::list_directory(&entry.path) {
                Ok(child_entries) => {
                    let child = build_directory(child_entries, child_rel, skipped);
                    child_hashes.extend(child.hash.clone());
                    node.add_child(child);
                }
                Err(err) => skip(skipped, entry.path, err.into()),
            },
            EntryKind::File => match hash_file(&entry.path) {
                Ok(hash) => {
                    child_hashes.push(hash.clone());
                    node.add_child(TreeNode::leaf(child_rel, hash));
                }
                Err(err) => skip(skipped, entry.path, err),
            },
        }
    }

    let hash = if node.children.is_empty() {
        hashing::digest_str(&node.path)
    } else {
        child_hashes.sort();
        hashing::digest_str(&child_hashes.concat())
    };
    node.hash = Some(hash);

    node
}

fn skip(skipped: &mut Vec<SkippedEntry>, path: PathBuf, error: BuildError) {
    warn!("Skipping {}: {}", path.display(), error);
    skipped.push(SkippedEntry { path, error });
}

/// Streams a file's content through the digest engine. The handle is
/// released when it goes out of scope, on the error paths included.
fn hash_file(path: &Path) -> Result<String, BuildError> {
    debug!("Hashing {}", path.display());

    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            BuildError::PermissionDenied(path.to_path_buf())
        } else {
            BuildError::Io(e)
        }
    })?;

    hashing::digest_reader(file).map_err(BuildError::Io)
}

fn join_relative(parent: &str, name: &str) -> String {
    if parent == ROOT_PATH {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}
