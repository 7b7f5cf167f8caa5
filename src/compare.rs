//! Comparison of two previously built trees.
//!
//! The comparison is intentionally shallow: equal root hashes prove full
//! subtree equality, and unequal root hashes are explained only in terms
//! of the roots' immediate children. Children are paired positionally, by
//! index in stored order rather than by path, and pairing stops at the
//! shorter child list; trailing children of the longer list go
//! unreported. Both properties are preserved from the snapshot format's
//! origin and are documented limitations, not candidates for silent
//! upgrade to a recursive, path-matched diff.

use crate::node::TreeNode;

#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error("Node {0} has no computed hash")]
    MissingHash(String),
}

/// Reports the immediate children of `base` whose positional counterpart
/// in `other` carries a different hash.
///
/// Returns an empty list when the root hashes agree, without looking at
/// any children. Fails if any node it consults lacks a hash.
pub fn compare_trees<'a>(
    base: &'a TreeNode,
    other: &TreeNode,
) -> Result<Vec<&'a TreeNode>, CompareError> {
    if hash_of(base)? == hash_of(other)? {
        return Ok(Vec::new());
    }

    let mut divergent = Vec::new();

    for (base_child, other_child) in base.children.iter().zip(other.children.iter()) {
        if hash_of(base_child)? != hash_of(other_child)? {
            divergent.push(base_child);
        }
    }

    Ok(divergent)
}

fn hash_of(node: &TreeNode) -> Result<&str, CompareError> {
    node.hash
        .as_deref()
        .ok_or_else(|| CompareError::MissingHash(node.path.clone()))
}
