//! The node type making up an integrity tree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One filesystem entry (file or directory) in an integrity tree.
///
/// `path` is the entry's slash-separated path relative to the traversal
/// root, which itself is stored as `.`. Relative paths keep hashes and
/// snapshots independent of where on disk the tree was built.
///
/// `hash` starts out unset for directories and is assigned exactly once,
/// when construction of the subtree completes. A tree loaded from a
/// snapshot may legitimately carry `None` only if the snapshot was
/// produced by a buggy or truncated writer; comparison treats that as
/// fatal.
///
/// `children` are stored in visitation order. Parenthood is implicit in
/// the ownership structure; no back-references are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub path: String,
    pub hash: Option<String>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Creates a node with no hash and no children.
    pub fn new(path: impl Into<String>) -> Self {
        TreeNode {
            path: path.into(),
            hash: None,
            children: Vec::new(),
        }
    }

    /// Creates a leaf with its content hash already computed.
    pub fn leaf(path: impl Into<String>, hash: String) -> Self {
        TreeNode {
            path: path.into(),
            hash: Some(hash),
            children: Vec::new(),
        }
    }

    /// Appends a child, preserving insertion order.
    pub fn add_child(&mut self, child: TreeNode) {
        self.children.push(child);
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.path, self.hash.as_deref().unwrap_or("(unhashed)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_path_and_hash() {
        let node = TreeNode::leaf("a.txt", "abc123".to_string());
        assert_eq!(node.to_string(), "a.txt -> abc123");
    }

    #[test]
    fn display_marks_missing_hash() {
        let node = TreeNode::new("dir");
        assert_eq!(node.to_string(), "dir -> (unhashed)");
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut node = TreeNode::new(".");
        node.add_child(TreeNode::leaf("z.txt", "1".to_string()));
        node.add_child(TreeNode::leaf("a.txt", "2".to_string()));

        let paths: Vec<&str> = node.children.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["z.txt", "a.txt"]);
    }
}
