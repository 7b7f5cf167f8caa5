//! Read-only export surfaces for a finished tree: a structured JSON
//! document and an indented text rendering.
//!
//! Both only traverse path, hash, and children; neither mutates the tree.

use crate::node::TreeNode;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Failed to serialize tree: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes the tree as pretty-printed JSON, atomically.
pub fn export_json(root: &TreeNode, path: &Path) -> Result<(), ExportError> {
    use std::io::Write;

    let content = serde_json::to_string_pretty(root)?;

    let parent = path.parent().unwrap_or(Path::new("."));

    let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            ExportError::PermissionDenied(parent.to_path_buf())
        } else {
            ExportError::Io(e)
        }
    })?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(ExportError::Io)?;

    temp_file.as_file().sync_all().map_err(ExportError::Io)?;

    temp_file.persist(path).map_err(|e| {
        if e.error.kind() == std::io::ErrorKind::PermissionDenied {
            ExportError::PermissionDenied(path.to_path_buf())
        } else {
            ExportError::Io(e.error)
        }
    })?;

    Ok(())
}

/// Renders the tree as text, one `path -> hash` line per node, indented
/// two spaces per depth level, children in stored order.
pub fn render_text(root: &TreeNode) -> String {
    let mut out = String::new();
    render_node(root, 0, &mut out);
    out
}

fn render_node(node: &TreeNode, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(&node.to_string());
    out.push('\n');

    for child in &node.children {
        render_node(child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_tree() -> TreeNode {
        let mut sub = TreeNode::new("sub");
        sub.hash = Some("subhash".to_string());
        sub.add_child(TreeNode::leaf("sub/inner.txt", "innerhash".to_string()));

        let mut root = TreeNode::new(".");
        root.hash = Some("roothash".to_string());
        root.add_child(TreeNode::leaf("a.txt", "ahash".to_string()));
        root.add_child(sub);
        root
    }

    #[test]
    fn text_rendering_indents_by_depth() {
        let rendered = render_text(&sample_tree());

        assert_eq!(
            rendered,
            ". -> roothash\n\
             \x20 a.txt -> ahash\n\
             \x20 sub -> subhash\n\
             \x20   sub/inner.txt -> innerhash\n"
        );
    }

    #[test]
    fn text_rendering_of_a_lone_root() {
        let root = TreeNode::leaf(".", "roothash".to_string());

        assert_eq!(render_text(&root), ". -> roothash\n");
    }

    #[test]
    fn json_export_round_trips_through_serde() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tree.json");
        let tree = sample_tree();

        export_json(&tree, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: TreeNode = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn json_export_exposes_path_hash_and_children() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tree.json");

        export_json(&sample_tree(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(value["path"], ".");
        assert_eq!(value["hash"], "roothash");
        assert_eq!(value["children"][0]["path"], "a.txt");
        assert_eq!(value["children"][1]["children"][0]["hash"], "innerhash");
    }
}
