//! Navigation tree nodes.

use serde::{Deserialize, Serialize};

/// Kind of a navigation tree node.
///
/// Serialized as the artifact's `type` tags: `file`, `dir`, `category`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A markdown document.
    File,
    /// A literal content-store directory.
    Dir,
    /// A synthetic grouping node created from an ordering manifest.
    Category,
}

/// One node of the published navigation tree.
///
/// `path` is the store-relative content path, unique within the tree;
/// categories are synthetic and carry no path. Files never have children.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Display/source name (e.g., `"overview.md"` or a category label).
    pub name: String,
    /// Store-relative content path; absent for categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Node kind tag.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Ordered child nodes; omitted from the artifact when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a file node.
    #[must_use]
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: Some(path.into()),
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }

    /// Create a directory node with no children yet.
    #[must_use]
    pub fn dir(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: Some(path.into()),
            kind: NodeKind::Dir,
            children: Vec::new(),
        }
    }

    /// Create a category node with no children yet.
    #[must_use]
    pub fn category(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            kind: NodeKind::Category,
            children: Vec::new(),
        }
    }
}
