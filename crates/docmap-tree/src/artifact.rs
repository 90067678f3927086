//! Published tree artifact.
//!
//! The built tree is serialized as a single JSON document and written to
//! a well-known location in the content store, where the client consumes
//! it without further processing.

use docmap_storage::{ContentStore, StoreError};

use crate::node::TreeNode;

/// Well-known artifact location.
pub const ARTIFACT_FILE: &str = "structure.json";

/// Error raised while publishing the artifact.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Serializing the tree failed.
    #[error("failed to serialize tree: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing the artifact to the store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Serialize a tree as the pretty-printed artifact document.
///
/// Output is deterministic: identical trees serialize to identical bytes.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(tree: &[TreeNode]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tree)
}

/// Serialize a tree and write it to `path` in the store.
///
/// # Errors
///
/// Returns [`PublishError`] if serialization or the store write fails.
pub fn publish(store: &dyn ContentStore, tree: &[TreeNode], path: &str) -> Result<(), PublishError> {
    let json = to_json(tree)?;
    store.write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use docmap_storage::MockStore;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::builder::TreeBuilder;

    #[test]
    fn test_artifact_round_trips_through_serde() {
        let mut category = TreeNode::category("Guides");
        category.children.push(TreeNode::file("a.md", "pages/a.md"));
        let tree = vec![category, TreeNode::dir("extra", "pages/extra")];

        let json = to_json(&tree).unwrap();
        let parsed: Vec<TreeNode> = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, tree);
    }

    #[test]
    fn test_publish_writes_to_well_known_location() {
        let store = MockStore::new().with_file("pages/overview.md", "");
        let tree = TreeBuilder::new(&store).build("pages").unwrap();

        publish(&store, &tree, ARTIFACT_FILE).unwrap();

        let written = store.written(ARTIFACT_FILE).unwrap();
        assert!(written.contains("\"overview.md\""));
    }

    #[test]
    fn test_rebuild_produces_identical_bytes() {
        let store = MockStore::new()
            .with_file("pages/map.yml", "Guides:\n  - b.md\n  - overview.md\n")
            .with_file("pages/b.md", "")
            .with_file("pages/overview.md", "")
            .with_file("pages/nested/leaf.md", "");

        let builder = TreeBuilder::new(&store);
        let first = to_json(&builder.build("pages").unwrap()).unwrap();
        let second = to_json(&builder.build("pages").unwrap()).unwrap();

        assert_eq!(first, second);
    }
}
