//! Structure tree builder.
//!
//! Walks the content store depth-first with an explicit work stack and
//! produces the ordered [`TreeNode`] tree for one content root.

use std::collections::HashSet;

use docmap_storage::{ContentStore, Entry, EntryKind, StoreError};

use crate::manifest::{MANIFEST_FILE, OrderingManifest};
use crate::node::{NodeKind, TreeNode};

/// Error raised when the tree cannot be built at all.
///
/// Only failures at the content root are fatal; failures below the root
/// are logged and the affected directory is skipped, allowing a partial
/// tree.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Listing the content root failed.
    #[error("failed to list content root: {0}")]
    Root(#[source] StoreError),
}

/// Flat arena node; children are tracked by index so directories pushed
/// on the work stack can be filled in after their parent was processed.
struct ArenaNode {
    name: String,
    path: Option<String>,
    kind: NodeKind,
    children: Vec<usize>,
}

/// Structure tree builder over a [`ContentStore`].
///
/// # Example
///
/// ```ignore
/// use docmap_storage::FsStore;
/// use docmap_tree::TreeBuilder;
///
/// let store = FsStore::new("site");
/// let tree = TreeBuilder::new(&store).build("pages")?;
/// ```
pub struct TreeBuilder<'a> {
    store: &'a dyn ContentStore,
    manifest_name: String,
}

impl<'a> TreeBuilder<'a> {
    /// Create a builder using the default manifest name (`map.yml`).
    #[must_use]
    pub fn new(store: &'a dyn ContentStore) -> Self {
        Self {
            store,
            manifest_name: MANIFEST_FILE.to_owned(),
        }
    }

    /// Override the per-directory manifest file name.
    #[must_use]
    pub fn with_manifest_name(mut self, name: impl Into<String>) -> Self {
        self.manifest_name = name.into();
        self
    }

    /// Build the ordered tree rooted at `root`.
    ///
    /// Per directory: list contents, resolve the manifest if present,
    /// emit manifest categories in manifest order (each child resolved by
    /// name; `.md` files become file nodes, directories become dir nodes
    /// and are pushed for later expansion), then append unclaimed items
    /// in lexicographic order. The `overview*` elevation rule runs once
    /// per category and once more over the directory's full child list.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Root`] if the root directory cannot be
    /// listed. Failures below the root are logged and skipped.
    pub fn build(&self, root: &str) -> Result<Vec<TreeNode>, BuildError> {
        let mut arena: Vec<ArenaNode> = Vec::new();
        let mut root_children: Vec<usize> = Vec::new();

        // Work stack of (directory path, arena index of its node).
        // The root has no node of its own.
        let mut stack: Vec<(String, Option<usize>)> = vec![(root.to_owned(), None)];

        while let Some((dir, parent)) = stack.pop() {
            let contents = match self.store.list(&dir) {
                Ok(contents) => contents,
                Err(e) if parent.is_none() => return Err(BuildError::Root(e)),
                Err(e) => {
                    tracing::warn!(path = %dir, error = %e, "skipping unlistable directory");
                    continue;
                }
            };

            let manifest = self.resolve_manifest(&dir, &contents);
            let mut assigned: HashSet<&str> = HashSet::new();
            let mut siblings: Vec<usize> = Vec::new();

            for (category, names) in manifest.categories() {
                let category_idx = arena.len();
                arena.push(ArenaNode {
                    name: category.to_owned(),
                    path: None,
                    kind: NodeKind::Category,
                    children: Vec::new(),
                });
                siblings.push(category_idx);

                let mut category_children = Vec::new();
                for name in names {
                    let Some(entry) = contents.iter().find(|e| &e.name == name) else {
                        continue;
                    };
                    if let Some(idx) = push_entry(&mut arena, &mut stack, entry) {
                        category_children.push(idx);
                        assigned.insert(entry.name.as_str());
                    }
                }

                elevate(&arena, &mut category_children);
                arena[category_idx].children = category_children;
            }

            let mut remaining: Vec<&Entry> = contents
                .iter()
                .filter(|e| !assigned.contains(e.name.as_str()))
                .collect();
            remaining.sort_by(|a, b| a.name.cmp(&b.name));

            for entry in remaining {
                if let Some(idx) = push_entry(&mut arena, &mut stack, entry) {
                    siblings.push(idx);
                }
            }

            elevate(&arena, &mut siblings);

            match parent {
                Some(idx) => arena[idx].children = siblings,
                None => root_children = siblings,
            }
        }

        Ok(root_children
            .iter()
            .map(|&idx| materialize(&arena, idx))
            .collect())
    }

    /// Load and parse the directory's manifest, if it has one.
    ///
    /// Read and parse failures are logged and the directory is treated as
    /// manifest-less, so a broken manifest cannot take down the build.
    fn resolve_manifest(&self, dir: &str, contents: &[Entry]) -> OrderingManifest {
        let Some(entry) = contents
            .iter()
            .find(|e| e.kind == EntryKind::File && e.name == self.manifest_name)
        else {
            return OrderingManifest::empty();
        };

        let text = match self.store.read(&entry.path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(dir = %dir, path = %entry.path, error = %e, "failed to read manifest");
                return OrderingManifest::empty();
            }
        };

        match OrderingManifest::parse(&text) {
            Ok(manifest) => manifest,
            Err(e) => {
                tracing::warn!(dir = %dir, path = %entry.path, error = %e, "ignoring malformed manifest");
                OrderingManifest::empty()
            }
        }
    }
}

/// Append an arena node for a directory item, pushing directories onto
/// the work stack. Returns `None` for items that are neither markdown
/// files nor directories.
fn push_entry(
    arena: &mut Vec<ArenaNode>,
    stack: &mut Vec<(String, Option<usize>)>,
    entry: &Entry,
) -> Option<usize> {
    let idx = arena.len();
    match entry.kind {
        EntryKind::File if entry.name.ends_with(".md") => {
            arena.push(ArenaNode {
                name: entry.name.clone(),
                path: Some(entry.path.clone()),
                kind: NodeKind::File,
                children: Vec::new(),
            });
            Some(idx)
        }
        EntryKind::Dir => {
            arena.push(ArenaNode {
                name: entry.name.clone(),
                path: Some(entry.path.clone()),
                kind: NodeKind::Dir,
                children: Vec::new(),
            });
            stack.push((entry.path.clone(), Some(idx)));
            Some(idx)
        }
        EntryKind::File => None,
    }
}

/// Index-based form of the `overview*` elevation rule.
fn elevate(arena: &[ArenaNode], children: &mut Vec<usize>) {
    if let Some(pos) = children
        .iter()
        .position(|&idx| arena[idx].name.starts_with("overview"))
    {
        let idx = children.remove(pos);
        children.insert(0, idx);
    }
}

/// Copy an arena subtree out into the nested [`TreeNode`] form.
fn materialize(arena: &[ArenaNode], idx: usize) -> TreeNode {
    let node = &arena[idx];
    TreeNode {
        name: node.name.clone(),
        path: node.path.clone(),
        kind: node.kind,
        children: node
            .children
            .iter()
            .map(|&child| materialize(arena, child))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use docmap_storage::MockStore;
    use pretty_assertions::assert_eq;

    use super::*;

    fn names(nodes: &[TreeNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_manifestless_directory_is_lexicographic_with_elevation() {
        let store = MockStore::new()
            .with_file("pages/zeta.md", "")
            .with_file("pages/alpha.md", "")
            .with_file("pages/overview.md", "");

        let tree = TreeBuilder::new(&store).build("pages").unwrap();

        assert_eq!(names(&tree), vec!["overview.md", "alpha.md", "zeta.md"]);
        assert!(tree.iter().all(|n| n.kind == NodeKind::File));
    }

    #[test]
    fn test_manifest_categories_in_manifest_order() {
        let store = MockStore::new()
            .with_file(
                "pages/map.yml",
                "Guides:\n  - setup.md\n  - overview.md\nReference:\n  - api.md\n",
            )
            .with_file("pages/setup.md", "")
            .with_file("pages/overview.md", "")
            .with_file("pages/api.md", "");

        let tree = TreeBuilder::new(&store).build("pages").unwrap();

        assert_eq!(names(&tree), vec!["Guides", "Reference"]);
        assert_eq!(tree[0].kind, NodeKind::Category);
        assert!(tree[0].path.is_none());
        // overview elevated within the category, rest in manifest order
        assert_eq!(names(&tree[0].children), vec!["overview.md", "setup.md"]);
        assert_eq!(names(&tree[1].children), vec!["api.md"]);
    }

    #[test]
    fn test_unassigned_items_appended_lexicographically() {
        let store = MockStore::new()
            .with_file("pages/map.yml", "Guides:\n  - setup.md\n")
            .with_file("pages/setup.md", "")
            .with_file("pages/zebra.md", "")
            .with_file("pages/extra.md", "");

        let tree = TreeBuilder::new(&store).build("pages").unwrap();

        assert_eq!(names(&tree), vec!["Guides", "extra.md", "zebra.md"]);
    }

    #[test]
    fn test_sibling_elevation_runs_after_unassigned_append() {
        // An unassigned overview file outranks manifest categories in the
        // final sibling list: the whole-list elevation runs last.
        let store = MockStore::new()
            .with_file("pages/map.yml", "Guides:\n  - setup.md\n")
            .with_file("pages/setup.md", "")
            .with_file("pages/overview.md", "");

        let tree = TreeBuilder::new(&store).build("pages").unwrap();

        assert_eq!(names(&tree), vec!["overview.md", "Guides"]);
    }

    #[test]
    fn test_elevation_matches_prefix_only() {
        let store = MockStore::new()
            .with_file("pages/intro.md", "")
            .with_file("pages/overview_advanced.md", "");

        let tree = TreeBuilder::new(&store).build("pages").unwrap();

        assert_eq!(names(&tree), vec!["overview_advanced.md", "intro.md"]);
    }

    #[test]
    fn test_elevation_takes_first_match_only() {
        let store = MockStore::new()
            .with_file("pages/a.md", "")
            .with_file("pages/overview-1.md", "")
            .with_file("pages/overview-2.md", "");

        let tree = TreeBuilder::new(&store).build("pages").unwrap();

        assert_eq!(names(&tree), vec!["overview-1.md", "a.md", "overview-2.md"]);
    }

    #[test]
    fn test_directories_are_expanded_depth_first() {
        let store = MockStore::new()
            .with_file("pages/guides/install.md", "")
            .with_file("pages/guides/deep/steps.md", "")
            .with_file("pages/intro.md", "");

        let tree = TreeBuilder::new(&store).build("pages").unwrap();

        assert_eq!(names(&tree), vec!["guides", "intro.md"]);
        let guides = &tree[0];
        assert_eq!(guides.kind, NodeKind::Dir);
        assert_eq!(guides.path.as_deref(), Some("pages/guides"));
        assert_eq!(names(&guides.children), vec!["deep", "install.md"]);
        assert_eq!(names(&guides.children[0].children), vec!["steps.md"]);
    }

    #[test]
    fn test_manifest_can_claim_directories() {
        let store = MockStore::new()
            .with_file("pages/map.yml", "Tutorials:\n  - advanced\n  - basics\n")
            .with_file("pages/advanced/tuning.md", "")
            .with_file("pages/basics/start.md", "");

        let tree = TreeBuilder::new(&store).build("pages").unwrap();

        assert_eq!(names(&tree), vec!["Tutorials"]);
        let tutorials = &tree[0];
        assert_eq!(names(&tutorials.children), vec!["advanced", "basics"]);
        assert_eq!(tutorials.children[0].kind, NodeKind::Dir);
        assert_eq!(names(&tutorials.children[0].children), vec!["tuning.md"]);
    }

    #[test]
    fn test_unresolvable_manifest_names_are_skipped() {
        let store = MockStore::new()
            .with_file("pages/map.yml", "Guides:\n  - ghost.md\n  - setup.md\n")
            .with_file("pages/setup.md", "");

        let tree = TreeBuilder::new(&store).build("pages").unwrap();

        assert_eq!(names(&tree[0].children), vec!["setup.md"]);
    }

    #[test]
    fn test_non_markdown_files_are_excluded() {
        let store = MockStore::new()
            .with_file("pages/notes.txt", "")
            .with_file("pages/diagram.png", "")
            .with_file("pages/real.md", "");

        let tree = TreeBuilder::new(&store).build("pages").unwrap();

        assert_eq!(names(&tree), vec!["real.md"]);
    }

    #[test]
    fn test_manifest_file_itself_not_in_tree() {
        let store = MockStore::new()
            .with_file("pages/map.yml", "Guides:\n  - a.md\n")
            .with_file("pages/a.md", "");

        let tree = TreeBuilder::new(&store).build("pages").unwrap();

        assert!(tree.iter().all(|n| n.name != "map.yml"));
    }

    #[test]
    fn test_malformed_manifest_falls_back_to_lexicographic() {
        let store = MockStore::new()
            .with_file("pages/map.yml", "- not\n- a\n- mapping\n")
            .with_file("pages/b.md", "")
            .with_file("pages/a.md", "");

        let tree = TreeBuilder::new(&store).build("pages").unwrap();

        assert_eq!(names(&tree), vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_root_listing_failure_is_fatal() {
        let store = MockStore::new().with_listing_error("pages");

        let err = TreeBuilder::new(&store).build("pages").unwrap_err();

        assert!(matches!(err, BuildError::Root(_)));
    }

    #[test]
    fn test_subdirectory_listing_failure_yields_partial_tree() {
        let store = MockStore::new()
            .with_file("pages/ok.md", "")
            .with_dir("pages/broken")
            .with_listing_error("pages/broken");

        let tree = TreeBuilder::new(&store).build("pages").unwrap();

        assert_eq!(names(&tree), vec!["broken", "ok.md"]);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn test_unreadable_manifest_treated_as_manifestless() {
        let store = MockStore::new()
            .with_file("pages/map.yml", "Guides:\n  - a.md\n")
            .with_read_error("pages/map.yml")
            .with_file("pages/b.md", "")
            .with_file("pages/a.md", "");

        let tree = TreeBuilder::new(&store).build("pages").unwrap();

        assert_eq!(names(&tree), vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_custom_manifest_name() {
        let store = MockStore::new()
            .with_file("pages/order.yml", "Guides:\n  - a.md\n")
            .with_file("pages/a.md", "")
            .with_file("pages/b.md", "");

        let tree = TreeBuilder::new(&store)
            .with_manifest_name("order.yml")
            .build("pages")
            .unwrap();

        assert_eq!(names(&tree), vec!["Guides", "b.md"]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let store = MockStore::new()
            .with_file("pages/map.yml", "Guides:\n  - setup.md\n")
            .with_file("pages/setup.md", "")
            .with_file("pages/overview.md", "")
            .with_file("pages/tutorials/deep/steps.md", "")
            .with_file("pages/tutorials/overview.md", "");

        let builder = TreeBuilder::new(&store);
        let first = builder.build("pages").unwrap();
        let second = builder.build("pages").unwrap();

        assert_eq!(first, second);
    }
}
