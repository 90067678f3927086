//! Sidebar state.
//!
//! The sidebar mirrors the published tree: directories and categories
//! become collapsible toggles, markdown files become leaf links. The
//! model tracks open/selected flags; a host binds them to classes on
//! the rendered elements.

use docmap_tree::{NodeKind, TreeNode};

use crate::naming::sanitize_name;

/// Default recursion cap when building the sidebar.
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// File extensions shown as sidebar leaves.
const APPROVED_EXTENSIONS: &[&str] = &["md"];

/// Kind-specific state of a sidebar item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SidebarKind {
    /// Collapsible toggle for a directory or category.
    Toggle {
        /// Whether the child container is visible.
        open: bool,
        /// Child items.
        children: Vec<SidebarItem>,
    },
    /// Leaf link for a document.
    Leaf,
}

/// One sidebar entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarItem {
    /// Display label (sanitized entry name).
    pub label: String,
    /// Associated tree path, if the node carries one.
    pub path: Option<String>,
    /// Nesting depth, for indentation.
    pub depth: usize,
    /// Highlight flag set by [`Sidebar::highlight`].
    pub selected: bool,
    /// Toggle or leaf state.
    pub kind: SidebarKind,
}

/// Sidebar model built from a slice of tree nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sidebar {
    items: Vec<SidebarItem>,
}

impl Sidebar {
    /// Build a sidebar from tree nodes, capping recursion at
    /// `max_depth`. Levels beyond the cap are logged and truncated so a
    /// malformed or cyclic tree cannot loop the build forever.
    #[must_use]
    pub fn build(nodes: &[TreeNode], max_depth: usize) -> Self {
        Self {
            items: build_items(nodes, 0, max_depth),
        }
    }

    /// Top-level items.
    #[must_use]
    pub fn items(&self) -> &[SidebarItem] {
        &self.items
    }

    /// True when the sidebar has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Flip the open state of the toggle with the given path. Returns
    /// false if no such toggle exists.
    pub fn toggle(&mut self, path: &str) -> bool {
        fn visit(items: &mut [SidebarItem], path: &str) -> bool {
            for item in items {
                if let SidebarKind::Toggle { open, children } = &mut item.kind {
                    if item.path.as_deref() == Some(path) {
                        *open = !*open;
                        return true;
                    }
                    if visit(children, path) {
                        return true;
                    }
                }
            }
            false
        }
        visit(&mut self.items, path)
    }

    /// Highlight the item whose path matches `path`: the match is
    /// marked selected and every ancestor toggle is marked selected and
    /// forced open. Previous selection flags are cleared; open states
    /// from user toggling are left alone. Returns whether a match was
    /// found.
    pub fn highlight(&mut self, path: &str) -> bool {
        let path = path.trim_start_matches('/');
        clear_selection(&mut self.items);
        mark_path(&mut self.items, path)
    }
}

fn build_items(nodes: &[TreeNode], depth: usize, max_depth: usize) -> Vec<SidebarItem> {
    if depth > max_depth {
        tracing::warn!(depth, "sidebar depth cap exceeded, truncating");
        return Vec::new();
    }

    let mut items = Vec::new();
    for node in nodes {
        match node.kind {
            NodeKind::Dir | NodeKind::Category => {
                items.push(SidebarItem {
                    label: sanitize_name(&node.name),
                    path: node.path.clone(),
                    depth,
                    selected: false,
                    kind: SidebarKind::Toggle {
                        open: false,
                        children: build_items(&node.children, depth + 1, max_depth),
                    },
                });
            }
            NodeKind::File => {
                let extension = node.name.rsplit('.').next().unwrap_or("");
                if APPROVED_EXTENSIONS.contains(&extension) {
                    items.push(SidebarItem {
                        label: sanitize_name(&node.name),
                        path: node.path.clone(),
                        depth,
                        selected: false,
                        kind: SidebarKind::Leaf,
                    });
                }
            }
        }
    }
    items
}

fn clear_selection(items: &mut [SidebarItem]) {
    for item in items {
        item.selected = false;
        if let SidebarKind::Toggle { children, .. } = &mut item.kind {
            clear_selection(children);
        }
    }
}

fn mark_path(items: &mut [SidebarItem], path: &str) -> bool {
    let mut found = false;
    for item in items {
        let here = item.path.as_deref() == Some(path);
        match &mut item.kind {
            SidebarKind::Leaf => {
                if here {
                    item.selected = true;
                    found = true;
                }
            }
            SidebarKind::Toggle { open, children } => {
                let descendant = mark_path(children, path);
                if descendant {
                    item.selected = true;
                    *open = true;
                }
                if here {
                    item.selected = true;
                }
                found |= descendant || here;
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fixture_tree() -> Vec<TreeNode> {
        let mut guides = TreeNode::dir("guides", "pages/guides");
        guides
            .children
            .push(TreeNode::file("setup.md", "pages/guides/setup.md"));
        guides
            .children
            .push(TreeNode::file("notes.txt", "pages/guides/notes.txt"));

        let mut category = TreeNode::category("Basics");
        category.children.push(guides);
        category
            .children
            .push(TreeNode::file("overview.md", "pages/overview.md"));
        vec![category]
    }

    fn toggle_children(item: &SidebarItem) -> &[SidebarItem] {
        match &item.kind {
            SidebarKind::Toggle { children, .. } => children,
            SidebarKind::Leaf => panic!("expected a toggle"),
        }
    }

    fn toggle_open(item: &SidebarItem) -> bool {
        match &item.kind {
            SidebarKind::Toggle { open, .. } => *open,
            SidebarKind::Leaf => panic!("expected a toggle"),
        }
    }

    #[test]
    fn test_build_mirrors_tree_shape() {
        let sidebar = Sidebar::build(&fixture_tree(), DEFAULT_MAX_DEPTH);

        assert_eq!(sidebar.items().len(), 1);
        let category = &sidebar.items()[0];
        assert_eq!(category.label, "Basics");
        assert_eq!(category.depth, 0);
        assert_eq!(toggle_children(category).len(), 2);
        assert_eq!(toggle_children(category)[1].label, "Overview");
        assert_eq!(toggle_children(category)[1].depth, 1);
    }

    #[test]
    fn test_unapproved_extensions_excluded() {
        let sidebar = Sidebar::build(&fixture_tree(), DEFAULT_MAX_DEPTH);

        let guides = &toggle_children(&sidebar.items()[0])[0];
        let labels: Vec<_> = toggle_children(guides)
            .iter()
            .map(|item| item.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Setup"]);
    }

    #[test]
    fn test_depth_cap_truncates() {
        // Chain deeper than the cap.
        let mut node = TreeNode::dir("leafmost", "pages/leafmost");
        for i in (0..6).rev() {
            let mut parent = TreeNode::dir(format!("d{i}"), format!("pages/d{i}"));
            parent.children.push(node);
            node = parent;
        }

        let sidebar = Sidebar::build(&[node], 3);

        let mut depth = 0;
        let mut items = sidebar.items();
        while !items.is_empty() {
            depth += 1;
            items = toggle_children(&items[0]);
        }
        assert_eq!(depth, 4);
    }

    #[test]
    fn test_highlight_marks_leaf_and_ancestors() {
        let mut sidebar = Sidebar::build(&fixture_tree(), DEFAULT_MAX_DEPTH);

        assert!(sidebar.highlight("pages/guides/setup.md"));

        let category = &sidebar.items()[0];
        assert!(category.selected);
        let guides = &toggle_children(category)[0];
        assert!(guides.selected);
        assert!(toggle_open(guides));
        let leaf = &toggle_children(guides)[0];
        assert!(leaf.selected);
    }

    #[test]
    fn test_highlight_clears_previous_selection() {
        let mut sidebar = Sidebar::build(&fixture_tree(), DEFAULT_MAX_DEPTH);
        sidebar.highlight("pages/guides/setup.md");

        sidebar.highlight("pages/overview.md");

        let category = &sidebar.items()[0];
        let guides = &toggle_children(category)[0];
        assert!(!guides.selected);
        assert!(!toggle_children(guides)[0].selected);
        assert!(toggle_children(category)[1].selected);
        // Open state from the earlier highlight is untouched.
        assert!(toggle_open(guides));
    }

    #[test]
    fn test_highlight_ignores_leading_slash() {
        let mut sidebar = Sidebar::build(&fixture_tree(), DEFAULT_MAX_DEPTH);

        assert!(sidebar.highlight("/pages/overview.md"));
    }

    #[test]
    fn test_highlight_unknown_path_returns_false() {
        let mut sidebar = Sidebar::build(&fixture_tree(), DEFAULT_MAX_DEPTH);

        assert!(!sidebar.highlight("pages/missing.md"));
    }

    #[test]
    fn test_toggle_flips_open_state() {
        let mut sidebar = Sidebar::build(&fixture_tree(), DEFAULT_MAX_DEPTH);

        assert!(sidebar.toggle("pages/guides"));
        assert!(toggle_open(&toggle_children(&sidebar.items()[0])[0]));

        assert!(sidebar.toggle("pages/guides"));
        assert!(!toggle_open(&toggle_children(&sidebar.items()[0])[0]));

        assert!(!sidebar.toggle("pages/nope"));
    }
}
