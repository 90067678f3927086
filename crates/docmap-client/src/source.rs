//! User-facing path resolution.
//!
//! Maps the path the viewer sees in the URL to the concrete document
//! source behind it: explicit `.md` paths pass through, a small alias
//! table covers the fixed asset pages, and everything else lands under
//! the content root.

use docmap_tree::TreeNode;

/// Document shown for the empty/home path.
pub const WELCOME_DOC: &str = "assets/welcome.md";

/// Designated not-found document.
pub const NOT_FOUND_DOC: &str = "assets/404.md";

/// Resolve a user-facing path to a document source path.
///
/// Leading and trailing slashes are dropped and duplicate slashes
/// collapsed, so `//guides/setup/` and `guides/setup` resolve
/// identically.
#[must_use]
pub fn resolve_source(path: &str) -> String {
    let path = path.trim_matches('/');
    if path.ends_with(".md") {
        return collapse_slashes(path);
    }

    let source = match path {
        "privacy" => "assets/privacy.md".to_owned(),
        "contact" => "assets/contact.md".to_owned(),
        "404" | "404.html" => NOT_FOUND_DOC.to_owned(),
        "markdown" => "assets/markdown.md".to_owned(),
        "" | "home" | "index.html" => WELCOME_DOC.to_owned(),
        other => format!("pages/{other}.md"),
    };
    collapse_slashes(&source)
}

/// Find the top-level tree node a path belongs to, by its first
/// non-empty path segment.
#[must_use]
pub fn find_category<'a>(tree: &'a [TreeNode], path: &str) -> Option<&'a TreeNode> {
    let mut segments = path.split('/');
    let first = segments.next().unwrap_or("");
    let key = if first.is_empty() {
        segments.next().unwrap_or("")
    } else {
        first
    };
    tree.iter().find(|node| node.name == key)
}

fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_was_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !previous_was_slash {
                out.push(c);
            }
            previous_was_slash = true;
        } else {
            out.push(c);
            previous_was_slash = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_explicit_md_path_passes_through() {
        assert_eq!(resolve_source("assets/privacy.md"), "assets/privacy.md");
        assert_eq!(resolve_source("pages/guide.md"), "pages/guide.md");
    }

    #[test]
    fn test_aliases_map_to_assets() {
        assert_eq!(resolve_source("privacy"), "assets/privacy.md");
        assert_eq!(resolve_source("contact"), "assets/contact.md");
        assert_eq!(resolve_source("404"), NOT_FOUND_DOC);
        assert_eq!(resolve_source("404.html"), NOT_FOUND_DOC);
        assert_eq!(resolve_source("markdown"), "assets/markdown.md");
    }

    #[test]
    fn test_home_aliases() {
        assert_eq!(resolve_source(""), WELCOME_DOC);
        assert_eq!(resolve_source("home"), WELCOME_DOC);
        assert_eq!(resolve_source("index.html"), WELCOME_DOC);
        assert_eq!(resolve_source("/"), WELCOME_DOC);
    }

    #[test]
    fn test_default_maps_under_content_root() {
        assert_eq!(resolve_source("guides/setup"), "pages/guides/setup.md");
        assert_eq!(resolve_source("/guides/setup"), "pages/guides/setup.md");
    }

    #[test]
    fn test_trailing_slashes_dropped() {
        assert_eq!(resolve_source("guides/setup/"), "pages/guides/setup.md");
        assert_eq!(resolve_source("/guides/setup//"), "pages/guides/setup.md");
        assert_eq!(resolve_source("pages/guide.md/"), "pages/guide.md");
        assert_eq!(resolve_source("home/"), WELCOME_DOC);
    }

    #[test]
    fn test_duplicate_slashes_collapsed() {
        assert_eq!(resolve_source("guides//setup"), "pages/guides/setup.md");
        assert_eq!(resolve_source("//pages//a.md"), "pages/a.md");
    }

    #[test]
    fn test_find_category_by_first_segment() {
        let tree = vec![TreeNode::category("Guides"), TreeNode::category("API")];

        assert_eq!(find_category(&tree, "Guides/setup").unwrap().name, "Guides");
        assert_eq!(find_category(&tree, "/API/auth").unwrap().name, "API");
        assert!(find_category(&tree, "missing/x").is_none());
    }
}
