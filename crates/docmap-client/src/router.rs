//! Navigation state machine.
//!
//! Drives the client: every navigation event (sidebar click, category
//! switch, browser back/forward) re-enters the loading phase, resolves
//! the target to a document source, syncs the visible URL, loads and
//! renders the document, and re-highlights the sidebar. All state is
//! explicit on the router; nothing ambient is shared between calls.
//!
//! Navigation is synchronous here, but a host that overlaps fetches
//! gets no ordering guarantee: a slow earlier response can overwrite a
//! newer one. Known race, accepted as-is.

use docmap_markup::{parse_document, render, Language, RenderContext, RenderedDocument};
use docmap_tree::TreeNode;

use crate::fetch::{load_with_fallback, DocumentFetcher, NOT_FOUND_TEXT};
use crate::sidebar::{Sidebar, DEFAULT_MAX_DEPTH};
use crate::source::{find_category, resolve_source};

/// Router lifecycle phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// No document requested yet.
    #[default]
    Idle,
    /// A navigation is resolving.
    Loading,
    /// The last navigation produced a rendered document.
    Rendered,
}

/// Which URL-sync strategy the host environment calls for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostMode {
    /// Local development: query-parameter URLs, replaced in place.
    Local,
    /// Production: path URLs, pushed as history entries.
    Production,
}

/// Host history abstraction. Browser hosts bind this to the History
/// API; tests record calls.
pub trait History {
    /// Replace the current entry.
    fn replace(&mut self, url: &str);
    /// Push a new entry.
    fn push(&mut self, url: &str);
}

/// Current navigation state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationState {
    /// Source path of the displayed document.
    pub current_path: Option<String>,
    /// Name of the active top-level category.
    pub current_category: Option<String>,
    /// Lifecycle phase.
    pub phase: Phase,
}

/// Per-document interactive view state, reset on every navigation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Carousel image currently popped out, if any.
    pub popped_image: Option<String>,
    /// Crumb tray button currently active, if any.
    pub active_crumb: Option<String>,
}

impl ViewState {
    /// Toggle pop-out for a carousel image. Selecting an image clears
    /// any other popped image first; selecting it again pops it back.
    pub fn toggle_pop_out(&mut self, image: &str) {
        if self.popped_image.as_deref() == Some(image) {
            self.popped_image = None;
        } else {
            self.popped_image = Some(image.to_owned());
        }
    }

    /// Mark a crumb button active.
    pub fn activate_crumb(&mut self, id: &str) {
        self.active_crumb = Some(id.to_owned());
    }
}

/// The client router.
pub struct Router<F, H> {
    tree: Vec<TreeNode>,
    fetcher: F,
    history: H,
    host: HostMode,
    sidebar: Sidebar,
    state: NavigationState,
    view: ViewState,
    language: Language,
    max_depth: usize,
}

impl<F: DocumentFetcher, H: History> Router<F, H> {
    /// Create a router over an already-deserialized tree.
    #[must_use]
    pub fn new(tree: Vec<TreeNode>, fetcher: F, history: H, host: HostMode) -> Self {
        Self {
            tree,
            fetcher,
            history,
            host,
            sidebar: Sidebar::default(),
            state: NavigationState::default(),
            view: ViewState::default(),
            language: Language::Js,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Create a router from the published artifact document.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error if the artifact is malformed.
    pub fn from_artifact(
        json: &str,
        fetcher: F,
        history: H,
        host: HostMode,
    ) -> Result<Self, serde_json::Error> {
        let tree: Vec<TreeNode> = serde_json::from_str(json)?;
        Ok(Self::new(tree, fetcher, history, host))
    }

    /// Set the sidebar recursion cap.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the initial code-group language.
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// First load: pick the target from the URL query parameter if one
    /// is present, otherwise go home. Selects the category the target
    /// belongs to (falling back to the first top-level node), builds
    /// the sidebar, and navigates.
    pub fn initial_load(&mut self, query_path: Option<&str>) -> RenderedDocument {
        let target = query_path.unwrap_or("home").to_owned();

        let category = find_category(&self.tree, &target)
            .or_else(|| self.tree.first())
            .map(|node| node.name.clone());
        if let Some(name) = category {
            self.activate_category(&name);
        }

        self.navigate(&target)
    }

    /// Navigate to a user-facing path: sync the URL, resolve and load
    /// the document, render it, and re-highlight the sidebar.
    pub fn navigate(&mut self, dest: &str) -> RenderedDocument {
        self.state.phase = Phase::Loading;
        self.sync_url(dest);

        let source = resolve_source(dest);
        self.state.current_path = Some(source.clone());

        let rendered = self.load_and_render(&source);
        self.sidebar.highlight(&source);
        self.view = ViewState::default();
        self.state.phase = Phase::Rendered;
        rendered
    }

    /// Browser back/forward: re-resolve exactly as a sidebar click
    /// would.
    pub fn pop_state(&mut self, path: &str) -> RenderedDocument {
        self.navigate(path)
    }

    /// Switch the active top-level category, rebuilding the sidebar
    /// from its children and re-running the highlight for the current
    /// path. Returns false when no such category exists.
    pub fn switch_category(&mut self, name: &str) -> bool {
        if !self.tree.iter().any(|node| node.name == name) {
            return false;
        }
        self.activate_category(name);
        true
    }

    /// Change the code-group language and re-render the current
    /// document under it, if one is displayed.
    pub fn set_language(&mut self, language: Language) -> Option<RenderedDocument> {
        self.language = language;
        let source = self.state.current_path.clone()?;
        Some(self.load_and_render(&source))
    }

    /// Current navigation state.
    #[must_use]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Sidebar model.
    #[must_use]
    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    /// Mutable sidebar access, for user toggle clicks.
    pub fn sidebar_mut(&mut self) -> &mut Sidebar {
        &mut self.sidebar
    }

    /// Per-document view state.
    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    /// Top-level category names, in tree order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.tree.iter().map(|node| node.name.as_str()).collect()
    }

    fn activate_category(&mut self, name: &str) {
        let children = self
            .tree
            .iter()
            .find(|node| node.name == name)
            .map(|node| node.children.as_slice())
            .unwrap_or_default();
        self.sidebar = Sidebar::build(children, self.max_depth);
        self.state.current_category = Some(name.to_owned());

        if let Some(path) = self.state.current_path.clone() {
            self.sidebar.highlight(&path);
        }
    }

    /// Map the destination to a visible URL and sync it: local hosts
    /// replace the entry with a query-parameter form, production pushes
    /// a path entry.
    fn sync_url(&mut self, dest: &str) {
        let loc = dest
            .strip_prefix("pages/")
            .map(|rest| rest.strip_suffix(".md").unwrap_or(rest))
            .unwrap_or(dest);
        let trimmed = loc.trim_start_matches('/').trim_end_matches('/');

        match self.host {
            HostMode::Local => self.history.replace(&format!("index.html?path={trimmed}")),
            HostMode::Production => self.history.push(&format!("/{trimmed}")),
        }
    }

    fn load_and_render(&mut self, source: &str) -> RenderedDocument {
        let loaded = load_with_fallback(&self.fetcher, source);
        let ctx = RenderContext {
            language: self.language,
        };

        match parse_document(&loaded.text) {
            Ok(parsed) => render(&parsed, &ctx),
            Err(err) => {
                tracing::warn!(source, error = %err, "document failed to parse, showing not-found");
                let fallback = parse_document(NOT_FOUND_TEXT)
                    .unwrap_or_default();
                render(&fallback, &ctx)
            }
        }
    }
}
