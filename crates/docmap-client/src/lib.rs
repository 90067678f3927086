//! Client-side navigation engine.
//!
//! Consumes the published navigation tree and drives the reader UI as a
//! headless state machine: the [`Router`] resolves user-facing paths to
//! document sources, loads them with a guaranteed not-found fallback,
//! renders them through `docmap-markup`, and keeps the sidebar
//! highlight in sync. Hosts bind the model to an actual DOM and feed
//! events back in.

mod fetch;
mod naming;
mod router;
mod sidebar;
mod source;

pub use fetch::{load_with_fallback, DocumentFetcher, FetchError, LoadOutcome, LoadedDocument, NOT_FOUND_TEXT};
pub use naming::sanitize_name;
pub use router::{History, HostMode, NavigationState, Phase, Router, ViewState};
pub use sidebar::{Sidebar, SidebarItem, SidebarKind, DEFAULT_MAX_DEPTH};
pub use source::{find_category, resolve_source, NOT_FOUND_DOC, WELCOME_DOC};
