//! Content-store abstraction for the docmap pipeline.
//!
//! The structure builder and the client engine both talk to a content store
//! through the [`ContentStore`] trait rather than to a concrete backend.
//! This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Backend flexibility** (local filesystem, source-hosting API)
//! - **Clean separation** between tree-building logic and I/O
//!
//! # Path convention
//!
//! All path parameters are store-relative, `/`-separated strings:
//! - `"pages"` - the content root directory
//! - `"pages/tutorials"` - a nested directory
//! - `"pages/tutorials/overview.md"` - a document
//!
//! # Example
//!
//! ```ignore
//! use docmap_storage::{ContentStore, FsStore};
//!
//! let store = FsStore::new("site");
//! for entry in store.list("pages")? {
//!     println!("{} ({:?})", entry.path, entry.kind);
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod store;

pub use fs::FsStore;
#[cfg(feature = "mock")]
pub use mock::MockStore;
pub use store::{ContentStore, Entry, EntryKind, StoreError};
