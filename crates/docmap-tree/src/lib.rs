//! Structure tree building for the docmap pipeline.
//!
//! Walks a hierarchical content store and produces the ordered navigation
//! tree consumed by the client engine. Ordering within each directory is
//! controlled by an optional per-directory manifest (`map.yml`) that
//! assigns children to named categories in an explicit order; items the
//! manifest does not claim are appended afterwards in lexicographic order.
//! In every sibling list an `overview*`-named item is moved to the front.
//!
//! # Example
//!
//! ```ignore
//! use docmap_storage::FsStore;
//! use docmap_tree::{TreeBuilder, to_json};
//!
//! let store = FsStore::new("site");
//! let tree = TreeBuilder::new(&store).build("pages")?;
//! let artifact = to_json(&tree)?;
//! ```

mod artifact;
mod builder;
mod manifest;
mod node;

pub use artifact::{ARTIFACT_FILE, PublishError, publish, to_json};
pub use builder::{BuildError, TreeBuilder};
pub use manifest::{MANIFEST_FILE, ManifestError, OrderingManifest};
pub use node::{NodeKind, TreeNode};
