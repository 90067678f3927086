//! Filesystem store implementation.
//!
//! Provides [`FsStore`] for reading content from a local directory tree,
//! mirroring the layout a source-hosting API would expose.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::store::{ContentStore, Entry, EntryKind, StoreError};

/// Filesystem-backed content store.
///
/// Store-relative paths are resolved against a root directory. Listings
/// are sorted by name so repeated builds over the same tree are
/// deterministic regardless of the platform's directory order. Hidden
/// entries (names starting with `.`) are skipped.
///
/// # Example
///
/// ```ignore
/// use docmap_storage::{ContentStore, FsStore};
///
/// let store = FsStore::new("site");
/// let entries = store.list("pages")?;
/// ```
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a new filesystem store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Validate that a path doesn't escape the store root.
    ///
    /// Rejects paths containing parent directory components (`..`).
    fn validate(path: &str) -> Result<(), StoreError> {
        let has_parent_dir = Path::new(path)
            .components()
            .any(|c| matches!(c, Component::ParentDir));

        if has_parent_dir {
            return Err(StoreError::InvalidPath(path.to_owned()));
        }
        Ok(())
    }

    /// Resolve a store-relative path against the root directory.
    fn resolve(&self, path: &str) -> PathBuf {
        if path.is_empty() {
            self.root.clone()
        } else {
            self.root.join(path)
        }
    }
}

impl ContentStore for FsStore {
    fn list(&self, path: &str) -> Result<Vec<Entry>, StoreError> {
        Self::validate(path)?;

        let dir = self.resolve(path);
        let read_dir = fs::read_dir(&dir).map_err(|source| StoreError::Listing {
            path: path.to_owned(),
            source,
        })?;

        let mut entries = Vec::new();
        for item in read_dir {
            let item = item.map_err(|source| StoreError::Listing {
                path: path.to_owned(),
                source,
            })?;

            let name = item.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let kind = match item.file_type() {
                Ok(t) if t.is_dir() => EntryKind::Dir,
                Ok(t) if t.is_file() => EntryKind::File,
                // Symlinks and other special entries are not content.
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(name, error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            let entry_path = if path.is_empty() {
                name.clone()
            } else {
                format!("{path}/{name}")
            };
            entries.push(Entry::new(name, entry_path, kind));
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, path: &str) -> Result<String, StoreError> {
        Self::validate(path)?;

        fs::read_to_string(self.resolve(path)).map_err(|source| StoreError::Read {
            path: path.to_owned(),
            source,
        })
    }

    fn write(&self, path: &str, text: &str) -> Result<(), StoreError> {
        Self::validate(path)?;

        let target = self.resolve(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: path.to_owned(),
                source,
            })?;
        }
        fs::write(&target, text).map_err(|source| StoreError::Write {
            path: path.to_owned(),
            source,
        })
    }
}
