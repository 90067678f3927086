//! Mock store implementation for testing.
//!
//! Provides [`MockStore`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::RwLock;

use crate::store::{ContentStore, Entry, EntryKind, StoreError};

fn injected(kind: &str) -> std::io::Error {
    std::io::Error::other(format!("injected {kind} failure"))
}

/// In-memory content store for testing.
///
/// Files registered with [`with_file`](Self::with_file) implicitly create
/// their ancestor directories, so listings behave like a real tree.
/// Failures can be injected per path to exercise error handling.
///
/// # Example
///
/// ```ignore
/// use docmap_storage::{ContentStore, MockStore};
///
/// let store = MockStore::new()
///     .with_file("pages/overview.md", "# Overview")
///     .with_file("pages/setup.md", "# Setup");
///
/// assert_eq!(store.list("pages").unwrap().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockStore {
    files: RwLock<BTreeMap<String, String>>,
    dirs: BTreeSet<String>,
    fail_list: HashSet<String>,
    fail_read: HashSet<String>,
}

impl MockStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the ancestor directories of a path.
    fn register_ancestors(&mut self, path: &str) {
        for (i, _) in path.match_indices('/') {
            self.dirs.insert(path[..i].to_owned());
        }
    }

    /// Add a file with the given content, creating ancestor directories.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        self.register_ancestors(&path);
        self.files.write().unwrap().insert(path, content.into());
        self
    }

    /// Add an empty directory, creating ancestor directories.
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.register_ancestors(&path);
        self.dirs.insert(path);
        self
    }

    /// Make listing the given path fail.
    #[must_use]
    pub fn with_listing_error(mut self, path: impl Into<String>) -> Self {
        self.fail_list.insert(path.into());
        self
    }

    /// Make reading the given path fail.
    #[must_use]
    pub fn with_read_error(mut self, path: impl Into<String>) -> Self {
        self.fail_read.insert(path.into());
        self
    }

    /// Content written through [`ContentStore::write`], if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn written(&self, path: &str) -> Option<String> {
        self.files.read().unwrap().get(path).cloned()
    }

    /// True if `candidate` is a direct child of `dir`.
    fn is_direct_child(dir: &str, candidate: &str) -> bool {
        let rest = if dir.is_empty() {
            candidate
        } else {
            match candidate.strip_prefix(dir).and_then(|r| r.strip_prefix('/')) {
                Some(rest) => rest,
                None => return false,
            }
        };
        !rest.is_empty() && !rest.contains('/')
    }

    fn child_name(dir: &str, path: &str) -> String {
        if dir.is_empty() {
            path.to_owned()
        } else {
            path[dir.len() + 1..].to_owned()
        }
    }
}

impl ContentStore for MockStore {
    fn list(&self, path: &str) -> Result<Vec<Entry>, StoreError> {
        if self.fail_list.contains(path) {
            return Err(StoreError::Listing {
                path: path.to_owned(),
                source: injected("listing"),
            });
        }

        let files = self.files.read().unwrap();
        let known = path.is_empty() || self.dirs.contains(path);
        if !known {
            return Err(StoreError::Listing {
                path: path.to_owned(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
            });
        }

        let mut entries: Vec<Entry> = self
            .dirs
            .iter()
            .filter(|d| Self::is_direct_child(path, d))
            .map(|d| Entry::new(Self::child_name(path, d), d.clone(), EntryKind::Dir))
            .chain(
                files
                    .keys()
                    .filter(|f| Self::is_direct_child(path, f))
                    .map(|f| Entry::new(Self::child_name(path, f), f.clone(), EntryKind::File)),
            )
            .collect();

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, path: &str) -> Result<String, StoreError> {
        if self.fail_read.contains(path) {
            return Err(StoreError::Read {
                path: path.to_owned(),
                source: injected("read"),
            });
        }

        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::Read {
                path: path.to_owned(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            })
    }

    fn write(&self, path: &str, text: &str) -> Result<(), StoreError> {
        self.files
            .write()
            .unwrap()
            .insert(path.to_owned(), text.to_owned());
        Ok(())
    }
}
