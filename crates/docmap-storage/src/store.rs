//! Store trait and error types.
//!
//! Provides the core [`ContentStore`] trait for abstracting directory
//! listing and document retrieval, along with [`StoreError`] for unified
//! error handling across backends.

/// Kind of a listed directory entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Dir,
}

/// A single entry returned by [`ContentStore::list`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Bare entry name (e.g., `"overview.md"`).
    pub name: String,
    /// Full store-relative path (e.g., `"pages/tutorials/overview.md"`).
    pub path: String,
    /// Whether the entry is a file or a directory.
    pub kind: EntryKind,
}

impl Entry {
    /// Create a new entry.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
        }
    }
}

/// Error raised by content-store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Listing a directory failed.
    #[error("failed to list {path}: {source}")]
    Listing {
        /// Store-relative path of the directory.
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading a document failed.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Store-relative path of the document.
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing a document failed.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Store-relative path of the document.
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The path escapes the store root or is otherwise malformed.
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

impl StoreError {
    /// Store-relative path the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Listing { path, .. }
            | Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::InvalidPath(path) => path,
        }
    }

    /// True if the underlying cause was a missing file or directory.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Listing { source, .. } | Self::Read { source, .. } | Self::Write { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            Self::InvalidPath(_) => false,
        }
    }
}

/// Content-store abstraction for directory listing and document access.
///
/// Implementations map store-relative paths to their internal format and
/// must return [`Entry`] listings in a deterministic order.
pub trait ContentStore: Send + Sync {
    /// List the entries of a directory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Listing`] if the directory cannot be read.
    fn list(&self, path: &str) -> Result<Vec<Entry>, StoreError>;

    /// Read a document as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the document does not exist or
    /// cannot be decoded.
    fn read(&self, path: &str) -> Result<String, StoreError>;

    /// Write a document, replacing any existing content.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the document cannot be written.
    fn write(&self, path: &str, text: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_new() {
        let entry = Entry::new("overview.md", "pages/overview.md", EntryKind::File);

        assert_eq!(entry.name, "overview.md");
        assert_eq!(entry.path, "pages/overview.md");
        assert_eq!(entry.kind, EntryKind::File);
    }

    #[test]
    fn test_error_path_accessor() {
        let err = StoreError::Listing {
            path: "pages".to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };

        assert_eq!(err.path(), "pages");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_error_not_found_only_for_missing() {
        let err = StoreError::Read {
            path: "pages/a.md".to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert!(!err.is_not_found());
        assert!(!StoreError::InvalidPath("../x".to_owned()).is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::Read {
            path: "pages/a.md".to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };

        assert_eq!(err.to_string(), "failed to read pages/a.md: no such file");
    }

    #[test]
    fn test_store_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StoreError>();
    }
}
