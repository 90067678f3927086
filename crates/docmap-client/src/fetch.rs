//! Document loading with guaranteed fallback.
//!
//! A failed fetch never surfaces to the viewer: the loader falls back
//! to the designated not-found document, and if that also fails, to an
//! inline literal, so loading always yields displayable text.

use crate::source::NOT_FOUND_DOC;

/// Inline last-resort content when even the not-found document is
/// unavailable.
pub const NOT_FOUND_TEXT: &str = "# Not Found\n # 404\n _resources not found_";

/// Error raised by a document fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The document does not exist at the given path.
    #[error("document not found: {path}")]
    NotFound {
        /// Requested source path.
        path: String,
    },

    /// The transport failed before a response was obtained.
    #[error("failed to fetch {path}: {reason}")]
    Transport {
        /// Requested source path.
        path: String,
        /// Underlying failure description.
        reason: String,
    },
}

/// Retrieves raw document text by source path.
///
/// Implementations wrap whatever transport serves documents (HTTP in a
/// browser host, the filesystem in tests).
pub trait DocumentFetcher {
    /// Fetch the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the document cannot be retrieved.
    fn fetch(&self, path: &str) -> Result<String, FetchError>;
}

/// Where a loaded document's text actually came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The requested document.
    Primary,
    /// The designated not-found document.
    NotFoundPage,
    /// The inline literal, after both fetches failed.
    Inline,
}

/// A document delivered by [`load_with_fallback`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedDocument {
    /// Raw document text.
    pub text: String,
    /// Source path the text was served from.
    pub source: String,
    /// Which rung of the fallback chain produced the text.
    pub outcome: LoadOutcome,
}

/// Load a document, falling back through the not-found chain.
///
/// This function cannot fail; the worst case is the inline literal.
pub fn load_with_fallback(fetcher: &dyn DocumentFetcher, path: &str) -> LoadedDocument {
    match fetcher.fetch(path) {
        Ok(text) => LoadedDocument {
            text,
            source: path.to_owned(),
            outcome: LoadOutcome::Primary,
        },
        Err(err) => {
            tracing::warn!(path, error = %err, "document fetch failed, loading not-found page");
            match fetcher.fetch(NOT_FOUND_DOC) {
                Ok(text) => LoadedDocument {
                    text,
                    source: NOT_FOUND_DOC.to_owned(),
                    outcome: LoadOutcome::NotFoundPage,
                },
                Err(err) => {
                    tracing::warn!(error = %err, "not-found page unavailable, using inline text");
                    LoadedDocument {
                        text: NOT_FOUND_TEXT.to_owned(),
                        source: NOT_FOUND_DOC.to_owned(),
                        outcome: LoadOutcome::Inline,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    struct MapFetcher {
        docs: HashMap<String, String>,
    }

    impl MapFetcher {
        fn new(docs: &[(&str, &str)]) -> Self {
            Self {
                docs: docs
                    .iter()
                    .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                    .collect(),
            }
        }
    }

    impl DocumentFetcher for MapFetcher {
        fn fetch(&self, path: &str) -> Result<String, FetchError> {
            self.docs.get(path).cloned().ok_or_else(|| FetchError::NotFound {
                path: path.to_owned(),
            })
        }
    }

    #[test]
    fn test_primary_document_loads() {
        let fetcher = MapFetcher::new(&[("pages/a.md", "# A")]);

        let loaded = load_with_fallback(&fetcher, "pages/a.md");

        assert_eq!(loaded.outcome, LoadOutcome::Primary);
        assert_eq!(loaded.text, "# A");
        assert_eq!(loaded.source, "pages/a.md");
    }

    #[test]
    fn test_missing_document_falls_back_to_not_found_page() {
        let fetcher = MapFetcher::new(&[(NOT_FOUND_DOC, "# Missing")]);

        let loaded = load_with_fallback(&fetcher, "pages/gone.md");

        assert_eq!(loaded.outcome, LoadOutcome::NotFoundPage);
        assert_eq!(loaded.text, "# Missing");
        assert_eq!(loaded.source, NOT_FOUND_DOC);
    }

    #[test]
    fn test_double_failure_yields_inline_text() {
        let fetcher = MapFetcher::new(&[]);

        let loaded = load_with_fallback(&fetcher, "pages/gone.md");

        assert_eq!(loaded.outcome, LoadOutcome::Inline);
        assert_eq!(loaded.text, NOT_FOUND_TEXT);
    }
}
