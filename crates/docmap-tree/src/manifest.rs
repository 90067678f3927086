//! Per-directory ordering manifest.
//!
//! A manifest (`map.yml`) is a human-edited YAML mapping from category
//! name to an ordered list of child names, scoped to one directory.
//! Absence is legal and means "no manifest": every item in the directory
//! is then unassigned.

use serde_yaml::Value;

/// Well-known manifest file name.
pub const MANIFEST_FILE: &str = "map.yml";

/// Error raised when a manifest cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The content is not valid YAML.
    #[error("invalid manifest YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document root is not a mapping.
    #[error("manifest root must map category names to child lists")]
    NotAMapping,

    /// A category key is not a plain string.
    #[error("manifest category names must be strings")]
    NonStringCategory,

    /// A category value is not a sequence of strings.
    #[error("category {0:?} must be a sequence of child names")]
    InvalidCategory(String),
}

/// Ordered mapping from category name to child names for one directory.
///
/// Category order and the order of names within each category are
/// preserved exactly as written in the manifest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderingManifest {
    categories: Vec<(String, Vec<String>)>,
}

impl OrderingManifest {
    /// Manifest with no categories; every directory item is unassigned.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse manifest content.
    ///
    /// An empty document parses as the empty manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] if the content is not a YAML mapping from
    /// string category names to sequences of string child names.
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        let value: Value = serde_yaml::from_str(text)?;

        if matches!(value, Value::Null) {
            return Ok(Self::empty());
        }

        let Value::Mapping(mapping) = value else {
            return Err(ManifestError::NotAMapping);
        };

        let mut categories = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let Value::String(category) = key else {
                return Err(ManifestError::NonStringCategory);
            };

            let Value::Sequence(items) = value else {
                return Err(ManifestError::InvalidCategory(category));
            };

            let mut names = Vec::with_capacity(items.len());
            for item in items {
                let Value::String(name) = item else {
                    return Err(ManifestError::InvalidCategory(category));
                };
                names.push(name);
            }
            categories.push((category, names));
        }

        Ok(Self { categories })
    }

    /// True if the manifest defines no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Categories in manifest order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }
}
