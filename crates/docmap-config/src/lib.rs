//! Configuration management for docmap.
//!
//! Parses `docmap.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! String configuration values in the `[build]` section support
//! `${VAR}` environment variable expansion.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docmap.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the content-store root directory.
    pub root_dir: Option<PathBuf>,
    /// Override the store-relative content directory.
    pub content_dir: Option<String>,
    /// Override the ordering manifest filename.
    pub manifest_name: Option<String>,
    /// Override the artifact output path.
    pub artifact_path: Option<String>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build configuration (paths are relative strings from TOML).
    build: BuildConfigRaw,
    /// Client engine configuration.
    pub client: ClientConfig,

    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw build configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    root_dir: Option<String>,
    content_dir: Option<String>,
    manifest_name: Option<String>,
    artifact_path: Option<String>,
}

/// Resolved build configuration with an absolute store root.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildConfig {
    /// Content-store root directory.
    pub root_dir: PathBuf,
    /// Store-relative directory the tree is built from.
    pub content_dir: String,
    /// Per-directory ordering manifest filename.
    pub manifest_name: String,
    /// Store-relative artifact output path.
    pub artifact_path: String,
}

/// Language tags the client's code-group selector recognizes.
const KNOWN_LANGUAGES: [&str; 3] = ["js", "node", "python"];

/// Client engine configuration.
///
/// The build command does not consume this section; the embedding host
/// reads it and forwards the values into the router via its
/// `with_max_depth`/`with_language` builders.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Sidebar recursion cap.
    pub max_depth: usize,
    /// Initial code-group language tag (`js`, `node`, or `python`).
    pub default_language: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_depth: 20,
            default_language: "js".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`build.root_dir`").
        field: String,
        /// Error message.
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Expand `${VAR}` references in a configuration string.
fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(|expanded| expanded.into_owned())
        .map_err(|err| ConfigError::EnvVar {
            field: field.to_owned(),
            message: err.to_string(),
        })
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `docmap.toml` in the current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, so
    /// CLI arguments take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist or
    /// parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(root_dir) = &settings.root_dir {
            self.build_resolved.root_dir.clone_from(root_dir);
        }
        if let Some(content_dir) = &settings.content_dir {
            self.build_resolved.content_dir.clone_from(content_dir);
        }
        if let Some(manifest_name) = &settings.manifest_name {
            self.build_resolved.manifest_name.clone_from(manifest_name);
        }
        if let Some(artifact_path) = &settings.artifact_path {
            self.build_resolved.artifact_path.clone_from(artifact_path);
        }
    }

    /// Search for a config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to the current
    /// working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to a base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            build: BuildConfigRaw::default(),
            client: ClientConfig::default(),
            build_resolved: BuildConfig {
                root_dir: base.to_path_buf(),
                content_dir: "pages".to_owned(),
                manifest_name: "map.yml".to_owned(),
                artifact_path: "structure.json".to_owned(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.build_resolved.content_dir, "build.content_dir")?;
        require_non_empty(&self.build_resolved.manifest_name, "build.manifest_name")?;
        require_non_empty(&self.build_resolved.artifact_path, "build.artifact_path")?;

        if self.build_resolved.manifest_name.contains('/') {
            return Err(ConfigError::Validation(
                "build.manifest_name must be a bare filename".to_owned(),
            ));
        }

        if self.client.max_depth == 0 {
            return Err(ConfigError::Validation(
                "client.max_depth must be greater than 0".to_owned(),
            ));
        }

        require_non_empty(&self.client.default_language, "client.default_language")?;
        if !KNOWN_LANGUAGES.contains(&self.client.default_language.as_str()) {
            return Err(ConfigError::Validation(format!(
                "client.default_language must be one of {KNOWN_LANGUAGES:?}, got {:?}",
                self.client.default_language
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref root_dir) = self.build.root_dir {
            self.build.root_dir = Some(expand_env(root_dir, "build.root_dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths based on the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.build_resolved = BuildConfig {
            root_dir: config_dir.join(self.build.root_dir.as_deref().unwrap_or(".")),
            content_dir: self
                .build
                .content_dir
                .clone()
                .unwrap_or_else(|| "pages".to_owned()),
            manifest_name: self
                .build
                .manifest_name
                .clone()
                .unwrap_or_else(|| "map.yml".to_owned()),
            artifact_path: self
                .build
                .artifact_path
                .clone()
                .unwrap_or_else(|| "structure.json".to_owned()),
        };
    }
}
