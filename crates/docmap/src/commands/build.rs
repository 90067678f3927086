//! `docmap build` command implementation.

use std::path::PathBuf;

use clap::Args;
use docmap_config::{CliSettings, Config};
use docmap_storage::FsStore;
use docmap_tree::{publish, TreeBuilder};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Content-store root directory (overrides config).
    #[arg(short, long)]
    root_dir: Option<PathBuf>,

    /// Store-relative content directory to walk (overrides config).
    #[arg(long)]
    content_dir: Option<String>,

    /// Ordering manifest filename (overrides config).
    #[arg(long)]
    manifest_name: Option<String>,

    /// Store-relative artifact output path (overrides config).
    #[arg(short, long)]
    artifact_path: Option<String>,

    /// Path to configuration file (default: auto-discover docmap.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            root_dir: self.root_dir.clone(),
            content_dir: self.content_dir.clone(),
            manifest_name: self.manifest_name.clone(),
            artifact_path: self.artifact_path.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let build = &config.build_resolved;

        output.info(&format!("Source: {}", build.root_dir.display()));
        output.info(&format!(
            "Artifact: {}",
            build.root_dir.join(&build.artifact_path).display()
        ));

        let store = FsStore::new(build.root_dir.clone());
        let tree = TreeBuilder::new(&store)
            .with_manifest_name(&build.manifest_name)
            .build(&build.content_dir)?;

        if tree.is_empty() {
            output.warning("Content directory produced an empty tree");
        }

        publish(&store, &tree, &build.artifact_path)?;

        output.success(&format!(
            "Navigation tree published to {}",
            build.artifact_path
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use docmap_storage::ContentStore;

    use super::*;

    fn write(root: &std::path::Path, rel: &str, text: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, text).unwrap();
    }

    #[test]
    fn test_execute_publishes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "pages/overview.md", "# Overview\n");
        write(dir.path(), "pages/map.yml", "Guides:\n  - overview.md\n");

        let args = BuildArgs {
            root_dir: Some(dir.path().to_path_buf()),
            content_dir: None,
            manifest_name: None,
            artifact_path: None,
            config: None,
            verbose: false,
        };
        args.execute().unwrap();

        let store = FsStore::new(dir.path());
        let artifact = store.read("structure.json").unwrap();
        assert!(artifact.contains("\"Guides\""));
        assert!(artifact.contains("\"overview.md\""));
    }

    #[test]
    fn test_execute_fails_on_missing_root() {
        let dir = tempfile::tempdir().unwrap();

        let args = BuildArgs {
            root_dir: Some(dir.path().to_path_buf()),
            content_dir: Some("missing".to_owned()),
            manifest_name: None,
            artifact_path: None,
            config: None,
            verbose: false,
        };
        let err = args.execute().unwrap_err();

        assert!(matches!(err, CliError::Build(_)));
        assert!(!dir.path().join("structure.json").exists());
    }
}
