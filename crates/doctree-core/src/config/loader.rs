//! Configuration file discovery and loading

use std::path::{Path, PathBuf};

use super::doctree_config::DocTreeConfig;
use crate::Result;
use crate::error::DocTreeError;

/// Config file names, in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &["doctree.toml", ".doctreerc.json"];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover a config file by walking up from `start_path`
    ///
    /// Looks for `doctree.toml`, then `.doctreerc.json`, in each directory
    /// until one is found or the filesystem root is reached.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| DocTreeError::config_error(format!("Invalid path: {e}")))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific `.toml` or `.json` file
    pub fn load_from_file(path: &Path) -> Result<DocTreeConfig> {
        DocTreeConfig::load(path).map_err(|e| match e {
            DocTreeError::ConfigError { message } => DocTreeError::config_error(format!(
                "Failed to load config from '{}': {message}",
                path.display()
            )),
            other => other,
        })
    }

    /// Load from an explicit path, or discover one starting at `start_dir`
    ///
    /// Unlike an explicit path, a failed discovery is not an error: the
    /// defaults are used.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<DocTreeConfig> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(DocTreeError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_file(path);
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        match Self::auto_discover(search_dir)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(DocTreeConfig::default())
            }
        }
    }
}
