//! Config discovery for the CLI.
//!
//! An explicit `--config` path must exist. Otherwise the first existing file
//! among `taxon/config.toml` (relative to the working directory) and the
//! platform config directory is used, falling back to defaults.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use taxon::{
    TaxonError,
    config::{AppConfig, RenderConfig, RenderMode},
};

use crate::Args;

const LOCAL_CONFIG: &str = "taxon/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for TaxonError {
    fn from(err: ConfigError) -> Self {
        TaxonError::Config(err.to_string())
    }
}

/// Load the configuration named by `--config`, or the first one discovered.
///
/// # Errors
///
/// Fails when an explicit path does not exist, or when the chosen file
/// cannot be read or parsed.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, TaxonError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()).into());
        }
        return read_config(path);
    }

    match discovered().find(|path| path.exists()) {
        Some(path) => read_config(&path),
        None => {
            debug!("No configuration file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// Implicit config locations in priority order.
fn discovered() -> impl Iterator<Item = PathBuf> {
    let system = ProjectDirs::from("com", "taxon", "taxon")
        .map(|dirs| dirs.config_dir().join("config.toml"));
    if system.is_none() {
        debug!("Could not determine platform-specific config directory");
    }
    std::iter::once(PathBuf::from(LOCAL_CONFIG)).chain(system)
}

/// Apply the command-line switches on top of the loaded configuration.
///
/// Flags can only turn options on; an unset flag keeps the file's value.
pub fn apply_overrides(config: AppConfig, args: &Args) -> AppConfig {
    let current = config.render();
    let mode = if args.cluster {
        RenderMode::Cluster
    } else {
        current.mode()
    };
    let render = RenderConfig::new(
        mode,
        args.digraph || current.directed(),
        args.strict || current.strict(),
    );
    debug!(render:?; "Render options resolved");
    config.with_render(render)
}

fn read_config(path: &Path) -> Result<AppConfig, TaxonError> {
    info!(path:% = path.display(); "Loading configuration");
    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.message().to_string(),
    })?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use taxon::path::DescendantMatch;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_explicit_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[render]\nmode = \"cluster\"\n[graph]\ndescendants = \"prefix\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.render().mode(), RenderMode::Cluster);
        assert_eq!(config.graph().descendants(), DescendantMatch::Prefix);
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let dir = tempdir().unwrap();
        let err = load_config(Some(dir.path().join("absent.toml"))).unwrap_err();

        assert!(matches!(err, TaxonError::Config(msg) if msg.starts_with("Missing configuration file")));
    }

    #[test]
    fn test_invalid_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[render]\nstrict = \"yes\"\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, TaxonError::Config(msg) if msg.starts_with("Failed to parse")));
    }

    #[test]
    fn test_flags_override_file() {
        let args = Args {
            cluster: true,
            strict: true,
            ..Args::default()
        };
        let config = apply_overrides(AppConfig::default(), &args);

        assert_eq!(config.render().mode(), RenderMode::Cluster);
        assert!(config.render().strict());
        assert!(!config.render().directed());
    }

    #[test]
    fn test_unset_flags_keep_file_values() {
        let file = AppConfig::default().with_render(RenderConfig::new(RenderMode::Cluster, true, false));
        let config = apply_overrides(file, &Args::default());

        assert_eq!(config.render().mode(), RenderMode::Cluster);
        assert!(config.render().directed());
    }
}
