//! Configuration file support for envsubst.
//!
//! Settings are layered: defaults < config file < command-line arguments. Unknown
//! fields in the file are ignored.

use etcetera::BaseStrategy;
use std::path::{Path, PathBuf};

use crate::args::CommandLineArgs;

/// Root configuration structure.
#[derive(Debug, Default, Clone, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Treat unset variables as unset rather than empty.
    pub strict: Option<bool>,
}

/// The effective settings for a run, after merging all layers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    /// Whether unset variables are reported as unset.
    pub strict: bool,
}

impl Config {
    /// Merges the configuration with command-line arguments.
    #[must_use]
    pub fn to_settings(&self, args: &CommandLineArgs) -> Settings {
        Settings {
            strict: merge_bool_setting(args.strict, false, self.strict),
        }
    }
}

/// Priority: CLI (if it differs from its default) > config file > default.
const fn merge_bool_setting(
    cli_value: bool,
    cli_default: bool,
    config_value: Option<bool>,
) -> bool {
    if cli_value != cli_default {
        cli_value
    } else if let Some(config) = config_value {
        config
    } else {
        cli_default
    }
}

/// Result of attempting to load a configuration file.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration, or default if loading failed.
    pub config: Config,

    /// The path that was used (or attempted) for loading.
    pub path: Option<PathBuf>,

    /// Any error that occurred during loading.
    pub error: Option<ConfigLoadError>,

    /// Whether the path was explicitly provided by the user (via `--config`).
    /// If true and there's an error, the run should fail rather than continue.
    pub explicit_path: bool,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    Io(#[source] std::io::Error),

    /// Failed to parse the TOML content.
    #[error("failed to parse config file: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Returns the default configuration file path for the current platform, or `None`
/// if the platform's config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    let strategy = etcetera::choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("envsubst").join("config.toml"))
}

/// Loads configuration from the specified path. `explicit_path` is left `false`.
pub fn load_from_path(path: &Path) -> ConfigLoadResult {
    let loaded = std::fs::read_to_string(path)
        .map_err(ConfigLoadError::Io)
        .and_then(|content| toml::from_str::<Config>(&content).map_err(ConfigLoadError::Parse));

    let (config, error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    ConfigLoadResult {
        config,
        path: Some(path.to_path_buf()),
        error,
        explicit_path: false,
    }
}

/// Loads configuration based on the provided options.
///
/// # Arguments
///
/// * `disabled` - If true, skip loading and return defaults
/// * `explicit_path` - If provided, use this path instead of the default
pub fn load_config(disabled: bool, explicit_path: Option<&Path>) -> ConfigLoadResult {
    let unloaded = |path| ConfigLoadResult {
        config: Config::default(),
        path,
        error: None,
        explicit_path: false,
    };

    if disabled {
        return unloaded(None);
    }

    let is_explicit = explicit_path.is_some();

    let path = match explicit_path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            None => return unloaded(None),
        },
    };

    // A missing default config is not an error.
    if !is_explicit && !path.exists() {
        return unloaded(Some(path));
    }

    let mut result = load_from_path(&path);
    result.explicit_path = is_explicit;
    result
}
