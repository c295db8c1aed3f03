//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/hva/hva.toml`
//! 3. Explicit config file (`--config FILE`)
//! 4. Environment variables: `HVA_*` prefix
//!
//! The CLI applies `--state` on top of the loaded settings.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Raw settings for intermediate parsing; `None` means "not specified".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub state_file: Option<PathBuf>,
    pub pretty_snapshots: Option<bool>,
}

/// Unified configuration for hva.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Snapshot file holding the hotel between invocations
    pub state_file: PathBuf,
    /// Indent snapshot JSON
    pub pretty_snapshots: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            pretty_snapshots: true,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "hva")
}

/// `<data_dir>/hva/hotel.json`, or `./hotel.json` without a home directory.
fn default_state_file() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("hotel.json"))
        .unwrap_or_else(|| PathBuf::from("hotel.json"))
}

/// Get the XDG config directory for hva.
pub fn global_config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("hva.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}`; unknown variables leave the input as is.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            state_file: overlay
                .state_file
                .clone()
                .unwrap_or_else(|| self.state_file.clone()),
            pretty_snapshots: overlay.pretty_snapshots.unwrap_or(self.pretty_snapshots),
        }
    }

    fn expand_paths(&mut self) {
        self.state_file = expand_path(&self.state_file);
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Config file named on the command line; must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit config file
        if let Some(path) = explicit {
            let raw = load_raw_settings(&expand_path(path))?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        Ok(current)
    }

    /// Apply HVA_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("HVA").try_parsing(true))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("state_file") {
            settings.state_file = PathBuf::from(val);
        }
        match config.get_bool("pretty_snapshots") {
            Ok(val) => settings.pretty_snapshots = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# hva configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/hva/hva.toml
#   Explicit: hva --config FILE
#   Env:      HVA_STATE_FILE, HVA_PRETTY_SNAPSHOTS
#   Flag:     hva --state FILE

# Snapshot file holding the hotel between invocations
# state_file = "~/.local/share/hva/hotel.json"

# Indent snapshot JSON
# pretty_snapshots = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
