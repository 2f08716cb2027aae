//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/coursemap/coursemap.toml`
//! 3. Local config: `<dir>/.coursemap.toml` (usually the working directory)
//! 4. Environment variables: `COURSEMAP_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, DEFAULT_DELIMITER};

/// Unified configuration for coursemap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Field delimiter of course records (default: `,`)
    pub delimiter: char,
    /// Course file used when a command does not name one
    pub data_file: Option<PathBuf>,
    /// Upper-case course numbers typed into lookups (default: true)
    pub normalize_case: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            data_file: None,
            normalize_case: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub delimiter: Option<String>,
    pub data_file: Option<PathBuf>,
    pub normalize_case: Option<bool>,
}

/// Get the XDG config directory for coursemap.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "coursemap").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("coursemap.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".coursemap.toml")
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

/// A delimiter must be exactly one character.
pub fn parse_delimiter(value: &str) -> Result<char, ApplicationError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ApplicationError::Config {
            message: format!("delimiter must be a single character, got {:?}", value),
        }),
    }
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(data_file) = &self.data_file {
            let expanded = expand_env_vars(data_file.to_string_lossy().as_ref());
            self.data_file = Some(PathBuf::from(expanded));
        }
    }

    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Result<Self, ApplicationError> {
        let delimiter = match &overlay.delimiter {
            Some(d) => parse_delimiter(d)?,
            None => self.delimiter,
        };
        Ok(Self {
            delimiter,
            data_file: overlay
                .data_file
                .clone()
                .or_else(|| self.data_file.clone()),
            normalize_case: overlay.normalize_case.unwrap_or(self.normalize_case),
        })
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.coursemap.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(
            global_config_path().as_deref(),
            local_dir,
            Self::environment(),
        )
    }

    fn environment() -> Environment {
        Environment::with_prefix("COURSEMAP")
            .prefix_separator("_")
            .separator("__")
    }

    /// Like [`Settings::load`] with explicit sources: the global config file
    /// (`None` skips that layer) and the environment to read overrides from.
    pub fn load_from(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
        env: Environment,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_path.filter(|p| p.exists()) {
            debug!("config: global {}", global_path.display());
            let raw = load_raw_settings(global_path)?;
            current = current.merge_with(&raw)?;
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("config: local {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw)?;
            }
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current, env)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply COURSEMAP_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Some(val) = if_set(config.get_string("delimiter"))? {
            settings.delimiter = parse_delimiter(&val)?;
        }
        if let Some(val) = if_set(config.get_string("data_file"))? {
            settings.data_file = Some(PathBuf::from(val));
        }
        if let Some(val) = if_set(config.get_bool("normalize_case"))? {
            settings.normalize_case = val;
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
        r#"# coursemap configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/coursemap/coursemap.toml
#   Local:  ./.coursemap.toml
#   Env:    COURSEMAP_* environment variables (e.g. COURSEMAP_DELIMITER=";")

# Field delimiter of course records (single character)
# delimiter = ","

# Course file used when a command does not name one (~ and $VAR are expanded)
# data_file = "~/courses/catalog.csv"

# Upper-case course numbers typed into lookups
# normalize_case = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// An unset key is `None`; a value of the wrong type is an error.
fn if_set<T>(result: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}
