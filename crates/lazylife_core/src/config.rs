//! Core runtime configuration.
//!
//! # Responsibility
//! - Resolve the data directory that holds the slot database.
//! - Resolve logging level and log directory.
//!
//! # Invariants
//! - `data_dir` and `log_dir` are absolute.
//! - `log_level` is one of `trace|debug|info|warn|error`.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_DATA_DIR: &str = "LAZYLIFE_DATA_DIR";
pub const ENV_LOG_LEVEL: &str = "LAZYLIFE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "LAZYLIFE_LOG_DIR";

/// File name of the slot database inside `data_dir`.
pub const SLOT_DB_FILE_NAME: &str = "lazylife_slots.sqlite3";

const DEFAULT_DIR_NAME: &str = ".lazylife";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedLevel(String),
    RelativePath { field: &'static str, value: String },
    EmptyPath(&'static str),
    NoHomeDirectory,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(value) => write!(f, "unsupported log level `{value}`"),
            Self::RelativePath { field, value } => {
                write!(f, "{field} must be an absolute path, got `{value}`")
            }
            Self::EmptyPath(field) => write!(f, "{field} cannot be empty"),
            Self::NoHomeDirectory => write!(f, "cannot resolve a default data directory"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved settings for one application session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    pub log_level: &'static str,
    pub log_dir: PathBuf,
}

impl CoreConfig {
    /// Builds a config rooted at `data_dir`, logging into `data_dir/logs`.
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data_dir = absolute_path("data_dir", data_dir.as_ref())?;
        Ok(Self {
            log_dir: data_dir.join("logs"),
            data_dir,
            log_level: default_log_level(),
        })
    }

    /// Reads `LAZYLIFE_*` variables, falling back to `$HOME/.lazylife`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`CoreConfig::from_env`] with an injectable variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = match lookup(ENV_DATA_DIR) {
            Some(value) => PathBuf::from(value.trim()),
            None => lookup("HOME")
                .filter(|home| !home.trim().is_empty())
                .map(|home| PathBuf::from(home.trim()).join(DEFAULT_DIR_NAME))
                .ok_or(ConfigError::NoHomeDirectory)?,
        };
        let mut config = Self::with_data_dir(data_dir)?;

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level =
                normalize_level(&level).ok_or(ConfigError::UnsupportedLevel(level))?;
        }
        if let Some(log_dir) = lookup(ENV_LOG_DIR) {
            config.log_dir = absolute_path("log_dir", Path::new(log_dir.trim()))?;
        }
        Ok(config)
    }

    /// Full path of the slot database file.
    pub fn slot_db_path(&self) -> PathBuf {
        self.data_dir.join(SLOT_DB_FILE_NAME)
    }
}

/// Maps a user-supplied level name to its canonical spelling.
pub fn normalize_level(level: &str) -> Option<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" | "warning" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

fn absolute_path(field: &'static str, path: &Path) -> Result<PathBuf, ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::EmptyPath(field));
    }
    if !path.is_absolute() {
        return Err(ConfigError::RelativePath {
            field,
            value: path.display().to_string(),
        });
    }
    Ok(path.to_path_buf())
}
