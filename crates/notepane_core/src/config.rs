//! Organizer configuration.
//!
//! # Responsibility
//! - Describe logging, default header labels, and catalog source.
//! - Load configuration from a JSON file with every field defaulted.
//!
//! # Invariants
//! - Header defaults are never blank after `validate()`.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_SECTION_HEADER: &str = "Sections";
const DEFAULT_PAGE_HEADER: &str = "Pages";

/// Errors from configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// Config JSON is malformed.
    Parse(serde_json::Error),
    /// A header default is blank.
    BlankHeader(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::BlankHeader(field) => write!(f, "header `{field}` must not be blank"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::BlankHeader(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Logging settings passed to `init_logging`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`.
    pub level: String,
    /// Absolute log directory. `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

/// Header labels shown when no notebook/section is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderDefaults {
    pub sections: String,
    pub pages: String,
}

impl Default for HeaderDefaults {
    fn default() -> Self {
        Self {
            sections: DEFAULT_SECTION_HEADER.to_string(),
            pages: DEFAULT_PAGE_HEADER.to_string(),
        }
    }
}

/// Top-level organizer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizerConfig {
    pub logging: LoggingConfig,
    pub headers: HeaderDefaults,
    /// JSON catalog replacing the built-in placeholder content.
    pub catalog_path: Option<PathBuf>,
}

impl OrganizerConfig {
    /// Parses configuration from JSON text and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(json.as_str())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.headers.sections.trim().is_empty() {
            return Err(ConfigError::BlankHeader("sections"));
        }
        if self.headers.pages.trim().is_empty() {
            return Err(ConfigError::BlankHeader("pages"));
        }
        Ok(())
    }
}
