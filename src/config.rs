//! # Configuration Profiles
//!
//! Server-specific settings live in named JSON profiles so the same command
//! line works against several servers:
//!
//! ```json
//! {
//!   "general": { "log_level": "DEBUG", "backup_directory": "backups" },
//!   "paths": { "types_file": "mpmissions/dayzOffline.chernarusplus/db/types.xml" }
//! }
//! ```
//!
//! A profile named `name` is read from `<profile dir>/<name>.json`. The
//! profile directory is, in order of precedence, the `--profile-dir` flag,
//! the `XML_KEYSYNC_PROFILE_DIR` environment variable, or
//! `<config dir>/xml-keysync/profiles`.
//!
//! Every key is optional and unknown keys are ignored, so profiles shared with
//! other server tools load without changes. A missing profile yields the empty
//! configuration; a profile that is not valid JSON is an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Name of the profile used when none is requested.
pub const DEFAULT_PROFILE: &str = "default";

/// Environment variable overriding the profile directory.
pub const PROFILE_DIR_ENV: &str = "XML_KEYSYNC_PROFILE_DIR";

/// General settings
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct General {
    /// Log level (error, warn, info, debug, trace), case-insensitive
    pub log_level: Option<String>,
    /// Directory receiving timestamped backups of overwritten files
    pub backup_directory: Option<PathBuf>,
}

/// Well-known file locations
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Paths {
    /// Default source document for `copy-values`
    pub types_file: Option<PathBuf>,
}

/// A loaded profile
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Profile {
    pub general: General,
    pub paths: Paths,
    /// Where the profile was read from, `None` for the empty configuration
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Profile {
    /// Parse a profile from JSON text.
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Profile {
            message: e.to_string(),
            hint: None,
        })
    }

    /// Load profile `name` (or the default profile) from `dir` (or the
    /// default profile directory).
    ///
    /// Returns the empty configuration when the file does not exist; check
    /// [`Profile::source`] to tell the two apart.
    pub fn load(name: Option<&str>, dir: Option<&Path>) -> Result<Self> {
        let name = name.unwrap_or(DEFAULT_PROFILE);
        let dir = match dir {
            Some(dir) => dir.to_path_buf(),
            None => default_profile_dir(),
        };
        let path = dir.join(format!("{}.json", name));

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let mut profile = Self::parse(&content).map_err(|e| match e {
            Error::Profile { message, .. } => Error::Profile {
                message: format!("{}: {}", path.display(), message),
                hint: Some("Profiles must be JSON objects with optional 'general' and 'paths' sections".to_string()),
            },
            other => other,
        })?;
        profile.source = Some(path);
        Ok(profile)
    }

    /// The configured log level as a `log` filter.
    pub fn log_level(&self) -> Option<log::LevelFilter> {
        self.general
            .log_level
            .as_deref()
            .and_then(|level| level.parse().ok())
    }

    /// Resolve a profile-relative path against the profile's directory.
    ///
    /// Absolute paths are returned unchanged, as are all paths of the empty
    /// configuration.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match self.source.as_deref().and_then(Path::parent) {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// The configured default source document, resolved.
    pub fn types_file(&self) -> Option<PathBuf> {
        self.paths.types_file.as_deref().map(|p| self.resolve(p))
    }

    /// The configured backup directory, resolved.
    pub fn backup_directory(&self) -> Option<PathBuf> {
        self.general
            .backup_directory
            .as_deref()
            .map(|p| self.resolve(p))
    }
}

/// The profile directory used when none is given explicitly.
pub fn default_profile_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(PROFILE_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("xml-keysync")
        .join("profiles")
}
