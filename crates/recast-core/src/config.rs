//! Editor options for recast
//!
//! Loads `.recast.toml` from a directory or its parents.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file searched for by [`EditorOptions::load_from`]
pub const CONFIG_FILE_NAME: &str = ".recast.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Line ending style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Unix-style line endings (LF)
    #[default]
    Lf,
    /// Windows-style line endings (CRLF)
    CrLf,
}

impl LineEnding {
    /// Get the line ending string
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Placeholders written into the delimiter lines of the wrapping refactorings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapOptions {
    /// Name written after `#region`, selected after wrapping
    pub region_name: String,
    /// Condition written after `#if`, selected after wrapping
    pub if_condition: String,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            region_name: "RegionName".to_string(),
            if_condition: "DEBUG".to_string(),
        }
    }
}

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// Line break used when the edited line has none of its own
    pub line_ending: LineEnding,
    pub wrap: WrapOptions,
}

impl EditorOptions {
    /// Load options searching from the current directory upward
    pub fn load() -> Result<Option<(EditorOptions, PathBuf)>, ConfigError> {
        let cwd = std::env::current_dir().map_err(|source| ConfigError::Read {
            path: PathBuf::from("."),
            source,
        })?;
        Self::load_from(&cwd)
    }

    /// Load options searching from the given directory upward
    pub fn load_from(start_dir: &Path) -> Result<Option<(EditorOptions, PathBuf)>, ConfigError> {
        let mut current = Some(start_dir);

        while let Some(dir) = current {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                let options = Self::load_path(&config_path)?;
                return Ok(Some((options, config_path)));
            }
            current = dir.parent();
        }

        Ok(None)
    }

    /// Load options from a specific path
    pub fn load_path(path: &Path) -> Result<EditorOptions, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(contents: &str) -> Result<EditorOptions, toml::de::Error> {
        toml::from_str(contents)
    }
}
