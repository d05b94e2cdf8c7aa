//! # Configuration Loading
//!
//! Shared plumbing for component configuration: YAML documents (file or
//! string) and flat environment variables. Each component defines its own
//! serde struct and calls into these helpers.
//!
//! Environment lookups go through a closure so tests can supply a map
//! instead of mutating the process environment.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is absent.
    #[error("required environment variable {0} is not set")]
    MissingVar(String),

    /// A value is present but cannot be parsed.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue {
        /// Variable or field name.
        key: String,
        /// Parse failure detail.
        reason: String,
    },

    /// The configuration file does not exist.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// Path that was tried.
        path: PathBuf,
    },

    /// YAML in a file failed to parse.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        /// File being parsed.
        path: PathBuf,
        /// Underlying parser error.
        source: serde_yaml::Error,
    },

    /// YAML from a string failed to parse.
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Any other I/O failure while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse a typed configuration from a YAML string.
pub fn from_yaml_str<T: DeserializeOwned>(yaml: &str) -> Result<T, ConfigError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Load a typed configuration from a YAML file.
pub fn from_yaml_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io(e)
        }
    })?;
    serde_yaml::from_str(&content).map_err(|e| ConfigError::YamlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Process-environment lookup, for passing to `from_lookup` constructors.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// A required variable, parsed.
pub fn required_var<T, F>(lookup: &F, key: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).ok_or_else(|| ConfigError::MissingVar(key.to_string()))?;
    parse_value(key, &raw)
}

/// An optional variable, parsed, falling back to `default` when absent.
pub fn optional_var<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

/// A required comma-separated list.
pub fn required_list<T, F>(lookup: &F, key: &str) -> Result<Vec<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).ok_or_else(|| ConfigError::MissingVar(key.to_string()))?;
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|item| parse_value(key, item))
        .collect()
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
