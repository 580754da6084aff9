//! Error types for machine profile handling.
//!
//! `ConfigError` covers profile content (bad values, unsupported file
//! format) and is cheap to clone so the generator can embed it in its own
//! errors. `SettingsError` adds the file system and parser failures of
//! loading and saving.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing a profile file.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The profile file could not be read.
    #[error("Cannot read machine profile {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The profile file could not be written.
    #[error("Cannot write machine profile {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The platform has no per-user configuration directory.
    #[error("No configuration directory available on this platform")]
    NoConfigDirectory,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed JSON profile: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed TOML profile: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Cannot encode profile as TOML: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    /// The profile content is invalid.
    #[error("Invalid machine profile: {0}")]
    Config(#[from] ConfigError),
}

/// Errors in profile content.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The file extension is neither `json` nor `toml`.
    #[error("Unsupported profile format '{0}', expected json or toml")]
    UnsupportedFormat(String),

    /// A numeric setting is outside its valid range.
    #[error("'{key}' must be {expected}, got {value}")]
    OutOfRange {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

pub type SettingsResult<T> = Result<T, SettingsError>;

pub type ConfigResult<T> = Result<T, ConfigError>;
