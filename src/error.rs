use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a puzzle catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid puzzle data in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("bad room file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("catalog contains no rooms")]
    Empty,

    /// Room ids must run 1, 2, 3, ... with no gaps or repeats.
    #[error("room ids are not contiguous: expected {expected}, found {found}")]
    NonContiguous { expected: u32, found: u32 },

    #[error("room {0} has an empty answer")]
    EmptyAnswer(u32),
}

/// Errors raised by a save store. Loading never surfaces these to the player;
/// they are logged and the session starts from room 1.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("save record is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("save record has invalid room id {0}")]
    InvalidRoom(i64),
}

/// Errors raised while reading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}
