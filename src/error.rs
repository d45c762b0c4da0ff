//! Error types for configuration and thread handoff.

use std::path::PathBuf;

/// Reasons a plotter configuration is rejected.
///
/// Configurations are validated once at the boundary; the store and the
/// viewport assume they only ever see valid values.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A separator is the empty string.
    #[error("{0} separator must not be empty")]
    EmptySeparator(&'static str),
    /// Item and name separators are identical.
    #[error("item and name separators must differ (both are {0:?})")]
    SameSeparators(String),
    /// Window size below the minimum.
    #[error("window size {0} is below the minimum of {min}", min = crate::config::MIN_WINDOW_SIZE)]
    WindowTooSmall(usize),
    /// Cache size below the minimum.
    #[error("max cache {0} is below the minimum of {min}", min = crate::config::MIN_MAX_CACHE)]
    CacheTooSmall(usize),
}

/// Errors raised while loading a configuration file.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The TOML could not be parsed or failed validation.
    #[error("invalid plotter config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors raised by the reader-thread handoff.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffError {
    /// The receiving side was dropped.
    #[error("event queue disconnected")]
    Disconnected,
}
