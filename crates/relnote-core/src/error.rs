//! Error types for relnote-core

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read or deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors from rendering a release out of a changelog.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReleaseError {
    /// The requested version has no entry in the changelog.
    #[error("Version '{version}' not found in {source_name}")]
    MissingVersion {
        /// The version token that was requested.
        version: String,
        /// Basename of the changelog that was searched.
        source_name: String,
    },
}

/// Result type alias using [`ReleaseError`].
pub type ReleaseResult<T> = Result<T, ReleaseError>;
