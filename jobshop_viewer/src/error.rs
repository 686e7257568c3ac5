//! Error types for importing plans, loading configuration and driving the viewer.
//!
//! Import and configuration failures carry enough context (file path, JSON
//! path of the offending value) to be reported to the user without a
//! debugger. None of these errors leave a [`Session`](crate::session::Session)
//! half-updated: state is only replaced once a plan decoded completely.

use std::path::PathBuf;

/// Result type for viewer operations
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Failure to decode a plan document.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The plan file could not be read.
    #[error("Failed to read plan file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("Invalid JSON syntax: {0}")]
    Syntax(#[source] serde_json::Error),

    /// The top-level object lacks one or more of the required collections.
    #[error("Plan document must contain the keys {missing:?}. Found keys: {found:?}")]
    MissingKeys {
        missing: Vec<String>,
        found: Vec<String>,
    },

    /// A value inside the document has the wrong shape or format.
    #[error("Invalid plan data at '{path}': {message}")]
    Structure { path: String, message: String },
}

/// Failure to load or validate a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration value: {0}")]
    Invalid(String),

    #[error("No jobshop-viewer.toml found in standard locations")]
    NotFound,
}

/// Top-level error for session commands.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A paging command arrived while neither view is active.
    #[error("Invalid report type: no view is active")]
    NoActiveView,

    /// A view was requested before any plan was imported.
    #[error("No plan data has been imported")]
    NoData,

    /// The renderer failed to write its output.
    #[error("Render error: {0}")]
    Render(#[from] std::io::Error),
}
