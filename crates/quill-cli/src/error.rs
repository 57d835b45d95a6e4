//! Error handling for the Quill CLI.
//!
//! Every fatal condition of a run maps onto one [`CliError`] variant. Errors
//! from `quill-docs` are split into load and render failures so the report at
//! the top of `main` can tell the user which phase stopped the run.
//!
//! # Example
//!
//! ```rust,no_run
//! use quill_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_existing(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_path(path)
//! }
//! ```

mod miette;

use std::path::PathBuf;

use quill_docs::DocsError;
use thiserror::Error;

pub use self::miette::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The source model could not be loaded. Nothing was processed.
    #[error("Failed to load packages: {0}")]
    Load(#[source] DocsError),

    /// A package could not be rendered. Remaining packages were skipped.
    #[error("Failed to render documentation: {0}")]
    Render(#[source] DocsError),

    /// The confirmation listener could not be set up.
    #[error("Confirmation server error: {0}")]
    Gatekeeper(String),

    /// An accepted document could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        /// Target file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// File or directory not found.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DocsError> for CliError {
    fn from(error: DocsError) -> Self {
        if error.is_load_error() {
            CliError::Load(error)
        } else {
            CliError::Render(error)
        }
    }
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {}\n\nHint: Create a quill.config.json file or drop --config", .0.display())]
    NotFound(PathBuf),

    /// A configuration value is malformed or out of range.
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with the invalid value.
        field: String,
        /// The offending value.
        value: String,
        /// How to fix it.
        hint: String,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turns a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }
}
