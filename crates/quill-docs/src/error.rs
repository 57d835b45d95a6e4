use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for documentation operations.
pub type Result<T> = std::result::Result<T, DocsError>;

/// Error variants for documentation loading and rendering.
#[derive(Debug, Error)]
pub enum DocsError {
    /// Failed to read or access a file.
    #[error("failed to read '{path}': {error}")]
    Io {
        /// Path to the file that caused the error.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// A documentation manifest could not be decoded.
    #[error("invalid documentation manifest '{path}': {message}")]
    Manifest {
        /// Path to the manifest.
        path: PathBuf,
        /// Decoder message.
        message: String,
    },

    /// The package pattern did not match any manifest.
    #[error("no packages matched pattern '{pattern}' under '{root}'")]
    NoPackages {
        /// Root directory that was searched.
        root: PathBuf,
        /// Pattern that was applied.
        pattern: String,
    },

    /// Rendering a package failed.
    #[error("failed to render package '{package}': {message}")]
    Render {
        /// Package being rendered.
        package: String,
        /// Human-readable failure description.
        message: String,
    },

    /// A template override could not be loaded or evaluated.
    #[error("template error in '{path}': {message}")]
    Template {
        /// Template file path.
        path: PathBuf,
        /// Template engine message.
        message: String,
    },
}

impl DocsError {
    /// Helper to build a render error for a package.
    pub fn render(package: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Render {
            package: package.into(),
            message: message.to_string(),
        }
    }

    /// Returns `true` for errors raised while loading the source model.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::Io { .. } | Self::Manifest { .. } | Self::NoPackages { .. }
        )
    }
}
