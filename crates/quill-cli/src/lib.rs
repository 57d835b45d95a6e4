//! Quill CLI - renders package documentation into README files.
//!
//! This crate provides the command-line interface around `quill-docs`:
//!
//! - [`config`] - Configuration from files, environment and flags
//! - [`commands`] - The generate pipeline
//! - [`gatekeeper`] - Confirmation of updates to existing files
//! - [`writer`] - Output files and the run report
//! - [`error`] - Error types with actionable messages
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Terminal status messages
//!
//! # Example
//!
//! ```rust,no_run
//! use quill_cli::{cli::Cli, commands, logger};
//!
//! # async fn demo() -> quill_cli::Result<()> {
//! logger::init_logger(false, false, false);
//! commands::execute(Cli::default()).await
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod gatekeeper;
pub mod logger;
pub mod ui;
pub mod writer;

pub use config::QuillConfig;
pub use error::{CliError, ConfigError, Result, ResultExt};
pub use gatekeeper::{Gatekeeper, Outcome};
pub use writer::{GeneratedDocument, OutputWriter, Report, Status};
