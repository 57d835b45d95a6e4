//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        CliError::Load(e) => miette::miette!(
            "Failed to load packages: {}\n\nHint: Each package directory needs a docmodel.json manifest",
            e
        ),
        CliError::Gatekeeper(msg) => miette::miette!(
            "Confirmation server error: {}\n\nHint: Free the port or pick another one with --port",
            msg
        ),
        _ => miette::miette!("{}", err),
    }
}
