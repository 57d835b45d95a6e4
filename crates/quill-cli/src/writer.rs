//! Output writer and run report.

use std::fmt;
use std::path::PathBuf;

use owo_colors::{OwoColorize, Stream};

use crate::error::{CliError, Result};
use crate::gatekeeper::Outcome;

/// Lifecycle of a generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pending,
    Accepted,
    Rejected,
    TimedOut,
}

impl From<Outcome> for Status {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Accepted => Status::Accepted,
            Outcome::Rejected => Status::Rejected,
            Outcome::TimedOut => Status::TimedOut,
        }
    }
}

/// Formatted README for one package.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    /// Package name.
    pub package: String,
    /// Target file.
    pub path: PathBuf,
    /// Formatted markdown.
    pub contents: String,
    pub status: Status,
}

impl GeneratedDocument {
    pub fn new(package: impl Into<String>, path: PathBuf, contents: String) -> Self {
        Self {
            package: package.into(),
            path,
            contents,
            status: Status::Pending,
        }
    }
}

/// One line of the run report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub path: PathBuf,
    pub status: Status,
}

/// Writes accepted documents and records every outcome in processing order.
#[derive(Debug, Default)]
pub struct OutputWriter {
    entries: Vec<ReportEntry>,
}

impl OutputWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `outcome` to `document`: an accepted document replaces the
    /// target file in a single write, anything else leaves it untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Write`] if the file cannot be written. Entries
    /// recorded so far are kept.
    pub fn commit(&mut self, mut document: GeneratedDocument, outcome: Outcome) -> Result<()> {
        document.status = outcome.into();

        if document.status == Status::Accepted {
            std::fs::write(&document.path, document.contents.as_bytes()).map_err(|source| {
                CliError::Write {
                    path: document.path.clone(),
                    source,
                }
            })?;
            tracing::debug!(
                package = %document.package,
                path = %document.path.display(),
                bytes = document.contents.len(),
                "Wrote README"
            );
        } else {
            tracing::debug!(
                package = %document.package,
                status = ?document.status,
                "Skipped README"
            );
        }

        self.entries.push(ReportEntry {
            path: document.path,
            status: document.status,
        });
        Ok(())
    }

    /// Ends the run and returns its report.
    pub fn finish(self) -> Report {
        Report {
            entries: self.entries,
        }
    }
}

/// Per-package results of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
}

impl Report {
    /// Number of files written.
    pub fn accepted(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.status == Status::Accepted)
            .count()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Results:")?;
        for entry in &self.entries {
            let path = format!("{:?}", entry.path.display().to_string());
            let passed = "✓".if_supports_color(Stream::Stdout, |s| s.green()).to_string();
            let failed = "✗".if_supports_color(Stream::Stdout, |s| s.red()).to_string();
            match entry.status {
                Status::Accepted => writeln!(f, "\t- {} {}", path, passed)?,
                Status::TimedOut => writeln!(f, "\t- {} {} (timed out)", path, failed)?,
                Status::Rejected | Status::Pending => writeln!(f, "\t- {} {}", path, failed)?,
            }
        }
        Ok(())
    }
}
