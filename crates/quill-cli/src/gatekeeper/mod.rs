//! Update gatekeeper.
//!
//! Decides whether a freshly rendered document may replace an existing file.
//! While a confirmation is pending, two sources race for the answer: a line
//! typed on the terminal and a request to the localhost review page. Both
//! write into the same single-slot channel, so the first answer wins and later
//! ones are dropped. A deadline bounds the wait. End of terminal input counts
//! as a rejection.

pub mod browser;
mod diff;
mod server;
mod session;
mod terminal;

use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::config::ConfirmConfig;
use crate::error::{Result, ResultExt};
use crate::ui;

pub use diff::{DiffLine, DiffView, LineChange, answer_page};
pub use server::{ConfirmServer, router};
pub use session::{PendingSession, SessionSlot};
pub use terminal::TerminalLines;

/// An answer given by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Accept,
    Reject,
}

impl Answer {
    /// `y` or `Y` accepts, anything else rejects.
    pub fn from_terminal(line: &str) -> Self {
        if line.trim().eq_ignore_ascii_case("y") {
            Answer::Accept
        } else {
            Answer::Reject
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Answer::Accept => "Confirmation",
            Answer::Reject => "Rejection",
        }
    }
}

/// How a review ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Rejected,
    /// No answer before the deadline. Treated as a rejection.
    TimedOut,
}

impl Outcome {
    /// Returns `true` if the document may be written.
    pub fn is_accepted(self) -> bool {
        self == Outcome::Accepted
    }
}

impl From<Answer> for Outcome {
    fn from(answer: Answer) -> Self {
        match answer {
            Answer::Accept => Outcome::Accepted,
            Answer::Reject => Outcome::Rejected,
        }
    }
}

/// Confirms overwrites of existing files, or accepts everything when
/// confirmation is disabled.
#[derive(Debug)]
pub struct Gatekeeper {
    active: Option<ActiveGatekeeper>,
}

#[derive(Debug)]
struct ActiveGatekeeper {
    server: ConfirmServer,
    terminal: TerminalLines,
    timeout: Duration,
    browser: bool,
}

impl Gatekeeper {
    /// A gatekeeper that accepts every document.
    pub fn disabled() -> Self {
        Self { active: None }
    }

    /// Starts the gatekeeper described by `config`. When confirmation is
    /// enabled this binds `localhost:<port>` and starts reading stdin.
    ///
    /// # Errors
    ///
    /// Fails if the port cannot be bound.
    pub async fn start(config: &ConfirmConfig) -> Result<Self> {
        if !config.enabled {
            return Ok(Self::disabled());
        }
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, config.port));
        let gatekeeper = Self::bind(addr, TerminalLines::stdin(), config.timeout()).await?;
        Ok(gatekeeper.with_browser(config.browser))
    }

    /// Starts an enabled gatekeeper on `addr` reading answers from `terminal`.
    /// The review page is not opened in a browser.
    pub async fn bind(addr: SocketAddr, terminal: TerminalLines, timeout: Duration) -> Result<Self> {
        let server = ConfirmServer::bind(addr).await?;
        Ok(Self {
            active: Some(ActiveGatekeeper {
                server,
                terminal,
                timeout,
                browser: false,
            }),
        })
    }

    /// Open the review page in a browser for each session.
    pub fn with_browser(mut self, browser: bool) -> Self {
        if let Some(active) = &mut self.active {
            active.browser = browser;
        }
        self
    }

    /// Address of the review page, when enabled.
    pub fn addr(&self) -> Option<SocketAddr> {
        self.active.as_ref().map(|active| active.server.addr())
    }

    /// Session slot of the review page, when enabled.
    pub fn slot(&self) -> Option<&SessionSlot> {
        self.active.as_ref().map(|active| active.server.slot())
    }

    /// Decides whether `candidate` may be written to `path`.
    ///
    /// New files are always accepted. Existing files wait for an answer.
    pub async fn review(&self, path: &Path, candidate: &str) -> Result<Outcome> {
        let Some(active) = &self.active else {
            return Ok(Outcome::Accepted);
        };

        let existing = match tokio::fs::read_to_string(path).await {
            Ok(existing) => existing,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Outcome::Accepted),
            Err(e) => return Err(e).with_path(path),
        };

        active.confirm(path, &existing, candidate).await
    }

    /// Releases the listener.
    pub async fn close(self) {
        if let Some(active) = self.active {
            active.server.shutdown().await;
        }
    }
}

impl ActiveGatekeeper {
    async fn confirm(&self, path: &Path, existing: &str, candidate: &str) -> Result<Outcome> {
        let diff = DiffView::new(existing, candidate);
        let html = diff.to_html(path)?;
        let (answers, mut received) = mpsc::channel(1);

        self.server.slot().begin(PendingSession {
            path: path.to_path_buf(),
            html,
            answers: answers.clone(),
        });
        let listener = self.terminal.listen(answers);

        let url = self.server.url();
        ui::info(&format!(
            "Viewing changes to {} (+{} / -{}) at {}",
            path.display(),
            diff.insertions,
            diff.deletions,
            url
        ));
        if self.browser {
            if let Err(e) = browser::open_browser(&url) {
                ui::warning(&format!("Failed to open browser: {:#}", e));
            }
        }
        ui::info("Proceed with overwriting README? (y/n)");

        let outcome = match tokio::time::timeout(self.timeout, received.recv()).await {
            Ok(Some(answer)) => Outcome::from(answer),
            Ok(None) => Outcome::Rejected,
            Err(_) => Outcome::TimedOut,
        };

        self.server.slot().clear();
        listener.abort();
        let _ = listener.await;

        match outcome {
            Outcome::Accepted => ui::success(&format!("Changes to {:?} accepted", path)),
            Outcome::Rejected => ui::error(&format!("Changes to {:?} rejected", path)),
            Outcome::TimedOut => ui::warning(&format!(
                "Confirmation timed out, changes to {:?} rejected",
                path
            )),
        }
        tracing::debug!(path = %path.display(), ?outcome, "Confirmation session resolved");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_answers() {
        assert_eq!(Answer::from_terminal("y"), Answer::Accept);
        assert_eq!(Answer::from_terminal("Y\r"), Answer::Accept);
        assert_eq!(Answer::from_terminal("yes"), Answer::Reject);
        assert_eq!(Answer::from_terminal(""), Answer::Reject);
        assert_eq!(Answer::from_terminal("n"), Answer::Reject);
    }

    #[test]
    fn only_accepted_may_be_written() {
        assert!(Outcome::Accepted.is_accepted());
        assert!(!Outcome::Rejected.is_accepted());
        assert!(!Outcome::TimedOut.is_accepted());
    }

    #[tokio::test]
    async fn disabled_gatekeeper_accepts_existing_files() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let outcome = Gatekeeper::disabled()
            .review(temp.path(), "new content")
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Accepted);
    }
}
