//! State shared between the gatekeeper and the confirmation endpoint.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::Answer;

/// The confirmation currently waiting for an answer.
#[derive(Debug)]
pub struct PendingSession {
    /// Document under review.
    pub path: PathBuf,
    /// Rendered diff page.
    pub html: String,
    /// Single-slot answer channel.
    pub answers: mpsc::Sender<Answer>,
}

/// Holds at most one [`PendingSession`].
#[derive(Debug, Clone, Default)]
pub struct SessionSlot {
    inner: Arc<Mutex<Option<PendingSession>>>,
}

impl SessionSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `session`, replacing any previous one.
    pub fn begin(&self, session: PendingSession) {
        *self.inner.lock() = Some(session);
    }

    /// Removes the active session.
    pub fn clear(&self) {
        self.inner.lock().take();
    }

    /// Diff page of the active session.
    pub fn page(&self) -> Option<String> {
        self.inner.lock().as_ref().map(|session| session.html.clone())
    }

    /// Offers `answer` to the active session and returns the path under
    /// review. The answer is dropped when an earlier one already fills the
    /// slot.
    pub fn answer(&self, answer: Answer) -> Option<PathBuf> {
        let guard = self.inner.lock();
        let session = guard.as_ref()?;
        if session.answers.try_send(answer).is_err() {
            tracing::debug!(?answer, "Ignoring answer, session already answered");
        }
        Some(session.path.clone())
    }

    /// Returns `true` while a session is active.
    pub fn is_active(&self) -> bool {
        self.inner.lock().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(answers: mpsc::Sender<Answer>) -> PendingSession {
        PendingSession {
            path: PathBuf::from("/tmp/README.md"),
            html: "<p>diff</p>".to_string(),
            answers,
        }
    }

    #[tokio::test]
    async fn first_answer_sticks() {
        let slot = SessionSlot::new();
        let (tx, mut rx) = mpsc::channel(1);
        slot.begin(session(tx));

        assert!(slot.answer(Answer::Accept).is_some());
        assert!(slot.answer(Answer::Reject).is_some());

        assert_eq!(rx.recv().await, Some(Answer::Accept));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn answers_without_session_are_ignored() {
        let slot = SessionSlot::new();
        assert!(slot.answer(Answer::Accept).is_none());
        assert!(slot.page().is_none());
    }

    #[test]
    fn clear_ends_the_session() {
        let slot = SessionSlot::new();
        let (tx, _rx) = mpsc::channel(1);
        slot.begin(session(tx));
        assert!(slot.is_active());
        assert_eq!(slot.page().as_deref(), Some("<p>diff</p>"));

        slot.clear();
        assert!(!slot.is_active());
    }
}
