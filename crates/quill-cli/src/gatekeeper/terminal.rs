//! Answers typed on the controlling terminal.

use std::io::BufRead;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;

use super::Answer;

/// Line source shared by all confirmation sessions of a run.
///
/// Lines are read on a dedicated thread because reading stdin blocks. The
/// channel holds a single line, so the reader never gets more than one line
/// ahead of the sessions. Input typed before a prompt answers that prompt.
#[derive(Debug, Clone)]
pub struct TerminalLines {
    lines: Arc<Mutex<mpsc::Receiver<String>>>,
}

impl TerminalLines {
    /// Starts reading lines from stdin.
    pub fn stdin() -> Self {
        let (tx, rx) = mpsc::channel(1);
        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
            // Dropping `tx` closes the channel: end of input.
        });
        Self::from_receiver(rx)
    }

    /// Uses lines from `rx` instead of stdin. Closing the sender acts as end
    /// of input.
    pub fn from_receiver(rx: mpsc::Receiver<String>) -> Self {
        Self {
            lines: Arc::new(Mutex::new(rx)),
        }
    }

    /// Waits for one line and offers the answer it encodes. End of input is a
    /// rejection. Abort the returned task to stop listening; a line that was
    /// not received yet stays available for the next session.
    pub fn listen(&self, answers: mpsc::Sender<Answer>) -> JoinHandle<()> {
        let lines = Arc::clone(&self.lines);
        tokio::spawn(async move {
            let mut lines = lines.lock().await;
            let answer = match lines.recv().await {
                Some(line) => Answer::from_terminal(&line),
                None => {
                    tracing::debug!("Terminal input closed, rejecting");
                    Answer::Reject
                }
            };
            if answers.try_send(answer).is_err() {
                tracing::debug!(?answer, "Ignoring terminal answer, session already answered");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn line_becomes_answer() {
        let (tx, rx) = mpsc::channel(1);
        let terminal = TerminalLines::from_receiver(rx);
        let (answers, mut received) = mpsc::channel(1);

        let task = terminal.listen(answers);
        tx.send("Y".to_string()).await.unwrap();

        assert_eq!(received.recv().await, Some(Answer::Accept));
        task.await.unwrap();
    }

    #[tokio::test]
    async fn typed_ahead_line_answers_the_next_listener() {
        let (tx, rx) = mpsc::channel(1);
        let terminal = TerminalLines::from_receiver(rx);
        tx.send("y".to_string()).await.unwrap();

        let (answers, mut received) = mpsc::channel(1);
        let task = terminal.listen(answers);

        assert_eq!(received.recv().await, Some(Answer::Accept));
        task.await.unwrap();
    }

    #[tokio::test]
    async fn end_of_input_rejects() {
        let (tx, rx) = mpsc::channel::<String>(1);
        let terminal = TerminalLines::from_receiver(rx);
        drop(tx);

        let (answers, mut received) = mpsc::channel(1);
        let task = terminal.listen(answers);

        assert_eq!(received.recv().await, Some(Answer::Reject));
        task.await.unwrap();
    }

    #[tokio::test]
    async fn aborted_listener_keeps_the_next_line() {
        let (tx, rx) = mpsc::channel(1);
        let terminal = TerminalLines::from_receiver(rx);

        let (answers, _first) = mpsc::channel(1);
        let task = terminal.listen(answers);
        tokio::task::yield_now().await;
        task.abort();
        let _ = task.await;

        tx.send("y".to_string()).await.unwrap();
        let (answers, mut received) = mpsc::channel(1);
        let task = terminal.listen(answers);

        assert_eq!(received.recv().await, Some(Answer::Accept));
        task.await.unwrap();
    }
}
