//! Localhost endpoint for reviewing and answering a pending update.

use std::net::SocketAddr;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::diff::answer_page;
use super::session::SessionSlot;
use super::Answer;
use crate::error::{CliError, Result};

/// Confirmation server, bound once per run.
#[derive(Debug)]
pub struct ConfirmServer {
    addr: SocketAddr,
    slot: SessionSlot,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ConfirmServer {
    /// Binds `addr` and starts serving.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Gatekeeper`] if the address cannot be bound. There
    /// is no fallback port.
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            CliError::Gatekeeper(format!("Failed to bind to {}: {}", addr, e))
        })?;
        let addr = listener.local_addr()?;

        let slot = SessionSlot::new();
        let app = router(slot.clone());
        let (shutdown, shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            if let Err(e) = server.await {
                tracing::error!("Confirmation server error: {}", e);
            }
        });

        tracing::debug!(%addr, "Confirmation server listening");
        Ok(Self {
            addr,
            slot,
            shutdown: Some(shutdown),
            handle: Some(handle),
        })
    }

    /// Address the server is bound to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// URL of the review page.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Session slot shared with the request handlers.
    pub fn slot(&self) -> &SessionSlot {
        &self.slot
    }

    /// Stops accepting connections and waits for the server task to finish.
    pub async fn shutdown(mut self) {
        self.slot.clear();
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

/// Build the router for the confirmation endpoint.
pub fn router(slot: SessionSlot) -> Router {
    Router::new()
        .route("/", get(handle_review))
        .route("/accept", get(handle_accept).post(handle_accept))
        .route("/confirm", get(handle_accept).post(handle_accept))
        .route("/reject", get(handle_reject).post(handle_reject))
        .with_state(slot)
}

async fn handle_review(State(slot): State<SessionSlot>) -> Response {
    match slot.page() {
        Some(html) => Html(html).into_response(),
        None => no_session(),
    }
}

async fn handle_accept(State(slot): State<SessionSlot>) -> Response {
    respond(&slot, Answer::Accept)
}

async fn handle_reject(State(slot): State<SessionSlot>) -> Response {
    respond(&slot, Answer::Reject)
}

fn respond(slot: &SessionSlot, answer: Answer) -> Response {
    let Some(path) = slot.answer(answer) else {
        return no_session();
    };
    crate::ui::info(&format!("{} signal received from the browser", answer.label()));

    match answer_page(&path, answer == Answer::Accept) {
        Ok(html) => Html(html).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

fn no_session() -> Response {
    (StatusCode::NOT_FOUND, "No update is waiting for confirmation").into_response()
}
