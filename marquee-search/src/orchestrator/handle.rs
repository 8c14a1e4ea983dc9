//! Handle for communicating with the search orchestrator actor.

use tokio::sync::{mpsc, oneshot, watch};

use super::commands::SearchCommand;
use super::state::UiState;
use crate::errors::SearchError;

/// Handle for communicating with the search orchestrator actor.
///
/// Writes go through the actor's command channel; reads come from a
/// `watch` channel the actor publishes every state change on. Cheap to
/// clone and share between request handlers.
#[derive(Clone, Debug)]
pub struct SearchHandle {
    sender: mpsc::Sender<SearchCommand>,
    state: watch::Receiver<UiState>,
}

impl SearchHandle {
    /// Creates a new handle with the given command sender and state receiver.
    pub fn new(sender: mpsc::Sender<SearchCommand>, state: watch::Receiver<UiState>) -> Self {
        Self { sender, state }
    }

    /// Replaces the raw query.
    ///
    /// The search itself starts only after the debounce quiet period.
    ///
    /// # Errors
    /// - `SearchError::OrchestratorShutdown` - The actor has stopped
    pub async fn set_query(&self, query: impl Into<String>) -> Result<(), SearchError> {
        self.sender
            .send(SearchCommand::SetQuery {
                query: query.into(),
            })
            .await
            .map_err(|_| SearchError::OrchestratorShutdown)
    }

    /// Latest published state.
    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.clone()
    }

    /// Waits until the published state satisfies `predicate` and returns it.
    ///
    /// Returns immediately if the current state already matches.
    ///
    /// # Errors
    /// - `SearchError::OrchestratorShutdown` - The actor stopped before the state matched
    pub async fn wait_for<F>(&self, predicate: F) -> Result<UiState, SearchError>
    where
        F: FnMut(&UiState) -> bool,
    {
        let mut receiver = self.state.clone();
        let state = receiver
            .wait_for(predicate)
            .await
            .map_err(|_| SearchError::OrchestratorShutdown)?
            .clone();
        Ok(state)
    }

    /// Stops the actor and cancels any pending debounced query.
    ///
    /// In-flight fetches finish on their own; their results are dropped.
    ///
    /// # Errors
    /// - `SearchError::OrchestratorShutdown` - The actor had already stopped
    pub async fn shutdown(&self) -> Result<(), SearchError> {
        let (responder, rx) = oneshot::channel();
        self.sender
            .send(SearchCommand::Shutdown { responder })
            .await
            .map_err(|_| SearchError::OrchestratorShutdown)?;

        rx.await.map_err(|_| SearchError::OrchestratorShutdown)
    }
}
