//! Actor loop for the search orchestrator.

use std::sync::Arc;

use marquee_core::SearchConfig;
use tokio::sync::{mpsc, watch};

use super::commands::{SearchCommand, SearchEvent};
use super::core::SearchOrchestrator;
use super::handle::SearchHandle;
use super::state::UiState;
use crate::catalog::MovieCatalog;
use crate::debounce::Debouncer;
use crate::trends::TrendStore;

/// Spawns the search orchestrator actor and returns its handle.
///
/// The actor immediately fetches the catalog's default listing for the
/// empty query and loads the trending list once. Must be called from
/// within a Tokio runtime.
///
/// # Examples
/// ```rust,no_run
/// # #[tokio::main]
/// # async fn main() {
/// use std::sync::Arc;
///
/// use marquee_core::MarqueeConfig;
/// use marquee_search::{DemoCatalog, InMemoryTrendStore, spawn_search_orchestrator};
///
/// let config = MarqueeConfig::default();
/// let handle = spawn_search_orchestrator(
///     &config.search,
///     Arc::new(DemoCatalog::new()),
///     Arc::new(InMemoryTrendStore::new(config.catalog.image_base_url.clone(), 5)),
/// );
/// handle.set_query("batman").await.unwrap();
/// # }
/// ```
pub fn spawn_search_orchestrator(
    config: &SearchConfig,
    catalog: Arc<dyn MovieCatalog>,
    trends: Arc<dyn TrendStore>,
) -> SearchHandle {
    let (sender, receiver) = mpsc::channel(config.command_buffer.max(1));
    let (event_sender, event_receiver) = mpsc::unbounded_channel();
    let (publisher, state) = watch::channel(UiState::default());
    let (debouncer, settled) = Debouncer::new(config.debounce);

    let mut orchestrator =
        SearchOrchestrator::new(publisher, debouncer, catalog, trends, event_sender);
    orchestrator.mount();

    tokio::spawn(async move {
        run_actor_loop(orchestrator, receiver, event_receiver, settled).await;
    });

    SearchHandle::new(sender, state)
}

/// Processes commands, task completions and debounced queries one at a time.
///
/// Stops when a shutdown command arrives or every handle has been dropped.
async fn run_actor_loop(
    mut orchestrator: SearchOrchestrator,
    mut commands: mpsc::Receiver<SearchCommand>,
    mut events: mpsc::UnboundedReceiver<SearchEvent>,
    mut settled: mpsc::UnboundedReceiver<String>,
) {
    tracing::debug!("Search orchestrator actor started");

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(SearchCommand::SetQuery { query }) => orchestrator.set_query(query),
                Some(SearchCommand::Shutdown { responder }) => {
                    orchestrator.cancel_pending_input();
                    let _ = responder.send(());
                    break;
                }
                None => break,
            },
            Some(event) = events.recv() => orchestrator.handle_event(event),
            Some(query) = settled.recv() => orchestrator.apply_debounced(query),
        }
    }

    tracing::debug!("Search orchestrator actor stopped");
}
