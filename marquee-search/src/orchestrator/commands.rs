//! Messages processed by the search orchestrator actor.

use marquee_core::{Movie, TrendRecord};
use tokio::sync::oneshot;

use crate::errors::{CatalogError, TrendStoreError};

/// Commands sent through a [`super::SearchHandle`].
#[derive(Debug)]
pub enum SearchCommand {
    /// Replace the raw query and restart the debounce timer.
    SetQuery {
        /// Text as typed
        query: String,
    },
    /// Stop the actor after acknowledging.
    Shutdown {
        /// Notified once the actor has cancelled pending input
        responder: oneshot::Sender<()>,
    },
}

/// Completions reported back to the actor by the tasks it spawned.
#[derive(Debug)]
pub(crate) enum SearchEvent {
    /// A catalog fetch finished, successfully or not.
    FetchSettled {
        generation: u64,
        query: String,
        outcome: Result<Vec<Movie>, CatalogError>,
    },
    /// The startup trending query finished.
    TrendingLoaded {
        result: Result<Vec<TrendRecord>, TrendStoreError>,
    },
}
