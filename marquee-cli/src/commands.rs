//! CLI command implementations

use std::sync::Arc;

use anyhow::Context;
use clap::Subcommand;
use marquee_core::{MarqueeConfig, Movie, TrendRecord};
use marquee_search::{
    AppwriteTrendStore, CatalogEndpoint, DemoCatalog, InMemoryTrendStore, MovieCatalog,
    TmdbCatalog, TrendStore,
};

/// Available CLI commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the web UI
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
        /// Use the built-in demo catalog and an in-memory trend store
        #[arg(long)]
        demo: bool,
    },
    /// Search the catalog once and print the results
    Search {
        /// Search text; omit for the default listing
        query: Option<String>,
        /// Use the built-in demo catalog and record nothing
        #[arg(long)]
        demo: bool,
    },
    /// Print the most searched terms from the configured trend store
    Trending,
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands, mut config: MarqueeConfig) -> anyhow::Result<()> {
    match command {
        Commands::Serve { host, port, demo } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config, demo).await
        }
        Commands::Search { query, demo } => {
            search_once(&config, query.as_deref().unwrap_or_default(), demo).await
        }
        Commands::Trending => show_trending(&config).await,
    }
}

/// Runs the web UI until the process is stopped.
///
/// Every browser session searches the same catalog and records to the same
/// trend store.
///
/// # Errors
/// - Address could not be bound or the server failed
async fn serve(config: MarqueeConfig, demo: bool) -> anyhow::Result<()> {
    let catalog = build_catalog(&config, demo);
    let trends = build_trend_store(&config, demo);

    marquee_web::run_server(&config, catalog, trends)
        .await
        .context("web server stopped")
}

/// Fetches one page for `query` and prints it.
///
/// A non-empty query with at least one result is recorded in the
/// configured trend store before returning. Demo runs record nothing.
///
/// # Errors
/// - The catalog request failed
async fn search_once(config: &MarqueeConfig, query: &str, demo: bool) -> anyhow::Result<()> {
    let catalog = build_catalog(config, demo);
    let endpoint = CatalogEndpoint::for_query(query);

    let page = match catalog.fetch(&endpoint).await {
        Ok(page) => page,
        Err(e) => {
            tracing::error!(%query, "Error fetching movies: {e}");
            anyhow::bail!(e.user_message());
        }
    };

    if page.results.is_empty() {
        println!("No movies found");
    }
    for movie in &page.results {
        println!("{}", format_movie_line(movie));
    }

    let first = page.results.first().filter(|_| !query.is_empty());
    if let (Some(first), Some(trends)) = (first, remote_trend_store(config, demo)) {
        if let Err(e) = trends.update_search_count(query, first).await {
            tracing::warn!(%query, "Failed to update search count: {e}");
        }
    }

    Ok(())
}

/// Prints the trending records, highest count first.
///
/// # Errors
/// - The trend store is not configured or could not be read
async fn show_trending(config: &MarqueeConfig) -> anyhow::Result<()> {
    let Some(trends) = remote_trend_store(config, false) else {
        anyhow::bail!(
            "Trend store is not configured; set MARQUEE_APPWRITE_PROJECT_ID, \
             MARQUEE_APPWRITE_DATABASE_ID and MARQUEE_APPWRITE_COLLECTION_ID"
        );
    };
    let records = trends
        .get_trending_movies()
        .await
        .context("Error fetching trending movies")?;

    if records.is_empty() {
        println!("No trending searches yet");
    }
    for (index, record) in records.iter().enumerate() {
        println!("{}", format_trend_line(index + 1, record));
    }

    Ok(())
}

fn build_catalog(config: &MarqueeConfig, demo: bool) -> Arc<dyn MovieCatalog> {
    if demo {
        tracing::info!("Using demo catalog");
        return Arc::new(DemoCatalog::new());
    }

    if config.catalog.api_token.is_none() {
        tracing::warn!("MARQUEE_TMDB_API_KEY is not set; catalog requests will be rejected");
    }
    Arc::new(TmdbCatalog::new(&config.catalog))
}

/// Trend store shared by every web session.
///
/// Falls back to memory for demo runs and when no store is configured.
fn build_trend_store(config: &MarqueeConfig, demo: bool) -> Arc<dyn TrendStore> {
    if let Some(store) = remote_trend_store(config, demo) {
        return store;
    }
    if !demo {
        tracing::info!("Trend store not configured; trending searches are kept in memory");
    }

    Arc::new(InMemoryTrendStore::new(
        config.catalog.image_base_url.clone(),
        config.trend_store.trending_limit,
    ))
}

/// The configured Appwrite store, unless running the demo.
fn remote_trend_store(config: &MarqueeConfig, demo: bool) -> Option<Arc<dyn TrendStore>> {
    let store = &config.trend_store;
    if demo || !store.is_configured() {
        return None;
    }

    Some(Arc::new(AppwriteTrendStore::new(
        store,
        config.catalog.image_base_url.clone(),
    )))
}

/// One result line: title, year, rating and language.
fn format_movie_line(movie: &Movie) -> String {
    format!(
        "{} ({})  ★ {}  {}",
        movie.title,
        movie.year_label(),
        movie.rating_label(),
        movie.original_language.as_deref().unwrap_or("-")
    )
}

fn format_trend_line(rank: usize, record: &TrendRecord) -> String {
    format!(
        "{rank:>2}. {} ({} searches)",
        record.search_term, record.count
    )
}
