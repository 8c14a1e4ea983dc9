//! Domain records shared by the search, trend store and web crates.

use serde::{Deserialize, Serialize};

/// Shown in place of a missing rating or release year.
pub const NOT_AVAILABLE: &str = "N/A";

/// A movie as returned by the remote catalog.
///
/// Read-only inside Marquee. Only `id` and `title` are required on the
/// wire; everything the card renderer shows is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl Movie {
    /// Creates a movie with only the required fields set.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            release_date: None,
            vote_average: None,
            original_language: None,
            overview: None,
        }
    }

    /// Sets the poster path.
    pub fn with_poster(mut self, poster_path: impl Into<String>) -> Self {
        self.poster_path = Some(poster_path.into());
        self
    }

    /// Release year parsed from a `YYYY-MM-DD` release date.
    pub fn release_year(&self) -> Option<u16> {
        self.release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .and_then(|year| year.parse().ok())
    }

    /// Rating with one decimal, or `N/A` when missing or zero.
    pub fn rating_label(&self) -> String {
        self.vote_average
            .filter(|rating| *rating > 0.0)
            .map(|rating| format!("{rating:.1}"))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// Release year, or `N/A` when the release date is missing or malformed.
    pub fn year_label(&self) -> String {
        self.release_year()
            .map(|year| year.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// Full poster URL under the given image prefix, if the movie has a poster.
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| format!("{image_base_url}{path}"))
    }
}

/// Popularity record for one search term, owned by the remote trend store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRecord {
    /// Store-assigned document identifier
    #[serde(rename = "$id")]
    pub id: String,
    /// Search term, trimmed and lower-cased
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    /// Number of searches recorded for this term
    pub count: u64,
    /// Catalog id of the first result seen for this term
    pub movie_id: u64,
    /// Poster of that first result
    pub poster_url: String,
}

/// One page of catalog results together with the HTTP status it came with.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    pub results: Vec<Movie>,
    pub status: u16,
}
