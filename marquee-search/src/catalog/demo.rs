//! Demo catalog with built-in movies.
//!
//! Lets the web UI run end to end without an API token. Search is a
//! case-insensitive substring match on the title; discover returns the
//! whole list sorted by rating.

use async_trait::async_trait;
use marquee_core::{CatalogPage, Movie};

use super::MovieCatalog;
use crate::errors::CatalogError;

/// In-process catalog serving a fixed movie list.
#[derive(Debug, Clone)]
pub struct DemoCatalog {
    movies: Vec<Movie>,
}

impl DemoCatalog {
    /// Creates a demo catalog with the built-in movie list.
    pub fn new() -> Self {
        Self::with_movies(demo_movies())
    }

    /// Creates a demo catalog serving the given movies.
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self { movies }
    }
}

impl Default for DemoCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MovieCatalog for DemoCatalog {
    async fn search(&self, query: &str) -> Result<CatalogPage, CatalogError> {
        let needle = query.trim().to_lowercase();
        let results = self
            .movies
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        Ok(CatalogPage {
            results,
            status: 200,
        })
    }

    async fn discover(&self) -> Result<CatalogPage, CatalogError> {
        let mut results = self.movies.clone();
        results.sort_by(|a, b| {
            b.vote_average
                .unwrap_or_default()
                .total_cmp(&a.vote_average.unwrap_or_default())
        });

        Ok(CatalogPage {
            results,
            status: 200,
        })
    }
}

fn demo_movie(
    id: u64,
    title: &str,
    year: &str,
    rating: f64,
    language: &str,
    poster: &str,
) -> Movie {
    Movie {
        release_date: Some(format!("{year}-01-01")),
        vote_average: Some(rating),
        original_language: Some(language.to_string()),
        overview: Some(format!("Demo description for {title}")),
        ..Movie::new(id, title).with_poster(poster)
    }
}

fn demo_movies() -> Vec<Movie> {
    vec![
        demo_movie(268, "Batman", "1989", 7.2, "en", "/cij4dd21v2Rk2YtUQbV5kW69WB2.jpg"),
        demo_movie(272, "Batman Begins", "2005", 7.7, "en", "/4MpN4kIEqUjW8OPtOQJXlTdHiJV.jpg"),
        demo_movie(155, "The Dark Knight", "2008", 8.5, "en", "/qJ2tW6WMUDux911r6m7haRef0WH.jpg"),
        demo_movie(603, "The Matrix", "1999", 8.2, "en", "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg"),
        demo_movie(129, "Spirited Away", "2001", 8.5, "ja", "/39wmItIWsg5sZMyRUHLkWBcuVCM.jpg"),
        demo_movie(496243, "Parasite", "2019", 8.5, "ko", "/7IiTTgloJzvGI1TAYymCfbfl3vT.jpg"),
        demo_movie(949, "Heat", "1995", 7.9, "en", "/umSVjVdbVwtx5ryCA2QXL44Durm.jpg"),
        demo_movie(194, "Amélie", "2001", 7.9, "fr", "/nSxDa3M9aMvGVLoItzWTepQ5h5d.jpg"),
    ]
}
