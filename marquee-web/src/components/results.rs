//! Search results component

use marquee_search::FetchStatus;

use super::layout::{escape, section};
use super::movie::movie_card;

/// Renders the results section for the current fetch status.
///
/// Shows exactly one of a loading indicator, the error message, or the
/// movie grid. An empty result renders an empty grid.
pub fn results_section(status: &FetchStatus, image_base_url: &str) -> String {
    let body = match status {
        FetchStatus::Loading => {
            r#"<p class="loading text-gradient text-lg">Loading...</p>"#.to_string()
        }
        FetchStatus::Failed(message) => {
            format!(r#"<p class="error text-red-500">{}</p>"#, escape(message))
        }
        FetchStatus::Idle => movie_grid(""),
        FetchStatus::Loaded(movies) => {
            let cards: String = movies
                .iter()
                .map(|movie| movie_card(movie, image_base_url))
                .collect();
            movie_grid(&cards)
        }
    };

    section("all-movies", "All Movies", &body)
}

fn movie_grid(cards: &str) -> String {
    format!(
        r#"<ul class="grid grid-cols-1 gap-5 xs:grid-cols-2 md:grid-cols-3 lg:grid-cols-4">{cards}</ul>"#
    )
}

#[cfg(test)]
mod tests {
    use marquee_core::Movie;

    use super::*;

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

    #[test]
    fn test_loading_shows_only_indicator() {
        let html = results_section(&FetchStatus::Loading, IMAGE_BASE);
        assert!(html.contains("Loading..."));
        assert!(!html.contains("<ul"));
        assert!(!html.contains("text-red-500"));
    }

    #[test]
    fn test_failure_shows_only_message() {
        let html = results_section(
            &FetchStatus::Failed("Error fetching movies, Please try again later".to_string()),
            IMAGE_BASE,
        );
        assert!(html.contains("Error fetching movies, Please try again later"));
        assert!(!html.contains("Loading..."));
        assert!(!html.contains("<ul"));
    }

    #[test]
    fn test_loaded_renders_one_card_per_movie() {
        let movies = vec![Movie::new(1, "Heat"), Movie::new(2, "Ronin")];
        let html = results_section(&FetchStatus::Loaded(movies), IMAGE_BASE);
        assert_eq!(html.matches("movie-card").count(), 2);
        assert!(!html.contains("Loading..."));
    }

    #[test]
    fn test_empty_result_renders_empty_grid() {
        let html = results_section(&FetchStatus::Loaded(Vec::new()), IMAGE_BASE);
        assert!(html.contains("<ul"));
        assert_eq!(html.matches("movie-card").count(), 0);
    }
}
