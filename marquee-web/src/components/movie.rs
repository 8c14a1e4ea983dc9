//! Movie card component

use marquee_core::Movie;

use super::layout::escape;

/// Poster shown when a movie has none.
pub const FALLBACK_POSTER: &str = "/static/no-movie.svg";

/// Renders one movie as a card: poster, title, rating, language and year.
pub fn movie_card(movie: &Movie, image_base_url: &str) -> String {
    let poster = movie
        .poster_url(image_base_url)
        .unwrap_or_else(|| FALLBACK_POSTER.to_string());
    let title = escape(&movie.title);
    let language = escape(movie.original_language.as_deref().unwrap_or_default());

    format!(
        r#"<li class="movie-card bg-gray-800 rounded-2xl p-5 shadow-inner">
            <img src="{poster}" alt="{title}" class="rounded-lg h-auto w-full" />
            <div class="mt-4">
                <h3 class="text-white font-bold text-base line-clamp-1">{title}</h3>
                <div class="content mt-2 flex flex-row items-center flex-wrap gap-2 text-gray-400">
                    <div class="rating flex flex-row items-center gap-1">
                        <img src="/static/star.svg" alt="Star Icon" class="size-4" />
                        <p class="font-bold text-white">{rating}</p>
                    </div>
                    <span>&bull;</span>
                    <p class="lang capitalize">{language}</p>
                    <span>&bull;</span>
                    <p class="year">{year}</p>
                </div>
            </div>
        </li>"#,
        poster = escape(&poster),
        rating = movie.rating_label(),
        year = movie.year_label(),
    )
}
