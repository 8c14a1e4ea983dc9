//! Layout components - header, sections, polling containers

use std::time::Duration;

/// Escapes text for use inside HTML content and attribute values.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Renders the page header with the tagline and the search input.
pub fn hero_header(search_html: &str) -> String {
    format!(
        r#"<header class="text-center mb-12">
            <h1 class="text-4xl sm:text-5xl font-bold text-white leading-tight max-w-3xl mx-auto">
                Find <span class="text-gradient">Movies</span> You'll Enjoy Without the Hassle
            </h1>
            {search_html}
        </header>"#
    )
}

/// Renders a titled page section.
pub fn section(class: &str, title: &str, content: &str) -> String {
    format!(
        r#"<section class="{class} mt-12">
            <h2 class="text-2xl font-bold text-white mb-6">{title}</h2>
            {content}
        </section>"#
    )
}

/// Wraps `content` in a container that re-fetches `url` every `interval`.
///
/// The response replaces the container's inner HTML.
pub fn polling_region(id: &str, url: &str, interval: Duration, content: &str) -> String {
    let millis = interval.as_millis().max(1);
    format!(
        r#"<div id="{id}" hx-get="{url}" hx-trigger="every {millis}ms" hx-swap="innerHTML">
            {content}
        </div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
        assert_eq!(escape("Amélie"), "Amélie");
    }

    #[test]
    fn test_polling_region_interval() {
        let html = polling_region("results", "/htmx/results", Duration::from_millis(500), "x");
        assert!(html.contains(r#"hx-get="/htmx/results""#));
        assert!(html.contains(r#"hx-trigger="every 500ms""#));
        assert!(html.contains(r#"id="results""#));
    }
}
