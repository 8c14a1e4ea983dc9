//! Search input component

use super::layout::escape;

/// Placeholder shown in the empty search box.
pub const SEARCH_PLACEHOLDER: &str = "Search through thousands of movies";

/// Renders the search box holding `query`.
///
/// Every `input` event posts the raw text to `/htmx/query`. Debouncing
/// happens server-side, so the input keeps no state of its own.
pub fn search_input(query: &str) -> String {
    let value = escape(query);
    format!(
        r#"<div class="search mt-10 max-w-3xl mx-auto">
            <div class="relative flex items-center bg-gray-800 border border-gray-700 rounded-lg px-4 py-3">
                <img src="/static/search.svg" alt="Search" class="w-5 h-5" />
                <input type="text" name="query" value="{value}"
                       placeholder="{SEARCH_PLACEHOLDER}"
                       autocomplete="off"
                       hx-post="/htmx/query" hx-trigger="input" hx-swap="none"
                       class="w-full bg-transparent pl-4 text-white placeholder-gray-400 focus:outline-none" />
            </div>
        </div>"#
    )
}
