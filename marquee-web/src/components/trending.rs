//! Trending searches component

use marquee_core::TrendRecord;

use super::layout::{escape, section};
use super::movie::FALLBACK_POSTER;

/// Renders the trending list, or nothing at all when there are no records.
///
/// Records are shown in the order given, numbered from 1.
pub fn trending_section(records: &[TrendRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let items: String = records
        .iter()
        .enumerate()
        .map(|(index, record)| trending_item(index + 1, record))
        .collect();

    section(
        "trending",
        "Trending Movies",
        &format!(r#"<ul class="flex flex-row gap-5 overflow-x-auto w-full">{items}</ul>"#),
    )
}

fn trending_item(rank: usize, record: &TrendRecord) -> String {
    let poster = if record.poster_url.is_empty() {
        FALLBACK_POSTER.to_string()
    } else {
        escape(&record.poster_url)
    };

    format!(
        r#"<li id="trend-{id}" class="min-w-[230px] flex flex-row items-center">
            <p class="fancy-text mt-[22px] text-nowrap">{rank}</p>
            <img src="{poster}" alt="{term}" class="w-[127px] h-[163px] rounded-lg object-cover -ml-3.5" />
        </li>"#,
        id = escape(&record.id),
        term = escape(&record.search_term),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, term: &str, count: u64) -> TrendRecord {
        TrendRecord {
            id: id.to_string(),
            search_term: term.to_string(),
            count,
            movie_id: 1,
            poster_url: format!("https://img/{term}.jpg"),
        }
    }

    #[test]
    fn test_empty_renders_nothing() {
        assert_eq!(trending_section(&[]), "");
    }

    #[test]
    fn test_ranks_follow_given_order() {
        let html = trending_section(&[record("a", "batman", 9), record("b", "heat", 2)]);
        assert!(html.contains("Trending Movies"));

        let first = html.find(">1</p>").unwrap();
        let second = html.find(">2</p>").unwrap();
        assert!(first < second);
        assert!(html.find("batman.jpg").unwrap() < html.find("heat.jpg").unwrap());
    }

    #[test]
    fn test_missing_poster_uses_fallback() {
        let mut record = record("a", "batman", 1);
        record.poster_url.clear();
        let html = trending_section(&[record]);
        assert!(html.contains(FALLBACK_POSTER));
    }
}
