/// Fuzzy topic search over the tip catalog.
///
/// A deliberate scan-and-score over every tip: the catalog is small and
/// fully in memory, so recomputing the ranking per call is cheaper to
/// maintain than any index would be.
use crate::model::{ScoredTip, SearchMatches, Tip};

/// Result lists are truncated to this many tips; the total match count is
/// reported alongside so callers can tell when matches were cut off.
pub const MAX_SEARCH_RESULTS: usize = 10;

/// Score one tip against a lowercased search term. Zero means no match.
///
/// Weights, highest signal first:
/// - whole term appears in the title: +10, plus +5 if the title starts with it
/// - whole term appears in the description: +3
/// - each whitespace-separated word of the term in the title: +2
/// - each such word in the description: +1
///
/// The empty term is a substring of everything, so it matches every tip;
/// whitespace-only terms contain no words and score zero.
fn relevance(tip: &Tip, term: &str) -> u32 {
    let title = tip.title.to_lowercase();
    let description = tip.description.to_lowercase();

    let mut score = 0;

    if title.contains(term) {
        score += 10;
        if title.starts_with(term) {
            score += 5;
        }
    }

    if description.contains(term) {
        score += 3;
    }

    for word in term.split_whitespace() {
        if title.contains(word) {
            score += 2;
        }
        if description.contains(word) {
            score += 1;
        }
    }

    score
}

/// Rank every filter-passing tip against `term`, best match first.
///
/// Ties keep catalog order (the sort is stable). The returned list is capped
/// at [`MAX_SEARCH_RESULTS`] while `total` counts all matches.
pub fn search_tips(
    tips: &[Tip],
    term: &str,
    category: Option<&str>,
    difficulty: Option<&str>,
) -> SearchMatches {
    let term = term.to_lowercase();

    let mut matches: Vec<ScoredTip> = tips
        .iter()
        .filter(|tip| passes_filter(&tip.category, category))
        .filter(|tip| passes_filter(&tip.difficulty, difficulty))
        .filter_map(|tip| {
            let relevance = relevance(tip, &term);
            (relevance > 0).then(|| ScoredTip {
                tip: tip.clone(),
                relevance,
            })
        })
        .collect();

    matches.sort_by(|a, b| b.relevance.cmp(&a.relevance));

    let total = matches.len();
    matches.truncate(MAX_SEARCH_RESULTS);

    SearchMatches {
        total,
        tips: matches,
    }
}

/// Case-insensitive equality filter; an absent filter passes everything.
pub(crate) fn passes_filter(value: &str, filter: Option<&str>) -> bool {
    filter.map_or(true, |f| value.eq_ignore_ascii_case(f))
}
