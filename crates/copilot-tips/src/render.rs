/// Markdown rendering for the two catalog resources.
///
/// Pure string builders over the store's aggregation views, kept out of
/// `server.rs` so the formats are testable without an MCP session.
use std::collections::BTreeMap;

use tips_core::model::{CatalogStats, DIFFICULTY_LEVELS};

/// Render `tips://categories`: a numbered list of categories with counts,
/// sorted by category name.
pub fn categories_markdown(categories: &BTreeMap<String, usize>) -> String {
    let mut out = String::from("# GitHub Copilot Tip Categories\n\n");
    for (i, (category, count)) in categories.iter().enumerate() {
        out.push_str(&format!("{}. **{category}** ({count} tips)\n", i + 1));
    }
    out
}

/// Render `tips://stats`: total count plus per-category and per-difficulty
/// tables. Difficulty rows cover every known level, capitalized, even when
/// zero.
pub fn stats_markdown(stats: &CatalogStats) -> String {
    let mut out = String::from("# GitHub Copilot Tips Statistics\n\n");
    out.push_str(&format!("**Total Tips:** {}\n\n", stats.total));

    out.push_str("## By Category\n\n");
    out.push_str("| Category | Count |\n|----------|-------|\n");
    for (category, count) in &stats.by_category {
        out.push_str(&format!("| {category} | {count} |\n"));
    }

    out.push_str("\n## By Difficulty\n\n");
    out.push_str("| Difficulty | Count |\n|------------|-------|\n");
    for level in DIFFICULTY_LEVELS {
        let count = stats.by_difficulty.get(level).copied().unwrap_or(0);
        out.push_str(&format!("| {} | {count} |\n", capitalize(level)));
    }

    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
