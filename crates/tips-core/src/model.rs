use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The difficulty levels a tip may declare, in learning order.
///
/// Statistics always report a bucket for each of these, even when empty.
pub const DIFFICULTY_LEVELS: [&str; 3] = ["beginner", "intermediate", "advanced"];

/// A single GitHub Copilot tip (e.g., "prompt-001: Be Specific in Your Prompts").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Tip {
    /// Tip identifier, e.g. "prompt-001", "shortcut-002". Unique within the
    /// catalog, compared case-insensitively.
    pub id: String,
    /// Short headline for the tip
    pub title: String,
    /// Longer explanation of what to do and why it helps
    pub description: String,
    /// Category name, e.g. "Prompting Techniques", "IDE Shortcuts"
    pub category: String,
    /// One of "beginner", "intermediate", "advanced"
    pub difficulty: String,
    /// Expected productivity impact, e.g. "high", "medium" (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

/// A tip paired with the relevance score one search call computed for it.
///
/// Scores are only comparable within a single search.
#[derive(Debug, Clone)]
pub struct ScoredTip {
    pub tip: Tip,
    pub relevance: u32,
}

/// Ranked search output. `tips` holds the best matches, highest relevance
/// first; `total` counts every match, including those beyond the cap.
#[derive(Debug, Clone)]
pub struct SearchMatches {
    pub total: usize,
    pub tips: Vec<ScoredTip>,
}

/// Catalog-wide counts, recomputed from the live catalog on every call.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CatalogStats {
    /// Number of tips currently in the catalog
    pub total: usize,
    /// Tip count per category, sorted by category name
    pub by_category: BTreeMap<String, usize>,
    /// Tip count per difficulty; always has every level in
    /// [`DIFFICULTY_LEVELS`], zero-filled
    pub by_difficulty: BTreeMap<String, usize>,
}
