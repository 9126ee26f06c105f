use std::path::PathBuf;

/// Failures a catalog operation can report.
///
/// Not-found and empty-result variants carry enough context for a caller to
/// build a useful hint (sample ids, the filters that matched nothing).
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("tip not found: '{id}'")]
    TipNotFound {
        id: String,
        /// Up to five ids from the live catalog, as a hint
        available_ids: Vec<String>,
    },

    #[error("no tips found matching '{term}'")]
    NoMatches { term: String },

    #[error("no tips match the specified filters")]
    NoTipsForFilter {
        category: Option<String>,
        difficulty: Option<String>,
    },

    #[error("duplicate tip id '{id}' in tips document")]
    DuplicateTipId { id: String },

    #[error("failed to read tips document at {}: {source}", .path.display())]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tips document: {0}")]
    DocumentParse(#[from] serde_json::Error),
}
