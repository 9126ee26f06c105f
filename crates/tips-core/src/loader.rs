/// Loader for the tips document.
///
/// The document is JSON with a single top-level `tips` key holding an array
/// of tip objects. An absent document means an empty catalog, not an error;
/// a document that repeats a tip id (in any casing) is rejected up front so
/// lookups and deletes can assume ids are unique.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::CatalogError;
use crate::model::Tip;

#[derive(Debug, Deserialize)]
struct TipsDocument {
    #[serde(default)]
    tips: Vec<Tip>,
}

/// Parse a tips document from its JSON text.
///
/// A document without a `tips` key parses to an empty list. An entry missing
/// a required field fails here rather than in whichever operation would have
/// touched the field later.
pub fn parse_tips_document(content: &str) -> Result<Vec<Tip>, CatalogError> {
    let document: TipsDocument = serde_json::from_str(content)?;
    validate_unique_ids(&document.tips)?;
    Ok(document.tips)
}

/// Load tips from the document at `path`.
///
/// Returns an empty list when the file does not exist.
pub fn load_tips(path: &Path) -> Result<Vec<Tip>, CatalogError> {
    if !path.exists() {
        info!(
            path = %path.display(),
            "tips document not found, starting with an empty catalog"
        );
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::DocumentRead {
        path: path.to_path_buf(),
        source,
    })?;
    let tips = parse_tips_document(&content)?;
    info!(path = %path.display(), tip_count = tips.len(), "tips document loaded");
    Ok(tips)
}

/// Where a store loads its catalog from.
///
/// `File` is the production source; `Fixed` injects an in-memory list so
/// tests can run without touching disk. Both go through the same duplicate-id
/// validation, and both are re-read in full by a reset.
#[derive(Debug, Clone)]
pub enum TipSource {
    File(PathBuf),
    Fixed(Vec<Tip>),
}

impl TipSource {
    pub fn load(&self) -> Result<Vec<Tip>, CatalogError> {
        match self {
            TipSource::File(path) => load_tips(path),
            TipSource::Fixed(tips) => {
                validate_unique_ids(tips)?;
                Ok(tips.clone())
            }
        }
    }
}

/// Reject documents that repeat an id in any casing. Lookup and delete both
/// return the first id match, which only behaves sanely when ids are unique.
fn validate_unique_ids(tips: &[Tip]) -> Result<(), CatalogError> {
    let mut seen: HashSet<String> = HashSet::with_capacity(tips.len());
    for tip in tips {
        if !seen.insert(tip.id.to_ascii_lowercase()) {
            return Err(CatalogError::DuplicateTipId { id: tip.id.clone() });
        }
    }
    Ok(())
}
