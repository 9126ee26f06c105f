/// The in-memory tip catalog and its operations.
///
/// `TipStore` keeps the catalog behind a `tokio::sync::RwLock`: reads share
/// the lock, delete and reset take it exclusively. The exclusive write is
/// what makes concurrent deletes of the same id resolve to exactly one
/// winner.
///
/// The `loaded` flag is separate from emptiness on purpose. A catalog that
/// was loaded and then emptied by deletes stays empty; reset is the only way
/// to repopulate it from the source.
use std::collections::BTreeMap;
use std::path::PathBuf;

use rand::seq::SliceRandom;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::loader::TipSource;
use crate::model::{CatalogStats, SearchMatches, Tip, DIFFICULTY_LEVELS};
use crate::search;

/// How many catalog ids a not-found error carries as a hint.
const ID_SAMPLE_LEN: usize = 5;

#[derive(Debug)]
struct CatalogState {
    tips: Vec<Tip>,
    loaded: bool,
}

pub struct TipStore {
    source: TipSource,
    state: RwLock<CatalogState>,
}

impl TipStore {
    /// A store backed by the document at `path`. Nothing is read until the
    /// first operation.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::new(TipSource::File(path.into()))
    }

    /// A store backed by a fixed in-memory list; reset restores exactly
    /// this list.
    pub fn from_tips(tips: Vec<Tip>) -> Self {
        Self::new(TipSource::Fixed(tips))
    }

    pub fn new(source: TipSource) -> Self {
        Self {
            source,
            state: RwLock::new(CatalogState {
                tips: Vec::new(),
                loaded: false,
            }),
        }
    }

    /// Populate the catalog from the source if it has never been loaded.
    ///
    /// A loaded-but-emptied catalog is left alone: deleting the last tip
    /// must not trigger a reload on the next read.
    pub async fn ensure_loaded(&self) -> Result<(), CatalogError> {
        {
            let state = self.state.read().await;
            if state.loaded {
                return Ok(());
            }
        }

        let mut state = self.state.write().await;
        // Re-check: another task may have loaded while we waited for the lock
        if !state.loaded {
            state.tips = self.source.load()?;
            state.loaded = true;
            info!(tip_count = state.tips.len(), "catalog loaded");
        }
        Ok(())
    }

    /// Number of tips currently in the catalog.
    pub async fn count(&self) -> Result<usize, CatalogError> {
        self.ensure_loaded().await?;
        Ok(self.state.read().await.tips.len())
    }

    // --- Lookup ---

    /// Find the tip whose id matches `id` case-insensitively.
    pub async fn get_by_id(&self, id: &str) -> Result<Tip, CatalogError> {
        self.ensure_loaded().await?;
        let state = self.state.read().await;
        state
            .tips
            .iter()
            .find(|tip| tip.id.eq_ignore_ascii_case(id))
            .cloned()
            .ok_or_else(|| CatalogError::TipNotFound {
                id: id.to_string(),
                available_ids: sample_ids(&state.tips),
            })
    }

    /// Rank tips against `term` under the optional filters; zero matches is
    /// reported as `NoMatches` rather than an empty list.
    pub async fn search(
        &self,
        term: &str,
        category: Option<&str>,
        difficulty: Option<&str>,
    ) -> Result<SearchMatches, CatalogError> {
        self.ensure_loaded().await?;
        let state = self.state.read().await;
        let matches = search::search_tips(&state.tips, term, category, difficulty);
        if matches.tips.is_empty() {
            return Err(CatalogError::NoMatches {
                term: term.to_string(),
            });
        }
        Ok(matches)
    }

    /// Draw one tip uniformly from the filter-passing pool.
    ///
    /// Also returns the pool size so callers can tell how constrained the
    /// draw was.
    pub async fn random(
        &self,
        category: Option<&str>,
        difficulty: Option<&str>,
    ) -> Result<(Tip, usize), CatalogError> {
        self.ensure_loaded().await?;
        let state = self.state.read().await;
        let pool: Vec<Tip> = state
            .tips
            .iter()
            .filter(|tip| search::passes_filter(&tip.category, category))
            .filter(|tip| search::passes_filter(&tip.difficulty, difficulty))
            .cloned()
            .collect();

        let chosen = pool
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| CatalogError::NoTipsForFilter {
                category: category.map(str::to_string),
                difficulty: difficulty.map(str::to_string),
            })?;
        Ok((chosen, pool.len()))
    }

    // --- Mutation ---

    /// Remove the first case-insensitive id match from the live catalog.
    ///
    /// Returns the removed tip and the remaining count. The write lock
    /// serializes the scan-and-remove, so of any set of concurrent deletes
    /// for the same id exactly one succeeds and the rest see not-found.
    pub async fn delete(&self, id: &str) -> Result<(Tip, usize), CatalogError> {
        self.ensure_loaded().await?;
        let mut state = self.state.write().await;
        let position = state
            .tips
            .iter()
            .position(|tip| tip.id.eq_ignore_ascii_case(id));
        match position {
            Some(index) => {
                let removed = state.tips.remove(index);
                debug!(id = %removed.id, remaining = state.tips.len(), "tip deleted");
                Ok((removed, state.tips.len()))
            }
            None => Err(CatalogError::TipNotFound {
                id: id.to_string(),
                available_ids: sample_ids(&state.tips),
            }),
        }
    }

    /// Discard every in-memory mutation and reload from the source.
    ///
    /// Works whether or not the catalog was ever loaded, and marks it loaded
    /// either way.
    pub async fn reset(&self) -> Result<usize, CatalogError> {
        let mut state = self.state.write().await;
        state.tips = self.source.load()?;
        state.loaded = true;
        info!(tip_count = state.tips.len(), "catalog reset from source");
        Ok(state.tips.len())
    }

    // --- Aggregation ---

    /// Tip count per category over the live catalog, sorted by name.
    pub async fn categories(&self) -> Result<BTreeMap<String, usize>, CatalogError> {
        self.ensure_loaded().await?;
        let state = self.state.read().await;
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for tip in &state.tips {
            *counts.entry(tip.category.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Catalog statistics: total plus per-category and per-difficulty
    /// counts, computed fresh from the live catalog.
    pub async fn stats(&self) -> Result<CatalogStats, CatalogError> {
        self.ensure_loaded().await?;
        let state = self.state.read().await;

        let mut by_category: BTreeMap<String, usize> = BTreeMap::new();
        for tip in &state.tips {
            *by_category.entry(tip.category.clone()).or_insert(0) += 1;
        }

        // Difficulty buckets are the fixed known levels, zero-filled
        let mut by_difficulty: BTreeMap<String, usize> = BTreeMap::new();
        for level in DIFFICULTY_LEVELS {
            let count = state
                .tips
                .iter()
                .filter(|tip| tip.difficulty.eq_ignore_ascii_case(level))
                .count();
            by_difficulty.insert(level.to_string(), count);
        }

        Ok(CatalogStats {
            total: state.tips.len(),
            by_category,
            by_difficulty,
        })
    }
}

fn sample_ids(tips: &[Tip]) -> Vec<String> {
    tips.iter()
        .take(ID_SAMPLE_LEN)
        .map(|tip| tip.id.clone())
        .collect()
}
