//! Pipeline driver: fetch → transform → load → analyze
//!
//! Every stage runs to completion before the next starts. Any failure ends
//! the run immediately; the store is only touched once a full batch has been
//! fetched and transformed.

use super::analytics::CategoryCount;
use super::db::{PokemonStore, StoreError};
use super::pokeapi::{FetchError, Fetcher};
use super::transformer::{transform, TransformError};
use super::types::DerivedRecord;
use std::fmt;

#[derive(Debug)]
pub enum PipelineError {
    Fetch(FetchError),
    Transform(TransformError),
    Store(StoreError),
}

impl From<FetchError> for PipelineError {
    fn from(err: FetchError) -> Self {
        PipelineError::Fetch(err)
    }
}

impl From<TransformError> for PipelineError {
    fn from(err: TransformError) -> Self {
        PipelineError::Transform(err)
    }
}

impl From<StoreError> for PipelineError {
    fn from(err: StoreError) -> Self {
        PipelineError::Store(err)
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Fetch(e) => write!(f, "Pokemon not found: {}", e),
            PipelineError::Transform(e) => write!(f, "{}", e),
            PipelineError::Store(e) => write!(f, "Store failure: {}", e),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Fetch(e) => Some(e),
            PipelineError::Transform(e) => Some(e),
            PipelineError::Store(e) => Some(e),
        }
    }
}

/// Outcome of one successful run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub loaded: usize,
    pub counts: Vec<CategoryCount>,
    pub heaviest: Vec<DerivedRecord>,
    pub weakest: Vec<DerivedRecord>,
}

/// Execute one full run against an open store
///
/// The schema is ensured right before the upsert, so a failed fetch or an
/// empty/invalid batch leaves the database untouched.
pub async fn run_once(
    fetcher: &dyn Fetcher,
    store: &mut PokemonStore,
) -> Result<RunReport, PipelineError> {
    log::info!("📡 Stage 1/4: fetch");
    let raw_records = fetcher.fetch().await?;

    log::info!("🔧 Stage 2/4: transform ({} raw records)", raw_records.len());
    let derived = transform(&raw_records)?;

    log::info!("💾 Stage 3/4: load ({} records)", derived.len());
    store.ensure_schema()?;
    let loaded = store.upsert(&derived)?;

    log::info!("📊 Stage 4/4: analyze");
    let report = RunReport {
        loaded,
        counts: store.count_by_category()?,
        heaviest: store.heaviest_by_category()?,
        weakest: store.weakest_by_category()?,
    };

    log::info!("✅ Run complete: {} pokemon loaded", report.loaded);
    Ok(report)
}
