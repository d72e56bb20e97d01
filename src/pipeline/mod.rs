//! # Pokémon mass-index ETL
//!
//! One run moves data strictly one way:
//!
//! 1. `pokeapi` fetches raw records (height in dm, weight in hg)
//! 2. `transformer` normalizes units, computes the mass index and classifies it
//! 3. `db` upserts the batch into SQLite in a single transaction
//! 4. `analytics` answers the per-category count / heaviest / weakest queries
//!
//! `engine::run_once` sequences the stages and stops at the first failure.
//!
//! ## Schema
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS pokemon (
//!     id INTEGER PRIMARY KEY, name TEXT, height REAL,
//!     weight REAL, imc REAL, imc_category TEXT
//! )
//! ```
//!
//! The table is append-or-update only. Rows whose id disappears upstream are
//! kept with their last values.

pub mod types;
pub mod classifier;
pub mod transformer;
pub mod db;
pub mod analytics;
pub mod pokeapi;
pub mod engine;
pub mod config;

// Re-export commonly used types
pub use types::{DerivedRecord, MassCategory, RawRecord};
pub use classifier::{classify, ClassifyError};
pub use transformer::{transform, TransformError};
pub use db::{PokemonStore, StoreError};
pub use analytics::CategoryCount;
pub use pokeapi::{FetchError, Fetcher, PokeApiClient};
pub use engine::{run_once, PipelineError, RunReport};
pub use config::PipelineConfig;
