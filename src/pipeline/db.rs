//! SQLite store for derived Pokémon rows
//!
//! Table written:
//! - `pokemon` - UPSERT on id (every non-key column overwritten)
//!
//! Rows are never deleted. Ids that drop out of the upstream catalog keep
//! their last known values.

use super::types::DerivedRecord;
use rusqlite::{params, Connection};
use std::fmt;
use std::path::Path;

const CREATE_POKEMON_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS pokemon (
        id              INTEGER PRIMARY KEY,
        name            TEXT NOT NULL,
        height          REAL NOT NULL,
        weight          REAL NOT NULL,
        imc             REAL NOT NULL,
        imc_category    TEXT NOT NULL
    )
"#;

const UPSERT_POKEMON: &str = r#"
    INSERT INTO pokemon (id, name, height, weight, imc, imc_category)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    ON CONFLICT(id) DO UPDATE SET
        name = excluded.name,
        height = excluded.height,
        weight = excluded.weight,
        imc = excluded.imc,
        imc_category = excluded.imc_category
"#;

#[derive(Debug)]
pub enum StoreError {
    Database(rusqlite::Error),
    Io(std::io::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Database(err)
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Database(e) => write!(f, "Database error: {}", e),
            StoreError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// Owns the single connection used for one pipeline run
pub struct PokemonStore {
    pub(crate) conn: Connection,
}

impl PokemonStore {
    /// Open (or create) the database file
    ///
    /// Creates the parent directory if needed. Does NOT create the table;
    /// call `ensure_schema` before writing.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db_path = db_path.as_ref();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;
        log::info!("📂 Opened SQLite database: {}", db_path.display());

        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Create the `pokemon` table if absent
    ///
    /// Idempotent. Existing rows and columns are left alone.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(CREATE_POKEMON_TABLE)?;
        log::debug!("✅ Schema ready: pokemon");
        Ok(())
    }

    /// Insert-or-overwrite every record by id
    ///
    /// The whole batch runs in one transaction. If any statement fails the
    /// transaction is dropped uncommitted and rolled back, leaving the table
    /// at its pre-call state.
    ///
    /// Returns the number of records written.
    pub fn upsert(&mut self, records: &[DerivedRecord]) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;

        {
            let mut stmt = tx.prepare(UPSERT_POKEMON)?;
            for record in records {
                stmt.execute(params![
                    record.id,
                    record.name,
                    record.height,
                    record.weight,
                    record.mass_index,
                    record.mass_category,
                ])?;
            }
        }

        tx.commit()?;

        log::info!("💾 Upserted {} pokemon", records.len());
        Ok(records.len())
    }

    /// Total number of stored rows
    pub fn row_count(&self) -> Result<i64, StoreError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM pokemon", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Close the connection, surfacing any error SQLite reports on close
    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, e)| StoreError::Database(e))
    }
}
