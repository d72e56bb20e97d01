//! Read-only aggregate queries over the `pokemon` table
//!
//! All three queries group by `imc_category`. Categories with no rows never
//! appear. Results come back in bin order (Underweight first), then by id.

use super::db::{PokemonStore, StoreError};
use super::types::{DerivedRecord, MassCategory};
use rusqlite::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: MassCategory,
    pub count: i64,
}

/// Which end of the mass-index range to pick per category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extreme {
    Max,
    Min,
}

impl Extreme {
    fn sql_fn(self) -> &'static str {
        match self {
            Extreme::Max => "MAX",
            Extreme::Min => "MIN",
        }
    }
}

impl PokemonStore {
    /// Number of rows per category present
    pub fn count_by_category(&self) -> Result<Vec<CategoryCount>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT imc_category, COUNT(*)
             FROM pokemon
             GROUP BY imc_category",
        )?;

        let mut counts = stmt
            .query_map([], |row| {
                Ok(CategoryCount {
                    category: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        counts.sort_by_key(|c| c.category);
        Ok(counts)
    }

    /// Every row holding its category's highest mass index (ties included)
    pub fn heaviest_by_category(&self) -> Result<Vec<DerivedRecord>, StoreError> {
        self.extremes_by_category(Extreme::Max)
    }

    /// Every row holding its category's lowest mass index (ties included)
    pub fn weakest_by_category(&self) -> Result<Vec<DerivedRecord>, StoreError> {
        self.extremes_by_category(Extreme::Min)
    }

    fn extremes_by_category(&self, extreme: Extreme) -> Result<Vec<DerivedRecord>, StoreError> {
        // Joining on the primary-keyed table yields each matching row once
        let sql = format!(
            "SELECT p.id, p.name, p.height, p.weight, p.imc, p.imc_category
             FROM pokemon p
             JOIN (
                 SELECT imc_category, {}(imc) AS target_imc
                 FROM pokemon
                 GROUP BY imc_category
             ) t ON p.imc_category = t.imc_category AND p.imc = t.target_imc",
            extreme.sql_fn()
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt
            .query_map([], record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.sort_by_key(|r| (r.mass_category, r.id));
        Ok(rows)
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<DerivedRecord> {
    Ok(DerivedRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        height: row.get(2)?,
        weight: row.get(3)?,
        mass_index: row.get(4)?,
        mass_category: row.get(5)?,
    })
}
