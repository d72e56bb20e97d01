//! Core record types flowing through the pipeline
//!
//! `RawRecord` is what the PokéAPI hands back, `DerivedRecord` is what lands
//! in the `pokemon` table.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pokémon as returned by `GET /pokemon/{id}`
///
/// Height is in decimetres and weight in hectograms. The upstream payload
/// carries dozens of other fields; serde ignores everything not listed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: i64,
    pub name: String,
    pub height: i64,
    pub weight: i64,
}

/// One row of the `pokemon` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecord {
    pub id: i64,
    pub name: String,
    /// Metres
    pub height: f64,
    /// Kilograms
    pub weight: f64,
    /// `weight / height²`, rounded to 2 decimals (column `imc`)
    pub mass_index: f64,
    /// Column `imc_category`
    pub mass_category: MassCategory,
}

/// Mass-index bucket, declared in bin order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MassCategory {
    #[serde(rename = "Underweight")]
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    #[serde(rename = "Overweight")]
    Overweight,
    #[serde(rename = "Obesity I")]
    ObesityI,
    #[serde(rename = "Obesity II")]
    ObesityII,
    #[serde(rename = "Obesity III")]
    ObesityIII,
}

impl MassCategory {
    pub const ALL: [MassCategory; 6] = [
        MassCategory::Underweight,
        MassCategory::NormalWeight,
        MassCategory::Overweight,
        MassCategory::ObesityI,
        MassCategory::ObesityII,
        MassCategory::ObesityIII,
    ];

    /// Label stored in `imc_category`
    pub fn as_str(&self) -> &'static str {
        match self {
            MassCategory::Underweight => "Underweight",
            MassCategory::NormalWeight => "Normal weight",
            MassCategory::Overweight => "Overweight",
            MassCategory::ObesityI => "Obesity I",
            MassCategory::ObesityII => "Obesity II",
            MassCategory::ObesityIII => "Obesity III",
        }
    }
}

impl fmt::Display for MassCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown mass category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for MassCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MassCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl ToSql for MassCategory {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for MassCategory {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: UnknownCategory| FromSqlError::Other(Box::new(e)))
    }
}
