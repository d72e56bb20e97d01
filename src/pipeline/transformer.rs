//! Raw API records → derived rows
//!
//! The batch either transforms completely or not at all. A zero height or an
//! unclassifiable mass index rejects the whole batch instead of skipping the
//! record, so bad upstream data never reaches the table half-loaded.

use super::classifier::classify;
use super::types::{DerivedRecord, RawRecord};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Nothing to load
    Empty,
    /// `height == 0`, mass index undefined
    ZeroHeight { id: i64 },
    /// Mass index outside every bin (e.g. zero weight)
    Unclassifiable { id: i64, mass_index: f64 },
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::Empty => write!(f, "Data frame is empty"),
            TransformError::ZeroHeight { id } => {
                write!(f, "Division error: pokemon {} has zero height", id)
            }
            TransformError::Unclassifiable { id, mass_index } => {
                write!(f, "Pokemon {} has unclassifiable mass index {}", id, mass_index)
            }
        }
    }
}

impl std::error::Error for TransformError {}

/// Transform a fetched batch into rows ready for upsert
pub fn transform(raw_records: &[RawRecord]) -> Result<Vec<DerivedRecord>, TransformError> {
    if raw_records.is_empty() {
        return Err(TransformError::Empty);
    }

    raw_records.iter().map(derive_record).collect()
}

fn derive_record(raw: &RawRecord) -> Result<DerivedRecord, TransformError> {
    if raw.height == 0 {
        return Err(TransformError::ZeroHeight { id: raw.id });
    }

    let height = raw.height as f64 / 10.0;
    let weight = raw.weight as f64 / 10.0;
    let mass_index = round2(weight / height.powi(2));

    let mass_category = classify(mass_index).map_err(|e| TransformError::Unclassifiable {
        id: raw.id,
        mass_index: e.mass_index,
    })?;

    log::debug!(
        "Derived: id={} name={} height={:.1}m weight={:.1}kg imc={:.2} category={}",
        raw.id,
        raw.name,
        height,
        weight,
        mass_index,
        mass_category
    );

    Ok(DerivedRecord {
        id: raw.id,
        name: raw.name.clone(),
        height,
        weight,
        mass_index,
        mass_category,
    })
}

/// Two-decimal rounding, exact halves go to the even neighbour
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::MassCategory;

    fn raw(id: i64, name: &str, height: i64, weight: i64) -> RawRecord {
        RawRecord {
            id,
            name: name.to_string(),
            height,
            weight,
        }
    }

    #[test]
    fn test_bulbasaur() {
        let derived = transform(&[raw(1, "bulbasaur", 7, 69)]).unwrap();

        assert_eq!(derived.len(), 1);
        let bulbasaur = &derived[0];
        assert_eq!(bulbasaur.id, 1);
        assert_eq!(bulbasaur.name, "bulbasaur");
        assert_eq!(bulbasaur.height, 0.7);
        assert_eq!(bulbasaur.weight, 6.9);
        assert_eq!(bulbasaur.mass_index, 14.08);
        assert_eq!(bulbasaur.mass_category, MassCategory::Underweight);
    }

    #[test]
    fn test_charmander() {
        let derived = transform(&[raw(4, "charmander", 6, 85)]).unwrap();

        let charmander = &derived[0];
        assert_eq!(charmander.height, 0.6);
        assert_eq!(charmander.weight, 8.5);
        assert_eq!(charmander.mass_index, 23.61);
        assert_eq!(charmander.mass_category, MassCategory::NormalWeight);
    }

    #[test]
    fn test_half_rounds_to_even() {
        // 26.1 / 1.44 = 18.125 and 0.9 / 1.44 = 0.625
        let derived = transform(&[raw(1, "heavy", 12, 261), raw(2, "light", 12, 9)]).unwrap();

        assert_eq!(derived[0].mass_index, 18.12);
        assert_eq!(derived[0].mass_category, MassCategory::Underweight);
        assert_eq!(derived[1].mass_index, 0.62);
    }

    #[test]
    fn test_batch_keeps_input_order() {
        let batch = vec![
            raw(1, "bulbasaur", 7, 69),
            raw(2, "ivysaur", 10, 130),
            raw(3, "venusaur", 20, 1000),
        ];

        let derived = transform(&batch).unwrap();
        let ids: Vec<i64> = derived.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        // 13.0 / 1.0² = 13.0, 100.0 / 2.0² = 25.0
        assert_eq!(derived[1].mass_index, 13.0);
        assert_eq!(derived[1].mass_category, MassCategory::Underweight);
        assert_eq!(derived[2].mass_index, 25.0);
        assert_eq!(derived[2].mass_category, MassCategory::Overweight);
    }

    #[test]
    fn test_empty_batch() {
        assert_eq!(transform(&[]), Err(TransformError::Empty));
    }

    #[test]
    fn test_zero_height_rejects_whole_batch() {
        let batch = vec![raw(1, "bulbasaur", 7, 69), raw(99, "glitch", 0, 10)];

        assert_eq!(transform(&batch), Err(TransformError::ZeroHeight { id: 99 }));
    }

    #[test]
    fn test_zero_weight_is_unclassifiable() {
        let result = transform(&[raw(5, "ghastly", 13, 0)]);

        assert!(matches!(
            result,
            Err(TransformError::Unclassifiable { id: 5, .. })
        ));
    }
}
