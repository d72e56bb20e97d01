//! Mass-index binning
//!
//! Bins are right-closed: an edge value belongs to the lower bin, so 18.5 is
//! still `Underweight` and 18.51 is `Normal weight`. The last bin is
//! unbounded.

use super::types::MassCategory;
use std::fmt;

/// Inclusive upper bound of each bounded bin, in bin order
const BIN_UPPER_BOUNDS: [(f64, MassCategory); 5] = [
    (18.5, MassCategory::Underweight),
    (24.9, MassCategory::NormalWeight),
    (29.9, MassCategory::Overweight),
    (34.9, MassCategory::ObesityI),
    (39.9, MassCategory::ObesityII),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifyError {
    pub mass_index: f64,
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mass index {} has no category (must be finite and > 0)", self.mass_index)
    }
}

impl std::error::Error for ClassifyError {}

/// Map a mass index to its category
///
/// Fails for `mass_index <= 0`, NaN and infinities.
pub fn classify(mass_index: f64) -> Result<MassCategory, ClassifyError> {
    if !mass_index.is_finite() || mass_index <= 0.0 {
        return Err(ClassifyError { mass_index });
    }

    let category = BIN_UPPER_BOUNDS
        .iter()
        .find(|(upper, _)| mass_index <= *upper)
        .map(|(_, category)| *category)
        .unwrap_or(MassCategory::ObesityIII);

    Ok(category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_belong_to_lower_bin() {
        assert_eq!(classify(18.5), Ok(MassCategory::Underweight));
        assert_eq!(classify(24.9), Ok(MassCategory::NormalWeight));
        assert_eq!(classify(29.9), Ok(MassCategory::Overweight));
        assert_eq!(classify(34.9), Ok(MassCategory::ObesityI));
        assert_eq!(classify(39.9), Ok(MassCategory::ObesityII));
    }

    #[test]
    fn test_just_above_boundaries() {
        assert_eq!(classify(18.51), Ok(MassCategory::NormalWeight));
        assert_eq!(classify(24.91), Ok(MassCategory::Overweight));
        assert_eq!(classify(29.91), Ok(MassCategory::ObesityI));
        assert_eq!(classify(34.91), Ok(MassCategory::ObesityII));
        assert_eq!(classify(39.91), Ok(MassCategory::ObesityIII));
    }

    #[test]
    fn test_interior_values() {
        assert_eq!(classify(0.01), Ok(MassCategory::Underweight));
        assert_eq!(classify(14.08), Ok(MassCategory::Underweight));
        assert_eq!(classify(23.61), Ok(MassCategory::NormalWeight));
        assert_eq!(classify(1250.0), Ok(MassCategory::ObesityIII));
    }

    #[test]
    fn test_rejects_non_positive_and_non_finite() {
        assert!(classify(0.0).is_err());
        assert!(classify(-3.2).is_err());
        assert!(classify(f64::NAN).is_err());
        assert!(classify(f64::INFINITY).is_err());
        assert!(classify(f64::NEG_INFINITY).is_err());
    }
}
