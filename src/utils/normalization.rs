//! Normalization Utilities
//!
//! Rescales raw physical measurements (density, strength, hardness) onto a
//! common [0, 1] range, independently per property within one material
//! category.
//!
//! normalized = (value - min) / (max - min)
//!
//! A zero-range property (every material identical) resolves to
//! `DEGENERATE_RANGE_VALUE` for every material instead of dividing by zero.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value assigned to every material when a property has zero range
pub const DEGENERATE_RANGE_VALUE: f64 = 0.0;

/// Physical properties that feed the score synthesizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicalProperty {
    Density,
    Strength,
    Hardness,
}

impl PhysicalProperty {
    pub const ALL: [PhysicalProperty; 3] = [
        PhysicalProperty::Density,
        PhysicalProperty::Strength,
        PhysicalProperty::Hardness,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PhysicalProperty::Density => "density",
            PhysicalProperty::Strength => "strength",
            PhysicalProperty::Hardness => "hardness",
        }
    }
}

impl fmt::Display for PhysicalProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observed range of one property across a category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyRange {
    pub min: f64,
    pub max: f64,
}

impl PropertyRange {
    /// Range over a set of values; `None` for an empty set
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let first = *values.first()?;
        let (min, max) = values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        Some(PropertyRange { min, max })
    }

    pub fn is_degenerate(&self) -> bool {
        self.max - self.min <= 0.0
    }

    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return DEGENERATE_RANGE_VALUE;
        }
        (value - self.min) / (self.max - self.min)
    }
}

/// Min-max normalize a column of raw values
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    match PropertyRange::from_values(values) {
        Some(range) => values.iter().map(|&v| range.normalize(v)).collect(),
        None => Vec::new(),
    }
}

/// One material's normalized physical properties
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedProperties {
    pub density: f64,
    pub strength: f64,
    pub hardness: f64,
}

impl NormalizedProperties {
    pub fn get(&self, property: PhysicalProperty) -> f64 {
        match property {
            PhysicalProperty::Density => self.density,
            PhysicalProperty::Strength => self.strength,
            PhysicalProperty::Hardness => self.hardness,
        }
    }

    /// Composite score: mean of the three physical properties
    pub fn composite(&self) -> f64 {
        (self.density + self.strength + self.hardness) / 3.0
    }
}

/// Normalize density, strength and hardness columns of one category
///
/// The three slices must have equal length (one entry per material). Zero-range
/// properties are logged and fall back to `DEGENERATE_RANGE_VALUE`.
pub fn normalize_category(
    category: &str,
    density: &[f64],
    strength: &[f64],
    hardness: &[f64],
) -> Vec<NormalizedProperties> {
    let columns = [
        (PhysicalProperty::Density, density),
        (PhysicalProperty::Strength, strength),
        (PhysicalProperty::Hardness, hardness),
    ];

    for (property, values) in &columns {
        if let Some(range) = PropertyRange::from_values(values) {
            if range.is_degenerate() && values.len() > 1 {
                tracing::warn!(
                    "{}: {} has zero range ({}); normalized to {}",
                    category,
                    property,
                    range.min,
                    DEGENERATE_RANGE_VALUE
                );
            }
        }
    }

    let density_norm = min_max_normalize(density);
    let strength_norm = min_max_normalize(strength);
    let hardness_norm = min_max_normalize(hardness);

    density_norm
        .into_iter()
        .zip(strength_norm)
        .zip(hardness_norm)
        .map(|((density, strength), hardness)| NormalizedProperties {
            density,
            strength,
            hardness,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_density_in_range() {
        // density 5 where the category spans [2, 10] → 3/8
        let normalized = min_max_normalize(&[2.0, 5.0, 10.0]);
        assert_relative_eq!(normalized[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(normalized[1], 0.375, epsilon = 1e-12);
        assert_relative_eq!(normalized[2], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_identical_values_use_fallback() {
        let normalized = min_max_normalize(&[7.8, 7.8, 7.8, 7.8]);
        assert_eq!(normalized.len(), 4);
        for value in normalized {
            assert!(!value.is_nan());
            assert_eq!(value, DEGENERATE_RANGE_VALUE);
        }
    }

    #[test]
    fn test_single_material_is_degenerate() {
        assert_eq!(min_max_normalize(&[3.0]), vec![DEGENERATE_RANGE_VALUE]);
        assert!(min_max_normalize(&[]).is_empty());
    }

    #[test]
    fn test_normalize_category_per_property() {
        let rows = normalize_category(
            "Metals",
            &[2.0, 10.0],
            &[100.0, 100.0],
            &[0.0, 50.0],
        );
        assert_eq!(rows.len(), 2);
        assert_relative_eq!(rows[1].density, 1.0, epsilon = 1e-12);
        assert_eq!(rows[0].strength, DEGENERATE_RANGE_VALUE);
        assert_eq!(rows[1].strength, DEGENERATE_RANGE_VALUE);
        assert_relative_eq!(rows[1].composite(), 2.0 / 3.0, epsilon = 1e-12);
    }
}
