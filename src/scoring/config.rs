//! Scoring profiles
//!
//! Per-category coefficient tables mapping normalized physical properties to
//! combat stats. Profiles load from JSON so a new category needs no code
//! change; `ScoringConfig::builtin()` carries the Metals and Wood tables.
//!
//! Each stat is `clamp01(clamp01(offset + Σ weight × property) × scale)`.

use crate::error::ForgeError;
use crate::types::MaterialCategory;
use crate::utils::PhysicalProperty;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

fn unit_scale() -> f64 {
    1.0
}

fn default_name_column() -> String {
    "Name".to_string()
}

/// Linear formula for one combat stat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatFormula {
    #[serde(default)]
    pub offset: f64,
    #[serde(default)]
    pub weights: BTreeMap<PhysicalProperty, f64>,
    #[serde(default = "unit_scale")]
    pub scale: f64,
}

impl StatFormula {
    pub fn weighted(weights: &[(PhysicalProperty, f64)]) -> Self {
        StatFormula {
            offset: 0.0,
            weights: weights.iter().copied().collect(),
            scale: 1.0,
        }
    }

    /// `scale × (1 − Σ weight × property)`
    pub fn inverse(weights: &[(PhysicalProperty, f64)], scale: f64) -> Self {
        StatFormula {
            offset: 1.0,
            weights: weights.iter().map(|&(p, w)| (p, -w)).collect(),
            scale,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatFormulas {
    pub slash: StatFormula,
    pub pierce: StatFormula,
    pub blunt: StatFormula,
    pub magic: StatFormula,
}

/// Raw measurement column feeding each physical property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyColumns {
    pub density: String,
    pub strength: String,
    pub hardness: String,
}

impl PropertyColumns {
    pub fn column(&self, property: PhysicalProperty) -> &str {
        match property {
            PhysicalProperty::Density => &self.density,
            PhysicalProperty::Strength => &self.strength,
            PhysicalProperty::Hardness => &self.hardness,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProfile {
    /// Column holding the material name in the raw measurement table
    #[serde(default = "default_name_column")]
    pub name_column: String,
    pub columns: PropertyColumns,
    pub stats: StatFormulas,
}

/// Category name → scoring profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoringConfig {
    profiles: BTreeMap<String, CategoryProfile>,
}

impl ScoringConfig {
    /// Load profiles from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scoring profiles: {:?}", path))?;

        let config: ScoringConfig = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse scoring profiles JSON")?;

        if config.profiles.is_empty() {
            anyhow::bail!("Scoring profiles file {:?} defines no categories", path);
        }

        Ok(config)
    }

    /// Built-in Metals and Wood profiles
    pub fn builtin() -> Self {
        use PhysicalProperty::{Density, Hardness, Strength};

        let mut profiles = BTreeMap::new();

        profiles.insert(
            MaterialCategory::Metals.to_string(),
            CategoryProfile {
                name_column: "Material".to_string(),
                columns: PropertyColumns {
                    density: "Density (g/cm^3)".to_string(),
                    strength: "Tensile Strength (MPa)".to_string(),
                    hardness: "Hardness (MPa)".to_string(),
                },
                stats: StatFormulas {
                    slash: StatFormula::weighted(&[(Strength, 0.6), (Hardness, 0.4)]),
                    pierce: StatFormula::weighted(&[(Strength, 0.4), (Hardness, 0.6)]),
                    blunt: StatFormula::weighted(&[(Density, 0.5), (Strength, 0.5)]),
                    // Magic runs inverse to physical mass and toughness
                    magic: StatFormula::inverse(
                        &[(Density, 1.0 / 3.0), (Strength, 1.0 / 3.0), (Hardness, 1.0 / 3.0)],
                        0.5,
                    ),
                },
            },
        );

        profiles.insert(
            MaterialCategory::Wood.to_string(),
            CategoryProfile {
                name_column: "Name".to_string(),
                columns: PropertyColumns {
                    density: "Density (g/cm^3)".to_string(),
                    strength: "Modulus of Rupture (MPa)".to_string(),
                    hardness: "Janka Hardness (N)".to_string(),
                },
                stats: StatFormulas {
                    slash: StatFormula::weighted(&[(Strength, 0.7), (Hardness, 0.3)]),
                    pierce: StatFormula::weighted(&[(Hardness, 0.7), (Strength, 0.3)]),
                    blunt: StatFormula::weighted(&[(Density, 0.8), (Strength, 0.2)]),
                    magic: StatFormula::inverse(&[(Density, 1.0)], 0.8),
                },
            },
        );

        ScoringConfig { profiles }
    }

    /// Profile for a category, or `UnknownCategory` when none is configured
    pub fn profile(&self, category: &MaterialCategory) -> Result<&CategoryProfile, ForgeError> {
        self.profiles
            .get(category.as_str())
            .ok_or_else(|| ForgeError::UnknownCategory(category.to_string()))
    }

    pub fn categories(&self) -> impl Iterator<Item = MaterialCategory> + '_ {
        self.profiles.keys().map(|name| MaterialCategory::from(name.as_str()))
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_builtin_has_metals_and_wood() {
        let config = ScoringConfig::builtin();
        let metals = config.profile(&MaterialCategory::Metals).unwrap();
        assert_eq!(metals.name_column, "Material");
        assert_relative_eq!(
            metals.stats.slash.weights[&PhysicalProperty::Strength],
            0.6,
            epsilon = 1e-12
        );
        assert!(config.profile(&MaterialCategory::Wood).is_ok());
    }

    #[test]
    fn test_unknown_category_is_configuration_error() {
        let config = ScoringConfig::builtin();
        let err = config.profile(&MaterialCategory::Cloth).unwrap_err();
        assert!(matches!(err, ForgeError::UnknownCategory(ref c) if c == "Cloth"));
        assert_eq!(err.to_string(), "scoring configuration missing for category 'Cloth'");
    }

    #[test]
    fn test_shipped_profiles_match_builtin() {
        let shipped: ScoringConfig =
            serde_json::from_str(include_str!("../../config/scoring_profiles.json")).unwrap();
        let builtin = ScoringConfig::builtin();
        for category in builtin.categories() {
            let a = shipped.profile(&category).unwrap();
            let b = builtin.profile(&category).unwrap();
            assert_eq!(a.name_column, b.name_column);
            assert_eq!(a.columns, b.columns);
            assert_relative_eq!(a.stats.magic.scale, b.stats.magic.scale, epsilon = 1e-12);
            for (property, weight) in &b.stats.magic.weights {
                assert_relative_eq!(a.stats.magic.weights[property], *weight, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_formula_defaults_from_json() {
        let formula: StatFormula =
            serde_json::from_str(r#"{"weights": {"density": 0.5}}"#).unwrap();
        assert_eq!(formula.offset, 0.0);
        assert_eq!(formula.scale, 1.0);
    }
}
