//! Property integration
//!
//! Turns raw real-world measurement tables into catalog entries:
//!
//! 1. Min-max normalize density, strength and hardness within the category
//! 2. Synthesize slash/pierce/blunt/magic from the category profile
//! 3. Tier the composite score (mean of the three properties)
//! 4. Build `{Category}_{T#}_{Name}` row identifiers
//!
//! The resulting catalog uses tier labels `T1`..`T5` and can be fed straight
//! into material tiering.

use super::config::ScoringConfig;
use super::synthesizer::{composite_score, synthesize};
use crate::catalog::{CatalogCategory, MaterialCatalog, TierGroup};
use crate::error::ForgeError;
use crate::tiering::TierPolicy;
use crate::types::{Material, MaterialCategory, Tier};
use crate::utils::{normalize_category, RowNameRegistry};
use serde_json::Map;
use std::collections::BTreeMap;

/// Raw measurements for one category, one entry per material
#[derive(Debug, Clone, PartialEq)]
pub struct RawPropertyTable {
    pub category: MaterialCategory,
    pub names: Vec<String>,
    pub density: Vec<f64>,
    pub strength: Vec<f64>,
    pub hardness: Vec<f64>,
}

impl RawPropertyTable {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn validate(&self) -> Result<(), ForgeError> {
        let n = self.names.len();
        if self.density.len() != n || self.strength.len() != n || self.hardness.len() != n {
            return Err(ForgeError::malformed(
                self.category.to_string(),
                "property columns have different lengths",
            ));
        }

        let columns = [
            ("density", &self.density),
            ("strength", &self.strength),
            ("hardness", &self.hardness),
        ];
        for (property, values) in columns {
            if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
                return Err(ForgeError::malformed(
                    format!("{}/{}", self.category, self.names[idx]),
                    format!("{} is not a finite number", property),
                ));
            }
        }
        Ok(())
    }
}

/// Integrate one category into catalog form
pub fn integrate_category(
    table: &RawPropertyTable,
    config: &ScoringConfig,
    policy: TierPolicy,
    registry: &mut RowNameRegistry,
) -> Result<CatalogCategory, ForgeError> {
    let profile = config.profile(&table.category)?;
    table.validate()?;

    let normalized = normalize_category(
        table.category.as_str(),
        &table.density,
        &table.strength,
        &table.hardness,
    );
    let composite: Vec<f64> = normalized.iter().map(composite_score).collect();
    let tiers = policy.assign(&composite);

    let mut groups: BTreeMap<Tier, Vec<Material>> = BTreeMap::new();
    for (idx, props) in normalized.iter().enumerate() {
        let name = &table.names[idx];
        let tier = tiers[idx];
        let sheet = synthesize(profile, props);
        let candidate = format!("{}_{}_{}", table.category, tier.label(), name.replace(' ', "_"));

        tracing::debug!(
            "{}: composite={:.3} tier={} slash={:.3} pierce={:.3} blunt={:.3} magic={:.3}",
            name,
            composite[idx],
            tier,
            sheet.slash,
            sheet.pierce,
            sheet.blunt,
            sheet.magic
        );

        groups.entry(tier).or_default().push(Material {
            row_name: registry.claim(&candidate),
            name: name.clone(),
            slash: sheet.slash,
            pierce: sheet.pierce,
            blunt: sheet.blunt,
            magic: sheet.magic,
            density: Some(table.density[idx]),
            category: table.category.clone(),
            material_tier: None,
            tier_label: tier.label(),
            extra: Map::new(),
        });
    }

    tracing::info!(
        "Integrated {} materials into '{}' across {} tiers ({})",
        table.len(),
        table.category,
        groups.len(),
        policy
    );

    Ok(CatalogCategory {
        category: table.category.clone(),
        tiers: groups
            .into_iter()
            .map(|(tier, materials)| TierGroup {
                label: tier.label(),
                materials,
            })
            .collect(),
    })
}

/// Integrate several categories into one catalog with unique row identifiers
pub fn integrate_tables(
    tables: &[RawPropertyTable],
    config: &ScoringConfig,
    policy: TierPolicy,
) -> Result<MaterialCatalog, ForgeError> {
    let mut registry = RowNameRegistry::new();
    let mut catalog = MaterialCatalog::default();
    for table in tables {
        catalog.push_category(integrate_category(table, config, policy, &mut registry)?);
    }
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn metals() -> RawPropertyTable {
        RawPropertyTable {
            category: MaterialCategory::Metals,
            names: vec!["Lead".into(), "Wrought Iron".into(), "Tungsten".into()],
            density: vec![11.3, 7.7, 19.3],
            strength: vec![18.0, 350.0, 980.0],
            hardness: vec![40.0, 1000.0, 3400.0],
        }
    }

    #[test]
    fn test_threshold_integration() {
        let config = ScoringConfig::builtin();
        let catalog = integrate_tables(&[metals()], &config, TierPolicy::Threshold).unwrap();
        let category = &catalog.categories[0];
        let labels: Vec<_> = category.tiers.iter().map(|g| g.label.as_str()).collect();

        // Tungsten is max in every property → composite 1.0 → T5
        let tungsten = category.materials().find(|m| m.name == "Tungsten").unwrap();
        assert_eq!(tungsten.tier_label, "T5");
        assert_eq!(tungsten.row_name, "Metals_T5_Tungsten");
        assert_relative_eq!(tungsten.slash, 1.0, epsilon = 1e-12);
        assert_relative_eq!(tungsten.magic, 0.0, epsilon = 1e-12);
        assert_eq!(tungsten.density, Some(19.3));

        let iron = category.materials().find(|m| m.name == "Wrought Iron").unwrap();
        assert!(iron.row_name.ends_with("_Wrought_Iron"));
        assert!(labels.contains(&"T5"));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_rank_integration_covers_population() {
        let config = ScoringConfig::builtin();
        let catalog = integrate_tables(&[metals()], &config, TierPolicy::RankQuintile).unwrap();
        let tungsten = catalog.materials().find(|m| m.name == "Tungsten").unwrap();
        assert_eq!(tungsten.tier_label, "T1");
    }

    #[test]
    fn test_unknown_category_fails() {
        let mut table = metals();
        table.category = MaterialCategory::Scales;
        let err = integrate_tables(&[table], &ScoringConfig::builtin(), TierPolicy::Threshold)
            .unwrap_err();
        assert!(matches!(err, ForgeError::UnknownCategory(_)));
    }

    #[test]
    fn test_identical_measurements_do_not_produce_nan() {
        let table = RawPropertyTable {
            category: MaterialCategory::Wood,
            names: vec!["Oak".into(), "Ash".into()],
            density: vec![0.7, 0.7],
            strength: vec![100.0, 100.0],
            hardness: vec![5000.0, 5000.0],
        };
        let catalog =
            integrate_tables(&[table], &ScoringConfig::builtin(), TierPolicy::Threshold).unwrap();
        for material in catalog.materials() {
            assert_eq!(material.tier_label, "T1");
            assert_eq!(material.slash, 0.0);
            assert_relative_eq!(material.magic, 0.8, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_mismatched_columns_are_malformed() {
        let mut table = metals();
        table.hardness.pop();
        let err = integrate_tables(&[table], &ScoringConfig::builtin(), TierPolicy::Threshold)
            .unwrap_err();
        assert!(matches!(err, ForgeError::Malformed { .. }));
    }
}
