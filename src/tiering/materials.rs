//! Material tiering
//!
//! Flattens each catalog category, scores every material by its power score
//! (mean of slash, pierce and blunt) and writes `material_tier` using the
//! selected policy. Category lists come out ordered by descending power score;
//! the score itself is never stored on the record.

use super::policy::{rank_order, TierPolicy};
use crate::catalog::MaterialCatalog;
use crate::types::{Material, MaterialCategory};
use rustc_hash::FxHashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Tiered materials grouped by category, with a row-name index
#[derive(Debug, Clone, Default)]
pub struct TieredMaterials {
    categories: Vec<(MaterialCategory, Vec<Material>)>,
    index: FxHashMap<String, (usize, usize)>,
}

impl TieredMaterials {
    pub fn from_categories(categories: Vec<(MaterialCategory, Vec<Material>)>) -> Self {
        let mut index = FxHashMap::default();
        for (c, (_, materials)) in categories.iter().enumerate() {
            for (m, material) in materials.iter().enumerate() {
                index.entry(material.row_name.clone()).or_insert((c, m));
            }
        }
        Self { categories, index }
    }

    /// Look up a material by row identifier
    pub fn get(&self, row_name: &str) -> Option<&Material> {
        self.index
            .get(row_name)
            .map(|&(c, m)| &self.categories[c].1[m])
    }

    /// All materials: category order, then descending power within a category
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.categories.iter().flat_map(|(_, materials)| materials.iter())
    }

    pub fn categories(&self) -> &[(MaterialCategory, Vec<Material>)] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|(_, m)| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serializable view: `category → [material]`
    pub fn by_category(&self) -> ByCategory<'_> {
        ByCategory(self)
    }

    /// Serializable view: `rowName → material`
    pub fn by_row_name(&self) -> ByRowName<'_> {
        ByRowName(self)
    }
}

pub struct ByCategory<'a>(&'a TieredMaterials);

impl Serialize for ByCategory<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.categories.len()))?;
        for (category, materials) in &self.0.categories {
            map.serialize_entry(category.as_str(), materials)?;
        }
        map.end()
    }
}

pub struct ByRowName<'a>(&'a TieredMaterials);

impl Serialize for ByRowName<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for material in self.0.iter() {
            map.serialize_entry(&material.row_name, material)?;
        }
        map.end()
    }
}

/// Assign `material_tier` within every catalog category
pub fn tier_materials(catalog: &MaterialCatalog, policy: TierPolicy) -> TieredMaterials {
    let mut categories = Vec::with_capacity(catalog.categories.len());

    for entry in &catalog.categories {
        let materials: Vec<Material> = entry.materials().cloned().collect();
        let power: Vec<f64> = materials.iter().map(Material::power_score).collect();
        let tiers = policy.assign(&power);

        let ranked: Vec<Material> = rank_order(&power)
            .into_iter()
            .map(|idx| {
                let mut material = materials[idx].clone();
                material.material_tier = Some(tiers[idx]);
                material
            })
            .collect();

        tracing::info!(
            "Tiered {} materials in '{}' ({})",
            ranked.len(),
            entry.category,
            policy
        );
        categories.push((entry.category.clone(), ranked));
    }

    TieredMaterials::from_categories(categories)
}
