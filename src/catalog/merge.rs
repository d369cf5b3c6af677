//! Supplementary property merge
//!
//! Copies `magic` and `density` from a name-keyed property table onto catalog
//! materials. Materials missing from the table fall back to magic 0 and
//! density 1.0 and are reported.

use super::MaterialCatalog;
use rustc_hash::FxHashMap;

pub const DEFAULT_MAGIC: f64 = 0.0;
pub const DEFAULT_DENSITY: f64 = 1.0;

/// Magic and density for one named material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyRow {
    pub magic: f64,
    pub density: f64,
}

/// Name → properties lookup built from the supplementary table
#[derive(Debug, Clone, Default)]
pub struct SupplementaryProperties {
    rows: FxHashMap<String, PropertyRow>,
}

impl SupplementaryProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later rows with the same name replace earlier ones
    pub fn insert(&mut self, name: impl Into<String>, magic: f64, density: f64) {
        self.rows.insert(name.into(), PropertyRow { magic, density });
    }

    pub fn get(&self, name: &str) -> Option<&PropertyRow> {
        self.rows.get(name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeReport {
    pub matched: usize,
    /// Names that received the default values
    pub defaulted: Vec<String>,
}

pub fn merge_supplementary_properties(
    catalog: &mut MaterialCatalog,
    properties: &SupplementaryProperties,
) -> MergeReport {
    let mut report = MergeReport::default();

    for material in catalog.materials_mut() {
        match properties.get(&material.name) {
            Some(row) => {
                material.magic = row.magic.clamp(0.0, 1.0);
                material.density = Some(row.density);
                report.matched += 1;
            }
            None => {
                material.magic = DEFAULT_MAGIC;
                material.density = Some(DEFAULT_DENSITY);
                tracing::warn!(
                    "Material '{}' not found in property table; using magic={} density={}",
                    material.name,
                    DEFAULT_MAGIC,
                    DEFAULT_DENSITY
                );
                report.defaulted.push(material.name.clone());
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_catalog;
    use serde_json::json;

    #[test]
    fn test_merge_matches_by_name_and_defaults_the_rest() {
        let mut catalog = parse_catalog(&json!({
            "Metals": {"T1": [
                {"name": "Iron", "slash": 0.5, "pierce": 0.5, "blunt": 0.5, "magic": 0.3},
                {"name": "Mithril", "slash": 0.9, "pierce": 0.9, "blunt": 0.7, "magic": 0.6}
            ]}
        }))
        .unwrap();

        let mut props = SupplementaryProperties::new();
        props.insert("Iron", 0.05, 7.87);

        let report = merge_supplementary_properties(&mut catalog, &props);
        assert_eq!(report.matched, 1);
        assert_eq!(report.defaulted, vec!["Mithril".to_string()]);

        let materials: Vec<_> = catalog.materials().collect();
        assert_eq!(materials[0].magic, 0.05);
        assert_eq!(materials[0].density, Some(7.87));
        assert_eq!(materials[1].magic, DEFAULT_MAGIC);
        assert_eq!(materials[1].density, Some(DEFAULT_DENSITY));
    }
}
