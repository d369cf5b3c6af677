//! Material catalog
//!
//! The catalog is the nested `category → tier label → [material]` table the
//! tiering stage consumes. Category and tier order follow the input file.
//!
//! - `parse`: validating conversion from JSON with per-record error context
//! - `split`: expansion of compound names ("Oak/Ash Wood") into separate rows
//! - `merge`: magic/density merge from a supplementary property table

pub mod merge;
pub mod parse;
pub mod split;

pub use merge::{merge_supplementary_properties, MergeReport, SupplementaryProperties};
pub use parse::parse_catalog;
pub use split::{split_compound_names, split_material};

use crate::types::{Material, MaterialCategory};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Materials listed under one tier label
#[derive(Debug, Clone, PartialEq)]
pub struct TierGroup {
    pub label: String,
    pub materials: Vec<Material>,
}

/// All tier groups of one category
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogCategory {
    pub category: MaterialCategory,
    pub tiers: Vec<TierGroup>,
}

impl CatalogCategory {
    /// Every material of the category, flattened in tier-label order
    pub fn materials(&self) -> impl Iterator<Item = &Material> {
        self.tiers.iter().flat_map(|group| group.materials.iter())
    }

    pub fn len(&self) -> usize {
        self.tiers.iter().map(|group| group.materials.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialCatalog {
    pub categories: Vec<CatalogCategory>,
}

impl MaterialCatalog {
    pub fn materials(&self) -> impl Iterator<Item = &Material> {
        self.categories.iter().flat_map(|c| c.materials())
    }

    pub fn materials_mut(&mut self) -> impl Iterator<Item = &mut Material> {
        self.categories
            .iter_mut()
            .flat_map(|c| c.tiers.iter_mut())
            .flat_map(|group| group.materials.iter_mut())
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a category, merging into an existing entry of the same name
    pub fn push_category(&mut self, entry: CatalogCategory) {
        match self
            .categories
            .iter_mut()
            .find(|existing| existing.category == entry.category)
        {
            Some(existing) => existing.tiers.extend(entry.tiers),
            None => self.categories.push(entry),
        }
    }
}

struct TierGroups<'a>(&'a [TierGroup]);

impl Serialize for TierGroups<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for group in self.0 {
            map.serialize_entry(&group.label, &group.materials)?;
        }
        map.end()
    }
}

impl Serialize for MaterialCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for entry in &self.categories {
            map.serialize_entry(entry.category.as_str(), &TierGroups(&entry.tiers))?;
        }
        map.end()
    }
}
