//! Item generation
//!
//! - `volumes`: (item type, component) → volume tables
//! - `recipes`: role assignments and constants for armor and weapons
//! - `armor` / `weapons`: combinatorial item generators
//! - `quality`: per-type quality quintiles
//! - `database`: final `category → [item]` grouping

pub mod armor;
pub mod database;
pub mod quality;
pub mod recipes;
pub mod volumes;
pub mod weapons;

pub use armor::generate_armor;
pub use database::ItemDatabase;
pub use quality::{assign_quality_tiers, QualityReport};
pub use recipes::{ArmorClass, ArmorRecipe, GenerationConfig, WeaponRecipe};
pub use volumes::{VolumeGroup, VolumeTable};
pub use weapons::generate_weapons;

use crate::types::{MaterialCategory, StatLine, Tier};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemType {
    Armor,
    Weapon,
}

/// Offense (weapons) or defense (armor) magnitudes, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStats {
    Offense(StatLine),
    Defense(StatLine),
}

impl ItemStats {
    pub fn line(&self) -> &StatLine {
        match self {
            ItemStats::Offense(line) | ItemStats::Defense(line) => line,
        }
    }

    /// Sum of all magnitudes; sort key for quality tiering
    pub fn power(&self) -> f64 {
        self.line().sum()
    }
}

/// One generated item record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedItem {
    pub id: String,
    pub name: String,
    pub item_type: ItemType,
    /// Piece or weapon kind; items without one are left out of quality tiering
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub stats: ItemStats,
    pub material_tier: Option<Tier>,
    /// Database key; not part of the serialized record
    #[serde(skip, default = "unassigned_category")]
    pub material_category: MaterialCategory,
    pub icon: String,
    pub texture: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_tier: Option<Tier>,
}

fn unassigned_category() -> MaterialCategory {
    MaterialCategory::Other(String::new())
}

/// Percentage with one decimal: 0.4567 → 45.7
///
/// Rounds the exact binary value of `value × 100`, ties to even, so 0.0125
/// gives 1.2 and 0.0255 (stored just below 2.55) gives 2.5.
pub fn to_percent(value: f64) -> f64 {
    let scaled = value * 100.0;
    format!("{:.1}", scaled).parse().unwrap_or(scaled)
}
