//! Item recipes
//!
//! Role assignments and constants for the armor and weapon generators. The
//! defaults reproduce the shipped item database; `forge.json` may override any
//! of them.

use crate::types::MaterialCategory;
use serde::{Deserialize, Serialize};

/// Armor weight class and its stat modifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorClass {
    pub name: String,
    pub modifier: f64,
}

/// Share of each material role in an armor piece's stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleWeights {
    pub outer: f64,
    pub inner: f64,
    pub binding: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmorRecipe {
    pub classes: Vec<ArmorClass>,
    pub weights: RoleWeights,
    /// Row identifier of the fixed inner-layer material
    pub inner_material: String,
    /// Row identifier of the fixed binding material
    pub binding_material: String,
    /// Categories eligible for the outer layer
    pub outer_categories: Vec<MaterialCategory>,
}

impl Default for ArmorRecipe {
    fn default() -> Self {
        ArmorRecipe {
            classes: vec![
                ArmorClass { name: "Light".to_string(), modifier: 0.45 },
                ArmorClass { name: "Medium".to_string(), modifier: 0.65 },
                ArmorClass { name: "Heavy".to_string(), modifier: 0.85 },
            ],
            weights: RoleWeights {
                outer: 0.80,
                inner: 0.15,
                binding: 0.05,
            },
            inner_material: "Leather_T2_Cowhide_Pigskin".to_string(),
            binding_material: "Leather_T1_Deerskin".to_string(),
            outer_categories: vec![
                MaterialCategory::Metals,
                MaterialCategory::Wood,
                MaterialCategory::Leather,
                MaterialCategory::Scales,
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponRecipe {
    pub weapon_types: Vec<String>,
    pub primary_category: MaterialCategory,
    /// Row identifier of the handle material; required but not in the stat formula yet
    pub handle_material: String,
    /// Preferred primary components; the last entry is the fallback
    pub primary_components: Vec<String>,
}

impl Default for WeaponRecipe {
    fn default() -> Self {
        WeaponRecipe {
            weapon_types: ["Sword", "Axe", "Hammer", "Dagger"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            primary_category: MaterialCategory::Metals,
            handle_material: "Wood_T2_Oak_Ash_Maple".to_string(),
            primary_components: vec!["Blade".to_string(), "Head".to_string()],
        }
    }
}

impl WeaponRecipe {
    pub fn allows(&self, weapon_type: &str) -> bool {
        self.weapon_types.iter().any(|t| t == weapon_type)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub armor: ArmorRecipe,
    pub weapons: WeaponRecipe,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config: GenerationConfig = serde_json::from_str(
            r#"{"weapons": {"weapon_types": ["Spear"]}}"#,
        )
        .unwrap();
        assert_eq!(config.weapons.weapon_types, vec!["Spear".to_string()]);
        assert_eq!(config.weapons.handle_material, "Wood_T2_Oak_Ash_Maple");
        assert_eq!(config.armor, ArmorRecipe::default());
    }

    #[test]
    fn test_default_constants() {
        let armor = ArmorRecipe::default();
        let modifiers: Vec<_> = armor.classes.iter().map(|c| c.modifier).collect();
        assert_eq!(modifiers, vec![0.45, 0.65, 0.85]);
        let w = armor.weights;
        assert!((w.outer + w.inner + w.binding - 1.0).abs() < 1e-12);
        assert!(WeaponRecipe::default().allows("Hammer"));
        assert!(!WeaponRecipe::default().allows("Bow"));
    }
}
