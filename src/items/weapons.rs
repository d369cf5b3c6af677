//! Weapon generation
//!
//! One item per (allowed weapon type, primary-category material). Offense is
//! the material's own slash/pierce/blunt in percent. The handle material must
//! exist but does not enter the formula.

use super::recipes::WeaponRecipe;
use super::volumes::{VolumeGroup, VolumeTable};
use super::{to_percent, GeneratedItem, ItemStats, ItemType};
use crate::error::ForgeError;
use crate::tiering::TieredMaterials;
use crate::utils::slug;

/// Component carrying the primary material ("Blade" if present, else "Head")
pub fn primary_component<'a>(group: &VolumeGroup, recipe: &'a WeaponRecipe) -> Option<&'a str> {
    recipe
        .primary_components
        .iter()
        .find(|c| group.has_component(c))
        .or_else(|| recipe.primary_components.last())
        .map(String::as_str)
}

pub fn generate_weapons(
    materials: &TieredMaterials,
    volumes: &VolumeTable,
    recipe: &WeaponRecipe,
) -> Result<Vec<GeneratedItem>, ForgeError> {
    let handle = materials.get(&recipe.handle_material).ok_or_else(|| {
        ForgeError::MissingReferenceMaterial {
            role: "handle",
            row_name: recipe.handle_material.clone(),
        }
    })?;

    let mut items = Vec::new();
    for group in volumes.groups() {
        let weapon_type = &group.item;
        if !recipe.allows(weapon_type) {
            tracing::debug!("Skipping weapon type '{}' (not in allowed set)", weapon_type);
            continue;
        }

        tracing::debug!(
            "{}: primary component {:?}, handle {}",
            weapon_type,
            primary_component(group, recipe),
            handle.row_name
        );

        for primary in materials.iter() {
            if primary.category != recipe.primary_category {
                continue;
            }
            let offense = primary.physical().map(to_percent);
            let id = format!("weapon_{}_{}", slug(weapon_type), slug(&primary.name));

            items.push(GeneratedItem {
                name: format!("{} {}", primary.name, weapon_type),
                item_type: ItemType::Weapon,
                kind: Some(weapon_type.clone()),
                stats: ItemStats::Offense(offense),
                material_tier: primary.material_tier,
                material_category: primary.category.clone(),
                icon: format!("icons/weapons/{}.png", weapon_type.to_lowercase()),
                texture: format!("textures/weapons/{}.png", id),
                quality_tier: None,
                id,
            });
        }
    }

    tracing::info!("Generated {} weapon items", items.len());
    Ok(items)
}
