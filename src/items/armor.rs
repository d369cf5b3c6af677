//! Armor generation
//!
//! One item per (piece, outer material, class). Only the outer layer varies:
//!
//!   defense = class_modifier × (0.80 × outer + 0.15 × inner + 0.05 × binding)
//!
//! scaled to percent and rounded to one decimal.

use super::recipes::ArmorRecipe;
use super::volumes::VolumeTable;
use super::{to_percent, GeneratedItem, ItemStats, ItemType};
use crate::error::ForgeError;
use crate::tiering::TieredMaterials;
use crate::types::Material;
use crate::utils::slug;

fn reference<'a>(
    materials: &'a TieredMaterials,
    row_name: &str,
    role: &'static str,
) -> Result<&'a Material, ForgeError> {
    materials
        .get(row_name)
        .ok_or_else(|| ForgeError::MissingReferenceMaterial {
            role,
            row_name: row_name.to_string(),
        })
}

pub fn generate_armor(
    materials: &TieredMaterials,
    volumes: &VolumeTable,
    recipe: &ArmorRecipe,
) -> Result<Vec<GeneratedItem>, ForgeError> {
    let inner = reference(materials, &recipe.inner_material, "inner")?;
    let binding = reference(materials, &recipe.binding_material, "binding")?;
    let w = recipe.weights;

    let mut items = Vec::new();
    for group in volumes.groups() {
        let piece = &group.item;
        for outer in materials.iter() {
            if !recipe.outer_categories.contains(&outer.category) {
                continue;
            }
            // Summed outer, inner, binding in that order
            let blended = outer
                .physical()
                .scale(w.outer)
                .add(inner.physical().scale(w.inner))
                .add(binding.physical().scale(w.binding));

            for class in &recipe.classes {
                let defense = blended.scale(class.modifier).map(to_percent);
                let id = format!(
                    "armor_{}_{}_{}",
                    slug(piece),
                    class.name.to_lowercase(),
                    slug(&outer.name)
                );

                items.push(GeneratedItem {
                    name: format!("{} {} {}", class.name, outer.name, piece),
                    item_type: ItemType::Armor,
                    kind: Some(piece.clone()),
                    stats: ItemStats::Defense(defense),
                    material_tier: outer.material_tier,
                    material_category: outer.category.clone(),
                    icon: format!("icons/armor/{}.png", piece.to_lowercase()),
                    texture: format!("textures/armor/{}.png", id),
                    quality_tier: None,
                    id,
                });
            }
        }
    }

    tracing::info!(
        "Generated {} armor items from {} pieces",
        items.len(),
        volumes.len()
    );
    Ok(items)
}
