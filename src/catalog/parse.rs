//! Catalog parsing
//!
//! Walks the raw JSON tree instead of deriving `Deserialize` so every failure
//! names the category, tier and material it came from. A material without a
//! name or without one of slash/pierce/blunt fails the whole catalog; `magic`
//! defaults to 0 and `density` stays absent.
//!
//! Explicit `rowName`s are reserved before any missing one is derived, so a
//! derived identifier never displaces an explicit one.

use super::{CatalogCategory, MaterialCatalog, TierGroup};
use crate::error::ForgeError;
use crate::types::{Material, MaterialCategory};
use crate::utils::RowNameRegistry;
use serde_json::{Map, Value};

/// Keys interpreted by the pipeline; everything else lands in `Material::extra`
const KNOWN_KEYS: &[&str] = &[
    "rowName",
    "name",
    "slash",
    "pierce",
    "blunt",
    "magic",
    "density",
    "Category",
    "material_tier",
];

/// Parse a `category → tier label → [material]` JSON document
pub fn parse_catalog(root: &Value) -> Result<MaterialCatalog, ForgeError> {
    let categories = root
        .as_object()
        .ok_or_else(|| ForgeError::malformed("catalog", "top level must be an object of categories"))?;

    let mut registry = RowNameRegistry::new();
    let mut explicit_rows = reserve_explicit_row_names(categories, &mut registry).into_iter();
    let mut catalog = MaterialCatalog::default();

    for (category_name, tiers_value) in categories {
        let category = MaterialCategory::from(category_name.as_str());
        let tiers = tiers_value.as_object().ok_or_else(|| {
            ForgeError::malformed(category_name.clone(), "category must map tier labels to lists")
        })?;

        let mut groups = Vec::with_capacity(tiers.len());
        for (tier_label, list_value) in tiers {
            let context = format!("{}/{}", category_name, tier_label);
            let list = list_value
                .as_array()
                .ok_or_else(|| ForgeError::malformed(context.clone(), "tier must be a list of materials"))?;

            let materials = list
                .iter()
                .enumerate()
                .map(|(position, record)| {
                    let explicit = explicit_rows.next().flatten();
                    parse_material(&category, tier_label, position, record, explicit, &mut registry)
                })
                .collect::<Result<Vec<_>, _>>()?;

            groups.push(TierGroup {
                label: tier_label.clone(),
                materials,
            });
        }

        catalog.push_category(CatalogCategory {
            category,
            tiers: groups,
        });
    }

    Ok(catalog)
}

fn parse_material(
    category: &MaterialCategory,
    tier_label: &str,
    position: usize,
    record: &Value,
    explicit_row: Option<String>,
    registry: &mut RowNameRegistry,
) -> Result<Material, ForgeError> {
    let locator = format!("{}[{}]", tier_label, position);
    let fields = record.as_object().ok_or_else(|| {
        ForgeError::malformed(format!("{}/{}", category, locator), "material must be an object")
    })?;

    let name = match fields.get("name") {
        Some(Value::String(name)) => name.clone(),
        Some(_) => {
            return Err(ForgeError::malformed(
                format!("{}/{}", category, locator),
                "'name' must be a string",
            ))
        }
        None => {
            return Err(ForgeError::MissingField {
                category: category.to_string(),
                material: locator,
                field: "name",
            })
        }
    };

    let slash = required_score(fields, category, &name, "slash")?;
    let pierce = required_score(fields, category, &name, "pierce")?;
    let blunt = required_score(fields, category, &name, "blunt")?;
    let magic = optional_number(fields, category, &name, "magic")?
        .map(|v| clamp_score(v, category, &name, "magic"))
        .unwrap_or(0.0);
    let density = optional_number(fields, category, &name, "density")?;

    let row_name = match explicit_row {
        Some(row_name) => row_name,
        None => registry.derive(category.as_str(), tier_label, &name),
    };

    let extra: Map<String, Value> = fields
        .iter()
        .filter(|(key, _)| !KNOWN_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(Material {
        row_name,
        name,
        slash,
        pierce,
        blunt,
        magic,
        density,
        category: category.clone(),
        material_tier: None,
        tier_label: tier_label.to_string(),
        extra,
    })
}

/// Claim every explicit `rowName` in catalog order
///
/// Returns one entry per listed record, in the order `parse_catalog` visits
/// them; `None` where the record has no explicit identifier.
fn reserve_explicit_row_names(
    categories: &Map<String, Value>,
    registry: &mut RowNameRegistry,
) -> Vec<Option<String>> {
    let records = categories
        .values()
        .filter_map(Value::as_object)
        .flat_map(|tiers| tiers.values())
        .filter_map(Value::as_array)
        .flatten();

    records
        .map(|record| match record.get("rowName") {
            Some(Value::String(explicit)) => {
                let claimed = registry.claim(explicit);
                if &claimed != explicit {
                    tracing::warn!("Duplicate rowName '{}' renamed to '{}'", explicit, claimed);
                }
                Some(claimed)
            }
            _ => None,
        })
        .collect()
}

fn required_score(
    fields: &Map<String, Value>,
    category: &MaterialCategory,
    name: &str,
    field: &'static str,
) -> Result<f64, ForgeError> {
    let value = optional_number(fields, category, name, field)?.ok_or_else(|| {
        ForgeError::MissingField {
            category: category.to_string(),
            material: name.to_string(),
            field,
        }
    })?;
    Ok(clamp_score(value, category, name, field))
}

fn optional_number(
    fields: &Map<String, Value>,
    category: &MaterialCategory,
    name: &str,
    field: &'static str,
) -> Result<Option<f64>, ForgeError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_f64().map(Some).ok_or_else(|| {
            ForgeError::malformed(
                format!("{}/{}", category, name),
                format!("'{}' must be a number, got {}", field, value),
            )
        }),
    }
}

/// Combat scores live in [0, 1]; out-of-range inputs are clamped
fn clamp_score(value: f64, category: &MaterialCategory, name: &str, field: &str) -> f64 {
    let clamped = value.clamp(0.0, 1.0);
    if clamped != value {
        tracing::debug!("{}/{}: {} {} clamped to {}", category, name, field, value, clamped);
    }
    clamped
}
