//! Compound name splitting
//!
//! Catalog entries such as "Oak/Ash Wood" or "Hide (Cow/Pig)" describe several
//! materials sharing one set of scores. Each alternative becomes its own
//! record with a row identifier suffixed by the sanitized alternative.

use super::MaterialCatalog;
use crate::types::Material;
use crate::utils::{sanitize_token, RowNameRegistry};
use regex::Regex;
use std::sync::OnceLock;

fn parenthesized_alternatives() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.*)\(([^)]*)\)(.*)$").expect("valid regex"))
}

/// Split one material into its name alternatives
///
/// Names without `/` come back unchanged as a single record.
pub fn split_material(material: &Material) -> Vec<Material> {
    let name = material.name.as_str();
    if !name.contains('/') {
        return vec![material.clone()];
    }

    // Slash inside parentheses: "Hide (Cow/Pig)" → "Hide (Cow)", "Hide (Pig)"
    if let Some(caps) = parenthesized_alternatives().captures(name) {
        let inner = &caps[2];
        if inner.contains('/') {
            let (pre, post) = (&caps[1], &caps[3]);
            return inner
                .split('/')
                .map(str::trim)
                .map(|part| {
                    let mut split = material.clone();
                    split.name = format!("{}({}){}", pre, part, post);
                    split.row_name = format!("{}_{}", material.row_name, sanitize_token(part));
                    split
                })
                .collect();
        }
    }

    // General case: "Oak/Ash Wood" → "Oak Wood", "Ash Wood"
    let mut parts: Vec<String> = name.split('/').map(|p| p.trim().to_string()).collect();
    let mut suffix = String::new();
    let last = parts.len() - 1;
    if !parts[0].contains(' ') {
        if let Some(idx) = parts[last].find(' ') {
            suffix = parts[last][idx..].to_string();
            parts[last].truncate(idx);
        }
    }

    parts
        .iter()
        .map(|part| {
            let new_name = if !suffix.is_empty() && !part.contains(' ') {
                format!("{}{}", part, suffix)
            } else {
                part.clone()
            };
            let mut split = material.clone();
            split.row_name = format!("{}_{}", material.row_name, sanitize_token(&new_name));
            split.name = new_name;
            split
        })
        .collect()
}

/// Split every compound name in the catalog, keeping row identifiers unique
pub fn split_compound_names(catalog: &MaterialCatalog) -> MaterialCatalog {
    let mut registry = RowNameRegistry::new();
    let mut result = catalog.clone();
    let mut expanded = 0usize;

    for group in result.categories.iter_mut().flat_map(|c| c.tiers.iter_mut()) {
        let mut materials = Vec::with_capacity(group.materials.len());
        for material in &group.materials {
            let parts = split_material(material);
            if parts.len() > 1 {
                expanded += 1;
            }
            for mut part in parts {
                part.row_name = registry.claim(&part.row_name);
                materials.push(part);
            }
        }
        group.materials = materials;
    }

    tracing::info!(
        "Split {} compound names ({} → {} materials)",
        expanded,
        catalog.len(),
        result.len()
    );
    result
}
