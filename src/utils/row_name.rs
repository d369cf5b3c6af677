//! Row identifiers and name sanitizing
//!
//! A row identifier is `{category}_{tier label}_{clean name}` where the clean
//! name drops any parenthesized span and replaces everything outside
//! `[A-Za-z0-9_]` with `_`. Collisions receive `_1`, `_2`, ... suffixes so the
//! identifier stays globally unique.

use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::OnceLock;

fn parenthesized() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(.*\)").expect("valid regex"))
}

fn non_identifier_char() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9_]").expect("valid regex"))
}

fn non_alphanumeric_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9]+").expect("valid regex"))
}

/// Clean a material name for use inside a row identifier
///
/// "Iron (wrought)" → "Iron", "Oak & Ash" → "Oak___Ash"
pub fn clean_name(name: &str) -> String {
    let without_parens = parenthesized().replace_all(name, "");
    non_identifier_char()
        .replace_all(without_parens.trim(), "_")
        .into_owned()
}

/// Collapse runs of non-alphanumerics to `_` and trim underscores
///
/// Used for suffixes appended when a compound name is split.
pub fn sanitize_token(text: &str) -> String {
    non_alphanumeric_run()
        .replace_all(text, "_")
        .trim_matches('_')
        .to_string()
}

/// Lowercase with spaces turned into underscores (item identifiers)
pub fn slug(text: &str) -> String {
    text.to_lowercase().replace(' ', "_")
}

/// Tracks issued row identifiers and resolves collisions
#[derive(Debug, Default)]
pub struct RowNameRegistry {
    issued: FxHashSet<String>,
}

impl RowNameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `candidate`, appending `_1`, `_2`, ... until it is unused
    pub fn claim(&mut self, candidate: &str) -> String {
        let mut row_name = candidate.to_string();
        let mut counter = 1;
        while self.issued.contains(&row_name) {
            row_name = format!("{}_{}", candidate, counter);
            counter += 1;
        }
        self.issued.insert(row_name.clone());
        row_name
    }

    /// Derive and reserve the identifier for a material
    pub fn derive(&mut self, category: &str, tier_label: &str, name: &str) -> String {
        let candidate = format!("{}_{}_{}", category, tier_label, clean_name(name));
        self.claim(&candidate)
    }

    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_name_drops_parenthesized_span() {
        assert_eq!(clean_name("Iron (wrought)"), "Iron");
        assert_eq!(clean_name("Oak & Ash"), "Oak___Ash");
        assert_eq!(clean_name("  Bronze  "), "Bronze");
    }

    #[test]
    fn test_sanitize_token() {
        assert_eq!(sanitize_token("Cow/Pig hide!"), "Cow_Pig_hide");
        assert_eq!(sanitize_token("--Ash--"), "Ash");
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Plate Helm"), "plate_helm");
    }

    #[test]
    fn test_registry_resolves_collisions() {
        let mut registry = RowNameRegistry::new();
        assert_eq!(registry.derive("Metals", "T1", "Iron"), "Metals_T1_Iron");
        assert_eq!(registry.derive("Metals", "T1", "Iron (cast)"), "Metals_T1_Iron_1");
        assert_eq!(registry.derive("Metals", "T1", "Iron"), "Metals_T1_Iron_2");
        assert_eq!(registry.claim("Wood_T2_Oak"), "Wood_T2_Oak");
        assert_eq!(registry.len(), 4);
    }
}
