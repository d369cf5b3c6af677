//! Core data types shared across the pipeline
//!
//! Materials flow from the catalog loader through tiering into the item
//! generators; generated items flow through quality tiering into the final
//! item database.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Material category (top-level key of the catalog)
///
/// Known categories get their own variant; anything else is carried by name so
/// new categories never require a code change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MaterialCategory {
    Metals,
    Wood,
    Leather,
    Scales,
    Cloth,
    Other(String),
}

impl MaterialCategory {
    pub fn as_str(&self) -> &str {
        match self {
            MaterialCategory::Metals => "Metals",
            MaterialCategory::Wood => "Wood",
            MaterialCategory::Leather => "Leather",
            MaterialCategory::Scales => "Scales",
            MaterialCategory::Cloth => "Cloth",
            MaterialCategory::Other(name) => name,
        }
    }
}

impl From<&str> for MaterialCategory {
    fn from(name: &str) -> Self {
        match name {
            "Metals" => MaterialCategory::Metals,
            "Wood" => MaterialCategory::Wood,
            "Leather" => MaterialCategory::Leather,
            "Scales" => MaterialCategory::Scales,
            "Cloth" => MaterialCategory::Cloth,
            other => MaterialCategory::Other(other.to_string()),
        }
    }
}

impl From<String> for MaterialCategory {
    fn from(name: String) -> Self {
        MaterialCategory::from(name.as_str())
    }
}

impl From<MaterialCategory> for String {
    fn from(category: MaterialCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discrete tier (1-5)
///
/// Direction depends on the policy that produced it: rank quintiles use 1 for
/// the best band, threshold tiers use 5 for the best band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tier(pub u8);

impl Tier {
    pub fn value(self) -> u8 {
        self.0
    }

    /// Catalog tier label ("T1" .. "T5")
    pub fn label(self) -> String {
        format!("T{}", self.0)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// A catalog material with its combat scores (each in [0, 1])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    #[serde(rename = "rowName")]
    pub row_name: String,
    pub name: String,
    pub slash: f64,
    pub pierce: f64,
    pub blunt: f64,
    #[serde(default)]
    pub magic: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(rename = "Category")]
    pub category: MaterialCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_tier: Option<Tier>,

    /// Tier label the material was listed under in the catalog
    #[serde(skip)]
    pub tier_label: String,

    /// Fields the pipeline does not interpret, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Material {
    /// Mean of the three physical scores; sort key for material tiering
    pub fn power_score(&self) -> f64 {
        (self.slash + self.pierce + self.blunt) / 3.0
    }

    pub fn physical(&self) -> StatLine {
        StatLine {
            slash: self.slash,
            pierce: self.pierce,
            blunt: self.blunt,
        }
    }
}

/// Slash / pierce / blunt magnitudes (offense or defense)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub slash: f64,
    pub pierce: f64,
    pub blunt: f64,
}

impl StatLine {
    pub fn scale(self, factor: f64) -> Self {
        StatLine {
            slash: self.slash * factor,
            pierce: self.pierce * factor,
            blunt: self.blunt * factor,
        }
    }

    pub fn add(self, other: StatLine) -> Self {
        StatLine {
            slash: self.slash + other.slash,
            pierce: self.pierce + other.pierce,
            blunt: self.blunt + other.blunt,
        }
    }

    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        StatLine {
            slash: f(self.slash),
            pierce: f(self.pierce),
            blunt: f(self.blunt),
        }
    }

    pub fn sum(self) -> f64 {
        self.slash + self.pierce + self.blunt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_category_round_trips_through_string() {
        assert_eq!(MaterialCategory::from("Metals"), MaterialCategory::Metals);
        assert_eq!(
            MaterialCategory::from("Bone"),
            MaterialCategory::Other("Bone".to_string())
        );
        let json = serde_json::to_string(&MaterialCategory::Scales).unwrap();
        assert_eq!(json, "\"Scales\"");
    }

    #[test]
    fn test_tier_label() {
        assert_eq!(Tier(3).label(), "T3");
        assert_eq!(serde_json::to_string(&Tier(4)).unwrap(), "4");
    }

    #[test]
    fn test_stat_line_arithmetic() {
        let a = StatLine { slash: 0.5, pierce: 0.25, blunt: 1.0 };
        let b = a.scale(2.0).add(a);
        assert_relative_eq!(b.slash, 1.5, epsilon = 1e-12);
        assert_relative_eq!(b.sum(), 5.25, epsilon = 1e-12);
    }
}
