//! Item Forge Rust Implementation
//!
//! Material tiering and item generation for the game data pipeline.
//!
//! Module layout follows the stages of a run:
//! - `utils/`: Property normalization and row identifiers
//! - `catalog/`: Material catalog parsing, name splitting and property merge
//! - `scoring/`: Normalized properties → combat stats, raw table integration
//! - `tiering/`: Rank-quintile and threshold tier policies
//! - `items/`: Armor and weapon generation, quality tiers, item database
//! - `data`: Input loading (JSON, CSV with Polars)
//! - `pipeline`: End-to-end coordinator with atomic output writes

pub mod catalog;
pub mod data;
pub mod error;
pub mod items;
pub mod pipeline;
pub mod scoring;
pub mod tiering;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use catalog::{MaterialCatalog, SupplementaryProperties};
pub use data::{ForgeInputs, ForgePaths};
pub use error::ForgeError;
pub use items::{GeneratedItem, ItemDatabase, ItemStats, ItemType};
pub use pipeline::{ForgeConfig, ForgePipeline, ForgeReport, TieringOptions};
pub use scoring::ScoringConfig;
pub use tiering::{TierPolicy, TieredMaterials};
pub use types::{Material, MaterialCategory, StatLine, Tier};
