//! Tier assignment
//!
//! - `policy`: the two tiering strategies (rank quintile, fixed threshold)
//! - `materials`: per-category material tiering by power score

pub mod materials;
pub mod policy;

pub use materials::{tier_materials, TieredMaterials};
pub use policy::{quintile_tier, rank_order, threshold_tier, TierPolicy, THRESHOLD_BREAKPOINTS};
