//! Utility modules shared across the pipeline
//!
//! - Normalization: per-category min-max rescaling of raw measurements
//! - Row names: sanitized, de-duplicated material identifiers

pub mod normalization;
pub mod row_name;

// Re-export commonly used types
pub use normalization::{
    min_max_normalize, normalize_category, NormalizedProperties, PhysicalProperty, PropertyRange,
    DEGENERATE_RANGE_VALUE,
};
pub use row_name::{clean_name, sanitize_token, slug, RowNameRegistry};
