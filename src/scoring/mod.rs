//! Material scoring
//!
//! - `config`: per-category coefficient tables (JSON or built-in)
//! - `synthesizer`: normalized properties → slash/pierce/blunt/magic
//! - `integration`: raw measurement tables → catalog entries

pub mod config;
pub mod integration;
pub mod synthesizer;

pub use config::{CategoryProfile, PropertyColumns, ScoringConfig, StatFormula, StatFormulas};
pub use integration::{integrate_category, integrate_tables, RawPropertyTable};
pub use synthesizer::{composite_score, synthesize, StatSheet};
