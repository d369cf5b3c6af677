//! Error types for the forge pipeline
//!
//! Typed failures raised by the pure transformation stages. Loaders and the
//! pipeline coordinator wrap these in `anyhow` with file-level context.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("input file not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("malformed input in {context}: {reason}")]
    Malformed { context: String, reason: String },

    #[error("{category}/{material}: missing required field '{field}'")]
    MissingField {
        category: String,
        material: String,
        field: &'static str,
    },

    #[error("scoring configuration missing for category '{0}'")]
    UnknownCategory(String),

    #[error("{role} material '{row_name}' not found in tiered materials")]
    MissingReferenceMaterial {
        role: &'static str,
        row_name: String,
    },
}

impl ForgeError {
    pub fn malformed(context: impl Into<String>, reason: impl Into<String>) -> Self {
        ForgeError::Malformed {
            context: context.into(),
            reason: reason.into(),
        }
    }
}
