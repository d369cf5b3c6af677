//! Raw property integration
//!
//! Normalizes raw measurement tables, synthesizes combat stats from the
//! scoring profiles and writes a tiered catalog JSON.
//!
//! Each category with a profile is read from `{RAW_DIR}/{category}.csv`
//! (lowercase); categories without a file are skipped.
//!
//! Environment:
//!   DATA_DIR        base directory (default ".")
//!   RAW_DIR         raw tables (default "{DATA_DIR}/raw")
//!   SCORING_CONFIG  profile JSON (default "config/scoring_profiles.json", built-in if absent)
//!   TIER_POLICY     threshold | rank_quintile (default threshold)

use item_forge_rust::pipeline::run_integration;
use item_forge_rust::{ScoringConfig, TierPolicy};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "item_forge_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_dir = PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| ".".to_string()));
    let raw_dir = std::env::var("RAW_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| data_dir.join("raw"));
    let config_path = PathBuf::from(
        std::env::var("SCORING_CONFIG")
            .unwrap_or_else(|_| "config/scoring_profiles.json".to_string()),
    );
    let policy: TierPolicy = match std::env::var("TIER_POLICY") {
        Ok(policy) => policy.parse()?,
        Err(_) => TierPolicy::Threshold,
    };

    let config = if config_path.exists() {
        tracing::info!("Loading scoring profiles: {:?}", config_path);
        ScoringConfig::load(&config_path)?
    } else {
        tracing::info!("Scoring profiles not found - using built-in Metals and Wood");
        ScoringConfig::builtin()
    };

    let sources: Vec<_> = config
        .categories()
        .filter_map(|category| {
            let path = raw_dir.join(format!("{}.csv", category.as_str().to_lowercase()));
            if path.exists() {
                Some((category, path))
            } else {
                tracing::warn!("No raw table for '{}' at {:?}", category, path);
                None
            }
        })
        .collect();

    if sources.is_empty() {
        anyhow::bail!("No raw measurement tables found in {:?}", raw_dir);
    }

    let output = data_dir.join("public/materials_integrated.json");
    let catalog = run_integration(&sources, &config, policy, &output)?;

    println!("\nIntegrated materials ({}):", policy);
    for entry in &catalog.categories {
        let tiers: Vec<String> = entry
            .tiers
            .iter()
            .map(|group| format!("{}={}", group.label, group.materials.len()))
            .collect();
        println!("  {:<10} {}", entry.category, tiers.join(" "));
    }
    println!("\n✓ Saved: {:?}", output);

    Ok(())
}
