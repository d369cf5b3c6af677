//! Standalone material tiering
//!
//! Reads a catalog, optionally splits compound names and merges a
//! `Name, Magic, Density` table, then writes `category → [material]` with
//! `material_tier` assigned. Consumers of older tiered files that read a
//! `tier` key should read `material_tier` instead.
//!
//! Environment:
//!   DATA_DIR        base directory (default ".")
//!   TIER_POLICY     rank_quintile | threshold (default rank_quintile)
//!   SPLIT_NAMES     "1" or "true" to split compound names
//!   PROPERTY_TABLE  optional supplementary CSV

use item_forge_rust::TieringOptions;
use item_forge_rust::pipeline::run_tiering;
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
    let input = data_dir.join("public/materials.json");
    let output = data_dir.join("public/materials_tiered.json");

    let options = TieringOptions {
        policy: match std::env::var("TIER_POLICY") {
            Ok(policy) => policy.parse()?,
            Err(_) => Default::default(),
        },
        split_compound_names: std::env::var("SPLIT_NAMES")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false),
        supplementary: std::env::var("PROPERTY_TABLE").ok().map(PathBuf::from),
    };

    tracing::info!("Tiering {:?} ({})", input, options.policy);
    let report = run_tiering(&input, &output, &options)?;

    println!("\nTiered materials per category:");
    for (category, materials) in report.materials.categories() {
        println!("  {:<10} {:>4}", category, materials.len());
    }
    if let Some(merge) = &report.merge {
        println!(
            "\nProperty merge: {} matched, {} defaulted",
            merge.matched,
            merge.defaulted.len()
        );
    }
    println!("\n✓ Saved: {:?}", output);

    Ok(())
}
