//! Consolidated forge run
//!
//! Tiers the material catalog, generates armor and weapons, assigns quality
//! tiers and writes `public/materials_tiered.json` and `cpp/item_database.json`
//! under DATA_DIR.
//!
//! Usage: DATA_DIR=. FORGE_CONFIG=config/forge.json cargo run --bin forge_items

use item_forge_rust::{ForgeConfig, ForgePaths, ForgePipeline};
use std::path::PathBuf;
use std::time::Instant;
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
    let config_path = PathBuf::from(
        std::env::var("FORGE_CONFIG").unwrap_or_else(|_| "config/forge.json".to_string()),
    );

    tracing::info!("Configuration:");
    tracing::info!("  DATA_DIR: {:?}", data_dir);
    tracing::info!("  FORGE_CONFIG: {:?}", config_path);

    let mut config = ForgeConfig::load_or_default(&config_path)?;
    if let Ok(policy) = std::env::var("TIER_POLICY") {
        config.tier_policy = policy.parse()?;
    }

    let start = Instant::now();
    let paths = ForgePaths::from_data_dir(&data_dir);
    let report = ForgePipeline::new(config).run(&paths)?;

    println!("\n{}", "=".repeat(60));
    println!("FORGE COMPLETE");
    println!("{}", "=".repeat(60));
    println!("  Materials tiered: {}", report.materials);
    println!("  Armor items:      {}", report.armor_items);
    println!("  Weapon items:     {}", report.weapon_items);
    println!(
        "  Quality groups:   {} ({} items ranked, {} untyped)",
        report.quality.groups, report.quality.ranked, report.quality.untyped
    );
    println!("\n✓ Saved: {:?}", report.tiered_output);
    println!("✓ Saved: {:?}", report.database_output);
    println!("  Time: {:.2?}", start.elapsed());

    Ok(())
}
