//! Forge Pipeline - coordinator for material tiering and item generation
//!
//! Runs the stages in order:
//!
//! 1. Load catalog and volume tables
//! 2. Optionally split compound names
//! 3. Tier materials
//! 4. Generate armor and weapons
//! 5. Assign quality tiers per item type
//! 6. Group the database by material category
//!
//! Outputs are rendered in memory and written only once every stage has
//! succeeded, each through a temporary file renamed into place.

use crate::catalog::{
    merge_supplementary_properties, split_compound_names, MaterialCatalog, MergeReport,
};
use crate::data::{
    load_catalog, load_raw_properties, load_supplementary_properties, ForgeInputs, ForgePaths,
};
use crate::error::ForgeError;
use crate::items::{
    assign_quality_tiers, generate_armor, generate_weapons, GenerationConfig, ItemDatabase,
    QualityReport,
};
use crate::scoring::{integrate_tables, ScoringConfig};
use crate::tiering::{tier_materials, TierPolicy, TieredMaterials};
use crate::types::MaterialCategory;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Run options read from `forge.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    pub tier_policy: TierPolicy,
    pub split_compound_names: bool,
    pub generation: GenerationConfig,
}

impl ForgeConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read forge config: {:?}", path))?;
        serde_json::from_str(&contents).with_context(|| "Failed to parse forge config JSON")
    }

    /// Load the file if it exists, otherwise fall back to built-in defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            tracing::info!("Loading forge config: {:?}", path);
            Self::load(path)
        } else {
            tracing::info!("Forge config {:?} not found - using defaults", path);
            Ok(Self::default())
        }
    }
}

/// Everything one pipeline run produces, before anything is written
#[derive(Debug, Clone)]
pub struct ForgeOutput {
    pub materials: TieredMaterials,
    pub database: ItemDatabase,
    pub armor_items: usize,
    pub weapon_items: usize,
    pub quality: QualityReport,
}

#[derive(Debug, Clone)]
pub struct ForgeReport {
    pub materials: usize,
    pub armor_items: usize,
    pub weapon_items: usize,
    pub quality: QualityReport,
    pub tiered_output: PathBuf,
    pub database_output: PathBuf,
}

/// Consolidated material tiering and item generation
pub struct ForgePipeline {
    config: ForgeConfig,
}

impl ForgePipeline {
    pub fn new(config: ForgeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    /// Pure part of the run: inputs in, tiered materials and item database out
    pub fn build(&self, inputs: &ForgeInputs) -> Result<ForgeOutput, ForgeError> {
        let catalog = if self.config.split_compound_names {
            split_compound_names(&inputs.catalog)
        } else {
            inputs.catalog.clone()
        };

        let materials = tier_materials(&catalog, self.config.tier_policy);

        let armor = generate_armor(&materials, &inputs.armor_volumes, &self.config.generation.armor)?;
        let weapons = generate_weapons(
            &materials,
            &inputs.weapon_volumes,
            &self.config.generation.weapons,
        )?;
        let armor_items = armor.len();
        let weapon_items = weapons.len();

        let mut items = armor;
        items.extend(weapons);
        let quality = assign_quality_tiers(&mut items);

        Ok(ForgeOutput {
            materials,
            database: ItemDatabase::from_items(items),
            armor_items,
            weapon_items,
            quality,
        })
    }

    /// Load inputs, build, then write both output files
    pub fn run(&self, paths: &ForgePaths) -> Result<ForgeReport> {
        let inputs = ForgeInputs::load(paths)?;
        let output = self.build(&inputs)?;

        let tiered_json = render_json(&output.materials.by_row_name())?;
        let database_json = render_json(&output.database)?;

        write_all_atomic(&[
            (paths.tiered_output.as_path(), tiered_json.as_str()),
            (paths.database_output.as_path(), database_json.as_str()),
        ])?;

        tracing::info!("Wrote {:?}", paths.tiered_output);
        tracing::info!("Wrote {:?}", paths.database_output);

        Ok(ForgeReport {
            materials: output.materials.len(),
            armor_items: output.armor_items,
            weapon_items: output.weapon_items,
            quality: output.quality,
            tiered_output: paths.tiered_output.clone(),
            database_output: paths.database_output.clone(),
        })
    }
}

/// Options for a standalone tiering run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TieringOptions {
    pub policy: TierPolicy,
    pub split_compound_names: bool,
    /// `Name, Magic, Density` table merged before tiering
    pub supplementary: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct TieringReport {
    pub materials: TieredMaterials,
    pub merge: Option<MergeReport>,
}

/// Tier a catalog on its own and write `category → [material]`
pub fn run_tiering(input: &Path, output: &Path, options: &TieringOptions) -> Result<TieringReport> {
    let mut catalog = load_catalog(input)?;
    let supplementary = options
        .supplementary
        .as_deref()
        .map(load_supplementary_properties)
        .transpose()?;

    if options.split_compound_names {
        catalog = split_compound_names(&catalog);
    }
    let merge = supplementary.map(|table| merge_supplementary_properties(&mut catalog, &table));

    let materials = tier_materials(&catalog, options.policy);
    let json = render_json(&materials.by_category())?;
    write_atomic(output, &json)?;
    tracing::info!("Wrote {:?}", output);

    Ok(TieringReport { materials, merge })
}

/// Integrate raw measurement CSVs (one per category) into a catalog file
pub fn run_integration(
    sources: &[(MaterialCategory, PathBuf)],
    config: &ScoringConfig,
    policy: TierPolicy,
    output: &Path,
) -> Result<MaterialCatalog> {
    let mut tables = Vec::with_capacity(sources.len());
    for (category, path) in sources {
        let profile = config.profile(category)?;
        tables.push(load_raw_properties(path, category, profile)?);
    }

    let catalog = integrate_tables(&tables, config, policy)?;
    let json = render_json(&catalog)?;
    write_atomic(output, &json)?;
    tracing::info!("Wrote {} materials to {:?}", catalog.len(), output);

    Ok(catalog)
}

/// Pretty JSON with a trailing newline
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    json.push('\n');
    Ok(json)
}

/// Write through `<path>.tmp` and rename over the destination
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    write_all_atomic(&[(path, contents)])
}

/// Write several files all-or-nothing
///
/// Every parent directory is created and every `.tmp` file written before the
/// first rename. Leftover `.tmp` files are removed on failure.
pub fn write_all_atomic(outputs: &[(&Path, &str)]) -> Result<()> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(outputs.len());
    let result = stage_outputs(outputs, &mut staged).and_then(|()| commit_outputs(&staged));

    if result.is_err() {
        for (tmp, _) in &staged {
            if tmp.exists() {
                if let Err(err) = fs::remove_file(tmp) {
                    tracing::warn!("Failed to remove {:?}: {}", tmp, err);
                }
            }
        }
    }
    result
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

fn stage_outputs<'a>(
    outputs: &[(&'a Path, &str)],
    staged: &mut Vec<(PathBuf, &'a Path)>,
) -> Result<()> {
    for (path, _) in outputs {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
        }
    }

    for &(path, contents) in outputs {
        let tmp = tmp_path(path);
        staged.push((tmp.clone(), path));
        fs::write(&tmp, contents).with_context(|| format!("Failed to write {:?}", tmp))?;
    }
    Ok(())
}

fn commit_outputs(staged: &[(PathBuf, &Path)]) -> Result<()> {
    for (tmp, path) in staged {
        fs::rename(tmp, path).with_context(|| format!("Failed to move {:?} into place", tmp))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_catalog;
    use crate::items::VolumeTable;
    use serde_json::json;

    fn inputs() -> ForgeInputs {
        let catalog = parse_catalog(&json!({
            "Metals": {"T1": [
                {"rowName": "Metals_T1_Iron", "name": "Iron", "slash": 0.6, "pierce": 0.5, "blunt": 0.7},
                {"rowName": "Metals_T1_Bronze", "name": "Bronze", "slash": 0.4, "pierce": 0.4, "blunt": 0.5}
            ]},
            "Leather": {
                "T1": [{"rowName": "Leather_T1_Deerskin", "name": "Deerskin", "slash": 0.2, "pierce": 0.1, "blunt": 0.3}],
                "T2": [{"rowName": "Leather_T2_Cowhide_Pigskin", "name": "Cowhide", "slash": 0.3, "pierce": 0.2, "blunt": 0.4}]
            },
            "Wood": {"T2": [
                {"rowName": "Wood_T2_Oak_Ash_Maple", "name": "Oak", "slash": 0.3, "pierce": 0.2, "blunt": 0.5}
            ]}
        }))
        .unwrap();

        ForgeInputs {
            catalog,
            armor_volumes: VolumeTable::from_rows(vec![("Helmet", "Shell", 400.0), ("Boots", "Sole", 200.0)]),
            weapon_volumes: VolumeTable::from_rows(vec![("Sword", "Blade", 300.0), ("Sword", "Grip", 60.0)]),
        }
    }

    #[test]
    fn test_build_counts() {
        let output = ForgePipeline::new(ForgeConfig::default()).build(&inputs()).unwrap();
        // 2 pieces × 5 outer materials × 3 classes
        assert_eq!(output.armor_items, 30);
        // 1 weapon type × 2 metals
        assert_eq!(output.weapon_items, 2);
        assert_eq!(output.database.len(), 32);
        assert_eq!(output.quality.groups, 3);
        assert_eq!(output.quality.untyped, 0);
        assert!(output.database.items().all(|i| i.quality_tier.is_some()));
    }

    #[test]
    fn test_build_is_deterministic() {
        let pipeline = ForgePipeline::new(ForgeConfig::default());
        let a = render_json(&pipeline.build(&inputs()).unwrap().database).unwrap();
        let b = render_json(&pipeline.build(&inputs()).unwrap().database).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_forge_config_partial_file() {
        let config: ForgeConfig =
            serde_json::from_str(r#"{"tier_policy": "threshold"}"#).unwrap();
        assert_eq!(config.tier_policy, TierPolicy::Threshold);
        assert!(!config.split_compound_names);
        assert_eq!(config.generation, GenerationConfig::default());
    }

    #[test]
    fn test_write_atomic_creates_parent_and_leaves_no_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cpp/item_database.json");
        write_atomic(&path, "{}\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
        assert!(!dir.path().join("cpp/item_database.json.tmp").exists());
    }

    #[test]
    fn test_failed_rename_removes_every_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let tiered = dir.path().join("public/materials_tiered.json");
        // A directory at the destination makes the rename fail
        let database = dir.path().join("cpp/item_database.json");
        fs::create_dir_all(&database).unwrap();

        let result = write_all_atomic(&[
            (database.as_path(), "{}\n"),
            (tiered.as_path(), "{}\n"),
        ]);
        assert!(result.is_err());
        assert!(!tiered.exists());
        assert!(!dir.path().join("public/materials_tiered.json.tmp").exists());
        assert!(!dir.path().join("cpp/item_database.json.tmp").exists());
    }
}
