//! Data Loading
//!
//! Reads the pipeline inputs: the material catalog (JSON), component volume
//! tables (JSON records or CSV), raw measurement tables (CSV) and the
//! supplementary magic/density table (CSV). Tabular files go through Polars.
//!
//! Every loader checks the file exists first so a missing input surfaces as
//! `ForgeError::MissingInput` rather than an I/O error string.

use crate::catalog::{parse_catalog, MaterialCatalog, SupplementaryProperties};
use crate::error::ForgeError;
use crate::items::volumes::{VolumeSchema, VolumeTable, ARMOR_VOLUME_SCHEMA, WEAPON_VOLUME_SCHEMA};
use crate::scoring::{CategoryProfile, RawPropertyTable};
use crate::types::MaterialCategory;
use anyhow::{Context, Result};
use polars::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Well-known input and output locations of the consolidated pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct ForgePaths {
    pub materials: PathBuf,
    pub armor_volumes: PathBuf,
    pub weapon_volumes: PathBuf,
    pub tiered_output: PathBuf,
    pub database_output: PathBuf,
}

impl ForgePaths {
    /// Default layout under a data directory
    pub fn from_data_dir(data_dir: &Path) -> Self {
        ForgePaths {
            materials: data_dir.join("public/materials.json"),
            armor_volumes: data_dir.join("public/armor_volumes.json"),
            weapon_volumes: data_dir.join("public/weapon_volumes.json"),
            tiered_output: data_dir.join("public/materials_tiered.json"),
            database_output: data_dir.join("cpp/item_database.json"),
        }
    }
}

/// All inputs of one pipeline run, loaded up front
#[derive(Debug, Clone)]
pub struct ForgeInputs {
    pub catalog: MaterialCatalog,
    pub armor_volumes: VolumeTable,
    pub weapon_volumes: VolumeTable,
}

impl ForgeInputs {
    pub fn load(paths: &ForgePaths) -> Result<Self> {
        tracing::info!("Loading inputs...");

        let catalog = load_catalog(&paths.materials)?;
        let armor_volumes = load_volume_table(&paths.armor_volumes, ARMOR_VOLUME_SCHEMA)?;
        let weapon_volumes = load_volume_table(&paths.weapon_volumes, WEAPON_VOLUME_SCHEMA)?;

        tracing::info!("  Materials: {}", catalog.len());
        tracing::info!("  Armor pieces: {}", armor_volumes.len());
        tracing::info!("  Weapon types: {}", weapon_volumes.len());

        Ok(ForgeInputs {
            catalog,
            armor_volumes,
            weapon_volumes,
        })
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ForgeError::MissingInput {
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(())
}

pub fn read_json(path: &Path) -> Result<Value> {
    ensure_exists(path)?;
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {:?}", path))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse JSON: {:?}", path))
}

/// Load the `category → tier label → [material]` catalog
pub fn load_catalog(path: &Path) -> Result<MaterialCatalog> {
    let root = read_json(path)?;
    parse_catalog(&root).with_context(|| format!("Invalid material catalog: {:?}", path))
}

/// Load a volume table; `.csv` files use Polars, anything else is JSON records
pub fn load_volume_table(path: &Path, schema: VolumeSchema) -> Result<VolumeTable> {
    if is_csv(path) {
        let df = read_csv(path)?;
        let items = string_column(&df, schema.item_field, path)?;
        let components = string_column(&df, schema.component_field, path)?;
        let volumes = f64_column(&df, schema.volume_field, path)?;

        let mut table = VolumeTable::new();
        for (row, ((item, component), volume)) in items
            .into_iter()
            .zip(components)
            .zip(volumes)
            .enumerate()
        {
            match (item, component, volume) {
                (Some(item), Some(component), Some(volume)) => {
                    table.insert(&item, &component, volume)
                }
                _ => {
                    return Err(ForgeError::malformed(
                        format!("{:?} row {}", path, row),
                        "empty cell in volume table",
                    )
                    .into())
                }
            }
        }
        Ok(table)
    } else {
        let root = read_json(path)?;
        VolumeTable::from_json_records(&root, schema)
            .with_context(|| format!("Invalid volume table: {:?}", path))
    }
}

/// Load one category's raw measurements using the profile's column names
pub fn load_raw_properties(
    path: &Path,
    category: &MaterialCategory,
    profile: &CategoryProfile,
) -> Result<RawPropertyTable> {
    let df = read_csv(path)?;
    let names: Vec<String> = string_column(&df, &profile.name_column, path)?
        .into_iter()
        .enumerate()
        .map(|(row, name)| {
            name.ok_or_else(|| ForgeError::MissingField {
                category: category.to_string(),
                material: format!("row {}", row),
                field: "name",
            })
        })
        .collect::<Result<_, _>>()?;

    let measure = |column: &str, field: &'static str| -> Result<Vec<f64>> {
        let values = f64_column(&df, column, path)?;
        values
            .into_iter()
            .zip(&names)
            .map(|(value, name)| {
                value.ok_or_else(|| {
                    anyhow::Error::from(ForgeError::MissingField {
                        category: category.to_string(),
                        material: name.clone(),
                        field,
                    })
                })
            })
            .collect()
    };

    let density = measure(&profile.columns.density, "density")?;
    let strength = measure(&profile.columns.strength, "strength")?;
    let hardness = measure(&profile.columns.hardness, "hardness")?;

    tracing::info!("Loaded {} raw {} measurements from {:?}", names.len(), category, path);

    Ok(RawPropertyTable {
        category: category.clone(),
        names,
        density,
        strength,
        hardness,
    })
}

/// Load the `Name, Magic, Density` supplementary table
pub fn load_supplementary_properties(path: &Path) -> Result<SupplementaryProperties> {
    let df = read_csv(path)?;
    let names = string_column(&df, "Name", path)?;
    let magic = f64_column(&df, "Magic", path)?;
    let density = f64_column(&df, "Density", path)?;

    let mut table = SupplementaryProperties::new();
    for (row, ((name, magic), density)) in names.into_iter().zip(magic).zip(density).enumerate() {
        match (name, magic, density) {
            (Some(name), Some(magic), Some(density)) => table.insert(name, magic, density),
            _ => {
                return Err(ForgeError::malformed(
                    format!("{:?} row {}", path, row),
                    "Name, Magic and Density are all required",
                )
                .into())
            }
        }
    }
    Ok(table)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"))
}

fn read_csv(path: &Path) -> Result<DataFrame> {
    ensure_exists(path)?;
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load CSV: {:?}", path))
}

fn string_column(df: &DataFrame, name: &str, path: &Path) -> Result<Vec<Option<String>>> {
    let column = df
        .column(name)
        .with_context(|| format!("{:?}: missing column '{}'", path, name))?
        .cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|value| value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
        .collect())
}

fn f64_column(df: &DataFrame, name: &str, path: &Path) -> Result<Vec<Option<f64>>> {
    let column = df
        .column(name)
        .with_context(|| format!("{:?}: missing column '{}'", path, name))?
        .cast(&DataType::Float64)
        .with_context(|| format!("{:?}: column '{}' is not numeric", path, name))?;
    Ok(column.f64()?.into_iter().collect())
}
