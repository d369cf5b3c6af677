//! Component volume tables
//!
//! Maps (item type, component role) → volume in cm³. Item and component order
//! follow first appearance in the input; a repeated (item, component) pair
//! replaces the earlier volume.

use crate::error::ForgeError;
use serde_json::Value;

/// Field names of one tabular volume input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeSchema {
    pub item_field: &'static str,
    pub component_field: &'static str,
    pub volume_field: &'static str,
}

pub const ARMOR_VOLUME_SCHEMA: VolumeSchema = VolumeSchema {
    item_field: "ArmorPiece",
    component_field: "Component",
    volume_field: "Volume_cm3",
};

pub const WEAPON_VOLUME_SCHEMA: VolumeSchema = VolumeSchema {
    item_field: "weapon_type",
    component_field: "component_name",
    volume_field: "volume_cm3",
};

/// Components of one item type
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeGroup {
    pub item: String,
    pub components: Vec<(String, f64)>,
}

impl VolumeGroup {
    pub fn volume(&self, component: &str) -> Option<f64> {
        self.components
            .iter()
            .find(|(name, _)| name == component)
            .map(|&(_, volume)| volume)
    }

    pub fn has_component(&self, component: &str) -> bool {
        self.volume(component).is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolumeTable {
    groups: Vec<VolumeGroup>,
}

impl VolumeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: &str, component: &str, volume: f64) {
        let idx = match self.groups.iter().position(|g| g.item == item) {
            Some(idx) => idx,
            None => {
                self.groups.push(VolumeGroup {
                    item: item.to_string(),
                    components: Vec::new(),
                });
                self.groups.len() - 1
            }
        };
        let group = &mut self.groups[idx];

        match group.components.iter_mut().find(|(name, _)| name == component) {
            Some(slot) => slot.1 = volume,
            None => group.components.push((component.to_string(), volume)),
        }
    }

    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (S, S, f64)>,
        S: AsRef<str>,
    {
        let mut table = VolumeTable::new();
        for (item, component, volume) in rows {
            table.insert(item.as_ref(), component.as_ref(), volume);
        }
        table
    }

    /// Build from a JSON array of row objects
    ///
    /// Volumes may be numbers or numeric strings.
    pub fn from_json_records(root: &Value, schema: VolumeSchema) -> Result<Self, ForgeError> {
        let rows = root.as_array().ok_or_else(|| {
            ForgeError::malformed(schema.item_field, "volume table must be a list of rows")
        })?;

        let mut table = VolumeTable::new();
        for (position, row) in rows.iter().enumerate() {
            let context = format!("{} row {}", schema.item_field, position);
            let item = string_field(row, schema.item_field, &context)?;
            let component = string_field(row, schema.component_field, &context)?;
            let volume = match row.get(schema.volume_field) {
                Some(Value::Number(n)) => n.as_f64(),
                Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
                _ => None,
            }
            .ok_or_else(|| {
                ForgeError::malformed(
                    context.clone(),
                    format!("'{}' must be a number", schema.volume_field),
                )
            })?;
            table.insert(item, component, volume);
        }
        Ok(table)
    }

    pub fn groups(&self) -> &[VolumeGroup] {
        &self.groups
    }

    pub fn group(&self, item: &str) -> Option<&VolumeGroup> {
        self.groups.iter().find(|g| g.item == item)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

fn string_field<'a>(row: &'a Value, field: &str, context: &str) -> Result<&'a str, ForgeError> {
    row.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| ForgeError::malformed(context, format!("missing string field '{}'", field)))
}
