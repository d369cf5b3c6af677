//! Final item database
//!
//! `material category → [item]`, categories in first-seen order. The category
//! becomes the key and is not repeated inside the records.

use super::GeneratedItem;
use crate::types::MaterialCategory;
use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, Default)]
pub struct ItemDatabase {
    categories: Vec<(MaterialCategory, Vec<GeneratedItem>)>,
}

impl ItemDatabase {
    pub fn from_items(items: Vec<GeneratedItem>) -> Self {
        let mut categories: Vec<(MaterialCategory, Vec<GeneratedItem>)> = Vec::new();
        for item in items {
            match categories
                .iter_mut()
                .find(|(category, _)| *category == item.material_category)
            {
                Some((_, list)) => list.push(item),
                None => categories.push((item.material_category.clone(), vec![item])),
            }
        }
        Self { categories }
    }

    pub fn categories(&self) -> &[(MaterialCategory, Vec<GeneratedItem>)] {
        &self.categories
    }

    pub fn items(&self) -> impl Iterator<Item = &GeneratedItem> {
        self.categories.iter().flat_map(|(_, items)| items.iter())
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for ItemDatabase {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (category, items) in &self.categories {
            map.serialize_entry(category.as_str(), items)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ItemStats, ItemType};
    use crate::types::{StatLine, Tier};

    fn item(id: &str, category: MaterialCategory) -> GeneratedItem {
        GeneratedItem {
            id: id.to_string(),
            name: id.to_string(),
            item_type: ItemType::Weapon,
            kind: Some("Axe".to_string()),
            stats: ItemStats::Offense(StatLine { slash: 1.0, pierce: 2.0, blunt: 3.0 }),
            material_tier: Some(Tier(2)),
            material_category: category,
            icon: "i".to_string(),
            texture: "t".to_string(),
            quality_tier: Some(Tier(1)),
        }
    }

    #[test]
    fn test_grouping_preserves_first_seen_order() {
        let db = ItemDatabase::from_items(vec![
            item("a", MaterialCategory::Wood),
            item("b", MaterialCategory::Metals),
            item("c", MaterialCategory::Wood),
        ]);
        assert_eq!(db.len(), 3);

        let json = serde_json::to_string(&db).unwrap();
        assert!(json.find("\"Wood\"").unwrap() < json.find("\"Metals\"").unwrap());

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["Wood"].as_array().unwrap().len(), 2);
        assert_eq!(value["Metals"][0]["quality_tier"], serde_json::json!(1));
        assert!(value["Metals"][0].get("material_category").is_none());
    }
}
