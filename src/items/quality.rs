//! Quality tiering
//!
//! Groups generated items by `type` (piece or weapon kind, not material
//! category), sorts each group by total stat power and assigns rank quintiles
//! to `quality_tier`.
//!
//! Items without a `type` are left out of every group and keep no quality
//! tier (possibly unintended, kept as-is). The skipped count is returned in
//! `QualityReport::untyped`.

use super::GeneratedItem;
use crate::tiering::{quintile_tier, rank_order};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QualityReport {
    /// Number of item types ranked
    pub groups: usize,
    pub ranked: usize,
    /// Items skipped for lacking a type
    pub untyped: usize,
}

pub fn assign_quality_tiers(items: &mut [GeneratedItem]) -> QualityReport {
    // type → item indices, in first-seen order
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    let mut report = QualityReport::default();

    for (idx, item) in items.iter().enumerate() {
        let Some(kind) = item.kind.as_deref().filter(|k| !k.is_empty()) else {
            report.untyped += 1;
            continue;
        };
        match groups.iter_mut().find(|(k, _)| k.as_str() == kind) {
            Some((_, members)) => members.push(idx),
            None => groups.push((kind.to_string(), vec![idx])),
        }
    }

    for (kind, members) in &groups {
        let power: Vec<f64> = members.iter().map(|&i| items[i].stats.power()).collect();
        let n = members.len();
        for (rank, pos) in rank_order(&power).into_iter().enumerate() {
            items[members[pos]].quality_tier = Some(quintile_tier(rank, n));
        }
        tracing::debug!("Ranked {} items of type '{}'", n, kind);
        report.ranked += n;
    }
    report.groups = groups.len();

    if report.untyped > 0 {
        tracing::warn!(
            "{} items have no type and received no quality tier",
            report.untyped
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ItemStats, ItemType};
    use crate::types::{MaterialCategory, StatLine, Tier};

    fn item(id: &str, kind: Option<&str>, power: f64) -> GeneratedItem {
        GeneratedItem {
            id: id.to_string(),
            name: id.to_string(),
            item_type: ItemType::Armor,
            kind: kind.map(str::to_string),
            stats: ItemStats::Defense(StatLine { slash: power, pierce: 0.0, blunt: 0.0 }),
            material_tier: Some(Tier(1)),
            material_category: MaterialCategory::Metals,
            icon: String::new(),
            texture: String::new(),
            quality_tier: None,
        }
    }

    #[test]
    fn test_quintiles_within_each_type() {
        let mut items = vec![
            item("h1", Some("Helmet"), 10.0),
            item("b1", Some("Boots"), 5.0),
            item("h2", Some("Helmet"), 90.0),
            item("h3", Some("Helmet"), 50.0),
            item("h4", Some("Helmet"), 70.0),
            item("h5", Some("Helmet"), 30.0),
        ];
        let report = assign_quality_tiers(&mut items);
        assert_eq!(report, QualityReport { groups: 2, ranked: 6, untyped: 0 });

        let tier = |id: &str| items.iter().find(|i| i.id == id).unwrap().quality_tier;
        assert_eq!(tier("h2"), Some(Tier(1)));
        assert_eq!(tier("h4"), Some(Tier(2)));
        assert_eq!(tier("h3"), Some(Tier(3)));
        assert_eq!(tier("h5"), Some(Tier(4)));
        assert_eq!(tier("h1"), Some(Tier(5)));
        // Singleton group
        assert_eq!(tier("b1"), Some(Tier(1)));
    }

    #[test]
    fn test_untyped_items_are_skipped() {
        let mut items = vec![item("a", None, 1.0), item("b", Some(""), 2.0), item("c", Some("Axe"), 3.0)];
        let report = assign_quality_tiers(&mut items);
        assert_eq!(report.untyped, 2);
        assert_eq!(items[0].quality_tier, None);
        assert_eq!(items[1].quality_tier, None);
        assert_eq!(items[2].quality_tier, Some(Tier(1)));
    }

    #[test]
    fn test_every_large_group_covers_all_tiers() {
        let mut items: Vec<_> = (0..23)
            .map(|i| item(&format!("s{}", i), Some("Sword"), ((i * 7) % 5) as f64))
            .collect();
        assign_quality_tiers(&mut items);
        for band in 1..=5u8 {
            assert!(items.iter().any(|i| i.quality_tier == Some(Tier(band))));
        }
    }
}
