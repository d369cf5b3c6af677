//! Score synthesizer
//!
//! Applies a category profile to normalized properties. Every stat is clamped
//! to [0, 1] regardless of how extreme the inputs or weights are.

use super::config::{CategoryProfile, StatFormula};
use crate::utils::NormalizedProperties;
use serde::Serialize;

/// Synthesized combat stats for one material (each in [0, 1])
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatSheet {
    pub slash: f64,
    pub pierce: f64,
    pub blunt: f64,
    pub magic: f64,
}

impl StatFormula {
    pub fn evaluate(&self, props: &NormalizedProperties) -> f64 {
        let linear = self.offset
            + self
                .weights
                .iter()
                .map(|(&property, &weight)| weight * props.get(property))
                .sum::<f64>();
        (linear.clamp(0.0, 1.0) * self.scale).clamp(0.0, 1.0)
    }
}

pub fn synthesize(profile: &CategoryProfile, props: &NormalizedProperties) -> StatSheet {
    StatSheet {
        slash: profile.stats.slash.evaluate(props),
        pierce: profile.stats.pierce.evaluate(props),
        blunt: profile.stats.blunt.evaluate(props),
        magic: profile.stats.magic.evaluate(props),
    }
}

/// Tiering score for integration: mean of the physical properties (no magic)
pub fn composite_score(props: &NormalizedProperties) -> f64 {
    props.composite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringConfig;
    use crate::types::MaterialCategory;
    use crate::utils::PhysicalProperty;
    use approx::assert_relative_eq;

    fn props(density: f64, strength: f64, hardness: f64) -> NormalizedProperties {
        NormalizedProperties { density, strength, hardness }
    }

    #[test]
    fn test_metal_formulas() {
        let config = ScoringConfig::builtin();
        let metals = config.profile(&MaterialCategory::Metals).unwrap();
        let sheet = synthesize(metals, &props(0.2, 0.5, 1.0));

        assert_relative_eq!(sheet.slash, 0.6 * 0.5 + 0.4 * 1.0, epsilon = 1e-12);
        assert_relative_eq!(sheet.pierce, 0.4 * 0.5 + 0.6 * 1.0, epsilon = 1e-12);
        assert_relative_eq!(sheet.blunt, 0.5 * 0.2 + 0.5 * 0.5, epsilon = 1e-12);
        // 0.5 × (1 − mean(0.2, 0.5, 1.0))
        assert_relative_eq!(sheet.magic, 0.5 * (1.0 - 1.7 / 3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_wood_formulas() {
        let config = ScoringConfig::builtin();
        let wood = config.profile(&MaterialCategory::Wood).unwrap();
        let sheet = synthesize(wood, &props(0.25, 1.0, 0.0));

        assert_relative_eq!(sheet.slash, 0.7, epsilon = 1e-12);
        assert_relative_eq!(sheet.pierce, 0.3, epsilon = 1e-12);
        assert_relative_eq!(sheet.blunt, 0.8 * 0.25 + 0.2, epsilon = 1e-12);
        assert_relative_eq!(sheet.magic, 0.8 * 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_stats_stay_in_unit_interval_for_extreme_inputs() {
        let config = ScoringConfig::builtin();
        let extremes = [-1e9, -3.0, 0.0, 0.5, 1.0, 7.0, 1e12];

        for category in config.categories() {
            let profile = config.profile(&category).unwrap();
            for &d in &extremes {
                for &s in &extremes {
                    for &h in &extremes {
                        let sheet = synthesize(profile, &props(d, s, h));
                        for value in [sheet.slash, sheet.pierce, sheet.blunt, sheet.magic] {
                            assert!((0.0..=1.0).contains(&value), "{} out of range", value);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_oversized_weights_are_clamped() {
        let formula = StatFormula::weighted(&[(PhysicalProperty::Density, 4.0)]);
        assert_eq!(formula.evaluate(&props(1.0, 0.0, 0.0)), 1.0);
        let negative = StatFormula::weighted(&[(PhysicalProperty::Hardness, -2.0)]);
        assert_eq!(negative.evaluate(&props(0.0, 0.0, 1.0)), 0.0);
    }

    #[test]
    fn test_composite_excludes_magic() {
        assert_relative_eq!(composite_score(&props(0.3, 0.6, 0.9)), 0.6, epsilon = 1e-12);
    }
}
