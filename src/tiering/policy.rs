//! Tier assignment policies
//!
//! Two incompatible policies exist and the caller picks one per run:
//!
//! - **Rank quintile**: sort descending by score (stable, ties keep input
//!   order), `tier = floor(5 × index / n) + 1`. Tier 1 is the best band and all
//!   five tiers are populated when n ≥ 5.
//! - **Threshold**: fixed breakpoints independent of population size.
//!   T5 > 0.8, T4 > 0.6, T3 > 0.4, T2 > 0.2, else T1. Tier 5 is the best band.

use crate::types::Tier;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of rank bands
pub const QUINTILES: usize = 5;

/// (exclusive lower bound, tier) pairs, checked top-down
pub const THRESHOLD_BREAKPOINTS: [(f64, u8); 4] = [(0.8, 5), (0.6, 4), (0.4, 3), (0.2, 2)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierPolicy {
    #[default]
    RankQuintile,
    Threshold,
}

impl TierPolicy {
    /// Assign a tier to every score; output is aligned with the input order
    pub fn assign(self, scores: &[f64]) -> Vec<Tier> {
        match self {
            TierPolicy::RankQuintile => {
                let n = scores.len();
                let mut tiers = vec![Tier(1); n];
                for (rank, &idx) in rank_order(scores).iter().enumerate() {
                    tiers[idx] = quintile_tier(rank, n);
                }
                tiers
            }
            TierPolicy::Threshold => scores.iter().map(|&s| threshold_tier(s)).collect(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TierPolicy::RankQuintile => "rank_quintile",
            TierPolicy::Threshold => "threshold",
        }
    }
}

impl fmt::Display for TierPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TierPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rank_quintile" | "rank" | "quintile" => Ok(TierPolicy::RankQuintile),
            "threshold" => Ok(TierPolicy::Threshold),
            other => anyhow::bail!("Unknown tier policy: {}", other),
        }
    }
}

/// Indices of `scores` sorted descending; ties keep their input order
pub fn rank_order(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order
}

/// Quintile band for a 0-based rank within a population of `n`
pub fn quintile_tier(rank: usize, n: usize) -> Tier {
    debug_assert!(rank < n);
    Tier((QUINTILES * rank / n) as u8 + 1)
}

/// Fixed-breakpoint tier for a score in [0, 1]
pub fn threshold_tier(score: f64) -> Tier {
    THRESHOLD_BREAKPOINTS
        .iter()
        .find(|(bound, _)| score > *bound)
        .map(|&(_, tier)| Tier(tier))
        .unwrap_or(Tier(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_materials_one_per_tier() {
        // A: 0.9, B: 0.7, C: 0.5, D: 0.3, E: 0.1
        let tiers = TierPolicy::RankQuintile.assign(&[0.9, 0.7, 0.5, 0.3, 0.1]);
        assert_eq!(tiers, vec![Tier(1), Tier(2), Tier(3), Tier(4), Tier(5)]);
    }

    #[test]
    fn test_rank_tiers_follow_score_not_input_order() {
        let tiers = TierPolicy::RankQuintile.assign(&[0.1, 0.9, 0.5, 0.3, 0.7]);
        assert_eq!(tiers, vec![Tier(5), Tier(1), Tier(3), Tier(4), Tier(2)]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        assert_eq!(rank_order(&[0.5, 0.5, 0.9, 0.5]), vec![2, 0, 1, 3]);
    }

    #[test]
    fn test_rank_tiers_cover_all_bands_and_are_monotonic() {
        for n in 5..40 {
            let scores: Vec<f64> = (0..n).map(|i| ((i * 37) % 11) as f64 / 10.0).collect();
            let tiers = TierPolicy::RankQuintile.assign(&scores);

            for band in 1..=5u8 {
                assert!(tiers.contains(&Tier(band)), "n={} missing tier {}", n, band);
            }

            let order = rank_order(&scores);
            for pair in order.windows(2) {
                assert!(tiers[pair[0]] <= tiers[pair[1]]);
            }
        }
    }

    #[test]
    fn test_small_population_uses_fewer_bands() {
        let tiers = TierPolicy::RankQuintile.assign(&[0.3, 0.6]);
        // floor(5*0/2)+1 = 1, floor(5*1/2)+1 = 3
        assert_eq!(tiers, vec![Tier(3), Tier(1)]);
        assert!(TierPolicy::RankQuintile.assign(&[]).is_empty());
    }

    #[test]
    fn test_threshold_breakpoints() {
        assert_eq!(threshold_tier(0.95), Tier(5));
        assert_eq!(threshold_tier(0.8), Tier(4));
        assert_eq!(threshold_tier(0.61), Tier(4));
        assert_eq!(threshold_tier(0.6), Tier(3));
        assert_eq!(threshold_tier(0.41), Tier(3));
        assert_eq!(threshold_tier(0.3), Tier(2));
        assert_eq!(threshold_tier(0.2), Tier(1));
        assert_eq!(threshold_tier(0.0), Tier(1));
    }

    #[test]
    fn test_threshold_ignores_population_size() {
        let tiers = TierPolicy::Threshold.assign(&[0.9, 0.85, 0.81]);
        assert_eq!(tiers, vec![Tier(5), Tier(5), Tier(5)]);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("threshold".parse::<TierPolicy>().unwrap(), TierPolicy::Threshold);
        assert_eq!("Rank_Quintile".parse::<TierPolicy>().unwrap(), TierPolicy::RankQuintile);
        assert!("median".parse::<TierPolicy>().is_err());
        let json = serde_json::to_string(&TierPolicy::RankQuintile).unwrap();
        assert_eq!(json, "\"rank_quintile\"");
    }
}
