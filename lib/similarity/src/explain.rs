//! Explainability for title comparisons and clustering runs
//!
//! A [`ScoreBreakdown`] shows how a score was reached: per-factor scores,
//! the weighted base, each bonus applied and any veto. [`ClusterStats`]
//! summarizes a grouping run.

use prodmatch_core::ProductGroup;
use serde::Serialize;

/// Raw (unweighted) score of each factor
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FactorScores {
    pub model: f32,
    pub brand: f32,
    pub specs: f32,
    pub words: f32,
}

/// Why a pair was forced to a non-match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Veto {
    /// A strict-model brand with differing model codes
    ModelMismatch,
    /// Both titles carry dimensions that do not agree
    DimensionMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusKind {
    ModelMatch,
    BrandMatch,
    SpecMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AppliedBonus {
    pub kind: BonusKind,
    pub factor: f32,
}

/// Full account of one comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub factors: FactorScores,
    /// Weighted sum of the factors
    pub base: f32,
    pub bonuses: Vec<AppliedBonus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub veto: Option<Veto>,
    /// Set when the two titles are the same text
    pub identical: bool,
    /// Final score in [0, 1]
    pub score: f32,
}

impl ScoreBreakdown {
    pub fn identical() -> Self {
        Self {
            factors: FactorScores {
                model: 1.0,
                brand: 1.0,
                specs: 1.0,
                words: 1.0,
            },
            base: 1.0,
            bonuses: Vec::new(),
            veto: None,
            identical: true,
            score: 1.0,
        }
    }

    pub fn vetoed(veto: Veto, factors: FactorScores) -> Self {
        Self {
            factors,
            base: 0.0,
            bonuses: Vec::new(),
            veto: Some(veto),
            identical: false,
            score: 0.0,
        }
    }

    /// Product of all applied bonus factors
    pub fn multiplier(&self) -> f32 {
        self.bonuses.iter().map(|b| b.factor).product()
    }

    /// The factor with the highest raw score
    pub fn top_factor(&self) -> &'static str {
        let f = &self.factors;
        [
            ("model", f.model),
            ("brand", f.brand),
            ("specs", f.specs),
            ("words", f.words),
        ]
        .into_iter()
        .fold(("model", f32::MIN), |best, cur| if cur.1 > best.1 { cur } else { best })
        .0
    }
}

/// Summary statistics for a grouping run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterStats {
    /// Number of listings grouped
    pub listings: usize,
    /// Number of groups produced
    pub groups: usize,
    /// Groups with a single listing
    pub singletons: usize,
    /// Size of the largest group
    pub largest_group: usize,
    /// Pairwise comparisons performed
    pub comparisons: usize,
}

impl ClusterStats {
    /// Compute stats from the groups of one run
    pub fn compute(groups: &[ProductGroup]) -> Self {
        let listings: usize = groups.iter().map(ProductGroup::len).sum();
        Self {
            listings,
            groups: groups.len(),
            singletons: groups.iter().filter(|g| g.len() == 1).count(),
            largest_group: groups.iter().map(ProductGroup::len).max().unwrap_or(0),
            comparisons: listings * listings.saturating_sub(1) / 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodmatch_core::Listing;

    fn group(name: &str, titles: &[&str]) -> ProductGroup {
        ProductGroup {
            name: name.to_string(),
            listings: titles.iter().map(|t| Listing::new(*t)).collect(),
        }
    }

    #[test]
    fn test_identical_breakdown() {
        let breakdown = ScoreBreakdown::identical();
        assert_eq!(breakdown.score, 1.0);
        assert!(breakdown.identical);
        assert_eq!(breakdown.multiplier(), 1.0);
    }

    #[test]
    fn test_vetoed_breakdown_serialization() {
        let breakdown = ScoreBreakdown::vetoed(
            Veto::ModelMismatch,
            FactorScores {
                model: 0.0,
                brand: 1.0,
                specs: 1.0,
                words: 0.5,
            },
        );
        let json = serde_json::to_string(&breakdown).unwrap();

        assert!(json.contains("\"veto\":\"model_mismatch\""));
        assert!(json.contains("\"score\":0.0"));
        assert!(json.contains("\"factors\""));
    }

    #[test]
    fn test_multiplier_and_top_factor() {
        let breakdown = ScoreBreakdown {
            factors: FactorScores {
                model: 0.2,
                brand: 1.0,
                specs: 0.5,
                words: 0.1,
            },
            base: 0.5,
            bonuses: vec![
                AppliedBonus {
                    kind: BonusKind::BrandMatch,
                    factor: 1.3,
                },
                AppliedBonus {
                    kind: BonusKind::SpecMatch,
                    factor: 1.2,
                },
            ],
            veto: None,
            identical: false,
            score: 0.78,
        };

        assert!((breakdown.multiplier() - 1.56).abs() < 1e-6);
        assert_eq!(breakdown.top_factor(), "brand");
        let json = serde_json::to_string(&breakdown).unwrap();
        assert!(!json.contains("veto"));
    }

    #[test]
    fn test_cluster_stats() {
        let groups = vec![
            group("A", &["a1", "a2", "a3"]),
            group("B", &["b1"]),
            group("C", &["c1", "c2"]),
        ];
        let stats = ClusterStats::compute(&groups);

        assert_eq!(stats.listings, 6);
        assert_eq!(stats.groups, 3);
        assert_eq!(stats.singletons, 1);
        assert_eq!(stats.largest_group, 3);
        assert_eq!(stats.comparisons, 15);
    }

    #[test]
    fn test_empty_stats() {
        let stats = ClusterStats::compute(&[]);
        assert_eq!(stats.listings, 0);
        assert_eq!(stats.largest_group, 0);
        assert_eq!(stats.comparisons, 0);
    }
}
