//! Multi-factor title scoring
//!
//! Combines model, brand, specs and word similarity into one score using the
//! weights and bonuses of a [`MatchConfig`], with a hard veto for brands whose
//! listings only match on an identical model.

use crate::distance::{code_similarity, exact_similarity, jaccard, numeric_similarity, within_tolerance};
use crate::explain::{AppliedBonus, BonusKind, FactorScores, ScoreBreakdown, Veto};
use crate::schema::{ConfigError, MatchConfig};
use prodmatch_core::{compare_dimensions_with, ExtractedAttributes, Specs};

/// Scorer and classifier for pairs of listing titles
#[derive(Debug, Clone, Default)]
pub struct TitleMatcher {
    config: MatchConfig,
}

impl TitleMatcher {
    /// Create a matcher with the given config, taken as is
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Validate and normalize the config before use
    pub fn try_new(mut config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate_and_normalize()?;
        Ok(Self { config })
    }

    /// Get a reference to the config
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Similarity of two titles in [0, 1]
    pub fn similarity(&self, a: &str, b: &str) -> f32 {
        self.score(
            &ExtractedAttributes::from_title(a),
            &ExtractedAttributes::from_title(b),
        )
        .score
    }

    /// Score two listings from their extracted attributes.
    ///
    /// Titles equal after case folding and whitespace collapsing score 1,
    /// unless they collapse to nothing: blank titles carry no identity.
    pub fn score(&self, a: &ExtractedAttributes, b: &ExtractedAttributes) -> ScoreBreakdown {
        if !a.normalized_title.is_empty() && a.normalized_title == b.normalized_title {
            return ScoreBreakdown::identical();
        }

        let factors = FactorScores {
            model: code_similarity(a.model.as_deref(), b.model.as_deref()),
            brand: exact_similarity(a.brand.as_deref(), b.brand.as_deref()),
            specs: self.specs_score(&a.specs, &b.specs),
            words: jaccard(&*a.words, &*b.words),
        };

        if (a.requires_exact_model() || b.requires_exact_model()) && a.model != b.model {
            tracing::debug!(
                brand_a = a.brand.as_deref(),
                brand_b = b.brand.as_deref(),
                model_a = a.model.as_deref(),
                model_b = b.model.as_deref(),
                "strict-model brand with differing models, vetoed"
            );
            return ScoreBreakdown::vetoed(Veto::ModelMismatch, factors);
        }

        let weights = &self.config.factors;
        let base = weights.model * factors.model
            + weights.brand * factors.brand
            + weights.specs * factors.specs
            + weights.words * factors.words;

        let mut bonuses = Vec::new();
        let bonus = &self.config.bonuses;
        if a.model.is_some() && a.model == b.model {
            bonuses.push(AppliedBonus {
                kind: BonusKind::ModelMatch,
                factor: bonus.model_match,
            });
        }
        if a.brand.is_some() && a.brand == b.brand {
            bonuses.push(AppliedBonus {
                kind: BonusKind::BrandMatch,
                factor: bonus.brand_match,
            });
        }
        if self.any_numeric_spec_matches(&a.specs, &b.specs) {
            bonuses.push(AppliedBonus {
                kind: BonusKind::SpecMatch,
                factor: bonus.spec_match,
            });
        }

        let multiplier: f32 = bonuses.iter().map(|b| b.factor).product();
        let score = (base * multiplier).clamp(0.0, 1.0);

        ScoreBreakdown {
            factors,
            base,
            bonuses,
            veto: None,
            identical: false,
            score,
        }
    }

    /// Weighted blend over the specs present on both sides, divided by the
    /// weight actually used; 0 when nothing is comparable
    pub fn specs_score(&self, a: &Specs, b: &Specs) -> f32 {
        let weights = &self.config.specs;
        let tolerance = self.config.spec_tolerance;
        let mut total = 0.0f32;
        let mut used = 0.0f32;

        if let (Some(d1), Some(d2)) = (&a.dimensions, &b.dimensions) {
            total += weights.dimensions
                * compare_dimensions_with(Some(d1), Some(d2), false, &self.config.dimensions);
            used += weights.dimensions;
        }

        for (weight, x, y) in [
            (weights.weight, a.weight_kg, b.weight_kg),
            (weights.volume, a.volume_l, b.volume_l),
            (weights.power, a.power_w, b.power_w),
            (weights.storage, a.storage_gb, b.storage_gb),
        ] {
            if let (Some(x), Some(y)) = (x, y) {
                total += weight * numeric_similarity(x, y, tolerance);
                used += weight;
            }
        }

        if used > 0.0 {
            total / used
        } else {
            0.0
        }
    }

    fn any_numeric_spec_matches(&self, a: &Specs, b: &Specs) -> bool {
        [
            (a.weight_kg, b.weight_kg),
            (a.volume_l, b.volume_l),
            (a.power_w, b.power_w),
            (a.storage_gb, b.storage_gb),
        ]
        .into_iter()
        .any(|pair| match pair {
            (Some(x), Some(y)) => within_tolerance(x, y, self.config.spec_tolerance),
            _ => false,
        })
    }
}
