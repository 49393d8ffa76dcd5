//! Match classification
//!
//! Turns a score into a yes/no decision: a category-dependent threshold plus
//! a dimension veto when both titles state sizes.

use crate::explain::{ScoreBreakdown, Veto};
use crate::scorer::TitleMatcher;
use prodmatch_core::{compare_dimensions_with, ExtractedAttributes};
use serde::Serialize;

/// Outcome of classifying one pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchDecision {
    pub breakdown: ScoreBreakdown,
    /// Threshold the score was held against
    pub threshold: f32,
    /// Either title is insulation material
    pub insulation: bool,
    /// Dimension agreement, present when both titles carry dimensions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_score: Option<f32>,
    pub is_match: bool,
}

impl MatchDecision {
    pub fn score(&self) -> f32 {
        self.breakdown.score
    }
}

impl TitleMatcher {
    /// Classify a pair of listings
    pub fn decide(&self, a: &ExtractedAttributes, b: &ExtractedAttributes) -> MatchDecision {
        let mut breakdown = self.score(a, b);
        let config = self.config();

        let insulation = a.insulation || b.insulation;
        let threshold = if insulation {
            config.insulation_threshold
        } else {
            config.threshold
        };

        let dimension_score = match (&a.specs.dimensions, &b.specs.dimensions) {
            (Some(d1), Some(d2)) => Some(compare_dimensions_with(
                Some(d1),
                Some(d2),
                insulation,
                &config.dimensions,
            )),
            _ => None,
        };
        if dimension_score == Some(0.0) && breakdown.veto.is_none() {
            breakdown.veto = Some(Veto::DimensionMismatch);
            tracing::debug!(
                dims_a = ?a.specs.dimensions.as_ref().map(|d| d.display()),
                dims_b = ?b.specs.dimensions.as_ref().map(|d| d.display()),
                insulation,
                "dimensions disagree, vetoed"
            );
        }

        let is_match = breakdown.veto.is_none() && breakdown.score >= threshold;

        MatchDecision {
            breakdown,
            threshold,
            insulation,
            dimension_score,
            is_match,
        }
    }

    /// Whether two titles describe the same product
    pub fn is_similar(&self, a: &str, b: &str) -> bool {
        self.decide(
            &ExtractedAttributes::from_title(a),
            &ExtractedAttributes::from_title(b),
        )
        .is_match
    }
}
