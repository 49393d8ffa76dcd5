//! # prodmatch Similarity
//!
//! Decides whether two scraped listings describe the same physical product,
//! and groups a batch of listings under canonical names.
//!
//! ## Features
//!
//! - **Match Config**: Weights, bonuses, thresholds and tolerances, loadable from JSON
//! - **Multi-factor Scoring**: Model, brand, specs and word similarity with a strict-model veto
//! - **Classification**: Category-dependent thresholds and a dimension veto
//! - **Explainability**: Per-factor breakdown of every score
//! - **Grouping**: Complete-linkage clustering with canonical group names
//!
//! ## Example
//!
//! ```rust
//! use prodmatch_similarity::{group_listings, TitleMatcher};
//! use prodmatch_core::Listing;
//!
//! let matcher = TitleMatcher::default();
//! assert!(!matcher.is_similar("Knauf Rotband 30kg", "Knauf Sheetrock Finish 30kg"));
//!
//! let listings = vec![
//!     Listing::new("Knauf Rotband 30kg").with_store("depo"),
//!     Listing::new("KNAUF ROTBAND, 30 kg").with_store("kruza"),
//! ];
//! let groups = group_listings(&listings, &matcher);
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].name, "KNAUF ROTBAND (30kg)");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Title     │────>│  Extractor  │────>│   Scorer    │
//! │             │     │ (attributes)│     │  (factors)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            │            ┌─────────────┐
//!                            │            │ Classifier  │
//!                            │            │ (threshold) │
//!                            │            └─────────────┘
//!                            │                   │
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │   Namer     │<────│  Clusterer  │
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod schema;
pub mod distance;
pub mod scorer;
pub mod classify;
pub mod explain;
pub mod naming;
pub mod cluster;

use once_cell::sync::Lazy;
use prodmatch_core::Dimensions;

// Re-export main types for convenience
pub use schema::{Bonuses, ConfigError, FactorWeights, MatchConfig, SpecWeights};
pub use scorer::TitleMatcher;
pub use classify::MatchDecision;
pub use explain::{AppliedBonus, BonusKind, ClusterStats, FactorScores, ScoreBreakdown, Veto};
pub use naming::{canonical_name, standardized_group_name};
pub use cluster::group_listings;
pub use prodmatch_core::normalize_model_number;

static DEFAULT_MATCHER: Lazy<TitleMatcher> = Lazy::new(TitleMatcher::default);

/// Similarity of two titles in [0, 1] under the default config
pub fn calculate_title_similarity(title1: &str, title2: &str) -> f32 {
    DEFAULT_MATCHER.similarity(title1, title2)
}

/// Whether two titles describe the same product under the default config
pub fn is_similar_title(title1: &str, title2: &str) -> bool {
    DEFAULT_MATCHER.is_similar(title1, title2)
}

/// Canonical name for a group of titles
pub fn get_standardized_group_name<S: AsRef<str>>(titles: &[S]) -> String {
    standardized_group_name(titles)
}

/// Levenshtein similarity of two strings
pub fn calculate_string_similarity(a: &str, b: &str) -> f32 {
    distance::string_similarity(a, b)
}

/// Compare dimensions with default tolerances
pub fn compare_dimensions(d1: Option<&Dimensions>, d2: Option<&Dimensions>, is_insulation: bool) -> f32 {
    prodmatch_core::compare_dimensions(d1, d2, is_insulation)
}
