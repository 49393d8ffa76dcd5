//! # prodmatch
//!
//! Product identity resolution for scraped store listings.
//!
//! Different stores describe the same physical product with different
//! titles: `Knauf Rotband 30kg`, `KNAUF ROTBAND, 30 kg`. prodmatch extracts
//! structured attributes from each title, scores pairs of listings, decides
//! which pairs are the same product and names the resulting groups.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! prodmatch compare "Knauf Rotband 30kg" "KNAUF ROTBAND, 30 kg" --explain
//! prodmatch group listings.json
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use prodmatch::prelude::*;
//!
//! assert!(is_similar_title("Samsung Galaxy S21 128GB Black", "Samsung Galaxy S21 128GB Black"));
//! assert!(!is_similar_title(
//!     "Rockwool Rockmin 50x600x1200mm",
//!     "Rockwool Rockmin 100x600x1200mm",
//! ));
//!
//! let name = get_standardized_group_name(&[
//!     "ROCKWOOL ROCKMIN 100x600x1200mm",
//!     "Rockwool Rockmin Plus 100X600X1200 MM",
//! ]);
//! assert_eq!(name, "AKMENS VATE ROCKWOOL ROCKMIN PLUS (100x600x1200mm)");
//! ```
//!
//! ## Crate Structure
//!
//! prodmatch is composed of two crates:
//!
//! - [`prodmatch-core`](prodmatch_core) - Listings, lookup tables, unit and dimension parsing, attribute extraction
//! - [`prodmatch-similarity`](prodmatch_similarity) - Match config, scoring, classification, naming, clustering
//!
//! ## Features
//!
//! - **Unit Conversion**: Weight, volume, power and storage to base units
//! - **Dimensions**: `WxHxD` parsing with insulation-aware comparison
//! - **Model Codes**: Ordered category rules with per-rule normalizers
//! - **Explainable Scores**: Per-factor breakdown, bonuses and vetoes
//! - **Grouping**: Parallel pairwise classification with complete linkage

// Re-export core types
pub use prodmatch_core::{
    load_listings, read_listings,
    Dimensions, ExtractedAttributes, Listing, ProductCategory, ProductGroup, Specs,
    Error, Result,
};

// Re-export similarity
pub use prodmatch_similarity::{
    calculate_string_similarity, calculate_title_similarity, compare_dimensions,
    get_standardized_group_name, group_listings, is_similar_title, normalize_model_number,
    ClusterStats, MatchConfig, MatchDecision, ScoreBreakdown, TitleMatcher,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        calculate_string_similarity, calculate_title_similarity, compare_dimensions,
        get_standardized_group_name, group_listings, is_similar_title, normalize_model_number,
        ExtractedAttributes, Listing, MatchConfig, ProductGroup, TitleMatcher,
    };
}
