//! # prodmatch Core
//!
//! Core library for the prodmatch product identity engine.
//!
//! This crate turns a free-text listing title into structured attributes:
//!
//! - [`Listing`] - A scraped product record and [`ProductGroup`] of resolved listings
//! - [`Dimensions`] - `WxHxD` sizes in millimetres with category-aware comparison
//! - [`Quantity`] - Weight, volume, power and storage with unit conversion
//! - [`ExtractedAttributes`] - Brand, model, specs and significant words of a title
//! - [`MODEL_RULES`] - The ordered model-code rules
//!
//! ## Example
//!
//! ```rust
//! use prodmatch_core::{ExtractedAttributes, ProductCategory};
//!
//! let attrs = ExtractedAttributes::from_title("Knauf Rotband 30kg");
//! assert_eq!(attrs.brand.as_deref(), Some("KNAUF"));
//! assert_eq!(attrs.model.as_deref(), Some("ROTBAND"));
//! assert_eq!(attrs.specs.weight_kg, Some(30.0));
//! assert_eq!(attrs.category, ProductCategory::Construction);
//! ```

pub mod attributes;
pub mod dimensions;
pub mod error;
pub mod lexicon;
pub mod listing;
pub mod rules;

/// Unit conversion for weight, volume, power and storage
pub mod units;

pub use attributes::{extract_significant_words, normalize_title, ExtractedAttributes, ProductCategory, Specs};
pub use dimensions::{compare_dimensions, compare_dimensions_with, DimensionTolerance, Dimensions, LengthUnit};
pub use error::{Error, Result};
pub use lexicon::{detect_brand, LEXICON_VERSION};
pub use listing::{load_listings, read_listings, Listing, ProductGroup};
pub use rules::{detect_model, normalize_model_number, ModelMatch, RuleKind, MODEL_RULES, MODEL_RULES_VERSION};
pub use units::Quantity;
