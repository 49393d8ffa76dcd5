//! Attribute extraction
//!
//! Everything the scorer and the namer need from a title is derived here,
//! once per listing: brand, model, numeric specs, significant words and the
//! product category.

use crate::dimensions::Dimensions;
use crate::lexicon::{
    brand_in, detect_brand, has_construction_keyword, is_insulation_title, is_stop_word,
    CONSTRUCTION_BRANDS, STRICT_MODEL_BRANDS,
};
use crate::rules::{detect_model, RuleKind};
use crate::units::{extract_power, extract_storage, extract_volume, extract_weight};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

const WORD_PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
    '(', ')',
];

/// Broad product family, decided once per listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Construction,
    Electronics,
}

impl ProductCategory {
    /// Construction when the brand is a construction brand or the title names
    /// a construction material
    pub fn classify(brand: Option<&str>, title: &str) -> Self {
        let construction_brand = brand.map_or(false, |b| brand_in(b, CONSTRUCTION_BRANDS));
        if construction_brand || has_construction_keyword(title) {
            ProductCategory::Construction
        } else {
            ProductCategory::Electronics
        }
    }
}

/// Numeric specs found in a title, each in its base unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Specs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_l: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_gb: Option<f64>,
}

impl Specs {
    pub fn from_title(title: &str) -> Self {
        Self {
            dimensions: Dimensions::parse(title),
            weight_kg: extract_weight(title),
            volume_l: extract_volume(title),
            power_w: extract_power(title),
            storage_gb: extract_storage(title),
        }
    }

    /// Number of specs present
    pub fn present_count(&self) -> usize {
        usize::from(self.dimensions.is_some())
            + [self.weight_kg, self.volume_l, self.power_w, self.storage_gb]
                .iter()
                .filter(|v| v.is_some())
                .count()
    }

    pub fn is_empty(&self) -> bool {
        self.present_count() == 0
    }
}

/// Attributes derived from one title. A pure function of the title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedAttributes {
    pub brand: Option<String>,
    /// Canonical model code used for comparison
    pub model: Option<String>,
    /// Model as written, for display
    pub model_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_kind: Option<RuleKind>,
    pub specs: Specs,
    pub words: AHashSet<String>,
    pub category: ProductCategory,
    pub insulation: bool,
    /// Case-folded title with collapsed whitespace
    pub normalized_title: String,
}

impl ExtractedAttributes {
    pub fn from_title(title: &str) -> Self {
        let brand = detect_brand(title);
        let category = ProductCategory::classify(brand.as_deref(), title);
        let model = detect_model(title, category);

        tracing::trace!(
            title,
            brand = brand.as_deref(),
            model = model.as_ref().map(|m| m.code.as_str()),
            ?category,
            "extracted attributes"
        );

        Self {
            brand,
            model: model.as_ref().map(|m| m.code.clone()),
            model_label: model.as_ref().map(|m| m.label.clone()),
            model_kind: model.map(|m| m.kind),
            specs: Specs::from_title(title),
            words: extract_significant_words(title),
            category,
            insulation: is_insulation_title(title),
            normalized_title: normalize_title(title),
        }
    }

    /// Count of present fields: brand, model and each spec
    pub fn completeness(&self) -> usize {
        usize::from(self.brand.is_some())
            + usize::from(self.model.is_some())
            + self.specs.present_count()
    }

    /// Listings of this brand only match on an identical model code
    pub fn requires_exact_model(&self) -> bool {
        self.brand
            .as_deref()
            .map_or(false, |b| brand_in(b, STRICT_MODEL_BRANDS))
    }
}

/// Lowercased words of a title minus short tokens, stop words and numbers
pub fn extract_significant_words(title: &str) -> AHashSet<String> {
    let lower = title.to_lowercase().replace(WORD_PUNCTUATION, " ");
    lower
        .split_whitespace()
        .filter(|word| word.chars().count() > 2)
        .filter(|word| !is_stop_word(word))
        .filter(|word| !word.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

/// Lowercase and collapse whitespace
pub fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
