//! Model-code detection
//!
//! An ordered list of category rules, evaluated first-match-wins against a
//! title from which quantities and noise words have been removed. Each rule
//! pairs a matcher with the normalizer that turns the matched text into a
//! canonical code.

use crate::attributes::ProductCategory;
use crate::dimensions::strip_dimensions;
use crate::lexicon::{is_brand_token, is_stop_word, MODEL_BRAND_PREFIXES};
use crate::units::{strip_quantity, Quantity};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Bumped whenever a rule or normalizer changes in a way that can alter codes
pub const MODEL_RULES_VERSION: u32 = 1;

static NOISE_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:new|original|genuine)\b").unwrap());

static PLAYSTATION_5: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)PlayStation\s*5").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s-]+").unwrap());
static TV_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?:PUB|AUA)$").unwrap());
static BINDO_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)BINDO\s*\d+").unwrap());
static PHONE_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:(?:GALAXY|IPHONE)\s*(?:[A-Z]\d+|\d+\s*(?:PRO|PLUS|ULTRA|MAX)?)|S\d+\s*(?:ULTRA|PLUS)?)",
    )
    .unwrap()
});
static TOOL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[A-Z]{2,3}[-\s]?\d+[A-Z]?\d*(?:-[A-Z0-9]+)?").unwrap()
});

/// Category a model rule recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    Console,
    Television,
    Monitor,
    ConstructionCode,
    ConstructionGrade,
    Phone,
    Appliance,
    PowerTool,
    GenericCode,
    Version,
}

pub struct ModelRule {
    pub kind: RuleKind,
    pub pattern: Regex,
    pub normalize: fn(&str) -> String,
    /// Only consulted for listings of this category
    pub only_for: Option<ProductCategory>,
    /// Skip candidates that are brand names or stop words
    pub skip_vocabulary: bool,
}

impl ModelRule {
    fn new(kind: RuleKind, pattern: &str, normalize: fn(&str) -> String) -> Self {
        Self {
            kind,
            pattern: Regex::new(pattern).unwrap(),
            normalize,
            only_for: None,
            skip_vocabulary: false,
        }
    }

    fn only_for(mut self, category: ProductCategory) -> Self {
        self.only_for = Some(category);
        self
    }

    fn skip_vocabulary(mut self) -> Self {
        self.skip_vocabulary = true;
        self
    }

    /// First acceptable match of this rule in `text`
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        if !self.skip_vocabulary {
            return self.pattern.find(text).map(|m| m.as_str());
        }
        self.pattern
            .find_iter(text)
            .map(|m| m.as_str())
            .find(|candidate| !is_brand_token(candidate) && !is_stop_word(&candidate.to_lowercase()))
    }
}

/// The ordered rule list. Order is significant: the first rule that matches
/// decides the model.
pub static MODEL_RULES: Lazy<Vec<ModelRule>> = Lazy::new(|| {
    vec![
        ModelRule::new(
            RuleKind::Console,
            r"(?i)(?:PlayStation\s*5|PS5|Xbox\s*Series\s*[XS])(?:\s*Digital\s*Edition)?",
            normalize_console,
        ),
        ModelRule::new(
            RuleKind::Television,
            r"(?i)\b(?:OLED|QLED|QN|UN)\s*\d{2,3}[A-Z]\d[A-Z]*(?:PUB|AUA)?",
            normalize_television,
        ),
        ModelRule::new(
            RuleKind::Monitor,
            r"(?i)[A-Z]?\d{2}[A-Z]+\d{3,4}(?:-[A-Z])?|[A-Z]{2,3}\d{2}[A-Z]+\d{3}",
            normalize_monitor,
        ),
        ModelRule::new(
            RuleKind::ConstructionCode,
            r"(?i)\b(?:TP\s*115|KL-?37|ROTBAND(?:\s*PLUS)?|MP-?75|OAD|CC|(?:PRIM\s*)?801|VH|3000|BINDO\s*\d+|PLAZA\s*(?:GREY|GRAY))\b",
            normalize_construction,
        ),
        ModelRule::new(
            RuleKind::ConstructionGrade,
            r"(?i)\b(?:EXTRA|ULTRA|SUPER|PREMIUM|STANDARD|BASIC)(?:\s*(?:PLUS|ROCK))?\b",
            normalize_construction,
        )
        .only_for(ProductCategory::Construction),
        ModelRule::new(
            RuleKind::Phone,
            r"(?:GALAXY\s*)?[A-Z]+(?:\d+[A-Z]*)+(?:\s*(?:ULTRA|PLUS|PRO|MAX))?(?:-[A-Z0-9]+)*",
            normalize_code,
        ),
        ModelRule::new(RuleKind::Appliance, r"[A-Z]{2,}\d+[A-Z0-9]*", normalize_code),
        ModelRule::new(
            RuleKind::PowerTool,
            r"[A-Z]{2,3}[-\s]?\d+(?:V|W)?-?\d*",
            normalize_code,
        ),
        ModelRule::new(
            RuleKind::GenericCode,
            r"\b(?:[A-Z]+-)?[A-Z0-9]{3,}(?:-[A-Z0-9]+)*\b",
            normalize_code,
        )
        .skip_vocabulary(),
        ModelRule::new(
            RuleKind::Version,
            r"(?i)\bv\d+(?:\.\d+)*|\d+\.\d+(?:\.\d+)*",
            normalize_code,
        ),
    ]
});

/// A detected model: the canonical code used for comparisons and the
/// matched text used for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMatch {
    pub kind: RuleKind,
    pub code: String,
    pub label: String,
}

/// Remove quantities, dimensions and noise words before model detection
pub fn strip_specs(title: &str) -> String {
    let mut cleaned = strip_dimensions(title).into_owned();
    for kind in Quantity::ALL {
        cleaned = strip_quantity(&cleaned, kind).into_owned();
    }
    NOISE_WORDS.replace_all(&cleaned, "").into_owned()
}

/// Detect the model code of a title
pub fn detect_model(title: &str, category: ProductCategory) -> Option<ModelMatch> {
    let cleaned = strip_specs(title);

    MODEL_RULES
        .iter()
        .filter(|rule| rule.only_for.map_or(true, |only| only == category))
        .find_map(|rule| {
            let matched = rule.find(&cleaned)?;
            let code = (rule.normalize)(matched);
            if code.is_empty() {
                return None;
            }
            Some(ModelMatch {
                kind: rule.kind,
                code,
                label: collapse_whitespace(matched).to_uppercase(),
            })
        })
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn remove_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, "").into_owned()
}

fn normalize_console(code: &str) -> String {
    let code = PLAYSTATION_5.replace(code, "PS5");
    remove_whitespace(&code).to_uppercase()
}

fn normalize_television(code: &str) -> String {
    let code = remove_whitespace(code);
    TV_SUFFIX.replace(&code, "").to_uppercase()
}

fn normalize_monitor(code: &str) -> String {
    SEPARATORS.replace_all(code, "").to_uppercase()
}

fn normalize_construction(code: &str) -> String {
    let upper = code.to_uppercase();
    if upper.contains("ROTBAND") {
        return "ROTBAND".to_string();
    }
    if upper.contains("BINDO") {
        if let Some(m) = BINDO_CODE.find(&upper) {
            return remove_whitespace(m.as_str());
        }
    }
    if upper.contains("PLAZA") {
        return "PLAZA".to_string();
    }
    SEPARATORS.replace_all(&upper, "").into_owned()
}

/// Normalizer shared by the electronics, tool and fallback rules
pub fn normalize_code(code: &str) -> String {
    if let Some(m) = PHONE_SHAPE.find(code) {
        let compact = remove_whitespace(m.as_str()).to_uppercase();
        return match compact.strip_prefix("GALAXY") {
            // GALAXY S21 and S21 are the same phone
            Some(rest) if rest.starts_with(|c: char| c.is_ascii_alphabetic()) => rest.to_string(),
            Some(rest) => format!("S{rest}"),
            None => compact,
        };
    }

    if let Some(m) = TOOL_SHAPE.find(code) {
        return SEPARATORS.replace_all(m.as_str(), "").to_uppercase();
    }

    SEPARATORS
        .replace_all(code, "")
        .chars()
        .map(|c| match c {
            'O' | 'О' => '0',
            'I' | 'l' => '1',
            other => other,
        })
        .collect::<String>()
        .to_uppercase()
}

/// Loose model-number form used to compare codes across stores: lowercase,
/// no separators, leading brand prefixes removed.
pub fn normalize_model_number(model: &str) -> String {
    let mut normalized: String = model
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    while let Some(rest) = MODEL_BRAND_PREFIXES
        .iter()
        .find_map(|prefix| normalized.strip_prefix(prefix))
    {
        normalized = rest.to_string();
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(title: &str) -> Option<String> {
        detect_model(title, ProductCategory::Electronics).map(|m| m.code)
    }

    fn construction_model(title: &str) -> Option<String> {
        detect_model(title, ProductCategory::Construction).map(|m| m.code)
    }

    fn kind(title: &str, category: ProductCategory) -> Option<RuleKind> {
        detect_model(title, category).map(|m| m.kind)
    }

    /// Run one rule on its own, bypassing the rules before it
    fn apply(kind: RuleKind, text: &str) -> Option<String> {
        let rule = MODEL_RULES.iter().find(|r| r.kind == kind).unwrap();
        rule.find(text).map(|m| (rule.normalize)(m))
    }

    fn rule(kind: RuleKind) -> &'static ModelRule {
        MODEL_RULES.iter().find(|r| r.kind == kind).unwrap()
    }

    #[test]
    fn test_each_rule_alone() {
        assert_eq!(apply(RuleKind::Console, "PlayStation 5").as_deref(), Some("PS5"));
        assert_eq!(apply(RuleKind::Television, "OLED55C1PUB").as_deref(), Some("OLED55C1"));
        assert_eq!(apply(RuleKind::Monitor, "27GP850-B").as_deref(), Some("27GP850B"));
        assert_eq!(apply(RuleKind::ConstructionCode, "KL-37").as_deref(), Some("KL37"));
        assert_eq!(apply(RuleKind::ConstructionCode, "BINDO 11").as_deref(), Some("BINDO11"));
        assert_eq!(apply(RuleKind::ConstructionGrade, "Extra Plus").as_deref(), Some("EXTRAPLUS"));
        assert_eq!(apply(RuleKind::Phone, "S21 ULTRA").as_deref(), Some("S21ULTRA"));
        assert_eq!(apply(RuleKind::Appliance, "WAV28L90").as_deref(), Some("WAV28L90"));
        assert_eq!(apply(RuleKind::PowerTool, "GSR 18").as_deref(), Some("GSR18"));
        assert_eq!(apply(RuleKind::GenericCode, "ROCKWOOL ROCKMIN").as_deref(), Some("R0CKM1N"));
        assert_eq!(apply(RuleKind::Version, "v2.1").as_deref(), Some("V2.1"));
    }

    #[test]
    fn test_console_rule() {
        assert_eq!(model("Sony PlayStation 5 Digital Edition 825GB").as_deref(), Some("PS5DIGITALEDITION"));
        assert_eq!(model("Spēļu konsole PS5").as_deref(), Some("PS5"));
        assert_eq!(model("Microsoft Xbox Series X 1TB").as_deref(), Some("XBOXSERIESX"));
        assert_eq!(kind("Spēļu konsole PS5", ProductCategory::Electronics), Some(RuleKind::Console));
    }

    #[test]
    fn test_television_rule_strips_suffix() {
        assert_eq!(model("LG OLED55C1PUB 4K").as_deref(), Some("OLED55C1"));
        assert_eq!(model("LG OLED 55C1").as_deref(), Some("OLED55C1"));
        assert_eq!(kind("LG OLED55C1PUB 4K", ProductCategory::Electronics), Some(RuleKind::Television));
    }

    #[test]
    fn test_monitor_rule() {
        assert_eq!(model("LG 27GP850-B monitors").as_deref(), Some("27GP850B"));
        assert_eq!(kind("LG 27GP850-B monitors", ProductCategory::Electronics), Some(RuleKind::Monitor));
    }

    #[test]
    fn test_construction_codes() {
        assert_eq!(construction_model("Knauf Rotband 30kg").as_deref(), Some("ROTBAND"));
        assert_eq!(construction_model("Knauf Rotband Plus 25kg").as_deref(), Some("ROTBAND"));
        assert_eq!(construction_model("Sakret BINDO 11 flīžu līme 25kg").as_deref(), Some("BINDO11"));
        assert_eq!(construction_model("Weber MP-75 apmetums").as_deref(), Some("MP75"));
        assert_eq!(construction_model("Plaza Grey bruģis").as_deref(), Some("PLAZA"));
        assert_eq!(
            kind("Knauf Rotband 30kg", ProductCategory::Construction),
            Some(RuleKind::ConstructionCode)
        );
    }

    #[test]
    fn test_construction_grade_only_for_construction() {
        assert_eq!(construction_model("Paroc Extra vate 50mm").as_deref(), Some("EXTRA"));
        assert_eq!(
            kind("Paroc Extra vate 50mm", ProductCategory::Construction),
            Some(RuleKind::ConstructionGrade)
        );
        // a phone called Ultra is still a phone
        assert_eq!(model("Samsung Galaxy S21 Ultra 256GB").as_deref(), Some("S21"));
        assert_eq!(
            kind("Samsung Galaxy S21 Ultra 256GB", ProductCategory::Electronics),
            Some(RuleKind::Phone)
        );
    }

    #[test]
    fn test_phone_rule() {
        assert_eq!(model("Samsung Galaxy S21 128GB Black").as_deref(), Some("S21"));
        assert_eq!(model("SAMSUNG GALAXY S21 128GB").as_deref(), Some("S21"));
        assert_eq!(kind("SAMSUNG GALAXY S21 128GB", ProductCategory::Electronics), Some(RuleKind::Phone));
    }

    #[test]
    fn test_appliance_codes_are_taken_by_phone_rule() {
        // every appliance-shaped code is also phone-shaped, and phones come first
        for code in ["WAV28L90", "KGN36VLED", "DCD778"] {
            assert!(rule(RuleKind::Phone).pattern.is_match(code), "{code}");
            assert!(rule(RuleKind::Appliance).pattern.is_match(code), "{code}");
        }

        let washer = detect_model("Bosch veļas mašīna WAV28L90", ProductCategory::Electronics).unwrap();
        assert_eq!(washer.kind, RuleKind::Phone);
        assert_eq!(washer.code, "WAV28L90");

        let drill = detect_model("DeWalt DCD778 18V", ProductCategory::Electronics).unwrap();
        assert_eq!(drill.kind, RuleKind::Phone);
        assert_eq!(drill.code, "DCD778");
    }

    #[test]
    fn test_power_tool_rule_with_spaced_code() {
        let found = detect_model("Makita HP 457 triecienurbjmašīna", ProductCategory::Electronics).unwrap();
        assert_eq!(found.kind, RuleKind::PowerTool);
        assert_eq!(found.code, "HP457");
        assert_eq!(found.label, "HP 457");
    }

    #[test]
    fn test_generic_code_skips_brand_names() {
        let found = detect_model("ROCKWOOL ROCKMIN 100x600x1200mm", ProductCategory::Construction).unwrap();
        assert_eq!(found.kind, RuleKind::GenericCode);
        assert_eq!(found.label, "ROCKMIN");
        assert_eq!(found.code, "R0CKM1N");
        assert_eq!(construction_model("KNAUF BLACK"), None);
    }

    #[test]
    fn test_hyphenated_code_reads_as_dimensions() {
        // `-` is a dimension separator, so `115-3` is stripped as a size
        assert!(!strip_specs("Knauf TP 115-3 vate").contains("115"));
        assert_eq!(construction_model("Knauf TP 115-3 vate"), None);
        assert_eq!(construction_model("Knauf TP 115 vate").as_deref(), Some("TP115"));
    }

    #[test]
    fn test_version_rule() {
        assert_eq!(model("firmware v2.1 modulis").as_deref(), Some("V2.1"));
        assert_eq!(kind("firmware v2.1 modulis", ProductCategory::Electronics), Some(RuleKind::Version));
    }

    #[test]
    fn test_no_model() {
        assert_eq!(construction_model("Knauf Sheetrock Finish 30kg"), None);
        assert_eq!(model("Rockwool Rockmin Plus 100X600X1200 MM"), None);
        assert_eq!(model(""), None);
    }

    #[test]
    fn test_specs_are_stripped_first() {
        let cleaned = strip_specs("Samsung Galaxy S21 5G 128GB new");
        assert!(!cleaned.contains("128GB"));
        assert!(!cleaned.contains("new"));
        assert!(cleaned.contains("S21"));
    }

    #[test]
    fn test_glyph_fallback() {
        assert_eq!(normalize_code("ROCK-WOOL"), "R0CKW00L");
        assert_eq!(normalize_code("lite"), "1ITE");
    }

    #[test]
    fn test_normalize_model_number() {
        assert_eq!(normalize_model_number("Paroc eXtra-70"), "extra70");
        assert_eq!(normalize_model_number("ROCKWOOL Rockmin"), "rockmin");
        assert_eq!(normalize_model_number("KnaufKnauf KL 37"), "kl37");
        let once = normalize_model_number("Isover KL-37");
        assert_eq!(normalize_model_number(&once), once);
    }

    #[test]
    fn test_rule_order_is_stable() {
        let kinds: Vec<RuleKind> = MODEL_RULES.iter().map(|r| r.kind).collect();
        assert_eq!(kinds.first(), Some(&RuleKind::Console));
        assert_eq!(kinds.last(), Some(&RuleKind::Version));
        assert_eq!(kinds.len(), 10);
    }
}
