//! Curated lookup tables
//!
//! Brand literals, brand aliases, the stop-set used for significant words,
//! and the keyword lists that drive category decisions. Everything here is
//! built once on first use and never mutated afterwards.

use ahash::{AHashMap, AHashSet};
use once_cell::sync::Lazy;
use regex::Regex;

/// Bumped whenever a table below changes in a way that can alter results
pub const LEXICON_VERSION: u32 = 1;

/// Known brands as regex fragments. Multi-word spellings come first so that
/// the longer form wins at a given position.
const BRAND_LITERALS: &[&str] = &[
    r"Knauf\s+Insulation",
    r"Saint[\s-]Gobain",
    r"Weber\.Vetonit",
    r"Kerama\s+Marazzi",
    r"Paroc\s+Owens\s+Corning",
    r"Xbox\s+Series",
    r"PlayStation\s*[45]",
    "Samsung",
    "Apple",
    "iPhone",
    "LG",
    "Sony",
    "PlayStation",
    "PS5",
    "PS4",
    "Xbox",
    "Microsoft",
    "Philips",
    "Panasonic",
    "Dell",
    "HP",
    "Lenovo",
    "Asus",
    "Acer",
    "Bosch",
    "Siemens",
    "Electrolux",
    "Whirlpool",
    "AEG",
    "Zanussi",
    "Miele",
    "Makita",
    "DeWalt",
    "Milwaukee",
    "Hilti",
    "Metabo",
    "Knauf",
    "Paroc",
    "Isover",
    "Rockwool",
    "Weber",
    "Vetonit",
    "Sakret",
    "Sadolin",
    "Ceresit",
    "Baumit",
    "Caparol",
];

static KNOWN_BRAND_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let alternation = BRAND_LITERALS.join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap()
});

/// Fallback for unknown brands: a run of capitalized words
static CAPITALIZED_RUN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-zA-Z]+(?:\s+[A-Z][a-zA-Z]+)*\b").unwrap());

static BRAND_ALIASES: Lazy<AHashMap<&'static str, &'static str>> = Lazy::new(|| {
    AHashMap::from_iter([
        ("IPHONE", "APPLE"),
        ("WEBER.VETONIT", "WEBER"),
        ("VETONIT", "WEBER"),
        ("KNAUF INSULATION", "KNAUF"),
        ("SAINT GOBAIN", "ISOVER"),
        ("SAINT-GOBAIN", "ISOVER"),
        ("PS5", "PLAYSTATION"),
        ("PS4", "PLAYSTATION"),
        ("PLAYSTATION 5", "PLAYSTATION"),
        ("PLAYSTATION 4", "PLAYSTATION"),
        ("PLAYSTATION5", "PLAYSTATION"),
        ("PLAYSTATION4", "PLAYSTATION"),
        ("XBOX SERIES", "XBOX"),
        ("PAROC OWENS CORNING", "PAROC"),
        ("ROCKWOOL ROCKMIN", "ROCKWOOL"),
        ("ISOVER SAINT-GOBAIN", "ISOVER"),
    ])
});

/// Uppercased single-word brand literals, used to keep brand names out of
/// the generic model-code rule
static BRAND_TOKENS: Lazy<AHashSet<String>> = Lazy::new(|| {
    BRAND_LITERALS
        .iter()
        .filter(|literal| literal.chars().all(|c| c.is_alphanumeric()))
        .map(|literal| literal.to_uppercase())
        .collect()
});

static STOP_WORDS: Lazy<AHashSet<&'static str>> = Lazy::new(|| {
    AHashSet::from_iter([
        // english
        "the", "with", "and", "for", "from", "new", "set", "pcs", "pack", "item",
        // units
        "mm", "cm", "kg", "lb", "oz", "ml", "kw", "gb", "tb", "mb", "inch", "inches",
        "ft", "feet", "watts", "volt", "volts", "size", "weight", "length", "width",
        "height", "litre", "liter", "litri",
        // colors
        "black", "white", "red", "blue", "green", "silver", "gold", "grey", "gray",
        "yellow", "orange", "pink", "purple", "brown", "beige",
        "melns", "melna", "balts", "balta", "sarkans", "sarkana", "zils", "zila",
        "zaļš", "zaļa", "pelēks", "pelēka", "sudraba",
        // marketing
        "original", "genuine", "premium", "professional", "basic", "standard", "plus",
        "pro", "max", "mini", "ultra", "super", "extra", "lite", "light", "heavy",
        "duty", "edition", "series",
        // latvian
        "par", "priekš", "pie", "līdz", "jauns", "jauna", "oriģināls", "oriģināla",
        "akmens", "vate", "siltumizolācija", "izolācija", "minerālvate",
        "java", "masa", "apmetums", "ģipša", "dekoratīvais", "iekšdarbu", "ārdarbiem",
        "grīdas", "sienas", "āra", "pašizlīdzinošā", "izlīdzināšanas", "gab", "iepak",
    ])
});

/// Substring cues marking a title as insulation material
pub const INSULATION_CUES: &[&str] = &["vate", "wool", "insulation", "izolācija"];

/// Substring cues marking a title as construction material
pub const CONSTRUCTION_KEYWORDS: &[&str] = &[
    "vate",
    "wool",
    "insulation",
    "izolācija",
    "ģipškartons",
    "plasterboard",
    "plaster",
    "apmetums",
    "java",
    "cements",
    "cement",
];

/// Insulation, cement and plaster brands
pub const CONSTRUCTION_BRANDS: &[&str] = &[
    "ROCKWOOL", "PAROC", "KNAUF", "ISOVER", "WEBER", "CERESIT", "BAUMIT", "SAKRET",
];

/// Brands sold in many near-identical package sizes; their listings only match
/// on an identical model code
pub const STRICT_MODEL_BRANDS: &[&str] = &["KNAUF", "SAKRET", "WEBER"];

pub const PHONE_BRANDS: &[&str] = &["APPLE", "SAMSUNG"];

pub const POWER_TOOL_BRANDS: &[&str] = &["DEWALT", "MAKITA", "BOSCH"];

/// Brands whose listings carry shipping weights nobody wants in a name
pub const WEIGHTLESS_BRANDS: &[&str] = &["APPLE", "SAMSUNG", "LENOVO", "ASUS", "LG"];

/// Product-line words that follow a model on construction goods
pub const PRODUCT_LINE_SUFFIXES: &[&str] = &["PREMIUM", "PLUS", "EXTRA", "PRO"];

/// Packaging tokens that leak into construction names
pub const NAME_NOISE_TOKENS: &[&str] = &["LOKSN", "PLAKSN", "IEPAK", "M2"];

/// Brand prefixes dropped by the loose model-number comparison
pub const MODEL_BRAND_PREFIXES: &[&str] = &[
    "paroc", "knauf", "kronospan", "cemex", "rockwool", "isover", "gyproc",
];

/// Detect a brand in a title.
///
/// The leftmost curated brand wins; only when none occurs anywhere does the
/// capitalized-word fallback apply. The result is uppercased, whitespace
/// collapsed, and resolved through the alias table.
pub fn detect_brand(title: &str) -> Option<String> {
    let found = KNOWN_BRAND_PATTERN
        .find(title)
        .or_else(|| CAPITALIZED_RUN_PATTERN.find(title))?;

    let brand = found
        .as_str()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();

    if brand.is_empty() {
        return None;
    }

    Some(canonical_brand(&brand))
}

/// Resolve an uppercased brand through the alias table
pub fn canonical_brand(brand: &str) -> String {
    BRAND_ALIASES
        .get(brand)
        .map(|alias| alias.to_string())
        .unwrap_or_else(|| brand.to_string())
}

pub fn is_brand_token(token: &str) -> bool {
    BRAND_TOKENS.contains(&token.to_uppercase())
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// True when any word of `brand` is one of `family`
pub fn brand_in(brand: &str, family: &[&str]) -> bool {
    brand
        .split(|c: char| c.is_whitespace() || c == '.' || c == '-')
        .any(|word| family.contains(&word))
}

pub fn is_insulation_title(title: &str) -> bool {
    let lower = title.to_lowercase();
    INSULATION_CUES.iter().any(|cue| lower.contains(cue))
}

pub fn has_construction_keyword(title: &str) -> bool {
    let lower = title.to_lowercase();
    CONSTRUCTION_KEYWORDS.iter().any(|kw| lower.contains(kw))
}
