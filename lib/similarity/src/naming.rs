//! Canonical group names
//!
//! A group is named after its most complete listing. Construction goods get
//! `<material> <brand> <model> <line> (<size>) (<weight>)`, everything else
//! `<brand> <model> (<specs>)`.

use prodmatch_core::lexicon::{
    brand_in, NAME_NOISE_TOKENS, PHONE_BRANDS, POWER_TOOL_BRANDS, PRODUCT_LINE_SUFFIXES,
    WEIGHTLESS_BRANDS,
};
use prodmatch_core::units::format_measure;
use prodmatch_core::{ExtractedAttributes, ProductCategory};
use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING_LINE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:PREMIUM|PLUS|EXTRA|PRO)\s*$").unwrap());
static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());
static KG_WEIGHT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(?:kg|кг)\b").unwrap());
static PHONE_MODEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)IPHONE|GALAXY|S\d+").unwrap());
static PHONE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)GALAXY|IPHONE").unwrap());
static OLED_MODEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)OLED\d+").unwrap());
static TV_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?:PUB|AUA)$").unwrap());
static TOOL_VARIANT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?:-[A-Z0-9]+)+$").unwrap());
static APPLIANCE_MODEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:WAV|KGN|WM|DCD)\d+").unwrap());
static VOLTAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)\s*V\b").unwrap());

/// Name a group of listings given each title with its attributes.
///
/// The base listing is the one with the most present fields; ties keep the
/// earliest. An empty group has an empty name.
pub fn canonical_name(members: &[(&str, &ExtractedAttributes)]) -> String {
    let Some(base) = base_member(members) else {
        return String::new();
    };

    match members[base].1.category {
        ProductCategory::Construction => {
            let others = members
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != base)
                .map(|(_, (title, _))| *title);
            construction_name(members[base].0, members[base].1, others)
        }
        ProductCategory::Electronics => electronics_name(members[base].0, members[base].1),
    }
}

/// Name a group from its titles alone
pub fn standardized_group_name<S: AsRef<str>>(titles: &[S]) -> String {
    let attrs: Vec<ExtractedAttributes> = titles
        .iter()
        .map(|t| ExtractedAttributes::from_title(t.as_ref()))
        .collect();
    let members: Vec<(&str, &ExtractedAttributes)> = titles
        .iter()
        .map(|t| t.as_ref())
        .zip(attrs.iter())
        .collect();
    canonical_name(&members)
}

fn base_member(members: &[(&str, &ExtractedAttributes)]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, (_, attrs)) in members.iter().enumerate() {
        let score = attrs.completeness();
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((i, score));
        }
    }
    best.map(|(i, _)| i)
}

/// Uppercased title words, commas treated as spaces
fn title_words(title: &str) -> Vec<String> {
    title
        .to_uppercase()
        .replace(',', " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Phrase already present as whole words
fn contains_phrase(parts: &[String], phrase: &str) -> bool {
    let haystack = format!(" {} ", parts.join(" "));
    haystack.contains(&format!(" {} ", phrase.trim()))
}

fn construction_name<'a>(
    title: &str,
    attrs: &ExtractedAttributes,
    others: impl Iterator<Item = &'a str>,
) -> String {
    let upper = title_words(title).join(" ");
    let mut parts: Vec<String> = Vec::new();

    if attrs.insulation {
        if ["AKMENS", "STONE", "ROCK"].iter().any(|cue| upper.contains(cue)) {
            parts.push("AKMENS VATE".to_string());
        } else if ["STIKLA", "GLASS"].iter().any(|cue| upper.contains(cue)) {
            parts.push("STIKLA VATE".to_string());
        } else if ["EKOVATE", "ECO"].iter().any(|cue| upper.contains(cue)) {
            parts.push("EKOVATE".to_string());
        }
    }

    if let Some(brand) = &attrs.brand {
        if !parts.join(" ").contains(brand.as_str()) {
            parts.push(brand.clone());
        }
    }

    if let Some(label) = &attrs.model_label {
        let mut model = TRAILING_LINE_SUFFIX.replace(label, "").into_owned();
        if let Some(brand) = &attrs.brand {
            model = model.replacen(brand.as_str(), "", 1);
        }
        let model = model.split_whitespace().collect::<Vec<_>>().join(" ");

        let formatted = match FIRST_NUMBER.find(&model) {
            Some(number) => {
                let prefix = model[..number.start()].trim_matches(|c: char| c.is_whitespace() || c == '-');
                if prefix.is_empty() {
                    number.as_str().to_string()
                } else {
                    format!("{} {}", prefix, number.as_str())
                }
            }
            None => model,
        };

        if !formatted.is_empty() && !contains_phrase(&parts, &formatted) {
            parts.push(formatted);
        }
    }

    let line_suffix = find_line_suffix(title).or_else(|| others.filter_map(find_line_suffix).next());
    if let Some(suffix) = line_suffix {
        if !contains_phrase(&parts, suffix) {
            parts.push(suffix.to_string());
        }
    }

    if let Some(dims) = attrs.specs.dimensions.as_ref().filter(|d| d.axes() == 3) {
        parts.push(format!("({})", dims.display()));
    }

    if let Some(caps) = KG_WEIGHT.captures(title) {
        parts.push(format!("({}kg)", caps[1].replace(',', ".")));
    }

    tidy_name(&parts.join(" "))
}

/// First product-line word of a title
fn find_line_suffix(title: &str) -> Option<&'static str> {
    let words = title_words(title);
    PRODUCT_LINE_SUFFIXES
        .iter()
        .copied()
        .find(|suffix| words.iter().any(|w| w == suffix))
}

/// Collapse repeated words, drop packaging noise and fix parenthesis spacing
fn tidy_name(name: &str) -> String {
    let mut words: Vec<&str> = Vec::new();
    for word in name.split_whitespace() {
        if NAME_NOISE_TOKENS.contains(&word) {
            continue;
        }
        if words.last() == Some(&word) {
            continue;
        }
        words.push(word);
    }
    words.join(" ").replace("( ", "(").replace(" )", ")")
}

fn electronics_name(title: &str, attrs: &ExtractedAttributes) -> String {
    let brand = attrs.brand.as_deref().unwrap_or("");
    let phone_brand = brand_in(brand, PHONE_BRANDS);
    let tool_brand = brand_in(brand, POWER_TOOL_BRANDS);
    let mut parts: Vec<String> = Vec::new();

    if !brand.is_empty() {
        parts.push(brand.to_string());
    }

    if let Some(model) = attrs.model_label.as_deref() {
        if !model.eq_ignore_ascii_case(brand) {
            let cleaned = if phone_brand && PHONE_MODEL.is_match(model) {
                PHONE_LINE.replace(model, "").trim().to_string()
            } else if brand == "LG" && OLED_MODEL.is_match(model) {
                TV_SUFFIX.replace(model, "").into_owned()
            } else if tool_brand {
                TOOL_VARIANT.replace(model, "").into_owned()
            } else {
                model.to_string()
            };
            if !cleaned.is_empty() {
                parts.push(cleaned);
            }
        }
    }

    let mut specs: Vec<String> = Vec::new();
    let appliance = attrs
        .model_label
        .as_deref()
        .map_or(false, |m| APPLIANCE_MODEL.is_match(m));

    if let Some(storage) = attrs.specs.storage_gb.filter(|_| !appliance) {
        if storage >= 1024.0 {
            specs.push(format!("{:.0}TB", storage / 1024.0));
        } else {
            specs.push(format!("{}GB", format_measure(storage)));
        }
    }

    if let Some(weight) = attrs.specs.weight_kg {
        if !brand_in(brand, WEIGHTLESS_BRANDS) {
            if tool_brand {
                if weight > 0.0 && weight < 20.0 {
                    specs.push(format!("{}kg", format_measure(weight)));
                }
            } else if weight < 0.1 {
                specs.push(format!("{:.0}g", weight * 1000.0));
            } else if weight >= 1000.0 {
                specs.push(format!("{:.1}t", weight / 1000.0));
            } else {
                specs.push(format!("{}kg", format_measure(weight)));
            }
        }
    }

    if let Some(power) = attrs.specs.power_w {
        if power >= 1000.0 {
            specs.push(format!("{:.1}kW", power / 1000.0));
        } else {
            specs.push(format!("{}W", format_measure(power)));
        }
    }

    if tool_brand {
        if let Some(caps) = VOLTAGE.captures(title) {
            specs.push(format!("{}V", &caps[1]));
        }
    }

    if phone_brand && title.to_lowercase().contains("5g") {
        specs.push("5G".to_string());
    }

    if !specs.is_empty() {
        parts.push(format!("({})", specs.join(", ")));
    }

    parts.join(" ")
}
