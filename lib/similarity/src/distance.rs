//! Distance and similarity functions for the individual factors
//!
//! All functions return a similarity score in range [0.0, 1.0] where 1.0
//! means identical.

use prodmatch_core::dimensions::relative_difference;
use std::collections::HashSet;
use std::hash::{BuildHasher, Hash};

/// Levenshtein similarity: `1 - lev(a, b) / max(len)`, counted in chars
///
/// Two empty strings are identical.
pub fn string_similarity(a: &str, b: &str) -> f32 {
    strsim::normalized_levenshtein(a, b) as f32
}

/// Optional codes: 1 when equal, Levenshtein similarity when both present,
/// 0 when either is absent
pub fn code_similarity(a: Option<&str>, b: Option<&str>) -> f32 {
    match (a, b) {
        (Some(a), Some(b)) if a == b => 1.0,
        (Some(a), Some(b)) => string_similarity(a, b),
        _ => 0.0,
    }
}

/// Exact match of optional tokens; absent never matches
pub fn exact_similarity(a: Option<&str>, b: Option<&str>) -> f32 {
    match (a, b) {
        (Some(a), Some(b)) if a == b => 1.0,
        _ => 0.0,
    }
}

/// Jaccard index of two sets, 0 when either is empty
pub fn jaccard<T, S>(a: &HashSet<T, S>, b: &HashSet<T, S>) -> f32
where
    T: Eq + Hash,
    S: BuildHasher,
{
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;

    intersection as f32 / union as f32
}

/// Numeric similarity: 1 within `tolerance` relative difference, otherwise
/// `1 - relative difference`
pub fn numeric_similarity(a: f64, b: f64, tolerance: f64) -> f32 {
    let diff = relative_difference(a, b);
    if diff <= tolerance {
        1.0
    } else {
        (1.0 - diff).max(0.0) as f32
    }
}

/// Whether two values are equal within a relative tolerance
pub fn within_tolerance(a: f64, b: f64, tolerance: f64) -> bool {
    relative_difference(a, b) <= tolerance
}
