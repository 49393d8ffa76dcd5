//! Dimension parsing and comparison
//!
//! Titles state sizes like `50x600x1200mm`, `60 × 120 cm` or `2,5*1,2 m`.
//! Values are kept in millimetres; the unit found in the title is remembered
//! for display only.

use crate::lexicon::is_insulation_title;
use crate::units::{format_measure, parse_number};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

static DIMENSIONS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\d+(?:[.,]\d+)?(?:\s*(?:x|х|×|\*|by|-)\s*\d+(?:[.,]\d+)?){1,2}(?:\s*(mm|cm|m)\b)?",
    )
    .unwrap()
});

static NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:[.,]\d+)?").unwrap());

/// Display unit of a dimension string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Mm,
    Cm,
    M,
}

impl LengthUnit {
    fn parse(unit: &str) -> Self {
        match unit.to_lowercase().as_str() {
            "cm" => LengthUnit::Cm,
            "m" => LengthUnit::M,
            _ => LengthUnit::Mm,
        }
    }

    /// Millimetres per unit
    pub fn millimetres(self) -> f64 {
        match self {
            LengthUnit::Mm => 1.0,
            LengthUnit::Cm => 10.0,
            LengthUnit::M => 1000.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LengthUnit::Mm => "mm",
            LengthUnit::Cm => "cm",
            LengthUnit::M => "m",
        }
    }
}

/// Parsed dimensions of one title, in millimetres
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Values in title order
    pub raw: Vec<f64>,
    /// Same values ascending
    pub sorted: Vec<f64>,
    /// Unit the title used
    pub unit: LengthUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
}

impl Dimensions {
    /// Parse the first dimension group of a title.
    ///
    /// Insulation titles with exactly three numbers get labeled axes: the
    /// smallest is the thickness, the other two are width and length in
    /// ascending order.
    pub fn parse(title: &str) -> Option<Self> {
        let caps = DIMENSIONS_PATTERN.captures(title)?;
        let matched = caps.get(0)?.as_str();
        let unit = caps
            .get(1)
            .map(|m| LengthUnit::parse(m.as_str()))
            .unwrap_or_default();

        let raw: Vec<f64> = NUMBER_PATTERN
            .find_iter(matched)
            .filter_map(|m| parse_number(m.as_str()))
            .map(|v| to_millimetres(v, unit))
            .collect();

        if raw.len() < 2 {
            return None;
        }

        let mut sorted = raw.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mut dims = Dimensions {
            raw,
            sorted,
            unit,
            thickness: None,
            width: None,
            length: None,
        };

        if dims.sorted.len() == 3 && is_insulation_title(title) {
            dims.thickness = Some(dims.sorted[0]);
            dims.width = Some(dims.sorted[1]);
            dims.length = Some(dims.sorted[2]);
        }

        Some(dims)
    }

    pub fn axes(&self) -> usize {
        self.sorted.len()
    }

    /// Sorted values in the title's unit, e.g. `100x600x1200mm`
    pub fn display(&self) -> String {
        let factor = self.unit.millimetres();
        let values: Vec<String> = self
            .sorted
            .iter()
            .map(|v| format_measure(v / factor))
            .collect();
        format!("{}{}", values.join("x"), self.unit.as_str())
    }
}

/// Remove the first dimension group from a title
pub fn strip_dimensions(title: &str) -> Cow<'_, str> {
    DIMENSIONS_PATTERN.replace(title, "")
}

fn to_millimetres(value: f64, unit: LengthUnit) -> f64 {
    let mm = value * unit.millimetres();
    (mm * 1e6).round() / 1e6
}

/// Tolerances used when comparing two dimension sets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionTolerance {
    /// Largest accepted thickness difference for insulation, in mm
    pub thickness_mm: f64,
    /// Relative tolerance for insulation width and length
    pub insulation_axis: f64,
    /// Relative tolerance for ordinary axes
    pub axis: f64,
    /// Relative tolerance once an axis exceeds `large_axis_above_mm`
    pub large_axis: f64,
    pub large_axis_above_mm: f64,
}

impl Default for DimensionTolerance {
    fn default() -> Self {
        Self {
            thickness_mm: 1.0,
            insulation_axis: 0.05,
            axis: 0.05,
            large_axis: 0.10,
            large_axis_above_mm: 1000.0,
        }
    }
}

/// Compare two dimension sets with default tolerances
pub fn compare_dimensions(
    d1: Option<&Dimensions>,
    d2: Option<&Dimensions>,
    is_insulation: bool,
) -> f32 {
    compare_dimensions_with(d1, d2, is_insulation, &DimensionTolerance::default())
}

/// Compare two dimension sets, returning a score in [0, 1].
///
/// Different dimensionality never matches. Insulation compares labeled axes
/// with a hard thickness limit; everything else averages per-axis scores.
pub fn compare_dimensions_with(
    d1: Option<&Dimensions>,
    d2: Option<&Dimensions>,
    is_insulation: bool,
    tol: &DimensionTolerance,
) -> f32 {
    let (d1, d2) = match (d1, d2) {
        (Some(a), Some(b)) => (a, b),
        _ => return 0.0,
    };

    if d1.sorted.is_empty() || d1.sorted.len() != d2.sorted.len() {
        return 0.0;
    }

    if is_insulation {
        if let (Some(t1), Some(t2), Some(w1), Some(w2), Some(l1), Some(l2)) = (
            d1.thickness,
            d2.thickness,
            d1.width,
            d2.width,
            d1.length,
            d2.length,
        ) {
            if (t1 - t2).abs() > tol.thickness_mm {
                return 0.0;
            }
            let width_diff = relative_difference(w1, w2);
            let length_diff = relative_difference(l1, l2);
            if width_diff <= tol.insulation_axis && length_diff <= tol.insulation_axis {
                return (1.0 - (width_diff + length_diff) / 4.0) as f32;
            }
            return 0.0;
        }
    }

    let total: f64 = d1
        .sorted
        .iter()
        .zip(&d2.sorted)
        .map(|(&a, &b)| {
            let diff = relative_difference(a, b);
            let tolerance = if a.max(b) > tol.large_axis_above_mm {
                tol.large_axis
            } else {
                tol.axis
            };
            if diff <= tolerance {
                1.0 - diff / tolerance
            } else {
                0.0
            }
        })
        .sum();

    (total / d1.sorted.len() as f64) as f32
}

/// |a - b| / max(|a|, |b|), zero when both are zero
pub fn relative_difference(a: f64, b: f64) -> f64 {
    let max = a.abs().max(b.abs());
    if max == 0.0 {
        0.0
    } else {
        (a - b).abs() / max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_axes_in_mm() {
        let dims = Dimensions::parse("Rockwool Rockmin 100x600x1200mm").unwrap();
        assert_eq!(dims.raw, vec![100.0, 600.0, 1200.0]);
        assert_eq!(dims.sorted, vec![100.0, 600.0, 1200.0]);
        assert_eq!(dims.unit, LengthUnit::Mm);
        assert_eq!(dims.thickness, Some(100.0));
        assert_eq!(dims.width, Some(600.0));
        assert_eq!(dims.length, Some(1200.0));
    }

    #[test]
    fn test_parse_converts_but_remembers_unit() {
        let dims = Dimensions::parse("Plāksne 120 × 60 cm").unwrap();
        assert_eq!(dims.raw, vec![1200.0, 600.0]);
        assert_eq!(dims.sorted, vec![600.0, 1200.0]);
        assert_eq!(dims.unit, LengthUnit::Cm);
        assert_eq!(dims.display(), "60x120cm");
        assert!(dims.thickness.is_none());
    }

    #[test]
    fn test_parse_decimal_comma_and_metres() {
        let dims = Dimensions::parse("Ģipškartons 2,5x1,2 m").unwrap();
        assert_eq!(dims.sorted, vec![1200.0, 2500.0]);
        assert_eq!(dims.unit, LengthUnit::M);
    }

    #[test]
    fn test_labels_only_for_insulation() {
        let dims = Dimensions::parse("Galds 75x80x120cm").unwrap();
        assert_eq!(dims.axes(), 3);
        assert!(dims.thickness.is_none());

        let wool = Dimensions::parse("Stikla vate 1200x50x600").unwrap();
        assert_eq!(wool.raw, vec![1200.0, 50.0, 600.0]);
        assert_eq!(wool.thickness, Some(50.0));
        assert_eq!(wool.width, Some(600.0));
        assert_eq!(wool.length, Some(1200.0));
    }

    #[test]
    fn test_no_dimensions() {
        assert!(Dimensions::parse("Samsung Galaxy S21 128GB").is_none());
        assert!(Dimensions::parse("Knauf Rotband 30kg").is_none());
    }

    #[test]
    fn test_dimension_count_mismatch_is_zero() {
        let a = Dimensions::parse("Flīze 500x500mm");
        let b = Dimensions::parse("Flīze 500x500x100mm");
        assert_eq!(compare_dimensions(a.as_ref(), b.as_ref(), false), 0.0);
        assert_eq!(compare_dimensions(a.as_ref(), None, false), 0.0);
    }

    #[test]
    fn test_insulation_thickness_veto() {
        let a = Dimensions::parse("Rockwool Rockmin 50x600x1200mm");
        let b = Dimensions::parse("Rockwool Rockmin 100x600x1200mm");
        assert_eq!(compare_dimensions(a.as_ref(), b.as_ref(), true), 0.0);
    }

    #[test]
    fn test_insulation_close_sizes_score() {
        let a = Dimensions::parse("Paroc vate 100x600x1200mm");
        let b = Dimensions::parse("Paroc vate 100x610x1200mm");
        let score = compare_dimensions(a.as_ref(), b.as_ref(), true);
        assert!(score > 0.99 && score < 1.0, "got {}", score);

        let c = Dimensions::parse("Paroc vate 100x565x1200mm");
        assert_eq!(compare_dimensions(a.as_ref(), c.as_ref(), true), 0.0);
    }

    #[test]
    fn test_insulation_needs_labels_on_both_sides() {
        // no insulation cue in the first title, so its axes stay unlabeled
        let plain = Dimensions::parse("Isover 50x600x1200");
        let wool = Dimensions::parse("Rockwool 50x600x1200mm");
        assert!(plain.as_ref().unwrap().thickness.is_none());
        assert_eq!(wool.as_ref().unwrap().thickness, Some(50.0));
        assert_eq!(compare_dimensions(plain.as_ref(), wool.as_ref(), true), 1.0);

        // the generic path scores per axis instead of applying the thickness limit
        let thicker = Dimensions::parse("Rockwool 100x600x1200mm");
        let score = compare_dimensions(plain.as_ref(), thicker.as_ref(), true);
        assert!((score - 2.0 / 3.0).abs() < 1e-6, "got {}", score);
    }

    #[test]
    fn test_generic_tolerance_widens_for_large_axes() {
        let a = Dimensions::parse("Durvis 800x2000mm");
        let b = Dimensions::parse("Durvis 800x2150mm");
        // 2000 vs 2150 is 7% apart: outside 5%, inside 10%
        let score = compare_dimensions(a.as_ref(), b.as_ref(), false);
        assert!(score > 0.6 && score < 0.7, "got {}", score);
    }

    #[test]
    fn test_compare_is_symmetric() {
        let a = Dimensions::parse("Plāksne 980x1000mm");
        let b = Dimensions::parse("Plāksne 1000x1040mm");
        assert_eq!(
            compare_dimensions(a.as_ref(), b.as_ref(), false),
            compare_dimensions(b.as_ref(), a.as_ref(), false)
        );
    }
}
