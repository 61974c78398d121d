//! # Quantity Normalizer
//!
//! Converts a stored quantity (native value + unit, plus an optional
//! canonical gram/millilitre equivalent) into a human-displayable value in
//! the user's preferred measurement system.
//!
//! The normalizer is pure and total: every input combination yields a
//! defined output and it never panics. Out-of-vocabulary unit labels
//! degrade to pass-through display rather than failing.

use crate::basket_model::MeasurementSystem;

/// Grams in one pound
const GRAMS_PER_POUND: f64 = 453.592;
/// Grams in one ounce
const GRAMS_PER_OUNCE: f64 = 28.3495;
/// Gram-equivalent breakpoints for imperial liquid display
const GRAMS_PER_CUP: f64 = 240.0;
const GRAMS_PER_TBSP: f64 = 15.0;
const GRAMS_PER_TSP: f64 = 5.0;
/// Metric ladder breakpoint (g -> kg, ml -> L)
const METRIC_STEP: f64 = 1000.0;

/// Unit labels classified as liquid for conversion purposes
const LIQUID_UNITS: [&str; 6] = ["ml", "l", "cups", "tbsp", "tsp", "fl-oz"];

/// A display-ready quantity: numeric string plus unit label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuantity {
    /// Displayable numeric value ("1.5", "250", "-")
    pub quantity: String,
    /// Display unit label ("kg", "oz", ""); never written back to storage
    pub unit: String,
}

impl NormalizedQuantity {
    fn new(quantity: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            quantity: quantity.into(),
            unit: unit.into(),
        }
    }
}

/// Normalize a stored quantity for display.
///
/// Precedence: a positive `quantity_grams` wins over `quantity_value` for
/// any non-discrete unit (the canonical equivalent carries more precision);
/// missing value or unit displays as `"-"`; a single discrete item displays
/// as a bare `"1"`; stored `g`/`ml` values run through the same conversion
/// ladders directly; anything else passes through unchanged.
pub fn normalize(
    quantity_value: Option<f64>,
    unit: Option<&str>,
    quantity_grams: Option<f64>,
    system: MeasurementSystem,
) -> NormalizedQuantity {
    let unit_lower = unit.map(|u| u.to_lowercase());

    // Canonical gram equivalent takes precedence for non-discrete units.
    if let Some(grams) = quantity_grams {
        if grams > 0.0 && unit_lower.as_deref() != Some("unit") {
            let liquid = unit_lower
                .as_deref()
                .is_some_and(|u| LIQUID_UNITS.contains(&u));
            return convert_grams(grams, liquid, system);
        }
    }

    let (value, unit) = match (quantity_value, unit) {
        (Some(v), Some(u)) => (v, u),
        _ => return NormalizedQuantity::new("-", "-"),
    };

    match unit_lower.as_deref() {
        // A single discrete item gets no unit label at all.
        Some("unit") if value == 1.0 => NormalizedQuantity::new("1", ""),
        Some("g") => convert_grams(value, false, system),
        Some("ml") => convert_grams(value, true, system),
        _ => NormalizedQuantity::new(format_pass_through(value), unit),
    }
}

/// Run a gram (or gram-equivalent) value through the display ladder.
fn convert_grams(grams: f64, liquid: bool, system: MeasurementSystem) -> NormalizedQuantity {
    match (system, liquid) {
        (MeasurementSystem::Metric, false) => {
            if grams >= METRIC_STEP {
                NormalizedQuantity::new(format_trimmed_2dp(grams / METRIC_STEP), "kg")
            } else {
                NormalizedQuantity::new(format_integer(grams), "g")
            }
        }
        (MeasurementSystem::Metric, true) => {
            if grams >= METRIC_STEP {
                NormalizedQuantity::new(format_trimmed_2dp(grams / METRIC_STEP), "L")
            } else {
                NormalizedQuantity::new(format_integer(grams), "ml")
            }
        }
        (MeasurementSystem::Imperial, false) => {
            if grams >= GRAMS_PER_POUND {
                NormalizedQuantity::new(format_trimmed_2dp(grams / GRAMS_PER_POUND), "lb")
            } else {
                NormalizedQuantity::new(format_1dp(grams / GRAMS_PER_OUNCE), "oz")
            }
        }
        (MeasurementSystem::Imperial, true) => {
            if grams >= GRAMS_PER_CUP {
                NormalizedQuantity::new(format_1dp(grams / GRAMS_PER_CUP), "cups")
            } else if grams >= GRAMS_PER_TBSP {
                NormalizedQuantity::new(format_1dp(grams / GRAMS_PER_TBSP), "tbsp")
            } else {
                NormalizedQuantity::new(format_1dp(grams / GRAMS_PER_TSP), "tsp")
            }
        }
    }
}

/// Two decimals with trailing zeros (and a dangling point) stripped.
fn format_trimmed_2dp(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

/// One decimal, with a trailing ".0" stripped for whole numbers.
fn format_1dp(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{:.1}", rounded)
    }
}

/// Nearest integer.
fn format_integer(value: f64) -> String {
    format!("{}", value.round() as i64)
}

/// Pass-through formatting for units outside the conversion vocabulary.
fn format_pass_through(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format_1dp(value)
    }
}
