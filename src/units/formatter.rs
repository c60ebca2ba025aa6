use crate::units::unit::Unit;

/// Above 2^52 every f64 is a whole number
const NO_FRACTION: f64 = 4_503_599_627_370_496.0;

/// Round to two decimal places, keeping the value numeric. Ties round away
/// from zero (0.125 -> 0.13).
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() || value.abs() >= NO_FRACTION {
        return value;
    }
    (value * 100.0).round() / 100.0
}

/// Fixed-point text with exactly two decimals (3.1 -> "3.10"), rounded the
/// same way as `round2`
pub fn to_fixed(value: f64) -> String {
    format!("{:.2}", round2(value))
}

/// Render an amount followed by the unit identifier
pub fn format_amount(value: f64, unit: &Unit<'_>, round: bool) -> String {
    if round {
        format!("{} {}", to_fixed(value), unit.identifier())
    } else {
        format!("{} {}", value, unit.identifier())
    }
}
