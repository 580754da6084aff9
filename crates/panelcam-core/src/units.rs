//! Numeric formatting for command operands
//!
//! All program values are millimeter based. Coordinates are rendered with
//! three decimals, feeds and spindle speeds as whole numbers.

/// Number of decimals used for coordinate operands.
pub const COORDINATE_DECIMALS: usize = 3;

/// Format a length in millimeters as a coordinate operand.
///
/// Negative zero is normalised so that a value that rounds to zero never
/// prints as `-0.000`.
pub fn format_mm(value_mm: f64) -> String {
    let formatted = format!("{:.*}", COORDINATE_DECIMALS, value_mm);
    normalise_negative_zero(formatted)
}

/// Smallest feed rate in mm/min that still renders as a non-zero `F` word.
pub const MIN_FEED_RATE: f64 = 1.0;

/// Format a feed rate in mm/min.
pub fn format_feed(value_mm_per_min: f64) -> String {
    normalise_negative_zero(format!("{:.0}", value_mm_per_min))
}

/// Format a spindle speed in RPM.
pub fn format_speed(rpm: u32) -> String {
    rpm.to_string()
}

fn normalise_negative_zero(formatted: String) -> String {
    match formatted.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => formatted,
    }
}
