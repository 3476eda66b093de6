//! Report string builders shared by the session pipeline.
//!
//! Everything here is presentation-only: rounding to whole numbers happens
//! in these helpers, never in the accumulators.

use crate::models::SeverityBand;

/// Column header printed once above the first reflowed block.
pub const REPORT_HEADER: &str = "Dt Time  sys/dia  pls";

/// Underline for [`REPORT_HEADER`].
pub const REPORT_UNDERLINE: &str = "-- ----- -------  ---";

/// Section label above each reflowed block, e.g. `"2017 Sep:"`.
///
/// # Examples
///
/// ```
/// use bp_core::formatting::section_label;
///
/// assert_eq!(section_label("2017", "Sep"), "2017 Sep:");
/// ```
pub fn section_label(year: &str, month: &str) -> String {
    format!("{} {}:", year, month)
}

/// One-time banner announcing the alarm threshold.
///
/// # Examples
///
/// ```
/// use bp_core::formatting::alarm_banner;
///
/// assert_eq!(
///     alarm_banner(135, '!'),
///     "Readings with systolic above 135 are flagged '!'",
/// );
/// ```
pub fn alarm_banner(threshold: u32, alarm: char) -> String {
    format!(
        "Readings with systolic above {} are flagged '{}'",
        threshold, alarm
    )
}

/// Final summary: count, whole-number averages, and the band the average
/// itself falls into.
///
/// # Examples
///
/// ```
/// use bp_core::formatting::summary_line;
/// use bp_core::models::SeverityBand;
///
/// assert_eq!(
///     summary_line(2, 155, 94, 65, SeverityBand::Stage2),
///     "Average of 2 readings is 155/94 (pulse 65) which is Stage 2 hypertension",
/// );
/// ```
pub fn summary_line(
    count: u32,
    avg_systolic: u32,
    avg_diastolic: u32,
    avg_pulse: u32,
    band: SeverityBand,
) -> String {
    format!(
        "Average of {} readings is {}/{} (pulse {}) which is {}",
        count,
        avg_systolic,
        avg_diastolic,
        avg_pulse,
        band.expanded_name()
    )
}

/// Message shown when the input contained no recognisable readings.
pub const NO_READINGS: &str = "No readings found.";

/// One line of the rising-threshold breakdown block.
pub fn threshold_line(count: usize, level: u32) -> String {
    format!("{:>4} readings with systolic above {}", count, level)
}

/// Header trio for the severity-band breakdown table.
pub const BREAKDOWN_HEADER: [&str; 3] = [
    "Hypertensive   # of",
    "  Category   Readings",
    "------------ --------",
];

/// One row of the severity-band breakdown table.
pub fn breakdown_line(band: SeverityBand, count: u32) -> String {
    format!("{:>9}:   {:>4}", band.name(), count)
}

/// One entry of the superfluous-lines report: the captured line quoted
/// against the reading that preceded it.
pub fn superfluous_line(year: &str, month: &str, reading_text: &str, line: &str) -> String {
    format!("\"{} {} {}\" -> {}", year, month, reading_text, line)
}

/// Round a plain rational mean to the nearest whole number.
pub fn round_average(value: f64) -> u32 {
    value.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_underline_width_match() {
        assert_eq!(REPORT_HEADER.len(), REPORT_UNDERLINE.len());
    }

    #[test]
    fn test_section_label() {
        assert_eq!(section_label("2022", "Aug"), "2022 Aug:");
    }

    #[test]
    fn test_threshold_line_padding() {
        assert_eq!(
            threshold_line(3, 145),
            "   3 readings with systolic above 145"
        );
        assert_eq!(
            threshold_line(1234, 135),
            "1234 readings with systolic above 135"
        );
    }

    #[test]
    fn test_breakdown_line_matches_table_format() {
        assert_eq!(
            breakdown_line(SeverityBand::Stage2, 4),
            "  Stage 2:      4"
        );
        assert_eq!(
            breakdown_line(SeverityBand::Normal, 12),
            "   Normal:     12"
        );
    }

    #[test]
    fn test_superfluous_line() {
        assert_eq!(
            superfluous_line("2017", "Sep", "24 09:18 129/67   59", "felt dizzy"),
            "\"2017 Sep 24 09:18 129/67   59\" -> felt dizzy"
        );
    }

    #[test]
    fn test_round_average_half_up() {
        assert_eq!(round_average(64.5), 65);
        assert_eq!(round_average(94.0), 94);
        assert_eq!(round_average(154.9), 155);
    }
}
