//! Recognition of timestamped reading lines.
//!
//! The relevant log lines are produced by piping `date` output in front of a
//! manual blood-pressure entry, e.g.:
//!
//! ```text
//! Sun Sep 24 09:18:48 PDT 2017 129/67 59
//! ```
//!
//! Everything the scanner does is a pure function of the single line it is
//! given; lines that fail to match once fail forever.

use std::str::FromStr;

use bp_core::models::Reading;
use chrono::{Month, Weekday};
use regex::Regex;

/// Header line the upstream export writes above its data.
/// Recognised exactly and suppressed.
const INPUT_HEADER: &str = "Day Date   Time         Year sys/di pulse";

/// Underline belonging to [`INPUT_HEADER`], also suppressed.
const INPUT_UNDERLINE: &str = "--- ------ ------------ ---- --- -- --";

/// Classification of one raw input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A fully parsed reading.
    Reading(Reading),
    /// The known header or underline string; formatting noise to drop.
    Noise,
    /// An empty or whitespace-only line.
    Blank,
    /// Anything else: a candidate superfluous line.
    Superfluous,
}

/// Matcher for timestamped reading lines.
pub struct LineScanner {
    pattern: Regex,
}

impl LineScanner {
    /// Build the scanner.
    ///
    /// Field widths are part of the contract: pressures are 2–3 digits each
    /// and the pulse has a 2-digit minimum, so a stray `5/8 9` never parses
    /// as a reading. A single trailing annotation character (an alarm marker
    /// from a prior export) is tolerated and discarded.
    pub fn new() -> Self {
        let pattern = Regex::new(
            r"^(?P<wday>[A-Za-z]{3})\s+(?P<month>[A-Za-z]{3})\s+(?P<day>\d{1,2})\s+(?P<hour>\d{2}):(?P<minute>\d{2}):\d{2}\s+[A-Za-z]{3,4}\s+(?P<year>\d{4})\s+(?P<sys>\d{2,3})/(?P<dia>\d{2,3})\s+(?P<pulse>\d{2,3})(?:\s+\S)?\s*$",
        )
        .expect("reading pattern is valid");
        Self { pattern }
    }

    /// Classify a single raw line.
    pub fn scan(&self, line: &str) -> ScanOutcome {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return ScanOutcome::Blank;
        }
        if trimmed == INPUT_HEADER || trimmed == INPUT_UNDERLINE {
            return ScanOutcome::Noise;
        }
        match self.parse_reading(trimmed) {
            Some(reading) => ScanOutcome::Reading(reading),
            None => ScanOutcome::Superfluous,
        }
    }

    /// Extract a [`Reading`] from a trimmed line, or `None` when the line
    /// does not match the grammar or a token fails validation.
    fn parse_reading(&self, line: &str) -> Option<Reading> {
        let caps = self.pattern.captures(line)?;

        // Token validation beyond the lexical shape: the weekday and month
        // must be real calendar tokens and the day a real day-of-month.
        Weekday::from_str(&caps["wday"]).ok()?;
        Month::from_str(&caps["month"]).ok()?;
        let day: u32 = caps["day"].parse().ok()?;
        if !(1..=31).contains(&day) {
            return None;
        }

        let systolic: u32 = caps["sys"].parse().ok()?;
        let diastolic: u32 = caps["dia"].parse().ok()?;
        let pulse: u32 = caps["pulse"].parse().ok()?;

        Some(Reading {
            date: caps["day"].to_string(),
            time: format!("{}:{}", &caps["hour"], &caps["minute"]),
            year: caps["year"].to_string(),
            month: caps["month"].to_string(),
            systolic,
            diastolic,
            pulse,
        })
    }
}

impl Default for LineScanner {
    fn default() -> Self {
        Self::new()
    }
}
