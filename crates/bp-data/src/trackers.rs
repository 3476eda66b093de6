//! Section-boundary detection and anomaly bookkeeping.

use bp_core::models::{Reading, SuperfluousRecord};

// ── SectionTracker ────────────────────────────────────────────────────────────

/// Detects year/month boundaries in the reading stream.
///
/// A section is a contiguous run of readings sharing `(year, month)`; the
/// tracker hands back the previous section's key exactly when a run ends so
/// the caller can flush its buffered layout.
#[derive(Debug, Clone, Default)]
pub struct SectionTracker {
    current: Option<(String, String)>,
}

impl SectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a reading. Returns the key of the section that just ended, or
    /// `None` when the reading continues the current section (or is the
    /// first of the stream).
    pub fn admit(&mut self, reading: &Reading) -> Option<(String, String)> {
        let key = reading.section_key();
        match self.current.replace(key.clone()) {
            Some(previous) if previous != key => Some(previous),
            _ => None,
        }
    }

    /// Key of the section currently in progress.
    pub fn current(&self) -> Option<&(String, String)> {
        self.current.as_ref()
    }

    /// Take the in-progress key for the final end-of-stream flush.
    pub fn take_current(&mut self) -> Option<(String, String)> {
        self.current.take()
    }
}

// ── AnomalyTracker ────────────────────────────────────────────────────────────

/// Step by which the threshold is raised when computing the breakdown.
const THRESHOLD_STEP: u32 = 10;

/// Flags readings whose systolic value exceeds the alarm threshold and
/// collects superfluous lines against the reading that preceded them.
#[derive(Debug, Clone)]
pub struct AnomalyTracker {
    threshold: u32,
    flagged_systolics: Vec<u32>,
    superfluous: Vec<SuperfluousRecord>,
}

impl AnomalyTracker {
    /// A threshold of 0 disables flagging entirely.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            flagged_systolics: Vec::new(),
            superfluous: Vec::new(),
        }
    }

    /// Check one reading; returns `true` when it must carry the alarm flag.
    pub fn check(&mut self, reading: &Reading) -> bool {
        if self.threshold == 0 || reading.systolic <= self.threshold {
            return false;
        }
        self.flagged_systolics.push(reading.systolic);
        true
    }

    /// Whether any reading has qualified so far.
    pub fn any_flagged(&self) -> bool {
        !self.flagged_systolics.is_empty()
    }

    /// Record a superfluous line against the most recent reading.
    pub fn attach_superfluous(&mut self, record: SuperfluousRecord) {
        self.superfluous.push(record);
    }

    /// Superfluous lines in encounter order.
    pub fn superfluous(&self) -> &[SuperfluousRecord] {
        &self.superfluous
    }

    /// `(count, level)` pairs obtained by repeatedly raising the threshold
    /// by [`THRESHOLD_STEP`] and recounting until no readings remain above
    /// the current level.
    pub fn breakdown(&self) -> Vec<(usize, u32)> {
        let mut pairs = Vec::new();
        if self.threshold == 0 {
            return pairs;
        }
        let mut level = self.threshold;
        loop {
            let count = self
                .flagged_systolics
                .iter()
                .filter(|&&s| s > level)
                .count();
            if count == 0 {
                break;
            }
            pairs.push((count, level));
            level += THRESHOLD_STEP;
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(year: &str, month: &str, systolic: u32) -> Reading {
        Reading {
            date: "24".to_string(),
            time: "09:18".to_string(),
            year: year.to_string(),
            month: month.to_string(),
            systolic,
            diastolic: 80,
            pulse: 60,
        }
    }

    // ── SectionTracker ────────────────────────────────────────────────────────

    #[test]
    fn test_first_reading_never_flushes() {
        let mut tracker = SectionTracker::new();
        assert_eq!(tracker.admit(&reading("2017", "Sep", 120)), None);
        assert_eq!(
            tracker.current(),
            Some(&("2017".to_string(), "Sep".to_string()))
        );
    }

    #[test]
    fn test_same_section_never_flushes() {
        let mut tracker = SectionTracker::new();
        tracker.admit(&reading("2017", "Sep", 120));
        assert_eq!(tracker.admit(&reading("2017", "Sep", 130)), None);
    }

    #[test]
    fn test_month_change_flushes_previous() {
        let mut tracker = SectionTracker::new();
        tracker.admit(&reading("2017", "Sep", 120));
        let flushed = tracker.admit(&reading("2017", "Oct", 120));
        assert_eq!(flushed, Some(("2017".to_string(), "Sep".to_string())));
        assert_eq!(
            tracker.current(),
            Some(&("2017".to_string(), "Oct".to_string()))
        );
    }

    #[test]
    fn test_year_change_with_same_month_flushes() {
        let mut tracker = SectionTracker::new();
        tracker.admit(&reading("2017", "Dec", 120));
        let flushed = tracker.admit(&reading("2018", "Dec", 120));
        assert_eq!(flushed, Some(("2017".to_string(), "Dec".to_string())));
    }

    #[test]
    fn test_three_readings_two_months_one_intermediate_flush() {
        let mut tracker = SectionTracker::new();
        let mut flushes = 0;
        for r in [
            reading("2017", "Sep", 120),
            reading("2017", "Sep", 121),
            reading("2017", "Oct", 122),
        ] {
            if tracker.admit(&r).is_some() {
                flushes += 1;
            }
        }
        assert_eq!(flushes, 1);
        // End-of-stream flush picks up the tail section.
        assert!(tracker.take_current().is_some());
        assert!(tracker.take_current().is_none());
    }

    // ── AnomalyTracker ────────────────────────────────────────────────────────

    #[test]
    fn test_check_flags_above_threshold_only() {
        let mut tracker = AnomalyTracker::new(135);
        assert!(!tracker.check(&reading("2017", "Sep", 129)));
        assert!(!tracker.check(&reading("2017", "Sep", 135))); // not strictly above
        assert!(tracker.check(&reading("2017", "Sep", 136)));
        assert!(tracker.any_flagged());
    }

    #[test]
    fn test_zero_threshold_disables_flagging() {
        let mut tracker = AnomalyTracker::new(0);
        assert!(!tracker.check(&reading("2017", "Sep", 250)));
        assert!(!tracker.any_flagged());
        assert!(tracker.breakdown().is_empty());
    }

    #[test]
    fn test_breakdown_counts_decrease_to_zero() {
        let mut tracker = AnomalyTracker::new(135);
        for s in [140, 150, 150, 170] {
            tracker.check(&reading("2017", "Sep", s));
        }
        let pairs = tracker.breakdown();
        assert_eq!(
            pairs,
            vec![(4, 135), (3, 145), (1, 155), (1, 165)]
        );
        // Terminates: 175 would count zero readings.
    }

    #[test]
    fn test_breakdown_empty_when_nothing_flagged() {
        let mut tracker = AnomalyTracker::new(135);
        tracker.check(&reading("2017", "Sep", 120));
        assert!(tracker.breakdown().is_empty());
    }

    #[test]
    fn test_superfluous_records_keep_order() {
        let mut tracker = AnomalyTracker::new(135);
        for text in ["first note", "second note"] {
            tracker.attach_superfluous(SuperfluousRecord {
                year: "2017".to_string(),
                month: "Sep".to_string(),
                reading_text: "24 09:18 129/67   59".to_string(),
                line: text.to_string(),
            });
        }
        let lines: Vec<&str> = tracker
            .superfluous()
            .iter()
            .map(|r| r.line.as_str())
            .collect();
        assert_eq!(lines, vec!["first note", "second note"]);
    }
}
