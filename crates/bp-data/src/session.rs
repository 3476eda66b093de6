//! The processing session: raw lines in, printable report lines out.
//!
//! All mutable state for one run lives in [`Session`], owned by the caller
//! and threaded through each component call. Processing is synchronous and
//! strictly in input order.

use bp_core::classify::{classify, classify_average};
use bp_core::error::Result;
use bp_core::formatting::{
    alarm_banner, breakdown_line, round_average, section_label, summary_line, superfluous_line,
    threshold_line, BREAKDOWN_HEADER, NO_READINGS, REPORT_HEADER, REPORT_UNDERLINE,
};
use bp_core::models::{Reading, SuperfluousRecord};
use tracing::debug;

use crate::accumulator::Accumulator;
use crate::layout::ColumnLayout;
use crate::scanner::{LineScanner, ScanOutcome};
use crate::trackers::{AnomalyTracker, SectionTracker};

// ── SessionConfig ─────────────────────────────────────────────────────────────

/// Validated configuration for one processing run.
///
/// Validation (quote stripping, zero-column correction) happens in the
/// settings layer; by the time a config reaches the session its values are
/// taken at face value, except that the layout still clamps columns to ≥ 1.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Number of report columns.
    pub columns: usize,
    /// Character used to flag readings above the threshold.
    pub alarm: char,
    /// Systolic alarm threshold; 0 disables flagging and the breakdown.
    pub threshold: u32,
    /// When set, annotate readings with their severity level code instead of
    /// the alarm character and append the per-band breakdown table.
    pub report_mode: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            columns: 2,
            alarm: '!',
            threshold: 135,
            report_mode: false,
        }
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// One end-to-end processing run.
pub struct Session {
    config: SessionConfig,
    scanner: LineScanner,
    accumulator: Accumulator,
    sections: SectionTracker,
    layout: ColumnLayout,
    anomalies: AnomalyTracker,
    output: Vec<String>,
    header_emitted: bool,
    banner_emitted: bool,
    last_reading_text: Option<String>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let layout = ColumnLayout::new(config.columns);
        let anomalies = AnomalyTracker::new(config.threshold);
        Self {
            config,
            scanner: LineScanner::new(),
            accumulator: Accumulator::new(),
            sections: SectionTracker::new(),
            layout,
            anomalies,
            output: Vec::new(),
            header_emitted: false,
            banner_emitted: false,
            last_reading_text: None,
        }
    }

    /// Feed one raw input line through the pipeline.
    ///
    /// Failures are local to the line except for a classification fault,
    /// which indicates broken rules and aborts the run.
    pub fn process_line(&mut self, line: &str) -> Result<()> {
        match self.scanner.scan(line) {
            ScanOutcome::Reading(reading) => self.admit_reading(reading),
            ScanOutcome::Noise | ScanOutcome::Blank => Ok(()),
            ScanOutcome::Superfluous => {
                self.handle_superfluous(line);
                Ok(())
            }
        }
    }

    /// Finish the run: final flush, summary and the optional report blocks.
    pub fn finish(mut self) -> Result<Vec<String>> {
        if let Some(key) = self.sections.take_current() {
            self.flush_section(&key);
        }

        if self.accumulator.overall().count == 0 {
            self.output.push(NO_READINGS.to_string());
            return Ok(self.output);
        }

        self.emit_summary()?;
        self.emit_threshold_breakdown();
        if self.config.report_mode {
            self.emit_band_breakdown();
        }
        self.emit_superfluous_report();

        Ok(self.output)
    }

    // ── Readings ──────────────────────────────────────────────────────────────

    fn admit_reading(&mut self, reading: Reading) -> Result<()> {
        let band = classify(reading.systolic, reading.diastolic)?;

        if let Some(previous) = self.sections.admit(&reading) {
            self.flush_section(&previous);
        }

        let flagged = self.anomalies.check(&reading);
        // Report mode annotates with level codes, so the alarm banner would
        // name a character that never appears.
        if flagged && !self.banner_emitted && !self.config.report_mode {
            // Before the column header when the very first reading qualifies.
            self.output
                .push(alarm_banner(self.config.threshold, self.config.alarm));
            self.banner_emitted = true;
        }
        if !self.header_emitted {
            self.output.push(REPORT_HEADER.to_string());
            self.output.push(REPORT_UNDERLINE.to_string());
            self.header_emitted = true;
        }

        self.accumulator.record(&reading, band);

        let text = reading.display_text();
        let flag = if self.config.report_mode {
            band.level_code()
        } else if flagged {
            self.config.alarm
        } else {
            ' '
        };
        self.layout.push(format!("{} {}", text, flag));
        self.last_reading_text = Some(text);

        Ok(())
    }

    /// Emit the label and reflowed rows for a finished section.
    fn flush_section(&mut self, key: &(String, String)) {
        let rows = self.layout.flush();
        if rows.is_empty() {
            return;
        }
        self.output.push(section_label(&key.0, &key.1));
        self.output.extend(rows);
    }

    // ── Non-reading lines ─────────────────────────────────────────────────────

    fn handle_superfluous(&mut self, line: &str) {
        let trimmed = line.trim_end();
        match (&self.last_reading_text, self.sections.current()) {
            (Some(reading_text), Some((year, month))) => {
                debug!("Attaching superfluous line: {:?}", trimmed);
                self.anomalies.attach_superfluous(SuperfluousRecord {
                    year: year.clone(),
                    month: month.clone(),
                    reading_text: reading_text.clone(),
                    line: trimmed.to_string(),
                });
            }
            // No reading yet: pass the line through untouched.
            _ => self.output.push(trimmed.to_string()),
        }
    }

    // ── Report tail ───────────────────────────────────────────────────────────

    fn emit_summary(&mut self) -> Result<()> {
        let overall = self.accumulator.overall();
        let (avg_sys, avg_dia, avg_pulse) = overall.averages()?;
        // Classification uses the exact means; rounding is display-only, so
        // an average of 119.6/79.6 reads as 120/80 but stays Normal.
        let band = classify_average(avg_sys, avg_dia)?;
        let (sys, dia, pulse) = (
            round_average(avg_sys),
            round_average(avg_dia),
            round_average(avg_pulse),
        );
        self.output.push(String::new());
        self.output
            .push(summary_line(overall.count, sys, dia, pulse, band));
        Ok(())
    }

    fn emit_threshold_breakdown(&mut self) {
        if !self.anomalies.any_flagged() {
            return;
        }
        let pairs = self.anomalies.breakdown();
        if pairs.is_empty() {
            return;
        }
        self.output.push(String::new());
        for (count, level) in pairs {
            self.output.push(threshold_line(count, level));
        }
    }

    fn emit_band_breakdown(&mut self) {
        let breakdown = self.accumulator.breakdown();
        if breakdown.is_empty() {
            return;
        }
        self.output.push(String::new());
        for header in BREAKDOWN_HEADER {
            self.output.push(header.to_string());
        }
        for (band, count) in breakdown {
            self.output.push(breakdown_line(band, count));
        }
    }

    fn emit_superfluous_report(&mut self) {
        if self.anomalies.superfluous().is_empty() {
            return;
        }
        self.output.push(String::new());
        self.output.push("Superfluous lines:".to_string());
        for record in self.anomalies.superfluous() {
            self.output.push(superfluous_line(
                &record.year,
                &record.month,
                &record.reading_text,
                &record.line,
            ));
        }
    }
}

// ── Convenience driver ────────────────────────────────────────────────────────

/// Run a whole session over an iterator of raw lines.
pub fn run<I, S>(lines: I, config: SessionConfig) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut session = Session::new(config);
    for line in lines {
        session.process_line(line.as_ref())?;
    }
    session.finish()
}
