//! Running sums and averages, overall and per severity band.

use bp_core::error::{BpError, Result};
use bp_core::models::{Reading, SeverityBand};

// ── Totals ────────────────────────────────────────────────────────────────────

/// Running sums for one scope (overall or a single band).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub systolic: u64,
    pub diastolic: u64,
    pub pulse: u64,
    pub count: u32,
}

impl Totals {
    /// Add a single reading's values to the running sums.
    fn add(&mut self, reading: &Reading) {
        self.systolic += u64::from(reading.systolic);
        self.diastolic += u64::from(reading.diastolic);
        self.pulse += u64::from(reading.pulse);
        self.count += 1;
    }

    /// Plain rational means `(systolic, diastolic, pulse)`.
    ///
    /// Rounding is a presentation concern; callers that want whole numbers
    /// round at display time. Fails with [`BpError::EmptyAverage`] when no
    /// readings were recorded.
    pub fn averages(&self) -> Result<(f64, f64, f64)> {
        if self.count == 0 {
            return Err(BpError::EmptyAverage);
        }
        let n = f64::from(self.count);
        Ok((
            self.systolic as f64 / n,
            self.diastolic as f64 / n,
            self.pulse as f64 / n,
        ))
    }
}

// ── Accumulator ───────────────────────────────────────────────────────────────

/// Session-scoped accumulator: one overall [`Totals`] plus one per band.
///
/// A reading is recorded into both scopes in a single call, so the invariant
/// `sum(band counts) == overall count` holds between any two calls.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    overall: Totals,
    per_band: [Totals; SeverityBand::ALL.len()],
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one reading against the overall totals and its band's totals.
    pub fn record(&mut self, reading: &Reading, band: SeverityBand) {
        self.overall.add(reading);
        self.per_band[band.index()].add(reading);
    }

    /// Totals across all readings.
    pub fn overall(&self) -> &Totals {
        &self.overall
    }

    /// Totals for one band.
    pub fn band(&self, band: SeverityBand) -> &Totals {
        &self.per_band[band.index()]
    }

    /// `(band, count)` pairs in severity order, zero-count bands omitted.
    pub fn breakdown(&self) -> Vec<(SeverityBand, u32)> {
        SeverityBand::ALL
            .iter()
            .filter_map(|&band| {
                let count = self.per_band[band.index()].count;
                (count > 0).then_some((band, count))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bp_core::classify::classify;

    fn reading(systolic: u32, diastolic: u32, pulse: u32) -> Reading {
        Reading {
            date: "24".to_string(),
            time: "09:18".to_string(),
            year: "2017".to_string(),
            month: "Sep".to_string(),
            systolic,
            diastolic,
            pulse,
        }
    }

    /// Record a reading under the band the classifier assigns it.
    fn record_classified(acc: &mut Accumulator, r: &Reading) {
        let band = classify(r.systolic, r.diastolic).unwrap();
        acc.record(r, band);
    }

    #[test]
    fn test_band_counts_sum_to_overall() {
        // The aha.py demonstration data set.
        let samples = [
            (116, 71, 65),
            (136, 71, 65),
            (136, 71, 65),
            (236, 115, 65),
            (120, 72, 65),
            (162, 75, 65),
            (172, 86, 65),
            (172, 90, 65),
            (172, 100, 65),
        ];
        let mut acc = Accumulator::new();
        for &(s, d, p) in &samples {
            record_classified(&mut acc, &reading(s, d, p));
        }

        let band_sum: u32 = SeverityBand::ALL
            .iter()
            .map(|&b| acc.band(b).count)
            .sum();
        assert_eq!(band_sum, acc.overall().count);
        assert_eq!(acc.overall().count, samples.len() as u32);
    }

    #[test]
    fn test_running_sums_match_arithmetic_sum() {
        let mut acc = Accumulator::new();
        record_classified(&mut acc, &reading(129, 67, 59));
        record_classified(&mut acc, &reading(181, 121, 70));

        assert_eq!(acc.overall().systolic, 310);
        assert_eq!(acc.overall().diastolic, 188);
        assert_eq!(acc.overall().pulse, 129);
    }

    #[test]
    fn test_averages_are_unrounded() {
        let mut acc = Accumulator::new();
        record_classified(&mut acc, &reading(129, 67, 59));
        record_classified(&mut acc, &reading(181, 121, 70));

        let (s, d, p) = acc.overall().averages().unwrap();
        assert!((s - 155.0).abs() < 1e-9);
        assert!((d - 94.0).abs() < 1e-9);
        assert!((p - 64.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_average_is_an_error() {
        let acc = Accumulator::new();
        assert!(matches!(
            acc.overall().averages(),
            Err(BpError::EmptyAverage)
        ));
    }

    #[test]
    fn test_band_scoped_totals() {
        let mut acc = Accumulator::new();
        record_classified(&mut acc, &reading(116, 71, 60)); // Normal
        record_classified(&mut acc, &reading(118, 72, 62)); // Normal
        record_classified(&mut acc, &reading(154, 83, 70)); // Stage 2

        assert_eq!(acc.band(SeverityBand::Normal).count, 2);
        assert_eq!(acc.band(SeverityBand::Stage2).count, 1);
        assert_eq!(acc.band(SeverityBand::Crisis).count, 0);

        let (s, _, _) = acc.band(SeverityBand::Normal).averages().unwrap();
        assert!((s - 117.0).abs() < 1e-9);
    }

    #[test]
    fn test_breakdown_omits_zero_count_bands() {
        let mut acc = Accumulator::new();
        record_classified(&mut acc, &reading(116, 71, 60)); // Normal
        record_classified(&mut acc, &reading(236, 115, 65)); // Crisis

        let breakdown = acc.breakdown();
        assert_eq!(
            breakdown,
            vec![(SeverityBand::Normal, 1), (SeverityBand::Crisis, 1)]
        );
    }
}
