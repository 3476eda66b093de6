use serde::{Deserialize, Serialize};

/// A single structured blood-pressure reading extracted from the log.
///
/// Created once by the line scanner and never mutated. The timestamp pieces
/// are kept as the display strings the log carried (seconds and timezone are
/// already gone by the time a `Reading` exists).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Day-of-month label, 1–2 characters as it appeared in the log.
    pub date: String,
    /// Time of day as `HH:MM`.
    pub time: String,
    /// Four-digit year string.
    pub year: String,
    /// Three-letter month token, e.g. `"Sep"`.
    pub month: String,
    /// Systolic pressure (mmHg).
    pub systolic: u32,
    /// Diastolic pressure (mmHg).
    pub diastolic: u32,
    /// Pulse rate (beats per minute).
    pub pulse: u32,
}

impl Reading {
    /// Fixed-width display form used for column layout and the superfluous
    /// line report: `"24 09:18 129/67   59"`.
    ///
    /// Year and month are deliberately absent; they live in the section label
    /// above each reflowed block.
    pub fn display_text(&self) -> String {
        format!(
            "{:>2} {} {:>3}/{:<3} {:>3}",
            self.date, self.time, self.systolic, self.diastolic, self.pulse
        )
    }

    /// The `(year, month)` pair identifying the section this reading
    /// belongs to.
    pub fn section_key(&self) -> (String, String) {
        (self.year.clone(), self.month.clone())
    }
}

// ── SeverityBand ──────────────────────────────────────────────────────────────

/// American Heart Association hypertension category.
///
/// The five variants are ordered from least to most severe. Display strings
/// follow the AHA table verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeverityBand {
    Normal,
    Elevated,
    Stage1,
    Stage2,
    Crisis,
}

impl SeverityBand {
    /// All bands in severity order, for iteration and breakdown tables.
    pub const ALL: [SeverityBand; 5] = [
        SeverityBand::Normal,
        SeverityBand::Elevated,
        SeverityBand::Stage1,
        SeverityBand::Stage2,
        SeverityBand::Crisis,
    ];

    /// Short display name used in the breakdown table.
    pub fn name(&self) -> &'static str {
        match self {
            SeverityBand::Normal => "Normal",
            SeverityBand::Elevated => "Elevated",
            SeverityBand::Stage1 => "Stage 1",
            SeverityBand::Stage2 => "Stage 2",
            SeverityBand::Crisis => "Crisis",
        }
    }

    /// Expanded description used in the summary line.
    pub fn expanded_name(&self) -> &'static str {
        match self {
            SeverityBand::Normal => "Normal blood pressure",
            SeverityBand::Elevated => "Elevated blood pressure",
            SeverityBand::Stage1 => "Stage 1 hypertension",
            SeverityBand::Stage2 => "Stage 2 hypertension",
            SeverityBand::Crisis => "Hypertensive Crisis!",
        }
    }

    /// Single-character level code shown against each reading in report
    /// mode. Normal is a blank.
    pub fn level_code(&self) -> char {
        match self {
            SeverityBand::Normal => ' ',
            SeverityBand::Elevated => '1',
            SeverityBand::Stage1 => '2',
            SeverityBand::Stage2 => '3',
            SeverityBand::Crisis => '4',
        }
    }

    /// Zero-based position in [`SeverityBand::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

// ── SuperfluousRecord ─────────────────────────────────────────────────────────

/// A non-reading, non-header line captured between readings, tagged with the
/// reading that immediately preceded it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperfluousRecord {
    /// Year of the section the line was seen in.
    pub year: String,
    /// Month of the section the line was seen in.
    pub month: String,
    /// Display text of the most recently admitted reading.
    pub reading_text: String,
    /// The superfluous line itself, right-trimmed.
    pub line: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_reading() -> Reading {
        Reading {
            date: "24".to_string(),
            time: "09:18".to_string(),
            year: "2017".to_string(),
            month: "Sep".to_string(),
            systolic: 129,
            diastolic: 67,
            pulse: 59,
        }
    }

    // ── Reading ───────────────────────────────────────────────────────────────

    #[test]
    fn test_display_text_fixed_width() {
        let r = sample_reading();
        assert_eq!(r.display_text(), "24 09:18 129/67   59");
        assert_eq!(r.display_text().len(), 20);
    }

    #[test]
    fn test_display_text_pads_single_digit_day() {
        let r = Reading {
            date: "4".to_string(),
            pulse: 103,
            ..sample_reading()
        };
        assert_eq!(r.display_text(), " 4 09:18 129/67  103");
        assert_eq!(r.display_text().len(), 20);
    }

    #[test]
    fn test_display_text_three_digit_diastolic() {
        let r = Reading {
            systolic: 181,
            diastolic: 121,
            pulse: 70,
            ..sample_reading()
        };
        assert_eq!(r.display_text(), "24 09:18 181/121  70");
    }

    #[test]
    fn test_section_key() {
        let r = sample_reading();
        assert_eq!(
            r.section_key(),
            ("2017".to_string(), "Sep".to_string())
        );
    }

    // ── SeverityBand ──────────────────────────────────────────────────────────

    #[test]
    fn test_band_order() {
        assert!(SeverityBand::Normal < SeverityBand::Elevated);
        assert!(SeverityBand::Stage2 < SeverityBand::Crisis);
    }

    #[test]
    fn test_band_indices_match_all() {
        for (i, band) in SeverityBand::ALL.iter().enumerate() {
            assert_eq!(band.index(), i);
        }
    }

    #[test]
    fn test_band_level_codes() {
        let codes: String = SeverityBand::ALL.iter().map(|b| b.level_code()).collect();
        assert_eq!(codes, " 1234");
    }

    #[test]
    fn test_band_names() {
        assert_eq!(SeverityBand::Stage1.name(), "Stage 1");
        assert_eq!(
            SeverityBand::Crisis.expanded_name(),
            "Hypertensive Crisis!"
        );
    }
}
