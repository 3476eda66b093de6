//! American Heart Association hypertension classification.
//!
//! ```text
//! BLOOD PRESSURE CATEGORY   SYSTOLIC   &/or DIASTOLIC
//! -----------------------   --------   ---- ---------
//! NORMAL                     < 120      &     < 80
//! ELEVATED                  120 – 129   &     < 80
//! (HYPERTENSION) STAGE 1    130 – 139   or    80 – 89
//! (HYPERTENSION) STAGE 2     >= 140     or    >= 90
//! HYPERTENSIVE CRISIS        > 180     &/or  >= 120
//! ```
//!
//! The ranges are not mutually exclusive, so the order of testing matters:
//! a reading that satisfies more than one row gets the worse category.

use crate::error::{BpError, Result};
use crate::models::SeverityBand;

/// Map a systolic/diastolic pair to its severity band.
///
/// Precedence is Normal → Elevated → Crisis → Stage 2 → Stage 1, first match
/// wins. The five rules cover every non-negative pair, so the trailing
/// [`BpError::ClassificationFault`] is unreachable unless the rules
/// themselves are edited.
///
/// # Examples
///
/// ```
/// use bp_core::classify::classify;
/// use bp_core::models::SeverityBand;
///
/// assert_eq!(classify(119, 79).unwrap(), SeverityBand::Normal);
/// assert_eq!(classify(125, 79).unwrap(), SeverityBand::Elevated);
/// assert_eq!(classify(134, 71).unwrap(), SeverityBand::Stage1);
/// assert_eq!(classify(154, 83).unwrap(), SeverityBand::Stage2);
/// assert_eq!(classify(179, 120).unwrap(), SeverityBand::Crisis);
/// ```
pub fn classify(systolic: u32, diastolic: u32) -> Result<SeverityBand> {
    if systolic < 120 && diastolic < 80 {
        return Ok(SeverityBand::Normal);
    }
    if (120..130).contains(&systolic) && diastolic < 80 {
        return Ok(SeverityBand::Elevated);
    }
    if systolic > 180 || diastolic >= 120 {
        return Ok(SeverityBand::Crisis);
    }
    if systolic >= 140 || diastolic >= 90 {
        return Ok(SeverityBand::Stage2);
    }
    if (130..140).contains(&systolic) || (80..90).contains(&diastolic) {
        return Ok(SeverityBand::Stage1);
    }
    Err(BpError::ClassificationFault {
        systolic,
        diastolic,
    })
}

/// Classify a pair of unrounded rational means.
///
/// Same rules and precedence as [`classify`], compared against the
/// thresholds directly so that an average like 119.6/79.6 is Normal even
/// though its rounded display form 120/80 would read as Stage 1. Rounding
/// stays a presentation concern.
///
/// # Examples
///
/// ```
/// use bp_core::classify::classify_average;
/// use bp_core::models::SeverityBand;
///
/// assert_eq!(classify_average(119.6, 79.6).unwrap(), SeverityBand::Normal);
/// assert_eq!(classify_average(120.0, 79.6).unwrap(), SeverityBand::Elevated);
/// assert_eq!(classify_average(155.0, 94.0).unwrap(), SeverityBand::Stage2);
/// ```
pub fn classify_average(systolic: f64, diastolic: f64) -> Result<SeverityBand> {
    if systolic < 120.0 && diastolic < 80.0 {
        return Ok(SeverityBand::Normal);
    }
    if (120.0..130.0).contains(&systolic) && diastolic < 80.0 {
        return Ok(SeverityBand::Elevated);
    }
    if systolic > 180.0 || diastolic >= 120.0 {
        return Ok(SeverityBand::Crisis);
    }
    if systolic >= 140.0 || diastolic >= 90.0 {
        return Ok(SeverityBand::Stage2);
    }
    if (130.0..140.0).contains(&systolic) || (80.0..90.0).contains(&diastolic) {
        return Ok(SeverityBand::Stage1);
    }
    // Only reachable for non-finite inputs.
    Err(BpError::ClassificationFault {
        systolic: systolic.round() as u32,
        diastolic: diastolic.round() as u32,
    })
}
