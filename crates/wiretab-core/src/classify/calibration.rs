use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::WiretabError;
use crate::grouping::DEFAULT_ROW_TOLERANCE;

/// Numeric ranges the classifier uses to tell lengths from sizes.
///
/// The defaults are calibrated against real harness drawings (millimetre
/// cut lengths, mm² cross sections). Override only with new calibration data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// Shortest plausible cut length (mm), inclusive.
    pub cut_length_min: i64,
    /// Longest plausible cut length (mm), inclusive.
    pub cut_length_max: i64,
    /// Smallest plausible cross section (mm²), inclusive.
    pub wire_size_min: Decimal,
    /// Largest plausible cross section (mm²), inclusive.
    pub wire_size_max: Decimal,
    /// A bare number longer than this is never read as a size.
    pub wire_size_max_chars: usize,
    /// Vertical distance (drawing units) within which labels share a row.
    pub row_tolerance: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Calibration {
            cut_length_min: 50,
            cut_length_max: 2500,
            wire_size_min: Decimal::new(1, 1),
            wire_size_max: Decimal::new(50, 1),
            wire_size_max_chars: 5,
            row_tolerance: DEFAULT_ROW_TOLERANCE,
        }
    }
}

impl Calibration {
    pub fn is_cut_length(&self, value: i64) -> bool {
        (self.cut_length_min..=self.cut_length_max).contains(&value)
    }

    pub fn is_wire_size(&self, value: Decimal) -> bool {
        value >= self.wire_size_min && value <= self.wire_size_max
    }

    pub fn validate(&self) -> Result<(), WiretabError> {
        if self.cut_length_min > self.cut_length_max {
            return Err(WiretabError::MappingInvalid(format!(
                "calibration cut_length_min {} exceeds cut_length_max {}",
                self.cut_length_min, self.cut_length_max
            )));
        }
        if self.wire_size_min > self.wire_size_max {
            return Err(WiretabError::MappingInvalid(format!(
                "calibration wire_size_min {} exceeds wire_size_max {}",
                self.wire_size_min, self.wire_size_max
            )));
        }
        if !self.row_tolerance.is_finite() || self.row_tolerance <= 0.0 {
            return Err(WiretabError::MappingInvalid(format!(
                "calibration row_tolerance must be a positive number, got {}",
                self.row_tolerance
            )));
        }
        Ok(())
    }
}
