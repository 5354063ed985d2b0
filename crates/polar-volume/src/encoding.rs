//! Linear encoding of raw radar samples.

use radar_common::{CellValue, RadarError, RadarResult};
use serde::{Deserialize, Serialize};

/// Per-parameter decoding rule: `value = offset + gain * raw`.
///
/// Raw samples equal to `nodata` or `undetect` are sentinels and never
/// go through the linear formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Encoding {
    pub gain: f64,
    pub offset: f64,
    pub nodata: f64,
    pub undetect: f64,
}

impl Encoding {
    /// Create a validated encoding.
    pub fn new(gain: f64, offset: f64, nodata: f64, undetect: f64) -> RadarResult<Self> {
        let encoding = Self {
            gain,
            offset,
            nodata,
            undetect,
        };
        encoding.validate()?;
        Ok(encoding)
    }

    /// Encoding for samples already in physical units.
    ///
    /// Only non-finite samples are treated as missing.
    pub fn identity() -> Self {
        Self {
            gain: 1.0,
            offset: 0.0,
            nodata: f64::NAN,
            undetect: f64::NAN,
        }
    }

    /// Check gain and offset.
    pub fn validate(&self) -> RadarResult<()> {
        if !self.gain.is_finite() || self.gain == 0.0 {
            return Err(RadarError::invalid_argument(format!(
                "gain must be finite and non-zero, got {}",
                self.gain
            )));
        }
        if !self.offset.is_finite() {
            return Err(RadarError::invalid_argument(format!(
                "offset must be finite, got {}",
                self.offset
            )));
        }
        Ok(())
    }

    /// Decode one raw sample.
    #[inline]
    pub fn decode(&self, raw: f64) -> CellValue {
        if !raw.is_finite() || raw == self.nodata {
            CellValue::NoData
        } else if raw == self.undetect {
            CellValue::Undetect
        } else {
            CellValue::Present(self.offset + self.gain * raw)
        }
    }
}
