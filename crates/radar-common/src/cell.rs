//! Per-cell measurement values.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A single polar bin or raster cell.
///
/// `NoData` (no reading, or a location outside radar coverage) and
/// `Undetect` (a reading below the detection threshold) stay distinct
/// through sampling and compositing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    /// Measured physical value.
    Present(f64),
    /// No measurement.
    #[default]
    NoData,
    /// Measured, below detection threshold.
    Undetect,
}

impl CellValue {
    /// True for a measured value above the detection threshold.
    pub fn is_present(&self) -> bool {
        matches!(self, CellValue::Present(_))
    }

    /// True when the cell carries no measurement at all.
    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::NoData)
    }

    /// Physical value, if any.
    pub fn value(&self) -> Option<f64> {
        match self {
            CellValue::Present(v) => Some(*v),
            _ => None,
        }
    }

    /// Element-wise maximum used for compositing.
    ///
    /// `NoData` is the identity; `Undetect` ranks below every present value.
    /// The operation is associative and commutative.
    pub fn merge_max(self, other: CellValue) -> CellValue {
        match self.rank_cmp(&other) {
            Ordering::Less => other,
            _ => self,
        }
    }

    /// Order used by [`CellValue::merge_max`]: `NoData < Undetect < Present`.
    fn rank_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Present(a), CellValue::Present(b)) => a.total_cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::NoData => 0,
            CellValue::Undetect => 1,
            CellValue::Present(_) => 2,
        }
    }

    /// Flatten to `f32` with NaN for anything that is not a present value.
    pub fn to_f32_nan(&self) -> f32 {
        match self {
            CellValue::Present(v) => *v as f32,
            _ => f32::NAN,
        }
    }
}
