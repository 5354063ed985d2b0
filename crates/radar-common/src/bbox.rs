//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

use crate::error::{RadarError, RadarResult};

/// A geographic (WGS84, degrees) or projected (meters) bounding box.
///
/// For geographic boxes `x` is longitude and `y` latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a geographic bounding box, rejecting boxes outside the valid
    /// lon/lat ranges or with inverted corners.
    pub fn geographic(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> RadarResult<Self> {
        let bbox = Self::new(min_x, min_y, max_x, max_y);
        bbox.validate_geographic()?;
        Ok(bbox)
    }

    /// Check that this box is a usable WGS84 extent.
    pub fn validate_geographic(&self) -> RadarResult<()> {
        let values = [self.min_x, self.min_y, self.max_x, self.max_y];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(RadarError::invalid_argument(format!(
                "bounding box has non-finite corners: {:?}",
                self
            )));
        }
        if self.min_x < -180.0 || self.max_x > 180.0 {
            return Err(RadarError::invalid_argument(format!(
                "longitude limits {}..{} outside [-180, 180]",
                self.min_x, self.max_x
            )));
        }
        if self.min_y < -90.0 || self.max_y > 90.0 {
            return Err(RadarError::invalid_argument(format!(
                "latitude limits {}..{} outside [-90, 90]",
                self.min_y, self.max_y
            )));
        }
        if self.min_x >= self.max_x || self.min_y >= self.max_y {
            return Err(RadarError::invalid_argument(format!(
                "bounding box corners are inverted or degenerate: {:?}",
                self
            )));
        }
        Ok(())
    }

    /// Smallest box enclosing all given (x, y) points.
    ///
    /// Returns `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut iter = points.into_iter();
        let (x0, y0) = iter.next()?;
        let mut bbox = Self::new(x0, y0, x0, y0);
        for (x, y) in iter {
            bbox.min_x = bbox.min_x.min(x);
            bbox.min_y = bbox.min_y.min(y);
            bbox.max_x = bbox.max_x.max(x);
            bbox.max_y = bbox.max_y.max(y);
        }
        Some(bbox)
    }

    /// The four corners, counter-clockwise from the south-west.
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.min_x, self.min_y),
            (self.max_x, self.min_y),
            (self.max_x, self.max_y),
            (self.min_x, self.max_y),
        ]
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Get the center point of the bounding box.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Check if this bbox intersects another.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Check if a point is contained within this bbox.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}
