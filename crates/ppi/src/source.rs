//! Polar data that can be resampled onto a Cartesian grid.

use polar_volume::{PolarParam, PolarScan};
use radar_common::ScanGeo;

/// Which kind of polar object a [`Sampleable`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A single parameter grid.
    Param,
    /// A full sweep with all of its parameters.
    Scan,
}

/// Polar source accepted by the sampler.
///
/// Every parameter returned by [`Sampleable::params`] shares the geometry
/// reported by [`Sampleable::geo`] and [`Sampleable::dims`], so one bin
/// lookup table serves all of them.
pub trait Sampleable {
    fn kind(&self) -> SourceKind;

    /// Shared scan geometry.
    fn geo(&self) -> &ScanGeo;

    /// `(nbins, nrays)`
    fn dims(&self) -> (usize, usize);

    /// Parameters to sample, in output layer order.
    fn params(&self) -> Vec<&PolarParam>;
}

impl Sampleable for PolarParam {
    fn kind(&self) -> SourceKind {
        SourceKind::Param
    }

    fn geo(&self) -> &ScanGeo {
        PolarParam::geo(self)
    }

    fn dims(&self) -> (usize, usize) {
        (self.nbins(), self.nrays())
    }

    fn params(&self) -> Vec<&PolarParam> {
        vec![self]
    }
}

impl Sampleable for PolarScan {
    fn kind(&self) -> SourceKind {
        SourceKind::Scan
    }

    fn geo(&self) -> &ScanGeo {
        PolarScan::geo(self)
    }

    fn dims(&self) -> (usize, usize) {
        (self.nbins(), self.nrays())
    }

    fn params(&self) -> Vec<&PolarParam> {
        PolarScan::params(self).collect()
    }
}
