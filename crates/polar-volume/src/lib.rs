//! Polar radar data model.
//!
//! A [`PolarVolume`] holds the elevation sweeps ([`PolarScan`]) of one radar
//! at one nominal time; each scan holds named parameter grids
//! ([`PolarParam`]) already decoded to physical units. Raw samples from the
//! file decoder are turned into [`CellValue`](radar_common::CellValue)s
//! once, at construction, using the parameter's [`Encoding`].
//!
//! ```text
//! ScanInput (raw samples + gain/offset/nodata/undetect)
//!      │
//!      ▼
//! VolumeBuilder::build()
//!      │
//!      ├─► ScanGeo built once per scan, shared via Arc
//!      │
//!      └─► PolarParam::decode() for every parameter
//! ```

pub mod encoding;
pub mod param;
pub mod scan;
pub mod volume;

pub use encoding::Encoding;
pub use param::PolarParam;
pub use scan::{ParamInput, PolarScan, ScanInput};
pub use volume::{Attributes, PolarVolume, VolumeBuilder};
