//! Polar-to-Cartesian PPI resampling and multi-radar compositing
//!
//! This crate turns decoded polar radar scans into map-projected rasters:
//!
//! - **Sampling**: nearest-bin lookup on a grid in the radar's azimuthal
//!   equidistant projection
//! - **PPIs**: one raster layer per scan parameter plus geo metadata and a
//!   WGS84 bounding box
//! - **Composites**: element-wise maximum of several PPIs on one WGS84 grid
//!
//! # Architecture
//!
//! ```text
//! PolarScan / PolarParam (Sampleable)
//!      │
//!      ▼
//! sampler::sample(source, options)
//!      │
//!      ├─► Build grid over [-range_max, range_max]² or projected limits
//!      │
//!      ├─► Cell centre → (range, azimuth) → bin, once per cell (BinTable)
//!      │
//!      └─► BinTable applied to every parameter
//!               │
//!               ▼
//!          builder::build_ppi ──► Ppi
//!                                  │
//!                                  ▼
//!          composite::composite([Product], param) ──► Composite
//! ```
//!
//! # Example
//!
//! ```ignore
//! use ppi::{build_ppi, composite, CompositeOptions, PpiConfig, Product, SampleOptions};
//!
//! let config = PpiConfig::from_env();
//! let options = SampleOptions::from_config(&config);
//!
//! let a = build_ppi(volume_a.nearest_scan(0.5).unwrap(), &options, &config)?;
//! let b = build_ppi(volume_b.nearest_scan(0.5).unwrap(), &options, &config)?;
//!
//! let merged = composite(
//!     &[Product::from(a), Product::from(b)],
//!     "DBZH",
//!     &CompositeOptions::from_config(&config),
//!     &config,
//! )?;
//! let pixels = merged.raster().to_f32_nan();
//! ```

pub mod builder;
pub mod composite;
pub mod config;
pub mod product;
pub mod raster;
pub mod sampler;
pub mod source;

// Re-export commonly used types at crate root
pub use builder::{build_ppi, build_ppi_for, build_volume_ppi};
pub use composite::{composite, CompositeOptions};
pub use config::PpiConfig;
pub use product::{Composite, Contributor, Ppi, Product};
pub use raster::Raster;
pub use sampler::{sample, BinTable, SampleOptions, Sampled};
pub use source::{Sampleable, SourceKind};
