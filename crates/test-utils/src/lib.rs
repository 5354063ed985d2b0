//! Test support shared by the radar crates.
//!
//! Integration tests pull in:
//! - synthetic scans and volumes with predictable bin values ([`generators`])
//! - real radar sites, scan geometries and a nominal time ([`fixtures`])
//! - float, coordinate and cell-value assertions ([`assertions`])
//! - [`init_test_logging`] to see `tracing` output with `RUST_LOG`
//!
//! Only use it from `tests/` directories: the data-model crates list it as
//! a dev-dependency while it depends on them.
//!
//! ```ignore
//! use test_utils::{create_ring_scan, geometry, sites};
//!
//! let scan = create_ring_scan(sites::de_bilt(), 0.5, geometry::STANDARD, "DBZH");
//! ```

pub mod assertions;
pub mod fixtures;
pub mod generators;

pub use fixtures::*;
pub use generators::*;

#[doc(hidden)]
pub use radar_common as __radar_common;

use std::sync::Once;

static INIT_LOGGING: Once = Once::new();

/// Install a `tracing` subscriber writing to the test harness output.
///
/// Honors `RUST_LOG` and defaults to `warn`. Calling it from every test is fine.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
