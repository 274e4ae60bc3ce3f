//! Simulation topology configurator library.
//!
//! This crate assembles a fully wired simulated system from a small set of
//! overrides and hands it to a simulation engine. It provides:
//! 1. **Common:** Address ranges, size parsing, parameters, and error types.
//! 2. **Configuration:** The flat override surface and its defaults.
//! 3. **Core:** CPU style catalog, core assembly, and the interrupt controller.
//! 4. **SoC:** Component graph, catalogs, cache/interconnect/memory builders, and validation.
//! 5. **Simulation:** Workload binding, the engine boundary, and the run driver.
//! 6. **Statistics:** Structural summary of an assembled topology.

/// Common types (address ranges, parameters, errors).
pub mod common;
/// Configuration overrides and defaults.
pub mod config;
/// Core assembly and the CPU catalog.
pub mod core;
/// Workload binding, engine hand-off, and the driver.
pub mod sim;
/// Topology graph, builders, and validation.
pub mod soc;
/// Topology statistics.
pub mod stats;

/// Flat override set; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Root aggregate of an assembled topology; construct with `System::build`.
pub use crate::soc::System;
