//! System topology components.
//!
//! This module organizes everything the simulated system is assembled from:
//! the component graph, the catalogs of interchangeable variants, the cache,
//! interconnect and memory builders, the top-level builder, and the validator.

/// Top-level topology construction from a `Config`.
pub mod builder;

/// Cache tier builder.
pub mod cache;

/// Selector-keyed component catalogs.
pub mod catalog;

/// Crossbar construction and port attachment.
pub mod interconnect;

/// Memory controller and DRAM timing models.
pub mod memory;

/// Component and port arenas, and the root `System`.
pub mod system;

/// Structural invariant checks.
pub mod validate;

pub use system::System;
