//! Common utilities and types used throughout the topology configurator.
//!
//! This module provides the building blocks shared by every builder. It includes:
//! 1. **Address Ranges:** Half-open intervals of the global address map and coverage helpers.
//! 2. **Units:** Parsing of memory sizes such as `"512MB"`.
//! 3. **Parameters:** Component parameter values and the override resolver.
//! 4. **Error Handling:** Fatal configuration errors and batch structural errors.

/// Address range type and coverage helpers.
pub mod addr;

/// Error types for configuration, validation, and hand-off.
pub mod error;

/// Parameter values and the override resolver.
pub mod param;

/// Memory size parsing.
pub mod units;

pub use addr::AddrRange;
pub use error::{ConfigError, EngineError, StructuralError, Violation, WorkloadError};
pub use param::{Param, ParamDefault, ParamSet, Resolvable, resolve};
