//! Configuration surface for the topology configurator.
//!
//! This module defines the flat set of named overrides a run accepts. It provides:
//! 1. **Defaults:** Documented baseline values used when an override is absent or empty.
//! 2. **Structure:** `Config`, every field optional, deserialized from JSON.
//! 3. **Enums:** Memory access mode.
//!
//! Overrides are resolved by the builders with [`crate::common::resolve`]; nothing here
//! interprets or validates the values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::{ConfigError, Resolvable};

/// Default configuration constants.
///
/// These values define the baseline system when not explicitly overridden.
/// CPU functional-unit latencies are defaults of the individual CPU styles and
/// live in the CPU catalog instead.
pub mod defaults {
    /// Workload binary executed when none is given.
    pub const BINARY: &str = "tests/test-progs/hello/bin/x86/linux/hello";

    /// Whether the two-level cache hierarchy is built.
    pub const CACHES: bool = true;

    /// L1 instruction cache size.
    pub const L1I_SIZE: &str = "16kB";

    /// L1 data cache size.
    pub const L1D_SIZE: &str = "64kB";

    /// Unified L2 cache size.
    pub const L2_SIZE: &str = "256kB";

    /// System clock frequency.
    pub const CLOCK: &str = "1GHz";

    /// Voltage of the system voltage domain.
    pub const VOLTAGE: &str = "1.0V";

    /// CPU style selector.
    pub const CPU: &str = "TimingSimpleCPU";

    /// DRAM timing-model selector.
    pub const MEMORY: &str = "DDR3_1600_8x8";

    /// Size of the single declared physical memory range, starting at address 0.
    pub const MEM_SIZE: &str = "512MB";
}

/// Memory access mode of the simulated system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemMode {
    /// Timing accesses with queueing and contention; required by all CPU styles.
    #[default]
    Timing,
    /// Atomic accesses with fixed latency estimates.
    Atomic,
}

impl Resolvable for MemMode {}

/// Flat set of optional overrides for one configuration run.
///
/// Every field is optional; an absent (or empty string) field resolves to the
/// matching constant in [`defaults`] or to the selected catalog variant's default.
///
/// # Examples
///
/// ```
/// use hbmcfg_core::config::Config;
///
/// let config = Config::from_json_str(r#"{ "l2_size": "512kB", "memory": "HBM_1000_4H_1x64" }"#).unwrap();
/// assert_eq!(config.l2_size.as_deref(), Some("512kB"));
/// assert_eq!(config.cpu, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path of the binary to execute.
    pub binary: Option<String>,
    /// Arguments passed to the binary after its path.
    pub args: Vec<String>,
    /// Build the L1/L2 cache hierarchy; `false` wires the core straight to the system bus.
    pub caches: Option<bool>,
    /// L1 instruction cache size.
    pub l1i_size: Option<String>,
    /// L1 data cache size.
    pub l1d_size: Option<String>,
    /// L2 cache size.
    pub l2_size: Option<String>,
    /// System clock frequency.
    pub clock: Option<String>,
    /// System voltage.
    pub voltage: Option<String>,
    /// CPU style selector (e.g. `"MinorCPU"`).
    pub cpu: Option<String>,
    /// DRAM timing-model selector (e.g. `"HBM_1000_4H_1x64"`).
    pub memory: Option<String>,
    /// Size of the declared memory range.
    pub mem_size: Option<String>,
    /// Memory access mode.
    pub mem_mode: Option<MemMode>,
    /// Operation latency of the floating-point/SIMD functional unit.
    pub fpu_operation_latency: Option<u32>,
    /// Issue latency of the floating-point/SIMD functional unit.
    pub fpu_issue_latency: Option<u32>,
    /// Operation latency of the integer functional unit.
    pub intfu_operation_latency: Option<u32>,
}

impl Config {
    /// Parses a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a JSON file whose keys are `Config` field names.
    ///
    /// # Returns
    ///
    /// The parsed configuration, or `ConfigError::Io` / `ConfigError::Json`.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Layers `overrides` on top of `self`; every field set in `overrides` wins.
    ///
    /// Used by the CLI so flags take precedence over a configuration file.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            binary: overrides.binary.or(self.binary),
            args: if overrides.args.is_empty() {
                self.args
            } else {
                overrides.args
            },
            caches: overrides.caches.or(self.caches),
            l1i_size: overrides.l1i_size.or(self.l1i_size),
            l1d_size: overrides.l1d_size.or(self.l1d_size),
            l2_size: overrides.l2_size.or(self.l2_size),
            clock: overrides.clock.or(self.clock),
            voltage: overrides.voltage.or(self.voltage),
            cpu: overrides.cpu.or(self.cpu),
            memory: overrides.memory.or(self.memory),
            mem_size: overrides.mem_size.or(self.mem_size),
            mem_mode: overrides.mem_mode.or(self.mem_mode),
            fpu_operation_latency: overrides.fpu_operation_latency.or(self.fpu_operation_latency),
            fpu_issue_latency: overrides.fpu_issue_latency.or(self.fpu_issue_latency),
            intfu_operation_latency: overrides
                .intfu_operation_latency
                .or(self.intfu_operation_latency),
        }
    }
}
