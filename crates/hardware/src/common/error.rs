//! Configuration error definitions.
//!
//! This module defines the error handling for the configurator. It provides:
//! 1. **Fatal configuration errors:** `ConfigError`, returned by every builder and the driver.
//! 2. **Structural errors:** `StructuralError`, the batch of every invariant the validator found violated.
//! 3. **Boundary errors:** `WorkloadError` and `EngineError` for the binder and engine hand-offs.
//!
//! Defaulting events (unknown selectors) are not errors; see [`crate::soc::catalog::DefaultingEvent`].

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::addr::AddrRange;
use crate::soc::system::PortRole;

/// Fatal error that aborts a configuration run before hand-off.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The memory controller was asked to service an empty or negative-width range.
    #[error("malformed address range {0}: width must be positive")]
    MalformedRange(AddrRange),

    /// A memory size string could not be parsed.
    #[error("invalid memory size '{0}'")]
    InvalidSize(String),

    /// A wiring call targeted a port that already has a peer.
    #[error("port {port} is already connected to {peer}")]
    PortInUse {
        /// Fully qualified name of the port that was already connected.
        port: String,
        /// Fully qualified name of its existing peer.
        peer: String,
    },

    /// A wiring call tried to join two ports of the same direction.
    #[error("cannot connect {from} to {to}: both ports are {role}s")]
    RoleMismatch {
        /// First port of the attempted connection.
        from: String,
        /// Second port of the attempted connection.
        to: String,
        /// The role both ports share.
        role: PortRole,
    },

    /// A catalog variant was constructed without one of its required parameters.
    #[error("{component} ({model}) is missing required parameter '{param}'")]
    MissingParameter {
        /// Instance name of the component.
        component: String,
        /// Catalog model name.
        model: String,
        /// The missing parameter.
        param: String,
    },

    /// The assembled graph violates one or more structural invariants.
    #[error(transparent)]
    Structural(#[from] StructuralError),

    /// The workload could not be bound to the system.
    #[error(transparent)]
    Workload(#[from] WorkloadError),

    /// The simulation engine rejected the hand-off.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A configuration file is not valid JSON for `Config`.
    #[error("failed to parse configuration {path}: {source}")]
    Json {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// One violated structural invariant, naming the component and port involved.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Violation {
    /// A cache's CPU-side port has no upstream consumer.
    #[error("{cache}.{port} is not connected to an upstream consumer")]
    CacheCpuSideUnconnected {
        /// Cache instance name.
        cache: String,
        /// Port name on the cache.
        port: String,
    },

    /// A cache's CPU-side port is connected to the wrong kind of upstream port.
    #[error("{cache}.{port} is connected to {peer}, expected {expected}")]
    CacheCpuSideMismatch {
        /// Cache instance name.
        cache: String,
        /// Port name on the cache.
        port: String,
        /// Fully qualified name of the actual peer.
        peer: String,
        /// Description of the expected peer.
        expected: String,
    },

    /// A cache's bus-side port is not connected.
    #[error("{cache}.{port} is not connected to a bus")]
    CacheBusSideUnconnected {
        /// Cache instance name.
        cache: String,
        /// Port name on the cache.
        port: String,
    },

    /// A cache's bus-side port is connected to something other than a bus.
    #[error("{cache}.{port} is connected to {peer}, which is not a bus")]
    CacheBusSideNotBus {
        /// Cache instance name.
        cache: String,
        /// Port name on the cache.
        port: String,
        /// Fully qualified name of the actual peer.
        peer: String,
    },

    /// A bus has no connected downstream responder.
    #[error("bus {bus} has no downstream responder")]
    BusWithoutResponder {
        /// Bus instance name.
        bus: String,
    },

    /// The system-wide bus does not reach a required responder.
    #[error("system bus {bus} does not reach {missing}")]
    SystemBusMissingResponder {
        /// Bus instance name.
        bus: String,
        /// Description of the unreachable responder.
        missing: String,
    },

    /// A memory controller has no timing model bound to it.
    #[error("memory controller {controller} has no timing model")]
    MissingTimingModel {
        /// Controller instance name.
        controller: String,
    },

    /// The serviced ranges do not equal the declared ranges.
    #[error("memory controllers service {serviced}, but the system declares {declared}")]
    RangeMismatch {
        /// Declared address map, formatted.
        declared: String,
        /// Serviced address map, formatted.
        serviced: String,
    },

    /// Two memory controllers service overlapping ranges.
    #[error("memory controller ranges {first} and {second} overlap")]
    RangeOverlap {
        /// First overlapping range.
        first: AddrRange,
        /// Second overlapping range.
        second: AddrRange,
    },

    /// A core does not have exactly one interrupt controller.
    #[error("core {core} has {count} interrupt controllers, expected exactly one")]
    InterruptControllerCount {
        /// Core instance name.
        core: String,
        /// Number of interrupt controllers found.
        count: usize,
    },

    /// An interrupt controller port is not connected.
    #[error("{controller}.{port} is not connected")]
    InterruptPortUnconnected {
        /// Interrupt controller instance name.
        controller: String,
        /// Port name on the interrupt controller.
        port: String,
    },

    /// A port is left unconnected.
    #[error("{component}.{port} is not connected")]
    PortUnconnected {
        /// Owning component instance name.
        component: String,
        /// Port name.
        port: String,
    },
}

/// Every structural invariant violated by an assembled system.
///
/// The validator collects all violations before failing, so a single report
/// names each independent wiring mistake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructuralError {
    /// The violations, in discovery order.
    pub violations: Vec<Violation>,
}

impl StructuralError {
    /// Returns `true` if `violation` is among the reported violations.
    pub fn contains(&self, violation: &Violation) -> bool {
        self.violations.contains(violation)
    }
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "topology has {} structural violation(s):",
            self.violations.len()
        )?;
        for violation in &self.violations {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for StructuralError {}

/// Failure while binding the workload to the system.
#[derive(Debug, Error)]
pub enum WorkloadError {
    /// The binary could not be read from disk.
    #[error("could not read binary '{path}': {source}")]
    Read {
        /// Path of the binary.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The binary is not an object file the binder understands.
    #[error("'{path}' is not a loadable executable: {reason}")]
    Format {
        /// Path of the binary.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },

    /// The system has no core to run a thread on.
    #[error("system has no core to bind the workload to")]
    NoCore,

    /// A workload was already bound; binding happens exactly once per run.
    #[error("a workload is already bound to this system")]
    AlreadyBound,
}

/// Failure at the simulation-engine boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// `instantiate` was called more than once.
    #[error("system has already been instantiated")]
    AlreadyInstantiated,

    /// `run` was called before `instantiate`.
    #[error("run requested before instantiate")]
    NotInstantiated,

    /// The engine could not write its output.
    #[error("engine output error at {path}: {source}")]
    Output {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The instantiated configuration could not be serialized.
    #[error("failed to serialize instantiated configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}
