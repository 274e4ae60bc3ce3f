//! Workload binding and engine hand-off.
//!
//! Provides the two external boundaries of a configuration run (the workload
//! binder and the simulation engine) and the driver that sequences them.

/// Simulation engine contract and the configuration-dump engine.
pub mod engine;

/// Workload binder contract and the syscall-emulation binder.
pub mod loader;

/// Run driver.
pub mod simulator;

pub use engine::{ConfigDumpEngine, ExitEvent, Root, SimulationEngine};
pub use loader::{SeWorkloadBinder, WorkloadBinder, WorkloadBinding};
pub use simulator::Simulator;
