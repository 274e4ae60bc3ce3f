//! Simulator driver: build, bind, hand off, run.
//!
//! The driver owns a workload binder and an engine and performs one complete
//! configuration run per call. Nothing reaches the engine unless the topology
//! validated and the workload bound.

use std::path::Path;

use tracing::info;

use crate::common::{ConfigError, resolve};
use crate::config::{Config, defaults};
use crate::sim::engine::{ExitEvent, Root, SimulationEngine};
use crate::sim::loader::WorkloadBinder;
use crate::soc::System;

/// Top-level driver over a workload binder and a simulation engine.
#[derive(Debug)]
pub struct Simulator<B, E> {
    /// Attaches the workload after validation.
    pub binder: B,
    /// Receives the hand-off.
    pub engine: E,
}

impl<B: WorkloadBinder, E: SimulationEngine> Simulator<B, E> {
    /// Creates a driver.
    pub const fn new(binder: B, engine: E) -> Self {
        Self { binder, engine }
    }

    /// Builds, validates, and binds the workload, returning the hand-off root.
    ///
    /// # Returns
    ///
    /// The root ready for `instantiate`, or the first fatal error.
    pub fn prepare(&self, config: &Config) -> Result<Root, ConfigError> {
        let mut system = System::build(config)?;
        let binary = resolve(config.binary.as_deref(), defaults::BINARY);
        self.binder
            .bind(&mut system, Path::new(binary), &config.args)?;
        Ok(Root::new(system))
    }

    /// Hands a prepared root to the engine and runs it.
    ///
    /// The system is validated again first; an invalid topology never
    /// reaches the engine.
    ///
    /// # Returns
    ///
    /// The engine's exit event, `ConfigError::Structural`, or the engine's error.
    pub fn launch(&mut self, root: &Root) -> Result<ExitEvent, ConfigError> {
        root.system.validate()?;
        self.engine.instantiate(root)?;

        info!("Beginning simulation");
        let exit = self.engine.run()?;
        info!("{exit}");
        Ok(exit)
    }

    /// Performs one complete run.
    ///
    /// # Arguments
    ///
    /// * `config` - The run's overrides.
    ///
    /// # Returns
    ///
    /// The engine's exit event, or the first fatal error. On error the engine
    /// has not been instantiated unless the error came from the engine itself.
    pub fn run(&mut self, config: &Config) -> Result<ExitEvent, ConfigError> {
        let root = self.prepare(config)?;
        self.launch(&root)
    }
}
