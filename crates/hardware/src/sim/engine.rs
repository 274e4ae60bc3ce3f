//! Simulation engine boundary.
//!
//! The engine receives the finished topology wrapped in a `Root` and is driven
//! through two calls: `instantiate` once, then `run`. Execution itself lives
//! outside this crate; `ConfigDumpEngine` is the built-in engine that records
//! the instantiated configuration and exits immediately.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::common::EngineError;
use crate::soc::System;

/// File the dump engine writes inside its output directory.
pub const CONFIG_DUMP_FILE: &str = "config.json";

/// Top of the hand-off: the system plus the simulation mode.
#[derive(Debug, Serialize)]
pub struct Root {
    /// `false` for syscall emulation; full-system simulation is not configured here.
    pub full_system: bool,
    /// The validated, workload-bound system.
    pub system: System,
}

impl Root {
    /// Wraps a system for syscall-emulation hand-off.
    pub const fn new(system: System) -> Self {
        Self {
            full_system: false,
            system,
        }
    }
}

/// Why and when a run stopped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExitEvent {
    /// Simulated tick at exit.
    pub tick: u64,
    /// Human-readable exit cause.
    pub cause: String,
}

impl fmt::Display for ExitEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Exiting @ tick {} because {}", self.tick, self.cause)
    }
}

/// Narrow contract to the event-driven simulation engine.
pub trait SimulationEngine {
    /// Builds engine-side objects for `root`. Called exactly once.
    fn instantiate(&mut self, root: &Root) -> Result<(), EngineError>;

    /// Runs until the engine decides to stop.
    fn run(&mut self) -> Result<ExitEvent, EngineError>;
}

/// Engine that serializes the instantiated configuration and stops at tick 0.
#[derive(Debug)]
pub struct ConfigDumpEngine {
    out_dir: PathBuf,
    dumped: Option<PathBuf>,
}

impl ConfigDumpEngine {
    /// Exit cause reported by [`SimulationEngine::run`].
    pub const EXIT_CAUSE: &'static str = "configuration dumped; no execution backend attached";

    /// Creates an engine writing into `out_dir` (created on instantiate).
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            dumped: None,
        }
    }

    /// Path of the written dump, once instantiated.
    pub fn dump_path(&self) -> Option<&Path> {
        self.dumped.as_deref()
    }
}

impl SimulationEngine for ConfigDumpEngine {
    fn instantiate(&mut self, root: &Root) -> Result<(), EngineError> {
        if self.dumped.is_some() {
            return Err(EngineError::AlreadyInstantiated);
        }
        fs::create_dir_all(&self.out_dir).map_err(|source| EngineError::Output {
            path: self.out_dir.clone(),
            source,
        })?;
        let path = self.out_dir.join(CONFIG_DUMP_FILE);
        let json = serde_json::to_string_pretty(root)?;
        fs::write(&path, json).map_err(|source| EngineError::Output {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "instantiated configuration written");
        self.dumped = Some(path);
        Ok(())
    }

    fn run(&mut self) -> Result<ExitEvent, EngineError> {
        if self.dumped.is_none() {
            return Err(EngineError::NotInstantiated);
        }
        Ok(ExitEvent {
            tick: 0,
            cause: Self::EXIT_CAUSE.to_string(),
        })
    }
}
