//! Workload binding.
//!
//! This module attaches a syscall-emulation workload to a validated system. It performs:
//! 1. **Identification:** Reads the binary and identifies its object format, architecture, and entry point.
//! 2. **Process image:** Builds the process descriptor whose command line is the binary followed by its arguments.
//! 3. **Threads:** Creates one thread context per core.
//!
//! Binding happens once per run, after validation and before hand-off.

use std::fs;
use std::path::{Path, PathBuf};

use object::Object;
use serde::Serialize;
use tracing::info;

use crate::common::WorkloadError;
use crate::soc::system::{ComponentKind, System};

/// Process identifier given to the workload's process.
pub const DEFAULT_PID: u32 = 100;

/// Boundary through which a workload is attached to a system.
pub trait WorkloadBinder {
    /// Sets the workload descriptor and process image on `system` and creates
    /// at least one thread bound to each core.
    ///
    /// # Arguments
    ///
    /// * `system` - A validated system with no workload bound yet.
    /// * `binary` - Path of the executable.
    /// * `args` - Arguments following the executable on the command line.
    fn bind(&self, system: &mut System, binary: &Path, args: &[String]) -> Result<(), WorkloadError>;
}

/// Syscall-emulation workload descriptor, as identified from the binary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeWorkload {
    /// Path of the executable.
    pub binary: PathBuf,
    /// Object file format (e.g. `Elf`).
    pub format: String,
    /// Target architecture (e.g. `X86_64`).
    pub architecture: String,
    /// Entry point address.
    pub entry: u64,
}

/// Process image of the workload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Process {
    /// Process identifier.
    pub pid: u32,
    /// Command line: the binary path followed by its arguments.
    pub cmd: Vec<String>,
    /// Path of the executable.
    pub executable: PathBuf,
}

/// A hardware thread context running the process on one core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ThreadContext {
    /// Fully qualified name of the core.
    pub core: String,
    /// Thread index within that core.
    pub thread_id: u32,
}

/// Everything the binder attaches to a system.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WorkloadBinding {
    /// Workload descriptor.
    pub workload: SeWorkload,
    /// Process image.
    pub process: Process,
    /// Thread contexts, one per core.
    pub threads: Vec<ThreadContext>,
}

/// Default binder: reads the binary from disk and identifies it with `object`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeWorkloadBinder;

impl SeWorkloadBinder {
    /// Identifies the object file at `binary`.
    ///
    /// # Returns
    ///
    /// The workload descriptor, or `WorkloadError::Read` / `WorkloadError::Format`.
    pub fn identify(binary: &Path) -> Result<SeWorkload, WorkloadError> {
        let data = fs::read(binary).map_err(|source| WorkloadError::Read {
            path: binary.to_path_buf(),
            source,
        })?;
        let file = object::File::parse(&*data).map_err(|e| WorkloadError::Format {
            path: binary.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(SeWorkload {
            binary: binary.to_path_buf(),
            format: format!("{:?}", file.format()),
            architecture: format!("{:?}", file.architecture()),
            entry: file.entry(),
        })
    }
}

impl WorkloadBinder for SeWorkloadBinder {
    fn bind(&self, system: &mut System, binary: &Path, args: &[String]) -> Result<(), WorkloadError> {
        if system.workload().is_some() {
            return Err(WorkloadError::AlreadyBound);
        }
        let workload = Self::identify(binary)?;
        let binding = bind_process(system, workload, args)?;
        system
            .set_workload(binding)
            .map_err(|_| WorkloadError::AlreadyBound)
    }
}

/// Builds the process image and one thread per core for `workload`.
///
/// Shared by every binder that has already identified its workload.
pub fn bind_process(
    system: &System,
    workload: SeWorkload,
    args: &[String],
) -> Result<WorkloadBinding, WorkloadError> {
    let threads: Vec<ThreadContext> = system
        .components_where(|k| k == ComponentKind::Cpu)
        .map(|core| ThreadContext {
            core: core.name.clone(),
            thread_id: 0,
        })
        .collect();
    if threads.is_empty() {
        return Err(WorkloadError::NoCore);
    }

    let mut cmd = vec![workload.binary.display().to_string()];
    cmd.extend(args.iter().cloned());
    let process = Process {
        pid: DEFAULT_PID,
        cmd,
        executable: workload.binary.clone(),
    };
    info!(
        binary = %workload.binary.display(),
        arch = %workload.architecture,
        entry = %format!("{:#x}", workload.entry),
        threads = threads.len(),
        "workload bound"
    );
    Ok(WorkloadBinding {
        workload,
        process,
        threads,
    })
}
