//! Memory subsystem builder.
//!
//! This module constructs the main memory behind the system bus. It provides:
//! 1. **Controller:** A `MemCtrl` component with one bus-facing responder port.
//! 2. **Timing models:** A catalog of DRAM interface standards, selected by name.
//! 3. **Address binding:** Binding the timing model to the address range it services.
//!
//! Exactly one timing model is bound per controller; an unknown selector falls
//! back to `DDR3_1600_8x8` with a recorded defaulting event.

/// Memory controller component.
pub mod controller;

/// DRAM timing-model catalog.
pub mod dram;

use tracing::info;

use crate::common::{AddrRange, ConfigError, Param, ParamSet};
use crate::soc::interconnect::{self, Crossbar};
use crate::soc::system::{ComponentId, ComponentKind, PortId, System};

pub use self::dram::{DRAM_CATALOG, DramTiming};

/// Handle to a constructed memory subsystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemorySubsystem {
    /// The controller component.
    pub controller: ComponentId,
    /// The bound timing model.
    pub timing_model: ComponentId,
    /// The controller's bus-facing responder port.
    pub port: PortId,
    /// Address range the controller services.
    pub range: AddrRange,
    /// The selected timing model.
    pub timing: DramTiming,
}

/// Builds a memory controller servicing `range` with the selected timing model.
///
/// # Arguments
///
/// * `system` - The system that will own the controller.
/// * `selector` - DRAM model name; absent, empty, or unknown selects the default.
/// * `range` - The address range to service.
///
/// # Returns
///
/// The subsystem handle, or `ConfigError::MalformedRange` if `range` has no
/// positive width. Nothing is added to the system in that case.
pub fn build(
    system: &mut System,
    selector: Option<&str>,
    range: AddrRange,
) -> Result<MemorySubsystem, ConfigError> {
    if range.is_empty() {
        return Err(ConfigError::MalformedRange(range));
    }

    let selection = DRAM_CATALOG.lookup(selector);
    if let Some(event) = selection.fallback {
        system.record_default(event);
    }
    let entry = selection.entry;

    let (controller, port) = controller::create(system);

    let mut params = ParamSet::new();
    for (name, value) in entry.variant.params() {
        let _ = params.insert(name.to_string(), value);
    }
    let _ = params.insert("range".into(), range.into());
    entry.check_required(controller::TIMING_MODEL_NAME, &params)?;

    let timing_model = system.add_component(
        controller::TIMING_MODEL_NAME,
        ComponentKind::TimingModel,
        entry.name,
        Some(controller),
        params,
    );
    info!(
        model = entry.name,
        range = %range,
        peak_bandwidth = entry.variant.peak_bandwidth(),
        "memory subsystem built"
    );

    Ok(MemorySubsystem {
        controller,
        timing_model,
        port,
        range,
        timing: entry.variant,
    })
}

impl MemorySubsystem {
    /// Attaches the controller's port to the memory side of `bus`.
    pub fn connect(&self, system: &mut System, bus: &Crossbar) -> Result<(), ConfigError> {
        interconnect::attach(system, bus, self.port).map(|_| ())
    }
}

/// Address range a controller services, read from its bound timing model.
///
/// Returns `None` if the controller has no timing model or the model carries
/// no `range` parameter.
pub fn serviced_range(system: &System, controller: ComponentId) -> Option<AddrRange> {
    system
        .children(controller)
        .find(|c| c.kind == ComponentKind::TimingModel)
        .and_then(|model| model.params.get("range"))
        .and_then(Param::as_range)
}
