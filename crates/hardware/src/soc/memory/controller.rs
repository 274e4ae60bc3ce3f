//! Memory controller component.
//!
//! The controller owns the single responder port the system bus reaches
//! memory through, and the scheduling parameters shared by every timing model.

use crate::common::{ParamDefault, param::param_set};
use crate::soc::system::{ComponentId, ComponentKind, PortId, PortRole, System};

/// Instance name of the controller under the root.
pub const INSTANCE_NAME: &str = "mem_ctrl";

/// Class name recorded as the controller's model.
pub const MODEL_NAME: &str = "MemCtrl";

/// Name of the controller's bus-facing port.
pub const PORT_NAME: &str = "port";

/// Instance name of the bound timing model, relative to the controller.
pub const TIMING_MODEL_NAME: &str = "dram";

const SCHEDULING: &[(&str, ParamDefault)] = &[
    ("write_high_thresh_perc", ParamDefault::Int(85)),
    ("write_low_thresh_perc", ParamDefault::Int(50)),
    ("min_writes_per_switch", ParamDefault::Int(16)),
    ("mem_sched_policy", ParamDefault::Str("frfcfs")),
    ("static_frontend_latency", ParamDefault::Str("10ns")),
    ("static_backend_latency", ParamDefault::Str("10ns")),
];

/// Creates the controller and its unconnected responder port.
///
/// # Returns
///
/// `(controller, port)`.
pub fn create(system: &mut System) -> (ComponentId, PortId) {
    let root = system.root();
    let id = system.add_component(
        INSTANCE_NAME,
        ComponentKind::MemCtrl,
        MODEL_NAME,
        Some(root),
        param_set(SCHEDULING),
    );
    let port = system.add_port(id, PORT_NAME, PortRole::Responder);
    (id, port)
}
