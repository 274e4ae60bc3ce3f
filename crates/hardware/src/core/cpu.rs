//! CPU style catalog.
//!
//! This module registers the interchangeable processor models. It provides:
//! 1. **Styles:** Blocking single-issue, pipelined in-order, and out-of-order superscalar.
//! 2. **Defaults:** Each style's default parameter set, including functional-unit latencies where modeled.
//! 3. **Catalog:** `CPU_CATALOG`, keyed by the selector names users pass (`TimingSimpleCPU`, ...).

use serde::Serialize;

use crate::common::ParamDefault;
use crate::soc::catalog::{Catalog, CatalogEntry};

/// Operation latency of the floating-point/SIMD functional unit.
pub const FPU_OPERATION_LATENCY: &str = "fpu_operation_latency";

/// Issue latency of the floating-point/SIMD functional unit.
pub const FPU_ISSUE_LATENCY: &str = "fpu_issue_latency";

/// Operation latency of the integer functional unit.
pub const INTFU_OPERATION_LATENCY: &str = "intfu_operation_latency";

/// Microarchitectural style of a core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CpuStyle {
    /// Single-issue, blocks on every memory access.
    TimingSimple,
    /// Single-issue, pipelined, in-order.
    Minor,
    /// Out-of-order superscalar.
    O3,
}

impl CpuStyle {
    /// Returns `true` if the style models individual functional units and
    /// therefore accepts functional-unit latency overrides.
    pub const fn models_functional_units(self) -> bool {
        matches!(self, Self::Minor | Self::O3)
    }
}

/// A catalog variant: style plus its default parameters.
#[derive(Debug)]
pub struct CpuModel {
    /// Microarchitectural style.
    pub style: CpuStyle,
    /// Default parameter set applied before overrides.
    pub defaults: &'static [(&'static str, ParamDefault)],
}

const COMMON_REQUIRED: &[&str] = &["cpu_id", "num_threads"];

const FU_REQUIRED: &[&str] = &[
    "cpu_id",
    "num_threads",
    FPU_OPERATION_LATENCY,
    FPU_ISSUE_LATENCY,
    INTFU_OPERATION_LATENCY,
];

const TIMING_SIMPLE_DEFAULTS: &[(&str, ParamDefault)] = &[
    ("cpu_id", ParamDefault::Int(0)),
    ("num_threads", ParamDefault::Int(1)),
    ("max_insts_any_thread", ParamDefault::Int(0)),
];

const MINOR_DEFAULTS: &[(&str, ParamDefault)] = &[
    ("cpu_id", ParamDefault::Int(0)),
    ("num_threads", ParamDefault::Int(1)),
    ("fetch1_fetch_limit", ParamDefault::Int(1)),
    ("fetch2_input_buffer_size", ParamDefault::Int(2)),
    ("decode_input_width", ParamDefault::Int(2)),
    ("execute_input_width", ParamDefault::Int(2)),
    ("execute_issue_limit", ParamDefault::Int(2)),
    ("execute_commit_limit", ParamDefault::Int(2)),
    (FPU_OPERATION_LATENCY, ParamDefault::Int(6)),
    (FPU_ISSUE_LATENCY, ParamDefault::Int(1)),
    (INTFU_OPERATION_LATENCY, ParamDefault::Int(3)),
];

const O3_DEFAULTS: &[(&str, ParamDefault)] = &[
    ("cpu_id", ParamDefault::Int(0)),
    ("num_threads", ParamDefault::Int(1)),
    ("fetch_width", ParamDefault::Int(8)),
    ("decode_width", ParamDefault::Int(8)),
    ("rename_width", ParamDefault::Int(8)),
    ("issue_width", ParamDefault::Int(8)),
    ("commit_width", ParamDefault::Int(8)),
    ("num_rob_entries", ParamDefault::Int(192)),
    ("num_iq_entries", ParamDefault::Int(64)),
    ("lq_entries", ParamDefault::Int(32)),
    ("sq_entries", ParamDefault::Int(32)),
    (FPU_OPERATION_LATENCY, ParamDefault::Int(4)),
    (FPU_ISSUE_LATENCY, ParamDefault::Int(1)),
    (INTFU_OPERATION_LATENCY, ParamDefault::Int(1)),
];

const CPU_ENTRIES: &[CatalogEntry<CpuModel>] = &[
    CatalogEntry {
        name: "TimingSimpleCPU",
        variant: CpuModel {
            style: CpuStyle::TimingSimple,
            defaults: TIMING_SIMPLE_DEFAULTS,
        },
        required_params: COMMON_REQUIRED,
    },
    CatalogEntry {
        name: "MinorCPU",
        variant: CpuModel {
            style: CpuStyle::Minor,
            defaults: MINOR_DEFAULTS,
        },
        required_params: FU_REQUIRED,
    },
    CatalogEntry {
        name: "O3CPU",
        variant: CpuModel {
            style: CpuStyle::O3,
            defaults: O3_DEFAULTS,
        },
        required_params: FU_REQUIRED,
    },
];

/// Registered CPU styles, selected by the `cpu` override.
pub static CPU_CATALOG: Catalog<CpuModel> = Catalog::new("CPU", CPU_ENTRIES, 0);
