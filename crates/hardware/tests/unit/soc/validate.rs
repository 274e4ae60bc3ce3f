//! Topology Validator Tests.
//!
//! Each test starts from a well-formed topology, breaks one invariant, and
//! checks that the violation is reported by name alongside any others.

use crate::common::harness::{config_from, default_config};
use hbmcfg_core::common::{AddrRange, Param, ParamSet, Violation};
use hbmcfg_core::config::MemMode;
use hbmcfg_core::core::{self, FuOverrides};
use hbmcfg_core::soc::cache::{self, CacheParams, CacheTier};
use hbmcfg_core::soc::interconnect::{self, Crossbar, XBarRole};
use hbmcfg_core::soc::memory;
use hbmcfg_core::soc::system::{ClockDomain, ComponentKind, PortRole, System};
use hbmcfg_core::soc::validate::validate;

fn assembled() -> System {
    System::assemble(&default_config()).unwrap()
}

fn membus(system: &System) -> Crossbar {
    Crossbar {
        id: system.find_component("system.membus").unwrap(),
        role: XBarRole::SystemWide,
    }
}

// ══════════════════════════════════════════════════════════
// 1. Well-formed topologies
// ══════════════════════════════════════════════════════════

#[test]
fn default_topology_is_valid() {
    let system = assembled();
    assert_eq!(validate(&system), Ok(()));
    assert_eq!(system.validate(), Ok(()));
}

#[test]
fn cacheless_topology_is_valid() {
    let system = System::assemble(&config_from(r#"{ "caches": false }"#)).unwrap();
    assert_eq!(validate(&system), Ok(()));
}

// ══════════════════════════════════════════════════════════
// 2. Cache wiring (invariants 1 and 2)
// ══════════════════════════════════════════════════════════

#[test]
fn dangling_cache_ports_are_named() {
    let mut system = assembled();
    let root = system.root();
    let _ = cache::build(
        &mut system,
        CacheTier::L1Data,
        root,
        &CacheParams::for_tier(CacheTier::L1Data),
    );

    let err = validate(&system).unwrap_err();
    assert!(err.contains(&Violation::CacheCpuSideUnconnected {
        cache: "system.dcache".into(),
        port: "cpu_side".into(),
    }));
    assert!(err.contains(&Violation::CacheBusSideUnconnected {
        cache: "system.dcache".into(),
        port: "mem_side".into(),
    }));
    assert!(err.contains(&Violation::PortUnconnected {
        component: "system.dcache".into(),
        port: "mem_side".into(),
    }));
}

#[test]
fn l1_must_face_matching_core_port() {
    let mut system = assembled();
    let root = system.root();
    let stray = system.add_port(root, "stray", PortRole::Requestor);
    let icache = cache::build(
        &mut system,
        CacheTier::L1Instruction,
        root,
        &CacheParams::for_tier(CacheTier::L1Instruction),
    );
    icache.connect_cpu_side(&mut system, stray).unwrap();

    let err = validate(&system).unwrap_err();
    assert!(err.contains(&Violation::CacheCpuSideMismatch {
        cache: "system.icache".into(),
        port: "cpu_side".into(),
        peer: "system.stray".into(),
        expected: "a core's icache_port".into(),
    }));
}

#[test]
fn bus_side_must_reach_a_bus() {
    let mut system = assembled();
    let root = system.root();
    let sink = system.add_port(root, "sink", PortRole::Responder);
    let l2 = cache::build(&mut system, CacheTier::L2, root, &CacheParams::for_tier(CacheTier::L2));
    system.connect(l2.mem_side, sink).unwrap();

    let err = validate(&system).unwrap_err();
    assert!(err.contains(&Violation::CacheBusSideNotBus {
        cache: "system.l2cache".into(),
        port: "mem_side".into(),
        peer: "system.sink".into(),
    }));
}

// ══════════════════════════════════════════════════════════
// 3. Bus termination (invariant 3)
// ══════════════════════════════════════════════════════════

#[test]
fn bus_without_responder() {
    let mut system = System::assemble(&config_from(r#"{ "caches": false }"#)).unwrap();
    let _ = interconnect::create_crossbar(&mut system, XBarRole::PerCore);

    let err = validate(&system).unwrap_err();
    assert!(err.contains(&Violation::BusWithoutResponder {
        bus: "system.l2bus".into(),
    }));
}

#[test]
fn system_bus_must_reach_memory() {
    let mut system = System::new(
        ClockDomain {
            clock: "1GHz".into(),
            voltage: "1.0V".into(),
        },
        MemMode::Timing,
        vec![AddrRange::with_size(0x1000)],
    );
    let bus = interconnect::create_crossbar(&mut system, XBarRole::SystemWide);
    let (cpu, _) = core::build(&mut system, None, &FuOverrides::default(), &bus).unwrap();
    cpu.connect_to_bus(&mut system, &bus).unwrap();

    let err = validate(&system).unwrap_err();
    assert!(err.contains(&Violation::SystemBusMissingResponder {
        bus: "system.membus".into(),
        missing: "a memory controller".into(),
    }));
    assert!(err.contains(&Violation::RangeMismatch {
        declared: "[0x0, 0x1000)".into(),
        serviced: "<none>".into(),
    }));
    assert!(!err.contains(&Violation::SystemBusMissingResponder {
        bus: "system.membus".into(),
        missing: "an interrupt controller".into(),
    }));
}

// ══════════════════════════════════════════════════════════
// 4. Address coverage (invariant 4)
// ══════════════════════════════════════════════════════════

#[test]
fn controller_range_short_by_one_fails() {
    let mut system = assembled();
    let dram = system.find_component("system.mem_ctrl.dram").unwrap();
    let declared = system.mem_ranges[0];
    let _ = system.params_mut(dram).insert(
        "range".into(),
        Param::Range(AddrRange::new(declared.start, declared.end - 1)),
    );

    let err = validate(&system).unwrap_err();
    assert_eq!(err.violations.len(), 1);
    assert!(matches!(err.violations[0], Violation::RangeMismatch { .. }));
}

#[test]
fn declared_range_longer_by_one_fails() {
    let mut system = assembled();
    let declared = system.mem_ranges[0];
    system.mem_ranges = vec![AddrRange::new(declared.start, declared.end + 1)];
    assert!(matches!(
        validate(&system).unwrap_err().violations.as_slice(),
        [Violation::RangeMismatch { .. }]
    ));
}

#[test]
fn overlapping_controllers_fail() {
    let mut system = assembled();
    let bus = membus(&system);
    let extra = memory::build(&mut system, None, AddrRange::new(0, 0x1000)).unwrap();
    extra.connect(&mut system, &bus).unwrap();

    let err = validate(&system).unwrap_err();
    assert!(err.contains(&Violation::RangeOverlap {
        first: system.mem_ranges[0],
        second: AddrRange::new(0, 0x1000),
    }));
}

#[test]
fn controller_without_timing_model() {
    let mut system = assembled();
    let root = system.root();
    let bus = membus(&system);
    let bare = system.add_component("mem_ctrl1", ComponentKind::MemCtrl, "MemCtrl", Some(root), ParamSet::new());
    let port = system.add_port(bare, "port", PortRole::Responder);
    let _ = interconnect::attach(&mut system, &bus, port).unwrap();

    let err = validate(&system).unwrap_err();
    assert_eq!(
        err.violations,
        vec![Violation::MissingTimingModel {
            controller: "system.mem_ctrl1".into(),
        }]
    );
}

// ══════════════════════════════════════════════════════════
// 5. Interrupt path (invariant 5)
// ══════════════════════════════════════════════════════════

#[test]
fn second_interrupt_controller_fails() {
    let mut system = assembled();
    let cpu = system.find_component("system.cpu").unwrap();
    let _ = system.add_component(
        "interrupts[1]",
        ComponentKind::InterruptController,
        "X86LocalApic",
        Some(cpu),
        ParamSet::new(),
    );

    let err = validate(&system).unwrap_err();
    assert!(err.contains(&Violation::InterruptControllerCount {
        core: "system.cpu".into(),
        count: 2,
    }));
    assert!(err.contains(&Violation::InterruptPortUnconnected {
        controller: "system.cpu.interrupts[1]".into(),
        port: "pio".into(),
    }));
}

// ══════════════════════════════════════════════════════════
// 6. Batch reporting
// ══════════════════════════════════════════════════════════

#[test]
fn all_violations_reported_together() {
    let mut system = assembled();
    let root = system.root();
    let _ = system.add_port(root, "loose", PortRole::Requestor);
    let declared = system.mem_ranges[0];
    system.mem_ranges = vec![AddrRange::new(0, declared.end * 2)];

    let err = validate(&system).unwrap_err();
    assert_eq!(err.violations.len(), 2);
    let report = err.to_string();
    assert!(report.starts_with("topology has 2 structural violation(s):"));
    assert!(report.contains("system.loose is not connected"));
}
