//! Component Graph Tests.
//!
//! Verifies name qualification and the one-peer, opposite-role connection rule.

use crate::common::harness::{build, default_config};
use hbmcfg_core::common::{AddrRange, ConfigError, ParamSet};
use hbmcfg_core::config::MemMode;
use hbmcfg_core::soc::system::{ClockDomain, ComponentKind, PortRole, System};

fn empty_system() -> System {
    System::new(
        ClockDomain {
            clock: "1GHz".into(),
            voltage: "1.0V".into(),
        },
        MemMode::Timing,
        vec![AddrRange::with_size(0x1000)],
    )
}

#[test]
fn root_component_exists() {
    let system = empty_system();
    let root = system.component(system.root());
    assert_eq!(root.name, "system");
    assert_eq!(root.kind, ComponentKind::System);
    assert_eq!(system.components().len(), 1);
}

#[test]
fn names_are_qualified_by_parent() {
    let mut system = empty_system();
    let root = system.root();
    let cpu = system.add_component("cpu", ComponentKind::Cpu, "TimingSimpleCPU", Some(root), ParamSet::new());
    let apic = system.add_component(
        "interrupts[0]",
        ComponentKind::InterruptController,
        "X86LocalApic",
        Some(cpu),
        ParamSet::new(),
    );
    assert_eq!(system.component(apic).name, "system.cpu.interrupts[0]");
    assert_eq!(system.find_component("system.cpu"), Some(cpu));
    assert_eq!(system.children(cpu).count(), 1);
}

#[test]
fn connect_links_both_ends() {
    let mut system = empty_system();
    let root = system.root();
    let a = system.add_port(root, "a", PortRole::Requestor);
    let b = system.add_port(root, "b", PortRole::Responder);

    system.connect(a, b).unwrap();
    assert_eq!(system.port(a).peer, Some(b));
    assert_eq!(system.port(b).peer, Some(a));
    assert_eq!(system.port_path(a), "system.a");
}

#[test]
fn connect_rejects_second_peer() {
    let mut system = empty_system();
    let root = system.root();
    let a = system.add_port(root, "a", PortRole::Requestor);
    let b = system.add_port(root, "b", PortRole::Responder);
    let c = system.add_port(root, "c", PortRole::Requestor);
    system.connect(a, b).unwrap();

    let err = system.connect(c, b).unwrap_err();
    match err {
        ConfigError::PortInUse { port, peer } => {
            assert_eq!(port, "system.b");
            assert_eq!(peer, "system.a");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(system.port(c).peer, None);
}

#[test]
fn connect_rejects_same_role() {
    let mut system = empty_system();
    let root = system.root();
    let a = system.add_port(root, "a", PortRole::Responder);
    let b = system.add_port(root, "b", PortRole::Responder);
    assert!(matches!(
        system.connect(a, b),
        Err(ConfigError::RoleMismatch { role: PortRole::Responder, .. })
    ));
    assert_eq!(system.port(a).peer, None);
}

#[test]
fn role_opposites() {
    assert_eq!(PortRole::Requestor.opposite(), PortRole::Responder);
    assert_eq!(PortRole::Responder.opposite(), PortRole::Requestor);
}

#[test]
#[should_panic]
fn foreign_component_id_panics() {
    let big = build(&default_config());
    let cpu = big.find_component("system.cpu").unwrap();
    let _ = empty_system().component(cpu);
}
