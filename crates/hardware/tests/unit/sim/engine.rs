//! Engine Boundary Tests.
//!
//! The configuration-dump engine writes the instantiated root as JSON and
//! enforces instantiate-once, instantiate-before-run.

use crate::common::harness::{build, default_config};
use hbmcfg_core::common::EngineError;
use hbmcfg_core::sim::engine::CONFIG_DUMP_FILE;
use hbmcfg_core::sim::{ConfigDumpEngine, ExitEvent, Root, SimulationEngine};
use tempfile::tempdir;

#[test]
fn root_is_syscall_emulation() {
    let root = Root::new(build(&default_config()));
    assert!(!root.full_system);
}

#[test]
fn dump_writes_config_json() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("m5out");
    let mut engine = ConfigDumpEngine::new(&out);

    engine.instantiate(&Root::new(build(&default_config()))).unwrap();
    let path = engine.dump_path().unwrap().to_path_buf();
    assert_eq!(path, out.join(CONFIG_DUMP_FILE));

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["full_system"], false);
    assert_eq!(json["system"]["clk_domain"]["clock"], "1GHz");
    assert_eq!(json["system"]["mem_mode"], "timing");
    let names: Vec<&str> = json["system"]["components"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["name"].as_str())
        .collect();
    assert!(names.contains(&"system.mem_ctrl.dram"));
}

#[test]
fn run_reports_tick_zero_exit() {
    let dir = tempdir().unwrap();
    let mut engine = ConfigDumpEngine::new(dir.path());
    engine.instantiate(&Root::new(build(&default_config()))).unwrap();

    let exit = engine.run().unwrap();
    assert_eq!(exit.tick, 0);
    assert_eq!(exit.cause, ConfigDumpEngine::EXIT_CAUSE);
}

#[test]
fn instantiate_twice_fails() {
    let dir = tempdir().unwrap();
    let mut engine = ConfigDumpEngine::new(dir.path());
    let root = Root::new(build(&default_config()));
    engine.instantiate(&root).unwrap();
    assert!(matches!(engine.instantiate(&root), Err(EngineError::AlreadyInstantiated)));
}

#[test]
fn run_before_instantiate_fails() {
    let dir = tempdir().unwrap();
    let mut engine = ConfigDumpEngine::new(dir.path());
    assert!(matches!(engine.run(), Err(EngineError::NotInstantiated)));
}

#[test]
fn exit_event_display() {
    let exit = ExitEvent {
        tick: 5_000,
        cause: "exiting with last active thread context".into(),
    };
    assert_eq!(
        exit.to_string(),
        "Exiting @ tick 5000 because exiting with last active thread context"
    );
}
