//! Simulator Driver Tests.
//!
//! The driver builds, validates, binds, and hands off exactly once; nothing
//! reaches the engine or the binder when an earlier stage fails.

use crate::common::harness::{config_from, default_config, elf_x86_64, temp_binary};
use crate::common::mocks::{MockBinder, MockEngine, StubBinder, exit_at};
use hbmcfg_core::common::{AddrRange, ConfigError, EngineError};
use hbmcfg_core::config::{Config, defaults};
use hbmcfg_core::sim::{ConfigDumpEngine, Root, SeWorkloadBinder, Simulator};
use hbmcfg_core::soc::System;
use mockall::predicate::always;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn run_hands_off_once_and_returns_exit() {
    let mut engine = MockEngine::new();
    engine
        .expect_instantiate()
        .withf(|root| !root.full_system && root.system.workload().is_some())
        .times(1)
        .returning(|_| Ok(()));
    engine.expect_run().times(1).returning(|| Ok(exit_at(1_234)));

    let mut sim = Simulator::new(StubBinder, engine);
    let exit = sim.run(&default_config()).unwrap();
    assert_eq!(exit.tick, 1_234);
}

#[test]
fn default_binary_path_and_args_reach_binder() {
    let mut binder = MockBinder::new();
    binder
        .expect_bind()
        .withf(|_, binary, args| binary == Path::new(defaults::BINARY) && args.len() == 1 && args[0] == "42")
        .times(1)
        .returning(|_, _, _| Ok(()));
    let mut engine = MockEngine::new();
    engine.expect_instantiate().with(always()).returning(|_| Ok(()));
    engine.expect_run().returning(|| Ok(exit_at(0)));

    let config = Config {
        args: vec!["42".into()],
        ..Config::default()
    };
    let _ = Simulator::new(binder, engine).run(&config).unwrap();
}

#[test]
fn build_failure_skips_binder_and_engine() {
    let mut binder = MockBinder::new();
    binder.expect_bind().times(0);
    let mut engine = MockEngine::new();
    engine.expect_instantiate().times(0);
    engine.expect_run().times(0);

    let err = Simulator::new(binder, engine)
        .run(&config_from(r#"{ "mem_size": "0B" }"#))
        .unwrap_err();
    assert!(matches!(err, ConfigError::MalformedRange(_)));
}

#[test]
fn bind_failure_skips_engine() {
    let mut engine = MockEngine::new();
    engine.expect_instantiate().times(0);
    let config = Config {
        binary: Some("/nonexistent/hello".into()),
        ..Config::default()
    };

    let err = Simulator::new(SeWorkloadBinder, engine).run(&config).unwrap_err();
    assert!(matches!(err, ConfigError::Workload(_)));
}

#[test]
fn engine_failure_propagates() {
    let mut engine = MockEngine::new();
    engine.expect_instantiate().returning(|_| Ok(()));
    engine.expect_run().returning(|| Err(EngineError::NotInstantiated));

    let err = Simulator::new(StubBinder, engine).run(&default_config()).unwrap_err();
    assert!(matches!(err, ConfigError::Engine(EngineError::NotInstantiated)));
}

#[test]
fn end_to_end_with_dump_engine() {
    let binary = temp_binary(&elf_x86_64());
    let out = tempdir().unwrap();
    let config = Config {
        binary: Some(binary.path().display().to_string()),
        memory: Some("HBM_1000_4H_1x64".into()),
        ..Config::default()
    };

    let mut sim = Simulator::new(SeWorkloadBinder, ConfigDumpEngine::new(out.path()));
    let exit = sim.run(&config).unwrap();
    assert_eq!(exit.tick, 0);
    assert!(sim.engine.dump_path().is_some_and(Path::exists));
}

#[test]
fn prepare_returns_bound_root() {
    let sim = Simulator::new(StubBinder, ConfigDumpEngine::new("unused"));
    let root = sim.prepare(&default_config()).unwrap();
    let binding = root.system.workload().unwrap();
    assert_eq!(binding.process.cmd, vec![defaults::BINARY.to_string()]);
}

#[test]
fn launch_runs_a_prepared_root() {
    let mut engine = MockEngine::new();
    engine.expect_instantiate().times(1).returning(|_| Ok(()));
    engine.expect_run().times(1).returning(|| Ok(exit_at(7)));

    let mut sim = Simulator::new(StubBinder, engine);
    let root = sim.prepare(&default_config()).unwrap();
    assert_eq!(sim.launch(&root).unwrap().tick, 7);
}

#[test]
fn launch_rejects_unvalidated_root() {
    let mut engine = MockEngine::new();
    engine.expect_instantiate().times(0);
    engine.expect_run().times(0);

    let mut system = System::assemble(&default_config()).unwrap();
    system.mem_ranges = vec![AddrRange::with_size(1)];

    let mut sim = Simulator::new(StubBinder, engine);
    let err = sim.launch(&Root::new(system)).unwrap_err();
    assert!(matches!(err, ConfigError::Structural(_)));
}
