//! Integration tests for embed-runtime-core.
//!
//! These tests verify the pipeline an engine handle drives:
//! - Interpreter construction from a configuration snapshot
//! - Module loading and validation against that interpreter
//! - Store-manager bookkeeping (registry, fuel accounting)

use embed_runtime_common::EngineConfig;
use embed_runtime_core::{Interpreter, Loader, StoreManager, Validator};

// ============================================================================
// Test: Load / Validate Pipeline
// ============================================================================

#[test]
fn test_load_and_validate_pipeline() {
    let wat = r#"
        (module
            (func (export "answer") (result i32)
                i32.const 42
            )
        )
    "#;

    let interp = Interpreter::new(&EngineConfig::default()).unwrap();
    let loader = Loader::new(&interp);
    let validator = Validator::new(&interp);

    let module = loader.load_wat(wat).unwrap();
    assert!(!module.content_hash().is_empty());

    let minimal: &[u8] = &[0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00];
    validator.validate(minimal).unwrap();
    assert!(validator.validate(b"garbage").is_err());
}

// ============================================================================
// Test: Store Registry
// ============================================================================

#[test]
fn test_store_registry_round_trip() {
    let interp = Interpreter::new(&EngineConfig::default()).unwrap();
    let loader = Loader::new(&interp);
    let mut manager = StoreManager::new(&interp).unwrap();

    let module = loader.load_wat("(module)").unwrap();
    let hash = module.content_hash().to_string();
    manager.register("env", module);

    let found = manager.named_module("env").unwrap();
    assert_eq!(found.content_hash(), hash);

    let names: Vec<&str> = manager.module_names().collect();
    assert_eq!(names, ["env"]);
}

// ============================================================================
// Test: Fuel Accounting
// ============================================================================

#[test]
fn test_fuel_granted_per_store() {
    let config = EngineConfig {
        fuel_metering: true,
        max_fuel: 5_000,
        ..Default::default()
    };
    let interp = Interpreter::new(&config).unwrap();

    let first = StoreManager::new(&interp).unwrap();
    let second = StoreManager::new(&interp).unwrap();

    // Each store gets its own independent grant.
    assert_eq!(first.remaining_fuel(), Some(5_000));
    assert_eq!(second.remaining_fuel(), Some(5_000));
}

// ============================================================================
// Test: Interpreter Sharing
// ============================================================================

#[test]
fn test_components_share_one_interpreter() {
    let interp = Interpreter::new(&EngineConfig::default()).unwrap();

    // Loader, validator, and store manager can all be built from the same
    // interpreter without interfering with each other.
    let loader = Loader::new(&interp);
    let validator = Validator::new(&interp);
    let manager = StoreManager::new(&interp).unwrap();

    assert!(loader.load_wat("(module)").is_ok());
    assert!(validator.validate(&[0x00, 0x61, 0x73, 0x6d, 0x01, 0, 0, 0]).is_ok());
    assert_eq!(manager.module_names().count(), 0);
}
