//! Integration tests for reference lifetimes
//!
//! Tests cover:
//! - Every reference handed out is released exactly once
//! - Promotion to global references
//! - Clones owning their own reference
//! - `global_results` configuration
//! - Runtime refusing global references

mod common;

use jinvoke::{AbiError, BridgeConfig, BridgeError, Object, RefScope, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn scope_of(object: &Object<'_>) -> Option<RefScope> {
    match object.value() {
        Value::Reference(Some(r)) => Some(r.scope()),
        _ => None,
    }
}

#[test]
fn test_no_references_leak_after_calls() {
    init_tracing();
    let (vm, env) = common::setup_unboxing();
    {
        let kennel = env
            .create("demo/Kennel", &[Object::string(&env, "west").unwrap()])
            .unwrap();
        let dog = env.create("demo/Dog", &[]).unwrap();
        kennel.call("admit", &[dog.clone()]).unwrap();
        kennel.call("visit", &[Object::int(&env, 1)]).unwrap();
        kennel.call("describe", &[Object::double(&env, 1.5)]).unwrap();
        kennel.field("name").unwrap();
        kennel.to_string().unwrap();
        let numbers = kennel.call("numbers", &[]).unwrap();
        numbers.element(0).unwrap();
        let _ = kennel.call("fail", &[]);
        let _ = kennel.call("missing", &[]);
        assert!(vm.live_local_refs() > 0);
    }
    assert_eq!(vm.live_local_refs(), 0);
    assert_eq!(vm.live_global_refs(), 0);
    assert_eq!(vm.invalid_releases(), 0);
}

#[test]
fn test_make_global_is_idempotent() {
    let (vm, env) = common::setup();
    let mut kennel = env.create("demo/Kennel", &[]).unwrap();
    assert_eq!(scope_of(&kennel), Some(RefScope::Local));

    kennel.make_global().unwrap();
    assert_eq!(scope_of(&kennel), Some(RefScope::Global));
    assert_eq!(vm.live_global_refs(), 1);

    kennel.make_global().unwrap();
    assert_eq!(scope_of(&kennel), Some(RefScope::Global));
    assert_eq!(vm.live_global_refs(), 1);

    // Still usable after promotion
    assert_eq!(kennel.call("size", &[]).unwrap().as_int().unwrap(), 3);

    drop(kennel);
    assert_eq!(vm.live_global_refs(), 0);
    assert_eq!(vm.live_local_refs(), 0);
    assert_eq!(vm.invalid_releases(), 0);
}

#[test]
fn test_make_global_on_primitive_and_null_is_noop() {
    let (vm, env) = common::setup();
    let mut five = Object::int(&env, 5);
    five.make_global().unwrap();
    assert!(matches!(five.value(), Value::Int(5)));

    let mut null = Object::null(&env);
    null.make_global().unwrap();
    assert!(null.is_null());
    assert_eq!(vm.live_global_refs(), 0);
}

#[test]
fn test_clone_owns_its_own_reference() {
    let (vm, env) = common::setup();
    let kennel = env.create("demo/Kennel", &[]).unwrap();
    let before = vm.live_local_refs();

    let copy = kennel.clone();
    assert_eq!(vm.live_local_refs(), before + 1);
    assert!(vm.is_same_object(kennel.raw().as_ref(), copy.raw().as_ref()));
    assert_ne!(kennel.raw(), copy.raw());

    drop(kennel);
    assert_eq!(copy.call("size", &[]).unwrap().as_int().unwrap(), 3);

    let mut global = copy.clone();
    global.make_global().unwrap();
    let global_copy = global.clone();
    assert_eq!(scope_of(&global_copy), Some(RefScope::Global));
    assert_eq!(vm.live_global_refs(), 2);

    drop((copy, global, global_copy));
    assert_eq!(vm.live_local_refs(), 0);
    assert_eq!(vm.live_global_refs(), 0);
    assert_eq!(vm.invalid_releases(), 0);
}

#[test]
fn test_global_results_promote_every_reference_result() {
    init_tracing();
    let config = BridgeConfig {
        global_results: true,
        ..BridgeConfig::default()
    };
    let (vm, env) = common::setup_with(config);
    {
        let kennel = env.create("demo/Kennel", &[]).unwrap();
        assert_eq!(scope_of(&kennel), Some(RefScope::Global));

        let name = kennel.call("name", &[]).unwrap();
        assert_eq!(scope_of(&name), Some(RefScope::Global));
        assert_eq!(name.as_string().unwrap(), "unnamed");

        // Primitive results are untouched
        assert!(matches!(kennel.call("size", &[]).unwrap().value(), Value::Int(3)));
        // So is null
        assert!(kennel.call("nobody", &[]).unwrap().is_null());

        assert!(vm.live_global_refs() >= 2);
    }
    assert_eq!(vm.live_global_refs(), 0);
    assert_eq!(vm.live_local_refs(), 0);
    assert_eq!(vm.invalid_releases(), 0);
}

#[test]
fn test_classes_release_their_handles() {
    let (vm, env) = common::setup();
    {
        let class = env.find_class("demo/Kennel").unwrap();
        let methods = class.get_methods().unwrap();
        assert!(!methods.is_empty());
        class.get_constructors().unwrap();
        let copy = class.clone();
        assert_eq!(copy.name().unwrap(), "demo/Kennel");
    }
    assert_eq!(vm.live_local_refs(), 0);
    assert_eq!(vm.invalid_releases(), 0);
}

#[test]
fn test_refused_promotion_is_reported() {
    let (vm, env) = common::setup();
    vm.limit_global_refs(0);
    let mut kennel = env.create("demo/Kennel", &[]).unwrap();

    let err = kennel.make_global().unwrap_err();
    assert!(matches!(err, BridgeError::Call(AbiError::Abi(_))), "{err}");
    assert_eq!(scope_of(&kennel), Some(RefScope::Local));
    assert_eq!(kennel.call("size", &[]).unwrap().as_int().unwrap(), 3);

    drop(kennel);
    assert_eq!(vm.live_local_refs(), 0);
    assert_eq!(vm.invalid_releases(), 0);
}

#[test]
fn test_refused_promotion_fails_global_results_call() {
    let config = BridgeConfig {
        global_results: true,
        ..BridgeConfig::default()
    };
    let (vm, env) = common::setup_with(config);
    let kennel = env.create("demo/Kennel", &[]).unwrap();
    vm.limit_global_refs(vm.live_global_refs());

    assert!(kennel.call("name", &[]).is_err());
    assert!(env.create("demo/Dog", &[]).is_err());
    // Primitive and null results need no promotion
    assert_eq!(kennel.call("size", &[]).unwrap().as_int().unwrap(), 3);
    assert!(kennel.call("nobody", &[]).unwrap().is_null());

    drop(kennel);
    assert_eq!(vm.live_local_refs(), 0);
    assert_eq!(vm.live_global_refs(), 0);
    assert_eq!(vm.invalid_releases(), 0);
}

#[test]
fn test_try_clone_reports_refused_duplicate() {
    let (vm, env) = common::setup();
    let mut kennel = env.create("demo/Kennel", &[]).unwrap();
    kennel.make_global().unwrap();
    vm.limit_global_refs(1);

    assert!(kennel.try_clone().is_err());
    assert_eq!(vm.live_global_refs(), 1);

    let five = Object::int(&env, 5).try_clone().unwrap();
    assert!(matches!(five.value(), Value::Int(5)));
    assert!(Object::null(&env).try_clone().unwrap().is_null());
}
