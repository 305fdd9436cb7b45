//! Integration tests for array access
//!
//! Tests cover:
//! - Element round trips for every primitive kind
//! - Writes converted to the slot's kind
//! - Object arrays and `create_array`
//! - Type failures: non-arrays, primitives, nested arrays

mod common;

use jinvoke::{BridgeError, Kind, Object, Primitive, Value};
use jinvoke_sdk::RawValue;

fn sample<'e>(env: &'e jinvoke::Env, kind: Primitive) -> Object<'e> {
    match kind {
        Primitive::Boolean => Object::bool(env, true),
        Primitive::Byte => Object::byte(env, -100),
        Primitive::Char => Object::char(env, 0x263A),
        Primitive::Short => Object::short(env, -30000),
        Primitive::Int => Object::int(env, 1_000_000),
        Primitive::Long => Object::long(env, -(1 << 50)),
        Primitive::Float => Object::float(env, 3.25),
        Primitive::Double => Object::double(env, -0.125),
    }
}

#[test]
fn test_primitive_round_trip_for_every_kind() {
    let (vm, env) = common::setup();
    for kind in Primitive::ALL {
        let raw = vm.new_primitive_array(kind, &[RawValue::from_bits(0); 3]);
        let array = Object::from_local_ref(&env, raw);
        assert_eq!(array.array_size().unwrap(), 3);

        let written = sample(&env, kind);
        let mut slot = array.element(1).unwrap();
        assert_eq!(slot.kind(), Kind::from(kind));
        slot.set(&written).unwrap();
        assert_eq!(slot.get().raw(), written.raw(), "{kind}: proxy value after write");

        let read = array.element(1).unwrap().into_value();
        assert_eq!(read.kind(), written.kind(), "{kind}");
        assert_eq!(read.raw(), written.raw(), "{kind}");

        // Neighbours untouched
        assert_eq!(array.element(0).unwrap().get().raw(), RawValue::from_bits(0));
    }
}

#[test]
fn test_write_is_converted_to_slot_kind() {
    let (vm, env) = common::setup();

    let ints = Object::from_local_ref(&env, vm.new_primitive_array(Primitive::Int, &[RawValue::int(0)]));
    ints.element(0).unwrap().set(&Object::double(&env, 3.9)).unwrap();
    assert!(matches!(ints.element(0).unwrap().get().value(), Value::Int(3)));

    ints.element(0).unwrap().set(&Object::long(&env, (1 << 32) + 5)).unwrap();
    assert!(matches!(ints.element(0).unwrap().get().value(), Value::Int(5)));

    let flags = Object::from_local_ref(
        &env,
        vm.new_primitive_array(Primitive::Boolean, &[RawValue::bool(false)]),
    );
    flags.element(0).unwrap().set(&Object::int(&env, 2)).unwrap();
    assert!(matches!(flags.element(0).unwrap().get().value(), Value::Boolean(true)));

    let doubles = Object::from_local_ref(
        &env,
        vm.new_primitive_array(Primitive::Double, &[RawValue::double(0.0)]),
    );
    doubles.element(0).unwrap().set(&Object::char(&env, 'a' as u16)).unwrap();
    assert_eq!(doubles.element(0).unwrap().get().as_double().unwrap(), 97.0);

    // A reference cannot be converted to a primitive slot
    let s = Object::string(&env, "1").unwrap();
    assert!(ints.element(0).unwrap().set(&s).unwrap_err().is_type_mismatch());
}

#[test]
fn test_array_returned_by_method() {
    let (_vm, env) = common::setup();
    let kennel = env.create("demo/Kennel", &[]).unwrap();
    let numbers = kennel.call("numbers", &[]).unwrap();
    assert_eq!(numbers.get_class().unwrap().name().unwrap(), "[I");
    assert_eq!(numbers.array_size().unwrap(), 3);
    let values: Vec<i32> = (0..3)
        .map(|i| numbers.element(i).unwrap().get().as_int().unwrap())
        .collect();
    assert_eq!(values, vec![3, 1, 4]);
}

#[test]
fn test_object_arrays() {
    let (_vm, env) = common::setup();
    let dog = env.create("demo/Dog", &[]).unwrap();
    let animals = env.create_array("demo/Animal", 3, &dog).unwrap();
    assert_eq!(animals.get_class().unwrap().name().unwrap(), "[Ldemo/Animal;");
    assert_eq!(animals.array_size().unwrap(), 3);

    let first = animals.element(0).unwrap();
    assert_eq!(first.kind(), Kind::Reference);
    assert_eq!(first.get().call("sound", &[]).unwrap().as_string().unwrap(), "woof");

    let animal = env.create("demo/Animal", &[]).unwrap();
    let mut second = animals.element(1).unwrap();
    second.set(&animal).unwrap();
    assert_eq!(
        animals.element(1).unwrap().get().call("sound", &[]).unwrap().as_string().unwrap(),
        "..."
    );

    animals.element(2).unwrap().set(&Object::null(&env)).unwrap();
    assert!(animals.element(2).unwrap().get().is_null());

    // Primitive into a reference slot
    let err = animals.element(0).unwrap().set(&Object::int(&env, 1)).unwrap_err();
    assert!(err.is_type_mismatch());

    // The runtime's own store check
    let text = Object::string(&env, "cat").unwrap();
    let err = animals.element(0).unwrap().set(&text).unwrap_err();
    assert_eq!(err.thrown_class(), Some("java/lang/ArrayStoreException"));
}

#[test]
fn test_create_array_of_nulls_and_bad_initial() {
    let (_vm, env) = common::setup();
    let strings = env.create_array("java/lang/String", 2, &Object::null(&env)).unwrap();
    assert!(strings.element(0).unwrap().get().is_null());
    strings
        .element(1)
        .unwrap()
        .set(&Object::string(&env, "b").unwrap())
        .unwrap();
    assert_eq!(strings.element(1).unwrap().get().as_string().unwrap(), "b");

    let err = env.create_array("java/lang/String", 2, &Object::int(&env, 0)).unwrap_err();
    assert!(err.is_type_mismatch());
}

#[test]
fn test_indexing_non_array_is_type_mismatch() {
    let (_vm, env) = common::setup();
    let s = Object::string(&env, "abc").unwrap();
    let err = s.element(0).unwrap_err();
    assert!(matches!(err, BridgeError::TypeMismatch { ref got, .. } if got == "java/lang/String"));

    assert!(Object::int(&env, 1).element(0).unwrap_err().is_type_mismatch());
    assert!(Object::null(&env).element(0).unwrap_err().is_type_mismatch());
}

#[test]
fn test_array_size_type_failures() {
    let (_vm, env) = common::setup();
    assert!(Object::int(&env, 4).array_size().unwrap_err().is_type_mismatch());
    assert!(Object::double(&env, 4.0).array_size().unwrap_err().is_type_mismatch());
    assert!(Object::null(&env).array_size().unwrap_err().is_type_mismatch());
    let s = Object::string(&env, "abc").unwrap();
    assert!(s.array_size().unwrap_err().is_type_mismatch());
}

#[test]
fn test_nested_arrays_have_no_element_tag() {
    let (_vm, env) = common::setup();
    let rows = env.create_array("[I", 2, &Object::null(&env)).unwrap();
    assert_eq!(rows.get_class().unwrap().name().unwrap(), "[[I");
    assert_eq!(rows.array_size().unwrap(), 2);
    assert!(matches!(rows.element(0), Err(BridgeError::UnsupportedType('['))));
}

#[test]
fn test_out_of_bounds_is_runtime_exception() {
    let (vm, env) = common::setup();
    let array = Object::from_local_ref(&env, vm.new_primitive_array(Primitive::Long, &[RawValue::long(1)]));
    let err = array.element(1).unwrap_err();
    assert_eq!(err.thrown_class(), Some("java/lang/ArrayIndexOutOfBoundsException"));
}
