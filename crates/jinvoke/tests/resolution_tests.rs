//! Integration tests for overload resolution
//!
//! Tests cover:
//! - First match in reflection order, not most specific
//! - Name and arity filtering
//! - Null arguments and primitive parameters
//! - Assignability-only matching by default, unboxing when enabled
//! - Reflected member metadata

mod common;

use jinvoke::{BridgeError, Class, Object, ReturnType};
use jinvoke_testvm::{ClassSpec, Slot, TestVm};

#[test]
fn test_first_compatible_overload_wins() {
    let (_vm, env) = common::setup();
    let kennel = env.create("demo/Kennel", &[]).unwrap();
    let dog = env.create("demo/Dog", &[]).unwrap();

    // admit(Object) is listed before admit(demo/Dog); both accept a Dog
    let chosen = kennel.call("admit", &[dog]).unwrap();
    assert_eq!(chosen.as_string().unwrap(), "object");

    let class = env.find_class("demo/Kennel").unwrap();
    let method = class
        .lookup_method("admit", &[env.find_class("demo/Dog").unwrap()])
        .unwrap();
    assert_eq!(method.params()[0].name().unwrap(), "java/lang/Object");
}

#[test]
fn test_zero_arguments_against_one_parameter_method_fails() {
    let (_vm, env) = common::setup();
    let class = env.find_class("demo/Kennel").unwrap();
    let err = class.lookup_method("visit", &[]).unwrap_err();
    assert!(err.is_resolution(), "{err}");
    assert!(matches!(
        err,
        BridgeError::Resolution { kind: "method", ref name, .. } if name == "visit"
    ));

    let kennel = env.create("demo/Kennel", &[]).unwrap();
    assert!(kennel.call("visit", &[]).unwrap_err().is_resolution());
}

#[test]
fn test_unknown_name_and_wrong_argument_class_fail() {
    let (_vm, env) = common::setup();
    let kennel = env.create("demo/Kennel", &[]).unwrap();
    assert!(kennel.call("bark", &[]).unwrap_err().is_resolution());

    // feed(demo/Dog) does not accept an Animal
    let animal = env.create("demo/Animal", &[]).unwrap();
    let err = kennel.call("feed", &[animal]).unwrap_err();
    assert!(err.is_resolution());
    assert!(err.to_string().contains("demo/Animal"), "{err}");
}

#[test]
fn test_subclass_and_interface_arguments_are_accepted() {
    let (_vm, env) = common::setup();
    let kennel = env.create("demo/Kennel", &[]).unwrap();
    let dog = env.create("demo/Dog", &[]).unwrap();
    kennel.call("feed", &[dog]).unwrap();

    let string = env.find_class("java/lang/String").unwrap();
    let char_sequence = env.find_class("java/lang/CharSequence").unwrap();
    assert!(char_sequence.is_assignable_from(&string));
    assert!(!string.is_assignable_from(&char_sequence));
}

#[test]
fn test_null_argument_matches_reference_parameters_only() {
    let (_vm, env) = common::setup();
    let kennel = env.create("demo/Kennel", &[]).unwrap();

    let shown = kennel.call("describe", &[Object::null(&env)]).unwrap();
    assert_eq!(shown.as_string().unwrap(), "null");

    assert!(kennel
        .call("visit", &[Object::null(&env)])
        .unwrap_err()
        .is_resolution());
}

#[test]
fn test_primitive_arguments_match_primitive_parameters_when_unboxing() {
    let (_vm, env) = common::setup_unboxing();
    let kennel = env.create("demo/Kennel", &[]).unwrap();

    let scaled = kennel
        .call("scale", &[Object::int(&env, 3), Object::double(&env, 1.5)])
        .unwrap();
    assert_eq!(scaled.as_double().unwrap(), 4.5);

    // Kind must match exactly: a long is not accepted for an int parameter
    assert!(kennel
        .call("visit", &[Object::long(&env, 1)])
        .unwrap_err()
        .is_resolution());
}

#[test]
fn test_default_resolution_uses_assignability_only() {
    let (_vm, env) = common::setup();
    assert!(!env.config().unbox_arguments);
    let kennel = env.create("demo/Kennel", &[]).unwrap();

    // java/lang/Integer is not assignable to int
    assert!(kennel
        .call("visit", &[Object::int(&env, 1)])
        .unwrap_err()
        .is_resolution());
    // reference parameters still resolve, boxing the primitive
    let shown = kennel.call("describe", &[Object::int(&env, 9)]).unwrap();
    assert_eq!(shown.as_string().unwrap(), "9");
}

fn define_picker(vm: &TestVm) {
    vm.define(
        ClassSpec::new("demo/Picker")
            .constructor(&[], |_, _, _| Ok(Slot::Void))
            .method("pick", &["int"], "int", |_, _, _| Ok(Slot::Int(1)))
            .method("pick", &["java/lang/Object"], "int", |_, _, _| Ok(Slot::Int(2))),
    )
    .unwrap();
}

#[test]
fn test_primitive_overload_listed_first_is_skipped_by_default() {
    let (vm, env) = common::setup();
    define_picker(&vm);
    let picker = env.create("demo/Picker", &[]).unwrap();

    let chosen = picker.call("pick", &[Object::int(&env, 5)]).unwrap();
    assert_eq!(chosen.as_int().unwrap(), 2);

    let class = env.find_class("demo/Picker").unwrap();
    let integer = env.find_class("java/lang/Integer").unwrap();
    let method = class.lookup_method("pick", &[integer]).unwrap();
    assert_eq!(method.params()[0].name().unwrap(), "java/lang/Object");
}

#[test]
fn test_primitive_overload_listed_first_wins_when_unboxing() {
    let (vm, env) = common::setup_unboxing();
    define_picker(&vm);
    let picker = env.create("demo/Picker", &[]).unwrap();

    let chosen = picker.call("pick", &[Object::int(&env, 5)]).unwrap();
    assert_eq!(chosen.as_int().unwrap(), 1);

    // Anything that is not an Integer still falls through to Object
    let text = Object::string(&env, "five").unwrap();
    assert_eq!(picker.call("pick", &[text]).unwrap().as_int().unwrap(), 2);
}

#[test]
fn test_constructor_resolution() {
    let (_vm, env) = common::setup();
    let class = env.find_class("demo/Kennel").unwrap();
    let constructors = class.get_constructors().unwrap();
    assert_eq!(constructors.len(), 2);
    assert!(constructors.iter().all(|c| c.is_constructor()));
    assert!(constructors.iter().all(|c| c.return_type() == "void"));

    let string = env.find_class("java/lang/String").unwrap();
    let ctor = class.lookup_constructor(&[string]).unwrap();
    assert_eq!(ctor.arity(), 1);
    assert!(ctor.name().is_none());

    let err = class
        .lookup_constructor(&[env.find_class("demo/Dog").unwrap()])
        .unwrap_err();
    assert!(matches!(err, BridgeError::Resolution { kind: "constructor", .. }));
}

#[test]
fn test_reflected_methods_include_inherited_in_order() {
    let (_vm, env) = common::setup();
    let dog = env.find_class("demo/Dog").unwrap();
    let methods = dog.get_methods().unwrap();
    let names: Vec<_> = methods.iter().filter_map(|m| m.name()).collect();

    // Own override first; the inherited Animal.sound is hidden
    assert_eq!(names[0], "sound");
    assert_eq!(names.iter().filter(|n| **n == "sound").count(), 1);
    assert!(names.contains(&"hashCode"));
    assert!(names.contains(&"getClass"));
}

#[test]
fn test_method_metadata() {
    let (_vm, env) = common::setup();
    let class = env.find_class("demo/Kennel").unwrap();
    let methods = class.get_methods().unwrap();

    let find = |name: &'static str| methods.named(name).next().unwrap();
    assert_eq!(find("size").return_type(), "int");
    assert_eq!(find("size").returns(), ReturnType::Primitive(jinvoke::Primitive::Int));
    assert_eq!(find("feed").return_type(), "void");
    assert_eq!(find("greet").return_type(), "java/lang/String");
    assert_eq!(find("numbers").return_type(), "[I");
    assert_eq!(find("numbers").returns(), ReturnType::Reference);
    assert!(find("twice").is_static());
    assert!(!find("size").is_static());

    let scale = find("scale");
    let params: Vec<_> = scale.params().iter().map(|c| c.name().unwrap().to_string()).collect();
    assert_eq!(params, vec!["int", "double"]);
}

#[test]
fn test_null_class_has_no_members() {
    let (_vm, env) = common::setup();
    let null = Class::null(&env);
    assert!(null.is_null());
    assert!(matches!(null.name(), Err(BridgeError::NullClass)));
    assert!(matches!(null.get_methods(), Err(BridgeError::NullClass)));

    let err = Object::null(&env).call("toString", &[]).unwrap_err();
    assert!(matches!(err, BridgeError::NullClass));
}
