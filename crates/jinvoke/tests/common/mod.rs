//! Shared fixture: a small class hierarchy loaded into a test VM.
//!
//! ```text
//! demo/Animal
//! demo/Dog extends demo/Animal
//! demo/Kennel            (fields, overloads, statics, arrays, exceptions)
//! ```

#![allow(dead_code)]

use std::sync::Arc;

use jinvoke::{BridgeConfig, Env};
use jinvoke_testvm::{ClassSpec, Heap, ObjId, Slot, TestVm};

const STRING: &str = "java/lang/String";
const OBJECT: &str = "java/lang/Object";

fn text(heap: &mut Heap, s: &str) -> Slot {
    Slot::Ref(Some(heap.new_string(s)))
}

fn receiver(obj: Option<ObjId>) -> ObjId {
    obj.expect("instance method called without receiver")
}

pub fn install(vm: &TestVm) {
    vm.define(
        ClassSpec::new("demo/Animal")
            .field("legs", "int")
            .constructor(&[], |heap, obj, _| {
                heap.set_field(receiver(obj), "legs", Slot::Int(4))?;
                Ok(Slot::Void)
            })
            .method("sound", &[], STRING, |heap, _, _| Ok(text(heap, "..."))),
    )
    .unwrap();

    vm.define(
        ClassSpec::new("demo/Dog")
            .extends("demo/Animal")
            .constructor(&[], |heap, obj, _| {
                heap.set_field(receiver(obj), "legs", Slot::Int(4))?;
                Ok(Slot::Void)
            })
            .method("sound", &[], STRING, |heap, _, _| Ok(text(heap, "woof"))),
    )
    .unwrap();

    vm.define(
        ClassSpec::new("demo/Kennel")
            .field("name", STRING)
            .field("visits", "int")
            .static_field("CAPACITY", "int", Slot::Int(12))
            .constructor(&[], |heap, obj, _| {
                let name = text(heap, "unnamed");
                heap.set_field(receiver(obj), "name", name)?;
                Ok(Slot::Void)
            })
            .constructor(&[STRING], |heap, obj, args| {
                heap.set_field(receiver(obj), "name", args[0])?;
                Ok(Slot::Void)
            })
            // Object overload first: reflection lists it first
            .method("admit", &[OBJECT], STRING, |heap, _, _| Ok(text(heap, "object")))
            .method("admit", &["demo/Dog"], STRING, |heap, _, _| Ok(text(heap, "dog")))
            .method("size", &[], "int", |_, _, _| Ok(Slot::Int(3)))
            .method("visit", &["int"], "int", |heap, obj, args| {
                let this = receiver(obj);
                let total = heap.field(this, "visits")?.int()? + args[0].int()?;
                heap.set_field(this, "visits", Slot::Int(total))?;
                Ok(Slot::Int(total))
            })
            .method("greet", &[STRING], STRING, |heap, obj, args| {
                let name = heap.string_arg(heap.field(receiver(obj), "name")?)?;
                let who = heap.string_arg(args[0])?;
                Ok(text(heap, &format!("{} greets {}", name, who)))
            })
            .method("name", &[], STRING, |heap, obj, _| heap.field(receiver(obj), "name"))
            .method("describe", &[OBJECT], STRING, |heap, _, args| {
                let shown = heap.display(args[0]);
                Ok(text(heap, &shown))
            })
            .method("scale", &["int", "double"], "double", |_, _, args| match (args[0], args[1]) {
                (Slot::Int(i), Slot::Double(d)) => Ok(Slot::Double(i as f64 * d)),
                _ => unreachable!(),
            })
            .method("sum", &["long", "short", "byte"], "long", |_, _, args| {
                match (args[0], args[1], args[2]) {
                    (Slot::Long(l), Slot::Short(s), Slot::Byte(b)) => Ok(Slot::Long(l + s as i64 + b as i64)),
                    _ => unreachable!(),
                }
            })
            .method("negate", &["boolean"], "boolean", |_, _, args| match args[0] {
                Slot::Boolean(b) => Ok(Slot::Boolean(!b)),
                _ => unreachable!(),
            })
            .method("code", &["char"], "int", |_, _, args| match args[0] {
                Slot::Char(c) => Ok(Slot::Int(c as i32)),
                _ => unreachable!(),
            })
            .method("ratio", &[], "float", |_, _, _| Ok(Slot::Float(0.5)))
            .method("tag", &[], "char", |_, _, _| Ok(Slot::Char('K' as u16)))
            .method("small", &[], "byte", |_, _, _| Ok(Slot::Byte(-7)))
            .method("medium", &[], "short", |_, _, _| Ok(Slot::Short(1234)))
            .method("big", &[], "long", |_, _, _| Ok(Slot::Long(1 << 40)))
            .method("feed", &["demo/Dog"], "void", |_, _, _| Ok(Slot::Void))
            .method("nobody", &[], OBJECT, |_, _, _| Ok(Slot::NULL))
            .method("numbers", &[], "[I", |heap, _, _| {
                let values = [3, 1, 4]
                    .into_iter()
                    .map(jinvoke_sdk::RawValue::int)
                    .collect();
                Ok(Slot::Ref(Some(
                    heap.new_primitive_array(jinvoke_sdk::Primitive::Int, values),
                )))
            })
            .method("fail", &[], "void", |_, _, _| {
                Err(jinvoke_testvm::Throw::new(
                    "java/lang/IllegalStateException",
                    "kennel closed",
                ))
            })
            .static_method("twice", &["int"], "int", |_, _, args| Ok(Slot::Int(args[0].int()? * 2)))
            .static_method("open", &[], "demo/Kennel", |heap, _, _| {
                let kennel = heap.new_instance("demo/Kennel")?;
                let name = text(heap, "city");
                heap.set_field(kennel, "name", name)?;
                Ok(Slot::Ref(Some(kennel)))
            }),
    )
    .unwrap();
}

/// VM with the fixture classes and an environment over it
pub fn setup() -> (Arc<TestVm>, Env) {
    setup_with(BridgeConfig::default())
}

/// Like [`setup`], with boxed arguments accepted for primitive parameters
pub fn setup_unboxing() -> (Arc<TestVm>, Env) {
    setup_with(BridgeConfig {
        unbox_arguments: true,
        ..BridgeConfig::default()
    })
}

pub fn setup_with(config: BridgeConfig) -> (Arc<TestVm>, Env) {
    let vm = Arc::new(TestVm::new());
    install(&vm);
    let env = Env::with_config(vm.clone(), config);
    (vm, env)
}
