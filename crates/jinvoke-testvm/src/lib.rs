//! In-memory managed runtime for tests
//!
//! `TestVm` implements [`JvmContext`] over a small heap with a class
//! hierarchy, reflection objects, strings, arrays and exceptions. Every
//! reference it hands out is a distinct handle, so tests can assert that the
//! code under test released exactly what it acquired.
//!
//! ```ignore
//! let vm = TestVm::new();
//! vm.define(
//!     ClassSpec::new("demo/Counter")
//!         .constructor(&[], |_, _, _| Ok(Slot::Void))
//!         .method("next", &["int"], "int", |_, _, args| Ok(Slot::Int(args[0].int()? + 1))),
//! )?;
//! ```

#![warn(missing_docs)]

mod bootstrap;
mod heap;
mod refs;
mod spec;

use std::collections::HashMap;

use jinvoke_sdk::{AbiError, AbiResult, JvmContext, MethodId, Primitive, RawRef, RawValue, Receiver};
use parking_lot::Mutex;

pub use heap::{Heap, NativeBody, ObjId, Slot, Throw};
pub use spec::ClassSpec;

use heap::{normalize, ClassId, MethodIdx, ObjData, Shape};
use refs::{RefKind, RefTable};

/// Magic number every class file starts with
const CLASS_FILE_MAGIC: [u8; 4] = [0xCA, 0xFE, 0xBA, 0xBE];

impl From<Throw> for AbiError {
    fn from(t: Throw) -> Self {
        AbiError::Thrown {
            class: t.class,
            message: t.message,
        }
    }
}

/// Return shape a typed call variant expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Void,
    Primitive(Primitive),
    Reference,
}

struct Inner {
    heap: Heap,
    refs: RefTable,
    /// Class definitions materialized by `define_class`
    staged: HashMap<String, ClassSpec>,
}

/// An in-memory runtime implementing `JvmContext`.
pub struct TestVm {
    state: Mutex<Inner>,
}

impl Default for TestVm {
    fn default() -> Self {
        Self::new()
    }
}

impl TestVm {
    /// Create a VM with the built-in classes loaded
    pub fn new() -> Self {
        let mut heap = Heap::empty();
        if let Err(e) = bootstrap::bootstrap(&mut heap) {
            panic!("test VM bootstrap failed: {}", e);
        }
        Self {
            state: Mutex::new(Inner {
                heap,
                refs: RefTable::new(),
                staged: HashMap::new(),
            }),
        }
    }

    /// Load a class
    pub fn define(&self, spec: ClassSpec) -> Result<(), String> {
        self.state.lock().heap.define(spec).map(|_| ())
    }

    /// Register a class that becomes available once `define_class` is
    /// called with its name and a well-formed class file
    pub fn stage(&self, spec: ClassSpec) {
        let mut state = self.state.lock();
        state.staged.insert(spec.name().to_string(), spec);
    }

    /// Run `f` with direct access to the heap
    pub fn with_heap<R>(&self, f: impl FnOnce(&mut Heap) -> R) -> R {
        f(&mut self.state.lock().heap)
    }

    /// Hand out a new local reference to a heap object
    pub fn local_ref(&self, obj: ObjId) -> RawRef {
        self.state.lock().refs.acquire(obj, RefKind::Local)
    }

    /// Heap object behind a live reference
    pub fn object(&self, r: RawRef) -> AbiResult<ObjId> {
        self.state.lock().refs.resolve(r)
    }

    /// Allocate a primitive array and return a local reference to it
    pub fn new_primitive_array(&self, kind: Primitive, values: &[RawValue]) -> RawRef {
        let mut state = self.state.lock();
        let obj = state.heap.new_primitive_array(kind, values.to_vec());
        state.refs.acquire(obj, RefKind::Local)
    }

    /// Whether two references denote the same object (null equals null)
    pub fn is_same_object(&self, a: RawRef, b: RawRef) -> bool {
        let state = self.state.lock();
        match (state.refs.resolve_opt(a), state.refs.resolve_opt(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// Slash-separated class name of the object behind a reference
    pub fn class_name_of(&self, r: RawRef) -> Option<String> {
        let state = self.state.lock();
        let obj = state.refs.resolve(r).ok()?;
        Some(state.heap.class_name_of(obj).to_string())
    }

    /// Refuse new global references once `limit` are live, the way a
    /// runtime out of global reference capacity does
    pub fn limit_global_refs(&self, limit: usize) {
        self.state.lock().refs.set_global_limit(Some(limit));
    }

    /// Number of local references not yet released
    pub fn live_local_refs(&self) -> usize {
        self.state.lock().refs.live(RefKind::Local)
    }

    /// Number of global references not yet released
    pub fn live_global_refs(&self) -> usize {
        self.state.lock().refs.live(RefKind::Global)
    }

    /// Releases of unknown handles, double releases and local/global mix-ups
    pub fn invalid_releases(&self) -> usize {
        self.state.lock().refs.invalid_releases()
    }
}

// ============================================================================
// Internals
// ============================================================================

impl Inner {
    fn class_ref(&self, r: RawRef) -> AbiResult<ClassId> {
        if r.is_null() {
            return Err(AbiError::thrown("java/lang/NullPointerException", "class is null"));
        }
        let obj = self.refs.resolve(r)?;
        Ok(self.heap.class_from_object(obj)?)
    }

    fn method(&self, id: MethodId) -> AbiResult<MethodIdx> {
        let index = (id.to_bits() as usize).wrapping_sub(1);
        if index < self.heap.methods.len() {
            Ok(index)
        } else {
            Err(AbiError::Abi(format!("unknown method id {:#x}", id.to_bits())))
        }
    }

    fn local_class(&mut self, class: ClassId) -> RawRef {
        let obj = self.heap.class_object(class);
        self.refs.acquire(obj, RefKind::Local)
    }

    fn no_such_method(&self, class: ClassId, name: &str, signature: &str) -> AbiError {
        AbiError::NoSuchMethod {
            class: self.heap.class(class).name.clone(),
            name: name.to_string(),
            signature: signature.to_string(),
        }
    }

    /// Decode raw arguments against the parameter types of `method`
    fn decode_args(&self, method: MethodIdx, args: &[RawValue]) -> AbiResult<Vec<Slot>> {
        let params = &self.heap.methods[method].params;
        if params.len() != args.len() {
            return Err(AbiError::Abi(format!(
                "{}{} takes {} arguments, got {}",
                self.heap.methods[method].name,
                self.heap.signature(method),
                params.len(),
                args.len()
            )));
        }
        params
            .iter()
            .zip(args)
            .enumerate()
            .map(|(i, (&param, &raw))| {
                if let Some(kind) = self.heap.primitive_of(param) {
                    return Ok(Slot::from_raw(kind, raw));
                }
                let obj = self.refs.resolve_opt(raw.as_ref())?;
                if let Some(obj) = obj {
                    let actual = self.heap.class_of(obj);
                    if !self.heap.is_assignable(actual, param) {
                        return Err(AbiError::Abi(format!(
                            "argument {}: {} is not assignable to {}",
                            i,
                            self.heap.class(actual).name,
                            self.heap.class(param).name
                        )));
                    }
                }
                Ok(Slot::Ref(obj))
            })
            .collect()
    }

    fn check_return(&self, method: MethodIdx, expect: Expect) -> AbiResult<()> {
        let ret = self.heap.methods[method].ret;
        let ok = match (expect, ret) {
            (Expect::Void, None) => true,
            (Expect::Primitive(p), Some(r)) => self.heap.primitive_of(r) == Some(p),
            (Expect::Reference, Some(r)) => !self.heap.is_primitive(r),
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(AbiError::Abi(format!(
                "{}{} called as {:?}",
                self.heap.methods[method].name,
                self.heap.signature(method),
                expect
            )))
        }
    }

    fn invoke(
        &mut self,
        target: Receiver,
        id: MethodId,
        args: &[RawValue],
        expect: Expect,
    ) -> AbiResult<Slot> {
        let mut method = self.method(id)?;
        let def = &self.heap.methods[method];
        if def.is_constructor() {
            return Err(AbiError::Abi("constructor ids are only valid for new_object".into()));
        }
        let receiver = match target {
            Receiver::Static(class) => {
                if !def.is_static {
                    return Err(AbiError::Abi(format!("{} is not static", def.name)));
                }
                self.class_ref(class)?;
                None
            }
            Receiver::Instance(obj) => {
                if def.is_static {
                    return Err(AbiError::Abi(format!("{} is static", def.name)));
                }
                if obj.is_null() {
                    return Err(AbiError::thrown(
                        "java/lang/NullPointerException",
                        format!("cannot invoke {} on null", def.name),
                    ));
                }
                let obj = self.refs.resolve(obj)?;
                let class = self.heap.class_of(obj);
                if !self.heap.is_assignable(class, def.owner) {
                    return Err(AbiError::Abi(format!(
                        "{} is not an instance of {}",
                        self.heap.class(class).name,
                        self.heap.class(def.owner).name
                    )));
                }
                method = self.heap.virtual_target(class, method);
                Some(obj)
            }
        };
        self.check_return(method, expect)?;
        let slots = self.decode_args(method, args)?;
        let body = self.heap.methods[method].body.clone();
        let result = body(&mut self.heap, receiver, &slots)?;

        let well_formed = match expect {
            Expect::Void => true,
            Expect::Primitive(p) => result.primitive() == Some(p),
            Expect::Reference => matches!(result, Slot::Ref(_)),
        };
        if !well_formed {
            return Err(AbiError::Abi(format!(
                "method body returned {:?}, expected {:?}",
                result, expect
            )));
        }
        Ok(result)
    }

    fn invoke_primitive(
        &mut self,
        target: Receiver,
        id: MethodId,
        args: &[RawValue],
        kind: Primitive,
    ) -> AbiResult<RawValue> {
        let slot = self.invoke(target, id, args, Expect::Primitive(kind))?;
        slot.to_raw()
            .ok_or_else(|| AbiError::Abi(format!("expected {}, got {:?}", kind, slot)))
    }

    fn index_error(index: usize, length: usize) -> AbiError {
        AbiError::thrown(
            "java/lang/ArrayIndexOutOfBoundsException",
            format!("Index {} out of bounds for length {}", index, length),
        )
    }

    fn define_class(&mut self, name: &str, loader: RawRef, bytes: &[u8]) -> AbiResult<RawRef> {
        let Some(loader) = self.refs.resolve_opt(loader)? else {
            return Err(AbiError::thrown("java/lang/NullPointerException", "class loader is null"));
        };
        if !self.heap.is_instance_of(loader, "java/lang/ClassLoader") {
            return Err(AbiError::Abi(format!(
                "{} is not a class loader",
                self.heap.class_name_of(loader)
            )));
        }
        if !bytes.starts_with(&CLASS_FILE_MAGIC) {
            return Err(AbiError::thrown(
                "java/lang/ClassFormatError",
                format!("Incompatible magic value in class file {}", name),
            ));
        }
        if self.heap.by_name.contains_key(name) {
            return Err(AbiError::thrown(
                "java/lang/LinkageError",
                format!("duplicate class definition for name: \"{}\"", name),
            ));
        }
        let spec = self
            .staged
            .remove(name)
            .unwrap_or_else(|| ClassSpec::new(name));
        let class = self
            .heap
            .define(spec)
            .map_err(|e| AbiError::thrown("java/lang/ClassFormatError", e))?;
        Ok(self.local_class(class))
    }
}

// ============================================================================
// JvmContext
// ============================================================================

impl JvmContext for TestVm {
    fn find_class(&self, name: &str) -> AbiResult<RawRef> {
        let mut state = self.state.lock();
        let class = state
            .heap
            .resolve_class(name)
            .ok_or_else(|| AbiError::ClassNotFound(name.to_string()))?;
        Ok(state.local_class(class))
    }

    fn get_object_class(&self, obj: RawRef) -> AbiResult<RawRef> {
        let mut state = self.state.lock();
        if obj.is_null() {
            return Err(AbiError::thrown("java/lang/NullPointerException", "getClass on null"));
        }
        let obj = state.refs.resolve(obj)?;
        let class = state.heap.class_of(obj);
        Ok(state.local_class(class))
    }

    fn is_assignable_from(&self, sub: RawRef, sup: RawRef) -> bool {
        let state = self.state.lock();
        match (state.class_ref(sub), state.class_ref(sup)) {
            (Ok(sub), Ok(sup)) => state.heap.is_assignable(sub, sup),
            _ => false,
        }
    }

    fn define_class(&self, name: &str, loader: RawRef, bytes: &[u8]) -> AbiResult<RawRef> {
        self.state.lock().define_class(name, loader, bytes)
    }

    fn get_method_id(&self, class: RawRef, name: &str, signature: &str) -> AbiResult<MethodId> {
        let state = self.state.lock();
        let class = state.class_ref(class)?;
        state
            .heap
            .find_method(class, name, signature, false)
            .map(|m| MethodId::from_bits(m as u64 + 1))
            .ok_or_else(|| state.no_such_method(class, name, signature))
    }

    fn get_static_method_id(
        &self,
        class: RawRef,
        name: &str,
        signature: &str,
    ) -> AbiResult<MethodId> {
        let state = self.state.lock();
        let class = state.class_ref(class)?;
        state
            .heap
            .find_method(class, name, signature, true)
            .map(|m| MethodId::from_bits(m as u64 + 1))
            .ok_or_else(|| state.no_such_method(class, name, signature))
    }

    fn from_reflected_method(&self, member: RawRef) -> AbiResult<MethodId> {
        let state = self.state.lock();
        let obj = state.refs.resolve(member)?;
        match state.heap.entry(obj).data {
            ObjData::Member(m) => Ok(MethodId::from_bits(m as u64 + 1)),
            _ => Err(AbiError::Abi(format!(
                "{} is not a reflected method",
                state.heap.class_name_of(obj)
            ))),
        }
    }

    fn call_void_method(
        &self,
        target: Receiver,
        id: MethodId,
        args: &[RawValue],
    ) -> AbiResult<()> {
        self.state.lock().invoke(target, id, args, Expect::Void).map(|_| ())
    }

    fn call_boolean_method(
        &self,
        target: Receiver,
        id: MethodId,
        args: &[RawValue],
    ) -> AbiResult<bool> {
        let raw = self.state.lock().invoke_primitive(target, id, args, Primitive::Boolean)?;
        Ok(raw.as_bool())
    }

    fn call_byte_method(&self, target: Receiver, id: MethodId, args: &[RawValue]) -> AbiResult<i8> {
        let raw = self.state.lock().invoke_primitive(target, id, args, Primitive::Byte)?;
        Ok(raw.as_byte())
    }

    fn call_char_method(
        &self,
        target: Receiver,
        id: MethodId,
        args: &[RawValue],
    ) -> AbiResult<u16> {
        let raw = self.state.lock().invoke_primitive(target, id, args, Primitive::Char)?;
        Ok(raw.as_char())
    }

    fn call_short_method(
        &self,
        target: Receiver,
        id: MethodId,
        args: &[RawValue],
    ) -> AbiResult<i16> {
        let raw = self.state.lock().invoke_primitive(target, id, args, Primitive::Short)?;
        Ok(raw.as_short())
    }

    fn call_int_method(&self, target: Receiver, id: MethodId, args: &[RawValue]) -> AbiResult<i32> {
        let raw = self.state.lock().invoke_primitive(target, id, args, Primitive::Int)?;
        Ok(raw.as_int())
    }

    fn call_long_method(
        &self,
        target: Receiver,
        id: MethodId,
        args: &[RawValue],
    ) -> AbiResult<i64> {
        let raw = self.state.lock().invoke_primitive(target, id, args, Primitive::Long)?;
        Ok(raw.as_long())
    }

    fn call_float_method(
        &self,
        target: Receiver,
        id: MethodId,
        args: &[RawValue],
    ) -> AbiResult<f32> {
        let raw = self.state.lock().invoke_primitive(target, id, args, Primitive::Float)?;
        Ok(raw.as_float())
    }

    fn call_double_method(
        &self,
        target: Receiver,
        id: MethodId,
        args: &[RawValue],
    ) -> AbiResult<f64> {
        let raw = self.state.lock().invoke_primitive(target, id, args, Primitive::Double)?;
        Ok(raw.as_double())
    }

    fn call_object_method(
        &self,
        target: Receiver,
        id: MethodId,
        args: &[RawValue],
    ) -> AbiResult<RawRef> {
        let mut state = self.state.lock();
        let result = state.invoke(target, id, args, Expect::Reference)?;
        Ok(state.refs.acquire_opt(result.object(), RefKind::Local))
    }

    fn new_object(&self, class: RawRef, id: MethodId, args: &[RawValue]) -> AbiResult<RawRef> {
        let mut state = self.state.lock();
        let class = state.class_ref(class)?;
        let method = state.method(id)?;
        let def = &state.heap.methods[method];
        if !def.is_constructor() || def.owner != class {
            return Err(AbiError::Abi(format!(
                "{} is not a constructor of {}",
                def.name,
                state.heap.class(class).name
            )));
        }
        if !matches!(state.heap.class(class).shape, Shape::Object { interface: false }) {
            return Err(AbiError::thrown(
                "java/lang/InstantiationException",
                state.heap.class(class).name.clone(),
            ));
        }
        let slots = state.decode_args(method, args)?;
        let body = def.body.clone();
        let obj = state.heap.instantiate(class);
        body(&mut state.heap, Some(obj), &slots)?;
        Ok(state.refs.acquire(obj, RefKind::Local))
    }

    fn get_array_length(&self, array: RawRef) -> AbiResult<usize> {
        let state = self.state.lock();
        if array.is_null() {
            return Err(AbiError::thrown("java/lang/NullPointerException", "array is null"));
        }
        let obj = state.refs.resolve(array)?;
        state
            .heap
            .array_length(obj)
            .map_err(|t| AbiError::Abi(t.message))
    }

    fn new_object_array(
        &self,
        length: usize,
        element_class: RawRef,
        initial: RawRef,
    ) -> AbiResult<RawRef> {
        let mut state = self.state.lock();
        let component = state.class_ref(element_class)?;
        if state.heap.is_primitive(component) {
            return Err(AbiError::Abi(format!(
                "{} is not a reference type",
                state.heap.class(component).name
            )));
        }
        let initial = state.refs.resolve_opt(initial)?;
        if let Some(obj) = initial {
            if !state.heap.is_assignable(state.heap.class_of(obj), component) {
                return Err(AbiError::thrown(
                    "java/lang/ArrayStoreException",
                    state.heap.class_name_of(obj).to_string(),
                ));
            }
        }
        let class = state.heap.array_class_of(component);
        let array = state.heap.alloc(class, ObjData::Objects(vec![initial; length]));
        Ok(state.refs.acquire(array, RefKind::Local))
    }

    fn get_object_array_element(&self, array: RawRef, index: usize) -> AbiResult<RawRef> {
        let mut state = self.state.lock();
        let obj = state.refs.resolve(array)?;
        let element = match &state.heap.entry(obj).data {
            ObjData::Objects(v) => *v.get(index).ok_or_else(|| Inner::index_error(index, v.len()))?,
            _ => {
                return Err(AbiError::Abi(format!(
                    "{} is not an object array",
                    state.heap.class_name_of(obj)
                )))
            }
        };
        Ok(state.refs.acquire_opt(element, RefKind::Local))
    }

    fn set_object_array_element(
        &self,
        array: RawRef,
        index: usize,
        value: RawRef,
    ) -> AbiResult<()> {
        let mut state = self.state.lock();
        let obj = state.refs.resolve(array)?;
        let value = state.refs.resolve_opt(value)?;
        let Shape::Array(component) = state.heap.class(state.heap.class_of(obj)).shape else {
            return Err(AbiError::Abi(format!(
                "{} is not an object array",
                state.heap.class_name_of(obj)
            )));
        };
        if let Some(v) = value {
            if !state.heap.is_assignable(state.heap.class_of(v), component) {
                return Err(AbiError::thrown(
                    "java/lang/ArrayStoreException",
                    state.heap.class_name_of(v).to_string(),
                ));
            }
        }
        match &mut state.heap.entry_mut(obj).data {
            ObjData::Objects(v) => {
                let length = v.len();
                let slot = v.get_mut(index).ok_or_else(|| Inner::index_error(index, length))?;
                *slot = value;
                Ok(())
            }
            _ => Err(AbiError::Abi("not an object array".into())),
        }
    }

    fn get_primitive_array_element(
        &self,
        array: RawRef,
        index: usize,
        kind: Primitive,
    ) -> AbiResult<RawValue> {
        let state = self.state.lock();
        let obj = state.refs.resolve(array)?;
        match &state.heap.entry(obj).data {
            ObjData::Primitives(k, v) if *k == kind => {
                v.get(index).copied().ok_or_else(|| Inner::index_error(index, v.len()))
            }
            _ => Err(AbiError::Abi(format!(
                "{} accessed as {} array",
                state.heap.class_name_of(obj),
                kind
            ))),
        }
    }

    fn set_primitive_array_element(
        &self,
        array: RawRef,
        index: usize,
        kind: Primitive,
        value: RawValue,
    ) -> AbiResult<()> {
        let mut state = self.state.lock();
        let obj = state.refs.resolve(array)?;
        let class_name = state.heap.class_name_of(obj).to_string();
        match &mut state.heap.entry_mut(obj).data {
            ObjData::Primitives(k, v) if *k == kind => {
                let length = v.len();
                let slot = v.get_mut(index).ok_or_else(|| Inner::index_error(index, length))?;
                *slot = normalize(kind, value);
                Ok(())
            }
            _ => Err(AbiError::Abi(format!("{} accessed as {} array", class_name, kind))),
        }
    }

    fn new_local_ref(&self, obj: RawRef) -> RawRef {
        let mut state = self.state.lock();
        match state.refs.resolve(obj) {
            Ok(o) => state.refs.acquire(o, RefKind::Local),
            Err(_) => RawRef::NULL,
        }
    }

    fn new_global_ref(&self, obj: RawRef) -> RawRef {
        let mut state = self.state.lock();
        if !state.refs.has_room(RefKind::Global) {
            return RawRef::NULL;
        }
        match state.refs.resolve(obj) {
            Ok(o) => state.refs.acquire(o, RefKind::Global),
            Err(_) => RawRef::NULL,
        }
    }

    fn delete_local_ref(&self, obj: RawRef) {
        self.state.lock().refs.release(obj, RefKind::Local);
    }

    fn delete_global_ref(&self, obj: RawRef) {
        self.state.lock().refs.release(obj, RefKind::Global);
    }

    fn new_string_utf(&self, text: &str) -> AbiResult<RawRef> {
        let mut state = self.state.lock();
        let obj = state.heap.new_string(text);
        Ok(state.refs.acquire(obj, RefKind::Local))
    }

    fn get_string_utf(&self, string: RawRef) -> AbiResult<String> {
        let state = self.state.lock();
        if string.is_null() {
            return Err(AbiError::thrown("java/lang/NullPointerException", "string is null"));
        }
        let obj = state.refs.resolve(string)?;
        Ok(state.heap.string(obj)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_class_and_release() {
        let vm = TestVm::new();
        let string = vm.find_class("java/lang/String").unwrap();
        assert_eq!(vm.class_name_of(string).as_deref(), Some("java/lang/Class"));
        assert_eq!(vm.live_local_refs(), 1);
        vm.delete_local_ref(string);
        assert_eq!(vm.live_local_refs(), 0);
        assert!(matches!(
            vm.find_class("demo/Missing"),
            Err(AbiError::ClassNotFound(_))
        ));
    }

    #[test]
    fn test_class_objects_are_canonical() {
        let vm = TestVm::new();
        let a = vm.find_class("java/lang/Integer").unwrap();
        let b = vm.find_class("java/lang/Integer").unwrap();
        assert_ne!(a, b);
        assert!(vm.is_same_object(a, b));
    }

    #[test]
    fn test_array_classes_resolve_on_demand() {
        let vm = TestVm::new();
        let ints = vm.find_class("[I").unwrap();
        let strings = vm.find_class("[Ljava/lang/String;").unwrap();
        let objects = vm.find_class("[Ljava/lang/Object;").unwrap();
        assert!(vm.is_assignable_from(strings, objects));
        assert!(!vm.is_assignable_from(ints, objects));
    }

    #[test]
    fn test_string_round_trip() {
        let vm = TestVm::new();
        let s = vm.new_string_utf("héllo").unwrap();
        assert_eq!(vm.get_string_utf(s).unwrap(), "héllo");
    }

    #[test]
    fn test_static_and_instance_receivers_are_checked() {
        let vm = TestVm::new();
        let integer = vm.find_class("java/lang/Integer").unwrap();
        let value_of = vm
            .get_static_method_id(integer, "valueOf", "(I)Ljava/lang/Integer;")
            .unwrap();
        let boxed = vm
            .call_object_method(Receiver::Static(integer), value_of, &[RawValue::int(7)])
            .unwrap();
        assert!(vm
            .call_object_method(Receiver::Instance(boxed), value_of, &[RawValue::int(7)])
            .is_err());

        let int_value = vm.get_method_id(integer, "intValue", "()I").unwrap();
        assert_eq!(
            vm.call_int_method(Receiver::Instance(boxed), int_value, &[]).unwrap(),
            7
        );
        assert!(vm
            .call_long_method(Receiver::Instance(boxed), int_value, &[])
            .is_err());
        let npe = vm.call_int_method(Receiver::Instance(RawRef::NULL), int_value, &[]);
        assert!(matches!(npe, Err(AbiError::Thrown { class, .. }) if class == "java/lang/NullPointerException"));
    }

    #[test]
    fn test_primitive_array_bounds_throw() {
        let vm = TestVm::new();
        let array = vm.new_primitive_array(Primitive::Int, &[RawValue::int(1), RawValue::int(2)]);
        assert_eq!(vm.get_array_length(array).unwrap(), 2);
        assert_eq!(
            vm.get_primitive_array_element(array, 1, Primitive::Int).unwrap(),
            RawValue::int(2)
        );
        let err = vm
            .get_primitive_array_element(array, 2, Primitive::Int)
            .unwrap_err();
        assert_eq!(
            err,
            AbiError::thrown(
                "java/lang/ArrayIndexOutOfBoundsException",
                "Index 2 out of bounds for length 2"
            )
        );
        assert!(vm
            .get_primitive_array_element(array, 0, Primitive::Long)
            .is_err());
    }

    #[test]
    fn test_object_array_store_check() {
        let vm = TestVm::new();
        let string_class = vm.find_class("java/lang/String").unwrap();
        let array = vm
            .new_object_array(2, string_class, RawRef::NULL)
            .unwrap();
        let s = vm.new_string_utf("a").unwrap();
        vm.set_object_array_element(array, 0, s).unwrap();
        let integer = vm.find_class("java/lang/Integer").unwrap();
        let err = vm.set_object_array_element(array, 1, integer).unwrap_err();
        assert!(matches!(err, AbiError::Thrown { class, .. } if class == "java/lang/ArrayStoreException"));

        let read = vm.get_object_array_element(array, 0).unwrap();
        assert!(vm.is_same_object(read, s));
        assert!(vm.get_object_array_element(array, 1).unwrap().is_null());
    }

    #[test]
    fn test_define_class_checks_loader_and_magic() {
        let vm = TestVm::new();
        let loader_class = vm.find_class("java/lang/ClassLoader").unwrap();
        let factory = vm
            .get_static_method_id(loader_class, "getSystemClassLoader", "()Ljava/lang/ClassLoader;")
            .unwrap();
        let loader = vm
            .call_object_method(Receiver::Static(loader_class), factory, &[])
            .unwrap();

        let bytes = [0xCA, 0xFE, 0xBA, 0xBE, 0, 0, 0, 52];
        assert!(vm.define_class("demo/Loaded", RawRef::NULL, &bytes).is_err());
        assert!(matches!(
            vm.define_class("demo/Loaded", loader, b"nope"),
            Err(AbiError::Thrown { class, .. }) if class == "java/lang/ClassFormatError"
        ));
        let loaded = vm.define_class("demo/Loaded", loader, &bytes).unwrap();
        assert!(!loaded.is_null());
        assert!(matches!(
            vm.define_class("demo/Loaded", loader, &bytes),
            Err(AbiError::Thrown { class, .. }) if class == "java/lang/LinkageError"
        ));
    }
}
