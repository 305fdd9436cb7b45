//! JvmContext trait: abstract runtime operations
//!
//! Defines the interface a managed runtime exposes to native code. The
//! dispatch core programs against this trait only; the concrete
//! implementation (a real VM binding, or the in-memory test VM) lives
//! elsewhere.
//!
//! All methods take `&self`. Threading and attachment constraints are the
//! implementation's business and are assumed satisfied by the caller.

use crate::error::AbiResult;
use crate::value::{MethodId, Primitive, RawRef, RawValue};

/// What a call is dispatched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// Instance call on an object
    Instance(RawRef),
    /// Static call on a class
    Static(RawRef),
}

impl Receiver {
    /// The underlying object or class reference
    pub fn raw(self) -> RawRef {
        match self {
            Receiver::Instance(r) | Receiver::Static(r) => r,
        }
    }
}

/// Abstract managed-runtime context.
///
/// References returned by this trait are new local references owned by the
/// caller, unless documented otherwise.
pub trait JvmContext {
    // ========================================================================
    // Classes
    // ========================================================================

    /// Look up a class by slash-separated name (`java/lang/String`, `[I`)
    fn find_class(&self, name: &str) -> AbiResult<RawRef>;

    /// Get the class of a non-null object
    fn get_object_class(&self, obj: RawRef) -> AbiResult<RawRef>;

    /// Whether a value of class `sub` can be assigned to a slot of class `sup`
    fn is_assignable_from(&self, sub: RawRef, sup: RawRef) -> bool;

    /// Define a class from raw class-file bytes through `loader`
    fn define_class(&self, name: &str, loader: RawRef, bytes: &[u8]) -> AbiResult<RawRef>;

    // ========================================================================
    // Member ids
    // ========================================================================

    /// Raw lookup of an instance method by exact name and signature
    fn get_method_id(&self, class: RawRef, name: &str, signature: &str) -> AbiResult<MethodId>;

    /// Raw lookup of a static method by exact name and signature
    fn get_static_method_id(
        &self,
        class: RawRef,
        name: &str,
        signature: &str,
    ) -> AbiResult<MethodId>;

    /// Call-target id of a reflected method or constructor object
    fn from_reflected_method(&self, member: RawRef) -> AbiResult<MethodId>;

    // ========================================================================
    // Invocation
    // ========================================================================

    /// Invoke a method returning `void`
    fn call_void_method(&self, target: Receiver, id: MethodId, args: &[RawValue])
        -> AbiResult<()>;

    /// Invoke a method returning `boolean`
    fn call_boolean_method(
        &self,
        target: Receiver,
        id: MethodId,
        args: &[RawValue],
    ) -> AbiResult<bool>;

    /// Invoke a method returning `byte`
    fn call_byte_method(&self, target: Receiver, id: MethodId, args: &[RawValue])
        -> AbiResult<i8>;

    /// Invoke a method returning `char`
    fn call_char_method(&self, target: Receiver, id: MethodId, args: &[RawValue])
        -> AbiResult<u16>;

    /// Invoke a method returning `short`
    fn call_short_method(
        &self,
        target: Receiver,
        id: MethodId,
        args: &[RawValue],
    ) -> AbiResult<i16>;

    /// Invoke a method returning `int`
    fn call_int_method(&self, target: Receiver, id: MethodId, args: &[RawValue])
        -> AbiResult<i32>;

    /// Invoke a method returning `long`
    fn call_long_method(&self, target: Receiver, id: MethodId, args: &[RawValue])
        -> AbiResult<i64>;

    /// Invoke a method returning `float`
    fn call_float_method(
        &self,
        target: Receiver,
        id: MethodId,
        args: &[RawValue],
    ) -> AbiResult<f32>;

    /// Invoke a method returning `double`
    fn call_double_method(
        &self,
        target: Receiver,
        id: MethodId,
        args: &[RawValue],
    ) -> AbiResult<f64>;

    /// Invoke a method returning a reference (new local reference, may be null)
    fn call_object_method(
        &self,
        target: Receiver,
        id: MethodId,
        args: &[RawValue],
    ) -> AbiResult<RawRef>;

    /// Allocate an instance of `class` and run constructor `id` on it
    fn new_object(&self, class: RawRef, id: MethodId, args: &[RawValue]) -> AbiResult<RawRef>;

    // ========================================================================
    // Arrays
    // ========================================================================

    /// Length of an array object
    fn get_array_length(&self, array: RawRef) -> AbiResult<usize>;

    /// Allocate an object array with every slot set to `initial`
    fn new_object_array(
        &self,
        length: usize,
        element_class: RawRef,
        initial: RawRef,
    ) -> AbiResult<RawRef>;

    /// Read one slot of an object array
    fn get_object_array_element(&self, array: RawRef, index: usize) -> AbiResult<RawRef>;

    /// Write one slot of an object array
    fn set_object_array_element(&self, array: RawRef, index: usize, value: RawRef)
        -> AbiResult<()>;

    /// Read one slot of a primitive array of kind `kind`
    fn get_primitive_array_element(
        &self,
        array: RawRef,
        index: usize,
        kind: Primitive,
    ) -> AbiResult<RawValue>;

    /// Write one slot of a primitive array of kind `kind`
    fn set_primitive_array_element(
        &self,
        array: RawRef,
        index: usize,
        kind: Primitive,
        value: RawValue,
    ) -> AbiResult<()>;

    // ========================================================================
    // Reference lifetime
    // ========================================================================

    /// Acquire a new local reference to the same object
    fn new_local_ref(&self, obj: RawRef) -> RawRef;

    /// Acquire a new global reference to the same object
    fn new_global_ref(&self, obj: RawRef) -> RawRef;

    /// Release a local reference
    fn delete_local_ref(&self, obj: RawRef);

    /// Release a global reference
    fn delete_global_ref(&self, obj: RawRef);

    // ========================================================================
    // Strings
    // ========================================================================

    /// Create a runtime string from native text
    fn new_string_utf(&self, text: &str) -> AbiResult<RawRef>;

    /// Read a runtime string back as native text
    fn get_string_utf(&self, string: RawRef) -> AbiResult<String>;
}
