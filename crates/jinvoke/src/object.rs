//! Tagged values
//!
//! An [`Object`] is the universal argument and result currency: one of the
//! eight primitive kinds held inline, or an owned reference (possibly null).
//! The discriminant and the payload cannot disagree; `Value` is a closed enum.

use std::fmt;

use jinvoke_sdk::{Primitive, RawRef, RawValue, Receiver};
use tracing::debug;

use crate::array::ArrayElement;
use crate::class::Class;
use crate::dispatch;
use crate::env::Env;
use crate::error::{BridgeError, BridgeResult};
use crate::kind::Kind;
use crate::reference::Ref;

/// Payload of a tagged value.
#[derive(Debug, Clone)]
pub enum Value<'e> {
    /// boolean
    Boolean(bool),
    /// byte
    Byte(i8),
    /// char (UTF-16 code unit)
    Char(u16),
    /// short
    Short(i16),
    /// int
    Int(i32),
    /// long
    Long(i64),
    /// float
    Float(f32),
    /// double
    Double(f64),
    /// Owned reference; `None` is the managed null
    Reference(Option<Ref<'e>>),
}

impl Value<'_> {
    /// Discriminant
    pub fn kind(&self) -> Kind {
        match self {
            Value::Boolean(_) => Kind::Boolean,
            Value::Byte(_) => Kind::Byte,
            Value::Char(_) => Kind::Char,
            Value::Short(_) => Kind::Short,
            Value::Int(_) => Kind::Int,
            Value::Long(_) => Kind::Long,
            Value::Float(_) => Kind::Float,
            Value::Double(_) => Kind::Double,
            Value::Reference(_) => Kind::Reference,
        }
    }
}

/// Numeric view of a primitive used by the coercing accessors
#[derive(Clone, Copy)]
enum Numeric {
    Integral(i64),
    Floating(f64),
}

/// A tagged value bound to its environment.
#[derive(Clone)]
pub struct Object<'e> {
    env: &'e Env,
    value: Value<'e>,
}

impl<'e> Object<'e> {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Wrap a payload
    pub fn from_value(env: &'e Env, value: Value<'e>) -> Self {
        Self { env, value }
    }

    /// The managed null
    pub fn null(env: &'e Env) -> Self {
        Self::from_value(env, Value::Reference(None))
    }

    /// boolean value
    pub fn bool(env: &'e Env, v: bool) -> Self {
        Self::from_value(env, Value::Boolean(v))
    }

    /// byte value
    pub fn byte(env: &'e Env, v: i8) -> Self {
        Self::from_value(env, Value::Byte(v))
    }

    /// char value
    pub fn char(env: &'e Env, v: u16) -> Self {
        Self::from_value(env, Value::Char(v))
    }

    /// short value
    pub fn short(env: &'e Env, v: i16) -> Self {
        Self::from_value(env, Value::Short(v))
    }

    /// int value
    pub fn int(env: &'e Env, v: i32) -> Self {
        Self::from_value(env, Value::Int(v))
    }

    /// long value
    pub fn long(env: &'e Env, v: i64) -> Self {
        Self::from_value(env, Value::Long(v))
    }

    /// float value
    pub fn float(env: &'e Env, v: f32) -> Self {
        Self::from_value(env, Value::Float(v))
    }

    /// double value
    pub fn double(env: &'e Env, v: f64) -> Self {
        Self::from_value(env, Value::Double(v))
    }

    /// New runtime string
    pub fn string(env: &'e Env, text: &str) -> BridgeResult<Self> {
        let raw = env.context().new_string_utf(text)?;
        Ok(Self::from_local_ref(env, raw))
    }

    /// Take ownership of a local reference returned by the runtime
    pub fn from_local_ref(env: &'e Env, raw: RawRef) -> Self {
        Self::from_value(env, Value::Reference(Ref::adopt_local(env.context(), raw)))
    }

    /// Decode an untagged slot as `kind`
    pub(crate) fn from_raw(env: &'e Env, kind: Primitive, raw: RawValue) -> Self {
        let value = match kind {
            Primitive::Boolean => Value::Boolean(raw.as_bool()),
            Primitive::Byte => Value::Byte(raw.as_byte()),
            Primitive::Char => Value::Char(raw.as_char()),
            Primitive::Short => Value::Short(raw.as_short()),
            Primitive::Int => Value::Int(raw.as_int()),
            Primitive::Long => Value::Long(raw.as_long()),
            Primitive::Float => Value::Float(raw.as_float()),
            Primitive::Double => Value::Double(raw.as_double()),
        };
        Self::from_value(env, value)
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Environment this value belongs to
    pub fn env(&self) -> &'e Env {
        self.env
    }

    /// Payload
    pub fn value(&self) -> &Value<'e> {
        &self.value
    }

    /// Take the payload
    pub fn into_value(self) -> Value<'e> {
        self.value
    }

    /// Discriminant
    pub fn kind(&self) -> Kind {
        self.value.kind()
    }

    /// Whether this is the managed null
    pub fn is_null(&self) -> bool {
        matches!(self.value, Value::Reference(None))
    }

    /// Untagged native form of the payload. References stay owned by `self`.
    pub fn raw(&self) -> RawValue {
        match &self.value {
            Value::Boolean(v) => RawValue::bool(*v),
            Value::Byte(v) => RawValue::byte(*v),
            Value::Char(v) => RawValue::char(*v),
            Value::Short(v) => RawValue::short(*v),
            Value::Int(v) => RawValue::int(*v),
            Value::Long(v) => RawValue::long(*v),
            Value::Float(v) => RawValue::float(*v),
            Value::Double(v) => RawValue::double(*v),
            Value::Reference(r) => RawValue::reference(r.as_ref().map(Ref::raw).unwrap_or_default()),
        }
    }

    /// Class of the value: the wrapper class for primitives, the runtime
    /// class for references, the null class for null.
    pub fn get_class(&self) -> BridgeResult<Class<'e>> {
        match &self.value {
            Value::Reference(None) => Ok(Class::null(self.env)),
            Value::Reference(Some(r)) => {
                let raw = self.env.context().get_object_class(r.raw())?;
                Ok(Class::from_local_ref(self.env, raw))
            }
            primitive => match primitive.kind().primitive() {
                Some(p) => Class::for_name(self.env, p.wrapper_class()),
                None => Err(BridgeError::type_mismatch("primitive", "reference")),
            },
        }
    }

    /// Promote an owned reference to a global reference. No-op for
    /// primitives and null; idempotent. If the runtime refuses, the error
    /// is returned and the value keeps its local reference.
    pub fn make_global(&mut self) -> BridgeResult<()> {
        match &mut self.value {
            Value::Reference(Some(r)) => r.promote(),
            _ => Ok(()),
        }
    }

    /// Copy of this value, duplicating any owned reference. Unlike `clone`,
    /// a refused duplicate is returned as an error.
    pub fn try_clone(&self) -> BridgeResult<Self> {
        let value = match &self.value {
            Value::Reference(Some(r)) => Value::Reference(Some(r.try_clone()?)),
            other => other.clone(),
        };
        Ok(Self::from_value(self.env, value))
    }

    // ========================================================================
    // Calls
    // ========================================================================

    /// Resolve `name` over the classes of `args` and invoke it on this value
    pub fn call(&self, name: &str, args: &[Object<'e>]) -> BridgeResult<Object<'e>> {
        let class = self.get_class()?;
        let arg_classes = args
            .iter()
            .map(Object::get_class)
            .collect::<BridgeResult<Vec<_>>>()?;
        let method = class.lookup_method(name, &arg_classes)?;
        if method.is_static() {
            return dispatch::call_method(self.env, Receiver::Static(class.raw()), &method, args);
        }
        let receiver = self.receiver()?;
        dispatch::call_method(self.env, Receiver::Instance(receiver.raw()), &method, args)
    }

    /// `toString()` of the value, as native text
    pub fn to_string(&self) -> BridgeResult<String> {
        let class = self.get_class()?;
        if class.is_null() {
            return Err(BridgeError::NullClass);
        }
        let ctx = self.env.context();
        let id = ctx.get_method_id(class.raw(), "toString", "()Ljava/lang/String;")?;
        let receiver = self.receiver()?;
        let raw = ctx.call_object_method(Receiver::Instance(receiver.raw()), id, &[])?;
        Object::from_local_ref(self.env, raw).as_string()
    }

    /// Read a public field through reflection
    pub fn field(&self, name: &str) -> BridgeResult<Object<'e>> {
        let field = self
            .get_class()?
            .as_object()
            .call("getField", &[Object::string(self.env, name)?])?;
        field.call("get", &[self.clone()])
    }

    /// A reference usable as call receiver: the value itself, or a boxed
    /// copy of a primitive
    fn receiver(&self) -> BridgeResult<Ref<'e>> {
        match &self.value {
            Value::Reference(Some(r)) => Ok(r.clone()),
            Value::Reference(None) => Err(BridgeError::NullClass),
            _ => dispatch::box_primitive(self).and_then(|boxed| match boxed.into_value() {
                Value::Reference(Some(r)) => Ok(r),
                _ => Err(BridgeError::type_mismatch("boxed primitive", "null")),
            }),
        }
    }

    // ========================================================================
    // Arrays
    // ========================================================================

    /// Length of an array value
    pub fn array_size(&self) -> BridgeResult<usize> {
        let array = self.array_ref()?;
        let class = self.get_class()?;
        let name = class.name()?;
        if !name.starts_with('[') {
            return Err(BridgeError::type_mismatch("array", name));
        }
        Ok(self.env.context().get_array_length(array)?)
    }

    /// Proxy for slot `index` of an array value
    pub fn element(&self, index: usize) -> BridgeResult<ArrayElement<'_, 'e>> {
        self.array_ref()?;
        let class = self.get_class()?;
        let name = class.name()?;
        let mut chars = name.chars();
        if chars.next() != Some('[') {
            return Err(BridgeError::type_mismatch("array", name));
        }
        let tag = chars.next().unwrap_or('\0');
        let kind = Kind::from_element_tag(tag).ok_or(BridgeError::UnsupportedType(tag))?;
        debug!(target: "jinvoke::array", class = name, index, kind = %kind, "element access");
        ArrayElement::new(self, index, kind)
    }

    /// Raw handle of a non-null reference, or a type mismatch
    pub(crate) fn array_ref(&self) -> BridgeResult<RawRef> {
        match &self.value {
            Value::Reference(Some(r)) => Ok(r.raw()),
            Value::Reference(None) => Err(BridgeError::type_mismatch("array", "null")),
            other => Err(BridgeError::type_mismatch("array", other.kind().to_string())),
        }
    }

    // ========================================================================
    // Typed accessors
    // ========================================================================

    fn numeric(&self) -> BridgeResult<Numeric> {
        Ok(match self.value {
            Value::Boolean(v) => Numeric::Integral(v as i64),
            Value::Byte(v) => Numeric::Integral(v as i64),
            Value::Char(v) => Numeric::Integral(v as i64),
            Value::Short(v) => Numeric::Integral(v as i64),
            Value::Int(v) => Numeric::Integral(v as i64),
            Value::Long(v) => Numeric::Integral(v),
            Value::Float(v) => Numeric::Floating(v as f64),
            Value::Double(v) => Numeric::Floating(v),
            Value::Reference(_) => return Err(BridgeError::type_mismatch("primitive", "reference")),
        })
    }

    /// As boolean: non-zero is `true`
    pub fn as_bool(&self) -> BridgeResult<bool> {
        Ok(match self.numeric()? {
            Numeric::Integral(v) => v != 0,
            Numeric::Floating(v) => v != 0.0,
        })
    }

    /// As byte, truncating
    pub fn as_byte(&self) -> BridgeResult<i8> {
        Ok(match self.numeric()? {
            Numeric::Integral(v) => v as i8,
            Numeric::Floating(v) => v as i32 as i8,
        })
    }

    /// As char, truncating to a UTF-16 code unit
    pub fn as_char(&self) -> BridgeResult<u16> {
        Ok(match self.numeric()? {
            Numeric::Integral(v) => v as u16,
            Numeric::Floating(v) => v as i32 as u16,
        })
    }

    /// As short, truncating
    pub fn as_short(&self) -> BridgeResult<i16> {
        Ok(match self.numeric()? {
            Numeric::Integral(v) => v as i16,
            Numeric::Floating(v) => v as i32 as i16,
        })
    }

    /// As int, truncating
    pub fn as_int(&self) -> BridgeResult<i32> {
        Ok(match self.numeric()? {
            Numeric::Integral(v) => v as i32,
            Numeric::Floating(v) => v as i32,
        })
    }

    /// As long
    pub fn as_long(&self) -> BridgeResult<i64> {
        Ok(match self.numeric()? {
            Numeric::Integral(v) => v,
            Numeric::Floating(v) => v as i64,
        })
    }

    /// As float
    pub fn as_float(&self) -> BridgeResult<f32> {
        Ok(match self.numeric()? {
            Numeric::Integral(v) => v as f32,
            Numeric::Floating(v) => v as f32,
        })
    }

    /// As double
    pub fn as_double(&self) -> BridgeResult<f64> {
        Ok(match self.numeric()? {
            Numeric::Integral(v) => v as f64,
            Numeric::Floating(v) => v,
        })
    }

    /// Untagged slot of this value converted to `kind`
    pub(crate) fn coerce(&self, kind: Primitive) -> BridgeResult<RawValue> {
        Ok(match kind {
            Primitive::Boolean => RawValue::bool(self.as_bool()?),
            Primitive::Byte => RawValue::byte(self.as_byte()?),
            Primitive::Char => RawValue::char(self.as_char()?),
            Primitive::Short => RawValue::short(self.as_short()?),
            Primitive::Int => RawValue::int(self.as_int()?),
            Primitive::Long => RawValue::long(self.as_long()?),
            Primitive::Float => RawValue::float(self.as_float()?),
            Primitive::Double => RawValue::double(self.as_double()?),
        })
    }

    /// Native text of a runtime string
    pub fn as_string(&self) -> BridgeResult<String> {
        match &self.value {
            Value::Reference(Some(r)) => Ok(self.env.context().get_string_utf(r.raw())?),
            Value::Reference(None) => Err(BridgeError::type_mismatch("java/lang/String", "null")),
            other => Err(BridgeError::type_mismatch(
                "java/lang/String",
                other.kind().to_string(),
            )),
        }
    }
}

impl fmt::Debug for Object<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}
