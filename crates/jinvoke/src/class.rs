//! Class descriptors

use std::fmt;

use jinvoke_sdk::{RawRef, Receiver};
use once_cell::unsync::OnceCell;
use tracing::debug;

use crate::dispatch;
use crate::env::Env;
use crate::error::{BridgeError, BridgeResult};
use crate::method::{Method, MethodList};
use crate::object::{Object, Value};
use crate::reference::Ref;
use crate::{reflect, resolve};

/// A managed class, or the null class (the class of a null reference).
pub struct Class<'e> {
    env: &'e Env,
    handle: Option<Ref<'e>>,
    name: OnceCell<String>,
}

impl<'e> Class<'e> {
    /// The null class
    pub fn null(env: &'e Env) -> Self {
        Self {
            env,
            handle: None,
            name: OnceCell::new(),
        }
    }

    /// Look up a class by slash-separated name (`java/lang/String`, `[I`)
    pub fn for_name(env: &'e Env, name: &str) -> BridgeResult<Self> {
        debug!(target: "jinvoke::class", name, "find class");
        let raw = env.context().find_class(name)?;
        Ok(Self::from_local_ref(env, raw))
    }

    /// Take ownership of a local reference to a class object. A null
    /// reference yields the null class.
    pub fn from_local_ref(env: &'e Env, raw: RawRef) -> Self {
        Self {
            env,
            handle: Ref::adopt_local(env.context(), raw),
            name: OnceCell::new(),
        }
    }

    /// Wrap an object that is itself a class object
    pub fn from_object(object: &Object<'e>) -> BridgeResult<Self> {
        let env = object.env();
        match object.value() {
            Value::Reference(Some(r)) => {
                let class = object.get_class()?;
                if class.name()? != "java/lang/Class" {
                    return Err(BridgeError::type_mismatch("java/lang/Class", class.name()?));
                }
                Ok(Self {
                    env,
                    handle: Some(r.clone()),
                    name: OnceCell::new(),
                })
            }
            Value::Reference(None) => Ok(Self::null(env)),
            _ => Err(BridgeError::type_mismatch("java/lang/Class", object.kind().to_string())),
        }
    }

    /// Raw handle; `RawRef::NULL` for the null class
    pub fn raw(&self) -> RawRef {
        self.handle.as_ref().map(Ref::raw).unwrap_or_default()
    }

    /// Whether this is the null class
    pub fn is_null(&self) -> bool {
        self.handle.is_none()
    }

    /// Slash-separated class name (`java/lang/String`, `[I`, `int`)
    pub fn name(&self) -> BridgeResult<&str> {
        let raw = self.handle.as_ref().ok_or(BridgeError::NullClass)?.raw();
        self.name
            .get_or_try_init(|| reflect::class_name(self.env.context(), raw))
            .map(String::as_str)
    }

    /// Whether values of `other` may be assigned to this class
    pub fn is_assignable_from(&self, other: &Class<'_>) -> bool {
        !self.is_null()
            && !other.is_null()
            && self.env.context().is_assignable_from(other.raw(), self.raw())
    }

    /// Public methods, declared and inherited, in reflection order
    pub fn get_methods(&self) -> BridgeResult<MethodList<'e>> {
        reflect::methods(self.env, self)
    }

    /// Public constructors in reflection order
    pub fn get_constructors(&self) -> BridgeResult<MethodList<'e>> {
        reflect::constructors(self.env, self)
    }

    /// First method named `name` applicable to arguments of classes `args`
    pub fn lookup_method(&self, name: &str, args: &[Class<'e>]) -> BridgeResult<Method<'e>> {
        resolve::resolve(self.env, self, self.get_methods()?, Some(name), args)
    }

    /// First constructor applicable to arguments of classes `args`
    pub fn lookup_constructor(&self, args: &[Class<'e>]) -> BridgeResult<Method<'e>> {
        resolve::resolve(self.env, self, self.get_constructors()?, None, args)
    }

    /// Resolve and invoke a static method
    pub fn call_static(&self, name: &str, args: &[Object<'e>]) -> BridgeResult<Object<'e>> {
        let arg_classes = args
            .iter()
            .map(Object::get_class)
            .collect::<BridgeResult<Vec<_>>>()?;
        let method = self.lookup_method(name, &arg_classes)?;
        if !method.is_static() {
            return Err(BridgeError::type_mismatch(
                "static method",
                format!("instance method {}.{}", self.name()?, name),
            ));
        }
        dispatch::call_method(self.env, Receiver::Static(self.raw()), &method, args)
    }

    /// Read a public static field
    pub fn static_field(&self, name: &str) -> BridgeResult<Object<'e>> {
        let field = self
            .as_object()
            .call("getField", &[Object::string(self.env, name)?])?;
        field.call("get", &[Object::null(self.env)])
    }

    /// The class object as a reference value
    pub fn as_object(&self) -> Object<'e> {
        Object::from_value(self.env, Value::Reference(self.handle.clone()))
    }
}

impl Clone for Class<'_> {
    fn clone(&self) -> Self {
        Self {
            env: self.env,
            handle: self.handle.clone(),
            name: self.name.clone(),
        }
    }
}

impl fmt::Debug for Class<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.handle, self.name.get()) {
            (None, _) => write!(f, "Class(null)"),
            (Some(_), Some(name)) => write!(f, "Class({})", name),
            (Some(r), None) => write!(f, "Class({:?})", r.raw()),
        }
    }
}
