//! Dispatcher: argument marshaling and typed invocation
//!
//! Arguments are converted to untagged slots against the resolved
//! parameter classes, then the call variant is chosen by the method's
//! return type. Boxed temporaries created while marshaling live in
//! [`Marshaled`] and are released once the call returns, whether it
//! succeeded or not.

use jinvoke_sdk::{MethodId, Primitive, RawRef, RawValue, Receiver};
use tracing::debug;

use crate::class::Class;
use crate::env::Env;
use crate::error::{BridgeError, BridgeResult};
use crate::kind::ReturnType;
use crate::method::Method;
use crate::object::{Object, Value};

/// Marshaled argument slots plus the temporaries they point into
pub(crate) struct Marshaled<'e> {
    values: Vec<RawValue>,
    _temporaries: Vec<Object<'e>>,
}

impl Marshaled<'_> {
    pub(crate) fn values(&self) -> &[RawValue] {
        &self.values
    }
}

/// Box a primitive value through `valueOf` of its wrapper class
pub(crate) fn box_primitive<'e>(value: &Object<'e>) -> BridgeResult<Object<'e>> {
    let Some(p) = value.kind().primitive() else {
        return Ok(value.clone());
    };
    let env = value.env();
    let ctx = env.context();
    let wrapper = Class::for_name(env, p.wrapper_class())?;
    let signature = format!("({})L{};", p.descriptor(), p.wrapper_class());
    let id = ctx.get_static_method_id(wrapper.raw(), "valueOf", &signature)?;
    let raw = ctx.call_object_method(Receiver::Static(wrapper.raw()), id, &[value.raw()])?;
    Ok(Object::from_local_ref(env, raw))
}

/// Unbox a wrapper object through its `<kind>Value()` accessor
fn unbox(env: &Env, boxed: RawRef, kind: Primitive) -> BridgeResult<RawValue> {
    let ctx = env.context();
    let class = Class::from_local_ref(env, ctx.get_object_class(boxed)?);
    let name = format!("{}Value", kind.name());
    let signature = format!("(){}", kind.descriptor());
    let id = ctx.get_method_id(class.raw(), &name, &signature)?;
    Ok(invoke(env, Receiver::Instance(boxed), id, ReturnType::Primitive(kind), &[])?.raw())
}

/// Convert `args` to untagged slots for parameters `params`
pub(crate) fn marshal<'e>(
    env: &'e Env,
    params: &[Class<'e>],
    args: &[Object<'e>],
) -> BridgeResult<Marshaled<'e>> {
    if params.len() != args.len() {
        return Err(BridgeError::type_mismatch(
            format!("{} arguments", params.len()),
            format!("{} arguments", args.len()),
        ));
    }
    let mut values = Vec::with_capacity(args.len());
    let mut temporaries = Vec::new();

    for (param, arg) in params.iter().zip(args) {
        let param_name = param.name()?;
        match (Primitive::from_name(param_name), arg.value()) {
            (Some(p), Value::Reference(Some(r))) => values.push(unbox(env, r.raw(), p)?),
            (Some(p), Value::Reference(None)) => {
                return Err(BridgeError::type_mismatch(p.name(), "null"));
            }
            (Some(p), _) => values.push(arg.coerce(p)?),
            (None, Value::Reference(_)) => values.push(arg.raw()),
            (None, _) => {
                let boxed = box_primitive(arg)?;
                values.push(boxed.raw());
                temporaries.push(boxed);
            }
        }
    }

    Ok(Marshaled {
        values,
        _temporaries: temporaries,
    })
}

/// Invoke `id` with the call variant selected by `returns`
pub(crate) fn invoke<'e>(
    env: &'e Env,
    target: Receiver,
    id: MethodId,
    returns: ReturnType,
    args: &[RawValue],
) -> BridgeResult<Object<'e>> {
    let ctx = env.context();
    let result = match returns {
        ReturnType::Void => {
            ctx.call_void_method(target, id, args)?;
            Object::null(env)
        }
        ReturnType::Primitive(p) => match p {
            Primitive::Boolean => Object::bool(env, ctx.call_boolean_method(target, id, args)?),
            Primitive::Byte => Object::byte(env, ctx.call_byte_method(target, id, args)?),
            Primitive::Char => Object::char(env, ctx.call_char_method(target, id, args)?),
            Primitive::Short => Object::short(env, ctx.call_short_method(target, id, args)?),
            Primitive::Int => Object::int(env, ctx.call_int_method(target, id, args)?),
            Primitive::Long => Object::long(env, ctx.call_long_method(target, id, args)?),
            Primitive::Float => Object::float(env, ctx.call_float_method(target, id, args)?),
            Primitive::Double => Object::double(env, ctx.call_double_method(target, id, args)?),
        },
        ReturnType::Reference => {
            Object::from_local_ref(env, ctx.call_object_method(target, id, args)?)
        }
    };
    Ok(result)
}

/// Marshal `args` for `method` and invoke it on `target`
pub(crate) fn call_method<'e>(
    env: &'e Env,
    target: Receiver,
    method: &Method<'e>,
    args: &[Object<'e>],
) -> BridgeResult<Object<'e>> {
    debug!(
        target: "jinvoke::dispatch",
        method = method.name().unwrap_or("<init>"),
        returns = method.return_type(),
        arity = args.len(),
        is_static = method.is_static(),
        "dispatch"
    );
    let marshaled = marshal(env, method.params(), args)?;
    let mut result = invoke(env, target, method.id(), method.returns(), marshaled.values())?;
    if env.config().global_results {
        result.make_global()?;
    }
    Ok(result)
}
