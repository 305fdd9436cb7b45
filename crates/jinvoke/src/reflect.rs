//! Reflection bootstrap
//!
//! Reads a class's public methods and constructors through the runtime's own
//! reflection API. Everything here calls members by exact name and signature
//! through raw ids; going through overload resolution would need the very
//! method lists being built.

use jinvoke_sdk::{JvmContext, MethodId, RawRef, Receiver};
use tracing::debug;

use crate::class::Class;
use crate::env::Env;
use crate::error::{BridgeError, BridgeResult};
use crate::kind::ReturnType;
use crate::method::{Method, MethodList};
use crate::reference::Ref;

const CLASS: &str = "java/lang/Class";
const METHOD: &str = "java/lang/reflect/Method";
const CONSTRUCTOR: &str = "java/lang/reflect/Constructor";

/// `Modifier.STATIC`
const STATIC: i32 = 0x0008;

/// Adopt a local reference the runtime promised to be non-null
fn required<'e>(ctx: &'e dyn JvmContext, raw: RawRef, what: &str) -> BridgeResult<Ref<'e>> {
    Ref::adopt_local(ctx, raw)
        .ok_or_else(|| BridgeError::type_mismatch(what.to_string(), "null"))
}

fn find<'e>(ctx: &'e dyn JvmContext, name: &str) -> BridgeResult<Ref<'e>> {
    let raw = ctx.find_class(name)?;
    required(ctx, raw, name)
}

fn call_string(ctx: &dyn JvmContext, target: RawRef, id: MethodId) -> BridgeResult<String> {
    let raw = ctx.call_object_method(Receiver::Instance(target), id, &[])?;
    let string = required(ctx, raw, "java/lang/String")?;
    Ok(ctx.get_string_utf(string.raw())?)
}

/// Slash-separated name of a class object (`Class.getName` with dots
/// replaced)
pub(crate) fn class_name(ctx: &dyn JvmContext, class: RawRef) -> BridgeResult<String> {
    let class_class = find(ctx, CLASS)?;
    let get_name = ctx.get_method_id(class_class.raw(), "getName", "()Ljava/lang/String;")?;
    Ok(call_string(ctx, class, get_name)?.replace('.', "/"))
}

/// Method ids of the reflected-member accessors
struct Accessors {
    get_name: Option<MethodId>,
    get_parameter_types: MethodId,
    get_return_type: Option<MethodId>,
    get_modifiers: MethodId,
    class_get_name: MethodId,
}

impl Accessors {
    fn load(ctx: &dyn JvmContext, member_class: &str, is_method: bool) -> BridgeResult<Self> {
        let member = find(ctx, member_class)?;
        let class_class = find(ctx, CLASS)?;
        let get_name = if is_method {
            Some(ctx.get_method_id(member.raw(), "getName", "()Ljava/lang/String;")?)
        } else {
            None
        };
        let get_return_type = if is_method {
            Some(ctx.get_method_id(member.raw(), "getReturnType", "()Ljava/lang/Class;")?)
        } else {
            None
        };
        Ok(Self {
            get_name,
            get_parameter_types: ctx.get_method_id(
                member.raw(),
                "getParameterTypes",
                "()[Ljava/lang/Class;",
            )?,
            get_return_type,
            get_modifiers: ctx.get_method_id(member.raw(), "getModifiers", "()I")?,
            class_get_name: ctx.get_method_id(
                class_class.raw(),
                "getName",
                "()Ljava/lang/String;",
            )?,
        })
    }
}

fn read_member<'e>(env: &'e Env, accessors: &Accessors, member: &Ref<'e>) -> BridgeResult<Method<'e>> {
    let ctx = env.context();
    let name = match accessors.get_name {
        Some(id) => Some(call_string(ctx, member.raw(), id)?),
        None => None,
    };

    let raw = ctx.call_object_method(
        Receiver::Instance(member.raw()),
        accessors.get_parameter_types,
        &[],
    )?;
    let types = required(ctx, raw, "[Ljava/lang/Class;")?;
    let count = ctx.get_array_length(types.raw())?;
    let mut params = Vec::with_capacity(count);
    for i in 0..count {
        let raw = ctx.get_object_array_element(types.raw(), i)?;
        params.push(Class::from_local_ref(env, raw));
    }

    let return_type = match accessors.get_return_type {
        Some(id) => {
            let raw = ctx.call_object_method(Receiver::Instance(member.raw()), id, &[])?;
            let class = required(ctx, raw, CLASS)?;
            call_string(ctx, class.raw(), accessors.class_get_name)?.replace('.', "/")
        }
        None => "void".to_string(),
    };

    let modifiers = ctx.call_int_method(
        Receiver::Instance(member.raw()),
        accessors.get_modifiers,
        &[],
    )?;

    Ok(Method {
        name,
        params,
        returns: ReturnType::parse(&return_type),
        return_type,
        id: ctx.from_reflected_method(member.raw())?,
        is_static: modifiers & STATIC != 0,
    })
}

fn members<'e>(env: &'e Env, class: &Class<'e>, is_method: bool) -> BridgeResult<MethodList<'e>> {
    if class.is_null() {
        return Err(BridgeError::NullClass);
    }
    let ctx = env.context();
    let (member_class, getter, signature) = if is_method {
        (METHOD, "getMethods", "()[Ljava/lang/reflect/Method;")
    } else {
        (CONSTRUCTOR, "getConstructors", "()[Ljava/lang/reflect/Constructor;")
    };

    let class_class = find(ctx, CLASS)?;
    let getter_id = ctx.get_method_id(class_class.raw(), getter, signature)?;
    let raw = ctx.call_object_method(Receiver::Instance(class.raw()), getter_id, &[])?;
    let array = required(ctx, raw, signature)?;
    let accessors = Accessors::load(ctx, member_class, is_method)?;

    let count = ctx.get_array_length(array.raw())?;
    let mut methods = Vec::with_capacity(count);
    for i in 0..count {
        let raw = ctx.get_object_array_element(array.raw(), i)?;
        let member = required(ctx, raw, member_class)?;
        methods.push(read_member(env, &accessors, &member)?);
    }
    debug!(target: "jinvoke::reflect", getter, count, "reflected members");
    Ok(MethodList::new(methods))
}

/// Public methods of `class`, declared and inherited
pub(crate) fn methods<'e>(env: &'e Env, class: &Class<'e>) -> BridgeResult<MethodList<'e>> {
    members(env, class, true)
}

/// Public constructors of `class`
pub(crate) fn constructors<'e>(env: &'e Env, class: &Class<'e>) -> BridgeResult<MethodList<'e>> {
    members(env, class, false)
}
