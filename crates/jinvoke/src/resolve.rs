//! Overload resolution
//!
//! First match wins: candidates are tried in reflection order and the first
//! one whose name, arity and parameter classes accept the arguments is
//! returned. There is no specificity ranking, so when several overloads
//! accept the arguments, reflection order decides.

use jinvoke_sdk::Primitive;
use tracing::debug;

use crate::class::Class;
use crate::env::Env;
use crate::error::{BridgeError, BridgeResult};
use crate::method::{Method, MethodList};

/// Whether an argument of class `arg` may be passed for a parameter of
/// class `param`.
///
/// A null-class argument (the class of a null reference) fits any
/// reference parameter and no primitive one.
fn accepts(env: &Env, param: &Class<'_>, arg: &Class<'_>) -> BridgeResult<bool> {
    let primitive = Primitive::from_name(param.name()?);
    if arg.is_null() {
        return Ok(primitive.is_none());
    }
    if let Some(p) = primitive {
        if env.config().unbox_arguments {
            return Ok(arg.name()? == p.wrapper_class());
        }
    }
    Ok(env.context().is_assignable_from(arg.raw(), param.raw()))
}

fn applicable(env: &Env, method: &Method<'_>, args: &[Class<'_>]) -> BridgeResult<bool> {
    for (param, arg) in method.params().iter().zip(args) {
        if !accepts(env, param, arg)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn describe(args: &[Class<'_>]) -> String {
    args.iter()
        .map(|c| if c.is_null() { "null".to_string() } else { c.name().map(str::to_string).unwrap_or_default() })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Pick the first member of `candidates` applicable to `args`.
///
/// `name` filters methods by name; pass `None` for constructor lists.
pub(crate) fn resolve<'e>(
    env: &'e Env,
    class: &Class<'e>,
    candidates: MethodList<'e>,
    name: Option<&str>,
    args: &[Class<'e>],
) -> BridgeResult<Method<'e>> {
    let class_name = class.name()?.to_string();
    let target = name.unwrap_or("<init>");

    for candidate in candidates {
        if name.is_some() && candidate.name() != name {
            continue;
        }
        if candidate.arity() != args.len() {
            continue;
        }
        let matched = applicable(env, &candidate, args)?;
        debug!(
            target: "jinvoke::resolve",
            class = %class_name,
            name = target,
            params = %describe(candidate.params()),
            matched,
            "overload candidate"
        );
        if matched {
            return Ok(candidate);
        }
    }

    Err(BridgeError::Resolution {
        kind: if name.is_some() { "method" } else { "constructor" },
        class: class_name,
        name: target.to_string(),
        arguments: describe(args),
    })
}
