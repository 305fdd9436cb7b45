//! jinvoke - dynamic method dispatch over a managed runtime
//!
//! Calls methods and constructors whose signatures are only known at the
//! call site. A call derives the class of every argument, walks the target
//! class's reflected members, picks the first overload the arguments fit
//! (reflection order, no specificity ranking), marshals the arguments and
//! invokes it with the call variant chosen by the return type.
//!
//! The runtime is reached only through [`jinvoke_sdk::JvmContext`].
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use jinvoke::{Env, Object};
//!
//! let env = Env::new(Arc::new(vm));
//! let builder = env.create("java/lang/StringBuilder", &[])?;
//! builder.call("append", &[Object::string(&env, "n = ")?])?;
//! builder.call("append", &[Object::int(&env, 42)])?;
//! assert_eq!(builder.to_string()?, "n = 42");
//! ```
//!
//! # Modules
//!
//! - `class`: class descriptors, reflection and lookup
//! - `method`: method descriptors and reflected member lists
//! - `object`: the tagged value type
//! - `array`: array element proxies
//! - `config`: configuration loaded from TOML

#![warn(missing_docs)]

pub mod array;
pub mod class;
pub mod config;
mod dispatch;
pub mod env;
pub mod error;
pub mod kind;
pub mod method;
pub mod object;
pub mod reference;
mod reflect;
mod resolve;

pub use array::ArrayElement;
pub use class::Class;
pub use config::{BridgeConfig, ConfigError, LoaderConfig};
pub use env::Env;
pub use error::{BridgeError, BridgeResult};
pub use kind::{Kind, ReturnType};
pub use method::{Method, MethodList};
pub use object::{Object, Value};
pub use reference::{Ref, RefScope};

pub use jinvoke_sdk::{AbiError, JvmContext, Primitive};
