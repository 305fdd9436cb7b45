//! jinvoke SDK - runtime ABI for dynamic method dispatch
//!
//! This crate holds the raw types and the `JvmContext` trait that a managed
//! runtime binding implements. The dispatch core (`jinvoke`) depends only on
//! this crate, never on a particular runtime.
//!
//! # Example
//!
//! ```ignore
//! use jinvoke_sdk::{JvmContext, Receiver, RawValue};
//!
//! fn string_length(ctx: &dyn JvmContext) -> jinvoke_sdk::AbiResult<i32> {
//!     let class = ctx.find_class("java/lang/String")?;
//!     let length = ctx.get_method_id(class, "length", "()I")?;
//!     let s = ctx.new_string_utf("hello")?;
//!     let n = ctx.call_int_method(Receiver::Instance(s), length, &[])?;
//!     ctx.delete_local_ref(s);
//!     ctx.delete_local_ref(class);
//!     Ok(n)
//! }
//! ```

#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod value;

pub use context::{JvmContext, Receiver};
pub use error::{AbiError, AbiResult};
pub use value::{MethodId, Primitive, RawRef, RawValue};
