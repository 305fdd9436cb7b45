//! Array element proxy

use std::fmt;

use tracing::debug;

use crate::error::{BridgeError, BridgeResult};
use crate::kind::Kind;
use crate::object::{Object, Value};

/// One slot of an array value.
///
/// The slot's kind comes from the array class, and the element is read once
/// when the proxy is created. Writes go straight to the array and convert
/// the assigned value to the slot's kind first.
pub struct ArrayElement<'a, 'e> {
    array: &'a Object<'e>,
    index: usize,
    kind: Kind,
    value: Object<'e>,
}

impl<'a, 'e> ArrayElement<'a, 'e> {
    pub(crate) fn new(array: &'a Object<'e>, index: usize, kind: Kind) -> BridgeResult<Self> {
        let env = array.env();
        let ctx = env.context();
        let raw = array.array_ref()?;
        let value = match kind.primitive() {
            Some(p) => Object::from_raw(env, p, ctx.get_primitive_array_element(raw, index, p)?),
            None => Object::from_local_ref(env, ctx.get_object_array_element(raw, index)?),
        };
        Ok(Self {
            array,
            index,
            kind,
            value,
        })
    }

    /// Slot index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Slot kind
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Element value
    pub fn get(&self) -> &Object<'e> {
        &self.value
    }

    /// Take the element value
    pub fn into_value(self) -> Object<'e> {
        self.value
    }

    /// Write `rhs` into the slot, converted to the slot's kind.
    ///
    /// A primitive assigned to a reference slot is a type mismatch; a
    /// reference assigned to a primitive slot likewise.
    pub fn set(&mut self, rhs: &Object<'e>) -> BridgeResult<()> {
        let env = self.array.env();
        let ctx = env.context();
        let raw = self.array.array_ref()?;
        debug!(
            target: "jinvoke::array",
            index = self.index,
            slot = %self.kind,
            value = %rhs.kind(),
            "element write"
        );
        match self.kind.primitive() {
            Some(p) => {
                let converted = rhs.coerce(p)?;
                ctx.set_primitive_array_element(raw, self.index, p, converted)?;
                self.value = Object::from_raw(env, p, converted);
            }
            None => {
                let Value::Reference(_) = rhs.value() else {
                    return Err(BridgeError::type_mismatch("reference", rhs.kind().to_string()));
                };
                ctx.set_object_array_element(raw, self.index, rhs.raw().as_ref())?;
                self.value = rhs.clone();
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ArrayElement<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayElement")
            .field("index", &self.index)
            .field("kind", &self.kind)
            .field("value", &self.value)
            .finish()
    }
}
