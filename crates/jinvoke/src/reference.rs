//! Owned reference handles
//!
//! A [`Ref`] owns exactly one non-null runtime reference and releases it on
//! drop with the release call matching its scope. The managed null value is
//! the absence of a `Ref` (`Option<Ref>`).

use std::fmt;

use jinvoke_sdk::{AbiError, JvmContext, RawRef};
use tracing::{trace, warn};

use crate::error::BridgeResult;

/// Lifetime scope of a runtime reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefScope {
    /// Valid until released or until the current native frame returns
    Local,
    /// Valid process-wide until released
    Global,
}

/// An owned, non-null runtime reference.
pub struct Ref<'e> {
    ctx: &'e dyn JvmContext,
    raw: RawRef,
    scope: RefScope,
}

impl<'e> Ref<'e> {
    /// Take ownership of a local reference returned by the runtime.
    /// Returns `None` for the null reference.
    pub fn adopt_local(ctx: &'e dyn JvmContext, raw: RawRef) -> Option<Self> {
        if raw.is_null() {
            return None;
        }
        Some(Self {
            ctx,
            raw,
            scope: RefScope::Local,
        })
    }

    /// The raw handle. Valid for as long as `self` lives.
    pub fn raw(&self) -> RawRef {
        self.raw
    }

    /// Current scope
    pub fn scope(&self) -> RefScope {
        self.scope
    }

    /// Promote to a global reference. Idempotent.
    ///
    /// Fails if the runtime refuses the global reference; the handle then
    /// stays local and valid.
    pub fn promote(&mut self) -> BridgeResult<()> {
        if self.scope == RefScope::Global {
            return Ok(());
        }
        let global = self.ctx.new_global_ref(self.raw);
        if global.is_null() {
            warn!(target: "jinvoke::reference", raw = ?self.raw, "runtime refused global reference");
            return Err(AbiError::Abi(format!("no global reference for {:?}", self.raw)).into());
        }
        trace!(target: "jinvoke::reference", local = ?self.raw, global = ?global, "promoted");
        self.ctx.delete_local_ref(self.raw);
        self.raw = global;
        self.scope = RefScope::Global;
        Ok(())
    }

    /// Duplicate the runtime reference in the same scope
    pub fn try_clone(&self) -> BridgeResult<Self> {
        let raw = match self.scope {
            RefScope::Local => self.ctx.new_local_ref(self.raw),
            RefScope::Global => self.ctx.new_global_ref(self.raw),
        };
        if raw.is_null() {
            return Err(AbiError::Abi(format!(
                "no {:?} reference duplicating {:?}",
                self.scope, self.raw
            ))
            .into());
        }
        Ok(Self {
            ctx: self.ctx,
            raw,
            scope: self.scope,
        })
    }
}

/// # Panics
///
/// Panics if the runtime refuses the duplicate reference. Use
/// [`Ref::try_clone`] to handle that case.
impl Clone for Ref<'_> {
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(r) => r,
            Err(e) => panic!("cannot clone reference: {}", e),
        }
    }
}

impl Drop for Ref<'_> {
    fn drop(&mut self) {
        trace!(target: "jinvoke::reference", raw = ?self.raw, scope = ?self.scope, "released");
        match self.scope {
            RefScope::Local => self.ctx.delete_local_ref(self.raw),
            RefScope::Global => self.ctx.delete_global_ref(self.raw),
        }
    }
}

impl fmt::Debug for Ref<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ref")
            .field("raw", &self.raw)
            .field("scope", &self.scope)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jinvoke_testvm::TestVm;

    #[test]
    fn test_adopt_null_is_none() {
        let vm = TestVm::new();
        assert!(Ref::adopt_local(&vm, RawRef::NULL).is_none());
    }

    #[test]
    fn test_drop_releases_local() {
        let vm = TestVm::new();
        let raw = vm.new_string_utf("x").unwrap();
        let r = Ref::adopt_local(&vm, raw).unwrap();
        assert_eq!(vm.live_local_refs(), 1);
        drop(r);
        assert_eq!(vm.live_local_refs(), 0);
        assert_eq!(vm.invalid_releases(), 0);
    }

    #[test]
    fn test_promote_is_idempotent() {
        let vm = TestVm::new();
        let raw = vm.new_string_utf("x").unwrap();
        let mut r = Ref::adopt_local(&vm, raw).unwrap();
        r.promote().unwrap();
        let promoted = r.raw();
        r.promote().unwrap();
        assert_eq!(r.raw(), promoted);
        assert_eq!(r.scope(), RefScope::Global);
        assert_eq!(vm.live_local_refs(), 0);
        assert_eq!(vm.live_global_refs(), 1);
        drop(r);
        assert_eq!(vm.live_global_refs(), 0);
        assert_eq!(vm.invalid_releases(), 0);
    }

    #[test]
    fn test_clone_duplicates_in_same_scope() {
        let vm = TestVm::new();
        let raw = vm.new_string_utf("x").unwrap();
        let mut a = Ref::adopt_local(&vm, raw).unwrap();
        let b = a.clone();
        assert_ne!(a.raw(), b.raw());
        assert!(vm.is_same_object(a.raw(), b.raw()));
        assert_eq!(vm.live_local_refs(), 2);

        a.promote().unwrap();
        let c = a.clone();
        assert_eq!(c.scope(), RefScope::Global);
        drop((a, b, c));
        assert_eq!(vm.live_local_refs(), 0);
        assert_eq!(vm.live_global_refs(), 0);
        assert_eq!(vm.invalid_releases(), 0);
    }

    #[test]
    fn test_refused_promotion_keeps_local() {
        let vm = TestVm::new();
        vm.limit_global_refs(0);
        let raw = vm.new_string_utf("x").unwrap();
        let mut r = Ref::adopt_local(&vm, raw).unwrap();
        let err = r.promote().unwrap_err();
        assert!(matches!(err, crate::BridgeError::Call(AbiError::Abi(_))));
        assert_eq!(r.scope(), RefScope::Local);
        assert_eq!(r.raw(), raw);
        assert_eq!(vm.get_string_utf(r.raw()).unwrap(), "x");
        drop(r);
        assert_eq!(vm.live_local_refs(), 0);
        assert_eq!(vm.invalid_releases(), 0);
    }

    #[test]
    fn test_refused_duplicate_is_an_error() {
        let vm = TestVm::new();
        vm.limit_global_refs(1);
        let raw = vm.new_string_utf("x").unwrap();
        let mut r = Ref::adopt_local(&vm, raw).unwrap();
        r.promote().unwrap();
        assert!(r.try_clone().is_err());
        assert_eq!(vm.live_global_refs(), 1);

        let local = Ref::adopt_local(&vm, vm.new_string_utf("y").unwrap()).unwrap();
        let copy = local.try_clone().unwrap();
        assert_eq!(copy.scope(), RefScope::Local);
        drop((r, local, copy));
        assert_eq!(vm.live_global_refs(), 0);
        assert_eq!(vm.live_local_refs(), 0);
        assert_eq!(vm.invalid_releases(), 0);
    }

    #[test]
    #[should_panic(expected = "cannot clone reference")]
    fn test_clone_panics_when_duplicate_is_refused() {
        let vm = TestVm::new();
        vm.limit_global_refs(1);
        let raw = vm.new_string_utf("x").unwrap();
        let mut r = Ref::adopt_local(&vm, raw).unwrap();
        r.promote().unwrap();
        let _ = r.clone();
    }
}
