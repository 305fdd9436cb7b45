//! Reference table
//!
//! Every reference handed out through `JvmContext` is a distinct handle into
//! this table, so tests can check that each acquired reference is released
//! exactly once and with the matching release call.

use std::collections::HashMap;

use jinvoke_sdk::{AbiError, AbiResult, RawRef};

use crate::heap::ObjId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RefKind {
    Local,
    Global,
}

#[derive(Debug, Clone, Copy)]
struct RefEntry {
    obj: ObjId,
    kind: RefKind,
}

#[derive(Debug, Default)]
pub(crate) struct RefTable {
    entries: HashMap<u64, RefEntry>,
    next: u64,
    invalid_releases: usize,
    /// Cap on live global handles; `None` is unbounded
    global_limit: Option<usize>,
}

impl RefTable {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next: 1,
            invalid_releases: 0,
            global_limit: None,
        }
    }

    /// Hand out a new handle for `obj`
    pub(crate) fn acquire(&mut self, obj: ObjId, kind: RefKind) -> RawRef {
        let handle = self.next;
        self.next += 1;
        self.entries.insert(handle, RefEntry { obj, kind });
        RawRef::from_bits(handle)
    }

    /// Handle for an optional object; `None` is the null reference
    pub(crate) fn acquire_opt(&mut self, obj: Option<ObjId>, kind: RefKind) -> RawRef {
        match obj {
            Some(obj) => self.acquire(obj, kind),
            None => RawRef::NULL,
        }
    }

    /// Object behind a non-null handle
    pub(crate) fn resolve(&self, r: RawRef) -> AbiResult<ObjId> {
        self.entries
            .get(&r.to_bits())
            .map(|e| e.obj)
            .ok_or(AbiError::InvalidReference(r.to_bits()))
    }

    /// Object behind a handle; the null handle resolves to `None`
    pub(crate) fn resolve_opt(&self, r: RawRef) -> AbiResult<Option<ObjId>> {
        if r.is_null() {
            Ok(None)
        } else {
            self.resolve(r).map(Some)
        }
    }

    /// Release a handle. Unknown handles and kind mismatches are counted,
    /// not panicked on.
    pub(crate) fn release(&mut self, r: RawRef, kind: RefKind) {
        if r.is_null() {
            return;
        }
        match self.entries.get(&r.to_bits()) {
            Some(entry) if entry.kind == kind => {
                self.entries.remove(&r.to_bits());
            }
            _ => self.invalid_releases += 1,
        }
    }

    pub(crate) fn set_global_limit(&mut self, limit: Option<usize>) {
        self.global_limit = limit;
    }

    /// Whether another handle of `kind` may be handed out
    pub(crate) fn has_room(&self, kind: RefKind) -> bool {
        match (kind, self.global_limit) {
            (RefKind::Global, Some(limit)) => self.live(RefKind::Global) < limit,
            _ => true,
        }
    }

    pub(crate) fn live(&self, kind: RefKind) -> usize {
        self.entries.values().filter(|e| e.kind == kind).count()
    }

    pub(crate) fn invalid_releases(&self) -> usize {
        self.invalid_releases
    }
}
