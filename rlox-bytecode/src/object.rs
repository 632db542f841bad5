//! Heap-allocated object model.
//!
//! `String` is the only object kind the current surface needs. Every
//! `ObjString` the compiler or VM produces is interned (see
//! `crate::intern`), so `Rc::ptr_eq` gives pointer-equality semantics
//! for free: two strings with the same bytes are always the same
//! allocation.

use std::rc::Rc;

/// A heap object kind. A closed enum rather than a trait object — the
/// current surface has exactly one case, so dynamic dispatch buys
/// nothing here.
#[derive(Debug)]
pub enum Obj {
    String(ObjString),
}

/// An interned, immutable string.
#[derive(Debug)]
pub struct ObjString {
    bytes: Box<str>,
    hash: u32,
}

impl ObjString {
    pub(crate) fn new(bytes: Box<str>, hash: u32) -> Self {
        Self { bytes, hash }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.bytes
    }

    #[inline]
    pub fn hash(&self) -> u32 {
        self.hash
    }
}

impl std::fmt::Display for ObjString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.bytes)
    }
}

/// A reference-counted handle to a heap object.
///
/// The intern table holds one strong reference per live string; a
/// value's `ObjRef` clone is just another owner. There is no tracing
/// collector — objects live until both the intern table and every
/// value referencing them are dropped.
pub type ObjRef = Rc<Obj>;

/// Wraps an interned string as a heap object handle.
pub fn new_string_obj(s: ObjString) -> ObjRef {
    Rc::new(Obj::String(s))
}

impl Obj {
    pub fn as_string(&self) -> Option<&ObjString> {
        match self {
            Obj::String(s) => Some(s),
        }
    }
}
