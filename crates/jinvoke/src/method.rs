//! Method descriptors

use jinvoke_sdk::MethodId;

use crate::class::Class;
use crate::kind::ReturnType;

/// One reflected method or constructor.
#[derive(Debug, Clone)]
pub struct Method<'e> {
    pub(crate) name: Option<String>,
    pub(crate) params: Vec<Class<'e>>,
    pub(crate) return_type: String,
    pub(crate) returns: ReturnType,
    pub(crate) id: MethodId,
    pub(crate) is_static: bool,
}

impl<'e> Method<'e> {
    /// Declared name; `None` for constructors
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Parameter classes in declaration order
    pub fn params(&self) -> &[Class<'e>] {
        &self.params
    }

    /// Number of parameters
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Return-type descriptor: `void`, a primitive keyword, or a
    /// slash-separated class / array name
    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    /// Call variant selected by the return type
    pub fn returns(&self) -> ReturnType {
        self.returns
    }

    /// Runtime call-target id
    pub fn id(&self) -> MethodId {
        self.id
    }

    /// Whether the member is static
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Whether this is a constructor
    pub fn is_constructor(&self) -> bool {
        self.name.is_none()
    }
}

/// Snapshot of a class's reflected members, in reflection order.
#[derive(Debug, Clone, Default)]
pub struct MethodList<'e> {
    methods: Vec<Method<'e>>,
}

impl<'e> MethodList<'e> {
    pub(crate) fn new(methods: Vec<Method<'e>>) -> Self {
        Self { methods }
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Member at `index`
    pub fn get(&self, index: usize) -> Option<&Method<'e>> {
        self.methods.get(index)
    }

    /// Iterate in reflection order
    pub fn iter(&self) -> std::slice::Iter<'_, Method<'e>> {
        self.methods.iter()
    }

    /// Members with the given name
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Method<'e>> + 'a {
        self.methods.iter().filter(move |m| m.name() == Some(name))
    }
}

impl<'e> IntoIterator for MethodList<'e> {
    type Item = Method<'e>;
    type IntoIter = std::vec::IntoIter<Method<'e>>;

    fn into_iter(self) -> Self::IntoIter {
        self.methods.into_iter()
    }
}

impl<'a, 'e> IntoIterator for &'a MethodList<'e> {
    type Item = &'a Method<'e>;
    type IntoIter = std::slice::Iter<'a, Method<'e>>;

    fn into_iter(self) -> Self::IntoIter {
        self.methods.iter()
    }
}
