//! Class definitions for the test VM
//!
//! `ClassSpec` describes a class by name, with member types written as
//! slash-separated class names, primitive keywords or array descriptors.
//! Methods are registered in the order they are declared; that order is the
//! order reflection reports them in.

use std::sync::Arc;

use crate::heap::{ClassDef, ClassId, FieldDef, Heap, MethodDef, NativeBody, ObjId, Shape, Slot, Throw};

struct MemberSpec {
    name: String,
    params: Vec<String>,
    ret: Option<String>,
    is_static: bool,
    body: NativeBody,
}

struct FieldSpec {
    name: String,
    ty: String,
    initial: Option<Slot>,
}

/// Declarative description of a class to load into a `TestVm`.
pub struct ClassSpec {
    name: String,
    superclass: Option<String>,
    interfaces: Vec<String>,
    interface: bool,
    fields: Vec<FieldSpec>,
    members: Vec<MemberSpec>,
}

impl ClassSpec {
    /// A class extending `java/lang/Object`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            superclass: Some("java/lang/Object".to_string()),
            interfaces: Vec::new(),
            interface: false,
            fields: Vec::new(),
            members: Vec::new(),
        }
    }

    /// An interface
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            superclass: None,
            interface: true,
            ..Self::new(name)
        }
    }

    /// Set the superclass
    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    /// Add an implemented interface
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Declare a public instance field
    pub fn field(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            ty: ty.into(),
            initial: None,
        });
        self
    }

    /// Declare a public static field with its initial value
    pub fn static_field(mut self, name: impl Into<String>, ty: impl Into<String>, value: Slot) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            ty: ty.into(),
            initial: Some(value),
        });
        self
    }

    /// Declare a public constructor
    pub fn constructor<F>(self, params: &[&str], body: F) -> Self
    where
        F: Fn(&mut Heap, Option<ObjId>, &[Slot]) -> Result<Slot, Throw> + Send + Sync + 'static,
    {
        self.member("<init>", params, "void", false, body)
    }

    /// Declare a public instance method. `ret` may be `"void"`.
    pub fn method<F>(self, name: &str, params: &[&str], ret: &str, body: F) -> Self
    where
        F: Fn(&mut Heap, Option<ObjId>, &[Slot]) -> Result<Slot, Throw> + Send + Sync + 'static,
    {
        self.member(name, params, ret, false, body)
    }

    /// Declare a public static method. `ret` may be `"void"`.
    pub fn static_method<F>(self, name: &str, params: &[&str], ret: &str, body: F) -> Self
    where
        F: Fn(&mut Heap, Option<ObjId>, &[Slot]) -> Result<Slot, Throw> + Send + Sync + 'static,
    {
        self.member(name, params, ret, true, body)
    }

    fn member<F>(mut self, name: &str, params: &[&str], ret: &str, is_static: bool, body: F) -> Self
    where
        F: Fn(&mut Heap, Option<ObjId>, &[Slot]) -> Result<Slot, Throw> + Send + Sync + 'static,
    {
        self.members.push(MemberSpec {
            name: name.to_string(),
            params: params.iter().map(|p| p.to_string()).collect(),
            ret: (ret != "void").then(|| ret.to_string()),
            is_static,
            body: Arc::new(body),
        });
        self
    }

    /// Class name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Heap {
    /// Load a class. Fails if the name is taken or a member type is unknown.
    pub(crate) fn define(&mut self, spec: ClassSpec) -> Result<ClassId, String> {
        if self.by_name.contains_key(&spec.name) {
            return Err(format!("duplicate class definition: {}", spec.name));
        }
        let superclass = match &spec.superclass {
            Some(name) => Some(self.lookup_type(name)?),
            None => None,
        };
        let id = self.add_class(ClassDef::new(
            spec.name.clone(),
            Shape::Object {
                interface: spec.interface,
            },
            superclass,
        ));
        let name = spec.name.clone();
        if let Err(e) = self.extend(id, spec) {
            self.by_name.remove(&name);
            return Err(e);
        }
        Ok(id)
    }

    /// Add interfaces, fields and members of `spec` to an existing class.
    pub(crate) fn extend(&mut self, id: ClassId, spec: ClassSpec) -> Result<(), String> {
        for name in &spec.interfaces {
            let iface = self.lookup_type(name)?;
            self.class_mut(id).interfaces.push(iface);
        }
        for field in spec.fields {
            let ty = self.lookup_type(&field.ty)?;
            let is_static = field.initial.is_some();
            let class = self.class_mut(id);
            if let Some(value) = field.initial {
                class.statics.insert(field.name.clone(), value);
            }
            class.fields.push(FieldDef {
                name: field.name,
                ty,
                is_static,
            });
        }
        for member in spec.members {
            let params = member
                .params
                .iter()
                .map(|p| self.lookup_type(p))
                .collect::<Result<Vec<_>, _>>()?;
            let ret = match &member.ret {
                Some(r) => Some(self.lookup_type(r)?),
                None => None,
            };
            let index = self.methods.len();
            let is_constructor = member.name == "<init>";
            self.methods.push(MethodDef {
                owner: id,
                name: member.name,
                params,
                ret,
                is_static: member.is_static,
                body: member.body,
            });
            if is_constructor {
                self.class_mut(id).constructors.push(index);
            } else {
                self.class_mut(id).methods.push(index);
            }
        }
        Ok(())
    }

    fn lookup_type(&mut self, name: &str) -> Result<ClassId, String> {
        self.resolve_class(name)
            .ok_or_else(|| format!("unknown type: {}", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TestVm;

    #[test]
    fn test_define_registers_members_in_order() {
        let vm = TestVm::new();
        vm.define(
            ClassSpec::new("demo/Pair")
                .field("left", "int")
                .method("first", &[], "int", |_, _, _| Ok(Slot::Int(1)))
                .method("second", &["java/lang/String"], "void", |_, _, _| Ok(Slot::Void)),
        )
        .unwrap();

        vm.with_heap(|heap| {
            let id = heap.class_id("demo/Pair").unwrap();
            let names: Vec<_> = heap
                .class(id)
                .methods
                .iter()
                .map(|m| heap.methods[*m].name.clone())
                .collect();
            assert_eq!(names, vec!["first", "second"]);
            assert_eq!(heap.signature(heap.class(id).methods[1]), "(Ljava/lang/String;)V");
        });
    }

    #[test]
    fn test_define_rejects_duplicates_and_unknown_types() {
        let vm = TestVm::new();
        assert!(vm.define(ClassSpec::new("java/lang/String")).is_err());
        assert!(vm
            .define(ClassSpec::new("demo/Bad").field("x", "demo/Missing"))
            .is_err());
        // A failed definition does not leave the name behind
        assert!(vm.define(ClassSpec::new("demo/Bad")).is_ok());
    }

    #[test]
    fn test_self_referencing_members() {
        let vm = TestVm::new();
        vm.define(ClassSpec::new("demo/Node").method("next", &[], "demo/Node", |_, _, _| {
            Ok(Slot::NULL)
        }))
        .unwrap();
    }
}
