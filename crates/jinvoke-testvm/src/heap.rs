//! Object heap and class table of the test VM
//!
//! Everything the VM knows lives in one `Heap`: allocated objects, class
//! definitions and method definitions. Objects are never collected; a test
//! VM lives for one test.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use jinvoke_sdk::{Primitive, RawValue};

// ============================================================================
// Identifiers
// ============================================================================

/// Heap object identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjId(pub(crate) usize);

impl ObjId {
    /// Identity hash as reported by `hashCode()`
    pub fn identity(self) -> u32 {
        (self.0 as u32).wrapping_mul(0x9E37_79B9) >> 8
    }
}

/// Class table index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ClassId(pub(crate) usize);

/// Method table index
pub(crate) type MethodIdx = usize;

// ============================================================================
// Slot
// ============================================================================

/// A typed value inside the VM (field contents, arguments, return values).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slot {
    /// No value (void return)
    Void,
    /// boolean
    Boolean(bool),
    /// byte
    Byte(i8),
    /// char
    Char(u16),
    /// short
    Short(i16),
    /// int
    Int(i32),
    /// long
    Long(i64),
    /// float
    Float(f32),
    /// double
    Double(f64),
    /// Reference (None = null)
    Ref(Option<ObjId>),
}

impl Slot {
    /// The null reference
    pub const NULL: Slot = Slot::Ref(None);

    /// Default value of a field of the given primitive kind (None = reference)
    pub fn zero(kind: Option<Primitive>) -> Slot {
        match kind {
            None => Slot::NULL,
            Some(p) => Slot::from_raw(p, RawValue::from_bits(0)),
        }
    }

    /// Decode an untagged slot as the given primitive kind
    pub fn from_raw(kind: Primitive, raw: RawValue) -> Slot {
        match kind {
            Primitive::Boolean => Slot::Boolean(raw.as_bool()),
            Primitive::Byte => Slot::Byte(raw.as_byte()),
            Primitive::Char => Slot::Char(raw.as_char()),
            Primitive::Short => Slot::Short(raw.as_short()),
            Primitive::Int => Slot::Int(raw.as_int()),
            Primitive::Long => Slot::Long(raw.as_long()),
            Primitive::Float => Slot::Float(raw.as_float()),
            Primitive::Double => Slot::Double(raw.as_double()),
        }
    }

    /// Primitive kind of this slot, if any
    pub fn primitive(self) -> Option<Primitive> {
        match self {
            Slot::Boolean(_) => Some(Primitive::Boolean),
            Slot::Byte(_) => Some(Primitive::Byte),
            Slot::Char(_) => Some(Primitive::Char),
            Slot::Short(_) => Some(Primitive::Short),
            Slot::Int(_) => Some(Primitive::Int),
            Slot::Long(_) => Some(Primitive::Long),
            Slot::Float(_) => Some(Primitive::Float),
            Slot::Double(_) => Some(Primitive::Double),
            Slot::Void | Slot::Ref(_) => None,
        }
    }

    /// Encode a primitive slot into an untagged value
    pub fn to_raw(self) -> Option<RawValue> {
        Some(match self {
            Slot::Boolean(b) => RawValue::bool(b),
            Slot::Byte(b) => RawValue::byte(b),
            Slot::Char(c) => RawValue::char(c),
            Slot::Short(s) => RawValue::short(s),
            Slot::Int(i) => RawValue::int(i),
            Slot::Long(l) => RawValue::long(l),
            Slot::Float(f) => RawValue::float(f),
            Slot::Double(d) => RawValue::double(d),
            Slot::Void | Slot::Ref(_) => return None,
        })
    }

    /// Referenced object, if this is a non-null reference
    pub fn object(self) -> Option<ObjId> {
        match self {
            Slot::Ref(r) => r,
            _ => None,
        }
    }

    /// Read an int slot
    pub fn int(self) -> Result<i32, Throw> {
        match self {
            Slot::Int(i) => Ok(i),
            other => Err(Throw::new(
                "java/lang/IllegalArgumentException",
                format!("expected int, got {:?}", other),
            )),
        }
    }
}

// ============================================================================
// Throw
// ============================================================================

/// A managed exception raised by a method body.
#[derive(Debug, Clone, PartialEq)]
pub struct Throw {
    /// Slash-separated exception class name
    pub class: String,
    /// Exception message
    pub message: String,
}

impl Throw {
    /// Create an exception
    pub fn new(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            message: message.into(),
        }
    }

    pub(crate) fn npe(what: &str) -> Self {
        Self::new("java/lang/NullPointerException", what)
    }
}

impl fmt::Display for Throw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.class, self.message)
    }
}

/// Native implementation of a method or constructor.
///
/// Receives the heap, the receiver (`None` for static methods, the freshly
/// allocated object for constructors) and the decoded arguments.
pub type NativeBody =
    Arc<dyn Fn(&mut Heap, Option<ObjId>, &[Slot]) -> Result<Slot, Throw> + Send + Sync>;

// ============================================================================
// Class and method definitions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    Primitive(Primitive),
    Void,
    Array(ClassId),
    Object { interface: bool },
}

pub(crate) struct FieldDef {
    pub(crate) name: String,
    pub(crate) ty: ClassId,
    pub(crate) is_static: bool,
}

pub(crate) struct ClassDef {
    pub(crate) name: String,
    pub(crate) shape: Shape,
    pub(crate) superclass: Option<ClassId>,
    pub(crate) interfaces: Vec<ClassId>,
    pub(crate) fields: Vec<FieldDef>,
    pub(crate) statics: HashMap<String, Slot>,
    pub(crate) methods: Vec<MethodIdx>,
    pub(crate) constructors: Vec<MethodIdx>,
    pub(crate) object: Option<ObjId>,
}

impl ClassDef {
    pub(crate) fn new(name: impl Into<String>, shape: Shape, superclass: Option<ClassId>) -> Self {
        Self {
            name: name.into(),
            shape,
            superclass,
            interfaces: Vec::new(),
            fields: Vec::new(),
            statics: HashMap::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            object: None,
        }
    }

    fn primitive(&self) -> Option<Primitive> {
        match self.shape {
            Shape::Primitive(p) => Some(p),
            _ => None,
        }
    }
}

pub(crate) struct MethodDef {
    pub(crate) owner: ClassId,
    pub(crate) name: String,
    pub(crate) params: Vec<ClassId>,
    pub(crate) ret: Option<ClassId>,
    pub(crate) is_static: bool,
    pub(crate) body: NativeBody,
}

impl MethodDef {
    pub(crate) fn is_constructor(&self) -> bool {
        self.name == "<init>"
    }
}

// ============================================================================
// Objects
// ============================================================================

pub(crate) enum ObjData {
    Fields(HashMap<String, Slot>),
    Str(String),
    ClassObject(ClassId),
    Primitives(Primitive, Vec<RawValue>),
    Objects(Vec<Option<ObjId>>),
    Member(MethodIdx),
    Field { owner: ClassId, name: String },
}

pub(crate) struct HeapEntry {
    pub(crate) class: ClassId,
    pub(crate) data: ObjData,
}

// ============================================================================
// Heap
// ============================================================================

/// Objects, classes and methods of one test VM.
pub struct Heap {
    pub(crate) objects: Vec<HeapEntry>,
    pub(crate) classes: Vec<ClassDef>,
    pub(crate) by_name: HashMap<String, ClassId>,
    pub(crate) methods: Vec<MethodDef>,
    pub(crate) system_loader: Option<ObjId>,
}

impl Heap {
    pub(crate) fn empty() -> Self {
        Self {
            objects: Vec::new(),
            classes: Vec::new(),
            by_name: HashMap::new(),
            methods: Vec::new(),
            system_loader: None,
        }
    }

    // ========================================================================
    // Class table
    // ========================================================================

    pub(crate) fn add_class(&mut self, def: ClassDef) -> ClassId {
        let id = ClassId(self.classes.len());
        self.by_name.insert(def.name.clone(), id);
        self.classes.push(def);
        id
    }

    pub(crate) fn class(&self, id: ClassId) -> &ClassDef {
        &self.classes[id.0]
    }

    pub(crate) fn class_mut(&mut self, id: ClassId) -> &mut ClassDef {
        &mut self.classes[id.0]
    }

    /// Look up a class by slash-separated name, creating array classes on demand.
    pub(crate) fn resolve_class(&mut self, name: &str) -> Option<ClassId> {
        if let Some(id) = self.by_name.get(name) {
            return Some(*id);
        }
        let rest = name.strip_prefix('[')?;
        let component = if let Some(inner) = rest.strip_prefix('L') {
            self.resolve_class(inner.strip_suffix(';')?)?
        } else if rest.starts_with('[') {
            self.resolve_class(rest)?
        } else {
            let mut chars = rest.chars();
            let tag = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            self.resolve_class(Primitive::from_descriptor(tag)?.name())?
        };
        let object = self.by_name.get("java/lang/Object").copied();
        Some(self.add_class(ClassDef::new(name, Shape::Array(component), object)))
    }

    /// Array class whose component is `component`
    pub(crate) fn array_class_of(&mut self, component: ClassId) -> ClassId {
        let name = format!("[{}", self.descriptor(component));
        // Descriptor names always resolve
        match self.resolve_class(&name) {
            Some(id) => id,
            None => unreachable!("array class {} not constructible", name),
        }
    }

    pub(crate) fn class_id(&self, name: &str) -> Result<ClassId, Throw> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| Throw::new("java/lang/NoClassDefFoundError", name))
    }

    /// Type descriptor of a class (`I`, `[I`, `Ljava/lang/String;`, `V`)
    pub(crate) fn descriptor(&self, id: ClassId) -> String {
        let class = self.class(id);
        match class.shape {
            Shape::Primitive(p) => p.descriptor().to_string(),
            Shape::Void => "V".to_string(),
            Shape::Array(_) => class.name.clone(),
            Shape::Object { .. } => format!("L{};", class.name),
        }
    }

    /// Method signature (`(ILjava/lang/String;)V`)
    pub(crate) fn signature(&self, method: MethodIdx) -> String {
        let def = &self.methods[method];
        let mut sig = String::from("(");
        for p in &def.params {
            sig.push_str(&self.descriptor(*p));
        }
        sig.push(')');
        match def.ret {
            Some(r) => sig.push_str(&self.descriptor(r)),
            None => sig.push('V'),
        }
        sig
    }

    /// Dotted name as reported by `Class.getName()`
    pub(crate) fn reflected_name(&self, id: ClassId) -> String {
        self.class(id).name.replace('/', ".")
    }

    pub(crate) fn is_primitive(&self, id: ClassId) -> bool {
        matches!(self.class(id).shape, Shape::Primitive(_) | Shape::Void)
    }

    pub(crate) fn primitive_of(&self, id: ClassId) -> Option<Primitive> {
        self.class(id).primitive()
    }

    /// The assignability relation between two classes
    pub(crate) fn is_assignable(&self, sub: ClassId, sup: ClassId) -> bool {
        if sub == sup {
            return true;
        }
        if self.is_primitive(sub) || self.is_primitive(sup) {
            return false;
        }
        if let (Shape::Array(sc), Shape::Array(pc)) = (self.class(sub).shape, self.class(sup).shape)
        {
            return !self.is_primitive(sc) && !self.is_primitive(pc) && self.is_assignable(sc, pc);
        }
        if self.class(sup).name == "java/lang/Object" {
            return true;
        }
        let def = self.class(sub);
        def.superclass
            .into_iter()
            .chain(def.interfaces.iter().copied())
            .any(|parent| self.is_assignable(parent, sup))
    }

    /// Public methods visible on a class: own methods in declaration order,
    /// then inherited ones not overridden.
    pub(crate) fn public_methods(&self, id: ClassId) -> Vec<MethodIdx> {
        let mut seen: Vec<(String, String)> = Vec::new();
        let mut out = Vec::new();
        let mut current = Some(id);
        while let Some(c) = current {
            for &m in &self.class(c).methods {
                let key = (self.methods[m].name.clone(), self.signature(m));
                if !seen.contains(&key) {
                    seen.push(key);
                    out.push(m);
                }
            }
            current = self.class(c).superclass;
        }
        out
    }

    /// Find a method by exact name and signature, searching superclasses.
    pub(crate) fn find_method(
        &self,
        id: ClassId,
        name: &str,
        signature: &str,
        is_static: bool,
    ) -> Option<MethodIdx> {
        if name == "<init>" {
            return self
                .class(id)
                .constructors
                .iter()
                .copied()
                .find(|m| self.signature(*m) == signature);
        }
        let mut current = Some(id);
        while let Some(c) = current {
            let found = self.class(c).methods.iter().copied().find(|m| {
                let def = &self.methods[*m];
                def.name == name && def.is_static == is_static && self.signature(*m) == signature
            });
            if found.is_some() {
                return found;
            }
            current = self.class(c).superclass;
        }
        None
    }

    /// Most specific override of `method` for an object of class `receiver`
    pub(crate) fn virtual_target(&self, receiver: ClassId, method: MethodIdx) -> MethodIdx {
        let def = &self.methods[method];
        if def.is_static || def.is_constructor() {
            return method;
        }
        self.find_method(receiver, &def.name, &self.signature(method), false)
            .unwrap_or(method)
    }

    /// Find a public field by name, searching superclasses. Returns the declaring class.
    pub(crate) fn find_field(&self, id: ClassId, name: &str) -> Option<(ClassId, &FieldDef)> {
        let mut current = Some(id);
        while let Some(c) = current {
            if let Some(f) = self.class(c).fields.iter().find(|f| f.name == name) {
                return Some((c, f));
            }
            current = self.class(c).superclass;
        }
        None
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    pub(crate) fn alloc(&mut self, class: ClassId, data: ObjData) -> ObjId {
        let id = ObjId(self.objects.len());
        self.objects.push(HeapEntry { class, data });
        id
    }

    pub(crate) fn entry(&self, obj: ObjId) -> &HeapEntry {
        &self.objects[obj.0]
    }

    pub(crate) fn entry_mut(&mut self, obj: ObjId) -> &mut HeapEntry {
        &mut self.objects[obj.0]
    }

    pub(crate) fn class_of(&self, obj: ObjId) -> ClassId {
        self.entry(obj).class
    }

    /// The `java/lang/Class` object of a class, allocated on first use
    pub(crate) fn class_object(&mut self, id: ClassId) -> ObjId {
        if let Some(obj) = self.class(id).object {
            return obj;
        }
        let class_class = self.by_name["java/lang/Class"];
        let obj = self.alloc(class_class, ObjData::ClassObject(id));
        self.class_mut(id).object = Some(obj);
        obj
    }

    pub(crate) fn class_from_object(&self, obj: ObjId) -> Result<ClassId, Throw> {
        match self.entry(obj).data {
            ObjData::ClassObject(c) => Ok(c),
            _ => Err(Throw::new(
                "java/lang/ClassCastException",
                format!("{} is not a class", self.class_name_of(obj)),
            )),
        }
    }

    /// Allocate an instance with every declared instance field zeroed
    pub(crate) fn instantiate(&mut self, class: ClassId) -> ObjId {
        if self.class(class).name == "java/lang/String" {
            return self.alloc(class, ObjData::Str(String::new()));
        }
        let mut fields = HashMap::new();
        let mut current = Some(class);
        while let Some(c) = current {
            for f in self.class(c).fields.iter().filter(|f| !f.is_static) {
                fields
                    .entry(f.name.clone())
                    .or_insert_with(|| Slot::zero(self.class(f.ty).primitive()));
            }
            current = self.class(c).superclass;
        }
        self.alloc(class, ObjData::Fields(fields))
    }

    // ========================================================================
    // Public API for method bodies
    // ========================================================================

    /// Allocate a new string
    pub fn new_string(&mut self, text: impl Into<String>) -> ObjId {
        let class = self.by_name["java/lang/String"];
        self.alloc(class, ObjData::Str(text.into()))
    }

    /// Read a string object
    pub fn string(&self, obj: ObjId) -> Result<&str, Throw> {
        match &self.entry(obj).data {
            ObjData::Str(s) => Ok(s),
            _ => Err(Throw::new(
                "java/lang/ClassCastException",
                format!("{} is not a string", self.class_name_of(obj)),
            )),
        }
    }

    /// Read a string argument, failing on null
    pub fn string_arg(&self, slot: Slot) -> Result<String, Throw> {
        let obj = slot.object().ok_or_else(|| Throw::npe("string argument"))?;
        self.string(obj).map(str::to_string)
    }

    /// Replace the contents of a string object
    pub fn set_string(&mut self, obj: ObjId, text: impl Into<String>) -> Result<(), Throw> {
        match &mut self.entry_mut(obj).data {
            ObjData::Str(s) => {
                *s = text.into();
                Ok(())
            }
            _ => Err(Throw::new("java/lang/ClassCastException", "not a string")),
        }
    }

    /// Slash-separated class name of an object
    pub fn class_name_of(&self, obj: ObjId) -> &str {
        &self.class(self.class_of(obj)).name
    }

    /// Whether `obj` is an instance of the named class
    pub fn is_instance_of(&self, obj: ObjId, class_name: &str) -> bool {
        match self.by_name.get(class_name) {
            Some(c) => self.is_assignable(self.class_of(obj), *c),
            None => false,
        }
    }

    /// Allocate an instance of a named class without running a constructor
    pub fn new_instance(&mut self, class_name: &str) -> Result<ObjId, Throw> {
        let class = self.class_id(class_name)?;
        Ok(self.instantiate(class))
    }

    /// Read an instance field
    pub fn field(&self, obj: ObjId, name: &str) -> Result<Slot, Throw> {
        match &self.entry(obj).data {
            ObjData::Fields(fields) => fields.get(name).copied().ok_or_else(|| {
                Throw::new(
                    "java/lang/NoSuchFieldError",
                    format!("{}.{}", self.class_name_of(obj), name),
                )
            }),
            _ => Err(Throw::new(
                "java/lang/NoSuchFieldError",
                format!("{}.{}", self.class_name_of(obj), name),
            )),
        }
    }

    /// Write an instance field
    pub fn set_field(&mut self, obj: ObjId, name: &str, value: Slot) -> Result<(), Throw> {
        let class_name = self.class_name_of(obj).to_string();
        match &mut self.entry_mut(obj).data {
            ObjData::Fields(fields) if fields.contains_key(name) => {
                fields.insert(name.to_string(), value);
                Ok(())
            }
            _ => Err(Throw::new(
                "java/lang/NoSuchFieldError",
                format!("{}.{}", class_name, name),
            )),
        }
    }

    /// Read a static field of a named class
    pub fn static_field(&self, class_name: &str, name: &str) -> Result<Slot, Throw> {
        let class = self.class_id(class_name)?;
        self.class(class).statics.get(name).copied().ok_or_else(|| {
            Throw::new(
                "java/lang/NoSuchFieldError",
                format!("{}.{}", class_name, name),
            )
        })
    }

    /// Write a static field of a named class
    pub fn set_static_field(&mut self, class_name: &str, name: &str, value: Slot) -> Result<(), Throw> {
        let class = self.class_id(class_name)?;
        let statics = &mut self.class_mut(class).statics;
        if !statics.contains_key(name) {
            return Err(Throw::new(
                "java/lang/NoSuchFieldError",
                format!("{}.{}", class_name, name),
            ));
        }
        statics.insert(name.to_string(), value);
        Ok(())
    }

    /// Box a primitive slot into its wrapper object; references pass through
    pub fn box_slot(&mut self, slot: Slot) -> Slot {
        let Some(kind) = slot.primitive() else {
            return slot;
        };
        let class = self.by_name[kind.wrapper_class()];
        let mut fields = HashMap::new();
        fields.insert("value".to_string(), slot);
        Slot::Ref(Some(self.alloc(class, ObjData::Fields(fields))))
    }

    /// Unbox a wrapper object
    pub fn unbox(&self, obj: ObjId) -> Result<Slot, Throw> {
        if Primitive::from_wrapper_class(self.class_name_of(obj)).is_none() {
            return Err(Throw::new(
                "java/lang/ClassCastException",
                format!("{} is not a primitive wrapper", self.class_name_of(obj)),
            ));
        }
        self.field(obj, "value")
    }

    /// Allocate a primitive array
    pub fn new_primitive_array(&mut self, kind: Primitive, values: Vec<RawValue>) -> ObjId {
        let component = self.by_name[kind.name()];
        let class = self.array_class_of(component);
        let values = values
            .into_iter()
            .map(|v| normalize(kind, v))
            .collect();
        self.alloc(class, ObjData::Primitives(kind, values))
    }

    /// Allocate an object array with the given component class
    pub fn new_object_array(
        &mut self,
        component: &str,
        elements: Vec<Option<ObjId>>,
    ) -> Result<ObjId, Throw> {
        let component = self
            .resolve_class(component)
            .ok_or_else(|| Throw::new("java/lang/NoClassDefFoundError", component))?;
        let class = self.array_class_of(component);
        Ok(self.alloc(class, ObjData::Objects(elements)))
    }

    /// Length of any array object
    pub fn array_length(&self, obj: ObjId) -> Result<usize, Throw> {
        match &self.entry(obj).data {
            ObjData::Primitives(_, v) => Ok(v.len()),
            ObjData::Objects(v) => Ok(v.len()),
            _ => Err(Throw::new(
                "java/lang/IllegalArgumentException",
                format!("{} is not an array", self.class_name_of(obj)),
            )),
        }
    }

    /// `String.valueOf`-style rendering of a slot
    pub fn display(&self, slot: Slot) -> String {
        match slot {
            Slot::Void => String::new(),
            Slot::Boolean(b) => b.to_string(),
            Slot::Byte(b) => b.to_string(),
            Slot::Char(c) => char::from_u32(c as u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER)
                .to_string(),
            Slot::Short(s) => s.to_string(),
            Slot::Int(i) => i.to_string(),
            Slot::Long(l) => l.to_string(),
            Slot::Float(f) => format_floating(f),
            Slot::Double(d) => format_floating(d),
            Slot::Ref(None) => "null".to_string(),
            Slot::Ref(Some(obj)) => self.display_object(obj),
        }
    }

    /// Default `Object.toString()` rendering
    pub(crate) fn identity_string(&self, obj: ObjId) -> String {
        format!(
            "{}@{:x}",
            self.reflected_name(self.class_of(obj)),
            obj.identity()
        )
    }

    fn display_object(&self, obj: ObjId) -> String {
        match &self.entry(obj).data {
            ObjData::Str(s) => s.clone(),
            ObjData::ClassObject(c) => self.class_display(*c),
            _ => match self.unbox(obj) {
                Ok(slot) => self.display(slot),
                Err(_) => self.identity_string(obj),
            },
        }
    }

    pub(crate) fn class_display(&self, id: ClassId) -> String {
        match self.class(id).shape {
            Shape::Primitive(_) | Shape::Void => self.reflected_name(id),
            Shape::Object { interface: true } => format!("interface {}", self.reflected_name(id)),
            _ => format!("class {}", self.reflected_name(id)),
        }
    }
}

/// Store a raw value the way an array of `kind` would hold it
pub(crate) fn normalize(kind: Primitive, raw: RawValue) -> RawValue {
    match Slot::from_raw(kind, raw).to_raw() {
        Some(v) => v,
        None => raw,
    }
}

/// Java-style floating point rendering (`2.0`, `1.5`, `NaN`)
fn format_floating<T: Into<f64> + fmt::Display + Copy>(value: T) -> String {
    let d: f64 = value.into();
    if d.is_nan() {
        "NaN".to_string()
    } else if d.is_infinite() {
        if d > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if d.fract() == 0.0 && d.abs() < 1e7 {
        format!("{:.1}", d)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_raw_conversion() {
        assert_eq!(Slot::from_raw(Primitive::Int, RawValue::int(-3)), Slot::Int(-3));
        assert_eq!(Slot::Int(-3).to_raw(), Some(RawValue::int(-3)));
        assert_eq!(Slot::NULL.to_raw(), None);
        assert_eq!(Slot::zero(Some(Primitive::Double)), Slot::Double(0.0));
        assert_eq!(Slot::zero(None), Slot::NULL);
    }

    #[test]
    fn test_format_floating() {
        assert_eq!(format_floating(2.0f64), "2.0");
        assert_eq!(format_floating(1.1f32), "1.1");
        assert_eq!(format_floating(1.5f64), "1.5");
        assert_eq!(format_floating(f64::NAN), "NaN");
        assert_eq!(format_floating(f64::NEG_INFINITY), "-Infinity");
    }
}
