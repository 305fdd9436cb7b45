//! Built-in classes of the test VM
//!
//! A small slice of the `java.lang` / `java.lang.reflect` surface: enough for
//! reflection-driven dispatch (`Class.getMethods`, `Method.getParameterTypes`,
//! `Field.get`), strings, primitive wrappers, a system class loader, a
//! `StringBuilder` with overloaded `append`, and the usual exception classes.

use jinvoke_sdk::Primitive;

use crate::heap::{ClassDef, ClassId, Heap, MethodIdx, ObjData, ObjId, Shape, Slot, Throw};
use crate::spec::ClassSpec;

const PUBLIC: i32 = 0x0001;
const STATIC: i32 = 0x0008;

const OBJECT: &str = "java/lang/Object";
const STRING: &str = "java/lang/String";
const CLASS: &str = "java/lang/Class";
const METHOD: &str = "java/lang/reflect/Method";
const CONSTRUCTOR: &str = "java/lang/reflect/Constructor";
const FIELD: &str = "java/lang/reflect/Field";

pub(crate) fn bootstrap(heap: &mut Heap) -> Result<(), String> {
    for p in Primitive::ALL {
        heap.add_class(ClassDef::new(p.name(), Shape::Primitive(p), None));
    }
    heap.add_class(ClassDef::new("void", Shape::Void, None));
    heap.add_class(ClassDef::new(
        OBJECT,
        Shape::Object { interface: false },
        None,
    ));

    for iface in ["java/io/Serializable", "java/lang/CharSequence", "java/lang/Comparable"] {
        heap.define(ClassSpec::interface(iface))?;
    }
    // Shells first: these reference each other in member signatures
    for shell in [STRING, CLASS, METHOD, CONSTRUCTOR, FIELD] {
        heap.define(ClassSpec::new(shell))?;
    }

    reopen(heap, object_members())?;
    reopen(heap, string_members())?;
    reopen(heap, class_members())?;
    reopen(heap, method_members())?;
    reopen(heap, constructor_members())?;
    reopen(heap, field_members())?;

    heap.define(number_class())?;
    for p in Primitive::ALL {
        heap.define(wrapper_class(p))?;
    }
    let yes = heap.box_slot(Slot::Boolean(true));
    let no = heap.box_slot(Slot::Boolean(false));
    set_static(heap, "java/lang/Boolean", "TRUE", yes)?;
    set_static(heap, "java/lang/Boolean", "FALSE", no)?;

    heap.define(class_loader())?;
    heap.define(string_builder())?;
    define_exceptions(heap)?;
    Ok(())
}

fn reopen(heap: &mut Heap, spec: ClassSpec) -> Result<(), String> {
    let id = heap.class_id(spec.name()).map_err(|t| t.to_string())?;
    heap.extend(id, spec)
}

fn set_static(heap: &mut Heap, class: &str, name: &str, value: Slot) -> Result<(), String> {
    heap.set_static_field(class, name, value)
        .map_err(|t| t.to_string())
}

// ============================================================================
// Helpers for method bodies
// ============================================================================

fn this(obj: Option<ObjId>) -> Result<ObjId, Throw> {
    obj.ok_or_else(|| Throw::npe("receiver"))
}

fn text(heap: &mut Heap, s: impl Into<String>) -> Slot {
    Slot::Ref(Some(heap.new_string(s)))
}

fn class_slot(heap: &mut Heap, id: ClassId) -> Slot {
    Slot::Ref(Some(heap.class_object(id)))
}

fn class_array(heap: &mut Heap, classes: Vec<ClassId>) -> Result<Slot, Throw> {
    let elements = classes
        .into_iter()
        .map(|c| Some(heap.class_object(c)))
        .collect();
    Ok(Slot::Ref(Some(heap.new_object_array(CLASS, elements)?)))
}

fn member_array(heap: &mut Heap, reflect_class: &str, members: Vec<MethodIdx>) -> Result<Slot, Throw> {
    let class = heap.class_id(reflect_class)?;
    let elements = members
        .into_iter()
        .map(|m| Some(heap.alloc(class, ObjData::Member(m))))
        .collect();
    Ok(Slot::Ref(Some(heap.new_object_array(reflect_class, elements)?)))
}

fn reflected_class(heap: &Heap, obj: Option<ObjId>) -> Result<ClassId, Throw> {
    heap.class_from_object(this(obj)?)
}

fn reflected_member(heap: &Heap, obj: Option<ObjId>) -> Result<MethodIdx, Throw> {
    match heap.entry(this(obj)?).data {
        ObjData::Member(m) => Ok(m),
        _ => Err(Throw::new("java/lang/ClassCastException", "not a reflected member")),
    }
}

fn reflected_field(heap: &Heap, obj: Option<ObjId>) -> Result<(ClassId, String), Throw> {
    match &heap.entry(this(obj)?).data {
        ObjData::Field { owner, name } => Ok((*owner, name.clone())),
        _ => Err(Throw::new("java/lang/ClassCastException", "not a reflected field")),
    }
}

/// Java primitive conversion between kinds
fn convert(slot: Slot, to: Primitive) -> Slot {
    let (int, float, is_float) = match slot {
        Slot::Boolean(b) => (b as i64, b as i64 as f64, false),
        Slot::Byte(b) => (b as i64, b as f64, false),
        Slot::Char(c) => (c as i64, c as f64, false),
        Slot::Short(s) => (s as i64, s as f64, false),
        Slot::Int(i) => (i as i64, i as f64, false),
        Slot::Long(l) => (l, l as f64, false),
        Slot::Float(f) => (f as i64, f as f64, true),
        Slot::Double(d) => (d as i64, d, true),
        Slot::Void | Slot::Ref(_) => (0, 0.0, false),
    };
    match to {
        Primitive::Boolean => Slot::Boolean(int != 0),
        Primitive::Byte => Slot::Byte(if is_float { float as i32 as i8 } else { int as i8 }),
        Primitive::Char => Slot::Char(if is_float { float as i32 as u16 } else { int as u16 }),
        Primitive::Short => Slot::Short(if is_float { float as i32 as i16 } else { int as i16 }),
        Primitive::Int => Slot::Int(if is_float { float as i32 } else { int as i32 }),
        Primitive::Long => Slot::Long(if is_float { float as i64 } else { int }),
        Primitive::Float => Slot::Float(if is_float { float as f32 } else { int as f32 }),
        Primitive::Double => Slot::Double(if is_float { float } else { int as f64 }),
    }
}

fn java_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

// ============================================================================
// java.lang.Object / String / Class
// ============================================================================

fn object_members() -> ClassSpec {
    ClassSpec::new(OBJECT)
        .constructor(&[], |_, _, _| Ok(Slot::Void))
        .method("toString", &[], STRING, |heap, obj, _| {
            let s = heap.identity_string(this(obj)?);
            Ok(text(heap, s))
        })
        .method("hashCode", &[], "int", |_, obj, _| {
            Ok(Slot::Int(this(obj)?.identity() as i32))
        })
        .method("equals", &[OBJECT], "boolean", |_, obj, args| {
            Ok(Slot::Boolean(Some(this(obj)?) == args[0].object()))
        })
        .method("getClass", &[], CLASS, |heap, obj, _| {
            let class = heap.class_of(this(obj)?);
            Ok(class_slot(heap, class))
        })
}

fn string_members() -> ClassSpec {
    ClassSpec::new(STRING)
        .implements("java/io/Serializable")
        .implements("java/lang/CharSequence")
        .implements("java/lang/Comparable")
        .constructor(&[], |heap, obj, _| {
            heap.set_string(this(obj)?, "")?;
            Ok(Slot::Void)
        })
        .constructor(&[STRING], |heap, obj, args| {
            let s = heap.string_arg(args[0])?;
            heap.set_string(this(obj)?, s)?;
            Ok(Slot::Void)
        })
        .method("toString", &[], STRING, |_, obj, _| Ok(Slot::Ref(obj)))
        .method("length", &[], "int", |heap, obj, _| {
            Ok(Slot::Int(heap.string(this(obj)?)?.encode_utf16().count() as i32))
        })
        .method("isEmpty", &[], "boolean", |heap, obj, _| {
            Ok(Slot::Boolean(heap.string(this(obj)?)?.is_empty()))
        })
        .method("charAt", &["int"], "char", |heap, obj, args| {
            let index = args[0].int()?;
            let s = heap.string(this(obj)?)?;
            usize::try_from(index)
                .ok()
                .and_then(|i| s.encode_utf16().nth(i))
                .map(Slot::Char)
                .ok_or_else(|| {
                    Throw::new(
                        "java/lang/StringIndexOutOfBoundsException",
                        format!("index {}, length {}", index, s.encode_utf16().count()),
                    )
                })
        })
        .method("concat", &[STRING], STRING, |heap, obj, args| {
            let joined = format!("{}{}", heap.string(this(obj)?)?, heap.string_arg(args[0])?);
            Ok(text(heap, joined))
        })
        .method("equals", &[OBJECT], "boolean", |heap, obj, args| {
            let mine = heap.string(this(obj)?)?;
            let equal = match args[0].object() {
                Some(other) => heap.string(other).map(|s| s == mine).unwrap_or(false),
                None => false,
            };
            Ok(Slot::Boolean(equal))
        })
        .method("hashCode", &[], "int", |heap, obj, _| {
            Ok(Slot::Int(java_hash(heap.string(this(obj)?)?)))
        })
        .static_method("valueOf", &[OBJECT], STRING, |heap, _, args| {
            let s = heap.display(args[0]);
            Ok(text(heap, s))
        })
        .static_method("valueOf", &["int"], STRING, |heap, _, args| {
            let s = heap.display(args[0]);
            Ok(text(heap, s))
        })
}

fn class_members() -> ClassSpec {
    ClassSpec::new(CLASS)
        .method("getName", &[], STRING, |heap, obj, _| {
            let name = heap.reflected_name(reflected_class(heap, obj)?);
            Ok(text(heap, name))
        })
        .method("toString", &[], STRING, |heap, obj, _| {
            let s = heap.class_display(reflected_class(heap, obj)?);
            Ok(text(heap, s))
        })
        .method("isArray", &[], "boolean", |heap, obj, _| {
            let class = reflected_class(heap, obj)?;
            Ok(Slot::Boolean(matches!(heap.class(class).shape, Shape::Array(_))))
        })
        .method("isPrimitive", &[], "boolean", |heap, obj, _| {
            Ok(Slot::Boolean(heap.is_primitive(reflected_class(heap, obj)?)))
        })
        .method("isInterface", &[], "boolean", |heap, obj, _| {
            let class = reflected_class(heap, obj)?;
            Ok(Slot::Boolean(matches!(
                heap.class(class).shape,
                Shape::Object { interface: true }
            )))
        })
        .method("isAssignableFrom", &[CLASS], "boolean", |heap, obj, args| {
            let sup = reflected_class(heap, obj)?;
            let sub = reflected_class(heap, args[0].object())?;
            Ok(Slot::Boolean(heap.is_assignable(sub, sup)))
        })
        .method("getSuperclass", &[], CLASS, |heap, obj, _| {
            let parent = heap.class(reflected_class(heap, obj)?).superclass;
            Ok(match parent {
                Some(parent) => class_slot(heap, parent),
                None => Slot::NULL,
            })
        })
        .method("getMethods", &[], "[Ljava/lang/reflect/Method;", |heap, obj, _| {
            let methods = heap.public_methods(reflected_class(heap, obj)?);
            member_array(heap, METHOD, methods)
        })
        .method(
            "getConstructors",
            &[],
            "[Ljava/lang/reflect/Constructor;",
            |heap, obj, _| {
                let class = reflected_class(heap, obj)?;
                let constructors = heap.class(class).constructors.clone();
                member_array(heap, CONSTRUCTOR, constructors)
            },
        )
        .method("getField", &[STRING], FIELD, |heap, obj, args| {
            let class = reflected_class(heap, obj)?;
            let name = heap.string_arg(args[0])?;
            if heap.find_field(class, &name).is_none() {
                return Err(Throw::new("java/lang/NoSuchFieldException", name));
            }
            let field_class = heap.class_id(FIELD)?;
            Ok(Slot::Ref(Some(heap.alloc(
                field_class,
                ObjData::Field { owner: class, name },
            ))))
        })
}

// ============================================================================
// java.lang.reflect
// ============================================================================

fn method_members() -> ClassSpec {
    ClassSpec::new(METHOD)
        .method("getName", &[], STRING, |heap, obj, _| {
            let name = heap.methods[reflected_member(heap, obj)?].name.clone();
            Ok(text(heap, name))
        })
        .method("getParameterTypes", &[], "[Ljava/lang/Class;", |heap, obj, _| {
            let params = heap.methods[reflected_member(heap, obj)?].params.clone();
            class_array(heap, params)
        })
        .method("getReturnType", &[], CLASS, |heap, obj, _| {
            let ret = heap.methods[reflected_member(heap, obj)?].ret;
            let ret = match ret {
                Some(r) => r,
                None => heap.class_id("void")?,
            };
            Ok(class_slot(heap, ret))
        })
        .method("getModifiers", &[], "int", |heap, obj, _| {
            let def = &heap.methods[reflected_member(heap, obj)?];
            Ok(Slot::Int(if def.is_static { PUBLIC | STATIC } else { PUBLIC }))
        })
        .method("getDeclaringClass", &[], CLASS, |heap, obj, _| {
            let owner = heap.methods[reflected_member(heap, obj)?].owner;
            Ok(class_slot(heap, owner))
        })
        .method("toString", &[], STRING, |heap, obj, _| {
            let m = reflected_member(heap, obj)?;
            let def = &heap.methods[m];
            let ret = match def.ret {
                Some(r) => heap.reflected_name(r),
                None => "void".to_string(),
            };
            let params: Vec<_> = def.params.iter().map(|p| heap.reflected_name(*p)).collect();
            let s = format!(
                "public {}{} {}.{}({})",
                if def.is_static { "static " } else { "" },
                ret,
                heap.reflected_name(def.owner),
                def.name,
                params.join(",")
            );
            Ok(text(heap, s))
        })
}

fn constructor_members() -> ClassSpec {
    ClassSpec::new(CONSTRUCTOR)
        .method("getName", &[], STRING, |heap, obj, _| {
            let owner = heap.methods[reflected_member(heap, obj)?].owner;
            let name = heap.reflected_name(owner);
            Ok(text(heap, name))
        })
        .method("getParameterTypes", &[], "[Ljava/lang/Class;", |heap, obj, _| {
            let params = heap.methods[reflected_member(heap, obj)?].params.clone();
            class_array(heap, params)
        })
        .method("getModifiers", &[], "int", |_, _, _| Ok(Slot::Int(PUBLIC)))
        .method("getDeclaringClass", &[], CLASS, |heap, obj, _| {
            let owner = heap.methods[reflected_member(heap, obj)?].owner;
            Ok(class_slot(heap, owner))
        })
}

fn field_members() -> ClassSpec {
    ClassSpec::new(FIELD)
        .method("getName", &[], STRING, |heap, obj, _| {
            let (_, name) = reflected_field(heap, obj)?;
            Ok(text(heap, name))
        })
        .method("getModifiers", &[], "int", |heap, obj, _| {
            let (owner, name) = reflected_field(heap, obj)?;
            let is_static = heap
                .find_field(owner, &name)
                .map(|(_, f)| f.is_static)
                .unwrap_or(false);
            Ok(Slot::Int(if is_static { PUBLIC | STATIC } else { PUBLIC }))
        })
        .method("getType", &[], CLASS, |heap, obj, _| {
            let (owner, name) = reflected_field(heap, obj)?;
            let ty = heap
                .find_field(owner, &name)
                .map(|(_, f)| f.ty)
                .ok_or_else(|| Throw::new("java/lang/NoSuchFieldError", name.clone()))?;
            Ok(class_slot(heap, ty))
        })
        .method("get", &[OBJECT], OBJECT, |heap, obj, args| {
            let (owner, name) = reflected_field(heap, obj)?;
            let (declaring, is_static) = heap
                .find_field(owner, &name)
                .map(|(c, f)| (c, f.is_static))
                .ok_or_else(|| Throw::new("java/lang/NoSuchFieldError", name.clone()))?;
            let value = if is_static {
                heap.class(declaring)
                    .statics
                    .get(&name)
                    .copied()
                    .unwrap_or(Slot::NULL)
            } else {
                let target = args[0]
                    .object()
                    .ok_or_else(|| Throw::npe("Field.get on instance field with null target"))?;
                if !heap.is_assignable(heap.class_of(target), owner) {
                    return Err(Throw::new(
                        "java/lang/IllegalArgumentException",
                        format!(
                            "Can not get field {} on {}",
                            name,
                            heap.class_name_of(target)
                        ),
                    ));
                }
                heap.field(target, &name)?
            };
            Ok(heap.box_slot(value))
        })
}

// ============================================================================
// Numbers and wrappers
// ============================================================================

fn number_class() -> ClassSpec {
    let mut spec = ClassSpec::new("java/lang/Number").implements("java/io/Serializable");
    for p in [
        Primitive::Byte,
        Primitive::Short,
        Primitive::Int,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
    ] {
        spec = spec.method(&format!("{}Value", p.name()), &[], p.name(), move |heap, obj, _| {
            Ok(convert(heap.unbox(this(obj)?)?, p))
        });
    }
    spec
}

fn wrapper_class(p: Primitive) -> ClassSpec {
    let parent = match p {
        Primitive::Boolean | Primitive::Char => OBJECT,
        _ => "java/lang/Number",
    };
    let mut spec = ClassSpec::new(p.wrapper_class())
        .extends(parent)
        .implements("java/io/Serializable")
        .implements("java/lang/Comparable")
        .field("value", p.name())
        .constructor(&[p.name()], |heap, obj, args| {
            heap.set_field(this(obj)?, "value", args[0])?;
            Ok(Slot::Void)
        })
        .method(&format!("{}Value", p.name()), &[], p.name(), |heap, obj, _| {
            heap.field(this(obj)?, "value")
        })
        .method("toString", &[], STRING, |heap, obj, _| {
            let s = heap.display(heap.field(this(obj)?, "value")?);
            Ok(text(heap, s))
        })
        .method("equals", &[OBJECT], "boolean", |heap, obj, args| {
            let mine = heap.field(this(obj)?, "value")?;
            let equal = match args[0].object() {
                Some(other) => heap.unbox(other).map(|v| v == mine).unwrap_or(false),
                None => false,
            };
            Ok(Slot::Boolean(equal))
        })
        .static_method("valueOf", &[p.name()], p.wrapper_class(), |heap, _, args| {
            Ok(heap.box_slot(args[0]))
        })
        .static_method("toString", &[p.name()], STRING, |heap, _, args| {
            let s = heap.display(args[0]);
            Ok(text(heap, s))
        });

    spec = match p {
        Primitive::Boolean => spec
            .static_field("TRUE", p.wrapper_class(), Slot::NULL)
            .static_field("FALSE", p.wrapper_class(), Slot::NULL),
        Primitive::Byte => spec
            .static_field("MIN_VALUE", "byte", Slot::Byte(i8::MIN))
            .static_field("MAX_VALUE", "byte", Slot::Byte(i8::MAX)),
        Primitive::Short => spec
            .static_field("MIN_VALUE", "short", Slot::Short(i16::MIN))
            .static_field("MAX_VALUE", "short", Slot::Short(i16::MAX)),
        Primitive::Int => spec
            .static_field("MIN_VALUE", "int", Slot::Int(i32::MIN))
            .static_field("MAX_VALUE", "int", Slot::Int(i32::MAX))
            .static_method("parseInt", &[STRING], "int", |heap, _, args| {
                let s = heap.string_arg(args[0])?;
                s.parse::<i32>().map(Slot::Int).map_err(|_| {
                    Throw::new(
                        "java/lang/NumberFormatException",
                        format!("For input string: \"{}\"", s),
                    )
                })
            }),
        Primitive::Long => spec
            .static_field("MIN_VALUE", "long", Slot::Long(i64::MIN))
            .static_field("MAX_VALUE", "long", Slot::Long(i64::MAX)),
        Primitive::Char | Primitive::Float | Primitive::Double => spec,
    };
    spec
}

// ============================================================================
// ClassLoader, StringBuilder, exceptions
// ============================================================================

fn class_loader() -> ClassSpec {
    ClassSpec::new("java/lang/ClassLoader")
        .static_method("getSystemClassLoader", &[], "java/lang/ClassLoader", |heap, _, _| {
            if let Some(loader) = heap.system_loader {
                return Ok(Slot::Ref(Some(loader)));
            }
            let loader = heap.new_instance("java/lang/ClassLoader")?;
            heap.system_loader = Some(loader);
            Ok(Slot::Ref(Some(loader)))
        })
        .method("loadClass", &[STRING], CLASS, |heap, _, args| {
            let name = heap.string_arg(args[0])?.replace('.', "/");
            match heap.resolve_class(&name) {
                Some(class) => Ok(class_slot(heap, class)),
                None => Err(Throw::new("java/lang/ClassNotFoundException", name)),
            }
        })
}

const STRING_BUILDER: &str = "java/lang/StringBuilder";

fn builder_text(heap: &Heap, obj: ObjId) -> Result<ObjId, Throw> {
    heap.field(obj, "buffer")?
        .object()
        .ok_or_else(|| Throw::npe("StringBuilder buffer"))
}

fn append(heap: &mut Heap, obj: Option<ObjId>, value: Slot) -> Result<Slot, Throw> {
    let me = this(obj)?;
    let buffer = builder_text(heap, me)?;
    let joined = format!("{}{}", heap.string(buffer)?, heap.display(value));
    heap.set_string(buffer, joined)?;
    Ok(Slot::Ref(Some(me)))
}

fn string_builder() -> ClassSpec {
    // append(Object) is declared first: reflection reports it first
    ClassSpec::new(STRING_BUILDER)
        .implements("java/lang/CharSequence")
        .field("buffer", STRING)
        .constructor(&[], |heap, obj, _| {
            let buffer = text(heap, "");
            heap.set_field(this(obj)?, "buffer", buffer)?;
            Ok(Slot::Void)
        })
        .constructor(&[STRING], |heap, obj, args| {
            let initial = heap.string_arg(args[0])?;
            let buffer = text(heap, initial);
            heap.set_field(this(obj)?, "buffer", buffer)?;
            Ok(Slot::Void)
        })
        .method("append", &[OBJECT], STRING_BUILDER, |heap, obj, args| append(heap, obj, args[0]))
        .method("append", &[STRING], STRING_BUILDER, |heap, obj, args| append(heap, obj, args[0]))
        .method("append", &["int"], STRING_BUILDER, |heap, obj, args| append(heap, obj, args[0]))
        .method("append", &["char"], STRING_BUILDER, |heap, obj, args| append(heap, obj, args[0]))
        .method("append", &["boolean"], STRING_BUILDER, |heap, obj, args| append(heap, obj, args[0]))
        .method("append", &["double"], STRING_BUILDER, |heap, obj, args| append(heap, obj, args[0]))
        .method("length", &[], "int", |heap, obj, _| {
            let buffer = builder_text(heap, this(obj)?)?;
            Ok(Slot::Int(heap.string(buffer)?.encode_utf16().count() as i32))
        })
        .method("toString", &[], STRING, |heap, obj, _| {
            let buffer = builder_text(heap, this(obj)?)?;
            let s = heap.string(buffer)?.to_string();
            Ok(text(heap, s))
        })
}

fn exception(name: &str, parent: &str) -> ClassSpec {
    ClassSpec::new(name)
        .extends(parent)
        .constructor(&[], |_, _, _| Ok(Slot::Void))
        .constructor(&[STRING], |heap, obj, args| {
            heap.set_field(this(obj)?, "message", args[0])?;
            Ok(Slot::Void)
        })
}

fn define_exceptions(heap: &mut Heap) -> Result<(), String> {
    heap.define(
        exception("java/lang/Throwable", OBJECT)
            .implements("java/io/Serializable")
            .field("message", STRING)
            .method("getMessage", &[], STRING, |heap, obj, _| {
                heap.field(this(obj)?, "message")
            }),
    )?;
    for (name, parent) in [
        ("java/lang/Exception", "java/lang/Throwable"),
        ("java/lang/Error", "java/lang/Throwable"),
        ("java/lang/RuntimeException", "java/lang/Exception"),
        ("java/lang/ReflectiveOperationException", "java/lang/Exception"),
        ("java/lang/ClassNotFoundException", "java/lang/ReflectiveOperationException"),
        ("java/lang/NoSuchFieldException", "java/lang/ReflectiveOperationException"),
        ("java/lang/IllegalArgumentException", "java/lang/RuntimeException"),
        ("java/lang/NumberFormatException", "java/lang/IllegalArgumentException"),
        ("java/lang/IllegalStateException", "java/lang/RuntimeException"),
        ("java/lang/NullPointerException", "java/lang/RuntimeException"),
        ("java/lang/ClassCastException", "java/lang/RuntimeException"),
        ("java/lang/ArrayStoreException", "java/lang/RuntimeException"),
        ("java/lang/IndexOutOfBoundsException", "java/lang/RuntimeException"),
        ("java/lang/ArrayIndexOutOfBoundsException", "java/lang/IndexOutOfBoundsException"),
        ("java/lang/StringIndexOutOfBoundsException", "java/lang/IndexOutOfBoundsException"),
        ("java/lang/LinkageError", "java/lang/Error"),
        ("java/lang/ClassFormatError", "java/lang/LinkageError"),
        ("java/lang/NoClassDefFoundError", "java/lang/LinkageError"),
        ("java/lang/NoSuchFieldError", "java/lang/LinkageError"),
    ] {
        heap.define(exception(name, parent))?;
    }
    Ok(())
}
