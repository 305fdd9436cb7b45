//! Value discriminants and return descriptors

use std::fmt;

use jinvoke_sdk::Primitive;

/// Discriminant of a tagged value: the eight primitive kinds plus reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// boolean
    Boolean,
    /// byte
    Byte,
    /// char
    Char,
    /// short
    Short,
    /// int
    Int,
    /// long
    Long,
    /// float
    Float,
    /// double
    Double,
    /// Object or array reference (possibly null)
    Reference,
}

impl Kind {
    /// Kind for an array element type tag (the second character of an array
    /// class name). Nested arrays (`[`) have no tag.
    pub fn from_element_tag(tag: char) -> Option<Kind> {
        match tag {
            'Z' => Some(Kind::Boolean),
            'B' => Some(Kind::Byte),
            'C' => Some(Kind::Char),
            'L' => Some(Kind::Reference),
            'D' => Some(Kind::Double),
            'F' => Some(Kind::Float),
            'I' => Some(Kind::Int),
            'J' => Some(Kind::Long),
            'S' => Some(Kind::Short),
            _ => None,
        }
    }

    /// Primitive kind, or `None` for references
    pub fn primitive(self) -> Option<Primitive> {
        match self {
            Kind::Boolean => Some(Primitive::Boolean),
            Kind::Byte => Some(Primitive::Byte),
            Kind::Char => Some(Primitive::Char),
            Kind::Short => Some(Primitive::Short),
            Kind::Int => Some(Primitive::Int),
            Kind::Long => Some(Primitive::Long),
            Kind::Float => Some(Primitive::Float),
            Kind::Double => Some(Primitive::Double),
            Kind::Reference => None,
        }
    }
}

impl From<Primitive> for Kind {
    fn from(p: Primitive) -> Self {
        match p {
            Primitive::Boolean => Kind::Boolean,
            Primitive::Byte => Kind::Byte,
            Primitive::Char => Kind::Char,
            Primitive::Short => Kind::Short,
            Primitive::Int => Kind::Int,
            Primitive::Long => Kind::Long,
            Primitive::Float => Kind::Float,
            Primitive::Double => Kind::Double,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.primitive() {
            Some(p) => write!(f, "{}", p),
            None => write!(f, "reference"),
        }
    }
}

/// What a call returns, selecting the typed call variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnType {
    /// `void`
    Void,
    /// One of the primitive kinds
    Primitive(Primitive),
    /// Any object or array type
    Reference,
}

impl ReturnType {
    /// Parse a return-type descriptor as reported by reflection: `void`, a
    /// primitive keyword, or a class / array name.
    pub fn parse(descriptor: &str) -> ReturnType {
        if descriptor == "void" {
            return ReturnType::Void;
        }
        match Primitive::from_name(descriptor) {
            Some(p) => ReturnType::Primitive(p),
            None => ReturnType::Reference,
        }
    }
}
