//! Raw values crossing the native-call boundary
//!
//! These are the untyped currency of the runtime ABI. The runtime never sees
//! a discriminant: a `RawValue` is an untagged 64-bit slot in the same way a
//! native `jvalue` union is, and the caller is responsible for reading it with
//! the accessor that matches the declared parameter or return type.
//!
//! # Encoding
//!
//! ```text
//! boolean: 0 or 1 in the low byte
//! byte:    i8 sign-extended to 64 bits
//! char:    u16 zero-extended to 64 bits
//! short:   i16 sign-extended to 64 bits
//! int:     i32 sign-extended to 64 bits
//! long:    i64 as-is
//! float:   f32 bits in the low 32 bits
//! double:  f64 bits
//! ref:     RawRef token (0 = null)
//! ```

use std::fmt;

// ============================================================================
// RawRef
// ============================================================================

/// Opaque reference token handed out by the runtime.
///
/// A `RawRef` is just a number; lifetime management (local vs. global, release)
/// is the job of the owner that received it. `RawRef::NULL` denotes the
/// managed null value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct RawRef(u64);

impl RawRef {
    /// The managed null reference
    pub const NULL: RawRef = RawRef(0);

    /// Create from a raw token
    #[inline(always)]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Get the raw token
    #[inline(always)]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// Check if this is the null reference
    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl Default for RawRef {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Debug for RawRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "RawRef::NULL")
        } else {
            write!(f, "RawRef({:#x})", self.0)
        }
    }
}

// ============================================================================
// MethodId
// ============================================================================

/// Opaque call-target identifier for a method or constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct MethodId(u64);

impl MethodId {
    /// Create from a raw identifier
    #[inline(always)]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Get the raw identifier
    #[inline(always)]
    pub const fn to_bits(self) -> u64 {
        self.0
    }
}

// ============================================================================
// RawValue
// ============================================================================

/// Untagged 64-bit argument slot.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct RawValue(u64);

impl RawValue {
    /// Create from raw bits
    #[inline(always)]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Get raw bits
    #[inline(always)]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    // ========================================================================
    // Constructors
    // ========================================================================

    /// Boolean slot
    #[inline]
    pub const fn bool(b: bool) -> Self {
        Self(b as u64)
    }

    /// Byte slot
    #[inline]
    pub const fn byte(b: i8) -> Self {
        Self(b as i64 as u64)
    }

    /// Char slot (UTF-16 code unit)
    #[inline]
    pub const fn char(c: u16) -> Self {
        Self(c as u64)
    }

    /// Short slot
    #[inline]
    pub const fn short(s: i16) -> Self {
        Self(s as i64 as u64)
    }

    /// Int slot
    #[inline]
    pub const fn int(i: i32) -> Self {
        Self(i as i64 as u64)
    }

    /// Long slot
    #[inline]
    pub const fn long(l: i64) -> Self {
        Self(l as u64)
    }

    /// Float slot
    #[inline]
    pub fn float(f: f32) -> Self {
        Self(f.to_bits() as u64)
    }

    /// Double slot
    #[inline]
    pub fn double(d: f64) -> Self {
        Self(d.to_bits())
    }

    /// Reference slot
    #[inline]
    pub const fn reference(r: RawRef) -> Self {
        Self(r.to_bits())
    }

    // ========================================================================
    // Accessors (bit reinterpretation, no checks)
    // ========================================================================

    /// Read as boolean
    #[inline]
    pub const fn as_bool(self) -> bool {
        (self.0 & 0xFF) != 0
    }

    /// Read as byte
    #[inline]
    pub const fn as_byte(self) -> i8 {
        self.0 as i8
    }

    /// Read as char
    #[inline]
    pub const fn as_char(self) -> u16 {
        self.0 as u16
    }

    /// Read as short
    #[inline]
    pub const fn as_short(self) -> i16 {
        self.0 as i16
    }

    /// Read as int
    #[inline]
    pub const fn as_int(self) -> i32 {
        self.0 as i32
    }

    /// Read as long
    #[inline]
    pub const fn as_long(self) -> i64 {
        self.0 as i64
    }

    /// Read as float
    #[inline]
    pub fn as_float(self) -> f32 {
        f32::from_bits(self.0 as u32)
    }

    /// Read as double
    #[inline]
    pub fn as_double(self) -> f64 {
        f64::from_bits(self.0)
    }

    /// Read as reference
    #[inline]
    pub const fn as_ref(self) -> RawRef {
        RawRef::from_bits(self.0)
    }
}

impl fmt::Debug for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawValue({:#018x})", self.0)
    }
}

// ============================================================================
// Primitive kinds
// ============================================================================

/// The eight primitive kinds of the managed runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// `boolean` / `Z`
    Boolean,
    /// `byte` / `B`
    Byte,
    /// `char` / `C`
    Char,
    /// `short` / `S`
    Short,
    /// `int` / `I`
    Int,
    /// `long` / `J`
    Long,
    /// `float` / `F`
    Float,
    /// `double` / `D`
    Double,
}

impl Primitive {
    /// All primitive kinds in declaration order
    pub const ALL: [Primitive; 8] = [
        Primitive::Boolean,
        Primitive::Byte,
        Primitive::Char,
        Primitive::Short,
        Primitive::Int,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
    ];

    /// Keyword name as reported by reflection (`int`, `boolean`, ...)
    pub const fn name(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
        }
    }

    /// Single-character descriptor tag (`Z`, `B`, `C`, `S`, `I`, `J`, `F`, `D`)
    pub const fn descriptor(self) -> char {
        match self {
            Primitive::Boolean => 'Z',
            Primitive::Byte => 'B',
            Primitive::Char => 'C',
            Primitive::Short => 'S',
            Primitive::Int => 'I',
            Primitive::Long => 'J',
            Primitive::Float => 'F',
            Primitive::Double => 'D',
        }
    }

    /// Slash-separated name of the wrapper class
    pub const fn wrapper_class(self) -> &'static str {
        match self {
            Primitive::Boolean => "java/lang/Boolean",
            Primitive::Byte => "java/lang/Byte",
            Primitive::Char => "java/lang/Character",
            Primitive::Short => "java/lang/Short",
            Primitive::Int => "java/lang/Integer",
            Primitive::Long => "java/lang/Long",
            Primitive::Float => "java/lang/Float",
            Primitive::Double => "java/lang/Double",
        }
    }

    /// Parse a keyword name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Parse a descriptor tag
    pub fn from_descriptor(tag: char) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.descriptor() == tag)
    }

    /// Find the primitive whose wrapper class has this slash-separated name
    pub fn from_wrapper_class(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.wrapper_class() == name)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
