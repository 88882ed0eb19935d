// Closed description of decode targets, used for diagnostics and for record
// shapes. Strongly typed; no Value in here.
use std::fmt;

use super::record::RecordShape;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatKind {
    F32,
    F64,
}

#[derive(Debug, Clone)]
pub enum TargetKind {
    /// Generic container: numbers become f64, records become ordered maps.
    Dynamic,
    Bool,
    Int(IntKind),
    Float(FloatKind),
    String,
    /// The literal itself, unconverted.
    Number,
    Record(&'static RecordShape),
    Sequence(Box<TargetKind>),
    Map(Box<TargetKind>),
    Optional(Box<TargetKind>),
}

impl IntKind {
    pub fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    pub fn bits(self) -> u32 {
        match self {
            Self::I8 | Self::U8 => 8,
            Self::I16 | Self::U16 => 16,
            Self::I32 | Self::U32 => 32,
            Self::I64 | Self::U64 => 64,
        }
    }

    /// Kind matching a pointer-sized integer on this platform.
    pub fn pointer_sized(signed: bool) -> Self {
        match (signed, usize::BITS) {
            (true, 16) => Self::I16,
            (true, 32) => Self::I32,
            (true, _) => Self::I64,
            (false, 16) => Self::U16,
            (false, 32) => Self::U32,
            (false, _) => Self::U64,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
        }
    }
}

impl FloatKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

impl TargetKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_) | Self::Number)
    }
}

impl PartialEq for TargetKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Dynamic, Self::Dynamic)
            | (Self::Bool, Self::Bool)
            | (Self::String, Self::String)
            | (Self::Number, Self::Number) => true,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            // shapes are interned statics
            (Self::Record(a), Self::Record(b)) => std::ptr::eq(*a, *b),
            (Self::Sequence(a), Self::Sequence(b))
            | (Self::Map(a), Self::Map(b))
            | (Self::Optional(a), Self::Optional(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dynamic => f.write_str("dynamic value"),
            Self::Bool => f.write_str("bool"),
            Self::Int(k) => f.write_str(k.name()),
            Self::Float(k) => f.write_str(k.name()),
            Self::String => f.write_str("string"),
            Self::Number => f.write_str("number"),
            Self::Record(shape) => write!(f, "record {}", shape.name()),
            Self::Sequence(item) => write!(f, "sequence of {item}"),
            Self::Map(item) => write!(f, "map of {item}"),
            Self::Optional(item) => write!(f, "optional {item}"),
        }
    }
}
