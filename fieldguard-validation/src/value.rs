// Field kinds and borrowed field values

use std::fmt;

/// Declared primitive kind of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Bool,
    Char,
    String,
    /// Anything that is not a primitive (collections, nested records, ...)
    Other,
}

/// Numeric families the min/max rules compare within
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericFamily {
    Signed,
    Unsigned,
    Float,
}

impl FieldKind {
    pub fn numeric_family(self) -> Option<NumericFamily> {
        match self {
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::Isize => {
                Some(NumericFamily::Signed)
            }
            Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::Usize => {
                Some(NumericFamily::Unsigned)
            }
            Self::F32 | Self::F64 => Some(NumericFamily::Float),
            Self::Bool | Self::Char | Self::String | Self::Other => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::String => "string",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current value of a field, borrowed from the record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    Bool(bool),
    Char(char),
    Str(&'a str),
    /// Non-primitive value, carrying its type name
    Other(&'static str),
}

impl<'a> FieldValue<'a> {
    /// Dynamic kind of this value
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::I8(_) => FieldKind::I8,
            Self::I16(_) => FieldKind::I16,
            Self::I32(_) => FieldKind::I32,
            Self::I64(_) => FieldKind::I64,
            Self::Isize(_) => FieldKind::Isize,
            Self::U8(_) => FieldKind::U8,
            Self::U16(_) => FieldKind::U16,
            Self::U32(_) => FieldKind::U32,
            Self::U64(_) => FieldKind::U64,
            Self::Usize(_) => FieldKind::Usize,
            Self::F32(_) => FieldKind::F32,
            Self::F64(_) => FieldKind::F64,
            Self::Bool(_) => FieldKind::Bool,
            Self::Char(_) => FieldKind::Char,
            Self::Str(_) => FieldKind::String,
            Self::Other(_) => FieldKind::Other,
        }
    }

    /// Widened value when this is a signed integer
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::I8(v) => Some(v.into()),
            Self::I16(v) => Some(v.into()),
            Self::I32(v) => Some(v.into()),
            Self::I64(v) => Some(v),
            Self::Isize(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Widened value when this is an unsigned integer
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::U8(v) => Some(v.into()),
            Self::U16(v) => Some(v.into()),
            Self::U32(v) => Some(v.into()),
            Self::U64(v) => Some(v),
            Self::Usize(v) => u64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Widened value when this is a float
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::F32(v) => Some(v.into()),
            Self::F64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Rust types that can appear as validated record fields
pub trait FieldType {
    const KIND: FieldKind;

    fn field_value(&self) -> FieldValue<'_>;
}

macro_rules! primitive_field_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FieldType for $ty {
                const KIND: FieldKind = FieldKind::$variant;

                fn field_value(&self) -> FieldValue<'_> {
                    FieldValue::$variant(*self)
                }
            }
        )*
    };
}

primitive_field_type! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    bool => Bool,
    char => Char,
}

impl FieldType for String {
    const KIND: FieldKind = FieldKind::String;

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

impl FieldType for &'static str {
    const KIND: FieldKind = FieldKind::String;

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

impl<T> FieldType for Vec<T> {
    const KIND: FieldKind = FieldKind::Other;

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Other(std::any::type_name::<Self>())
    }
}
