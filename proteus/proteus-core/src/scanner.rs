//! Go packages as produced by the scanner.
//!
//! A [`ScannedPackage`] is read-only input to resolution. Every declared type is
//! kept as written in the source, as a [`SourceType`]; aliases and named
//! references are only followed by the resolver.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result},
};

use crate::protobuf::Options;

/// Predeclared Go scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicKind {
    Bool,
    String,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    /// Alias of `uint8`.
    Byte,
    /// Alias of `int32`.
    Rune,
    Float32,
    Float64,
}

impl BasicKind {
    pub fn name(&self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::String => "string",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Byte => "byte",
            BasicKind::Rune => "rune",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
        }
    }

    /// Look up a predeclared type by its Go name.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "bool" => BasicKind::Bool,
            "string" => BasicKind::String,
            "int" => BasicKind::Int,
            "int8" => BasicKind::Int8,
            "int16" => BasicKind::Int16,
            "int32" => BasicKind::Int32,
            "int64" => BasicKind::Int64,
            "uint" => BasicKind::Uint,
            "uint8" => BasicKind::Uint8,
            "uint16" => BasicKind::Uint16,
            "uint32" => BasicKind::Uint32,
            "uint64" => BasicKind::Uint64,
            "uintptr" => BasicKind::Uintptr,
            "byte" => BasicKind::Byte,
            "rune" => BasicKind::Rune,
            "float32" => BasicKind::Float32,
            "float64" => BasicKind::Float64,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_byte(&self) -> bool {
        matches!(self, BasicKind::Byte | BasicKind::Uint8)
    }
}

/// A type expression as declared in Go source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceType {
    Basic(BasicKind),
    /// A named type declared in the package at `path`.
    Named { path: String, name: String },
    /// `*T`
    Pointer(Box<SourceType>),
    /// `[]T`
    Slice(Box<SourceType>),
    /// `[N]T`
    Array { elem: Box<SourceType>, len: usize },
    /// `map[K]V`
    Map {
        key: Box<SourceType>,
        value: Box<SourceType>,
    },
}

impl SourceType {
    pub fn named(path: impl Into<String>, name: impl Into<String>) -> Self {
        SourceType::Named {
            path: path.into(),
            name: name.into(),
        }
    }

    pub fn pointer(elem: SourceType) -> Self {
        SourceType::Pointer(Box::new(elem))
    }

    pub fn slice(elem: SourceType) -> Self {
        SourceType::Slice(Box::new(elem))
    }

    pub fn array(elem: SourceType, len: usize) -> Self {
        SourceType::Array {
            elem: Box::new(elem),
            len,
        }
    }

    pub fn map(key: SourceType, value: SourceType) -> Self {
        SourceType::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }
}

impl From<BasicKind> for SourceType {
    fn from(value: BasicKind) -> Self {
        SourceType::Basic(value)
    }
}

impl Display for SourceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            SourceType::Basic(kind) => f.write_str(kind.name()),
            SourceType::Named { path, name } => write!(f, "{}", qualify(path, name)),
            SourceType::Pointer(elem) => write!(f, "*{elem}"),
            SourceType::Slice(elem) => write!(f, "[]{elem}"),
            SourceType::Array { elem, len } => write!(f, "[{len}]{elem}"),
            SourceType::Map { key, value } => write!(f, "map[{key}]{value}"),
        }
    }
}

/// Qualify a declaration name with its package path.
pub fn qualify(path: &str, name: &str) -> String {
    format!("{path}.{name}")
}

/// A struct field in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: SourceType,
    pub options: Options,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<SourceType>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            options: Options::default(),
        }
    }
}

/// A struct declaration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Struct {
    pub name: String,
    pub fields: Vec<Field>,
    /// Field positions that must never be assigned, e.g. removed fields.
    pub reserved: Vec<u32>,
    pub options: Options,
}

impl Struct {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
            ..Default::default()
        }
    }
}

/// A const-based enumeration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Enum {
    pub name: String,
    /// Values in declaration order.
    pub values: Vec<EnumValue>,
    pub options: Options,
}

impl Enum {
    pub fn new<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<EnumValue>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
            options: Options::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub name: String,
    pub options: Options,
}

impl From<&str> for EnumValue {
    fn from(value: &str) -> Self {
        Self {
            name: value.to_string(),
            options: Options::default(),
        }
    }
}

impl From<String> for EnumValue {
    fn from(value: String) -> Self {
        Self {
            name: value,
            options: Options::default(),
        }
    }
}

/// Everything the scanner extracted from one Go package.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScannedPackage {
    /// Import path; unique within a run.
    pub path: String,
    pub structs: Vec<Struct>,
    /// Qualified alias name (`"<path>.<name>"`) to its underlying type.
    ///
    /// Types backing an enum may also appear here; they resolve as enums.
    pub aliases: BTreeMap<String, SourceType>,
    pub enums: Vec<Enum>,
}

impl ScannedPackage {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn qualify(&self, name: &str) -> String {
        qualify(&self.path, name)
    }
}
