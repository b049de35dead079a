use std::fmt::{Display, Formatter, Result};

/// Protobuf scalar value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    String,
    Bytes,
}

impl Scalar {
    /// The keyword used for this scalar in `.proto` source.
    pub fn keyword(&self) -> &'static str {
        match self {
            Scalar::Double => "double",
            Scalar::Float => "float",
            Scalar::Int32 => "int32",
            Scalar::Int64 => "int64",
            Scalar::Uint32 => "uint32",
            Scalar::Uint64 => "uint64",
            Scalar::Sint32 => "sint32",
            Scalar::Sint64 => "sint64",
            Scalar::Fixed32 => "fixed32",
            Scalar::Fixed64 => "fixed64",
            Scalar::Sfixed32 => "sfixed32",
            Scalar::Sfixed64 => "sfixed64",
            Scalar::Bool => "bool",
            Scalar::String => "string",
            Scalar::Bytes => "bytes",
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.keyword())
    }
}

/// A message or enum defined in some protobuf package, possibly the current one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Named {
    pub package: String,
    pub name: String,
}

impl Named {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }
}

impl Display for Named {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}.{}", self.package, self.name)
    }
}

/// The type of a message field.
///
/// Map keys are always scalars; this is enforced by the shape of [`Type::Map`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Basic(Scalar),
    Named(Named),
    Map { key: Scalar, value: Box<Type> },
}

impl Type {
    pub fn named(package: impl Into<String>, name: impl Into<String>) -> Self {
        Type::Named(Named::new(package, name))
    }

    pub fn map(key: Scalar, value: Type) -> Self {
        Type::Map {
            key,
            value: Box::new(value),
        }
    }

    pub fn is_basic(&self) -> bool {
        matches!(self, Type::Basic(_))
    }
}

impl From<Scalar> for Type {
    fn from(value: Scalar) -> Self {
        Type::Basic(value)
    }
}

impl From<Named> for Type {
    fn from(value: Named) -> Self {
        Type::Named(value)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Type::Basic(scalar) => scalar.fmt(f),
            Type::Named(named) => named.fmt(f),
            Type::Map { key, value } => write!(f, "map<{key}, {value}>"),
        }
    }
}
