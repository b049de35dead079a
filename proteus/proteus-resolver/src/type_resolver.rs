//! Resolution of one declared Go field type into a protobuf [`Type`].
//!
//! Resolution runs in two steps:
//!
//! 1. **Unwrap**: pointers are dropped, arrays become slices and every alias is
//!    replaced by its underlying type (tracking the chain to detect cycles).
//!    Types in the [`CustomTypeRegistry`] are left untouched, so an override
//!    always wins over an alias of the same name.
//! 2. **Lower**: the alias-free type is mapped onto the protobuf type system:
//!
//! | Go type (unwrapped)          | protobuf                           |
//! |------------------------------|------------------------------------|
//! | `[]T` at the top level       | `repeated T`                       |
//! | `[]byte` / `[]uint8`         | `bytes`                            |
//! | predeclared scalar           | scalar, see [`scalar_for`]         |
//! | registry entry               | well-known type, plus its import   |
//! | struct or enum               | `Named`, plus `generated.proto` of |
//! |                              | the declaring package if foreign   |
//! | `map[K]V`                    | `map<K, V>`, `K` integral/string   |
//!
//! Anything else (nested repetition, maps of maps, repeated maps, names no
//! scanned package declares) is [`ResolveError::UnsupportedType`].

use proteus_core::{
    BasicKind, Named, Scalar, SourceType, Type,
    protobuf::{generated_file, package_name},
};

use crate::{error::ResolveError, registry::CustomTypeRegistry, symbol_table::SymbolTable};

/// Where a type being resolved was declared, for error reporting.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    /// Path of the package owning the struct.
    pub package: &'a str,
    pub record: &'a str,
    pub field: &'a str,
}

impl<'a> FieldContext<'a> {
    pub fn new(package: &'a str, record: &'a str, field: &'a str) -> Self {
        Self {
            package,
            record,
            field,
        }
    }

    fn unsupported(&self, ty: &SourceType) -> ResolveError {
        ResolveError::UnsupportedType {
            package: self.package.to_string(),
            record: self.record.to_string(),
            field: self.field.to_string(),
            ty: ty.to_string(),
        }
    }

    fn invalid_map_key(&self, key: &SourceType) -> ResolveError {
        ResolveError::InvalidMapKey {
            package: self.package.to_string(),
            record: self.record.to_string(),
            field: self.field.to_string(),
            key: key.to_string(),
        }
    }
}

/// A field type after alias unwrapping, still expressed as a Go type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unwrapped {
    pub ty: SourceType,
    pub repeated: bool,
}

/// A fully resolved field type.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub ty: Type,
    pub repeated: bool,
    /// Files the owning package must import, in first-use order.
    pub imports: Vec<String>,
}

/// Resolves field types against a run's symbol table and overrides.
///
/// Holds only shared references, so one instance can serve every package of a
/// run concurrently.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    symbols: &'a SymbolTable,
    registry: &'a CustomTypeRegistry,
}

impl<'a> TypeResolver<'a> {
    pub fn new(symbols: &'a SymbolTable, registry: &'a CustomTypeRegistry) -> Self {
        Self { symbols, registry }
    }

    pub fn symbols(&self) -> &'a SymbolTable {
        self.symbols
    }

    /// Resolve the declared type of a field.
    pub fn resolve(&self, ty: &SourceType, ctx: &FieldContext) -> Result<Resolved, ResolveError> {
        let Unwrapped { ty, repeated } = self.unwrap(ty, ctx)?;
        if repeated && matches!(ty, SourceType::Map { .. }) {
            return Err(ctx.unsupported(&SourceType::slice(ty)));
        }
        let mut imports = Vec::new();
        let ty = self.lower(&ty, ctx, &mut imports)?;
        Ok(Resolved {
            ty,
            repeated,
            imports,
        })
    }

    /// Follow pointers and aliases without mapping to protobuf.
    ///
    /// A top-level slice or array is reported through `repeated`, except for
    /// byte slices which stay a single `bytes` value.
    pub fn unwrap(&self, ty: &SourceType, ctx: &FieldContext) -> Result<Unwrapped, ResolveError> {
        let mut chain = Vec::new();
        let ty = self.unwrap_type(ty, ctx, &mut chain)?;
        Ok(match ty {
            SourceType::Slice(elem) if !is_byte(&elem) => Unwrapped {
                ty: *elem,
                repeated: true,
            },
            ty => Unwrapped {
                ty,
                repeated: false,
            },
        })
    }

    fn unwrap_type(
        &self,
        ty: &SourceType,
        ctx: &FieldContext,
        chain: &mut Vec<String>,
    ) -> Result<SourceType, ResolveError> {
        match ty {
            SourceType::Basic(_) => Ok(ty.clone()),
            SourceType::Pointer(elem) => self.unwrap_type(elem, ctx, chain),
            SourceType::Slice(elem) | SourceType::Array { elem, .. } => Ok(SourceType::Slice(
                Box::new(self.unwrap_type(elem, ctx, chain)?),
            )),
            SourceType::Map { key, value } => Ok(SourceType::Map {
                key: Box::new(self.unwrap_type(key, ctx, chain)?),
                value: Box::new(self.unwrap_type(value, ctx, chain)?),
            }),
            SourceType::Named { path, name } => {
                let qualified = proteus_core::qualify(path, name);
                if self.registry.is_override(&qualified) {
                    return Ok(ty.clone());
                }
                let Some(target) = self.symbols.alias(&qualified) else {
                    return Ok(ty.clone());
                };
                if chain.contains(&qualified) {
                    let mut cycle = chain.clone();
                    cycle.push(qualified.clone());
                    return Err(ResolveError::CyclicAlias {
                        package: ctx.package.to_string(),
                        record: ctx.record.to_string(),
                        field: ctx.field.to_string(),
                        alias: qualified,
                        chain: cycle,
                    });
                }
                log::trace!(
                    "{}.{}: unwrapping alias {qualified} = {target}",
                    ctx.record,
                    ctx.field
                );
                chain.push(qualified);
                let unwrapped = self.unwrap_type(target, ctx, chain);
                chain.pop();
                unwrapped
            }
        }
    }

    /// Map an unwrapped type to protobuf. `ty` is never repeated at this point.
    fn lower(
        &self,
        ty: &SourceType,
        ctx: &FieldContext,
        imports: &mut Vec<String>,
    ) -> Result<Type, ResolveError> {
        match ty {
            SourceType::Basic(kind) => Ok(Type::Basic(scalar_for(*kind))),
            SourceType::Slice(elem) if is_byte(elem) => Ok(Type::Basic(Scalar::Bytes)),
            SourceType::Map { key, value } => {
                if is_composite(key) {
                    return Err(ctx.invalid_map_key(key));
                }
                let key = match self.lower(key, ctx, imports)? {
                    Type::Basic(scalar) if is_valid_map_key(scalar) => scalar,
                    _ => return Err(ctx.invalid_map_key(key)),
                };
                if is_composite(value) {
                    return Err(ctx.unsupported(value));
                }
                Ok(Type::map(key, self.lower(value, ctx, imports)?))
            }
            SourceType::Named { path, name } => {
                let qualified = proteus_core::qualify(path, name);
                if let Some(custom) = self.registry.lookup(&qualified) {
                    push_import(imports, &custom.import);
                    return Ok(Type::Named(custom.named.clone()));
                }
                if !self.symbols.is_record(&qualified) && !self.symbols.is_enum(&qualified) {
                    return Err(ctx.unsupported(ty));
                }
                if path != ctx.package {
                    push_import(imports, &generated_file(path));
                }
                Ok(Type::Named(Named::new(package_name(path), name.clone())))
            }
            SourceType::Slice(_) | SourceType::Pointer(_) | SourceType::Array { .. } => {
                Err(ctx.unsupported(ty))
            }
        }
    }
}

/// Protobuf scalar used for each Go predeclared type.
pub fn scalar_for(kind: BasicKind) -> Scalar {
    match kind {
        BasicKind::Bool => Scalar::Bool,
        BasicKind::String => Scalar::String,
        BasicKind::Int | BasicKind::Int64 => Scalar::Int64,
        BasicKind::Int8 | BasicKind::Int16 | BasicKind::Int32 | BasicKind::Rune => Scalar::Int32,
        BasicKind::Uint | BasicKind::Uint64 | BasicKind::Uintptr => Scalar::Uint64,
        BasicKind::Uint8 | BasicKind::Byte | BasicKind::Uint16 | BasicKind::Uint32 => {
            Scalar::Uint32
        }
        BasicKind::Float32 => Scalar::Float,
        BasicKind::Float64 => Scalar::Double,
    }
}

fn is_byte(ty: &SourceType) -> bool {
    matches!(ty, SourceType::Basic(kind) if kind.is_byte())
}

/// Maps and non-byte slices, which cannot appear as map keys or values.
fn is_composite(ty: &SourceType) -> bool {
    match ty {
        SourceType::Map { .. } => true,
        SourceType::Slice(elem) => !is_byte(elem),
        _ => false,
    }
}

// protobuf only allows integral and string map keys.
fn is_valid_map_key(scalar: Scalar) -> bool {
    !matches!(scalar, Scalar::Double | Scalar::Float | Scalar::Bytes)
}

fn push_import(imports: &mut Vec<String>, file: &str) {
    if !imports.iter().any(|i| i == file) {
        imports.push(file.to_string());
    }
}
