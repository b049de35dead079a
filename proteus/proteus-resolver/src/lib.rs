//! Turns scanned Go packages into protobuf packages.
//!
//! # Pipeline
//!
//! ```text
//! [ScannedPackage]
//!   └─ SymbolTable::build  : project-wide aliases, enums and structs
//!       └─ assemble_package: one task per package, in parallel
//!           └─ TypeResolver: alias unwrapping, overrides, scalar mapping
//!               └─ ResolvedSchema
//! ```
//!
//! ```
//! use proteus_core::{BasicKind, ScannedPackage, scanner::{Field, Struct}};
//! use proteus_resolver::Resolver;
//!
//! let mut pkg = ScannedPackage::new("example.com/shop");
//! pkg.structs.push(Struct::new("Item", vec![Field::new("Price", BasicKind::Int)]));
//!
//! let schema = Resolver::new().resolve(&[pkg]).unwrap();
//! let item = schema.get("example.com/shop").unwrap().message("Item").unwrap();
//! assert_eq!(item.fields[0].ty.to_string(), "int64");
//! ```

mod assembler;
mod error;
mod policy;
mod registry;
mod resolver;
mod symbol_table;
mod type_resolver;

pub use assembler::assemble_package;
pub use error::{ResolveError, ResolveErrors};
pub use policy::AliasConflictPolicy;
pub use registry::{CustomType, CustomTypeRegistry};
pub use resolver::{ResolvedSchema, Resolver, ResolverBuilder};
pub use symbol_table::{SymbolTable, enum_names};
pub use type_resolver::{FieldContext, Resolved, TypeResolver, Unwrapped, scalar_for};
