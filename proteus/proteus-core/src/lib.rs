//! Data shapes shared by the proteus pipeline.
//!
//! This crate holds no resolution logic. It provides:
//! - [`scanner`] - the Go package representation produced by the external scanner
//! - [`protobuf`] - the resolved protobuf schema model handed to a generator

pub mod protobuf;
pub mod scanner;

pub use protobuf::{
    Enum, EnumValue, Field, GENERATED_FILE_NAME, Message, Named, NamedOption, OptionValue,
    Options, Package, Scalar, Type,
};
pub use scanner::{BasicKind, ScannedPackage, SourceType, qualify};
