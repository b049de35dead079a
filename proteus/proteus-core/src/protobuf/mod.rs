//! Resolved protobuf schema model.

mod message;
mod options;
mod package;
mod types;

pub use message::{Enum, EnumValue, Field, Message};
pub use options::{NamedOption, OptionValue, Options};
pub use package::{GENERATED_FILE_NAME, Package, generated_file, package_name};
pub use types::{Named, Scalar, Type};
