use super::{Enum, Message, Options};

/// File name of the schema generated for every package, relative to the
/// package path.
pub const GENERATED_FILE_NAME: &str = "generated.proto";

/// One `.proto` file with its own package declaration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Package {
    pub name: String,
    pub path: String,
    imports: Vec<String>,
    pub options: Options,
    pub messages: Vec<Message>,
    pub enums: Vec<Enum>,
}

impl Package {
    /// Create an empty package for the Go package at `path`.
    ///
    /// The protobuf package name is derived from the path: `/` becomes `.` and
    /// `-` becomes `_`.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: package_name(&path),
            path,
            ..Default::default()
        }
    }

    /// Imported files in first-use order.
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    pub fn is_imported(&self, file: &str) -> bool {
        self.imports.iter().any(|i| i == file)
    }

    /// Import `file`. Returns `false` if it was already imported.
    pub fn import(&mut self, file: impl Into<String>) -> bool {
        let file = file.into();
        if file.is_empty() || self.is_imported(&file) {
            return false;
        }
        self.imports.push(file);
        true
    }

    /// Import the generated schema of the package at `path`.
    ///
    /// Importing the package itself is a no-op.
    pub fn import_from_path(&mut self, path: &str) -> bool {
        if path == self.path {
            return false;
        }
        self.import(generated_file(path))
    }

    pub fn message(&self, name: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.name == name)
    }

    pub fn enumeration(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }
}

/// Path of the generated schema file for the package at `path`.
pub fn generated_file(path: &str) -> String {
    if path.is_empty() {
        GENERATED_FILE_NAME.to_string()
    } else {
        format!("{}/{GENERATED_FILE_NAME}", path.trim_end_matches('/'))
    }
}

/// Protobuf package name for a Go import path.
pub fn package_name(path: &str) -> String {
    path.trim_matches('/').replace('/', ".").replace('-', "_")
}
