//! Substitutions of well-known protobuf types for specific Go types.

use std::collections::HashMap;

use proteus_core::Named;

/// What a Go type is replaced with, and the file that declares the replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomType {
    pub named: Named,
    pub import: String,
}

impl CustomType {
    pub fn new(named: Named, import: impl Into<String>) -> Self {
        Self {
            named,
            import: import.into(),
        }
    }
}

/// Table of qualified Go type names (`"<path>.<name>"`) that bypass normal
/// resolution.
///
/// [`CustomTypeRegistry::default`] maps `time.Time` and `time.Duration` to the
/// protobuf well-known types; [`CustomTypeRegistry::new`] starts empty.
#[derive(Debug, Clone)]
pub struct CustomTypeRegistry {
    entries: HashMap<String, CustomType>,
}

impl CustomTypeRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(
        mut self,
        qualified_name: impl Into<String>,
        named: Named,
        import: impl Into<String>,
    ) -> Self {
        self.insert(qualified_name, named, import);
        self
    }

    /// Add or replace an override.
    pub fn insert(
        &mut self,
        qualified_name: impl Into<String>,
        named: Named,
        import: impl Into<String>,
    ) -> Option<CustomType> {
        self.entries
            .insert(qualified_name.into(), CustomType::new(named, import))
    }

    pub fn is_override(&self, qualified_name: &str) -> bool {
        self.entries.contains_key(qualified_name)
    }

    pub fn lookup(&self, qualified_name: &str) -> Option<&CustomType> {
        self.entries.get(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CustomTypeRegistry {
    fn default() -> Self {
        Self::new()
            .with(
                "time.Time",
                Named::new("google.protobuf", "Timestamp"),
                "google/protobuf/timestamp.proto",
            )
            .with(
                "time.Duration",
                Named::new("google.protobuf", "Duration"),
                "google/protobuf/duration.proto",
            )
    }
}
