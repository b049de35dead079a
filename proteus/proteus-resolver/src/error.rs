//! Error types for type resolution.

/// A structural problem in the scanned input. None of these are transient.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// A field type matches no resolution rule.
    #[error("unsupported type '{ty}' in field '{field}' of struct '{record}' (package '{package}')")]
    UnsupportedType {
        package: String,
        record: String,
        field: String,
        ty: String,
    },

    /// Following aliases led back to an alias already being unwrapped.
    #[error(
        "cyclic alias '{alias}' in field '{field}' of struct '{record}' (package '{package}'): {}",
        .chain.join(" -> ")
    )]
    CyclicAlias {
        package: String,
        record: String,
        field: String,
        alias: String,
        /// Aliases visited, ending with the repeated one.
        chain: Vec<String>,
    },

    /// A map key does not resolve to a scalar.
    #[error("invalid map key type '{key}' in field '{field}' of struct '{record}' (package '{package}')")]
    InvalidMapKey {
        package: String,
        record: String,
        field: String,
        key: String,
    },

    /// Two packages declare the same qualified enum name.
    #[error("enum '{name}' is declared by both '{first}' and '{second}'")]
    DuplicateEnum {
        name: String,
        first: String,
        second: String,
    },

    /// Two packages declare the same qualified alias with different types.
    #[error("alias '{name}' is declared as '{first}' in '{first_package}' and as '{second}' in '{second_package}'")]
    DuplicateAlias {
        name: String,
        first: String,
        first_package: String,
        second: String,
        second_package: String,
    },

    /// The same package path was scanned more than once.
    #[error("package '{path}' appears more than once")]
    DuplicatePackage { path: String },
}

/// Every error found during one resolution run, in input order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", format_errors(.0))]
pub struct ResolveErrors(pub Vec<ResolveError>);

impl ResolveErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolveError> {
        self.0.iter()
    }
}

impl From<ResolveError> for ResolveErrors {
    fn from(value: ResolveError) -> Self {
        Self(vec![value])
    }
}

impl IntoIterator for ResolveErrors {
    type Item = ResolveError;
    type IntoIter = std::vec::IntoIter<ResolveError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

fn format_errors(errors: &[ResolveError]) -> String {
    match errors {
        [single] => single.to_string(),
        errors => errors.iter().fold(
            format!("{} resolution errors", errors.len()),
            |mut out, e| {
                out.push_str("\n  ");
                out.push_str(&e.to_string());
                out
            },
        ),
    }
}
