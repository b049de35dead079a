use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result},
};

/// Value of an option: either a literal token (`true`, `42`, `SPEED`) or a
/// string which is quoted on output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Literal(String),
    String(String),
}

impl OptionValue {
    pub fn literal(value: impl Into<String>) -> Self {
        OptionValue::Literal(value.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        OptionValue::String(value.into())
    }
}

impl Display for OptionValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            OptionValue::Literal(v) => f.write_str(v),
            OptionValue::String(v) => write!(f, "{v:?}"),
        }
    }
}

/// An option name paired with its value, as yielded by [`Options::sorted`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedOption {
    pub name: String,
    pub value: OptionValue,
}

/// Options attached to a package, message, field, enum or enum value.
///
/// Iteration is always ascending by option name, independent of the order in
/// which options were set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Options(BTreeMap<String, OptionValue>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing any previous value with the same name.
    pub fn set(&mut self, name: impl Into<String>, value: OptionValue) -> Option<OptionValue> {
        self.0.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Snapshot of all options ordered by name.
    pub fn sorted(&self) -> Vec<NamedOption> {
        self.0
            .iter()
            .map(|(name, value)| NamedOption {
                name: name.clone(),
                value: value.clone(),
            })
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, OptionValue)> for Options {
    fn from_iter<T: IntoIterator<Item = (K, OptionValue)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<K: Into<String>, const N: usize> From<[(K, OptionValue); N]> for Options {
    fn from(value: [(K, OptionValue); N]) -> Self {
        value.into_iter().collect()
    }
}
