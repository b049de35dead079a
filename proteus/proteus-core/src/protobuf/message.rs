use std::collections::BTreeSet;

use super::{Options, Type};

/// A protobuf message.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Message {
    pub name: String,
    reserved: BTreeSet<u32>,
    pub options: Options,
    pub fields: Vec<Field>,
}

impl Message {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Reserve a field position. Returns `false` if it was already reserved.
    pub fn reserve(&mut self, pos: u32) -> bool {
        self.reserved.insert(pos)
    }

    pub fn is_reserved(&self, pos: u32) -> bool {
        self.reserved.contains(&pos)
    }

    /// Reserved positions in ascending order.
    pub fn reserved(&self) -> impl Iterator<Item = u32> + '_ {
        self.reserved.iter().copied()
    }

    /// Lowest position above every assigned field that is not reserved.
    pub fn next_position(&self) -> u32 {
        let mut pos = self.fields.iter().map(|f| f.pos).max().unwrap_or(0) + 1;
        while self.is_reserved(pos) {
            pos += 1;
        }
        pos
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A protobuf message field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    /// 1-based tag number, unique within the message.
    pub pos: u32,
    pub repeated: bool,
    pub ty: Type,
    pub options: Options,
}

/// A protobuf enumeration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Enum {
    pub name: String,
    pub options: Options,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub name: String,
    pub value: u32,
    pub options: Options,
}
