//! Static interface descriptors
//!
//! The contract of a remote interface, written down as plain data: member
//! names and the value kinds of their signatures. The invoker interprets
//! these tables to decode replies. Nothing here is generated or
//! reflective.

use std::fmt;

use serde_json::Value;

/// JSON shape a declared signature element must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Uint,
    String,
    Array,
    Dict,
    Null,
}

impl ValueKind {
    /// Whether `value` satisfies this kind.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            ValueKind::Bool => value.is_boolean(),
            ValueKind::Uint => value.is_u64(),
            ValueKind::String => value.is_string(),
            ValueKind::Array => value.is_array(),
            ValueKind::Dict => value.is_object(),
            ValueKind::Null => value.is_null(),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "bool",
            ValueKind::Uint => "uint",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Dict => "dict",
            ValueKind::Null => "null",
        };
        f.write_str(name)
    }
}

/// Declared shape of one remote method.
#[derive(Debug, Clone, Copy)]
pub struct MethodDescriptor {
    pub name: &'static str,
    pub args: &'static [ValueKind],
    /// `Null` for methods that return nothing.
    pub returns: ValueKind,
}

/// Declared shape of one remote property.
#[derive(Debug, Clone, Copy)]
pub struct PropertyDescriptor {
    pub name: &'static str,
    pub kind: ValueKind,
    pub writable: bool,
}

/// Static description of one remote interface.
#[derive(Debug, Clone, Copy)]
pub struct InterfaceDescriptor {
    pub name: &'static str,
    pub methods: &'static [MethodDescriptor],
    pub properties: &'static [PropertyDescriptor],
}

impl InterfaceDescriptor {
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }
}
