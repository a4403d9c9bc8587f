//! Coarse schema type of a node.
//!
//! The tag names are part of the persisted layout: objects are `ARRAY`,
//! arrays are `ENUM`, and every number is `INTEGER`.
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    Array,
    Enum,
    String,
    Integer,
    Boolean,
    Null,
}

impl SchemaType {
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaType::Array => "ARRAY",
            SchemaType::Enum => "ENUM",
            SchemaType::String => "STRING",
            SchemaType::Integer => "INTEGER",
            SchemaType::Boolean => "BOOLEAN",
            SchemaType::Null => "NULL",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify(node: &Node<'_>) -> SchemaType {
    match node {
        Node::Object => SchemaType::Array,
        Node::Array => SchemaType::Enum,
        Node::String(_) => SchemaType::String,
        Node::Integer(_) | Node::Float(_) => SchemaType::Integer,
        Node::Bool(_) => SchemaType::Boolean,
        Node::Null => SchemaType::Null,
    }
}

/// Same as [`classify`] for an already materialized value.
pub fn classify_value(value: &Value) -> SchemaType {
    classify(&Node::from(value))
}
