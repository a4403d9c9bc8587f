//! The value handed to a visitor for each node.
//!
//! Containers carry no children: by the time a visitor sees an `Object` or
//! `Array` nothing below it has been decoded yet. The traverser realizes
//! children afterwards, one at a time.
use std::borrow::Cow;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Node<'a> {
    Object,
    Array,
    String(Cow<'a, str>),
    /// Covers both the signed and unsigned ranges serde_json decodes.
    Integer(i128),
    Float(f64),
    Bool(bool),
    Null,
}

impl Node<'_> {
    pub fn is_container(&self) -> bool {
        matches!(self, Node::Object | Node::Array)
    }
}

impl<'a> From<&'a Value> for Node<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Object(_) => Node::Object,
            Value::Array(_) => Node::Array,
            Value::String(s) => Node::String(Cow::Borrowed(s)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Node::Integer(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    Node::Integer(i128::from(u))
                } else {
                    Node::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::Bool(b) => Node::Bool(*b),
            Value::Null => Node::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn materialized_numbers_keep_their_kind() {
        assert_eq!(Node::from(&json!(30)), Node::Integer(30));
        assert_eq!(Node::from(&json!(u64::MAX)), Node::Integer(i128::from(u64::MAX)));
        assert_eq!(Node::from(&json!(-7)), Node::Integer(-7));
        assert_eq!(Node::from(&json!(80.5)), Node::Float(80.5));
    }

    #[test]
    fn containers_do_not_carry_children() {
        let doc = json!({"a": [1, 2, 3]});
        assert_eq!(Node::from(&doc), Node::Object);
        assert_eq!(Node::from(&doc["a"]), Node::Array);
        assert!(Node::from(&doc["a"]).is_container());
        assert!(!Node::from(&doc["a"][0]).is_container());
    }
}
