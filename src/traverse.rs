//! Depth-first, depth-bounded walk over a JSON value.
//!
//! Rules shared by both walkers (materialized `serde_json::Value` here, the
//! byte stream in [`stream`]):
//! - an exhausted depth budget returns before visiting or descending;
//! - a node is visited before any of its descendants, unless it is the
//!   skipped root;
//! - object entries are walked in document order, array elements in index
//!   order with their decimal index as tag;
//! - children are never skipped, their `root` is the parent's tag, and a
//!   limited budget shrinks by one per level;
//! - the first visitor error aborts the walk and is returned as-is.
pub mod stream;

use serde_json::Value;

use crate::classify::{classify, SchemaType};
use crate::value::Node;
use crate::Result;

// ------------------------------- Depth ----------------------------------- //

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Depth {
    #[default]
    Unbounded,
    /// Number of levels still allowed, counting the current node.
    Limited(u32),
}

impl Depth {
    /// Command-line convention: any negative number means unbounded.
    pub fn from_arg(depth: i64) -> Self {
        if depth < 0 {
            Depth::Unbounded
        } else {
            Depth::Limited(u32::try_from(depth).unwrap_or(u32::MAX))
        }
    }

    pub fn is_exhausted(self) -> bool {
        matches!(self, Depth::Limited(0))
    }

    /// Budget handed to the children of the current node.
    pub fn descend(self) -> Self {
        match self {
            Depth::Unbounded => Depth::Unbounded,
            Depth::Limited(n) => Depth::Limited(n.saturating_sub(1)),
        }
    }
}

// ------------------------------- Visitor --------------------------------- //

/// One visited node.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    /// Object key, decimal array index, or the root label.
    pub tag: &'a str,
    pub value: &'a Node<'a>,
    pub ty: SchemaType,
    /// Tag of the parent node.
    pub root: &'a str,
}

pub trait Visitor {
    fn visit(&mut self, visit: Visit<'_>) -> Result<()>;
}

impl<F> Visitor for F
where
    F: FnMut(Visit<'_>) -> Result<()>,
{
    fn visit(&mut self, visit: Visit<'_>) -> Result<()> {
        self(visit)
    }
}

/// Per-run parameters of a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraverseOptions {
    /// Tag used for the top-level node.
    pub root_label: String,
    /// Do not visit the top-level node itself (its descendants still are).
    pub skip_root: bool,
    pub depth: Depth,
}

impl Default for TraverseOptions {
    fn default() -> Self {
        Self {
            root_label: "root".to_string(),
            skip_root: true,
            depth: Depth::Unbounded,
        }
    }
}

// ------------------------------- Walk ------------------------------------ //

/// Walk an already decoded value.
pub fn traverse(
    key: &str,
    value: &Value,
    visitor: &mut dyn Visitor,
    root: &str,
    skip: bool,
    depth: Depth,
) -> Result<()> {
    if depth.is_exhausted() {
        return Ok(());
    }
    if !skip {
        let node = Node::from(value);
        visitor.visit(Visit { tag: key, value: &node, ty: classify(&node), root })?;
    }
    let next = depth.descend();
    match value {
        Value::Object(map) => {
            for (child_key, child) in map {
                traverse(child_key, child, visitor, key, false, next)?;
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                traverse(&index.to_string(), child, visitor, key, false, next)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// [`traverse`] with the parameters bundled in `options`.
pub fn traverse_value(
    value: &Value,
    visitor: &mut dyn Visitor,
    options: &TraverseOptions,
) -> Result<()> {
    let label = options.root_label.as_str();
    traverse(label, value, visitor, label, options.skip_root, options.depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collect(value: &Value, skip: bool, depth: Depth) -> Vec<(String, SchemaType, String)> {
        let mut seen = Vec::new();
        let mut visitor = |visit: Visit<'_>| -> Result<()> {
            seen.push((visit.tag.to_string(), visit.ty, visit.root.to_string()));
            Ok(())
        };
        traverse("root", value, &mut visitor, "root", skip, depth).unwrap();
        seen
    }

    fn tags(seen: &[(String, SchemaType, String)]) -> Vec<&str> {
        seen.iter().map(|(tag, _, _)| tag.as_str()).collect()
    }

    #[test]
    fn negative_depth_is_unbounded() {
        assert_eq!(Depth::from_arg(-1), Depth::Unbounded);
        assert_eq!(Depth::from_arg(-5), Depth::Unbounded);
        assert_eq!(Depth::from_arg(0), Depth::Limited(0));
        assert_eq!(Depth::from_arg(3).descend(), Depth::Limited(2));
        assert_eq!(Depth::Limited(0).descend(), Depth::Limited(0));
    }

    #[test]
    fn parents_come_before_children_in_document_order() {
        let doc = json!({"z": {"y": 1, "x": [true, null]}, "a": "s"});
        let seen = collect(&doc, false, Depth::Unbounded);
        assert_eq!(tags(&seen), ["root", "z", "y", "x", "0", "1", "a"]);
        let roots: Vec<&str> = seen.iter().map(|(_, _, root)| root.as_str()).collect();
        assert_eq!(roots, ["root", "root", "z", "z", "x", "x", "root"]);
    }

    #[test]
    fn depth_zero_visits_nothing() {
        let doc = json!({"a": {"b": 1}});
        assert!(collect(&doc, false, Depth::Limited(0)).is_empty());
        assert!(collect(&doc, true, Depth::Limited(0)).is_empty());
    }

    #[test]
    fn depth_one_visits_only_the_root() {
        let doc = json!({"a": {"b": 1}});
        assert_eq!(tags(&collect(&doc, false, Depth::Limited(1))), ["root"]);
        assert!(collect(&doc, true, Depth::Limited(1)).is_empty());
    }

    #[test]
    fn limited_depth_counts_from_the_root() {
        let doc = json!({"a": {"b": {"c": 1}}, "d": [[1]]});
        let seen = collect(&doc, true, Depth::Limited(3));
        assert_eq!(tags(&seen), ["a", "b", "d", "0"]);
    }

    #[test]
    fn scalar_root_has_no_children() {
        let seen = collect(&json!(42), false, Depth::Unbounded);
        assert_eq!(seen, [("root".to_string(), SchemaType::Integer, "root".to_string())]);
        assert!(collect(&json!(42), true, Depth::Unbounded).is_empty());
    }

    #[test]
    fn visitor_error_stops_the_walk() {
        let doc = json!({"a": 1, "b": 2, "c": 3});
        let mut count = 0;
        let mut visitor = |visit: Visit<'_>| -> Result<()> {
            count += 1;
            if visit.tag == "b" {
                return Err(anyhow::anyhow!("refusing {}", visit.tag).into());
            }
            Ok(())
        };
        let err = traverse_value(&doc, &mut visitor, &TraverseOptions::default()).unwrap_err();
        assert!(matches!(err, crate::Error::Visitor(_)));
        assert_eq!(count, 2);
    }
}
