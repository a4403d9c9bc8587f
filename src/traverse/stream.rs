//! Walk driven by the deserializer.
//!
//! Each node is a [`DeserializeSeed`]: the visitor sees a container as soon as
//! its opening token is read, children are then pulled one entry at a time,
//! and anything past the depth budget is skipped with [`IgnoredAny`]. Only
//! the keys on the current path are ever held in memory.
use std::borrow::Cow;
use std::fmt;

use serde::Deserialize;
use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess};

use super::{Depth, Visit, Visitor};
use crate::classify::classify;
use crate::value::Node;
use crate::Error;

/// State shared by every seed of one walk.
///
/// serde errors cannot carry our own error type, so the first failure is
/// parked here and the deserializer is unwound with a placeholder.
pub(crate) struct Walk<'w> {
    visitor: &'w mut dyn Visitor,
    failure: Option<Error>,
}

impl<'w> Walk<'w> {
    pub(crate) fn new(visitor: &'w mut dyn Visitor) -> Self {
        Self { visitor, failure: None }
    }

    pub(crate) fn take_failure(&mut self) -> Option<Error> {
        self.failure.take()
    }

    fn abort<E: de::Error>(&mut self, error: Error) -> E {
        let message = error.to_string();
        self.failure = Some(error);
        E::custom(message)
    }

    fn enter<E: de::Error>(
        &mut self,
        tag: &str,
        node: &Node<'_>,
        root: &str,
        skip: bool,
    ) -> Result<(), E> {
        if skip {
            return Ok(());
        }
        let visit = Visit { tag, value: node, ty: classify(node), root };
        self.visitor.visit(visit).map_err(|error| self.abort(error))
    }
}

// ------------------------------- Node ------------------------------------ //

pub(crate) struct NodeSeed<'a, 'w> {
    pub(crate) walk: &'a mut Walk<'w>,
    pub(crate) key: &'a str,
    pub(crate) root: &'a str,
    pub(crate) skip: bool,
    pub(crate) depth: Depth,
}

impl NodeSeed<'_, '_> {
    fn leaf<E: de::Error>(self, node: Node<'_>) -> Result<(), E> {
        self.walk.enter(self.key, &node, self.root, self.skip)
    }
}

impl<'de> DeserializeSeed<'de> for NodeSeed<'_, '_> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        if self.depth.is_exhausted() {
            IgnoredAny::deserialize(deserializer)?;
            return Ok(());
        }
        deserializer.deserialize_any(self)
    }
}

impl<'de> de::Visitor<'de> for NodeSeed<'_, '_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<(), E> {
        self.leaf(Node::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<(), E> {
        self.leaf(Node::Integer(i128::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<(), E> {
        self.leaf(Node::Integer(i128::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<(), E> {
        self.leaf(Node::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<(), E> {
        self.leaf(Node::String(Cow::Borrowed(v)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<(), E> {
        self.leaf(Node::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<(), E> {
        self.leaf(Node::Null)
    }

    fn visit_bytes<E: de::Error>(self, _: &[u8]) -> Result<(), E> {
        Err(self.walk.abort(Error::Unclassifiable { kind: "bytes" }))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<(), A::Error> {
        let NodeSeed { walk, key, root, skip, depth } = self;
        walk.enter(key, &Node::Object, root, skip)?;
        let depth = depth.descend();
        while let Some(child) = map.next_key::<String>()? {
            let seed = NodeSeed { walk: &mut *walk, key: &child, root: key, skip: false, depth };
            map.next_value_seed(seed)?;
        }
        Ok(())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<(), A::Error> {
        let NodeSeed { walk, key, root, skip, depth } = self;
        walk.enter(key, &Node::Array, root, skip)?;
        let depth = depth.descend();
        let mut index = 0usize;
        loop {
            let child = index.to_string();
            let seed = NodeSeed { walk: &mut *walk, key: &child, root: key, skip: false, depth };
            if seq.next_element_seed(seed)?.is_none() {
                break;
            }
            index += 1;
        }
        Ok(())
    }
}

// ------------------------------ Selection -------------------------------- //

/// Skips the top level until `selector` is found, then walks that value with
/// `target`. Evaluates to whether the selector matched.
///
/// Objects match on key (first occurrence wins), arrays on decimal index.
/// Everything else is skipped but still read, so malformed trailing input is
/// still reported.
pub(crate) struct SelectSeed<'a, 'w> {
    pub(crate) selector: &'a str,
    pub(crate) target: NodeSeed<'a, 'w>,
}

impl<'de> DeserializeSeed<'de> for SelectSeed<'_, '_> {
    type Value = bool;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<bool, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> de::Visitor<'de> for SelectSeed<'_, '_> {
    type Value = bool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object or array")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<bool, E> {
        Ok(false)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<bool, E> {
        Ok(false)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<bool, E> {
        Ok(false)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<bool, E> {
        Ok(false)
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<bool, E> {
        Ok(false)
    }

    fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
        Ok(false)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<bool, A::Error> {
        let mut target = Some(self.target);
        while let Some(key) = map.next_key::<String>()? {
            if key == self.selector {
                if let Some(seed) = target.take() {
                    map.next_value_seed(seed)?;
                    continue;
                }
            }
            map.next_value::<IgnoredAny>()?;
        }
        Ok(target.is_none())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<bool, A::Error> {
        let wanted = self.selector.parse::<usize>().ok();
        let mut target = Some(self.target);
        let mut found = false;
        let mut index = 0usize;
        loop {
            let seed = if Some(index) == wanted { target.take() } else { None };
            let more = match seed {
                Some(seed) => {
                    found = seq.next_element_seed(seed)?.is_some();
                    found
                }
                None => seq.next_element::<IgnoredAny>()?.is_some(),
            };
            if !more {
                break;
            }
            index += 1;
        }
        Ok(found)
    }
}
