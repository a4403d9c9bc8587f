//! Visitor turning every visited node into one ordinal-keyed schema record.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::classify::SchemaType;
use crate::ordinal::ordinal_key;
use crate::traverse::{Visit, Visitor};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRecord {
    pub tag: String,
    #[serde(rename = "type")]
    pub ty: SchemaType,
    /// Left empty for manual editing.
    pub description: String,
    /// Always `false` when generated.
    pub required: bool,
}

impl SchemaRecord {
    pub fn new(tag: impl Into<String>, ty: SchemaType) -> Self {
        Self {
            tag: tag.into(),
            ty,
            description: String::new(),
            required: false,
        }
    }
}

/// Records in visitation order, keyed `key_one`, `key_two`, ...
///
/// Keys come from the position alone, so repeated tags (the same field in
/// sibling objects, index `0` of every array) never collide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaMap(IndexMap<String, SchemaRecord>);

impl SchemaMap {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&SchemaRecord> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SchemaRecord)> {
        self.0.iter()
    }
}

#[derive(Debug, Default)]
pub struct SchemaRecorder {
    map: SchemaMap,
    position: u64,
}

impl SchemaRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, visit: Visit<'_>) -> (String, SchemaRecord) {
        self.position += 1;
        let key = ordinal_key(self.position);
        let record = SchemaRecord::new(visit.tag, visit.ty);
        tracing::debug!("{key}: {} ({}) under {}", record.tag, record.ty, visit.root);
        self.map.0.insert(key.clone(), record.clone());
        (key, record)
    }

    pub fn map(&self) -> &SchemaMap {
        &self.map
    }

    pub fn into_map(self) -> SchemaMap {
        self.map
    }
}

impl Visitor for SchemaRecorder {
    fn visit(&mut self, visit: Visit<'_>) -> Result<()> {
        self.record(visit);
        Ok(())
    }
}
