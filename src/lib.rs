//! Stream a JSON document and describe every key/value pair as one flat,
//! ordinal-keyed schema record.
//!
//! ```text
//! source ─► Document (lazy) ─► traverse ─► SchemaRecorder ─► writer
//! ```
pub mod classify;
pub mod cli;
pub mod error;
pub mod ordinal;
pub mod recorder;
pub mod schema;
pub mod source;
pub mod traverse;
pub mod value;
pub mod writer;

pub use classify::{classify, classify_value, SchemaType};
pub use error::{Error, Result};
pub use recorder::{SchemaMap, SchemaRecord, SchemaRecorder};
pub use schema::{make_multiple_schemas, make_schema, BatchReport, Settings};
pub use source::Document;
pub use traverse::{traverse, traverse_value, Depth, TraverseOptions, Visit, Visitor};
pub use value::Node;
