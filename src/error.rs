//! Error type shared by the reader, traverser, recorder, writer and driver.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read source {}: {source}", .path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a valid .json file", .path.display())]
    NotJsonSource { path: PathBuf },

    /// Invalid bytes met while streaming; `path` is the JSON path reached so far.
    #[error("malformed JSON at {path}: {source}")]
    MalformedInput {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("decoder produced a {kind} value, which has no schema type")]
    Unclassifiable { kind: &'static str },

    #[error("attribute `{selector}` not found at the top level of the document")]
    SelectionNotFound { selector: String },

    #[error("visitor failed: {0}")]
    Visitor(#[from] anyhow::Error),

    #[error("failed writing schema to {target}: {source}")]
    SinkWrite {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a .json sink", .path.display())]
    NotJsonSink { path: PathBuf },

    #[error("{} must be a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}
