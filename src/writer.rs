//! Persisting a [`SchemaMap`].
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::recorder::SchemaMap;
use crate::source::has_json_suffix;
use crate::{Error, Result};

pub enum Sink<'a> {
    /// `.json` file, truncated and written with two-space indentation.
    Path(&'a Path),
    /// Already open stream, written compact.
    Writer(&'a mut dyn Write),
}

pub fn write(sink: Sink<'_>, map: &SchemaMap) -> Result<()> {
    match sink {
        Sink::Path(path) => {
            if !has_json_suffix(path) {
                return Err(Error::NotJsonSink { path: path.to_path_buf() });
            }
            let fault = |source: std::io::Error| Error::SinkWrite {
                target: path.display().to_string(),
                source,
            };
            let file = File::create(path).map_err(fault)?;
            let mut out = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut out, map).map_err(|e| fault(e.into()))?;
            out.flush().map_err(fault)
        }
        Sink::Writer(out) => {
            let fault = |source: std::io::Error| Error::SinkWrite {
                target: "stream".to_string(),
                source,
            };
            serde_json::to_writer(&mut *out, map).map_err(|e| fault(e.into()))?;
            out.flush().map_err(fault)
        }
    }
}
