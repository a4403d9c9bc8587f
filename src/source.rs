//! Lazily read JSON documents.
//!
//! A [`Document`] holds nothing but a buffered reader. Values are decoded as
//! the walk reaches them, so memory stays proportional to the current path
//! rather than the document. Malformed bytes therefore surface during
//! [`Document::traverse`], not when the document is opened.
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::de::DeserializeSeed;
use serde_json::de::IoRead;

use crate::traverse::stream::{NodeSeed, SelectSeed, Walk};
use crate::traverse::{TraverseOptions, Visitor};
use crate::{Error, Result};

/// Extension recognized for both inputs and outputs.
pub const JSON_EXT: &str = "json";

pub fn has_json_suffix(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == JSON_EXT)
}

pub struct Document<R: Read> {
    de: serde_json::Deserializer<IoRead<BufReader<R>>>,
    selector: Option<String>,
}

impl Document<File> {
    pub fn open(path: &Path) -> Result<Self> {
        if !has_json_suffix(path) {
            return Err(Error::NotJsonSource { path: path.to_path_buf() });
        }
        let unreadable = |source: std::io::Error| Error::SourceNotFound {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(unreadable)?;
        // directories open fine on unix and only fail on the first read
        if !file.metadata().map_err(unreadable)?.is_file() {
            return Err(unreadable(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> Document<R> {
    pub fn from_reader(reader: R) -> Self {
        let mut de = serde_json::Deserializer::from_reader(BufReader::new(reader));
        // nesting is bounded by the stack, which grows on demand during the walk
        de.disable_recursion_limit();
        Self { de, selector: None }
    }

    /// Narrow the walk to one top-level attribute (object key or array index).
    pub fn select(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Stream the document through `visitor`, consuming it.
    ///
    /// The whole input is read even when the depth budget or a selection
    /// stops the visits early, so trailing garbage is still an error.
    pub fn traverse(
        mut self,
        visitor: &mut dyn Visitor,
        options: &TraverseOptions,
    ) -> Result<()> {
        let mut walk = Walk::new(visitor);
        let mut track = serde_path_to_error::Track::new();
        let label = options.root_label.as_str();
        let target = NodeSeed {
            walk: &mut walk,
            key: label,
            root: label,
            skip: options.skip_root,
            depth: options.depth,
        };
        let outcome = {
            let de = serde_stacker::Deserializer::new(&mut self.de);
            let de = serde_path_to_error::Deserializer::new(de, &mut track);
            match self.selector.as_deref() {
                None => target.deserialize(de).map(|()| true),
                Some(selector) => SelectSeed { selector, target }.deserialize(de),
            }
        };
        if let Some(failure) = walk.take_failure() {
            return Err(failure);
        }
        let found = outcome
            .and_then(|found| self.de.end().map(|()| found))
            .map_err(|source| Error::MalformedInput {
                path: track.path().to_string(),
                source,
            })?;
        match self.selector {
            Some(selector) if !found => Err(Error::SelectionNotFound { selector }),
            _ => Ok(()),
        }
    }
}
