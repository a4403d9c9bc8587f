//! File and directory level schema generation.
//!
//! One run = one document: its own reader, recorder and map. Batches run one
//! independent run per file on the rayon pool and report every outcome.
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::recorder::SchemaRecorder;
use crate::source::{has_json_suffix, Document, JSON_EXT};
use crate::traverse::TraverseOptions;
use crate::writer::{self, Sink};
use crate::{Error, Result};

/// Settings shared by every document of a run or batch.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub options: TraverseOptions,
    /// Top-level attribute to narrow the document to before walking it.
    pub select: Option<String>,
}

/// Where the schema for `source` goes: `target` itself when it names a file,
/// `<target>/<stem>_schema.json` when it has no extension.
pub fn output_path(source: &Path, target: &Path) -> PathBuf {
    if target.extension().is_some() {
        return target.to_path_buf();
    }
    let stem = source.file_stem().unwrap_or_default().to_string_lossy();
    target.join(format!("{stem}_schema.{JSON_EXT}"))
}

/// Generate the schema of one `.json` file. Returns the path written.
pub fn make_schema(source: &Path, target: &Path, settings: &Settings) -> Result<PathBuf> {
    if !has_json_suffix(source) {
        return Err(Error::NotJsonSource { path: source.to_path_buf() });
    }
    let target = output_path(source, target);

    info!("Reading from {} ...", source.display());
    let mut document = Document::open(source)?;
    if let Some(selector) = &settings.select {
        document = document.select(selector.clone());
    }
    let mut recorder = SchemaRecorder::new();
    document.traverse(&mut recorder, &settings.options)?;
    let map = recorder.into_map();
    debug!("{} records from {}", map.len(), source.display());

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| Error::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    info!("Writing to {} ...", target.display());
    writer::write(Sink::Path(&target), &map)?;
    Ok(target)
}

/// Outcome of a directory run; one entry per `.json` file found.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, Error)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Generate a schema for every `.json` file directly inside `source`.
///
/// Both paths must be extension-less; `target` is created when missing.
/// A failing document is reported and never stops its siblings.
pub fn make_multiple_schemas(
    source: &Path,
    target: &Path,
    settings: &Settings,
) -> Result<BatchReport> {
    for path in [source, target] {
        if path.extension().is_some() {
            return Err(Error::NotADirectory { path: path.to_path_buf() });
        }
    }
    if !source.is_dir() {
        let source_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory");
        return Err(Error::SourceNotFound { path: source.to_path_buf(), source: source_err });
    }
    std::fs::create_dir_all(target).map_err(|source| Error::Io {
        path: target.to_path_buf(),
        source,
    })?;

    let pattern = format!("{}/*.{JSON_EXT}", glob::Pattern::escape(&source.to_string_lossy()));
    let mut paths = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|e| Error::Io {
            path: e.path().to_path_buf(),
            source: e.into(),
        })?;
        if path.is_file() {
            paths.push(path);
        }
    }
    info!("{} documents in {}", paths.len(), source.display());

    let outcomes: Vec<(PathBuf, Result<PathBuf>)> = paths
        .into_par_iter()
        .map(|path| {
            let outcome = make_schema(&path, target, settings);
            (path, outcome)
        })
        .collect();

    let mut report = BatchReport::default();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(written) => report.written.push(written),
            Err(error) => report.failed.push((path, error)),
        }
    }
    Ok(report)
}
