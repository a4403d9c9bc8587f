//! Minimal CLI: <source> <target> → ordinal schema file(s)
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{error, Level};
use tracing_subscriber::EnvFilter;

use crate::schema::{self, Settings};
use crate::source::has_json_suffix;
use crate::traverse::{Depth, TraverseOptions};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// parse JSON files and generate a flat, ordinal schema
#[derive(Parser, Debug)]
#[command(name = "json-ordinal", version)]
pub struct CommandLineInterface {
    /// source .json file, or a directory of .json files
    source: PathBuf,

    /// target .json file, or a directory receiving `<stem>_schema.json`
    target: PathBuf,

    /// depth of search (negative = unbounded)
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    depth: i64,

    /// increase output verbosity
    #[arg(long)]
    verbose: bool,

    /// select a particular top-level attribute from the json file
    #[arg(long)]
    select: Option<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn log_level(&self) -> Level {
        if self.verbose { Level::DEBUG } else { Level::INFO }
    }

    /// Install the global subscriber at the level chosen on the command line.
    /// `RUST_LOG` still takes precedence when set.
    pub fn init_logging(&self) {
        let filter = EnvFilter::builder()
            .with_default_directive(self.log_level().into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    pub fn settings(&self) -> Settings {
        Settings {
            options: TraverseOptions {
                depth: Depth::from_arg(self.depth),
                ..TraverseOptions::default()
            },
            select: self.select.clone(),
        }
    }

    pub fn run(&self) -> anyhow::Result<()> {
        tracing::debug!("{self:?}");
        let settings = self.settings();
        let source = &self.source;

        if has_json_suffix(source) {
            schema::make_schema(source, &self.target, &settings)
                .with_context(|| format!("failed to generate schema for {}", source.display()))?;
            return Ok(());
        }
        if source.is_dir() || source.extension().is_none() {
            let report = schema::make_multiple_schemas(source, &self.target, &settings)?;
            for (path, failure) in &report.failed {
                error!("{}: {failure}", path.display());
            }
            if !report.is_success() {
                bail!(
                    "{} of {} documents failed",
                    report.failed.len(),
                    report.failed.len() + report.written.len()
                );
            }
            return Ok(());
        }
        bail!("{} is neither a .json file nor a directory", source.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::path::Path;

    #[test]
    fn defaults() {
        let cli = CommandLineInterface::try_parse_from(["json-ordinal", "in.json", "out"]).unwrap();
        let settings = cli.settings();
        assert_eq!(settings.options.depth, Depth::Unbounded);
        assert!(settings.options.skip_root);
        assert_eq!(settings.select, None);
        assert_eq!(cli.log_level(), Level::INFO);
    }

    #[test]
    fn flags() {
        let cli = CommandLineInterface::try_parse_from([
            "json-ordinal",
            "in.json",
            "out.json",
            "--depth",
            "2",
            "--verbose",
            "--select",
            "address",
        ])
        .unwrap();
        let settings = cli.settings();
        assert_eq!(settings.options.depth, Depth::Limited(2));
        assert_eq!(settings.select.as_deref(), Some("address"));
        assert_eq!(cli.log_level(), Level::DEBUG);
    }

    #[test]
    fn negative_depth_is_accepted() {
        let args = ["json-ordinal", "a", "b", "--depth", "-1"];
        let cli = CommandLineInterface::try_parse_from(args).unwrap();
        assert_eq!(cli.settings().options.depth, Depth::Unbounded);
    }

    fn with_paths(source: &Path, target: &Path) -> CommandLineInterface {
        let args = [OsStr::new("json-ordinal"), source.as_os_str(), target.as_os_str()];
        CommandLineInterface::try_parse_from(args).unwrap()
    }

    #[test]
    fn json_source_runs_a_single_document() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("person.json");
        std::fs::write(&source, r#"{"name": "John"}"#).unwrap();
        let target = dir.path().join("out");
        with_paths(&source, &target).run().unwrap();
        assert!(target.join("person_schema.json").is_file());
    }

    #[test]
    fn directory_source_runs_a_batch() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("in");
        std::fs::create_dir(&source).unwrap();
        std::fs::write(source.join("a.json"), "[true]").unwrap();
        std::fs::write(source.join("b.json"), "null").unwrap();
        let target = dir.path().join("out");
        with_paths(&source, &target).run().unwrap();
        assert!(target.join("a_schema.json").is_file());
        assert!(target.join("b_schema.json").is_file());
    }

    #[test]
    fn other_sources_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("notes.txt");
        std::fs::write(&source, "{}").unwrap();
        let target = dir.path().join("out");
        let err = with_paths(&source, &target).run().unwrap_err();
        assert!(err.to_string().contains("neither a .json file nor a directory"), "{err}");
        assert!(!target.exists());
    }

    #[test]
    fn failed_batch_document_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("in");
        std::fs::create_dir(&source).unwrap();
        std::fs::write(source.join("good.json"), r#"{"a": 1}"#).unwrap();
        std::fs::write(source.join("bad.json"), r#"{"a": "#).unwrap();
        let target = dir.path().join("out");
        let err = with_paths(&source, &target).run().unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 documents failed");
        assert!(target.join("good_schema.json").is_file());
        assert!(!target.join("bad_schema.json").exists());
    }
}
