//! hiergraph command-line interface.
//!
//! Loads a structure snapshot, runs the extraction pipeline and writes one
//! document, either to a file or to a caller-supplied stream.

use std::io::Write;
use std::path::PathBuf;

use tracing::info;

use hiergraph_core::{Error, KindTables, Result, Snapshot};
use hiergraph_render::{
    DEFAULT_TITLE, DumpOptions, DumpReport, Format, HierarchyDumper, dump_structure,
};

/// Options for running hiergraph.
#[derive(Debug, Clone, Default)]
pub struct HiergraphOptions {
    pub snapshot: PathBuf,
    pub output: Option<PathBuf>,
    /// `None` picks the format from the output extension.
    pub format: Option<Format>,
    /// TOML file extending the kind tables.
    pub config: Option<PathBuf>,
    pub title: Option<String>,
}

impl HiergraphOptions {
    pub fn new(snapshot: impl Into<PathBuf>) -> Self {
        Self {
            snapshot: snapshot.into(),
            ..Self::default()
        }
    }

    pub fn resolved_format(&self) -> Format {
        match (self.format, &self.output) {
            (Some(format), _) => format,
            (None, Some(path)) => Format::from_extension(path),
            (None, None) => Format::default(),
        }
    }

    /// Explicit title, else the snapshot file stem.
    pub fn resolved_title(&self) -> String {
        self.title.clone().unwrap_or_else(|| {
            self.snapshot
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or(DEFAULT_TITLE)
                .to_string()
        })
    }

    fn tables(&self) -> Result<KindTables> {
        match &self.config {
            Some(path) => KindTables::from_path(path),
            None => Ok(KindTables::default()),
        }
    }
}

/// Main entry point. The document goes to `opts.output` when set, else to
/// `stdout`.
pub fn run_main<W: Write>(opts: &HiergraphOptions, stdout: &mut W) -> Result<DumpReport> {
    let snapshot = Snapshot::from_path(&opts.snapshot)?;
    let tables = opts.tables()?;
    let format = opts.resolved_format();
    let title = opts.resolved_title();
    info!(
        "loaded {} objects from {}",
        snapshot.len(),
        opts.snapshot.display()
    );

    match &opts.output {
        Some(path) => {
            let dumper = HierarchyDumper::new(path, format)
                .with_title(title)
                .with_tables(tables);
            dumper.start_of_simulation(&snapshot)?.ok_or_else(|| {
                Error::invalid_argument("output path is empty").with_operation("cli::run_main")
            })
        }
        None => {
            let options = DumpOptions::new(format).with_title(title);
            dump_structure(&snapshot, &tables, stdout, &options)
        }
    }
}
