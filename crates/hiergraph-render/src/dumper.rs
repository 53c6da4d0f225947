//! The output operation: extract, render and write one document.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use hiergraph_collect::derive_all;
use hiergraph_core::{Error, InferStats, Introspect, KindTables, Result, ScanStats, extract};

use crate::format::{DumpOptions, Format};
use crate::render;

/// Basename of the dumper's own helper object. It carries the internal
/// marker prefix, so the dumper never shows up in its own output.
pub const DUMPER_NAME: &str = "$$$hierarchy_dumper$$$";

/// What one dump produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpReport {
    pub format: Format,
    pub components: usize,
    pub ports: usize,
    pub edges: usize,
    pub bytes: usize,
    pub scan: ScanStats,
    pub infer: InferStats,
}

/// Scan `adapter`, infer pass-through ports, derive edges and write the
/// document selected by `options` to `sink`.
///
/// The document is rendered completely before the first byte reaches the
/// sink and is written with a single `write_all`. A failing sink yields
/// [`hiergraph_core::ErrorKind::SinkUnavailable`].
pub fn dump_structure<A, W>(
    adapter: &A,
    tables: &KindTables,
    sink: &mut W,
    options: &DumpOptions,
) -> Result<DumpReport>
where
    A: Introspect,
    W: Write,
{
    dump_to(adapter, tables, sink, "sink", options)
}

fn dump_to<A, W>(
    adapter: &A,
    tables: &KindTables,
    sink: &mut W,
    destination: &str,
    options: &DumpOptions,
) -> Result<DumpReport>
where
    A: Introspect,
    W: Write,
{
    let extraction = extract(adapter, tables);
    let forest = &extraction.forest;
    let edges = derive_all(forest);
    let document = render(forest, &edges, options)?;

    sink.write_all(document.as_bytes())
        .and_then(|()| sink.flush())
        .map_err(|err| {
            Error::sink_unavailable(destination, err).with_operation("render::dump_structure")
        })?;

    info!("structure dumped to {} as {}", destination, options.format);
    Ok(DumpReport {
        format: options.format,
        components: forest.component_count(),
        ports: forest.port_count(),
        edges: edges.total(),
        bytes: document.len(),
        scan: extraction.scan,
        infer: extraction.infer,
    })
}

/// Writes the structure to a file once the system is fully elaborated.
///
/// Hook [`HierarchyDumper::start_of_simulation`] into the point of the host
/// lifecycle where construction is complete and nothing has run yet.
#[derive(Debug, Clone)]
pub struct HierarchyDumper {
    path: Option<PathBuf>,
    options: DumpOptions,
    tables: KindTables,
}

impl HierarchyDumper {
    /// An empty `path` disables the dump.
    pub fn new(path: impl Into<PathBuf>, format: Format) -> Self {
        let path = path.into();
        Self {
            path: (!path.as_os_str().is_empty()).then_some(path),
            options: DumpOptions::new(format),
            tables: KindTables::default(),
        }
    }

    /// Format chosen from the file extension, see [`Format::from_extension`].
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = Format::from_extension(&path);
        Self::new(path, format)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options.title = title.into();
        self
    }

    pub fn with_tables(mut self, tables: KindTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn basename(&self) -> &'static str {
        DUMPER_NAME
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn options(&self) -> &DumpOptions {
        &self.options
    }

    /// Dump the structure of `adapter`. Returns `Ok(None)` when disabled.
    pub fn start_of_simulation<A: Introspect>(&self, adapter: &A) -> Result<Option<DumpReport>> {
        let Some(path) = &self.path else {
            debug!("no hierarchy dump requested");
            return Ok(None);
        };
        let destination = path.display().to_string();
        let mut file = File::create(path).map_err(|err| {
            Error::sink_unavailable(destination.as_str(), err)
                .with_operation("render::HierarchyDumper::start_of_simulation")
        })?;
        dump_to(adapter, &self.tables, &mut file, &destination, &self.options).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hiergraph_core::ErrorKind;
    use hiergraph_core::testing::cross_level;
    use std::io;

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failing_sink_is_reported() {
        let err = dump_structure(
            &cross_level(),
            &KindTables::default(),
            &mut BrokenSink,
            &DumpOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SinkUnavailable);
        assert_eq!(err.operation(), "render::dump_structure");
    }

    #[test]
    fn test_report_counts() {
        let mut out = Vec::new();
        let report = dump_structure(
            &cross_level(),
            &KindTables::default(),
            &mut out,
            &DumpOptions::new(Format::Elkt),
        )
        .unwrap();
        assert_eq!(report.components, 4);
        assert_eq!(report.ports, 3);
        assert_eq!(report.edges, 2);
        assert_eq!(report.infer.synthesized, 1);
        assert_eq!(report.bytes, out.len());
    }

    #[test]
    fn test_disabled_dumper() {
        let dumper = HierarchyDumper::new("", Format::ElkJson);
        assert!(dumper.path().is_none());
        assert_eq!(dumper.start_of_simulation(&cross_level()).unwrap(), None);
        assert_eq!(dumper.basename(), DUMPER_NAME);
    }
}
