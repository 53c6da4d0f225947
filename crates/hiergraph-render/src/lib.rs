//! Document rendering for hiergraph.
//!
//! One tree walk ([`walk`]) drives a [`DocumentWriter`] per output format:
//!
//! - `dbgjson`: layout JSON with type names and raw bindings
//! - `json`: nested layout JSON for the ELK layered algorithm
//! - `d3json`: flat node-link JSON
//! - `elkt`: ELK text graph
//!
//! [`dump_structure`] runs the whole pipeline against an adapter and writes
//! the document to a sink; [`HierarchyDumper`] does the same into a file.

mod d3;
mod dumper;
mod elk;
mod elkt;
mod format;
mod json;
mod walk;

use tracing::debug;

use hiergraph_collect::EdgeMap;
use hiergraph_core::{Forest, Result};

pub use d3::D3JsonWriter;
pub use dumper::{DUMPER_NAME, DumpReport, HierarchyDumper, dump_structure};
pub use elk::ElkJsonWriter;
pub use elkt::{ElktBuilder, ElktWriter};
pub use format::{DEFAULT_TITLE, DumpOptions, Format};
pub use walk::{DocumentWriter, walk};

/// Render an inferred forest and its edges as the document `options` selects.
pub fn render(forest: &Forest, edges: &EdgeMap, options: &DumpOptions) -> Result<String> {
    debug!(
        "rendering {} components, {} edges as {}",
        forest.component_count(),
        edges.total(),
        options.format
    );
    let title = options.title.as_str();
    match options.format {
        Format::DbgJson => walk(forest, edges, title, ElkJsonWriter::new(true)),
        Format::ElkJson => walk(forest, edges, title, ElkJsonWriter::new(false)),
        Format::D3Json => walk(forest, edges, title, D3JsonWriter::default()),
        Format::Elkt => walk(forest, edges, title, ElktWriter::default()),
    }
}
