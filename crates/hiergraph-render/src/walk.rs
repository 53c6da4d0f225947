//! The tree walk shared by every output format.
//!
//! Formats differ only in syntax, so the walk decides *what* is emitted and
//! in which order; a [`DocumentWriter`] decides how it looks.

use hiergraph_collect::{EdgeMap, LevelEdge};
use hiergraph_core::{ComponentIdx, Forest, ObjectId, PortIdx, Result};

/// Receives the walk events of one document.
///
/// For every component the walk emits, in order: `begin_component`, its
/// ports, its children (recursively), the edges drawn inside it, and
/// `end_component`.
pub trait DocumentWriter {
    fn begin_document(&mut self, _forest: &Forest, _title: &str) {}

    /// Open `component`. Returning `false` skips it with everything below.
    fn begin_component(&mut self, forest: &Forest, component: ComponentIdx, level: usize) -> bool;

    fn port(&mut self, forest: &Forest, port: PortIdx, level: usize);

    fn edge(&mut self, forest: &Forest, edge: &LevelEdge, id: ObjectId, level: usize);

    /// `last_id` is the highest id handed out so far, edge ids included.
    fn end_component(
        &mut self,
        forest: &Forest,
        component: ComponentIdx,
        last_id: u32,
        level: usize,
    );

    /// Produce the finished document.
    fn finish(self, forest: &Forest, title: &str) -> Result<String>;
}

/// Drive `writer` over `forest` and return its document.
///
/// Edge ids continue the forest's id sequence in walk order, so they are
/// unique within the run and identical between two renders of one forest.
pub fn walk<W: DocumentWriter>(
    forest: &Forest,
    edges: &EdgeMap,
    title: &str,
    mut writer: W,
) -> Result<String> {
    let mut walker = Walker {
        forest,
        edges,
        ids: forest.id_gen(),
    };
    writer.begin_document(forest, title);
    if let Some(root) = forest.root() {
        walker.visit(&mut writer, root, 0);
    }
    writer.finish(forest, title)
}

struct Walker<'a> {
    forest: &'a Forest,
    edges: &'a EdgeMap,
    ids: hiergraph_core::IdGen,
}

impl Walker<'_> {
    fn visit<W: DocumentWriter>(&mut self, writer: &mut W, component: ComponentIdx, level: usize) {
        let forest = self.forest;
        if !writer.begin_component(forest, component, level) {
            return;
        }
        for &port in &forest.component(component).ports {
            writer.port(forest, port, level);
        }
        for &child in &forest.component(component).children {
            self.visit(writer, child, level + 1);
        }
        for edge in self.edges.edges_of(component) {
            let id = self.ids.next_id();
            writer.edge(forest, edge, id, level);
        }
        writer.end_component(forest, component, self.ids.last(), level);
    }
}

/// Number of input and output ports of `component`.
pub(crate) fn port_counts(forest: &Forest, component: ComponentIdx) -> (usize, usize) {
    let ports = &forest.component(component).ports;
    let inputs = ports
        .iter()
        .filter(|&&p| forest.port(p).direction.is_input())
        .count();
    (inputs, ports.len() - inputs)
}

/// Box height that leaves room for the busier side.
pub(crate) fn node_height(forest: &Forest, component: ComponentIdx) -> u32 {
    let (inputs, outputs) = port_counts(forest, component);
    (inputs.max(outputs) as u32 * 20).max(80)
}

pub(crate) const NODE_WIDTH: u32 = 50;
pub(crate) const PORT_SIZE: u32 = 6;
