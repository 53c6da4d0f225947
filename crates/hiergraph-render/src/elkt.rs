//! ELK text graph output.

use std::fmt::Write;

use hiergraph_collect::LevelEdge;
use hiergraph_core::{ComponentIdx, Forest, ObjectId, PortIdx, Result};

use crate::walk::{DocumentWriter, NODE_WIDTH, node_height};

const INDENT: &str = "    ";

/// Write indentation to output.
fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str(INDENT);
    }
}

/// Line-oriented builder for `.elkt` documents.
pub struct ElktBuilder {
    output: String,
}

impl Default for ElktBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ElktBuilder {
    /// Start a document laid out by the layered algorithm with orthogonal
    /// edge routing.
    pub fn new() -> Self {
        let mut output = String::with_capacity(4096);
        output.push_str("algorithm: org.eclipse.elk.layered\n");
        output.push_str("edgeRouting: ORTHOGONAL\n");
        Self { output }
    }

    pub fn open_node(&mut self, level: usize, name: &str, height: u32) -> &mut Self {
        write_indent(&mut self.output, level);
        let _ = writeln!(self.output, "node {name} {{");
        let inner = level + 1;
        write_indent(&mut self.output, inner);
        let _ = writeln!(self.output, "layout [ size: {NODE_WIDTH}, {height} ]");
        write_indent(&mut self.output, inner);
        self.output.push_str("portConstraints: FIXED_SIDE\n");
        write_indent(&mut self.output, inner);
        let _ = writeln!(self.output, "label \"{name}\"");
        self
    }

    pub fn port(&mut self, level: usize, name: &str, side: &str) -> &mut Self {
        write_indent(&mut self.output, level);
        let _ = writeln!(self.output, "port {name} {{ ^port.side: {side} label '{name}' }}");
        self
    }

    pub fn edge(&mut self, level: usize, from: &str, to: &str) -> &mut Self {
        write_indent(&mut self.output, level);
        let _ = writeln!(self.output, "edge {from} -> {to}");
        self
    }

    /// Close a node opened at `level`, followed by a blank line.
    pub fn close_node(&mut self, level: usize) -> &mut Self {
        write_indent(&mut self.output, level);
        self.output.push_str("}\n\n");
        self
    }

    pub fn build(self) -> String {
        self.output
    }
}

/// [`DocumentWriter`] for the text graph. Components with neither ports nor
/// children are not drawn.
#[derive(Default)]
pub struct ElktWriter {
    builder: ElktBuilder,
}

impl DocumentWriter for ElktWriter {
    fn begin_component(&mut self, forest: &Forest, component: ComponentIdx, level: usize) -> bool {
        let node = forest.component(component);
        if node.is_empty() {
            return false;
        }
        self.builder
            .open_node(level, &node.local_name, node_height(forest, component));
        true
    }

    fn port(&mut self, forest: &Forest, port: PortIdx, level: usize) {
        let port = forest.port(port);
        self.builder
            .port(level + 1, &port.local_name, port.direction.side());
    }

    fn edge(&mut self, forest: &Forest, edge: &LevelEdge, _id: ObjectId, level: usize) {
        self.builder.edge(
            level + 1,
            &forest.port(edge.source_port).qualified_name,
            &forest.port(edge.target_port).qualified_name,
        );
    }

    fn end_component(
        &mut self,
        _forest: &Forest,
        _component: ComponentIdx,
        _last_id: u32,
        level: usize,
    ) {
        self.builder.close_node(level);
    }

    fn finish(self, _forest: &Forest, _title: &str) -> Result<String> {
        Ok(self.builder.build())
    }
}
