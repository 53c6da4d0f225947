//! Nested layout JSON (`json`) and its debug variant (`dbgjson`).

use serde::Serialize;

use hiergraph_collect::LevelEdge;
use hiergraph_core::{ComponentIdx, Forest, ObjectId, PortIdx, Result};

use crate::json::{Label, labels, to_pretty_string};
use crate::walk::{DocumentWriter, NODE_WIDTH, PORT_SIZE, node_height};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ElkDocument {
    id: &'static str,
    labels: Vec<Label>,
    layout_options: DocumentLayout,
    children: Vec<ElkNode>,
    edges: Vec<ElkEdge>,
}

#[derive(Debug, Serialize)]
struct DocumentLayout {
    algorithm: &'static str,
}

#[derive(Debug, Serialize)]
struct ElkNode {
    id: String,
    ports: Vec<ElkPort>,
    children: Vec<ElkNode>,
    edges: Vec<ElkEdge>,
    labels: Vec<Label>,
    width: u32,
    height: u32,
    #[serde(flatten)]
    debug: Option<NodeDebug>,
}

#[derive(Debug, Serialize)]
struct NodeDebug {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    topmodule: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ElkPort {
    id: String,
    labels: Vec<Label>,
    width: u32,
    height: u32,
    layout_options: PortLayout,
    #[serde(flatten)]
    debug: Option<PortDebug>,
}

#[derive(Debug, Serialize)]
struct PortLayout {
    #[serde(rename = "port.side")]
    side: &'static str,
}

#[derive(Debug, Serialize)]
struct PortDebug {
    #[serde(rename = "type")]
    type_name: String,
    input: bool,
    /// Raw binding, `0` when unbound.
    interface: u64,
    synthesized: bool,
}

#[derive(Debug, Serialize)]
struct ElkEdge {
    id: String,
    sources: Vec<String>,
    targets: Vec<String>,
}

/// [`DocumentWriter`] for the nested layout JSON. With `debug` set, nodes
/// and ports also carry type names and raw bindings.
pub struct ElkJsonWriter {
    debug: bool,
    /// Open components, innermost last.
    stack: Vec<ElkNode>,
    roots: Vec<ElkNode>,
}

impl ElkJsonWriter {
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            stack: Vec::new(),
            roots: Vec::new(),
        }
    }
}

impl DocumentWriter for ElkJsonWriter {
    fn begin_component(&mut self, forest: &Forest, component: ComponentIdx, _level: usize) -> bool {
        let node = forest.component(component);
        let debug = self.debug.then(|| NodeDebug {
            name: node.local_name.clone(),
            type_name: node.declared_type.clone(),
            topmodule: node.is_root(),
        });
        self.stack.push(ElkNode {
            id: node.id.to_string(),
            ports: Vec::with_capacity(node.ports.len()),
            children: Vec::with_capacity(node.children.len()),
            edges: Vec::new(),
            labels: labels(&node.local_name),
            width: NODE_WIDTH,
            height: node_height(forest, component),
            debug,
        });
        true
    }

    fn port(&mut self, forest: &Forest, port: PortIdx, _level: usize) {
        let port = forest.port(port);
        let debug = self.debug.then(|| PortDebug {
            type_name: port.declared_type.clone(),
            input: port.direction.is_input(),
            interface: port.binding.map_or(0, |b| b.raw()),
            synthesized: port.synthesized,
        });
        if let Some(node) = self.stack.last_mut() {
            node.ports.push(ElkPort {
                id: port.id.to_string(),
                labels: labels(&port.local_name),
                width: PORT_SIZE,
                height: PORT_SIZE,
                layout_options: PortLayout {
                    side: port.direction.side(),
                },
                debug,
            });
        }
    }

    fn edge(&mut self, forest: &Forest, edge: &LevelEdge, id: ObjectId, _level: usize) {
        if let Some(node) = self.stack.last_mut() {
            node.edges.push(ElkEdge {
                id: id.to_string(),
                sources: vec![forest.port(edge.source_port).id.to_string()],
                targets: vec![forest.port(edge.target_port).id.to_string()],
            });
        }
    }

    fn end_component(
        &mut self,
        _forest: &Forest,
        _component: ComponentIdx,
        _last_id: u32,
        _level: usize,
    ) {
        let Some(node) = self.stack.pop() else {
            return;
        };
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn finish(self, _forest: &Forest, title: &str) -> Result<String> {
        to_pretty_string(&ElkDocument {
            id: "0",
            labels: labels(title),
            layout_options: DocumentLayout { algorithm: "layered" },
            children: self.roots,
            edges: Vec::new(),
        })
    }
}
