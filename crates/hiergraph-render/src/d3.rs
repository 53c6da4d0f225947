//! Flat node-link JSON (`d3json`).
//!
//! Unlike the layout JSON, nodes do not nest: every component is one entry
//! of the top-level `nodes` array and points at its parent by id, and every
//! edge names both its components and both its ports.

use serde::Serialize;

use hiergraph_collect::LevelEdge;
use hiergraph_core::{ComponentIdx, Forest, ObjectId, PortIdx, Result};

use crate::json::{LayoutProperties, to_pretty_string};
use crate::walk::DocumentWriter;

/// `maxId` reported for the document as a whole.
const DOCUMENT_MAX_ID: u32 = 65536;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct D3Document {
    nodes: Vec<D3Node>,
    edges: Vec<D3Edge>,
    hw_meta: DocumentMeta,
    properties: LayoutProperties,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentMeta {
    cls: Option<String>,
    max_id: u32,
    name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct D3Node {
    id: String,
    /// `None` for the root.
    parent: Option<String>,
    ports: Vec<D3Port>,
    hw_meta: NodeMeta,
    properties: LayoutProperties,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeMeta {
    name: String,
    cls: String,
    max_id: u32,
    is_external_port: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct D3Port {
    id: String,
    direction: &'static str,
    hw_meta: PortMeta,
    properties: PortProperties,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PortMeta {
    name: String,
    connected_as_parent: bool,
}

#[derive(Debug, Serialize)]
struct PortProperties {
    side: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct D3Edge {
    id: String,
    source: String,
    source_port: String,
    target: String,
    target_port: String,
    hw_meta: EdgeMeta,
}

#[derive(Debug, Serialize)]
struct EdgeMeta {
    name: String,
}

/// [`DocumentWriter`] for the flat node-link document.
#[derive(Default)]
pub struct D3JsonWriter {
    nodes: Vec<D3Node>,
    edges: Vec<D3Edge>,
    /// Positions in `nodes` of the open components, innermost last.
    open: Vec<usize>,
}

impl DocumentWriter for D3JsonWriter {
    fn begin_component(&mut self, forest: &Forest, component: ComponentIdx, _level: usize) -> bool {
        let node = forest.component(component);
        self.open.push(self.nodes.len());
        self.nodes.push(D3Node {
            id: node.id.to_string(),
            parent: node.parent.map(|p| forest.component(p).id.to_string()),
            ports: Vec::with_capacity(node.ports.len()),
            hw_meta: NodeMeta {
                name: node.local_name.clone(),
                cls: node.declared_type.clone(),
                max_id: 0,
                is_external_port: false,
            },
            properties: LayoutProperties::fixed_side(),
        });
        true
    }

    fn port(&mut self, forest: &Forest, port: PortIdx, _level: usize) {
        let port = forest.port(port);
        let Some(&slot) = self.open.last() else {
            return;
        };
        self.nodes[slot].ports.push(D3Port {
            id: port.id.to_string(),
            direction: if port.direction.is_input() { "INPUT" } else { "OUTPUT" },
            hw_meta: PortMeta {
                name: port.local_name.clone(),
                connected_as_parent: false,
            },
            properties: PortProperties {
                side: port.direction.side(),
            },
        });
    }

    fn edge(&mut self, forest: &Forest, edge: &LevelEdge, id: ObjectId, _level: usize) {
        self.edges.push(D3Edge {
            id: id.to_string(),
            source: forest.component(edge.source_component).id.to_string(),
            source_port: forest.port(edge.source_port).id.to_string(),
            target: forest.component(edge.target_component).id.to_string(),
            target_port: forest.port(edge.target_port).id.to_string(),
            hw_meta: EdgeMeta {
                name: edge.label(forest),
            },
        });
    }

    fn end_component(
        &mut self,
        _forest: &Forest,
        _component: ComponentIdx,
        last_id: u32,
        _level: usize,
    ) {
        if let Some(slot) = self.open.pop() {
            self.nodes[slot].hw_meta.max_id = last_id;
        }
    }

    fn finish(self, _forest: &Forest, title: &str) -> Result<String> {
        to_pretty_string(&D3Document {
            nodes: self.nodes,
            edges: self.edges,
            hw_meta: DocumentMeta {
                cls: None,
                max_id: DOCUMENT_MAX_ID,
                name: title.to_string(),
            },
            properties: LayoutProperties::fixed_order(),
        })
    }
}
