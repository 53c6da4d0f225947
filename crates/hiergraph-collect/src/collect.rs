//! Level-local edge derivation.

use hiergraph_core::{ComponentIdx, Forest};
use tracing::debug;

use crate::types::{EdgeKind, EdgeMap, LevelEdge};

/// Edges drawn inside `scope`.
///
/// Parent/child edges come first: a bound port of `scope` connects to every
/// port of a direct child bound to the same channel, with the scope port as
/// source. Sibling edges follow: an output of one child connects to every
/// input of a *different* child on the same channel. Ports, children and
/// their ports are visited in stored order, so the result is deterministic.
pub fn derive_edges(forest: &Forest, scope: ComponentIdx) -> Vec<LevelEdge> {
    let component = forest.component(scope);
    let mut edges = Vec::new();

    for &port in &component.ports {
        if forest.port(port).binding.is_none() {
            continue;
        }
        for &child in &component.children {
            for &child_port in &forest.component(child).ports {
                if forest.port(port).is_connected_to(forest.port(child_port)) {
                    edges.push(LevelEdge {
                        kind: EdgeKind::ParentChild,
                        source_component: scope,
                        source_port: port,
                        target_component: child,
                        target_port: child_port,
                    });
                }
            }
        }
    }

    for &driver in &component.children {
        for &out in &forest.component(driver).ports {
            if !forest.port(out).direction.is_output() {
                continue;
            }
            for &receiver in component.children.iter().filter(|&&c| c != driver) {
                for &inp in &forest.component(receiver).ports {
                    let target = forest.port(inp);
                    if target.direction.is_input() && forest.port(out).is_connected_to(target) {
                        edges.push(LevelEdge {
                            kind: EdgeKind::Sibling,
                            source_component: driver,
                            source_port: out,
                            target_component: receiver,
                            target_port: inp,
                        });
                    }
                }
            }
        }
    }

    edges
}

/// Edges of every component of `forest`.
pub fn derive_all(forest: &Forest) -> EdgeMap {
    let per_component: Vec<Vec<LevelEdge>> = (0..forest.component_count())
        .map(|idx| derive_edges(forest, ComponentIdx(idx as u32)))
        .collect();
    let map = EdgeMap::new(per_component);
    debug!(
        "derived {} edges over {} components",
        map.total(),
        forest.component_count()
    );
    map
}
