use hiergraph_collect::{EdgeKind, LevelEdge, derive_all};
use hiergraph_core::testing::{cross_level, platform};
use hiergraph_core::{Forest, KindTables, Snapshot, SnapshotObject, extract};
use pretty_assertions::assert_eq;

fn describe(forest: &Forest, edge: &LevelEdge) -> String {
    format!(
        "{} {} -> {}",
        edge.kind,
        forest.port(edge.source_port).qualified_name,
        forest.port(edge.target_port).qualified_name
    )
}

fn edges_by_scope(forest: &Forest) -> Vec<(String, Vec<String>)> {
    let map = derive_all(forest);
    forest
        .preorder()
        .into_iter()
        .filter(|&c| !map.edges_of(c).is_empty())
        .map(|c| {
            let lines = map.edges_of(c).iter().map(|e| describe(forest, e)).collect();
            (forest.component(c).qualified_name.clone(), lines)
        })
        .collect()
}

#[test]
fn test_cross_level_edges() {
    let forest = extract(&cross_level(), &KindTables::default()).forest;
    assert_eq!(
        edges_by_scope(&forest),
        vec![
            (
                "top".to_string(),
                vec!["sibling top.a.x -> top.b.y".to_string()]
            ),
            (
                "top.a".to_string(),
                vec!["parent_child top.a.x -> top.a.a1.x".to_string()]
            ),
        ]
    );
}

#[test]
fn test_platform_edges() {
    let forest = extract(&platform(), &KindTables::default()).forest;
    assert_eq!(
        edges_by_scope(&forest),
        vec![
            (
                "soc".to_string(),
                vec![
                    "sibling soc.clk.clk -> soc.cpu.clk_i".to_string(),
                    "sibling soc.clk.clk -> soc.periph.clk_i".to_string(),
                    "sibling soc.cpu.isck -> soc.periph.tsck".to_string(),
                    "sibling soc.periph.tsck_bw -> soc.cpu.isck_bw".to_string(),
                ]
            ),
            (
                "soc.periph".to_string(),
                vec![
                    "parent_child soc.periph.clk_i -> soc.periph.mem.clk_i".to_string(),
                    "parent_child soc.periph.tsck -> soc.periph.mem.tsck".to_string(),
                    "parent_child soc.periph.tsck_bw -> soc.periph.mem.tsck_bw".to_string(),
                ]
            ),
        ]
    );
}

#[test]
fn test_edges_stay_level_local() {
    let forest = extract(&platform(), &KindTables::default()).forest;
    let map = derive_all(&forest);
    for scope in forest.preorder() {
        let children = &forest.component(scope).children;
        for edge in map.edges_of(scope) {
            assert_ne!(edge.source_port, edge.target_port);
            match edge.kind {
                EdgeKind::ParentChild => {
                    assert_eq!(edge.source_component, scope);
                    assert!(children.contains(&edge.target_component));
                }
                EdgeKind::Sibling => {
                    assert_ne!(edge.source_component, edge.target_component);
                    assert!(children.contains(&edge.source_component));
                    assert!(children.contains(&edge.target_component));
                }
            }
        }
    }
}

#[test]
fn test_labels_prefer_signal_alias() {
    let forest = extract(&platform(), &KindTables::default()).forest;
    let labels: Vec<String> = derive_all(&forest).iter().map(|e| e.label(&forest)).collect();
    assert_eq!(
        labels,
        vec![
            "clk",
            "clk",
            "isck_to_tsck",
            "tsck_bw_to_isck_bw",
            "clk",
            "tsck_to_tsck",
            "tsck_bw_to_tsck_bw",
        ]
    );
}

#[test]
fn test_cross_level_socket_pair_edges_both_directions() {
    let snapshot = Snapshot::new(vec![
        SnapshotObject::module("top", "Top")
            .child(
                SnapshotObject::module("cpu", "Cpu")
                    .child(SnapshotObject::new("tlm_initiator_socket", "isck").bound_to(200)),
            )
            .child(
                SnapshotObject::module("sub", "Sub").child(
                    SnapshotObject::module("mem", "Memory")
                        .child(SnapshotObject::new("tlm_target_socket", "tsck").bound_to(200)),
                ),
            ),
    ]);
    let forest = extract(&snapshot, &KindTables::default()).forest;
    assert_eq!(
        edges_by_scope(&forest),
        vec![
            (
                "top".to_string(),
                vec![
                    "sibling top.cpu.isck -> top.sub.tsck".to_string(),
                    "sibling top.sub.tsck_bw -> top.cpu.isck_bw".to_string(),
                ]
            ),
            (
                "top.sub".to_string(),
                vec![
                    "parent_child top.sub.tsck -> top.sub.mem.tsck".to_string(),
                    "parent_child top.sub.tsck_bw -> top.sub.mem.tsck_bw".to_string(),
                ]
            ),
        ]
    );
}
