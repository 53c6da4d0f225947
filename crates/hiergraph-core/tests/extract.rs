use hiergraph_core::testing::{cross_level, platform};
use hiergraph_core::{
    Binding, Direction, ErrorKind, Forest, KindTables, Snapshot, SnapshotObject, extract, infer,
    path_between,
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn find(forest: &Forest, qualified: &str) -> hiergraph_core::ComponentIdx {
    forest
        .preorder()
        .into_iter()
        .find(|&c| forest.component(c).qualified_name == qualified)
        .unwrap_or_else(|| panic!("no component {qualified}"))
}

fn port_summary(forest: &Forest, qualified: &str) -> Vec<(String, Direction, bool)> {
    let component = forest.component(find(forest, qualified));
    component
        .ports
        .iter()
        .map(|&p| {
            let port = forest.port(p);
            (port.local_name.clone(), port.direction, port.synthesized)
        })
        .collect()
}

#[test]
fn test_platform_structure() {
    let extraction = extract(&platform(), &KindTables::default());
    let forest = &extraction.forest;

    assert!(forest.is_well_formed_tree());
    let names: Vec<&str> = forest
        .preorder()
        .into_iter()
        .map(|c| forest.component(c).local_name.as_str())
        .collect();
    assert_eq!(names, vec!["soc", "clk", "cpu", "periph", "mem", "spare"]);

    assert_eq!(extraction.scan.folded, 2);
    assert_eq!(extraction.scan.unknown, 0);
    assert_eq!(extraction.scan.internal, 1);
}

#[test]
fn test_platform_pass_through_ports() {
    let extraction = extract(&platform(), &KindTables::default());
    let forest = &extraction.forest;

    assert_eq!(
        port_summary(forest, "soc.periph"),
        vec![
            ("clk_i".to_string(), Direction::Input, true),
            ("tsck".to_string(), Direction::Input, true),
            ("tsck_bw".to_string(), Direction::Output, true),
        ]
    );
    assert_eq!(
        port_summary(forest, "soc.cpu"),
        vec![
            ("clk_i".to_string(), Direction::Input, false),
            ("isck".to_string(), Direction::Output, false),
            ("isck_bw".to_string(), Direction::Input, false),
        ]
    );
    assert!(port_summary(forest, "soc").is_empty());
    assert!(forest.component(find(forest, "soc.spare")).is_empty());

    assert_eq!(extraction.infer.synthesized, 3);
    assert_eq!(extraction.infer.pairs, 4);
    assert_eq!(extraction.infer.unreachable, 0);
}

#[test]
fn test_cross_level_wrapper_gets_output() {
    let forest = extract(&cross_level(), &KindTables::default()).forest;
    let a = forest.component(find(&forest, "top.a"));
    assert_eq!(a.ports.len(), 1);
    let port = forest.port(a.ports[0]);
    assert_eq!(port.qualified_name, "top.a.x");
    assert_eq!(port.direction, Direction::Output);
    assert_eq!(port.binding, Some(Binding(7)));
    assert!(port_summary(&forest, "top").is_empty());
}

#[test]
fn test_inference_is_idempotent() {
    let mut forest = extract(&platform(), &KindTables::default()).forest;
    let before = forest.port_count();
    let again = infer(&mut forest);
    assert_eq!(again.synthesized, 0);
    assert_eq!(forest.port_count(), before);
}

#[test]
fn test_extraction_is_deterministic() {
    let snapshot = platform();
    let first = extract(&snapshot, &KindTables::default()).forest;
    let second = extract(&snapshot, &KindTables::default()).forest;

    let describe = |forest: &Forest| -> Vec<String> {
        forest
            .ports()
            .iter()
            .map(|p| format!("{} {} {} {:?}", p.id, p.qualified_name, p.direction, p.binding))
            .collect()
    };
    assert_eq!(describe(&first), describe(&second));
    assert_eq!(first.id_gen(), second.id_gen());
}

#[test]
fn test_every_crossed_boundary_has_a_port() {
    let forest = extract(&platform(), &KindTables::default()).forest;
    let clk = find(&forest, "soc.clk");
    let mem = find(&forest, "soc.periph.mem");
    let trail = path_between(&forest, clk, mem).unwrap();
    let crossed: Vec<&str> = trail
        .iter()
        .filter(|step| step.component != find(&forest, "soc"))
        .map(|step| forest.component(step.component).local_name.as_str())
        .collect();
    assert_eq!(crossed, vec!["clk", "periph", "mem"]);
    for step in trail.iter().filter(|s| s.component != find(&forest, "soc")) {
        assert!(forest.port_bound_to(step.component, Binding(100)).is_some());
    }
}

#[test]
fn test_kind_tables_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("kinds.toml");
    std::fs::write(&path, "composite = [\"vp::cluster\"]\n").unwrap();
    let tables = KindTables::from_path(&path).unwrap();

    let snapshot = Snapshot::new(vec![
        SnapshotObject::new("vp::cluster", "top")
            .child(SnapshotObject::new("sc_in", "i").bound_to(1)),
    ]);
    let forest = extract(&snapshot, &tables).forest;
    assert_eq!(forest.component(forest.root().unwrap()).local_name, "top");
    assert_eq!(forest.port_count(), 1);

    let missing = KindTables::from_path(dir.path().join("absent.toml")).unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::IoFailed);
    assert!(missing.context_value("path").is_some());
}

#[test]
fn test_snapshot_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    std::fs::write(
        &path,
        r#"{"objects": [{"kind": "sc_module", "name": "top", "type": "Top"}]}"#,
    )
    .unwrap();
    let snapshot = Snapshot::from_path(&path).unwrap();
    assert_eq!(snapshot.len(), 1);

    std::fs::write(&path, "{ not json").unwrap();
    let err = Snapshot::from_path(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SnapshotInvalid);
}
