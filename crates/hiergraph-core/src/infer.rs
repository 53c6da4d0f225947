//! Connectivity inference.
//!
//! The inspected system only requires two bound ports to share a channel;
//! the components between them in the tree need not know about it. The
//! renderer draws edges one level at a time, so every component whose
//! boundary a binding crosses gets a pass-through port for that binding.
//!
//! Nothing is removed or reordered. New ports are appended to their
//! component, and running inference again adds nothing.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::ids::{Binding, ComponentIdx, PortIdx};
use crate::model::{Direction, Forest, PortDecl};

/// Counters describing one inference pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InferStats {
    /// Driver/receiver pairs examined.
    pub pairs: usize,
    /// Pass-through ports created.
    pub synthesized: usize,
    /// Pairs whose owners share no ancestor; they stay undrawn.
    pub unreachable: usize,
}

/// One component on a tree path, and whether it was reached by stepping up
/// to a parent (`upward`) or down into a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub component: ComponentIdx,
    pub upward: bool,
}

impl Step {
    fn up(component: ComponentIdx) -> Self {
        Self { component, upward: true }
    }

    fn down(component: ComponentIdx) -> Self {
        Self { component, upward: false }
    }
}

/// Bound ports grouped by binding, groups in first-seen pre-order.
pub fn registry(forest: &Forest) -> Vec<(Binding, Vec<PortIdx>)> {
    let mut slots: HashMap<Binding, usize> = HashMap::new();
    let mut buckets: Vec<(Binding, Vec<PortIdx>)> = Vec::new();
    for component in forest.preorder() {
        for &port in &forest.component(component).ports {
            let Some(binding) = forest.port(port).binding else {
                continue;
            };
            let slot = *slots.entry(binding).or_insert_with(|| {
                buckets.push((binding, Vec::new()));
                buckets.len() - 1
            });
            buckets[slot].1.push(port);
        }
    }
    buckets
}

/// Tree path from `from` to `to`, both included, `from` first.
///
/// Depth-first: children are tried before the parent, and a step up is only
/// allowed while no step down has been taken, so the path climbs to the
/// common ancestor and then descends. `None` when the two components do not
/// share a tree.
pub fn path_between(forest: &Forest, from: ComponentIdx, to: ComponentIdx) -> Option<Vec<Step>> {
    let start = Step::up(from);
    let mut trail = vec![start];
    let mut visited = HashSet::new();
    let found = search(forest, start, to, &mut trail, &mut visited);
    found.then_some(trail)
}

fn search(
    forest: &Forest,
    current: Step,
    target: ComponentIdx,
    trail: &mut Vec<Step>,
    visited: &mut HashSet<ComponentIdx>,
) -> bool {
    if current.component == target {
        return true;
    }
    if !visited.insert(current.component) {
        return false;
    }
    for &child in &forest.component(current.component).children {
        let step = Step::down(child);
        trail.push(step);
        if search(forest, step, target, trail, visited) {
            return true;
        }
        trail.pop();
    }
    if current.upward
        && let Some(parent) = forest.parent(current.component)
    {
        let step = Step::up(parent);
        trail.push(step);
        if search(forest, step, target, trail, visited) {
            return true;
        }
        trail.pop();
    }
    false
}

/// Add the pass-through ports every multi-level binding needs.
pub fn infer(forest: &mut Forest) -> InferStats {
    let mut stats = InferStats::default();
    for (binding, ports) in registry(forest) {
        if ports.len() < 2 {
            continue;
        }
        let (drivers, receivers): (Vec<PortIdx>, Vec<PortIdx>) = ports
            .into_iter()
            .partition(|&p| forest.port(p).direction == Direction::Output);

        for &driver in &drivers {
            for &receiver in &receivers {
                stats.pairs += 1;
                link(forest, binding, driver, receiver, &mut stats);
            }
        }
    }
    stats
}

fn link(
    forest: &mut Forest,
    binding: Binding,
    driver: PortIdx,
    receiver: PortIdx,
    stats: &mut InferStats,
) {
    let from = forest.owner(driver);
    let to = forest.owner(receiver);
    trace!(
        "pair {} -> {}",
        forest.port(driver).qualified_name,
        forest.port(receiver).qualified_name
    );

    let Some(trail) = path_between(forest, from, to) else {
        debug!(
            "no common ancestor for {} and {}, binding left undrawn",
            forest.component(from).qualified_name,
            forest.component(to).qualified_name
        );
        stats.unreachable += 1;
        return;
    };

    // Walk back from the receiver. The ancestor where the path turns from
    // climbing to descending hosts the edge between its children and is
    // not crossed, so it gets no port.
    let mut last_upward = false;
    for step in trail[1..].iter().rev() {
        if step.upward == last_upward && forest.port_bound_to(step.component, binding).is_none() {
            let reference = if step.upward { driver } else { receiver };
            synthesize(forest, step.component, reference, binding);
            stats.synthesized += 1;
        }
        last_upward = step.upward;
    }
}

fn synthesize(
    forest: &mut Forest,
    component: ComponentIdx,
    reference: PortIdx,
    binding: Binding,
) -> PortIdx {
    let reference = forest.port(reference);
    let decl = PortDecl::new(
        format!(
            "{}.{}",
            forest.component(component).qualified_name,
            reference.local_name
        ),
        reference.local_name.as_str(),
        reference.direction,
        reference.declared_type.as_str(),
    )
    .with_binding(Some(binding))
    .synthesized();
    debug!("pass-through port {} ({})", decl.qualified_name, decl.direction);
    forest.add_port(component, decl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// R { A { A1 }, B }, A1.x -> B.y on binding 7.
    fn cross_level() -> (Forest, [ComponentIdx; 4]) {
        let mut forest = Forest::new();
        let r = forest.add_root("r", "r", "R");
        let a = forest.add_component(r, "r.a", "a", "A");
        let a1 = forest.add_component(a, "r.a.a1", "a1", "A1");
        let b = forest.add_component(r, "r.b", "b", "B");
        forest.add_port(
            a1,
            PortDecl::new("r.a.a1.x", "x", Direction::Output, "sc_out")
                .with_binding(Some(Binding(7))),
        );
        forest.add_port(
            b,
            PortDecl::new("r.b.y", "y", Direction::Input, "sc_in").with_binding(Some(Binding(7))),
        );
        (forest, [r, a, a1, b])
    }

    #[test]
    fn test_path_climbs_then_descends() {
        let (forest, [r, a, a1, b]) = cross_level();
        let path = path_between(&forest, a1, b).unwrap();
        assert_eq!(
            path,
            vec![Step::up(a1), Step::up(a), Step::up(r), Step::down(b)]
        );
        assert_eq!(path_between(&forest, b, b).unwrap(), vec![Step::up(b)]);
    }

    #[test]
    fn test_path_purely_downward() {
        let (forest, [r, a, a1, _]) = cross_level();
        let path = path_between(&forest, r, a1).unwrap();
        assert_eq!(path, vec![Step::up(r), Step::down(a), Step::down(a1)]);
    }

    #[test]
    fn test_cross_level_binding_gets_pass_through() {
        let (mut forest, [r, a, _, b]) = cross_level();
        let stats = infer(&mut forest);
        assert_eq!(stats, InferStats { pairs: 1, synthesized: 1, unreachable: 0 });

        let synthesized = forest.port_bound_to(a, Binding(7)).unwrap();
        let port = forest.port(synthesized);
        assert_eq!(port.qualified_name, "r.a.x");
        assert_eq!(port.local_name, "x");
        assert_eq!(port.direction, Direction::Output);
        assert_eq!(port.declared_type, "sc_out");
        assert!(port.synthesized);

        assert!(forest.port_bound_to(r, Binding(7)).is_none());
        assert_eq!(forest.component(b).ports.len(), 1);
    }

    #[test]
    fn test_inference_is_a_fixed_point() {
        let (mut forest, _) = cross_level();
        infer(&mut forest);
        let ports = forest.port_count();
        let again = infer(&mut forest);
        assert_eq!(again.synthesized, 0);
        assert_eq!(forest.port_count(), ports);
    }

    #[test]
    fn test_receiver_side_ports_mirror_receiver() {
        // R { A { A1 { A2 } }, B { B1 { B2 } } }, A2 drives B2.
        let mut forest = Forest::new();
        let r = forest.add_root("r", "r", "R");
        let a = forest.add_component(r, "r.a", "a", "A");
        let a1 = forest.add_component(a, "r.a.a1", "a1", "A1");
        let a2 = forest.add_component(a1, "r.a.a1.a2", "a2", "A2");
        let b = forest.add_component(r, "r.b", "b", "B");
        let b1 = forest.add_component(b, "r.b.b1", "b1", "B1");
        let b2 = forest.add_component(b1, "r.b.b1.b2", "b2", "B2");
        forest.add_port(
            a2,
            PortDecl::new("r.a.a1.a2.tx", "tx", Direction::Output, "sc_out")
                .with_binding(Some(Binding(1))),
        );
        forest.add_port(
            b2,
            PortDecl::new("r.b.b1.b2.rx", "rx", Direction::Input, "sc_in")
                .with_binding(Some(Binding(1))),
        );

        let stats = infer(&mut forest);
        assert_eq!(stats.synthesized, 4);

        let summary: Vec<(String, Direction)> = [a1, a, b, b1]
            .iter()
            .map(|&c| {
                let p = forest.port(forest.port_bound_to(c, Binding(1)).unwrap());
                (p.qualified_name.clone(), p.direction)
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                ("r.a.a1.tx".to_string(), Direction::Output),
                ("r.a.tx".to_string(), Direction::Output),
                ("r.b.rx".to_string(), Direction::Input),
                ("r.b.b1.rx".to_string(), Direction::Input),
            ]
        );
        assert!(forest.port_bound_to(r, Binding(1)).is_none());
    }

    #[test]
    fn test_driver_on_ancestor() {
        // Top drives a port two levels down.
        let mut forest = Forest::new();
        let top = forest.add_root("top", "top", "Top");
        let mid = forest.add_component(top, "top.mid", "mid", "Mid");
        let leaf = forest.add_component(mid, "top.mid.leaf", "leaf", "Leaf");
        forest.add_port(
            top,
            PortDecl::new("top.rst", "rst", Direction::Output, "sc_out")
                .with_binding(Some(Binding(3))),
        );
        forest.add_port(
            leaf,
            PortDecl::new("top.mid.leaf.rst_n", "rst_n", Direction::Input, "sc_in")
                .with_binding(Some(Binding(3))),
        );

        infer(&mut forest);
        let port = forest.port(forest.port_bound_to(mid, Binding(3)).unwrap());
        assert_eq!(port.local_name, "rst_n");
        assert_eq!(port.direction, Direction::Input);
    }

    #[test]
    fn test_fan_out_shares_pass_through() {
        let (mut forest, [r, a, _, _]) = cross_level();
        let c = forest.add_component(r, "r.c", "c", "C");
        forest.add_port(
            c,
            PortDecl::new("r.c.z", "z", Direction::Input, "sc_in").with_binding(Some(Binding(7))),
        );
        let stats = infer(&mut forest);
        assert_eq!(stats.pairs, 2);
        assert_eq!(stats.synthesized, 1);
        assert_eq!(forest.component(a).ports.len(), 1);
    }

    #[test]
    fn test_same_owner_and_unbound_need_nothing() {
        let mut forest = Forest::new();
        let r = forest.add_root("r", "r", "R");
        let a = forest.add_component(r, "r.a", "a", "A");
        forest.add_port(
            a,
            PortDecl::new("r.a.o", "o", Direction::Output, "sc_out").with_binding(Some(Binding(2))),
        );
        forest.add_port(
            a,
            PortDecl::new("r.a.i", "i", Direction::Input, "sc_in").with_binding(Some(Binding(2))),
        );
        forest.add_port(a, PortDecl::new("r.a.u", "u", Direction::Output, "sc_out"));
        forest.add_port(r, PortDecl::new("r.v", "v", Direction::Input, "sc_in"));
        forest.add_port(
            r,
            PortDecl::new("r.w", "w", Direction::Input, "sc_in").with_binding(Some(Binding(4))),
        );

        let stats = infer(&mut forest);
        assert_eq!(stats, InferStats { pairs: 1, synthesized: 0, unreachable: 0 });
        assert_eq!(forest.port_count(), 5);
    }

    #[test]
    fn test_registry_order_and_unbound() {
        let (forest, _) = cross_level();
        let buckets = registry(&forest);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].0, Binding(7));
        assert_eq!(buckets[0].1, vec![PortIdx(0), PortIdx(1)]);
    }
}
