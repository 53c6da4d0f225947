//! Collector: one walk over the inspected tree producing a [`Forest`].

use tracing::{debug, trace, warn};

use crate::adapter::Introspect;
use crate::kinds::{KindTables, NodeClass};
use crate::model::{Direction, Forest, PortDecl};
use crate::ComponentIdx;
use crate::ids::Binding;

/// Name and type of the synthetic root used when the inspected system has
/// no single top-level module.
pub const SYNTHETIC_ROOT_NAME: &str = "sc_main";
pub const SYNTHETIC_ROOT_TYPE: &str = "sc_main()";

/// Suffix of the receiving/sending face a port pair grows opposite to its
/// own direction.
pub const BACKWARD_FACE_SUFFIX: &str = "_bw";

/// Counters describing what the collector saw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Objects classified, internal ones included.
    pub visited: usize,
    /// Objects of a kind nobody listed, reported and skipped.
    pub unknown: usize,
    /// Ports whose direction was neither input nor output.
    pub malformed: usize,
    /// Tooling helpers skipped through the marker prefix.
    pub internal: usize,
    /// Siblings folded into a port pair they implement.
    pub folded: usize,
}

#[derive(Debug, Clone)]
pub struct ScanResult {
    pub forest: Forest,
    pub stats: ScanStats,
}

/// Build a fresh forest from the adapter's current tree.
///
/// Ids start at `1` for every call: nothing is shared between runs.
pub fn scan<A: Introspect>(adapter: &A, tables: &KindTables) -> ScanResult {
    let mut collector = Collector {
        adapter,
        tables,
        forest: Forest::new(),
        stats: ScanStats::default(),
    };
    collector.scan_top_level();
    ScanResult {
        forest: collector.forest,
        stats: collector.stats,
    }
}

struct Collector<'a, A: Introspect> {
    adapter: &'a A,
    tables: &'a KindTables,
    forest: Forest,
    stats: ScanStats,
}

impl<A: Introspect> Collector<'_, A> {
    fn scan_top_level(&mut self) {
        let top = self.adapter.top_level();
        if let [single] = top.as_slice() {
            let single = *single;
            let name = self.adapter.basename(single);
            if self.tables.composite.contains(&self.adapter.kind(single))
                && !self.tables.is_internal(&name)
            {
                debug!(
                    "{}({})",
                    self.adapter.qualified_name(single),
                    self.adapter.kind(single)
                );
                let root = self.forest.add_root(
                    self.adapter.qualified_name(single),
                    name,
                    self.adapter.type_name(single),
                );
                let children = self.adapter.children(single);
                self.scan_children(root, children, 1);
                return;
            }
        }

        debug!("{} ( function {} )", SYNTHETIC_ROOT_NAME, SYNTHETIC_ROOT_TYPE);
        let root = self
            .forest
            .add_root(SYNTHETIC_ROOT_NAME, SYNTHETIC_ROOT_NAME, SYNTHETIC_ROOT_TYPE);
        self.scan_children(root, top, 1);
    }

    /// Scan siblings in order. Stems returned by a port pair hide the later
    /// siblings that merely implement it.
    fn scan_children(&mut self, current: ComponentIdx, children: Vec<A::Handle>, level: usize) {
        let mut keep_outs: Vec<String> = Vec::new();
        for child in children {
            let name = self.adapter.basename(child);
            let folded = keep_outs
                .iter()
                .any(|stem| name.len() > stem.len() && name.starts_with(stem.as_str()));
            if folded {
                trace!(name = %name, "folded into port pair");
                self.stats.folded += 1;
                continue;
            }
            keep_outs.extend(self.scan_object(child, current, level));
        }
    }

    fn scan_object(
        &mut self,
        handle: A::Handle,
        current: ComponentIdx,
        level: usize,
    ) -> Vec<String> {
        self.stats.visited += 1;
        let adapter = self.adapter;
        let name = adapter.basename(handle);
        let kind = adapter.kind(handle);
        let children = adapter.children(handle);

        let class = self.tables.classify(&kind, &name, !children.is_empty());
        if class == NodeClass::Internal {
            self.stats.internal += 1;
            return Vec::new();
        }

        let qualified = adapter.qualified_name(handle);
        debug!(
            "{}{}({}), id={}",
            "    ".repeat(level),
            qualified,
            kind,
            self.forest.id_gen().last() + 1
        );

        match class {
            NodeClass::Internal | NodeClass::Ignored => {}
            NodeClass::Composite => {
                let component =
                    self.forest
                        .add_component(current, qualified, name, adapter.type_name(handle));
                self.scan_children(component, children, level + 1);
            }
            NodeClass::ImplicitPortLeaf => {
                let component = self.forest.add_component(
                    current,
                    qualified.as_str(),
                    name.as_str(),
                    adapter.type_name(handle),
                );
                let decl = PortDecl::new(
                    format!("{qualified}.{name}"),
                    name.as_str(),
                    Direction::Output,
                    kind,
                )
                .with_binding(adapter.bound_identity(handle))
                .with_alias(Some(name.clone()));
                self.forest.add_port(component, decl);
            }
            NodeClass::PortLeaf => {
                let direction = if self.tables.is_input_only(&kind) {
                    Some(Direction::Input)
                } else {
                    adapter.direction(handle)
                };
                let Some(direction) = direction else {
                    self.report_malformed(&qualified, &kind);
                    return Vec::new();
                };
                let decl = PortDecl::new(qualified, name, direction, kind)
                    .with_binding(adapter.bound_identity(handle))
                    .with_alias(adapter.alias_name(handle));
                self.forest.add_port(current, decl);
            }
            NodeClass::PortPair => {
                let Some(direction) = adapter.direction(handle) else {
                    self.report_malformed(&qualified, &kind);
                    return Vec::new();
                };
                let binding = adapter.bound_identity(handle);
                let forward =
                    PortDecl::new(qualified.as_str(), name.as_str(), direction, kind.as_str())
                        .with_binding(binding);
                let backward = PortDecl::new(
                    format!("{qualified}{BACKWARD_FACE_SUFFIX}"),
                    format!("{name}{BACKWARD_FACE_SUFFIX}"),
                    direction.opposite(),
                    kind,
                )
                .with_binding(binding.map(Binding::backward));
                self.forest.add_port(current, forward);
                self.forest.add_port(current, backward);
                return vec![format!("{name}_port"), format!("{name}_export")];
            }
            NodeClass::Unknown => {
                warn!("object not known ({}): {}", kind, qualified);
                self.stats.unknown += 1;
            }
        }
        Vec::new()
    }

    fn report_malformed(&mut self, qualified: &str, kind: &str) {
        warn!("port {} ({}) reports no usable direction, skipped", qualified, kind);
        self.stats.malformed += 1;
    }
}
