//! Edge types shared by every renderer.

use hiergraph_core::{ComponentIdx, Forest, PortIdx};
use strum_macros::{Display, IntoStaticStr};

/// Which of the two level-local shapes an edge has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum EdgeKind {
    /// From a port of the scope component to a port of a direct child.
    ParentChild,
    /// From an output of one child to an input of a sibling.
    Sibling,
}

/// One drawable edge inside the scope of a single component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelEdge {
    pub kind: EdgeKind,
    pub source_component: ComponentIdx,
    pub source_port: PortIdx,
    pub target_component: ComponentIdx,
    pub target_port: PortIdx,
}

impl LevelEdge {
    /// Human-readable name: the source signal alias, else the target alias,
    /// else `<source>_to_<target>` on port names.
    pub fn label(&self, forest: &Forest) -> String {
        let source = forest.port(self.source_port);
        let target = forest.port(self.target_port);
        source
            .signal_alias
            .clone()
            .or_else(|| target.signal_alias.clone())
            .unwrap_or_else(|| format!("{}_to_{}", source.local_name, target.local_name))
    }
}

/// Edges of every component of a forest, indexed by component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeMap {
    per_component: Vec<Vec<LevelEdge>>,
}

impl EdgeMap {
    pub(crate) fn new(per_component: Vec<Vec<LevelEdge>>) -> Self {
        Self { per_component }
    }

    /// Edges drawn inside `component`, parent/child edges first.
    pub fn edges_of(&self, component: ComponentIdx) -> &[LevelEdge] {
        self.per_component
            .get(component.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn total(&self) -> usize {
        self.per_component.iter().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelEdge> {
        self.per_component.iter().flatten()
    }
}
