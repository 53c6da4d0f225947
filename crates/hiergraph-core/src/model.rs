//! Component/port forest built fresh for every extraction.
//!
//! The forest is an arena: components and ports live in two vectors and
//! refer to each other through [`ComponentIdx`] / [`PortIdx`]. Parent and
//! owner links are plain indices, so the forest can be moved or cloned
//! without dangling references.

use strum_macros::{Display, EnumString, IntoStaticStr};

use crate::ids::{Binding, ComponentIdx, IdGen, ObjectId, PortIdx};

/// Direction of a port as seen from its owning component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    pub fn is_input(self) -> bool {
        matches!(self, Direction::Input)
    }

    pub fn is_output(self) -> bool {
        matches!(self, Direction::Output)
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Input => Direction::Output,
            Direction::Output => Direction::Input,
        }
    }

    /// Layout side hint: inputs on the west edge, outputs on the east edge.
    pub fn side(self) -> &'static str {
        match self {
            Direction::Input => "WEST",
            Direction::Output => "EAST",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Component {
    pub id: ObjectId,
    pub qualified_name: String,
    pub local_name: String,
    pub declared_type: String,
    /// `None` only for the root.
    pub parent: Option<ComponentIdx>,
    pub children: Vec<ComponentIdx>,
    pub ports: Vec<PortIdx>,
}

impl Component {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.ports.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Port {
    pub id: ObjectId,
    pub qualified_name: String,
    pub local_name: String,
    pub direction: Direction,
    pub declared_type: String,
    /// Name of the bound signal, used to label edges.
    pub signal_alias: Option<String>,
    /// `None` means unbound.
    pub binding: Option<Binding>,
    pub owner: ComponentIdx,
    /// Created by inference as a pass-through, not reported by the adapter.
    pub synthesized: bool,
}

impl Port {
    /// Two ports are connected iff both are bound to the same channel.
    pub fn is_connected_to(&self, other: &Port) -> bool {
        match (self.binding, other.binding) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// Everything needed to attach a port; the forest fills in id and owner.
#[derive(Debug, Clone)]
pub struct PortDecl {
    pub qualified_name: String,
    pub local_name: String,
    pub direction: Direction,
    pub declared_type: String,
    pub signal_alias: Option<String>,
    pub binding: Option<Binding>,
    pub synthesized: bool,
}

impl PortDecl {
    pub fn new(
        qualified_name: impl Into<String>,
        local_name: impl Into<String>,
        direction: Direction,
        declared_type: impl Into<String>,
    ) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            local_name: local_name.into(),
            direction,
            declared_type: declared_type.into(),
            signal_alias: None,
            binding: None,
            synthesized: false,
        }
    }

    pub fn with_binding(mut self, binding: Option<Binding>) -> Self {
        self.binding = binding;
        self
    }

    pub fn with_alias(mut self, alias: Option<String>) -> Self {
        self.signal_alias = alias.filter(|a| !a.is_empty());
        self
    }

    pub fn synthesized(mut self) -> Self {
        self.synthesized = true;
        self
    }
}

/// The component tree of one run together with its id source.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    components: Vec<Component>,
    ports: Vec<Port>,
    root: Option<ComponentIdx>,
    ids: IdGen,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the root component. A forest has exactly one root.
    pub fn add_root(
        &mut self,
        qualified_name: impl Into<String>,
        local_name: impl Into<String>,
        declared_type: impl Into<String>,
    ) -> ComponentIdx {
        debug_assert!(self.root.is_none(), "forest already has a root");
        let idx = self.push_component(
            None,
            qualified_name.into(),
            local_name.into(),
            declared_type.into(),
        );
        self.root = Some(idx);
        idx
    }

    pub fn add_component(
        &mut self,
        parent: ComponentIdx,
        qualified_name: impl Into<String>,
        local_name: impl Into<String>,
        declared_type: impl Into<String>,
    ) -> ComponentIdx {
        let idx = self.push_component(
            Some(parent),
            qualified_name.into(),
            local_name.into(),
            declared_type.into(),
        );
        self.components[parent.index()].children.push(idx);
        idx
    }

    fn push_component(
        &mut self,
        parent: Option<ComponentIdx>,
        qualified_name: String,
        local_name: String,
        declared_type: String,
    ) -> ComponentIdx {
        let idx = ComponentIdx(self.components.len() as u32);
        self.components.push(Component {
            id: self.ids.next_id(),
            qualified_name,
            local_name,
            declared_type,
            parent,
            children: Vec::new(),
            ports: Vec::new(),
        });
        idx
    }

    pub fn add_port(&mut self, owner: ComponentIdx, decl: PortDecl) -> PortIdx {
        let idx = PortIdx(self.ports.len() as u32);
        self.ports.push(Port {
            id: self.ids.next_id(),
            qualified_name: decl.qualified_name,
            local_name: decl.local_name,
            direction: decl.direction,
            declared_type: decl.declared_type,
            signal_alias: decl.signal_alias,
            binding: decl.binding,
            owner,
            synthesized: decl.synthesized,
        });
        self.components[owner.index()].ports.push(idx);
        idx
    }

    pub fn root(&self) -> Option<ComponentIdx> {
        self.root
    }

    pub fn component(&self, idx: ComponentIdx) -> &Component {
        &self.components[idx.index()]
    }

    pub fn port(&self, idx: PortIdx) -> &Port {
        &self.ports[idx.index()]
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    /// Id source positioned after the last id handed out by this forest.
    pub fn id_gen(&self) -> IdGen {
        self.ids
    }

    pub fn parent(&self, idx: ComponentIdx) -> Option<ComponentIdx> {
        self.component(idx).parent
    }

    pub fn owner(&self, port: PortIdx) -> ComponentIdx {
        self.port(port).owner
    }

    /// The port of `component` bound to `binding`, if any.
    pub fn port_bound_to(&self, component: ComponentIdx, binding: Binding) -> Option<PortIdx> {
        self.component(component)
            .ports
            .iter()
            .copied()
            .find(|&p| self.port(p).binding == Some(binding))
    }

    /// Components in depth-first pre-order starting at the root.
    pub fn preorder(&self) -> Vec<ComponentIdx> {
        let mut order = Vec::with_capacity(self.components.len());
        let mut stack: Vec<ComponentIdx> = self.root.into_iter().collect();
        while let Some(idx) = stack.pop() {
            order.push(idx);
            stack.extend(self.component(idx).children.iter().rev().copied());
        }
        order
    }

    /// Check the tree invariant: exactly one component without a parent and
    /// every other component listed exactly once among its parent's children.
    pub fn is_well_formed_tree(&self) -> bool {
        let roots = self.components.iter().filter(|c| c.is_root()).count();
        if roots != 1 || self.root.is_none() {
            return false;
        }
        let mut seen = vec![0usize; self.components.len()];
        for (idx, component) in self.components.iter().enumerate() {
            for &child in &component.children {
                seen[child.index()] += 1;
                if self.component(child).parent != Some(ComponentIdx(idx as u32)) {
                    return false;
                }
            }
        }
        self.components
            .iter()
            .zip(seen)
            .all(|(c, n)| if c.is_root() { n == 0 } else { n == 1 })
    }
}
