//! Read-only view of a live simulation object tree.
//!
//! The simulation kernel owns the objects; the collector only queries them
//! through [`Introspect`]. Ports are ordinary child objects of the component
//! that owns them, the same way the kernel reports them.

use crate::ids::Binding;
use crate::kinds::{KindTables, NodeClass};
use crate::model::Direction;

pub trait Introspect {
    /// Cheap handle to one object of the inspected system.
    type Handle: Copy;

    /// Objects without a parent, in creation order.
    fn top_level(&self) -> Vec<Self::Handle>;

    /// Direct child objects, in creation order.
    fn children(&self, handle: Self::Handle) -> Vec<Self::Handle>;

    /// Kernel kind string, e.g. `sc_module` or `sc_in`.
    fn kind(&self, handle: Self::Handle) -> String;

    fn basename(&self, handle: Self::Handle) -> String;

    /// Dot-separated hierarchical name.
    fn qualified_name(&self, handle: Self::Handle) -> String;

    /// Implementation type name of the object.
    fn type_name(&self, handle: Self::Handle) -> String;

    /// Port direction. `None` means the object reported something that is
    /// neither input nor output.
    fn direction(&self, handle: Self::Handle) -> Option<Direction>;

    /// Identity of the channel the object is bound to, `None` if unbound.
    fn bound_identity(&self, handle: Self::Handle) -> Option<Binding>;

    /// Name of the bound signal, if the channel has one.
    fn alias_name(&self, handle: Self::Handle) -> Option<String>;

    /// Children of `handle` that the collector turns into ports.
    fn ports(&self, handle: Self::Handle, tables: &KindTables) -> Vec<Self::Handle> {
        self.children(handle)
            .into_iter()
            .filter(|&child| {
                matches!(
                    tables.classify(&self.kind(child), &self.basename(child), false),
                    NodeClass::PortLeaf | NodeClass::PortPair
                )
            })
            .collect()
    }
}
