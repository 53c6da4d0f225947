//! Structural introspection of a simulation component tree.
//!
//! [`scan`] walks an [`Introspect`] adapter once and builds a [`Forest`];
//! [`infer`] then adds the pass-through ports that make every binding
//! drawable one hierarchy level at a time.

pub mod adapter;
pub mod ids;
pub mod infer;
pub mod kinds;
pub mod model;
pub mod scan;
pub mod snapshot;
pub mod testing;

pub use adapter::Introspect;
pub use hiergraph_error::{Error, ErrorKind, Result};
pub use ids::{Binding, ComponentIdx, IdGen, ObjectId, PortIdx};
pub use infer::{InferStats, infer, path_between};
pub use kinds::{KindTables, NodeClass};
pub use model::{Component, Direction, Forest, Port, PortDecl};
pub use scan::{ScanResult, ScanStats, scan};
pub use snapshot::{Snapshot, SnapshotObject};

/// Scan and infer in one step: the finished forest for rendering.
pub fn extract<A: Introspect>(adapter: &A, tables: &KindTables) -> Extraction {
    let ScanResult { mut forest, stats } = scan(adapter, tables);
    let inferred = infer(&mut forest);
    Extraction {
        forest,
        scan: stats,
        infer: inferred,
    }
}

/// Result of [`extract`].
#[derive(Debug, Clone)]
pub struct Extraction {
    pub forest: Forest,
    pub scan: ScanStats,
    pub infer: InferStats,
}
