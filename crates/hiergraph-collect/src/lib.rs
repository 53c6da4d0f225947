//! Edge derivation for rendering.
//!
//! Renderers only draw level-local edges: between a component and one of its
//! direct children, or between two children of the same component. This
//! crate derives those edges from an inferred [`hiergraph_core::Forest`].
//!
//! # Module Structure
//!
//! - [`types`]: edge types ([`LevelEdge`], [`EdgeKind`], [`EdgeMap`])
//! - [`collect`]: derivation per component and for a whole forest

mod collect;
mod types;

pub use collect::{derive_all, derive_edges};
pub use types::{EdgeKind, EdgeMap, LevelEdge};
