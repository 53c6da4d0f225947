//! In-memory object tree implementing [`Introspect`].
//!
//! A snapshot is the structure of a simulation written down as JSON, so the
//! pipeline can run outside the simulator (from the command line, in tests).
//!
//! ```json
//! {
//!   "objects": [
//!     { "kind": "sc_module", "name": "top", "type": "Top", "children": [
//!       { "kind": "sc_out", "name": "irq", "direction": "output",
//!         "binding": 17, "alias": "irq_sig" }
//!     ]}
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use hiergraph_error::{Error, Result};

use crate::adapter::Introspect;
use crate::ids::Binding;
use crate::model::Direction;

/// One object of a snapshot as written in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotObject {
    pub kind: String,
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SnapshotObject>,
}

impl SnapshotObject {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            type_name: None,
            direction: None,
            binding: None,
            alias: None,
            children: Vec::new(),
        }
    }

    /// An `sc_module` with the given implementation type.
    pub fn module(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new("sc_module", name).with_type(type_name)
    }

    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    pub fn bound_to(mut self, binding: u64) -> Self {
        self.binding = Some(binding);
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn child(mut self, child: SnapshotObject) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SnapshotDocument {
    #[serde(default)]
    objects: Vec<SnapshotObject>,
}

#[derive(Debug, Clone)]
struct Entry {
    object: SnapshotObject,
    qualified_name: String,
    children: Vec<usize>,
}

/// Flattened snapshot; handles are indices into the flat entry list.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    entries: Vec<Entry>,
    top_level: Vec<usize>,
}

/// Direction implied by the kind when the document does not state one.
fn kind_direction(kind: &str) -> Direction {
    if kind == "sc_in"
        || kind == "sc_fifo_in"
        || kind == "sc_export"
        || kind.contains("target_socket")
    {
        Direction::Input
    } else {
        Direction::Output
    }
}

impl Snapshot {
    pub fn new(objects: Vec<SnapshotObject>) -> Self {
        let mut snapshot = Snapshot::default();
        for object in objects {
            let idx = snapshot.flatten(object, None);
            snapshot.top_level.push(idx);
        }
        snapshot
    }

    fn flatten(&mut self, mut object: SnapshotObject, parent: Option<&str>) -> usize {
        let qualified_name = match parent {
            Some(parent) => format!("{parent}.{}", object.name),
            None => object.name.clone(),
        };
        let children = std::mem::take(&mut object.children);
        let idx = self.entries.len();
        self.entries.push(Entry {
            object,
            qualified_name: qualified_name.clone(),
            children: Vec::with_capacity(children.len()),
        });
        for child in children {
            let child_idx = self.flatten(child, Some(&qualified_name));
            self.entries[idx].children.push(child_idx);
        }
        idx
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let document: SnapshotDocument = serde_json::from_str(text).map_err(|err| {
            Error::snapshot_invalid(err.to_string())
                .with_operation("core::Snapshot::from_json_str")
                .with_context("line", err.line().to_string())
                .set_source(err)
        })?;
        Ok(Self::new(document.objects))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| {
            Error::from(err)
                .with_operation("core::Snapshot::from_path")
                .with_context("path", path.display().to_string())
        })?;
        Self::from_json_str(&text)
            .map_err(|err| err.with_context("path", path.display().to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn object(&self, handle: usize) -> &SnapshotObject {
        &self.entries[handle].object
    }
}

impl Introspect for Snapshot {
    type Handle = usize;

    fn top_level(&self) -> Vec<usize> {
        self.top_level.clone()
    }

    fn children(&self, handle: usize) -> Vec<usize> {
        self.entries[handle].children.clone()
    }

    fn kind(&self, handle: usize) -> String {
        self.object(handle).kind.clone()
    }

    fn basename(&self, handle: usize) -> String {
        self.object(handle).name.clone()
    }

    fn qualified_name(&self, handle: usize) -> String {
        self.entries[handle].qualified_name.clone()
    }

    fn type_name(&self, handle: usize) -> String {
        let object = self.object(handle);
        object.type_name.clone().unwrap_or_else(|| object.kind.clone())
    }

    fn direction(&self, handle: usize) -> Option<Direction> {
        let object = self.object(handle);
        match &object.direction {
            Some(text) => text.parse().ok(),
            None => Some(kind_direction(&object.kind)),
        }
    }

    fn bound_identity(&self, handle: usize) -> Option<Binding> {
        self.object(handle).binding.map(Binding)
    }

    fn alias_name(&self, handle: usize) -> Option<String> {
        self.object(handle).alias.clone()
    }
}
