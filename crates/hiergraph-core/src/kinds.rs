//! Classification of kernel object kinds.
//!
//! The allow-lists are plain data so a project can extend them from a TOML
//! file without touching the collector.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use strum_macros::{Display, IntoStaticStr};

use hiergraph_error::{Error, Result};

/// How the collector treats one object of the inspected tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum NodeClass {
    /// Helper object of the tooling itself, skipped with its whole subtree.
    Internal,
    /// Structural unit: becomes a component, children are scanned.
    Composite,
    /// Leaf with an observable output (a clock), becomes a component with one
    /// synthesized output port.
    ImplicitPortLeaf,
    /// Port or export, becomes a port of the current component.
    PortLeaf,
    /// Bundle with a sending and a receiving face (a socket), becomes two ports.
    PortPair,
    /// Kernel bookkeeping with no structural meaning.
    Ignored,
    /// Anything else: reported and skipped.
    Unknown,
}

const COMPOSITE_KINDS: &[&str] = &[
    "sc_module",
    "uvm::uvm_root",
    "uvm::uvm_test",
    "uvm::uvm_env",
    "uvm::uvm_component",
    "uvm::uvm_agent",
    "uvm::uvm_monitor",
    "uvm::uvm_scoreboard",
    "uvm::uvm_driver",
    "uvm::uvm_sequencer",
];

const IMPLICIT_PORT_KINDS: &[&str] = &["sc_clock"];

const PORT_PAIR_KINDS: &[&str] = &[
    "tlm_initiator_socket",
    "tlm_target_socket",
    "tlm_rec_initiator_socket",
    "tlm_rec_target_socket",
];

const PORT_KINDS: &[&str] = &[
    "sc_in",
    "sc_out",
    "sc_inout",
    "sc_port",
    "sc_fifo_in",
    "sc_fifo_out",
    "sc_export",
];

/// Port kinds that always receive, whatever the adapter reports.
const INPUT_ONLY_KINDS: &[&str] = &["sc_export"];

const IGNORED_KINDS: &[&str] = &[
    "sc_thread_process",
    "sc_signal",
    "sc_object",
    "sc_fifo",
    "sc_method_process",
    "sc_mutex",
    "sc_vector",
    "sc_semaphore_ordered",
    "sc_variable",
    "sc_prim_channel",
    "tlm_signal",
    "tlm_fifo",
    "sc_register",
    "sc_buffer",
];

/// Basename prefix marking helper objects that must stay invisible.
pub const INTERNAL_MARKER: &str = "$$$";

/// Kind allow-lists used by [`KindTables::classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindTables {
    pub composite: BTreeSet<String>,
    pub implicit_port: BTreeSet<String>,
    pub port_pair: BTreeSet<String>,
    pub port: BTreeSet<String>,
    pub input_only: BTreeSet<String>,
    pub ignored: BTreeSet<String>,
    pub marker_prefix: String,
}

fn to_set(kinds: &[&str]) -> BTreeSet<String> {
    kinds.iter().map(|k| k.to_string()).collect()
}

impl Default for KindTables {
    fn default() -> Self {
        Self {
            composite: to_set(COMPOSITE_KINDS),
            implicit_port: to_set(IMPLICIT_PORT_KINDS),
            port_pair: to_set(PORT_PAIR_KINDS),
            port: to_set(PORT_KINDS),
            input_only: to_set(INPUT_ONLY_KINDS),
            ignored: to_set(IGNORED_KINDS),
            marker_prefix: INTERNAL_MARKER.to_string(),
        }
    }
}

/// Additions read from a TOML file; every list extends the default table.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct KindOverrides {
    composite: Vec<String>,
    implicit_port: Vec<String>,
    port_pair: Vec<String>,
    port: Vec<String>,
    input_only: Vec<String>,
    ignored: Vec<String>,
    marker_prefix: Option<String>,
}

impl KindTables {
    /// Default tables extended with the lists of a TOML document.
    ///
    /// ```toml
    /// composite = ["my_subsystem"]
    /// ignored = ["my_event_queue"]
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let overrides: KindOverrides = toml::from_str(text).map_err(|err| {
            Error::config_invalid(err.to_string())
                .with_operation("core::KindTables::from_toml_str")
                .set_source(err)
        })?;
        let mut tables = Self::default();
        tables.composite.extend(overrides.composite);
        tables.implicit_port.extend(overrides.implicit_port);
        tables.port_pair.extend(overrides.port_pair);
        tables.port.extend(overrides.port);
        tables.input_only.extend(overrides.input_only);
        tables.ignored.extend(overrides.ignored);
        if let Some(prefix) = overrides.marker_prefix {
            if prefix.is_empty() {
                return Err(Error::config_invalid("marker_prefix must not be empty")
                    .with_operation("core::KindTables::from_toml_str"));
            }
            tables.marker_prefix = prefix;
        }
        Ok(tables)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| {
            Error::from(err)
                .with_operation("core::KindTables::from_path")
                .with_context("path", path.display().to_string())
        })?;
        Self::from_toml_str(&text)
            .map_err(|err| err.with_context("path", path.display().to_string()))
    }

    pub fn is_internal(&self, basename: &str) -> bool {
        basename.starts_with(&self.marker_prefix)
    }

    pub fn is_input_only(&self, kind: &str) -> bool {
        self.input_only.contains(kind)
    }

    /// Classify one object. Explicit tables win; an unlisted kind that has
    /// children is still treated as a composite.
    pub fn classify(&self, kind: &str, basename: &str, has_children: bool) -> NodeClass {
        if self.is_internal(basename) {
            NodeClass::Internal
        } else if self.composite.contains(kind) {
            NodeClass::Composite
        } else if self.implicit_port.contains(kind) {
            NodeClass::ImplicitPortLeaf
        } else if self.port_pair.contains(kind) {
            NodeClass::PortPair
        } else if self.port.contains(kind) {
            NodeClass::PortLeaf
        } else if self.ignored.contains(kind) {
            NodeClass::Ignored
        } else if has_children {
            NodeClass::Composite
        } else {
            NodeClass::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_classification() {
        let tables = KindTables::default();
        assert_eq!(tables.classify("sc_module", "top", false), NodeClass::Composite);
        assert_eq!(tables.classify("sc_clock", "clk", false), NodeClass::ImplicitPortLeaf);
        assert_eq!(tables.classify("tlm_target_socket", "tsock", false), NodeClass::PortPair);
        assert_eq!(tables.classify("sc_in", "din", false), NodeClass::PortLeaf);
        assert_eq!(tables.classify("sc_signal", "sig", false), NodeClass::Ignored);
        assert_eq!(tables.classify("my_widget", "w", false), NodeClass::Unknown);
        assert_eq!(tables.classify("my_widget", "w", true), NodeClass::Composite);
    }

    #[test]
    fn test_marker_wins_over_kind() {
        let tables = KindTables::default();
        assert_eq!(
            tables.classify("sc_module", "$$$hierarchy_dumper$$$", true),
            NodeClass::Internal
        );
    }

    #[test]
    fn test_ignored_wins_over_children() {
        let tables = KindTables::default();
        assert_eq!(tables.classify("sc_vector", "lanes", true), NodeClass::Ignored);
    }

    #[test]
    fn test_toml_extends_defaults() {
        let tables = KindTables::from_toml_str(
            r#"
            composite = ["vp::cluster"]
            ignored = ["sc_event_queue"]
            marker_prefix = "__"
            "#,
        )
        .unwrap();
        assert!(tables.composite.contains("vp::cluster"));
        assert!(tables.composite.contains("sc_module"));
        assert!(tables.ignored.contains("sc_event_queue"));
        assert!(tables.is_internal("__probe"));
        assert!(!tables.is_internal("$$$probe"));
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        let err = KindTables::from_toml_str("modules = [\"x\"]").unwrap_err();
        assert_eq!(err.kind(), hiergraph_error::ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_toml_rejects_empty_marker() {
        assert!(KindTables::from_toml_str("marker_prefix = \"\"").is_err());
    }
}
