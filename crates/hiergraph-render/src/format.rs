//! Output format selection and dump options.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use hiergraph_core::Error;

/// Document kinds `dump_structure` can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// Layout JSON plus type names and raw bindings, for debugging the
    /// extraction itself.
    DbgJson,
    /// Nested layout JSON for the ELK layered algorithm.
    #[default]
    ElkJson,
    /// Flat node-link JSON with top-level `nodes` and `edges` arrays.
    D3Json,
    /// ELK text graph, one indented `node { ... }` block per component.
    Elkt,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::DbgJson, Format::ElkJson, Format::D3Json, Format::Elkt];

    pub fn name(self) -> &'static str {
        match self {
            Format::DbgJson => "dbgjson",
            Format::ElkJson => "json",
            Format::D3Json => "d3json",
            Format::Elkt => "elkt",
        }
    }

    /// Format implied by a file name: `.elkt` selects the text graph,
    /// anything else the layout JSON.
    pub fn from_extension(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("elkt") => Format::Elkt,
            _ => Format::ElkJson,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dbgjson" => Ok(Format::DbgJson),
            "json" => Ok(Format::ElkJson),
            "d3json" => Ok(Format::D3Json),
            "elkt" => Ok(Format::Elkt),
            other => Err(Error::unknown_format(other).with_operation("render::Format::from_str")),
        }
    }
}

/// Title used when the caller does not name the document.
pub const DEFAULT_TITLE: &str = "sc_main";

/// Options for one dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpOptions {
    pub format: Format,
    /// Label of the document root, usually the simulation's program name.
    pub title: String,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            format: Format::default(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl DumpOptions {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}
