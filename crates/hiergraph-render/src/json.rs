//! Shared JSON output helpers.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use hiergraph_core::{Error, ErrorKind, Result};

/// Serialize `value` with four-space indentation and a trailing newline.
pub(crate) fn to_pretty_string<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::with_capacity(8192);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer).map_err(|err| {
        Error::new(ErrorKind::SerializationFailed, err.to_string())
            .with_operation("render::to_pretty_string")
            .set_source(err)
    })?;
    buf.push(b'\n');
    String::from_utf8(buf).map_err(|err| {
        Error::unexpected("serialized document is not UTF-8")
            .with_operation("render::to_pretty_string")
            .set_source(err)
    })
}

/// `{"text": ...}` entry of a `labels` array.
#[derive(Debug, Serialize)]
pub(crate) struct Label {
    pub text: String,
}

pub(crate) fn labels(text: &str) -> Vec<Label> {
    vec![Label {
        text: text.to_string(),
    }]
}

/// ELK layout properties attached to d3 nodes and documents.
#[derive(Debug, Serialize)]
pub(crate) struct LayoutProperties {
    #[serde(rename = "org.eclipse.elk.layered.mergeEdges")]
    pub merge_edges: u32,
    #[serde(rename = "org.eclipse.elk.portConstraints")]
    pub port_constraints: &'static str,
}

impl LayoutProperties {
    pub fn fixed_side() -> Self {
        Self {
            merge_edges: 1,
            port_constraints: "FIXED_SIDE",
        }
    }

    pub fn fixed_order() -> Self {
        Self {
            merge_edges: 1,
            port_constraints: "FIXED_ORDER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_four_space_indent() {
        let text = to_pretty_string(&labels("top")).unwrap();
        assert_eq!(text, "[\n    {\n        \"text\": \"top\"\n    }\n]\n");
    }
}
