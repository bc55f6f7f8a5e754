use crate::error::AnalysisError;
use crate::graph::{SINK_ID_PREFIX, STUB_ID_PREFIX, TESTED_NODE_ID};
use crate::registry::Category;
use crate::serializer::{CATEGORY_HEADER, CONNECTION_RESOURCE, NODE_RESOURCE, TYPE_HEADER};
use itertools::Itertools;

/// Single-node layouts written by older generators.
const LEGACY_STUB_ID: &str = "manual_trigger";
const LEGACY_SINK_ID: &str = "display_result";

/// Structural facts recovered from a generated workflow text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub node_type: String,
    pub category: Option<Category>,
    pub total_input_stubs: usize,
    pub total_output_sinks: usize,
    /// Output indexes of the tested node that feed a connection. Sorted, deduplicated.
    pub wired_output_indexes: Vec<u32>,
    /// Input indexes of the tested node that receive a connection. Sorted, deduplicated.
    pub wired_input_indexes: Vec<u32>,
}

/// The fields of one connection block that matter for coverage.
#[derive(Debug, Default)]
struct ConnectionFields {
    source_node: Option<String>,
    source_output_index: Option<u32>,
    target_node: Option<String>,
    target_input_index: Option<u32>,
}

/// Recovers coverage facts from workflow text.
///
/// Only the markers the serializer guarantees are read: the `# Type:` header, node
/// resource names with the `input_` / `output_` prefixes, and the index fields of
/// connection blocks. Everything else (spacing, parameters, the workflow block) is
/// ignored, so cosmetic changes to the text do not affect the result.
pub fn analyze(text: &str) -> Result<AnalysisResult, AnalysisError> {
    let node_type = header_value(text, TYPE_HEADER).ok_or(AnalysisError::MissingTypeHeader)?;
    let category = header_value(text, CATEGORY_HEADER).and_then(|c| c.parse().ok());

    let mut stubs = 0;
    let mut sinks = 0;
    let mut legacy_stub = false;
    let mut legacy_sink = false;
    let mut connections = Vec::new();
    let mut current: Option<ConnectionFields> = None;

    for line in text.lines() {
        let trimmed = line.trim();

        if let Some(fields) = current.as_mut() {
            if trimmed == "}" {
                connections.extend(current.take());
            } else if let Some((key, value)) = trimmed.split_once('=') {
                let value = value.trim();
                match key.trim() {
                    "source_node" => fields.source_node = Some(reference_name(value)),
                    "target_node" => fields.target_node = Some(reference_name(value)),
                    "source_output_index" => fields.source_output_index = value.parse().ok(),
                    "target_input_index" => fields.target_input_index = value.parse().ok(),
                    _ => {}
                }
            }
            continue;
        }

        match resource_header(trimmed) {
            Some((NODE_RESOURCE, name)) => {
                if is_indexed(name, STUB_ID_PREFIX) {
                    stubs += 1;
                } else if is_indexed(name, SINK_ID_PREFIX) {
                    sinks += 1;
                } else if name == LEGACY_STUB_ID {
                    legacy_stub = true;
                } else if name == LEGACY_SINK_ID {
                    legacy_sink = true;
                }
            }
            Some((CONNECTION_RESOURCE, _)) => current = Some(ConnectionFields::default()),
            _ => {}
        }
    }

    let total_input_stubs = if stubs > 0 { stubs } else { usize::from(legacy_stub) };
    let total_output_sinks = if sinks > 0 { sinks } else { usize::from(legacy_sink) };

    let wired_output_indexes = connections
        .iter()
        .filter(|c| c.source_node.as_deref() == Some(TESTED_NODE_ID))
        .filter_map(|c| c.source_output_index)
        .sorted()
        .dedup()
        .collect();
    let wired_input_indexes = connections
        .iter()
        .filter(|c| c.target_node.as_deref() == Some(TESTED_NODE_ID))
        .filter_map(|c| c.target_input_index)
        .sorted()
        .dedup()
        .collect();

    Ok(AnalysisResult {
        node_type,
        category,
        total_input_stubs,
        total_output_sinks,
        wired_output_indexes,
        wired_input_indexes,
    })
}

fn header_value(text: &str, prefix: &str) -> Option<String> {
    text.lines()
        .find_map(|line| line.trim_start().strip_prefix(prefix))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Splits `resource "kind" "name" {` into `(kind, name)`.
fn resource_header(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix("resource")?.trim_start();
    let mut parts = rest.split('"');
    // "", kind, " ", name, " {"
    let (_, kind, _, name) = (parts.next()?, parts.next()?, parts.next()?, parts.next()?);
    Some((kind, name))
}

fn is_indexed(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// Extracts the node id from `n8n_workflow_node.<id>.name`, or a quoted literal.
fn reference_name(value: &str) -> String {
    if let Some(rest) = value.strip_prefix(NODE_RESOURCE).and_then(|r| r.strip_prefix('.')) {
        return rest.split('.').next().unwrap_or(rest).to_string();
    }
    value.trim_matches('"').to_string()
}
