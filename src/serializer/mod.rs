use crate::graph::{Edge, Graph, GraphNode, NodeRole};
use crate::registry::NodeDescriptor;
use crate::slug::slugify;
use std::collections::BTreeMap;
use std::fmt;

pub mod artifacts;
pub mod hcl;
mod parameters;

pub use parameters::example_parameters;

use hcl::{comment, json_expression, quote};

/// Header line prefix carrying the node type. Coverage analysis depends on it.
pub const TYPE_HEADER: &str = "# Type: ";
/// Header line prefix carrying the node category.
pub const CATEGORY_HEADER: &str = "# Category: ";
/// Terraform resource type of every workflow node.
pub const NODE_RESOURCE: &str = "n8n_workflow_node";
/// Terraform resource type of every connection.
pub const CONNECTION_RESOURCE: &str = "n8n_workflow_connection";

/// Provider and role settings used when rendering workflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializerOptions {
    pub provider_source: String,
    pub provider_version: String,
    /// Node type used for stub nodes.
    pub stub_type: String,
    /// Node type used for sink nodes.
    pub sink_type: String,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self {
            provider_source: "kodflow/n8n".to_string(),
            provider_version: "~> 1.0".to_string(),
            stub_type: "n8n-nodes-base.manualTrigger".to_string(),
            sink_type: "n8n-nodes-base.set".to_string(),
        }
    }
}

/// Renders harness graphs as declarative configuration text.
///
/// Output is byte-deterministic for a given graph and descriptor: nodes and edges are
/// emitted in graph order, connection slots in ascending output index, and JSON with
/// sorted keys.
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    options: SerializerOptions,
}

impl Serializer {
    pub fn new(options: SerializerOptions) -> Self {
        Self { options }
    }

    pub fn serialize(&self, graph: &Graph, descriptor: &NodeDescriptor) -> String {
        WorkflowText {
            graph,
            descriptor,
            options: &self.options,
        }
        .to_string()
    }
}

/// A wrapper that writes a complete workflow definition through `fmt::Display`.
pub struct WorkflowText<'a> {
    pub graph: &'a Graph,
    pub descriptor: &'a NodeDescriptor,
    pub options: &'a SerializerOptions,
}

impl fmt::Display for WorkflowText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;
        for node in &self.graph.nodes {
            self.write_node(f, node)?;
        }
        writeln!(f, "# CONNECTIONS")?;
        for edge in &self.graph.edges {
            write_connection(f, edge)?;
        }
        self.write_workflow(f)?;
        self.write_outputs(f)
    }
}

impl WorkflowText<'_> {
    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Test workflow for {}", comment(&self.descriptor.name))?;
        writeln!(f, "{}{}", CATEGORY_HEADER, self.descriptor.category)?;
        writeln!(f, "{}{}", TYPE_HEADER, comment(&self.descriptor.node_type))?;
        writeln!(f)?;
        writeln!(f, "terraform {{")?;
        writeln!(f, "  required_providers {{")?;
        writeln!(f, "    n8n = {{")?;
        writeln!(f, "      source  = {}", quote(&self.options.provider_source))?;
        writeln!(f, "      version = {}", quote(&self.options.provider_version))?;
        writeln!(f, "    }}")?;
        writeln!(f, "  }}")?;
        writeln!(f, "}}")?;
        writeln!(f)?;
        writeln!(f, "provider \"n8n\" {{")?;
        writeln!(f, "  base_url = var.n8n_base_url")?;
        writeln!(f, "  api_key  = var.n8n_api_key")?;
        writeln!(f, "}}")?;
        writeln!(f)
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, node: &GraphNode) -> fmt::Result {
        let node_type = match node.role {
            NodeRole::Stub => {
                writeln!(f, "# STUB: {}", comment(&node.label))?;
                &self.options.stub_type
            }
            NodeRole::Tested => {
                writeln!(f, "# TESTED NODE: {}", comment(&node.label))?;
                &self.descriptor.node_type
            }
            NodeRole::Sink => {
                writeln!(f, "# SINK: {}", comment(&node.label))?;
                &self.options.sink_type
            }
        };

        writeln!(f, "resource \"{}\" \"{}\" {{", NODE_RESOURCE, node.id)?;
        writeln!(f, "  name     = {}", quote(&node.label))?;
        writeln!(f, "  type     = {}", quote(node_type))?;
        writeln!(f, "  position = [{}, {}]", node.position.x, node.position.y)?;

        match node.role {
            NodeRole::Stub => {}
            NodeRole::Tested => {
                let params = example_parameters(self.descriptor);
                writeln!(f)?;
                writeln!(f, "  parameters = jsonencode(")?;
                writeln!(f, "    {}", json_expression(&params, 4))?;
                writeln!(f, "  )")?;
            }
            NodeRole::Sink => {
                writeln!(f)?;
                writeln!(f, "  parameters = jsonencode({{")?;
                writeln!(f, "    mode = \"manual\"")?;
                writeln!(f, "    fields = {{")?;
                writeln!(f, "      values = [{{")?;
                writeln!(f, "        name  = \"result\"")?;
                writeln!(f, "        type  = \"string\"")?;
                writeln!(f, "        value = \"={{{{ $json }}}}\"")?;
                writeln!(f, "      }}]")?;
                writeln!(f, "    }}")?;
                writeln!(f, "  }})")?;
            }
        }
        writeln!(f, "}}")?;
        writeln!(f)
    }

    fn write_workflow(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = slugify(&self.descriptor.name);
        writeln!(f, "# WORKFLOW")?;
        writeln!(f, "resource \"n8n_workflow\" \"test_{}\" {{", slug)?;
        writeln!(f, "  name   = {}", quote(&format!("Test: {}", self.descriptor.name)))?;
        writeln!(f, "  active = false")?;
        writeln!(f)?;

        writeln!(f, "  nodes_json = jsonencode([")?;
        let last = self.graph.nodes.len().saturating_sub(1);
        for (i, node) in self.graph.nodes.iter().enumerate() {
            let sep = if i == last { "" } else { "," };
            writeln!(f, "    jsondecode({}.{}.node_json){}", NODE_RESOURCE, node.id, sep)?;
        }
        writeln!(f, "  ])")?;
        writeln!(f)?;

        writeln!(f, "  connections_json = jsonencode({{")?;
        for (source_id, slots) in connection_map(self.graph) {
            writeln!(f, "    ({}.{}.name) = {{", NODE_RESOURCE, source_id)?;
            writeln!(f, "      main = [")?;
            let last = slots.len().saturating_sub(1);
            for (i, slot) in slots.iter().enumerate() {
                let sep = if i == last { "" } else { "," };
                if slot.is_empty() {
                    writeln!(f, "        []{}", sep)?;
                    continue;
                }
                writeln!(f, "        [")?;
                let last_target = slot.len() - 1;
                for (j, edge) in slot.iter().enumerate() {
                    writeln!(f, "          {{")?;
                    writeln!(f, "            node  = {}.{}.name", NODE_RESOURCE, edge.target_node_id)?;
                    writeln!(f, "            type  = \"main\"")?;
                    writeln!(f, "            index = {}", edge.target_input_index)?;
                    writeln!(f, "          }}{}", if j == last_target { "" } else { "," })?;
                }
                writeln!(f, "        ]{}", sep)?;
            }
            writeln!(f, "      ]")?;
            writeln!(f, "    }}")?;
        }
        writeln!(f, "  }})")?;
        writeln!(f, "}}")?;
        writeln!(f)
    }

    fn write_outputs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = slugify(&self.descriptor.name);
        writeln!(f, "# OUTPUTS")?;
        writeln!(f, "output \"workflow_id\" {{")?;
        writeln!(f, "  value       = n8n_workflow.test_{}.id", slug)?;
        writeln!(f, "  description = \"ID of the test workflow\"")?;
        writeln!(f, "}}")?;
        writeln!(f)?;
        writeln!(f, "output \"workflow_name\" {{")?;
        writeln!(f, "  value       = n8n_workflow.test_{}.name", slug)?;
        writeln!(f, "  description = \"Name of the test workflow\"")?;
        writeln!(f, "}}")
    }
}

fn write_connection(f: &mut fmt::Formatter<'_>, edge: &Edge) -> fmt::Result {
    writeln!(
        f,
        "resource \"{}\" \"{}_to_{}\" {{",
        CONNECTION_RESOURCE, edge.source_node_id, edge.target_node_id
    )?;
    writeln!(f, "  source_node         = {}.{}.name", NODE_RESOURCE, edge.source_node_id)?;
    writeln!(f, "  source_output       = \"main\"")?;
    writeln!(f, "  source_output_index = {}", edge.source_output_index)?;
    writeln!(f, "  target_node         = {}.{}.name", NODE_RESOURCE, edge.target_node_id)?;
    writeln!(f, "  target_input        = \"main\"")?;
    writeln!(f, "  target_input_index  = {}", edge.target_input_index)?;
    writeln!(f, "}}")?;
    writeln!(f)
}

/// Groups outgoing edges per source node, in node order, as slots indexed by output.
///
/// Output indexes without an edge become empty slots so positions stay meaningful.
pub fn connection_map(graph: &Graph) -> Vec<(&str, Vec<Vec<&Edge>>)> {
    graph
        .nodes
        .iter()
        .filter_map(|node| {
            let mut by_index: BTreeMap<u32, Vec<&Edge>> = BTreeMap::new();
            for edge in graph.outgoing(&node.id) {
                by_index.entry(edge.source_output_index).or_default().push(edge);
            }
            let max_index = *by_index.keys().next_back()?;
            let slots = (0..=max_index)
                .map(|i| by_index.remove(&i).unwrap_or_default())
                .collect();
            Some((node.id.as_str(), slots))
        })
        .collect()
}
