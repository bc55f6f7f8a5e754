//! Common test fixtures: descriptors, registry snapshots and rendering helpers.
use nodewire::prelude::*;

fn ports(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// IF node: one input, two outputs (true/false).
#[allow(dead_code)]
pub fn if_descriptor() -> NodeDescriptor {
    NodeDescriptor::new(
        "IF",
        "n8n-nodes-base.if",
        Category::Core,
        ports(&["main"]),
        ports(&["main", "main"]),
    )
}

/// Merge node: two inputs, one output.
#[allow(dead_code)]
pub fn merge_descriptor() -> NodeDescriptor {
    NodeDescriptor::new(
        "Merge",
        "n8n-nodes-base.merge",
        Category::Core,
        ports(&["main", "main"]),
        ports(&["main"]),
    )
}

/// Switch node: four routing outputs.
#[allow(dead_code)]
pub fn switch_descriptor() -> NodeDescriptor {
    NodeDescriptor::new(
        "Switch",
        "n8n-nodes-base.switch",
        Category::Core,
        ports(&["main"]),
        ports(&["main", "main", "main", "main"]),
    )
}

/// A trigger with no registered topology.
#[allow(dead_code)]
pub fn cron_descriptor() -> NodeDescriptor {
    NodeDescriptor::new(
        "Cron",
        "n8n-nodes-base.cron",
        Category::Trigger,
        Vec::new(),
        ports(&["main"]),
    )
}

/// A plain integration node with the default single-port topology.
#[allow(dead_code)]
pub fn slack_descriptor() -> NodeDescriptor {
    NodeDescriptor::new(
        "Slack",
        "n8n-nodes-base.slack",
        Category::Integration,
        ports(&["main"]),
        ports(&["main"]),
    )
}

/// A descriptor for every built-in registered type, using the table's port counts.
#[allow(dead_code)]
pub fn registered_descriptors() -> Vec<NodeDescriptor> {
    let table = TopologyTable::builtin();
    table
        .types()
        .into_iter()
        .filter_map(|node_type| {
            let entry = table.get(node_type)?;
            let name = node_type.trim_start_matches("n8n-nodes-base.").to_string();
            Some(NodeDescriptor::new(
                name,
                node_type,
                Category::Core,
                vec!["main".to_string(); entry.inputs.len()],
                vec!["main".to_string(); entry.outputs.len()],
            ))
        })
        .collect()
}

/// Resolves, builds and serializes one descriptor with the default settings.
#[allow(dead_code)]
pub fn render(descriptor: &NodeDescriptor) -> (PortTopology, Graph, String) {
    let topology = TopologyResolver::default().resolve(&descriptor.node_type, descriptor.category);
    let graph = GraphBuilder::new(descriptor, &topology).build();
    let text = Serializer::default().serialize(&graph, descriptor);
    (topology, graph, text)
}

/// Removes the connection resource named `name` from a workflow text.
#[allow(dead_code)]
pub fn remove_connection(text: &str, name: &str) -> String {
    let header = format!("resource \"n8n_workflow_connection\" \"{}\" {{", name);
    let mut out = Vec::new();
    let mut skipping = false;
    for line in text.lines() {
        if line == header {
            skipping = true;
            continue;
        }
        if skipping {
            if line == "}" {
                skipping = false;
            }
            continue;
        }
        out.push(line);
    }
    out.join("\n")
}

/// A registry snapshot with four valid entries and three malformed ones.
#[allow(dead_code)]
pub const SAMPLE_REGISTRY_JSON: &str = r#"
{
  "version": "1.0.0",
  "nodes": [
    {
      "name": "IF",
      "type": "if",
      "category": "Core",
      "inputs": ["main"],
      "outputs": ["main", "main"],
      "description": "Route items based on a condition",
      "latest_version": 2,
      "file": "nodes/If/If.node.ts"
    },
    {
      "name": "Merge",
      "type": "n8n-nodes-base.merge",
      "category": "Core",
      "inputs": ["main", "main"],
      "outputs": ["main"]
    },
    {
      "name": "Webhook",
      "type": "webhook",
      "category": "Trigger",
      "inputs": [],
      "outputs": ["main"]
    },
    {
      "name": "Postgres",
      "type": "postgres",
      "category": "Database",
      "inputs": ["main"],
      "outputs": ["main"]
    },
    {
      "name": "Broken Category",
      "type": "broken",
      "category": "Utility",
      "inputs": ["main"],
      "outputs": ["main"]
    },
    {
      "name": "No Outputs",
      "type": "noOutputs",
      "category": "Core",
      "inputs": ["main"],
      "outputs": []
    },
    "not an object"
  ]
}
"#;
