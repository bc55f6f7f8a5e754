//! Tests for topology lookup and resolution.
use nodewire::prelude::*;
use nodewire::topology::{TopologyEntry, TopologyOrigin};

fn names(ports: &[PortSpec]) -> Vec<&str> {
    ports.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn test_builtin_table_contents() {
    let table = TopologyTable::builtin();
    assert_eq!(
        table.types(),
        vec![
            "n8n-nodes-base.compareDatasets",
            "n8n-nodes-base.filter",
            "n8n-nodes-base.if",
            "n8n-nodes-base.merge",
            "n8n-nodes-base.splitInBatches",
            "n8n-nodes-base.switch",
        ]
    );
    assert!(!table.contains("n8n-nodes-base.set"));
}

#[test]
fn test_resolve_registered_types() {
    let resolver = TopologyResolver::default();

    let if_node = resolver.resolve("n8n-nodes-base.if", Category::Core);
    assert_eq!(if_node.origin, TopologyOrigin::Registered);
    assert_eq!(names(&if_node.inputs), vec!["Main"]);
    assert_eq!(names(&if_node.outputs), vec!["True", "False"]);
    assert_eq!(if_node.outputs[1].description, "False (output[1])");

    let switch = resolver.resolve("n8n-nodes-base.switch", Category::Core);
    assert_eq!(switch.output_indexes(), vec![0, 1, 2, 3]);
    assert_eq!(switch.outputs[3].name, "Fallback");

    let merge = resolver.resolve("n8n-nodes-base.merge", Category::Core);
    assert!(merge.has_multiple_inputs());
    assert_eq!(merge.input_indexes(), vec![0, 1]);
    assert_eq!(merge.inputs[1].description, "Input 2 (input[1])");
    assert_eq!(
        merge.summary.as_deref(),
        Some("Merge node must test multiple inputs")
    );
}

#[test]
fn test_resolve_falls_back_to_single_port() {
    let resolver = TopologyResolver::default();
    let slack = resolver.resolve("n8n-nodes-base.slack", Category::Integration);
    assert!(slack.is_default());
    assert_eq!(names(&slack.inputs), vec!["Main"]);
    assert_eq!(names(&slack.outputs), vec!["Main"]);
    assert_eq!(slack.summary, None);

    // Lookups are exact: no prefix qualification happens here.
    assert!(resolver.resolve("if", Category::Core).is_default());
}

#[test]
fn test_trigger_never_has_inputs() {
    let resolver = TopologyResolver::default();
    let cron = resolver.resolve("n8n-nodes-base.cron", Category::Trigger);
    assert!(cron.inputs.is_empty());
    assert_eq!(cron.outputs.len(), 1);

    // Category wins even over a registered multi-input entry.
    let merge = resolver.resolve("n8n-nodes-base.merge", Category::Trigger);
    assert!(merge.inputs.is_empty());
    assert_eq!(merge.outputs.len(), 1);
    assert_eq!(merge.origin, TopologyOrigin::Registered);
}

#[test]
fn test_resolution_is_deterministic() {
    let resolver = TopologyResolver::default();
    for node_type in resolver.table().types() {
        assert_eq!(
            resolver.resolve(node_type, Category::Core),
            resolver.resolve(node_type, Category::Core)
        );
    }
}

#[test]
fn test_custom_table_replaces_builtin() {
    let table = TopologyTable::builder()
        .clear()
        .with_entry(
            "acme.router",
            TopologyEntry::new(["In"], ["Left", "Right", "Drop"]).with_summary("Router routes"),
        )
        .unwrap()
        .build();
    let resolver = TopologyResolver::new(table);

    assert!(resolver.is_registered("acme.router"));
    assert!(!resolver.is_registered("n8n-nodes-base.if"));
    assert!(resolver.resolve("n8n-nodes-base.if", Category::Core).is_default());

    let router = resolver.resolve("acme.router", Category::Core);
    assert_eq!(names(&router.outputs), vec!["Left", "Right", "Drop"]);
    assert_eq!(router.summary.as_deref(), Some("Router routes"));
}

#[test]
fn test_builder_overrides_single_entry() {
    let table = TopologyTable::builder()
        .with_entry("n8n-nodes-base.if", TopologyEntry::new(["Main"], ["Yes", "No", "Error"]))
        .unwrap()
        .build();
    assert_eq!(table.len(), TopologyTable::builtin().len());

    let resolver = TopologyResolver::new(table);
    let if_node = resolver.resolve("n8n-nodes-base.if", Category::Core);
    assert_eq!(if_node.outputs.len(), 3);
    assert_eq!(if_node.summary, None);
}

#[test]
fn test_builder_rejects_entry_without_outputs() {
    let result = TopologyTable::builder().with_entry(
        "acme.sink",
        TopologyEntry::new(["Main"], Vec::<String>::new()),
    );
    assert!(matches!(result, Err(ConfigError::InvalidTopology { .. })));
}

#[test]
fn test_empty_table_resolves_everything_to_default() {
    let resolver = TopologyResolver::new(TopologyTable::empty());
    assert!(resolver.table().is_empty());
    assert!(resolver.resolve("n8n-nodes-base.switch", Category::Core).is_default());
}
