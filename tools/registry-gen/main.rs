use clap::Parser;
use nodewire::registry::{Category, NodeDescriptor};
use nodewire::topology::TopologyTable;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde_json::{Value, json};
use std::fs;

/// A CLI tool to generate synthetic node registries for load-testing the generator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated registry JSON to
    #[arg(short, long, default_value = "generated_registry.json")]
    output: String,

    /// Number of ordinary nodes to generate
    #[arg(short, long, default_value_t = 200)]
    count: usize,

    /// Number of malformed entries to mix in
    #[arg(long, default_value_t = 0)]
    malformed: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

const SERVICES: &[&str] = &[
    "Airtable", "Asana", "GitHub", "Gmail", "HubSpot", "Jira", "Notion", "Slack", "Stripe",
    "Telegram", "Trello", "Twilio", "Zendesk",
];
const DATABASES: &[&str] = &["Postgres", "MySQL", "MongoDB", "Redis", "Snowflake"];
const SUFFIXES: &[&str] = &["", " Trigger", " V2", " Tool"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!(
        "Generating registry with {} nodes and {} malformed entries...",
        cli.count, cli.malformed
    );

    let mut nodes: Vec<Value> = special_nodes();
    println!("-> Added {} nodes with registered topologies.", nodes.len());

    for i in 0..cli.count {
        let descriptor = random_descriptor(&mut rng, i);
        nodes.push(serde_json::to_value(&descriptor)?);
    }
    println!("-> Generated {} ordinary nodes.", cli.count);

    for _ in 0..cli.malformed {
        let position = rng.random_range(0..=nodes.len());
        nodes.insert(position, malformed_entry(&mut rng));
    }

    let registry = json!({
        "version": "synthetic",
        "last_sync": "1970-01-01T00:00:00Z",
        "total_nodes": nodes.len(),
        "nodes": nodes,
    });
    fs::write(&cli.output, serde_json::to_string_pretty(&registry)?)?;

    println!("Successfully generated and saved registry to '{}'", cli.output);
    Ok(())
}

/// One node for every built-in special topology.
fn special_nodes() -> Vec<Value> {
    let table = TopologyTable::builtin();
    table
        .types()
        .into_iter()
        .filter_map(|node_type| {
            let entry = table.get(node_type)?;
            let name = node_type.rsplit('.').next().unwrap_or(node_type);
            let descriptor = NodeDescriptor::new(
                title_case(name),
                node_type,
                Category::Core,
                entry.inputs.iter().map(|_| "main".to_string()).collect(),
                entry.outputs.iter().map(|_| "main".to_string()).collect(),
            );
            serde_json::to_value(descriptor).ok()
        })
        .collect()
}

fn random_descriptor(rng: &mut StdRng, i: usize) -> NodeDescriptor {
    let category = *Category::ALL.choose(rng).unwrap_or(&Category::Integration);
    let base = match category {
        Category::Database => *DATABASES.choose(rng).unwrap_or(&"Postgres"),
        _ => *SERVICES.choose(rng).unwrap_or(&"Slack"),
    };
    let suffix = if category.is_trigger() {
        " Trigger"
    } else {
        *SUFFIXES.choose(rng).unwrap_or(&"")
    };
    let name = format!("{}{} {}", base, suffix, i);
    let node_type = format!("{}{}", base.to_lowercase(), i);

    let inputs = if category.is_trigger() {
        Vec::new()
    } else {
        vec!["main".to_string()]
    };
    // Some nodes claim extra outputs without a registered topology.
    let outputs = (0..rng.random_range(1..=2)).map(|_| "main".to_string()).collect();

    let mut descriptor = NodeDescriptor::new(name, node_type, category, inputs, outputs);
    descriptor.latest_version = Some(rng.random_range(1..=4));
    if rng.random_bool(0.7) {
        descriptor.description = Some(format!("Consume the {} API", base));
    }
    descriptor
}

fn malformed_entry(rng: &mut StdRng) -> Value {
    match rng.random_range(0..4) {
        0 => json!({ "type": "noName", "category": "Core", "inputs": ["main"], "outputs": ["main"] }),
        1 => json!({ "name": "Bad Category", "type": "bad", "category": "Utility", "inputs": [], "outputs": ["main"] }),
        2 => json!({ "name": "No Outputs", "type": "noOutputs", "category": "Core", "inputs": ["main"], "outputs": [] }),
        _ => json!("not an object"),
    }
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
