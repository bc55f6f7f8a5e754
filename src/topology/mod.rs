use crate::registry::Category;
use std::fmt;

mod table;

pub use table::{TopologyEntry, TopologyTable, TopologyTableBuilder};

/// The name every port of the default topology carries.
pub const DEFAULT_PORT_NAME: &str = "Main";

/// Which side of the tested node a port sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => f.write_str("input"),
            PortDirection::Output => f.write_str("output"),
        }
    }
}

/// A single port of a topology. Indexes are contiguous from 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    pub index: u32,
    pub name: String,
    pub description: String,
}

impl PortSpec {
    fn new(direction: PortDirection, index: u32, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            description: format!("{} ({}[{}])", name, direction, index),
            index,
            name,
        }
    }
}

/// Whether a topology came from the table or from the single-port fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyOrigin {
    Registered,
    Default,
}

/// The authoritative port layout of a node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortTopology {
    pub inputs: Vec<PortSpec>,
    pub outputs: Vec<PortSpec>,
    pub origin: TopologyOrigin,
    pub summary: Option<String>,
}

impl PortTopology {
    /// The canonical single-port layout; triggers get no input.
    pub fn single_port(category: Category) -> Self {
        let names: &[&str] = if category.is_trigger() {
            &[]
        } else {
            &[DEFAULT_PORT_NAME]
        };
        Self {
            inputs: specs(PortDirection::Input, names),
            outputs: specs(PortDirection::Output, &[DEFAULT_PORT_NAME]),
            origin: TopologyOrigin::Default,
            summary: None,
        }
    }

    fn from_entry(entry: &TopologyEntry, category: Category) -> Self {
        let inputs = if category.is_trigger() {
            Vec::new()
        } else {
            specs(PortDirection::Input, &entry.inputs)
        };
        Self {
            inputs,
            outputs: specs(PortDirection::Output, &entry.outputs),
            origin: TopologyOrigin::Registered,
            summary: entry.summary.clone(),
        }
    }

    pub fn is_default(&self) -> bool {
        self.origin == TopologyOrigin::Default
    }

    pub fn has_multiple_inputs(&self) -> bool {
        self.inputs.len() > 1
    }

    pub fn input_indexes(&self) -> Vec<u32> {
        self.inputs.iter().map(|p| p.index).collect()
    }

    pub fn output_indexes(&self) -> Vec<u32> {
        self.outputs.iter().map(|p| p.index).collect()
    }

    pub fn ports(&self, direction: PortDirection) -> &[PortSpec] {
        match direction {
            PortDirection::Input => &self.inputs,
            PortDirection::Output => &self.outputs,
        }
    }
}

fn specs<S: AsRef<str>>(direction: PortDirection, names: &[S]) -> Vec<PortSpec> {
    names
        .iter()
        .zip(0u32..)
        .map(|(name, index)| PortSpec::new(direction, index, name.as_ref()))
        .collect()
}

/// Maps node types to their port topology.
///
/// Resolution is pure and total: exact type matches come from the table, anything
/// else gets [`PortTopology::single_port`]. The category always wins over the table,
/// so a trigger never resolves with inputs.
#[derive(Debug, Clone)]
pub struct TopologyResolver {
    table: TopologyTable,
}

impl Default for TopologyResolver {
    fn default() -> Self {
        Self::new(TopologyTable::builtin())
    }
}

impl TopologyResolver {
    pub fn new(table: TopologyTable) -> Self {
        Self { table }
    }

    pub fn resolve(&self, node_type: &str, category: Category) -> PortTopology {
        match self.table.get(node_type) {
            Some(entry) => PortTopology::from_entry(entry, category),
            None => PortTopology::single_port(category),
        }
    }

    pub fn is_registered(&self, node_type: &str) -> bool {
        self.table.contains(node_type)
    }

    pub fn table(&self) -> &TopologyTable {
        &self.table
    }
}
