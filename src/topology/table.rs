use crate::error::ConfigError;
use ahash::AHashMap;
use serde::Deserialize;

/// The port layout registered for one node type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TopologyEntry {
    /// Input port names, in index order.
    #[serde(default = "main_port")]
    pub inputs: Vec<String>,
    /// Output port names, in index order. Never empty.
    #[serde(default = "main_port")]
    pub outputs: Vec<String>,
    /// What a complete test of this node has to exercise.
    #[serde(default)]
    pub summary: Option<String>,
}

fn main_port() -> Vec<String> {
    vec!["Main".to_string()]
}

impl TopologyEntry {
    pub fn new<I, O>(inputs: I, outputs: O) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            outputs: outputs.into_iter().map(Into::into).collect(),
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

/// An immutable lookup table of non-default port topologies, keyed by exact node type.
///
/// Tables are plain values: build one with [`TopologyTable::builder`] (which starts
/// from the built-in entries) or [`TopologyTable::empty`], then hand it to a
/// [`TopologyResolver`](super::TopologyResolver).
#[derive(Debug, Clone, Default)]
pub struct TopologyTable {
    entries: AHashMap<String, TopologyEntry>,
}

impl TopologyTable {
    /// A table with no registered types; every lookup falls back to the default.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table of special-cased node types.
    pub fn builtin() -> Self {
        let mut entries = AHashMap::new();
        register_builtin_topologies(&mut entries);
        Self { entries }
    }

    pub fn builder() -> TopologyTableBuilder {
        TopologyTableBuilder {
            entries: Self::builtin().entries,
        }
    }

    pub fn get(&self, node_type: &str) -> Option<&TopologyEntry> {
        self.entries.get(node_type)
    }

    pub fn contains(&self, node_type: &str) -> bool {
        self.entries.contains_key(node_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered types in sorted order.
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

pub struct TopologyTableBuilder {
    entries: AHashMap<String, TopologyEntry>,
}

impl TopologyTableBuilder {
    /// Drops every entry, including the built-in ones.
    pub fn clear(mut self) -> Self {
        self.entries.clear();
        self
    }

    /// Registers or replaces the topology of `node_type`.
    pub fn with_entry(
        mut self,
        node_type: impl Into<String>,
        entry: TopologyEntry,
    ) -> Result<Self, ConfigError> {
        let node_type = node_type.into();
        if entry.outputs.is_empty() {
            return Err(ConfigError::InvalidTopology {
                type_name: node_type,
                message: "at least one output port is required".to_string(),
            });
        }
        self.entries.insert(node_type, entry);
        Ok(self)
    }

    pub fn build(self) -> TopologyTable {
        TopologyTable {
            entries: self.entries,
        }
    }
}

/// Declares the built-in topologies and the function that registers them.
macro_rules! define_topologies {
    ( $( ($node_type:expr, [$($input:expr),* $(,)?], [$($output:expr),+ $(,)?], $summary:expr) ),* $(,)? ) => {
        fn register_builtin_topologies(entries: &mut AHashMap<String, TopologyEntry>) {
            $(
                entries.insert(
                    $node_type.to_string(),
                    TopologyEntry::new([$($input),*], [$($output),+]).with_summary($summary),
                );
            )*
        }
    };
}

define_topologies! {
    // Branching
    ("n8n-nodes-base.if", ["Main"], ["True", "False"],
        "IF node must test both true and false branches"),
    ("n8n-nodes-base.filter", ["Main"], ["Pass", "Fail"],
        "Filter node must test both pass and fail outputs"),
    ("n8n-nodes-base.splitInBatches", ["Main"], ["Batch", "Done"],
        "Split In Batches must test both batch and done outputs"),

    // Routing
    ("n8n-nodes-base.switch", ["Main"], ["Output 1", "Output 2", "Output 3", "Fallback"],
        "Switch node must test all routing cases"),
    ("n8n-nodes-base.compareDatasets", ["Main"], ["Match", "Mismatch", "No Match"],
        "Compare Datasets must test all three outputs"),

    // Combining
    ("n8n-nodes-base.merge", ["Input 1", "Input 2"], ["Main"],
        "Merge node must test multiple inputs"),
}
