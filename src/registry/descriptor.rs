use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The catalog category of a node. Triggers start workflows and take no input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Trigger,
    Core,
    Integration,
    Database,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Trigger,
        Category::Core,
        Category::Integration,
        Category::Database,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Trigger => "Trigger",
            Category::Core => "Core",
            Category::Integration => "Integration",
            Category::Database => "Database",
        }
    }

    pub fn is_trigger(&self) -> bool {
        matches!(self, Category::Trigger)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// One orchestrable node as described by the registry snapshot.
///
/// Only `name`, `node_type`, `category`, `inputs` and `outputs` drive graph
/// synthesis. The remaining fields feed the generated README.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub category: Category,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<u32>,
    #[serde(default, rename = "file", skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

impl NodeDescriptor {
    /// Creates a descriptor with no README metadata.
    pub fn new(
        name: impl Into<String>,
        node_type: impl Into<String>,
        category: Category,
        inputs: Vec<String>,
        outputs: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            node_type: node_type.into(),
            category,
            inputs,
            outputs,
            description: None,
            latest_version: None,
            source_file: None,
        }
    }

    pub fn is_trigger(&self) -> bool {
        self.category.is_trigger()
    }
}
