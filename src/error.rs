use std::path::PathBuf;
use thiserror::Error;

/// Errors that make a registry snapshot unusable as a whole.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Could not read registry file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse registry JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Registry snapshot has no 'nodes' array")]
    MissingNodes,
}

/// Why a single registry entry was skipped instead of becoming a `NodeDescriptor`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("entry is not a JSON object")]
    NotAnObject,

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("field '{0}' must not be empty")]
    Empty(&'static str),
}

/// Errors raised while writing the artifacts of one descriptor.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Could not create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Synthesized graph is inconsistent: {0}")]
    InvalidGraph(#[from] GraphError),

    #[error("Node name '{0}' has no filesystem-safe characters")]
    EmptySlug(String),

    #[error("Target directory '{0}' is already used by another node")]
    DuplicateTarget(PathBuf),
}

/// Structural errors found while reading back a generated workflow.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Could not determine node type")]
    MissingTypeHeader,

    #[error("Could not read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while loading a generator configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config TOML: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Topology entry '{type_name}' is invalid: {message}")]
    InvalidTopology { type_name: String, message: String },
}

/// Violations of the wiring invariants of a synthesized graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node id '{0}' is used more than once")]
    DuplicateNodeId(String),

    #[error("Graph must contain exactly one tested node, found {0}")]
    TestedNodeCount(usize),

    #[error("Edge references unknown node '{0}'")]
    UnknownNode(String),

    #[error("Expected {expected} {role} nodes, found {found}")]
    RoleCount {
        role: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Expected {expected} edges, found {found}")]
    EdgeCount { expected: usize, found: usize },

    #[error("{direction}[{index}] is wired {count} times, expected exactly once")]
    PortWiring {
        direction: &'static str,
        index: u32,
        count: usize,
    },

    #[error("Edge {source_node}->{target_node} uses index {index} on a {role} node, which only has index 0")]
    SyntheticPortIndex {
        source_node: String,
        target_node: String,
        role: &'static str,
        index: u32,
    },
}
