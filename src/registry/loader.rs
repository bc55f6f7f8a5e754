use super::conversion::IntoDescriptor;
use super::descriptor::NodeDescriptor;
use crate::error::{RegistryError, SkipReason};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// The default package prefix for bare node types found in a snapshot.
pub const DEFAULT_TYPE_PREFIX: &str = "n8n-nodes-base.";

/// A registry entry that could not be turned into a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Zero-based position of the entry in the snapshot's `nodes` array.
    pub position: usize,
    pub name: Option<String>,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "entry #{} ('{}'): {}", self.position, name, self.reason),
            None => write!(f, "entry #{}: {}", self.position, self.reason),
        }
    }
}

/// Outcome of converting one registry entry.
pub type DescriptorResult = Result<NodeDescriptor, SkippedEntry>;

/// A parsed registry snapshot. Entries keep their file order.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    pub version: Option<String>,
    pub entries: Vec<DescriptorResult>,
}

impl RegistrySnapshot {
    /// Builds a snapshot from descriptors that are already known to be valid.
    pub fn from_descriptors(descriptors: Vec<NodeDescriptor>) -> Self {
        Self {
            version: None,
            entries: descriptors.into_iter().map(Ok).collect(),
        }
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &NodeDescriptor> {
        self.entries.iter().filter_map(|e| e.as_ref().ok())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &SkippedEntry> {
        self.entries.iter().filter_map(|e| e.as_ref().err())
    }
}

/// Best-effort reader for registry snapshots.
///
/// Unparsable entries are skipped with a warning and reported through
/// [`SkippedEntry`]; only a snapshot that is not JSON at all, or has no
/// `nodes` array, fails the load.
#[derive(Debug, Clone)]
pub struct RegistryLoader {
    type_prefix: String,
}

impl Default for RegistryLoader {
    fn default() -> Self {
        Self::new(DEFAULT_TYPE_PREFIX)
    }
}

impl RegistryLoader {
    pub fn new(type_prefix: impl Into<String>) -> Self {
        Self {
            type_prefix: type_prefix.into(),
        }
    }

    pub fn from_file(&self, path: impl AsRef<Path>) -> Result<RegistrySnapshot, RegistryError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = self.load_from_str(&content)?;
        info!(
            path = %path.display(),
            nodes = snapshot.entries.len(),
            "loaded registry"
        );
        Ok(snapshot)
    }

    pub fn load_from_str(&self, json: &str) -> Result<RegistrySnapshot, RegistryError> {
        let root: Value = serde_json::from_str(json)?;
        let nodes = root
            .get("nodes")
            .and_then(Value::as_array)
            .ok_or(RegistryError::MissingNodes)?;
        let version = root
            .get("version")
            .and_then(Value::as_str)
            .map(str::to_string);

        let entries = nodes
            .iter()
            .enumerate()
            .map(|(position, raw)| {
                raw.into_descriptor()
                    .map(|mut descriptor| {
                        descriptor.node_type = self.qualify_type(&descriptor.node_type);
                        descriptor
                    })
                    .map_err(|reason| {
                        let skipped = SkippedEntry {
                            position,
                            name: raw.get("name").and_then(Value::as_str).map(str::to_string),
                            reason,
                        };
                        warn!("Skipping registry {}", skipped);
                        skipped
                    })
            })
            .collect();

        Ok(RegistrySnapshot { version, entries })
    }

    /// Prefixes bare node types with the configured package name.
    ///
    /// Types that already carry a package (`n8n-nodes-*` or `@n8n/*`) are kept as-is.
    pub fn qualify_type(&self, node_type: &str) -> String {
        if self.type_prefix.is_empty()
            || node_type.starts_with("n8n-nodes-")
            || node_type.starts_with("@n8n/")
        {
            node_type.to_string()
        } else {
            format!("{}{}", self.type_prefix, node_type)
        }
    }
}
