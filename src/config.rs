use crate::error::ConfigError;
use crate::registry::{DEFAULT_TYPE_PREFIX, RegistryLoader};
use crate::serializer::SerializerOptions;
use crate::topology::{TopologyEntry, TopologyResolver, TopologyTable};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for a generation run. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// root of the generated `<category>/<node>/` tree
    pub output_dir: PathBuf,
    /// worker threads for the batch, 0 lets rayon pick the CPU count
    pub jobs: usize,
    /// package prefix added to bare registry types
    pub type_prefix: String,
    pub provider: ProviderConfig,
    pub roles: RoleConfig,
    /// extra or replacement topology entries
    #[serde(rename = "topology")]
    pub topologies: Vec<TopologyOverride>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub source: String,
    pub version: String,
    /// default of the `n8n_base_url` variable
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoleConfig {
    /// node type of input stubs
    pub stub_type: String,
    /// node type of output sinks
    pub sink_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopologyOverride {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(flatten)]
    pub entry: TopologyEntry,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("examples/nodes"),
            jobs: 0,
            type_prefix: DEFAULT_TYPE_PREFIX.to_string(),
            provider: ProviderConfig::default(),
            roles: RoleConfig::default(),
            topologies: Vec::new(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        let options = SerializerOptions::default();
        Self {
            source: options.provider_source,
            version: options.provider_version,
            base_url: "http://localhost:5678".to_string(),
        }
    }
}

impl Default for RoleConfig {
    fn default() -> Self {
        let options = SerializerOptions::default();
        Self {
            stub_type: options.stub_type,
            sink_type: options.sink_type,
        }
    }
}

impl GeneratorConfig {
    pub fn from_file<T: AsRef<Path>>(path: T) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_from_str(&data)
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str::<GeneratorConfig>(toml_str)?)
    }

    /// The built-in topology table with this config's entries merged over it.
    pub fn topology_table(&self) -> Result<TopologyTable, ConfigError> {
        self.topologies
            .iter()
            .try_fold(TopologyTable::builder(), |builder, o| {
                builder.with_entry(o.node_type.clone(), o.entry.clone())
            })
            .map(|builder| builder.build())
    }

    pub fn resolver(&self) -> Result<TopologyResolver, ConfigError> {
        Ok(TopologyResolver::new(self.topology_table()?))
    }

    pub fn serializer_options(&self) -> SerializerOptions {
        SerializerOptions {
            provider_source: self.provider.source.clone(),
            provider_version: self.provider.version.clone(),
            stub_type: self.roles.stub_type.clone(),
            sink_type: self.roles.sink_type.clone(),
        }
    }

    pub fn loader(&self) -> RegistryLoader {
        RegistryLoader::new(self.type_prefix.clone())
    }
}
