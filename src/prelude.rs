//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the nodewire
//! crate, so generating and verifying a workflow needs a single import.
//!
//! # Example
//!
//! ```rust,no_run
//! use nodewire::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let snapshot = RegistryLoader::default().from_file("data/n8n-nodes-registry.json")?;
//! let report = BatchRunner::new("examples/nodes", FsWriter).run(&snapshot);
//! println!("generated {}, failed {}", report.generated.len(), report.failed.len());
//!
//! let coverage = CoverageScanner::default().scan("examples/nodes")?;
//! println!("{}", CoverageFormatter::format_summary(&coverage));
//! # Ok(())
//! # }
//! ```

// Generation pipeline
pub use crate::batch::{ArtifactWriter, BatchReport, BatchRunner, FsWriter};
pub use crate::graph::{Edge, Graph, GraphBuilder, GraphNode, NodeRole, Position};
pub use crate::serializer::{Serializer, SerializerOptions};
pub use crate::slug::slugify;
pub use crate::topology::{PortSpec, PortTopology, TopologyResolver, TopologyTable};

// Registry
pub use crate::registry::{Category, NodeDescriptor, RegistryLoader, RegistrySnapshot};

// Coverage verification
pub use crate::coverage::{
    AnalysisResult, CoverageFormatter, CoverageScanner, CoverageStatus, Validation, analyze,
    validate,
};

// Configuration
pub use crate::config::GeneratorConfig;

// Error types
pub use crate::error::{
    AnalysisError, ConfigError, GenerationError, GraphError, RegistryError, SkipReason,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
