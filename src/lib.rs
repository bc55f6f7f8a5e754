//! # nodewire - Port-Covering Test Workflow Generator
//!
//! **nodewire** takes a catalog of node descriptors and, for each one, synthesizes a
//! minimal harness workflow that exercises every declared input and output port. The
//! harness is rendered as Terraform configuration for the n8n provider, and the same
//! text can later be read back to verify that each node's required ports are covered.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: `RegistryLoader` reads a JSON snapshot into `NodeDescriptor`s, skipping
//!     malformed entries with a structured reason instead of failing.
//! 2.  **Resolve**: `TopologyResolver` maps each node type to its authoritative
//!     `PortTopology`, falling back to a single-port default.
//! 3.  **Build**: `GraphBuilder` creates one stub per input, the tested node, and one
//!     sink per output, wiring every port exactly once.
//! 4.  **Serialize**: `Serializer` renders the graph as byte-deterministic text.
//! 5.  **Verify**: `analyze` and `validate` recover structural facts from that text and
//!     compare them with the expected topology.
//!
//! ## Quick Start
//!
//! ```rust
//! use nodewire::prelude::*;
//!
//! let descriptor = NodeDescriptor::new(
//!     "IF",
//!     "n8n-nodes-base.if",
//!     Category::Core,
//!     vec!["main".to_string()],
//!     vec!["main".to_string(), "main".to_string()],
//! );
//!
//! let resolver = TopologyResolver::default();
//! let topology = resolver.resolve(&descriptor.node_type, descriptor.category);
//! let graph = GraphBuilder::new(&descriptor, &topology).build();
//! let text = Serializer::default().serialize(&graph, &descriptor);
//!
//! let analysis = analyze(&text).unwrap();
//! let verdict = validate(&analysis, &topology);
//! assert_eq!(verdict.status, CoverageStatus::Complete);
//! ```

pub mod batch;
pub mod config;
pub mod coverage;
pub mod error;
pub mod graph;
pub mod prelude;
pub mod registry;
pub mod serializer;
pub mod slug;
pub mod topology;
