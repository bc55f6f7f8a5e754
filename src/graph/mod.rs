use crate::error::GraphError;
use crate::topology::PortTopology;
use ahash::{AHashMap, AHashSet};

mod builder;

pub use builder::GraphBuilder;

/// Id of the single node under test. Part of the text contract read by coverage analysis.
pub const TESTED_NODE_ID: &str = "test_node";
/// Prefix of stub node ids, followed by the input index.
pub const STUB_ID_PREFIX: &str = "input_";
/// Prefix of sink node ids, followed by the output index.
pub const SINK_ID_PREFIX: &str = "output_";

/// The part a node plays in a test harness graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// Feeds one input port of the tested node.
    Stub,
    /// The node under test.
    Tested,
    /// Receives one output port of the tested node.
    Sink,
}

impl NodeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeRole::Stub => "stub",
            NodeRole::Tested => "tested",
            NodeRole::Sink => "sink",
        }
    }
}

/// Canvas coordinates of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
    pub role: NodeRole,
    pub label: String,
    pub position: Position,
}

/// A directed connection from an output port to an input port.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source_node_id: String,
    pub source_output_index: u32,
    pub target_node_id: String,
    pub target_input_index: u32,
}

/// An in-memory test harness: stubs, one tested node, sinks, and the edges between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn tested_node(&self) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.role == NodeRole::Tested)
    }

    pub fn nodes_with_role(&self, role: NodeRole) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(move |n| n.role == role)
    }

    pub fn incoming(&self, node_id: &str) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.target_node_id == node_id)
    }

    pub fn outgoing(&self, node_id: &str) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.source_node_id == node_id)
    }

    /// Checks that this graph wires every port of `topology` exactly once.
    ///
    /// Returns the first violation found.
    pub fn check_wiring(&self, topology: &PortTopology) -> Result<(), GraphError> {
        let mut roles: AHashMap<&str, NodeRole> = AHashMap::new();
        for node in &self.nodes {
            if roles.insert(node.id.as_str(), node.role).is_some() {
                return Err(GraphError::DuplicateNodeId(node.id.clone()));
            }
        }

        let tested: Vec<&GraphNode> = self.nodes_with_role(NodeRole::Tested).collect();
        if tested.len() != 1 {
            return Err(GraphError::TestedNodeCount(tested.len()));
        }
        let tested_id = tested[0].id.as_str();

        check_role_count(self, NodeRole::Stub, topology.inputs.len())?;
        check_role_count(self, NodeRole::Sink, topology.outputs.len())?;

        let expected_edges = topology.inputs.len() + topology.outputs.len();
        if self.edges.len() != expected_edges {
            return Err(GraphError::EdgeCount {
                expected: expected_edges,
                found: self.edges.len(),
            });
        }

        for edge in &self.edges {
            let source_role = *roles
                .get(edge.source_node_id.as_str())
                .ok_or_else(|| GraphError::UnknownNode(edge.source_node_id.clone()))?;
            let target_role = *roles
                .get(edge.target_node_id.as_str())
                .ok_or_else(|| GraphError::UnknownNode(edge.target_node_id.clone()))?;

            let synthetic = [
                (source_role, edge.source_output_index),
                (target_role, edge.target_input_index),
            ];
            for (role, index) in synthetic {
                if role != NodeRole::Tested && index != 0 {
                    return Err(GraphError::SyntheticPortIndex {
                        source_node: edge.source_node_id.clone(),
                        target_node: edge.target_node_id.clone(),
                        role: role.as_str(),
                        index,
                    });
                }
            }
        }

        let wired_inputs: Vec<u32> = self.incoming(tested_id).map(|e| e.target_input_index).collect();
        let wired_outputs: Vec<u32> = self.outgoing(tested_id).map(|e| e.source_output_index).collect();
        check_each_once("input", &topology.input_indexes(), &wired_inputs)?;
        check_each_once("output", &topology.output_indexes(), &wired_outputs)?;

        Ok(())
    }
}

fn check_role_count(graph: &Graph, role: NodeRole, expected: usize) -> Result<(), GraphError> {
    let found = graph.nodes_with_role(role).count();
    if found != expected {
        return Err(GraphError::RoleCount {
            role: role.as_str(),
            expected,
            found,
        });
    }
    Ok(())
}

fn check_each_once(direction: &'static str, expected: &[u32], wired: &[u32]) -> Result<(), GraphError> {
    let expected_set: AHashSet<u32> = expected.iter().copied().collect();
    let mut counts: AHashMap<u32, usize> = AHashMap::new();
    for index in wired {
        *counts.entry(*index).or_default() += 1;
    }

    for index in expected {
        let count = counts.get(index).copied().unwrap_or(0);
        if count != 1 {
            return Err(GraphError::PortWiring {
                direction,
                index: *index,
                count,
            });
        }
    }
    if let Some(index) = wired.iter().find(|i| !expected_set.contains(*i)) {
        return Err(GraphError::PortWiring {
            direction,
            index: *index,
            count: counts.get(index).copied().unwrap_or(0),
        });
    }
    Ok(())
}
