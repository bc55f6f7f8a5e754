use super::{Edge, Graph, GraphNode, NodeRole, Position, SINK_ID_PREFIX, STUB_ID_PREFIX, TESTED_NODE_ID};
use crate::registry::NodeDescriptor;
use crate::topology::{PortSpec, PortTopology};

const ORIGIN_X: i32 = 250;
const ORIGIN_Y: i32 = 300;
const COLUMN_WIDTH: i32 = 200;
const ROW_SPACING: i32 = 150;

/// Builds the test harness graph for one descriptor.
///
/// Layout is a pure function of the descriptor and topology: stubs in the first
/// column, the tested node centered against them, sinks spread symmetrically in
/// the next column. Rebuilding always yields an identical graph.
pub struct GraphBuilder<'a> {
    descriptor: &'a NodeDescriptor,
    topology: &'a PortTopology,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(descriptor: &'a NodeDescriptor, topology: &'a PortTopology) -> Self {
        Self {
            descriptor,
            topology,
        }
    }

    pub fn build(self) -> Graph {
        // Category wins over any stale topology entry.
        let inputs: &[PortSpec] = if self.descriptor.is_trigger() {
            &[]
        } else {
            &self.topology.inputs
        };
        let outputs = &self.topology.outputs;

        let stubs: Vec<GraphNode> = inputs
            .iter()
            .map(|port| GraphNode {
                id: stub_id(port.index),
                role: NodeRole::Stub,
                label: port.name.clone(),
                position: Position::new(ORIGIN_X, stub_y(port.index, inputs.len())),
            })
            .collect();

        let tested = GraphNode {
            id: TESTED_NODE_ID.to_string(),
            role: NodeRole::Tested,
            label: self.descriptor.name.clone(),
            position: tested_position(&stubs),
        };

        let sinks: Vec<GraphNode> = outputs
            .iter()
            .map(|port| GraphNode {
                id: sink_id(port.index),
                role: NodeRole::Sink,
                label: format!("Output: {}", port.name),
                position: Position::new(
                    tested.position.x + COLUMN_WIDTH,
                    sink_y(tested.position.y, port.index, outputs.len()),
                ),
            })
            .collect();

        let input_edges = inputs.iter().map(|port| Edge {
            source_node_id: stub_id(port.index),
            source_output_index: 0,
            target_node_id: TESTED_NODE_ID.to_string(),
            target_input_index: port.index,
        });
        let output_edges = outputs.iter().map(|port| Edge {
            source_node_id: TESTED_NODE_ID.to_string(),
            source_output_index: port.index,
            target_node_id: sink_id(port.index),
            target_input_index: 0,
        });
        let edges = input_edges.chain(output_edges).collect();

        let mut nodes = stubs;
        nodes.push(tested);
        nodes.extend(sinks);

        Graph { nodes, edges }
    }
}

fn stub_id(index: u32) -> String {
    format!("{}{}", STUB_ID_PREFIX, index)
}

fn sink_id(index: u32) -> String {
    format!("{}{}", SINK_ID_PREFIX, index)
}

fn stub_y(index: u32, count: usize) -> i32 {
    if count > 1 {
        ORIGIN_Y + index as i32 * ROW_SPACING
    } else {
        ORIGIN_Y
    }
}

fn tested_position(stubs: &[GraphNode]) -> Position {
    let ys = stubs.iter().map(|s| s.position.y);
    match (ys.clone().min(), ys.max()) {
        (Some(top), Some(bottom)) => Position::new(ORIGIN_X + COLUMN_WIDTH, (top + bottom) / 2),
        _ => Position::new(ORIGIN_X, ORIGIN_Y),
    }
}

/// Spreads `count` sinks around `center_y`, `ROW_SPACING` apart.
fn sink_y(center_y: i32, index: u32, count: usize) -> i32 {
    let span = (count as i32 - 1) * ROW_SPACING;
    center_y + index as i32 * ROW_SPACING - span / 2
}
