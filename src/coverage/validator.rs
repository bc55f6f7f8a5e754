use super::analyzer::AnalysisResult;
use crate::topology::{PortDirection, PortTopology};
use itertools::Itertools;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoverageStatus {
    /// The type has no special port requirements.
    Ok,
    /// Every port of a registered topology is exercised.
    Complete,
    /// Some required port or count is missing.
    Incomplete,
}

impl CoverageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageStatus::Ok => "ok",
            CoverageStatus::Complete => "complete",
            CoverageStatus::Incomplete => "incomplete",
        }
    }

    /// Whether this status counts towards coverage.
    pub fn is_covered(&self) -> bool {
        !matches!(self, CoverageStatus::Incomplete)
    }
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The verdict for one workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub status: CoverageStatus,
    pub message: String,
    /// What a complete test requires, when the topology says so.
    pub expected: Option<String>,
}

/// Compares recovered facts with the expected topology.
///
/// Default topologies always pass. Registered ones need an exact match of sink
/// count and wired output indexes, plus stub count and wired input indexes when
/// more than one input is declared.
pub fn validate(analysis: &AnalysisResult, topology: &PortTopology) -> Validation {
    if topology.is_default() {
        return Validation {
            status: CoverageStatus::Ok,
            message: "Standard node (single input/output)".to_string(),
            expected: None,
        };
    }

    let mut issues = Vec::new();
    check_ports(
        &mut issues,
        PortDirection::Output,
        analysis.total_output_sinks,
        &analysis.wired_output_indexes,
        topology,
    );
    if topology.has_multiple_inputs() {
        check_ports(
            &mut issues,
            PortDirection::Input,
            analysis.total_input_stubs,
            &analysis.wired_input_indexes,
            topology,
        );
    }

    if !issues.is_empty() {
        return Validation {
            status: CoverageStatus::Incomplete,
            message: issues.join("; "),
            expected: topology.summary.clone(),
        };
    }

    let message = if topology.has_multiple_inputs() {
        format!(
            "All {} inputs and {} outputs tested",
            topology.inputs.len(),
            topology.outputs.len()
        )
    } else {
        format!("All {} outputs tested", topology.outputs.len())
    };
    Validation {
        status: CoverageStatus::Complete,
        message,
        expected: None,
    }
}

fn check_ports(
    issues: &mut Vec<String>,
    direction: PortDirection,
    found: usize,
    wired: &[u32],
    topology: &PortTopology,
) {
    let expected: Vec<u32> = topology.ports(direction).iter().map(|p| p.index).collect();
    let needed = expected.len();

    if found < needed {
        issues.push(format!("missing {}s: has {}, needs {}", direction, found, needed));
    } else if found > needed {
        issues.push(format!("unexpected {}s: has {}, needs {}", direction, found, needed));
    }

    let missing = expected.iter().filter(|i| !wired.contains(i)).collect_vec();
    if !missing.is_empty() {
        issues.push(format!(
            "missing {} indices: {}",
            direction,
            format_indexes(direction, missing)
        ));
    }

    let unexpected = wired.iter().filter(|i| !expected.contains(i)).collect_vec();
    if !unexpected.is_empty() {
        issues.push(format!(
            "unexpected {} indices: {}",
            direction,
            format_indexes(direction, unexpected)
        ));
    }
}

fn format_indexes(direction: PortDirection, indexes: Vec<&u32>) -> String {
    indexes
        .into_iter()
        .map(|i| format!("{}[{}]", direction, i))
        .join(", ")
}
