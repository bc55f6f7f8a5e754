//! Tests for reading generated workflows back and validating their coverage.
mod common;
use common::*;
use nodewire::coverage::{DiscoveredWorkflow, WorkflowOutcome, WorkflowReport};
use nodewire::error::AnalysisError;
use nodewire::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn check(text: &str) -> Validation {
    CoverageScanner::default().check_text(text).unwrap().1
}

#[test]
fn test_analyze_generated_if() {
    let (_, _, text) = render(&if_descriptor());
    let analysis = analyze(&text).unwrap();
    assert_eq!(
        analysis,
        AnalysisResult {
            node_type: "n8n-nodes-base.if".to_string(),
            category: Some(Category::Core),
            total_input_stubs: 1,
            total_output_sinks: 2,
            wired_output_indexes: vec![0, 1],
            wired_input_indexes: vec![0],
        }
    );
}

#[test]
fn test_analyze_generated_trigger() {
    let (_, _, text) = render(&cron_descriptor());
    let analysis = analyze(&text).unwrap();
    assert_eq!(analysis.category, Some(Category::Trigger));
    assert_eq!(analysis.total_input_stubs, 0);
    assert_eq!(analysis.total_output_sinks, 1);
    assert!(analysis.wired_input_indexes.is_empty());
}

#[test]
fn test_every_registered_type_round_trips_complete() {
    for descriptor in registered_descriptors() {
        let (topology, _, text) = render(&descriptor);
        let analysis = analyze(&text).unwrap();
        assert_eq!(analysis.total_output_sinks, topology.outputs.len());
        assert_eq!(analysis.wired_output_indexes, topology.output_indexes());

        let validation = validate(&analysis, &topology);
        assert_eq!(
            validation.status,
            CoverageStatus::Complete,
            "{}: {}",
            descriptor.node_type,
            validation.message
        );
    }
}

#[test]
fn test_default_nodes_are_ok() {
    for descriptor in [slack_descriptor(), cron_descriptor()] {
        let (_, _, text) = render(&descriptor);
        let validation = check(&text);
        assert_eq!(validation.status, CoverageStatus::Ok);
        assert_eq!(validation.message, "Standard node (single input/output)");
        assert_eq!(validation.expected, None);
    }
}

#[test]
fn test_complete_messages() {
    let (_, _, text) = render(&if_descriptor());
    assert_eq!(check(&text).message, "All 2 outputs tested");

    let (_, _, text) = render(&merge_descriptor());
    assert_eq!(check(&text).message, "All 2 inputs and 1 outputs tested");
}

#[test]
fn test_removed_output_edge_is_incomplete() {
    let (_, _, text) = render(&if_descriptor());
    let tampered = remove_connection(&text, "test_node_to_output_1");

    let validation = check(&tampered);
    assert_eq!(validation.status, CoverageStatus::Incomplete);
    assert_eq!(validation.message, "missing output indices: output[1]");
    assert_eq!(
        validation.expected.as_deref(),
        Some("IF node must test both true and false branches")
    );
}

#[test]
fn test_removed_input_edge_is_incomplete() {
    let (_, _, text) = render(&merge_descriptor());

    let validation = check(&remove_connection(&text, "input_1_to_test_node"));
    assert_eq!(validation.status, CoverageStatus::Incomplete);
    assert_eq!(validation.message, "missing input indices: input[1]");

    let validation = check(&remove_connection(&text, "input_0_to_test_node"));
    assert_eq!(validation.message, "missing input indices: input[0]");
}

#[test]
fn test_sink_count_mismatch() {
    let (_, _, text) = render(&switch_descriptor());
    let tampered = remove_connection(&text, "test_node_to_output_3").replace(
        "resource \"n8n_workflow_node\" \"output_3\" {",
        "resource \"n8n_workflow_node\" \"spare\" {",
    );

    let validation = check(&tampered);
    assert_eq!(
        validation.message,
        "missing outputs: has 3, needs 4; missing output indices: output[3]"
    );
}

#[test]
fn test_unexpected_output_index() {
    let (_, _, text) = render(&if_descriptor());
    let tampered = text.replace("  source_output_index = 1\n", "  source_output_index = 5\n");

    let validation = check(&tampered);
    assert_eq!(
        validation.message,
        "missing output indices: output[1]; unexpected output indices: output[5]"
    );
}

#[test]
fn test_legacy_layout() {
    let text = r#"# Type: n8n-nodes-base.if
resource "n8n_workflow_node" "manual_trigger" {
  name = "Manual Trigger"
}
resource "n8n_workflow_node" "test_node" {
  name = "IF"
}
resource "n8n_workflow_node" "display_result" {
  name = "Display Result"
}
"#;
    let analysis = analyze(text).unwrap();
    assert_eq!(analysis.category, None);
    assert_eq!(analysis.total_input_stubs, 1);
    assert_eq!(analysis.total_output_sinks, 1);

    let validation = check(text);
    assert_eq!(validation.status, CoverageStatus::Incomplete);
    assert_eq!(
        validation.message,
        "missing outputs: has 1, needs 2; missing output indices: output[0], output[1]"
    );
}

#[test]
fn test_missing_type_header() {
    let result = analyze("resource \"n8n_workflow_node\" \"test_node\" {\n}\n");
    assert!(matches!(result, Err(AnalysisError::MissingTypeHeader)));

    let result = analyze("# Type:   \n");
    assert!(matches!(result, Err(AnalysisError::MissingTypeHeader)));
}

#[test]
fn test_multiline_names_round_trip() {
    let names = [
        "IF\n# Type: n8n-nodes-base.merge",
        "IF\nresource \"n8n_workflow_node\" \"output_7\" {",
    ];
    for name in names {
        let mut descriptor = if_descriptor();
        descriptor.name = name.to_string();
        let (_, _, text) = render(&descriptor);

        let (analysis, validation) = CoverageScanner::default().check_text(&text).unwrap();
        assert_eq!(analysis.node_type, "n8n-nodes-base.if");
        assert_eq!(analysis.total_output_sinks, 2);
        assert_eq!(validation.status, CoverageStatus::Complete, "{}", validation.message);
    }
}

#[test]
fn test_analysis_ignores_cosmetic_changes() {
    let (_, _, text) = render(&if_descriptor());
    let reformatted = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| format!("    {}", l.replace(" = ", "=")))
        .collect::<Vec<_>>()
        .join("\n");
    assert_eq!(analyze(&reformatted).unwrap(), analyze(&text).unwrap());
}

fn report(name: &str, text: Option<&str>) -> WorkflowReport {
    let workflow = DiscoveredWorkflow {
        dir: PathBuf::from("nodes/core").join(name),
        category: "core".to_string(),
        name: name.to_string(),
    };
    let outcome = match text {
        Some(text) => {
            let (analysis, validation) = CoverageScanner::default().check_text(text).unwrap();
            WorkflowOutcome::Analyzed {
                analysis,
                validation,
            }
        }
        None => WorkflowOutcome::Error(AnalysisError::MissingTypeHeader),
    };
    WorkflowReport { workflow, outcome }
}

#[test]
fn test_format_line() {
    let (_, _, text) = render(&if_descriptor());
    assert_eq!(
        CoverageFormatter::format_line(&report("if", Some(&text))),
        "complete   core/if (n8n-nodes-base.if): All 2 outputs tested"
    );

    let tampered = remove_connection(&text, "test_node_to_output_0");
    assert_eq!(
        CoverageFormatter::format_line(&report("if", Some(&tampered))),
        "incomplete core/if (n8n-nodes-base.if): missing output indices: output[0] \
         [expected: IF node must test both true and false branches]"
    );

    assert_eq!(
        CoverageFormatter::format_line(&report("broken", None)),
        "error      core/broken: Could not determine node type"
    );
}

#[test]
fn test_report_totals() {
    let (_, _, if_text) = render(&if_descriptor());
    let (_, _, slack_text) = render(&slack_descriptor());
    let tampered = remove_connection(&if_text, "test_node_to_output_1");

    let coverage = nodewire::coverage::CoverageReport {
        workflows: vec![
            report("if", Some(&if_text)),
            report("slack", Some(&slack_text)),
            report("if-broken", Some(&tampered)),
            report("bad", None),
        ],
    };

    assert_eq!(coverage.count(CoverageStatus::Complete), 1);
    assert_eq!(coverage.count(CoverageStatus::Ok), 1);
    assert_eq!(coverage.count(CoverageStatus::Incomplete), 1);
    assert_eq!(coverage.errors(), 1);
    assert_eq!(coverage.analyzed(), 3);
    assert!(!coverage.is_passing());
    assert_eq!(coverage.incomplete().count(), 1);

    let summary = CoverageFormatter::format_summary(&coverage);
    assert!(summary.contains("Total workflows:         4\n"));
    assert!(summary.contains("Incomplete coverage:     1\n"));
    assert!(summary.ends_with("Overall coverage:        66.7%"));
}

#[test]
fn test_empty_report_is_fully_covered() {
    let coverage = nodewire::coverage::CoverageReport::default();
    assert_eq!(coverage.coverage_percent(), 100.0);
    assert!(coverage.is_passing());
}
