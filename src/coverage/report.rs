use super::{CoverageReport, CoverageStatus, WorkflowOutcome, WorkflowReport};

/// Formats coverage reports into human-readable lines.
pub struct CoverageFormatter;

impl CoverageFormatter {
    /// One line per workflow: status, location, node type and reason.
    pub fn format_line(report: &WorkflowReport) -> String {
        let label = report.workflow.label();
        match &report.outcome {
            WorkflowOutcome::Analyzed {
                analysis,
                validation,
            } => {
                let mut line = format!(
                    "{:<10} {} ({}): {}",
                    validation.status, label, analysis.node_type, validation.message
                );
                if validation.status == CoverageStatus::Incomplete {
                    if let Some(expected) = &validation.expected {
                        line.push_str(&format!(" [expected: {}]", expected));
                    }
                }
                line
            }
            WorkflowOutcome::Error(e) => format!("{:<10} {}: {}", "error", label, e),
        }
    }

    /// The aggregate block printed after all workflow lines.
    pub fn format_summary(report: &CoverageReport) -> String {
        let rows = [
            ("Total workflows:", report.workflows.len()),
            ("Standard nodes:", report.count(CoverageStatus::Ok)),
            ("Complete coverage:", report.count(CoverageStatus::Complete)),
            ("Incomplete coverage:", report.count(CoverageStatus::Incomplete)),
            ("Errors:", report.errors()),
        ];

        let mut out = String::new();
        for (title, value) in rows {
            out.push_str(&format!("{:<24} {}\n", title, value));
        }
        out.push_str(&format!(
            "\n{:<24} {:.1}%",
            "Overall coverage:",
            report.coverage_percent()
        ));
        out
    }
}
