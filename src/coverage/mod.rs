//! Reads generated workflows back and checks that every required port is exercised.
use crate::error::AnalysisError;
use crate::registry::Category;
use crate::serializer::artifacts::WORKFLOW_FILE;
use crate::topology::TopologyResolver;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

mod analyzer;
mod report;
mod validator;

pub use analyzer::{AnalysisResult, analyze};
pub use report::CoverageFormatter;
pub use validator::{CoverageStatus, Validation, validate};

/// A directory holding a generated workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredWorkflow {
    pub dir: PathBuf,
    /// Name of the parent directory, normally the category slug.
    pub category: String,
    /// Name of the directory itself, normally the node slug.
    pub name: String,
}

impl DiscoveredWorkflow {
    pub fn workflow_file(&self) -> PathBuf {
        self.dir.join(WORKFLOW_FILE)
    }

    /// `category/name`, used in report lines.
    pub fn label(&self) -> String {
        format!("{}/{}", self.category, self.name)
    }
}

#[derive(Debug)]
pub enum WorkflowOutcome {
    Analyzed {
        analysis: AnalysisResult,
        validation: Validation,
    },
    Error(AnalysisError),
}

#[derive(Debug)]
pub struct WorkflowReport {
    pub workflow: DiscoveredWorkflow,
    pub outcome: WorkflowOutcome,
}

impl WorkflowReport {
    pub fn status(&self) -> Option<CoverageStatus> {
        match &self.outcome {
            WorkflowOutcome::Analyzed { validation, .. } => Some(validation.status),
            WorkflowOutcome::Error(_) => None,
        }
    }
}

/// The result of scanning a directory tree.
#[derive(Debug, Default)]
pub struct CoverageReport {
    pub workflows: Vec<WorkflowReport>,
}

impl CoverageReport {
    pub fn count(&self, status: CoverageStatus) -> usize {
        self.workflows
            .iter()
            .filter(|w| w.status() == Some(status))
            .count()
    }

    pub fn errors(&self) -> usize {
        self.workflows.iter().filter(|w| w.status().is_none()).count()
    }

    /// Workflows that produced a verdict; errors are excluded.
    pub fn analyzed(&self) -> usize {
        self.workflows.len() - self.errors()
    }

    /// Share of analyzed workflows that are `ok` or `complete`, in percent.
    ///
    /// An empty scan counts as fully covered.
    pub fn coverage_percent(&self) -> f64 {
        let analyzed = self.analyzed();
        if analyzed == 0 {
            return 100.0;
        }
        let covered = self
            .workflows
            .iter()
            .filter(|w| w.status().is_some_and(|s| s.is_covered()))
            .count();
        covered as f64 / analyzed as f64 * 100.0
    }

    pub fn is_passing(&self) -> bool {
        self.count(CoverageStatus::Incomplete) == 0
    }

    pub fn incomplete(&self) -> impl Iterator<Item = &WorkflowReport> {
        self.workflows
            .iter()
            .filter(|w| w.status() == Some(CoverageStatus::Incomplete))
    }
}

/// Discovers, analyzes and validates every workflow below a root directory.
#[derive(Debug, Clone, Default)]
pub struct CoverageScanner {
    resolver: TopologyResolver,
}

impl CoverageScanner {
    pub fn new(resolver: TopologyResolver) -> Self {
        Self { resolver }
    }

    pub fn scan(&self, root: impl AsRef<Path>) -> Result<CoverageReport, AnalysisError> {
        let workflows = discover_workflows(root.as_ref())?;
        let workflows = workflows
            .into_iter()
            .map(|workflow| {
                let outcome = self.check(&workflow);
                WorkflowReport { workflow, outcome }
            })
            .collect();
        Ok(CoverageReport { workflows })
    }

    /// Analyzes and validates already loaded workflow text.
    pub fn check_text(&self, text: &str) -> Result<(AnalysisResult, Validation), AnalysisError> {
        let analysis = analyze(text)?;
        // Files without a category header are validated as regular nodes.
        let category = analysis.category.unwrap_or(Category::Core);
        let topology = self.resolver.resolve(&analysis.node_type, category);
        let validation = validate(&analysis, &topology);
        Ok((analysis, validation))
    }

    fn check(&self, workflow: &DiscoveredWorkflow) -> WorkflowOutcome {
        let path = workflow.workflow_file();
        let result = fs::read_to_string(&path)
            .map_err(|source| AnalysisError::Io { path, source })
            .and_then(|text| self.check_text(&text));

        match result {
            Ok((analysis, validation)) => {
                debug!(workflow = %workflow.label(), status = %validation.status, "validated");
                WorkflowOutcome::Analyzed {
                    analysis,
                    validation,
                }
            }
            Err(e) => WorkflowOutcome::Error(e),
        }
    }
}

/// Finds every directory below `root` that contains a workflow file.
///
/// Recursion stops at such a directory. Results are sorted by path.
pub fn discover_workflows(root: &Path) -> Result<Vec<DiscoveredWorkflow>, AnalysisError> {
    let mut found = Vec::new();
    let entries = read_subdirs(root).map_err(|source| AnalysisError::Io {
        path: root.to_path_buf(),
        source,
    })?;
    for dir in entries {
        walk(&dir, &mut found);
    }
    Ok(found)
}

fn walk(dir: &Path, found: &mut Vec<DiscoveredWorkflow>) {
    if dir.join(WORKFLOW_FILE).is_file() {
        found.push(DiscoveredWorkflow {
            dir: dir.to_path_buf(),
            category: file_name(dir.parent()),
            name: file_name(Some(dir)),
        });
        return;
    }
    match read_subdirs(dir) {
        Ok(children) => children.iter().for_each(|child| walk(child, found)),
        Err(e) => warn!("Skipping unreadable directory '{}': {}", dir.display(), e),
    }
}

fn read_subdirs(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn file_name(path: Option<&Path>) -> String {
    path.and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
