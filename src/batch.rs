//! Runs the generator over a whole registry snapshot.
use crate::error::{GenerationError, GraphError};
use crate::graph::GraphBuilder;
use crate::registry::{NodeDescriptor, RegistrySnapshot, SkippedEntry};
use crate::serializer::Serializer;
use crate::serializer::artifacts::{README_FILE, VARIABLES_FILE, WORKFLOW_FILE, readme, variables_tf};
use crate::slug::slugify;
use crate::topology::TopologyResolver;
use ahash::AHashSet;
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Filesystem capability used to persist generated artifacts.
pub trait ArtifactWriter: Send + Sync {
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Writes artifacts to the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWriter;

impl ArtifactWriter for FsWriter {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }
}

/// The three artifacts of one descriptor, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedWorkflow {
    /// `<slug(category)>/<slug(name)>`, relative to the output root.
    pub relative_dir: PathBuf,
    pub files: Vec<(&'static str, String)>,
}

impl RenderedWorkflow {
    pub fn file(&self, name: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, contents)| contents.as_str())
    }
}

/// A descriptor whose artifacts could not be produced.
#[derive(Debug)]
pub struct GenerationFailure {
    pub name: String,
    pub error: GenerationError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// Directories written, in registry order.
    pub generated: Vec<PathBuf>,
    /// Registry entries that never became descriptors.
    pub skipped: Vec<SkippedEntry>,
    pub failed: Vec<GenerationFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Generates the artifacts of every descriptor in a snapshot.
///
/// Descriptors are independent, so they are processed on a rayon pool. A failure
/// only affects its own descriptor: it is logged, recorded in the report and the
/// rest of the batch continues.
pub struct BatchRunner<W: ArtifactWriter> {
    output_dir: PathBuf,
    writer: W,
    resolver: TopologyResolver,
    serializer: Serializer,
    base_url: String,
    jobs: usize,
}

impl<W: ArtifactWriter> BatchRunner<W> {
    pub fn new(output_dir: impl Into<PathBuf>, writer: W) -> Self {
        Self {
            output_dir: output_dir.into(),
            writer,
            resolver: TopologyResolver::default(),
            serializer: Serializer::default(),
            base_url: "http://localhost:5678".to_string(),
            jobs: 0,
        }
    }

    pub fn with_resolver(mut self, resolver: TopologyResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_serializer(mut self, serializer: Serializer) -> Self {
        self.serializer = serializer;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Number of worker threads; 0 uses rayon's global pool.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Builds the artifacts of one descriptor without touching the filesystem.
    pub fn render(&self, descriptor: &NodeDescriptor) -> Result<RenderedWorkflow, GraphError> {
        let topology = self
            .resolver
            .resolve(&descriptor.node_type, descriptor.category);
        if topology.is_default() && !descriptor.is_trigger() && descriptor.outputs.len() > 1 {
            warn!(
                "'{}' declares {} outputs but '{}' has no registered topology; wiring a single output",
                descriptor.name,
                descriptor.outputs.len(),
                descriptor.node_type
            );
        }

        let graph = GraphBuilder::new(descriptor, &topology).build();
        graph.check_wiring(&topology)?;

        Ok(RenderedWorkflow {
            relative_dir: target_dir(descriptor),
            files: vec![
                (WORKFLOW_FILE, self.serializer.serialize(&graph, descriptor)),
                (VARIABLES_FILE, variables_tf(&self.base_url)),
                (README_FILE, readme(descriptor, &topology)),
            ],
        })
    }

    pub fn run(&self, snapshot: &RegistrySnapshot) -> BatchReport {
        let skipped: Vec<SkippedEntry> = snapshot.skipped().cloned().collect();
        let descriptors: Vec<&NodeDescriptor> = snapshot.descriptors().collect();
        info!(
            descriptors = descriptors.len(),
            skipped = skipped.len(),
            output = %self.output_dir.display(),
            "generating node workflows"
        );

        // Two descriptors must never share a directory; later ones lose.
        let mut claimed = AHashSet::new();
        let duplicate: Vec<bool> = descriptors
            .iter()
            .map(|d| !claimed.insert(target_dir(d)))
            .collect();

        let generate = |(descriptor, duplicate): (&&NodeDescriptor, &bool)| {
            let result = if *duplicate {
                Err(GenerationError::DuplicateTarget(
                    self.output_dir.join(target_dir(descriptor)),
                ))
            } else {
                self.generate(descriptor)
            };
            result.map_err(|error| {
                warn!("Failed to generate {}: {}", descriptor.name, error);
                GenerationFailure {
                    name: descriptor.name.clone(),
                    error,
                }
            })
        };

        let results: Vec<Result<PathBuf, GenerationFailure>> = match self.pool() {
            Some(pool) => pool.install(|| {
                descriptors.par_iter().zip(duplicate.par_iter()).map(generate).collect()
            }),
            None => descriptors.par_iter().zip(duplicate.par_iter()).map(generate).collect(),
        };

        let mut report = BatchReport {
            skipped,
            ..BatchReport::default()
        };
        for result in results {
            match result {
                Ok(dir) => report.generated.push(dir),
                Err(failure) => report.failed.push(failure),
            }
        }

        info!(
            generated = report.generated.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "generation complete"
        );
        report
    }

    fn generate(&self, descriptor: &NodeDescriptor) -> Result<PathBuf, GenerationError> {
        if slugify(&descriptor.name).is_empty() {
            return Err(GenerationError::EmptySlug(descriptor.name.clone()));
        }
        let rendered = self.render(descriptor)?;
        let dir = self.output_dir.join(&rendered.relative_dir);

        self.writer
            .create_dir_all(&dir)
            .map_err(|source| GenerationError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        for (name, contents) in &rendered.files {
            let path = dir.join(name);
            self.writer
                .write_file(&path, contents)
                .map_err(|source| GenerationError::WriteFile { path, source })?;
        }

        debug!(dir = %dir.display(), "generated");
        Ok(dir)
    }

    fn pool(&self) -> Option<rayon::ThreadPool> {
        if self.jobs == 0 {
            return None;
        }
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| warn!("Falling back to the global thread pool: {}", e))
            .ok()
    }
}

/// `<slug(category)>/<slug(name)>` for a descriptor.
pub fn target_dir(descriptor: &NodeDescriptor) -> PathBuf {
    Path::new(&slugify(descriptor.category.as_str())).join(slugify(&descriptor.name))
}
