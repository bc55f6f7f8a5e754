use clap::{Parser, Subcommand};
use nodewire::coverage::CoverageStatus;
use nodewire::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Generates port-covering test workflows for a node registry and checks their coverage
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one workflow directory per registry node
    Generate {
        /// Path to the registry snapshot JSON file
        #[arg(short, long, default_value = "data/n8n-nodes-registry.json")]
        registry: PathBuf,
        /// Output root for the generated tree (overrides the config file)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Optional TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Worker threads, 0 for one per CPU (overrides the config file)
        #[arg(short, long)]
        jobs: Option<usize>,
    },
    /// Check that every generated workflow covers its node's ports
    Validate {
        /// Root directory of the generated workflows
        #[arg(default_value = "examples/nodes")]
        dir: PathBuf,
        /// Optional TOML configuration file providing extra topologies
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Generate {
            registry,
            out,
            config,
            jobs,
        } => run_generate(registry, out, config, jobs),
        Command::Validate { dir, config } => run_validate(dir, config),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<PathBuf>) -> GeneratorConfig {
    match path {
        Some(path) => GeneratorConfig::from_file(&path).unwrap_or_else(|e| exit_with_error(&e.to_string())),
        None => GeneratorConfig::default(),
    }
}

fn run_generate(
    registry: PathBuf,
    out: Option<PathBuf>,
    config_path: Option<PathBuf>,
    jobs: Option<usize>,
) -> ExitCode {
    let total_start = Instant::now();
    let mut config = load_config(config_path);
    if let Some(out) = out {
        config.output_dir = out;
    }
    if let Some(jobs) = jobs {
        config.jobs = jobs;
    }

    let resolver = config
        .resolver()
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let snapshot = config
        .loader()
        .from_file(&registry)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    println!("Generating per-node workflow examples...\n");
    let runner = BatchRunner::new(config.output_dir.clone(), FsWriter)
        .with_resolver(resolver)
        .with_serializer(Serializer::new(config.serializer_options()))
        .with_base_url(config.provider.base_url.clone())
        .with_jobs(config.jobs);
    let report = runner.run(&snapshot);

    for failure in &report.failed {
        println!("  failed: {}: {}", failure.name, failure.error);
    }

    println!("\nGeneration complete!");
    println!("   Generated: {} node examples", report.generated.len());
    println!("   Skipped:   {}", report.skipped.len());
    println!("   Failed:    {}", report.failed.len());
    println!("\nExamples location: {}", config.output_dir.display());
    println!("Total time: {:?}", total_start.elapsed());

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run_validate(dir: PathBuf, config_path: Option<PathBuf>) -> ExitCode {
    let config = load_config(config_path);
    let resolver = config
        .resolver()
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    if !dir.is_dir() {
        exit_with_error(&format!("Nodes directory not found: {}", dir.display()));
    }

    println!("Validating node workflow test coverage\n");
    let report = CoverageScanner::new(resolver)
        .scan(&dir)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    println!("Found {} node workflows\n", report.workflows.len());

    for workflow in &report.workflows {
        println!("{}", CoverageFormatter::format_line(workflow));
    }

    println!("\n{}", "-".repeat(80));
    println!("\nCoverage Summary\n");
    println!("{}", CoverageFormatter::format_summary(&report));

    if report.is_passing() {
        println!("\nAll nodes have complete test coverage!");
        ExitCode::SUCCESS
    } else {
        println!(
            "\n{} workflow(s) are {}. Regenerate them with `nodewire-cli generate`.",
            report.count(CoverageStatus::Incomplete),
            CoverageStatus::Incomplete
        );
        ExitCode::FAILURE
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
