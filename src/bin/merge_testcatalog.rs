//! Merge the sibling test catalogs of an aggregator build's dependencies.
//!
//! Reads the project descriptor, resolves catalogs from a local artifact
//! repository, writes `testcatalog.json` to the output directory, and prints
//! one JSON line per attached output on stdout. Logs go to stderr.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use testcatalog::{
    JsonLinesSink, LocalRepository, MergeOutcome, MergeRequest, load_project_from_path,
    merge_test_catalogs, telemetry,
};
use tracing::info;

/// Merge dependency test catalogs into one master testcatalog.json
#[derive(Parser)]
#[command(name = "merge-testcatalog")]
#[command(version, about)]
struct Cli {
    /// Project descriptor of the aggregator build
    #[arg(long, env = "TESTCATALOG_PROJECT", default_value = "project.json")]
    project: PathBuf,

    /// Root of the local artifact repository holding dependency catalogs
    #[arg(long, env = "TESTCATALOG_REPOSITORY")]
    repository: PathBuf,

    /// Where testcatalog.json is written (default: the project's build directory)
    #[arg(long, env = "TESTCATALOG_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Skip the merge entirely
    #[arg(long, env = "TESTCATALOG_SKIP")]
    skip: bool,

    /// Build identifier recorded in the catalog (default: coordinates and time)
    #[arg(long, env = "TESTCATALOG_BUILD_JOB")]
    build_job: Option<String>,
}

fn main() {
    telemetry::init();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let project = load_project_from_path(&cli.project)?;
    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| project.build_directory.clone());

    let request = MergeRequest {
        project: &project,
        output_dir: &output_dir,
        skip: cli.skip,
        build_job: cli.build_job.as_deref(),
    };
    let repository = LocalRepository::new(&cli.repository);
    let mut sink = JsonLinesSink::new(io::stdout().lock());

    match merge_test_catalogs(&request, &repository, &mut sink, Utc::now())? {
        MergeOutcome::Merged { path, catalogs } => {
            info!(catalogs, "Wrote {}", path.display());
        }
        MergeOutcome::Skipped | MergeOutcome::NotApplicable => {}
    }
    Ok(())
}
