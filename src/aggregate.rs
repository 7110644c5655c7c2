//! The merge step run when an aggregator build is packaged.
//!
//! A run either exits early (skip flag, non-aggregator packaging) without
//! touching the filesystem, or walks the declared dependencies in order,
//! folds every sibling test catalog it can find into a fresh master catalog,
//! writes `testcatalog.json`, and attaches it. Any failure after the early
//! exits aborts the run and is reported under a single message.

use crate::attach::ArtifactSink;
use crate::catalog::{
    ArtifactResolver, CatalogLocator, CatalogLookup, CatalogMetadata, TESTCATALOG_CLASSIFIER,
    TESTCATALOG_EXTENSION, TestCatalog, merge_into,
};
use crate::project::{AGGREGATOR_PACKAGING, ProjectDescriptor};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// File name of the merged catalog inside the output directory.
pub const TESTCATALOG_FILE: &str = "testcatalog.json";
/// Context attached to every failure of a merge run.
pub const MERGE_FAILURE: &str = "Problem merging the test catalog";

/// Inputs for one merge run.
pub struct MergeRequest<'a> {
    pub project: &'a ProjectDescriptor,
    pub output_dir: &'a Path,
    pub skip: bool,
    /// Build identifier override; blank counts as unset.
    pub build_job: Option<&'a str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The skip flag was set.
    Skipped,
    /// The project is not an aggregator build.
    NotApplicable,
    /// The master catalog was written and attached.
    Merged { path: PathBuf, catalogs: usize },
}

/// Merge the test catalogs of `request.project`'s dependencies.
///
/// `now` stamps the catalog's `built` field and, absent an override, its build
/// identifier.
pub fn merge_test_catalogs(
    request: &MergeRequest<'_>,
    resolver: &dyn ArtifactResolver,
    sink: &mut dyn ArtifactSink,
    now: DateTime<Utc>,
) -> Result<MergeOutcome> {
    if request.skip {
        info!("Skipping Bundle Test Catalog build");
        return Ok(MergeOutcome::Skipped);
    }

    if !request.project.is_aggregator() {
        info!(
            packaging = %request.project.packaging,
            "Skipping Bundle Test Catalog merge, not a {AGGREGATOR_PACKAGING} project"
        );
        return Ok(MergeOutcome::NotApplicable);
    }

    let (path, catalogs) = run_merge(request, resolver, sink, now).context(MERGE_FAILURE)?;
    Ok(MergeOutcome::Merged { path, catalogs })
}

fn run_merge(
    request: &MergeRequest<'_>,
    resolver: &dyn ArtifactResolver,
    sink: &mut dyn ArtifactSink,
    now: DateTime<Utc>,
) -> Result<(PathBuf, usize)> {
    let output_dir = request.output_dir;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    let metadata = CatalogMetadata::stamp(request.project, request.build_job, now);
    let mut master = TestCatalog::new(metadata);
    let locator = CatalogLocator::new(resolver);

    let mut catalogs = 0;
    for dependency in request.project.catalog_candidates() {
        let CatalogLookup::Found(artifact) = locator.locate(dependency) else {
            continue;
        };
        let source = artifact.read_catalog()?;
        merge_into(&mut master, source);
        catalogs += 1;
    }

    let path = write_catalog(&master, output_dir)?;
    if let Err(err) = sink.attach(&path, TESTCATALOG_EXTENSION, TESTCATALOG_CLASSIFIER) {
        // Nothing is left behind when the output cannot be registered.
        if let Err(cleanup) = fs::remove_file(&path) {
            warn!(path = %path.display(), "failed to remove unattached catalog: {cleanup}");
        }
        return Err(err).with_context(|| format!("attaching {}", path.display()));
    }

    Ok((path, catalogs))
}

/// Write the catalog through a temp file so a failed write never leaves a
/// truncated `testcatalog.json`.
fn write_catalog(master: &TestCatalog, output_dir: &Path) -> Result<PathBuf> {
    let rendered = master.to_pretty_json()?;
    let target = output_dir.join(TESTCATALOG_FILE);

    let mut staged = NamedTempFile::new_in(output_dir)
        .with_context(|| format!("creating temp file in {}", output_dir.display()))?;
    staged
        .write_all(rendered.as_bytes())
        .with_context(|| format!("writing {}", target.display()))?;
    staged
        .flush()
        .with_context(|| format!("writing {}", target.display()))?;
    staged
        .persist(&target)
        .with_context(|| format!("persisting {}", target.display()))?;

    Ok(target)
}
