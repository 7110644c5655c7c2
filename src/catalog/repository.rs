//! Finds the sibling test catalog published next to a dependency.
//!
//! Resolution goes through an [`ArtifactResolver`], which may fail for any
//! reason. [`CatalogLocator`] folds every failure into
//! [`CatalogLookup::Absent`] so a dependency without a catalog never stops the
//! merge.

use crate::catalog::identity::{ArtifactCoordinate, DependencyRef};
use crate::catalog::model::{CatalogSections, load_catalog_from_path};
use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Turns an artifact coordinate into a readable file.
pub trait ArtifactResolver {
    fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<PathBuf>;
}

impl<F> ArtifactResolver for F
where
    F: Fn(&ArtifactCoordinate) -> Result<PathBuf>,
{
    fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<PathBuf> {
        self(coordinate)
    }
}

/// Artifact repository on the local filesystem.
///
/// Files live at
/// `<root>/<group as dirs>/<artifact>/<version>/<artifact>-<version>[-<classifier>].<extension>`.
#[derive(Clone, Debug)]
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where `coordinate` would be stored, whether or not it exists.
    pub fn artifact_path(&self, coordinate: &ArtifactCoordinate) -> PathBuf {
        let mut dir = self.root.clone();
        for segment in coordinate.group_id.split('.') {
            dir.push(segment);
        }
        dir.push(&coordinate.artifact_id);
        dir.push(&coordinate.version);

        let file_name = match coordinate.classifier.as_deref() {
            Some(classifier) if !classifier.is_empty() => format!(
                "{}-{}-{}.{}",
                coordinate.artifact_id, coordinate.version, classifier, coordinate.extension
            ),
            _ => format!(
                "{}-{}.{}",
                coordinate.artifact_id, coordinate.version, coordinate.extension
            ),
        };
        dir.join(file_name)
    }
}

impl ArtifactResolver for LocalRepository {
    fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<PathBuf> {
        let path = self.artifact_path(coordinate);
        if !path.is_file() {
            bail!(
                "Could not find artifact {coordinate} in {}",
                self.root.display()
            );
        }
        Ok(path)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A sibling catalog that resolved to a file.
pub struct ResolvedArtifact {
    pub coordinate: ArtifactCoordinate,
    pub path: PathBuf,
}

impl ResolvedArtifact {
    /// Read the catalog. Failures here are fatal to the merge.
    pub fn read_catalog(&self) -> Result<CatalogSections> {
        load_catalog_from_path(&self.path)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogLookup {
    Found(ResolvedArtifact),
    Absent,
}

/// Resolves sibling test catalogs for candidate dependencies.
pub struct CatalogLocator<'a> {
    resolver: &'a dyn ArtifactResolver,
}

impl<'a> CatalogLocator<'a> {
    pub fn new(resolver: &'a dyn ArtifactResolver) -> Self {
        Self { resolver }
    }

    /// Look up the test catalog for `dependency`.
    ///
    /// Callers filter to compile-scope `jar` dependencies first. A resolver
    /// error is logged and reported as `Absent`, with no distinction between a
    /// catalog that was never published and a repository failure.
    pub fn locate(&self, dependency: &DependencyRef) -> CatalogLookup {
        let coordinate = dependency.sibling_catalog();
        debug!(artifact = %coordinate, "resolving test catalog");
        match self.resolver.resolve(&coordinate) {
            Ok(path) => {
                info!(path = %path.display(), "Merging bundle test catalog {coordinate}");
                CatalogLookup::Found(ResolvedArtifact { coordinate, path })
            }
            Err(err) => {
                warn!(artifact = %coordinate, "{err:#}");
                CatalogLookup::Absent
            }
        }
    }
}
