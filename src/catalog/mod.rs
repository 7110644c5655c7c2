//! Test catalog resolution and merging.
//!
//! `identity` names dependencies and the sibling artifacts they may publish,
//! `repository` resolves those artifacts, `model` is the catalog document, and
//! `merge` folds per-module catalogs into the master.

pub mod identity;
pub mod merge;
pub mod model;
pub mod repository;

pub use identity::{
    ArtifactCoordinate, DependencyRef, DependencyScope, TESTCATALOG_CLASSIFIER,
    TESTCATALOG_EXTENSION,
};
pub use merge::merge_into;
pub use model::{
    CatalogMetadata, CatalogSections, TestCatalog, default_build_job, format_timestamp,
};
pub use repository::{
    ArtifactResolver, CatalogLocator, CatalogLookup, LocalRepository, ResolvedArtifact,
};

pub use model::load_catalog_from_path;
