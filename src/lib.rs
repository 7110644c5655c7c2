//! Test catalog aggregation for bundle-of-bundles builds.
//!
//! Every module of a test build may publish a `testcatalog.json` next to its
//! jar, describing its test classes, packages, bundles, and shared
//! environments. An aggregator build (`galasa-obr` packaging) uses this crate
//! to find those sibling catalogs for its compile-scope dependencies and fold
//! them into one master catalog, in dependency order.
//!
//! The pieces the build tool normally supplies sit behind small seams:
//! [`ProjectDescriptor`] for build configuration, [`ArtifactResolver`] for
//! repository access, and [`ArtifactSink`] for registering the output.

pub mod aggregate;
pub mod attach;
pub mod catalog;
pub mod project;
pub mod telemetry;

pub use aggregate::{
    MERGE_FAILURE, MergeOutcome, MergeRequest, TESTCATALOG_FILE, merge_test_catalogs,
};
pub use attach::{ArtifactSink, AttachedArtifact, JsonLinesSink};
pub use catalog::{
    ArtifactCoordinate, ArtifactResolver, CatalogLocator, CatalogLookup, CatalogMetadata,
    CatalogSections, DependencyRef, DependencyScope, LocalRepository, ResolvedArtifact,
    TestCatalog, default_build_job, load_catalog_from_path, merge_into,
};
pub use project::{AGGREGATOR_PACKAGING, ProjectDescriptor, load_project_from_path};
