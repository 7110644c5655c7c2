//! Serde representation of `testcatalog.json`.
//!
//! Per-module catalogs are read as [`CatalogSections`]; anything else they carry
//! is ignored. The master document pairs those sections with metadata that is
//! stamped once when the document is created. Entry values in `classes`,
//! `bundles`, and `sharedEnvironments` stay as raw JSON because nothing here
//! depends on their shape. Every map keeps first-seen key order, so payloads
//! are written back exactly as they were read.

use crate::project::ProjectDescriptor;
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// The four mergeable sections of a test catalog.
pub struct CatalogSections {
    #[serde(default)]
    pub classes: Map<String, Value>,
    /// Package name to the class names it owns, in merge order.
    #[serde(default)]
    pub packages: IndexMap<String, Vec<String>>,
    #[serde(default)]
    pub bundles: Map<String, Value>,
    #[serde(default)]
    pub shared_environments: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Identification stamped on the master catalog.
pub struct CatalogMetadata {
    name: String,
    build: String,
    version: String,
    built: String,
}

impl CatalogMetadata {
    /// Stamp metadata for `project` at `now`.
    ///
    /// A missing or blank `build_job` falls back to [`default_build_job`].
    pub fn stamp(project: &ProjectDescriptor, build_job: Option<&str>, now: DateTime<Utc>) -> Self {
        let build = match build_job.map(str::trim) {
            Some(job) if !job.is_empty() => job.to_string(),
            _ => default_build_job(
                &project.group_id,
                &project.artifact_id,
                &project.version,
                now,
            ),
        };
        Self {
            name: project.display_name().to_string(),
            build,
            version: project.version.clone(),
            built: format_timestamp(now),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn build(&self) -> &str {
        &self.build
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn built(&self) -> &str {
        &self.built
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Master catalog assembled for an aggregator build.
pub struct TestCatalog {
    #[serde(flatten)]
    sections: CatalogSections,
    #[serde(flatten)]
    metadata: CatalogMetadata,
}

impl TestCatalog {
    /// Start an empty catalog; metadata is fixed from here on.
    pub fn new(metadata: CatalogMetadata) -> Self {
        Self {
            sections: CatalogSections::default(),
            metadata,
        }
    }

    pub fn sections(&self) -> &CatalogSections {
        &self.sections
    }

    pub fn metadata(&self) -> &CatalogMetadata {
        &self.metadata
    }

    pub(crate) fn sections_mut(&mut self) -> &mut CatalogSections {
        &mut self.sections
    }

    /// Render the catalog as pretty-printed JSON.
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing master test catalog")
    }
}

/// Build identifier used when none is supplied: `<group>:<artifact>:<version> - <timestamp>`.
pub fn default_build_job(
    group_id: &str,
    artifact_id: &str,
    version: &str,
    now: DateTime<Utc>,
) -> String {
    format!(
        "{group_id}:{artifact_id}:{version} - {}",
        format_timestamp(now)
    )
}

/// ISO-8601 UTC timestamp with a `Z` suffix and only the fractional digits needed.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Read and parse the sections of a per-module test catalog.
///
/// Missing sections are treated as empty; a section of the wrong JSON type is
/// a parse error.
pub fn load_catalog_from_path(path: &Path) -> Result<CatalogSections> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading test catalog {}", path.display()))?;
    let sections: CatalogSections = serde_json::from_str(&data)
        .with_context(|| format!("parsing test catalog {}", path.display()))?;
    Ok(sections)
}
