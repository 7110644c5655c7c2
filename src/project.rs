//! Build configuration for the aggregator project.
//!
//! The descriptor is a small JSON file carrying the project coordinates,
//! packaging type, build directory, and declared dependency list. Field names
//! follow the build tool's model (`groupId`, `artifactId`, ...).

use crate::catalog::DependencyRef;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Packaging type of a bundle-of-bundles build; only these get a merged catalog.
pub const AGGREGATOR_PACKAGING: &str = "galasa-obr";

const DEFAULT_PACKAGING: &str = "jar";
const DEFAULT_BUILD_DIRECTORY: &str = "target";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(default = "default_packaging")]
    pub packaging: String,
    #[serde(default = "default_build_directory")]
    pub build_directory: PathBuf,
    /// Declared dependencies, in declaration order.
    #[serde(default)]
    pub dependencies: Vec<DependencyRef>,
}

fn default_packaging() -> String {
    DEFAULT_PACKAGING.to_string()
}

fn default_build_directory() -> PathBuf {
    PathBuf::from(DEFAULT_BUILD_DIRECTORY)
}

impl ProjectDescriptor {
    /// Display name, falling back to the artifact id when none is declared.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(self.artifact_id.as_str())
    }

    pub fn is_aggregator(&self) -> bool {
        self.packaging == AGGREGATOR_PACKAGING
    }

    /// Dependencies that may publish a sibling test catalog, in declaration order.
    pub fn catalog_candidates(&self) -> impl Iterator<Item = &DependencyRef> {
        self.dependencies
            .iter()
            .filter(|dependency| dependency.is_catalog_candidate())
    }
}

/// Load a project descriptor.
///
/// A relative `buildDirectory` is anchored at the descriptor's own directory.
pub fn load_project_from_path(path: &Path) -> Result<ProjectDescriptor> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading project descriptor {}", path.display()))?;
    let mut project: ProjectDescriptor = serde_json::from_str(&data)
        .with_context(|| format!("parsing project descriptor {}", path.display()))?;
    if project.build_directory.is_relative() {
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        project.build_directory = base.join(&project.build_directory);
    }
    Ok(project)
}
