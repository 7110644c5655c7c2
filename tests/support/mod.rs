use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;
use testcatalog::{DependencyRef, LocalRepository, ProjectDescriptor};

pub const GROUP: &str = "dev.example.tests";
pub const VERSION: &str = "0.3.0";

/// Throwaway local artifact repository.
pub struct RepoFixture {
    dir: TempDir,
    repository: LocalRepository,
}

impl RepoFixture {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("failed to allocate repository dir")?;
        let repository = LocalRepository::new(dir.path());
        Ok(Self { dir, repository })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn repository(&self) -> &LocalRepository {
        &self.repository
    }

    /// Publish `catalog` as the sibling test catalog of `dependency`.
    pub fn publish(&self, dependency: &DependencyRef, catalog: &Value) -> Result<PathBuf> {
        self.publish_raw(dependency, &serde_json::to_string_pretty(catalog)?)
    }

    pub fn publish_raw(&self, dependency: &DependencyRef, contents: &str) -> Result<PathBuf> {
        let path = self
            .repository
            .artifact_path(&dependency.sibling_catalog());
        let parent = path.parent().context("artifact path has no parent")?;
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

pub fn dependency(artifact_id: &str) -> DependencyRef {
    dependency_with(artifact_id, "compile", "jar")
}

pub fn dependency_with(artifact_id: &str, scope: &str, kind: &str) -> DependencyRef {
    serde_json::from_value(json!({
        "groupId": GROUP,
        "artifactId": artifact_id,
        "version": VERSION,
        "scope": scope,
        "type": kind,
    }))
    .expect("valid dependency fixture")
}

pub fn project(packaging: &str, dependencies: Vec<DependencyRef>) -> ProjectDescriptor {
    ProjectDescriptor {
        name: Some("Example Test OBR".to_string()),
        group_id: "dev.example".to_string(),
        artifact_id: "example.obr".to_string(),
        version: "1.4.0".to_string(),
        packaging: packaging.to_string(),
        build_directory: PathBuf::from("target"),
        dependencies,
    }
}

pub fn aggregator(dependencies: Vec<DependencyRef>) -> ProjectDescriptor {
    project("galasa-obr", dependencies)
}

pub fn read_json(path: &Path) -> Result<Value> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}

pub fn merge_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_merge-testcatalog"))
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}
