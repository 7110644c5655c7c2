use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Classifier carried by every sibling test catalog artifact.
pub const TESTCATALOG_CLASSIFIER: &str = "testcatalog";
/// Extension (and attachment type) of a test catalog artifact.
pub const TESTCATALOG_EXTENSION: &str = "json";

const ELIGIBLE_TYPE: &str = "jar";

/// Full address of one artifact in a repository.
///
/// Rendered as `group:artifact:extension:classifier:version` so log lines
/// name the exact file that was requested.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ArtifactCoordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub classifier: Option<String>,
    pub extension: String,
    pub version: String,
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}",
            self.group_id,
            self.artifact_id,
            self.extension,
            self.classifier.as_deref().unwrap_or(""),
            self.version
        )
    }
}

/// Scope a dependency is declared under.
///
/// Known variants keep comparisons cheap; `Other` preserves scopes this crate
/// does not know about so they are filtered out rather than rejected.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum DependencyScope {
    #[default]
    Compile,
    Provided,
    Runtime,
    Test,
    System,
    Import,
    Other(String),
}

/// One entry of the aggregator build's declared dependency list.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyRef {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(default)]
    pub scope: DependencyScope,
    #[serde(rename = "type", default = "default_dependency_type")]
    pub kind: String,
}

fn default_dependency_type() -> String {
    ELIGIBLE_TYPE.to_string()
}

impl DependencyRef {
    /// Only direct compile-scope archive dependencies can carry a test catalog.
    pub fn is_catalog_candidate(&self) -> bool {
        self.scope == DependencyScope::Compile && self.kind == ELIGIBLE_TYPE
    }

    /// Coordinate of the `testcatalog`/`json` artifact published next to this dependency.
    pub fn sibling_catalog(&self) -> ArtifactCoordinate {
        ArtifactCoordinate {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
            classifier: Some(TESTCATALOG_CLASSIFIER.to_string()),
            extension: TESTCATALOG_EXTENSION.to_string(),
            version: self.version.clone(),
        }
    }
}

impl Serialize for DependencyScope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DependencyScope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

impl DependencyScope {
    pub fn as_str(&self) -> &str {
        match self {
            DependencyScope::Compile => "compile",
            DependencyScope::Provided => "provided",
            DependencyScope::Runtime => "runtime",
            DependencyScope::Test => "test",
            DependencyScope::System => "system",
            DependencyScope::Import => "import",
            DependencyScope::Other(value) => value.as_str(),
        }
    }

    fn from_str(value: &str) -> Self {
        match value {
            "compile" => DependencyScope::Compile,
            "provided" => DependencyScope::Provided,
            "runtime" => DependencyScope::Runtime,
            "test" => DependencyScope::Test,
            "system" => DependencyScope::System,
            "import" => DependencyScope::Import,
            other => DependencyScope::Other(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dependency(scope: &str, kind: &str) -> DependencyRef {
        serde_json::from_value(json!({
            "groupId": "dev.example",
            "artifactId": "tests.core",
            "version": "1.2.0",
            "scope": scope,
            "type": kind,
        }))
        .unwrap()
    }

    #[test]
    fn scope_parses_known_and_unknown() {
        let known: DependencyScope = serde_json::from_str("\"runtime\"").unwrap();
        assert_eq!(known, DependencyScope::Runtime);
        assert_eq!(serde_json::to_string(&known).unwrap(), "\"runtime\"");

        let custom: DependencyScope = serde_json::from_str("\"bundle\"").unwrap();
        assert_eq!(custom, DependencyScope::Other("bundle".to_string()));
        assert_eq!(serde_json::to_string(&custom).unwrap(), "\"bundle\"");
    }

    #[test]
    fn dependency_defaults_to_compile_jar() {
        let dep: DependencyRef = serde_json::from_value(json!({
            "groupId": "dev.example",
            "artifactId": "tests.core",
            "version": "1.2.0",
        }))
        .unwrap();
        assert_eq!(dep.scope, DependencyScope::Compile);
        assert_eq!(dep.kind, "jar");
        assert!(dep.is_catalog_candidate());
    }

    #[test]
    fn only_compile_jar_dependencies_are_candidates() {
        assert!(dependency("compile", "jar").is_catalog_candidate());
        assert!(!dependency("test", "jar").is_catalog_candidate());
        assert!(!dependency("runtime", "jar").is_catalog_candidate());
        assert!(!dependency("provided", "jar").is_catalog_candidate());
        assert!(!dependency("compile", "pom").is_catalog_candidate());
        assert!(!dependency("compile", "zip").is_catalog_candidate());
        assert!(!dependency("Compile", "jar").is_catalog_candidate());
    }

    #[test]
    fn sibling_catalog_keeps_identity_and_swaps_classifier() {
        let coordinate = dependency("compile", "jar").sibling_catalog();
        assert_eq!(coordinate.group_id, "dev.example");
        assert_eq!(coordinate.artifact_id, "tests.core");
        assert_eq!(coordinate.version, "1.2.0");
        assert_eq!(coordinate.classifier.as_deref(), Some("testcatalog"));
        assert_eq!(coordinate.extension, "json");
        assert_eq!(
            coordinate.to_string(),
            "dev.example:tests.core:json:testcatalog:1.2.0"
        );
    }
}
