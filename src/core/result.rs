use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

use crate::ast::AstDialect;

use super::config::AnalyzerConfig;

/// Logical identity of a project plus its on-disk location.
///
/// `path` is machine-specific: it never contributes to the identifier and is
/// stripped before a result leaves the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMeta {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub path: Option<PathBuf>,
}

impl ProjectMeta {
    /// Copy of this metadata with the machine-specific path removed.
    pub fn without_path(&self) -> ProjectMeta {
        ProjectMeta {
            name: self.name.clone(),
            version: self.version.clone(),
            path: None,
        }
    }
}

/// Reason a target/reference pair was skipped without analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    #[serde(rename = "[no-dependency]")]
    NoDependency,
    #[serde(rename = "[no-matched-version]")]
    NoMatchedVersion,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::NoDependency => "[no-dependency]",
            SkipReason::NoMatchedVersion => "[no-matched-version]",
        }
    }
}

/// One analyzed file: root-relative path, analyzer metadata and payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub file: String,
    #[serde(skip_serializing_if = "Value::is_null", default)]
    pub meta: Value,
    pub result: Value,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub project: Option<ProjectMeta>,
}

/// Either the ordered per-file entries, or a sentinel string for a pair that
/// was skipped as incompatible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryOutput {
    Skipped(SkipReason),
    Entries(Vec<FileEntry>),
}

/// Analyzer identity and sanitized configuration attached to every result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerMeta {
    pub name: String,
    pub required_ast_dialect: AstDialect,
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub target_project: Option<ProjectMeta>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reference_project: Option<ProjectMeta>,
    pub configuration: AnalyzerConfig,
    #[serde(
        rename = "__fromCache",
        skip_serializing_if = "is_false",
        default
    )]
    pub from_cache: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// The canonical result shape, also the persisted cache entry format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerQueryResult {
    pub query_output: QueryOutput,
    pub analyzer_meta: AnalyzerMeta,
}

/// Entries whose result carries no information are dropped from the output.
pub fn is_empty_result(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}
