use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

use crate::project::GatherFilesConfig;

use super::result::AnalyzerQueryResult;

/// Per-invocation driver configuration.
///
/// `target_project_result` / `reference_project_result` let a prior run's
/// output be reused as input to a dependent analyzer; they are accepted in
/// canonical or wrapped JSON shape and unwound by [`unwrap_prior_result`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_project_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_project_path: Option<PathBuf>,
    pub gather_files_config: GatherFilesConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gather_files_config_reference: Option<GatherFilesConfig>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub skip_check_match_compatibility: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_project_result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_project_result: Option<Value>,
}

/// Unwind a prior result to the canonical `{queryOutput, analyzerMeta}` shape.
///
/// Serialized results may arrive wrapped in a single-key envelope (the shape
/// a report file stores them under); a value already carrying `analyzerMeta`
/// at the top level is taken as canonical.
pub fn unwrap_prior_result(value: &Value) -> Result<AnalyzerQueryResult> {
    if value.get("analyzerMeta").is_some() {
        return Ok(serde_json::from_value(value.clone())?);
    }

    if let Some(object) = value.as_object() {
        if object.len() == 1 {
            if let Some(inner) = object.values().next() {
                if inner.get("analyzerMeta").is_some() {
                    return Ok(serde_json::from_value(inner.clone())?);
                }
            }
        }
    }

    Err(anyhow!(
        "prior analyzer result carries no analyzerMeta envelope"
    ))
}
