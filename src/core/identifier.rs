use anyhow::Result;
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::config::AnalyzerConfig;
use super::result::ProjectMeta;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdentifierSeed<'a> {
    target_project: ProjectIdentity<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_project: Option<ProjectIdentity<'a>>,
    analyzer_config: AnalyzerConfig,
}

#[derive(Serialize)]
struct ProjectIdentity<'a> {
    name: &'a str,
    version: &'a str,
}

impl<'a> ProjectIdentity<'a> {
    fn of(meta: &'a ProjectMeta) -> Self {
        Self {
            name: &meta.name,
            version: &meta.version,
        }
    }
}

/// Derive the deterministic cache identifier for an analysis request.
///
/// The identifier is a pure function of logical content: project names and
/// versions plus the analyzer configuration with both filesystem paths
/// removed. Two logically identical requests on different machines or
/// checkouts collide; any difference in project identity or configuration
/// does not.
pub fn derive_identifier(
    target: &ProjectMeta,
    reference: Option<&ProjectMeta>,
    config: &AnalyzerConfig,
) -> Result<String> {
    let mut portable_config = config.clone();
    portable_config.target_project_path = None;
    portable_config.reference_project_path = None;

    let seed = IdentifierSeed {
        target_project: ProjectIdentity::of(target),
        reference_project: reference.map(ProjectIdentity::of),
        analyzer_config: portable_config,
    };

    // serde_json object keys are BTree-ordered, so the encoding is stable.
    let encoded = serde_json::to_string(&seed)?;

    let mut hasher = Sha256::new();
    hasher.update(encoded.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
