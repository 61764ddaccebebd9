use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::core::result::ProjectMeta;

/// The slice of `package.json` this system cares about.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

/// Read and parse the manifest at a project root. Missing or unparseable
/// manifests are fatal.
pub fn read_manifest(project_root: &Path) -> Result<PackageManifest> {
    let manifest_path = project_root.join("package.json");
    let raw = fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read manifest {}", manifest_path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse manifest {}", manifest_path.display()))
}

/// Resolves a filesystem path to project metadata.
pub trait ProjectMetaProvider {
    fn get_project_meta(&self, path: &Path) -> Result<ProjectMeta>;
}

/// Metadata provider backed by the project's `package.json`.
pub struct ManifestMetaProvider;

impl ManifestMetaProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ManifestMetaProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectMetaProvider for ManifestMetaProvider {
    fn get_project_meta(&self, path: &Path) -> Result<ProjectMeta> {
        let manifest = read_manifest(path)?;
        Ok(ProjectMeta {
            name: manifest.name,
            version: manifest.version,
            path: Some(path.to_path_buf()),
        })
    }
}
