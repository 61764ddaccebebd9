use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Filter configuration for project file discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GatherFilesConfig {
    pub extensions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowlist: Option<Vec<PathBuf>>,
}

impl Default for GatherFilesConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["js".to_string(), "mjs".to_string(), "cjs".to_string()],
            allowlist: None,
        }
    }
}

/// One discovered file with its source read into memory.
#[derive(Debug, Clone)]
pub struct ProjectFile {
    pub relative_path: PathBuf,
    pub source: String,
}

/// In-memory project input data: root plus discovered files in a stable
/// order (sorted by relative path).
#[derive(Debug, Clone, Default)]
pub struct ProjectInputData {
    pub root: PathBuf,
    pub files: Vec<ProjectFile>,
}

impl ProjectInputData {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Loads project input data for a root path and filter configuration.
pub trait FileGatherer {
    fn create_data_object(&self, root: &Path, config: &GatherFilesConfig)
        -> Result<ProjectInputData>;
}

/// Recursive filesystem gatherer skipping `node_modules` and hidden entries.
pub struct WalkdirGatherer;

impl WalkdirGatherer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WalkdirGatherer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_pruned(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .map(|name| {
            name.starts_with('.') || (entry.file_type().is_dir() && name == "node_modules")
        })
        .unwrap_or(false)
}

fn allowed(relative: &Path, allowlist: Option<&[PathBuf]>) -> bool {
    match allowlist {
        Some(prefixes) => prefixes.iter().any(|prefix| relative.starts_with(prefix)),
        None => true,
    }
}

impl FileGatherer for WalkdirGatherer {
    fn create_data_object(
        &self,
        root: &Path,
        config: &GatherFilesConfig,
    ) -> Result<ProjectInputData> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !is_pruned(entry))
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let matches_extension = entry
                .path()
                .extension()
                .and_then(|extension| extension.to_str())
                .map(|extension| {
                    config
                        .extensions
                        .iter()
                        .any(|candidate| candidate == extension)
                })
                .unwrap_or(false);
            if !matches_extension {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(root)
                .context("walked entry outside project root")?
                .to_path_buf();
            if !allowed(&relative, config.allowlist.as_deref()) {
                continue;
            }

            let source = fs::read_to_string(entry.path())
                .with_context(|| format!("failed to read {}", entry.path().display()))?;
            files.push(ProjectFile {
                relative_path: relative,
                source,
            });
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        Ok(ProjectInputData {
            root: root.to_path_buf(),
            files,
        })
    }
}
