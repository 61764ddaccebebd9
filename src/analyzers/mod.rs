pub mod imports;
pub mod match_imports;

use anyhow::Result;
use serde_json::Value;
use std::path::Path;

use crate::ast::{AstDialect, FileAst};
use crate::core::result::ProjectMeta;
use crate::project::ProjectInputData;

pub use imports::CountImportsAnalyzer;
pub use match_imports::MatchImportsAnalyzer;

/// Reference project data available during traversal: metadata always,
/// gathered files when a reference path was configured.
#[derive(Clone, Copy)]
pub struct ReferenceContext<'a> {
    pub meta: &'a ProjectMeta,
    pub files: Option<&'a ProjectInputData>,
}

/// Per-file invocation context handed to the analysis function.
#[derive(Clone, Copy)]
pub struct FileContext<'a> {
    pub source_text: &'a str,
    pub relative_path: &'a Path,
    pub project_meta: &'a ProjectMeta,
    pub reference: Option<ReferenceContext<'a>>,
}

/// What one per-file analysis produced. Entries with an empty `result` are
/// dropped from the query output.
#[derive(Debug, Clone)]
pub struct FileAnalysis {
    pub meta: Value,
    pub result: Value,
}

/// Capability set a pluggable analyzer implements; the driver supplies the
/// shared prepare/traverse/finalize orchestration.
pub trait Analyzer {
    fn name(&self) -> &str;

    fn required_ast_dialect(&self) -> AstDialect {
        AstDialect::default()
    }

    fn requires_reference(&self) -> bool {
        false
    }

    fn analyze_file(&self, ast: &FileAst, ctx: &FileContext<'_>) -> Result<FileAnalysis>;
}
