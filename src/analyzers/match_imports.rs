use anyhow::{anyhow, Result};
use serde_json::{json, Value};

use crate::ast::{AstDialect, FileAst};

use super::imports::{collect_imports, ImportRecord};
use super::{Analyzer, FileAnalysis, FileContext};

/// Match analyzer: keeps only imports whose specifier resolves to the
/// reference package (exact name or `name/subpath`). Requires a reference
/// project and a passed compatibility gate.
pub struct MatchImportsAnalyzer {
    dialect: AstDialect,
}

impl MatchImportsAnalyzer {
    pub fn new() -> Self {
        Self {
            dialect: AstDialect::default(),
        }
    }

    pub fn with_dialect(dialect: AstDialect) -> Self {
        Self { dialect }
    }
}

impl Default for MatchImportsAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_package(specifier: &str, package_name: &str) -> bool {
    specifier == package_name
        || specifier
            .strip_prefix(package_name)
            .map(|rest| rest.starts_with('/'))
            .unwrap_or(false)
}

impl Analyzer for MatchImportsAnalyzer {
    fn name(&self) -> &str {
        "match-imports"
    }

    fn required_ast_dialect(&self) -> AstDialect {
        self.dialect
    }

    fn requires_reference(&self) -> bool {
        true
    }

    fn analyze_file(&self, ast: &FileAst, ctx: &FileContext<'_>) -> Result<FileAnalysis> {
        let reference = ctx
            .reference
            .ok_or_else(|| anyhow!("match-imports invoked without a reference project"))?;

        let imports = collect_imports(ast, ctx.source_text);
        let matched: Vec<&ImportRecord> = imports
            .iter()
            .filter(|record| matches_package(&record.specifier, &reference.meta.name))
            .collect();

        Ok(FileAnalysis {
            meta: json!({ "totalImports": imports.len() }),
            result: Value::Array(matched.iter().map(|record| record.to_value()).collect()),
        })
    }
}
