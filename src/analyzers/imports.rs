use anyhow::Result;
use serde_json::{json, Value};
use tree_sitter::Node as TSNode;

use crate::ast::{extract_text, find_child_by_kind, find_children_by_kind, FileAst};

use super::{Analyzer, FileAnalysis, FileContext};

/// One import-like statement found in a file.
#[derive(Debug, Clone)]
pub struct ImportRecord {
    pub specifier: String,
    pub line: usize,
    pub kind: ImportKind,
    pub bindings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Import,
    Require,
}

impl ImportKind {
    fn as_str(self) -> &'static str {
        match self {
            ImportKind::Import => "import",
            ImportKind::Require => "require",
        }
    }
}

impl ImportRecord {
    pub fn to_value(&self) -> Value {
        json!({
            "specifier": self.specifier,
            "line": self.line,
            "kind": self.kind.as_str(),
            "bindings": self.bindings,
        })
    }
}

fn unquote(text: &str) -> String {
    text.trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .to_string()
}

fn import_bindings(import_node: &TSNode, source: &str) -> Vec<String> {
    let mut bindings = Vec::new();

    let Some(clause) = find_child_by_kind(import_node, "import_clause") else {
        return bindings;
    };

    let mut cursor = clause.walk();
    for child in clause.children(&mut cursor) {
        match child.kind() {
            "identifier" => bindings.push(extract_text(&child, source).to_string()),
            "named_imports" => {
                for specifier in find_children_by_kind(&child, "import_specifier") {
                    if let Some(name) = find_child_by_kind(&specifier, "identifier") {
                        bindings.push(extract_text(&name, source).to_string());
                    }
                }
            }
            "namespace_import" => {
                if let Some(name) = find_child_by_kind(&child, "identifier") {
                    bindings.push(extract_text(&name, source).to_string());
                }
            }
            _ => {}
        }
    }

    bindings
}

fn require_record(declaration: &TSNode, source: &str) -> Option<ImportRecord> {
    for declarator in find_children_by_kind(declaration, "variable_declarator") {
        let Some(call) = find_child_by_kind(&declarator, "call_expression") else {
            continue;
        };
        let callee = call.child(0)?;
        if extract_text(&callee, source) != "require" {
            continue;
        }
        let arguments = find_child_by_kind(&call, "arguments")?;
        let argument = find_child_by_kind(&arguments, "string")?;

        let bindings = find_child_by_kind(&declarator, "identifier")
            .map(|name| vec![extract_text(&name, source).to_string()])
            .unwrap_or_default();

        return Some(ImportRecord {
            specifier: unquote(extract_text(&argument, source)),
            line: declaration.start_position().row + 1,
            kind: ImportKind::Require,
            bindings,
        });
    }
    None
}

/// Collect top-level `import` declarations and `require()` assignments in
/// source order.
pub fn collect_imports(ast: &FileAst, source: &str) -> Vec<ImportRecord> {
    let root = ast.root();
    let mut imports = Vec::new();
    let mut cursor = root.walk();

    for child in root.children(&mut cursor) {
        match child.kind() {
            "import_statement" => {
                if let Some(source_node) = find_child_by_kind(&child, "string") {
                    imports.push(ImportRecord {
                        specifier: unquote(extract_text(&source_node, source)),
                        line: child.start_position().row + 1,
                        kind: ImportKind::Import,
                        bindings: import_bindings(&child, source),
                    });
                }
            }
            "lexical_declaration" | "variable_declaration" => {
                if let Some(record) = require_record(&child, source) {
                    imports.push(record);
                }
            }
            _ => {}
        }
    }

    imports
}

/// Lists every import and `require()` specifier per file. Files without
/// imports yield an empty result and are dropped from the output.
pub struct CountImportsAnalyzer;

impl CountImportsAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CountImportsAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for CountImportsAnalyzer {
    fn name(&self) -> &str {
        "count-imports"
    }

    fn analyze_file(&self, ast: &FileAst, ctx: &FileContext<'_>) -> Result<FileAnalysis> {
        let imports = collect_imports(ast, ctx.source_text);

        Ok(FileAnalysis {
            meta: json!({ "importCount": imports.len() }),
            result: Value::Array(imports.iter().map(ImportRecord::to_value).collect()),
        })
    }
}
