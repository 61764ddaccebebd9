use serde_json::Value;

use crate::ast::AstDialect;

use super::config::AnalyzerConfig;
use super::result::{AnalyzerMeta, AnalyzerQueryResult, FileEntry, ProjectMeta, QueryOutput};

/// Configuration as it may appear in a result: both project paths removed
/// unconditionally, and at most one embedded prior result kept —
/// `referenceProjectResult` is dropped when present, else
/// `targetProjectResult`.
pub fn sanitize_config(config: &AnalyzerConfig) -> AnalyzerConfig {
    let mut sanitized = config.clone();
    sanitized.target_project_path = None;
    sanitized.reference_project_path = None;
    if sanitized.reference_project_result.is_some() {
        sanitized.reference_project_result = None;
    } else {
        sanitized.target_project_result = None;
    }
    sanitized
}

/// Strip the machine-specific path from any nested `project` object carried
/// by output entries.
fn strip_entry_paths(output: QueryOutput) -> QueryOutput {
    match output {
        QueryOutput::Entries(entries) => QueryOutput::Entries(
            entries
                .into_iter()
                .map(|entry| FileEntry {
                    project: entry.project.map(|project| project.without_path()),
                    ..entry
                })
                .collect(),
        ),
        skipped => skipped,
    }
}

/// Rewrite every string value held directly under a key literally named
/// `file`, at any nesting depth, to forward-slash form. All other keys are
/// left untouched.
pub fn rewrite_file_separators(value: Value, separator: char) -> Value {
    match value {
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(key, field)| match field {
                    Value::String(text) if key == "file" => {
                        (key, Value::String(text.replace(separator, "/")))
                    }
                    other => (key, rewrite_file_separators(other, separator)),
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| rewrite_file_separators(item, separator))
                .collect(),
        ),
        other => other,
    }
}

/// Enforce forward-slash path form across the output on platforms whose
/// native separator is not `/`.
fn normalize_separators(output: QueryOutput) -> QueryOutput {
    let separator = std::path::MAIN_SEPARATOR;
    if separator == '/' {
        return output;
    }
    match output {
        QueryOutput::Entries(entries) => QueryOutput::Entries(
            entries
                .into_iter()
                .map(|entry| FileEntry {
                    file: entry.file.replace(separator, "/"),
                    meta: rewrite_file_separators(entry.meta, separator),
                    result: rewrite_file_separators(entry.result, separator),
                    project: entry.project,
                })
                .collect(),
        ),
        skipped => skipped,
    }
}

/// Build the canonical, sanitized result from raw traversal output and
/// analyzer identity. Constructs a new value; nothing is mutated in place.
#[allow(clippy::too_many_arguments)]
pub fn finalize_result(
    analyzer_name: &str,
    required_ast_dialect: AstDialect,
    identifier: &str,
    target_project: Option<&ProjectMeta>,
    reference_project: Option<&ProjectMeta>,
    config: &AnalyzerConfig,
    query_output: QueryOutput,
) -> AnalyzerQueryResult {
    let query_output = normalize_separators(strip_entry_paths(query_output));

    AnalyzerQueryResult {
        query_output,
        analyzer_meta: AnalyzerMeta {
            name: analyzer_name.to_string(),
            required_ast_dialect,
            identifier: identifier.to_string(),
            target_project: target_project.map(ProjectMeta::without_path),
            reference_project: reference_project.map(ProjectMeta::without_path),
            configuration: sanitize_config(config),
            from_cache: false,
        },
    }
}
