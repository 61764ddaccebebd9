use pairscan::ast::AstDialect;
use pairscan::core::normalize::{finalize_result, rewrite_file_separators, sanitize_config};
use pairscan::core::{AnalyzerConfig, FileEntry, ProjectMeta, QueryOutput};
use serde_json::{json, Value};
use std::path::PathBuf;

fn meta_with_path(name: &str) -> ProjectMeta {
    ProjectMeta {
        name: name.to_string(),
        version: "1.0.0".to_string(),
        path: Some(PathBuf::from("/machine/specific/checkout")),
    }
}

#[test]
fn sanitize_drops_both_project_paths() {
    let config = AnalyzerConfig {
        target_project_path: Some(PathBuf::from("/a")),
        reference_project_path: Some(PathBuf::from("/b")),
        ..AnalyzerConfig::default()
    };

    let sanitized = sanitize_config(&config);
    assert_eq!(sanitized.target_project_path, None);
    assert_eq!(sanitized.reference_project_path, None);
}

#[test]
fn sanitize_drops_reference_result_first() {
    let config = AnalyzerConfig {
        target_project_result: Some(json!({"prior": "target"})),
        reference_project_result: Some(json!({"prior": "reference"})),
        ..AnalyzerConfig::default()
    };

    let sanitized = sanitize_config(&config);
    assert_eq!(sanitized.reference_project_result, None);
    assert_eq!(sanitized.target_project_result, Some(json!({"prior": "target"})));
}

#[test]
fn sanitize_drops_target_result_when_no_reference_result() {
    let config = AnalyzerConfig {
        target_project_result: Some(json!({"prior": "target"})),
        ..AnalyzerConfig::default()
    };

    let sanitized = sanitize_config(&config);
    assert_eq!(sanitized.target_project_result, None);
}

#[test]
fn rewrites_nested_file_keys_to_forward_slashes() {
    let value = json!({"deep": {"file": "a\\b\\c.js"}});
    let rewritten = rewrite_file_separators(value, '\\');
    assert_eq!(rewritten, json!({"deep": {"file": "a/b/c.js"}}));
}

#[test]
fn leaves_other_keys_untouched() {
    let value = json!({"other": "a\\b", "file": "x\\y.js"});
    let rewritten = rewrite_file_separators(value, '\\');
    assert_eq!(
        rewritten,
        json!({"other": "a\\b", "file": "x/y.js"})
    );
}

#[test]
fn rewrites_file_keys_inside_arrays() {
    let value = json!([{"file": "a\\b.js"}, {"nested": [{"file": "c\\d.js"}]}]);
    let rewritten = rewrite_file_separators(value, '\\');
    assert_eq!(
        rewritten,
        json!([{"file": "a/b.js"}, {"nested": [{"file": "c/d.js"}]}])
    );
}

#[test]
fn finalized_result_contains_no_machine_paths() {
    let config = AnalyzerConfig {
        target_project_path: Some(PathBuf::from("/machine/app")),
        reference_project_path: Some(PathBuf::from("/machine/dep")),
        ..AnalyzerConfig::default()
    };
    let target = meta_with_path("app");
    let reference = meta_with_path("dep-a");
    let output = QueryOutput::Entries(vec![FileEntry {
        file: "src/index.js".to_string(),
        meta: Value::Null,
        result: json!(["something"]),
        project: Some(meta_with_path("app")),
    }]);

    let result = finalize_result(
        "count-imports",
        AstDialect::Ecmascript,
        "abc123",
        Some(&target),
        Some(&reference),
        &config,
        output,
    );

    assert_eq!(result.analyzer_meta.configuration.target_project_path, None);
    assert_eq!(
        result.analyzer_meta.configuration.reference_project_path,
        None
    );
    assert_eq!(
        result.analyzer_meta.target_project.as_ref().unwrap().path,
        None
    );
    assert_eq!(
        result.analyzer_meta.reference_project.as_ref().unwrap().path,
        None
    );
    match &result.query_output {
        QueryOutput::Entries(entries) => {
            assert_eq!(entries[0].project.as_ref().unwrap().path, None);
        }
        other => panic!("expected entries, got {other:?}"),
    }

    let serialized = serde_json::to_string(&result).unwrap();
    assert!(!serialized.contains("/machine/"));
}

#[test]
fn skip_reason_serializes_as_sentinel_string() {
    let result = finalize_result(
        "match-imports",
        AstDialect::Ecmascript,
        "abc123",
        None,
        None,
        &AnalyzerConfig::default(),
        QueryOutput::Skipped(pairscan::core::SkipReason::NoDependency),
    );

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["queryOutput"], json!("[no-dependency]"));
}
