use pairscan::core::{derive_identifier, AnalyzerConfig, ProjectMeta};
use pairscan::project::GatherFilesConfig;
use std::path::PathBuf;

fn meta(name: &str, version: &str, path: &str) -> ProjectMeta {
    ProjectMeta {
        name: name.to_string(),
        version: version.to_string(),
        path: Some(PathBuf::from(path)),
    }
}

#[test]
fn identical_requests_collide() {
    let target = meta("app", "1.0.0", "/home/a/app");
    let reference = meta("dep-a", "1.2.0", "/home/a/dep-a");
    let config = AnalyzerConfig::default();

    let first = derive_identifier(&target, Some(&reference), &config).unwrap();
    let second = derive_identifier(&target, Some(&reference), &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn identifier_is_path_independent() {
    let config_a = AnalyzerConfig {
        target_project_path: Some(PathBuf::from("/machine-one/checkout/app")),
        ..AnalyzerConfig::default()
    };
    let config_b = AnalyzerConfig {
        target_project_path: Some(PathBuf::from("/machine-two/elsewhere/app")),
        ..AnalyzerConfig::default()
    };

    let id_a = derive_identifier(&meta("app", "1.0.0", "/machine-one/checkout/app"), None, &config_a)
        .unwrap();
    let id_b = derive_identifier(&meta("app", "1.0.0", "/machine-two/elsewhere/app"), None, &config_b)
        .unwrap();
    assert_eq!(id_a, id_b);
}

#[test]
fn version_change_changes_identifier() {
    let config = AnalyzerConfig::default();
    let id_a = derive_identifier(&meta("app", "1.0.0", "/p"), None, &config).unwrap();
    let id_b = derive_identifier(&meta("app", "1.0.1", "/p"), None, &config).unwrap();
    assert_ne!(id_a, id_b);
}

#[test]
fn reference_presence_changes_identifier() {
    let config = AnalyzerConfig::default();
    let target = meta("app", "1.0.0", "/p");
    let with_reference =
        derive_identifier(&target, Some(&meta("dep-a", "1.0.0", "/q")), &config).unwrap();
    let without_reference = derive_identifier(&target, None, &config).unwrap();
    assert_ne!(with_reference, without_reference);
}

#[test]
fn configuration_change_changes_identifier() {
    let target = meta("app", "1.0.0", "/p");
    let default_config = AnalyzerConfig::default();
    let narrowed_config = AnalyzerConfig {
        gather_files_config: GatherFilesConfig {
            extensions: vec!["mjs".to_string()],
            allowlist: None,
        },
        ..AnalyzerConfig::default()
    };

    let id_a = derive_identifier(&target, None, &default_config).unwrap();
    let id_b = derive_identifier(&target, None, &narrowed_config).unwrap();
    assert_ne!(id_a, id_b);
}
