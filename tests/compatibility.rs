use pairscan::core::{check_compatibility, SkipReason};
use std::fs;
use std::path::Path;

fn write_manifest(dir: &Path, contents: &str) {
    fs::write(dir.join("package.json"), contents).unwrap();
}

#[test]
fn matching_version_range_is_compatible() {
    let target = tempfile::TempDir::new().unwrap();
    let reference = tempfile::TempDir::new().unwrap();
    write_manifest(
        target.path(),
        r#"{"name": "app", "version": "0.1.0", "dependencies": {"dep-a": "^1.0.0"}}"#,
    );
    write_manifest(
        reference.path(),
        r#"{"name": "dep-a", "version": "1.2.0"}"#,
    );

    let compatibility = check_compatibility(reference.path(), target.path()).unwrap();
    assert!(compatibility.compatible);
    assert_eq!(compatibility.reason, None);
}

#[test]
fn version_outside_range_yields_no_matched_version() {
    let target = tempfile::TempDir::new().unwrap();
    let reference = tempfile::TempDir::new().unwrap();
    write_manifest(
        target.path(),
        r#"{"name": "app", "version": "0.1.0", "dependencies": {"dep-a": "^1.0.0"}}"#,
    );
    write_manifest(
        reference.path(),
        r#"{"name": "dep-a", "version": "2.0.0"}"#,
    );

    let compatibility = check_compatibility(reference.path(), target.path()).unwrap();
    assert!(!compatibility.compatible);
    assert_eq!(compatibility.reason, Some(SkipReason::NoMatchedVersion));
}

#[test]
fn undeclared_reference_yields_no_dependency() {
    let target = tempfile::TempDir::new().unwrap();
    let reference = tempfile::TempDir::new().unwrap();
    write_manifest(
        target.path(),
        r#"{"name": "app", "version": "0.1.0", "dependencies": {"dep-a": "^1.0.0"}}"#,
    );
    write_manifest(
        reference.path(),
        r#"{"name": "dep-b", "version": "1.0.0"}"#,
    );

    let compatibility = check_compatibility(reference.path(), target.path()).unwrap();
    assert!(!compatibility.compatible);
    assert_eq!(compatibility.reason, Some(SkipReason::NoDependency));
}

#[test]
fn space_separated_range_is_compatible() {
    let target = tempfile::TempDir::new().unwrap();
    let reference = tempfile::TempDir::new().unwrap();
    write_manifest(
        target.path(),
        r#"{"name": "app", "version": "0.1.0", "dependencies": {"dep-a": ">=1.0.0 <2.0.0"}}"#,
    );
    write_manifest(
        reference.path(),
        r#"{"name": "dep-a", "version": "1.5.0"}"#,
    );

    let compatibility = check_compatibility(reference.path(), target.path()).unwrap();
    assert!(compatibility.compatible);
    assert_eq!(compatibility.reason, None);
}

#[test]
fn or_range_matches_either_alternative() {
    let target = tempfile::TempDir::new().unwrap();
    let reference = tempfile::TempDir::new().unwrap();
    write_manifest(
        target.path(),
        r#"{"name": "app", "version": "0.1.0", "dependencies": {"dep-a": "^1.0.0 || ^2.0.0"}}"#,
    );
    write_manifest(
        reference.path(),
        r#"{"name": "dep-a", "version": "2.3.0"}"#,
    );

    let compatibility = check_compatibility(reference.path(), target.path()).unwrap();
    assert!(compatibility.compatible);
}

#[test]
fn dev_dependencies_count_as_dependencies() {
    let target = tempfile::TempDir::new().unwrap();
    let reference = tempfile::TempDir::new().unwrap();
    write_manifest(
        target.path(),
        r#"{"name": "app", "version": "0.1.0", "devDependencies": {"dep-a": "~1.2.0"}}"#,
    );
    write_manifest(
        reference.path(),
        r#"{"name": "dep-a", "version": "1.2.3"}"#,
    );

    let compatibility = check_compatibility(reference.path(), target.path()).unwrap();
    assert!(compatibility.compatible);
}

#[test]
fn missing_manifest_is_a_fatal_error() {
    let target = tempfile::TempDir::new().unwrap();
    let reference = tempfile::TempDir::new().unwrap();
    write_manifest(
        reference.path(),
        r#"{"name": "dep-a", "version": "1.0.0"}"#,
    );

    assert!(check_compatibility(reference.path(), target.path()).is_err());
}

#[test]
fn unparseable_manifest_is_a_fatal_error() {
    let target = tempfile::TempDir::new().unwrap();
    let reference = tempfile::TempDir::new().unwrap();
    write_manifest(target.path(), "{ not json");
    write_manifest(
        reference.path(),
        r#"{"name": "dep-a", "version": "1.0.0"}"#,
    );

    assert!(check_compatibility(reference.path(), target.path()).is_err());
}
