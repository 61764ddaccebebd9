use anyhow::{Context, Result};
use semver::{Version, VersionReq};
use std::path::Path;

use crate::project::meta::read_manifest;

use super::result::SkipReason;

/// Outcome of the compatibility precondition between a target project and a
/// reference project it is supposed to depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compatibility {
    pub compatible: bool,
    pub reason: Option<SkipReason>,
}

impl Compatibility {
    fn ok() -> Self {
        Self {
            compatible: true,
            reason: None,
        }
    }

    fn failed(reason: SkipReason) -> Self {
        Self {
            compatible: false,
            reason: Some(reason),
        }
    }
}

/// Decide whether the reference project is a real, version-compatible
/// dependency of the target project.
///
/// Reads both manifests; a missing or unparseable manifest is a fatal error,
/// not a compatibility failure. The reference's declared name must appear in
/// the target's combined dependency set (regular + dev), and the target's
/// declared range must be satisfied by the reference's own version.
pub fn check_compatibility(reference_path: &Path, target_path: &Path) -> Result<Compatibility> {
    let reference = read_manifest(reference_path)?;
    let target = read_manifest(target_path)?;

    let declared_range = match target
        .dependencies
        .get(&reference.name)
        .or_else(|| target.dev_dependencies.get(&reference.name))
    {
        Some(range) => range,
        None => return Ok(Compatibility::failed(SkipReason::NoDependency)),
    };

    let reference_version = Version::parse(&reference.version).with_context(|| {
        format!(
            "invalid version '{}' in manifest of '{}'",
            reference.version, reference.name
        )
    })?;

    match parse_range(declared_range) {
        Some(alternatives)
            if alternatives
                .iter()
                .any(|range| range.matches(&reference_version)) =>
        {
            Ok(Compatibility::ok())
        }
        _ => Ok(Compatibility::failed(SkipReason::NoMatchedVersion)),
    }
}

/// Parse an npm-style range into its `||` alternatives. Catch-all specifiers
/// match anything; a range that is not semver (git URLs, tags) can never
/// match a concrete version.
///
/// npm separates ANDed comparators with spaces (`">=1.0.0 <2.0.0"`) and
/// supports hyphen ranges (`"1.2.3 - 2.3.4"`); both are translated to the
/// comma-separated comparator form `VersionReq` expects.
fn parse_range(range: &str) -> Option<Vec<VersionReq>> {
    let trimmed = range.trim();
    if trimmed.is_empty() || trimmed == "*" || trimmed == "latest" {
        return Some(vec![VersionReq::STAR]);
    }

    let alternatives: Vec<VersionReq> = trimmed
        .split("||")
        .filter_map(parse_alternative)
        .collect();
    if alternatives.is_empty() {
        None
    } else {
        Some(alternatives)
    }
}

fn parse_alternative(alternative: &str) -> Option<VersionReq> {
    let trimmed = alternative.trim();
    if trimmed.is_empty() || trimmed == "*" || trimmed == "latest" {
        return Some(VersionReq::STAR);
    }

    if let Some((low, high)) = trimmed.split_once(" - ") {
        return VersionReq::parse(&format!(">={}, <={}", low.trim(), high.trim())).ok();
    }

    let comma_form = trimmed.split_whitespace().collect::<Vec<_>>().join(", ");
    VersionReq::parse(&comma_form).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_matches(range: &str, version: &str) -> bool {
        let version = Version::parse(version).unwrap();
        parse_range(range)
            .map(|alternatives| alternatives.iter().any(|req| req.matches(&version)))
            .unwrap_or(false)
    }

    #[test]
    fn catch_all_ranges_match_everything() {
        for range in ["", "*", "latest", "  *  "] {
            assert!(range_matches(range, "3.1.4"));
        }
    }

    #[test]
    fn caret_and_tilde_ranges() {
        assert!(range_matches("^1.0.0", "1.2.0"));
        assert!(!range_matches("^2.0.0", "1.2.0"));
        assert!(range_matches("~1.2.0", "1.2.0"));
        assert!(!range_matches("~1.1.0", "1.2.0"));
    }

    #[test]
    fn space_separated_comparator_sets() {
        assert!(range_matches(">=1.0.0 <2.0.0", "1.5.0"));
        assert!(!range_matches(">=1.0.0 <2.0.0", "2.0.0"));
        assert!(!range_matches(">=1.0.0 <2.0.0", "0.9.0"));
    }

    #[test]
    fn or_alternatives() {
        assert!(range_matches("^1.0.0 || ^2.0.0", "1.5.0"));
        assert!(range_matches("^1.0.0 || ^2.0.0", "2.1.0"));
        assert!(!range_matches("^1.0.0 || ^2.0.0", "3.0.0"));
    }

    #[test]
    fn hyphen_ranges() {
        assert!(range_matches("1.2.3 - 2.3.4", "2.0.0"));
        assert!(range_matches("1.2.3 - 2.3.4", "1.2.3"));
        assert!(!range_matches("1.2.3 - 2.3.4", "2.4.0"));
    }

    #[test]
    fn non_semver_range_is_unmatchable() {
        assert!(parse_range("git+https://example.com/dep.git").is_none());
        assert!(!range_matches("git+https://example.com/dep.git", "1.0.0"));
    }
}
