//! Structural signal extraction from a repository file listing

use crate::types::StructuralSignals;

const README_PATTERNS: &[&str] = &["readme.md"];
const LICENSE_PATTERNS: &[&str] = &["license"];
const TEST_PATTERNS: &[&str] = &["test", "spec"];
const CI_PATTERNS: &[&str] = &[".github/workflows", ".gitlab-ci.yml", "travis.yml"];
const DOCS_PATTERNS: &[&str] = &["docs/", "documentation"];

/// Derive structural signals from repository-relative file paths
///
/// A signal is present when any path contains one of its patterns,
/// case-insensitively. A missing listing yields all-false.
pub fn analyze_structure<S: AsRef<str>>(files: Option<&[S]>) -> StructuralSignals {
    let Some(files) = files else {
        return StructuralSignals::default();
    };

    let lowered: Vec<String> = files.iter().map(|f| f.as_ref().to_lowercase()).collect();

    StructuralSignals {
        has_readme: any_path_matches(&lowered, README_PATTERNS),
        has_license: any_path_matches(&lowered, LICENSE_PATTERNS),
        has_tests: any_path_matches(&lowered, TEST_PATTERNS),
        has_ci: any_path_matches(&lowered, CI_PATTERNS),
        has_documentation: any_path_matches(&lowered, DOCS_PATTERNS),
    }
}

fn any_path_matches(paths: &[String], patterns: &[&str]) -> bool {
    paths
        .iter()
        .any(|path| patterns.iter().any(|pattern| path.contains(pattern)))
}
