//! Integration tests using saved JUnit and source fixtures.

use ci_tools::junit::{build_pivot, collect_results};
use ci_tools::{CheckSummary, FileVerdict, HeaderChecker, PivotRow, PivotTable, TestStatus};
use std::path::{Path, PathBuf};

const COPYRIGHT: &str = "Copyright (c) 2025 Arm Limited. All rights reserved.";

fn fixture(path: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../testdata")
        .join(path)
}

fn row<'a>(pivot: &'a PivotTable, name: &str) -> &'a PivotRow {
    pivot.rows.iter().find(|r| r.testcase == name).unwrap()
}

#[test]
fn integration_fixture_results_collect() {
    let records = collect_results(&fixture("junit")).unwrap();
    // truncated.xml is skipped; the other three files contribute 7 cases.
    assert_eq!(records.len(), 7);
    let platforms: Vec<_> = records.iter().map(|r| r.platform.as_str()).collect();
    assert!(platforms.contains(&"linux"));
    assert!(platforms.contains(&"macos"));
    assert!(platforms.contains(&"windows"));
}

#[test]
fn integration_pivot_from_fixtures() {
    let records = collect_results(&fixture("junit")).unwrap();
    let pivot = build_pivot(&records);
    assert_eq!(pivot.platforms, vec!["linux", "macos", "windows"]);
    assert_eq!(pivot.rows.len(), 4);

    let main = row(&pivot, "TestMain");
    assert!(pivot
        .platforms
        .iter()
        .all(|p| main.status(p) == TestStatus::Pass));
    let parse = row(&pivot, "TestParse");
    assert_eq!(parse.status("windows"), TestStatus::Fail);
    assert_eq!(parse.status("macos"), TestStatus::Missing);
    let symlinks = row(&pivot, "TestSymlinks");
    assert_eq!(symlinks.status("linux"), TestStatus::Skipped);
    let darwin = row(&pivot, "TestDarwinOnly");
    assert_eq!(darwin.classname, "workflows.extra");
    assert_eq!(darwin.status("linux"), TestStatus::Missing);
}

#[test]
fn integration_header_fixtures() {
    let checker = HeaderChecker::new(COPYRIGHT).unwrap();
    for good in ["headers/good.go", "headers/good.py", "headers/empty.go"] {
        assert!(checker.check_file(fixture(good)).passed(), "{good}");
    }
    let no_license = checker.check_file(fixture("headers/no_license.go"));
    assert!(matches!(
        no_license.verdict,
        FileVerdict::Checked {
            copyright_found: true,
            license_found: false
        }
    ));
    let string_only = checker.check_file(fixture("headers/string_only.go"));
    assert!(matches!(
        string_only.verdict,
        FileVerdict::Checked {
            copyright_found: false,
            license_found: false
        }
    ));
}

#[test]
fn integration_header_summary() {
    let checker = HeaderChecker::new(COPYRIGHT).unwrap();
    let files: Vec<_> = ["good.go", "good.py", "empty.go", "no_license.go", "string_only.go"]
        .iter()
        .map(|f| fixture(&format!("headers/{f}")))
        .collect();
    let summary = checker.check_files(&files);
    assert_eq!(summary, CheckSummary { checked: 5, failed: 2 });
    assert_eq!(summary.exit_code(), 1);
}
