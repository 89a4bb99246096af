//! ci_tools — helpers for CI pipelines.
//!
//! Checks source files for a copyright line and SPDX license identifier, and
//! collates JUnit XML results from several platforms into one pivot table.

pub mod header;
pub mod junit;
pub mod report;

pub use header::{CheckResult, CheckSummary, FileVerdict, HeaderChecker, HeaderError, LICENSE_TEXT};
pub use junit::{build_pivot, collect_results, JunitError, PivotRow, PivotTable, TestRecord, TestStatus};
pub use report::{report_title, ReportData, DEFAULT_OUTPUT_FILE, DEFAULT_REPORT_HEADER};
