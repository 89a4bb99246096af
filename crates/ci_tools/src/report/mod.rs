//! Report data structure (HTML is generated in the ci_tools_report crate).

use crate::junit::PivotTable;
use serde::{Deserialize, Serialize};

pub const DEFAULT_REPORT_HEADER: &str = "Cross-Platform Test";
pub const DEFAULT_OUTPUT_FILE: &str = "cross_platform_report.html";

/// Data passed to the HTML report generator: page title + pivot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportData {
    pub title: String,
    pub created_utc_rfc3339: String,
    pub pivot: PivotTable,
}

impl ReportData {
    pub fn new(header: &str, pivot: PivotTable) -> Self {
        let created_utc_rfc3339 = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default();
        Self {
            title: report_title(header),
            created_utc_rfc3339,
            pivot,
        }
    }
}

/// `"  my project tests "` becomes `"My Project Tests Report"`.
pub fn report_title(header: &str) -> String {
    format!("{} Report", title_case(header.trim()))
}

/// Upper-case the first letter of each alphabetic run and lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_from_header() {
        assert_eq!(report_title(DEFAULT_REPORT_HEADER), "Cross-Platform Test Report");
        assert_eq!(report_title("  my PROJECT tests "), "My Project Tests Report");
        assert_eq!(report_title("ci v2build"), "Ci V2Build Report");
    }

    #[test]
    fn report_data_carries_title() {
        let data = ReportData::new("nightly", PivotTable::default());
        assert_eq!(data.title, "Nightly Report");
        assert!(data.created_utc_rfc3339.contains('T'));
    }
}
