//! Pivot of test records into a (class, test case) x platform status table.

use super::parse::{TestRecord, TestStatus};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotRow {
    /// 1-based serial number in display order.
    pub serial: usize,
    pub classname: String,
    pub testcase: String,
    /// Platforms with a record for this pair. Absent platforms are `Missing`.
    pub statuses: BTreeMap<String, TestStatus>,
}

impl PivotRow {
    pub fn status(&self, platform: &str) -> TestStatus {
        self.statuses
            .get(platform)
            .copied()
            .unwrap_or(TestStatus::Missing)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotTable {
    /// Column order, sorted.
    pub platforms: Vec<String>,
    /// Row order: first appearance of each (class, test case) pair.
    pub rows: Vec<PivotRow>,
}

/// Group records by (class, test case). When a pair repeats on one platform the first record wins.
pub fn build_pivot(records: &[TestRecord]) -> PivotTable {
    let mut platforms = BTreeSet::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut rows: Vec<PivotRow> = Vec::new();
    for record in records {
        platforms.insert(record.platform.clone());
        let key = (record.classname.as_str(), record.testcase.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            rows.push(PivotRow {
                serial: rows.len() + 1,
                classname: record.classname.clone(),
                testcase: record.testcase.clone(),
                statuses: BTreeMap::new(),
            });
            rows.len() - 1
        });
        rows[slot]
            .statuses
            .entry(record.platform.clone())
            .or_insert(record.status);
    }
    PivotTable {
        platforms: platforms.into_iter().collect(),
        rows,
    }
}
