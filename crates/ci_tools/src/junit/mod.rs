//! JUnit XML discovery, parsing and the cross-platform pivot.

mod parse;
mod pivot;

pub use parse::{
    collect_results, decode_xml, discover_xml_files, parse_junit_xml, platform_for, TestRecord,
    TestStatus, PLATFORM_DIR_PREFIX,
};
pub use pivot::{build_pivot, PivotRow, PivotTable};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JunitError {
    #[error("'{}' is not a directory.", .0.display())]
    NotADirectory(PathBuf),
    #[error("No XML files found in '{}'.", .0.display())]
    NoXmlFiles(PathBuf),
    #[error("No valid test results found.")]
    NoValidResults,
    #[error("xml: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),
    #[error("invalid {0} data")]
    Decode(&'static str),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl JunitError {
    /// 1 for known input problems, 2 for anything unexpected.
    pub fn exit_code(&self) -> i32 {
        match self {
            JunitError::NotADirectory(_) | JunitError::NoXmlFiles(_) | JunitError::NoValidResults => 1,
            _ => 2,
        }
    }
}
