//! JUnit XML file discovery and `testcase` extraction.

use super::JunitError;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Platform directories are named `test-results-<platform>`.
pub const PLATFORM_DIR_PREFIX: &str = "test-results-";

const UNKNOWN_CLASS: &str = "unknown.class";
const UNKNOWN_TEST: &str = "unknown.test";

/// Outcome of one test case on one platform. `Missing` only appears in pivot cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestStatus {
    Pass,
    Fail,
    Skipped,
    Missing,
}

impl TestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TestStatus::Pass => "PASS",
            TestStatus::Fail => "FAIL",
            TestStatus::Skipped => "SKIPPED",
            TestStatus::Missing => "MISSING",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            TestStatus::Pass => "\u{2705}",
            TestStatus::Fail => "\u{274c}",
            TestStatus::Skipped => "\u{26a0}\u{fe0f}",
            TestStatus::Missing => "\u{1f6ab}",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestRecord {
    pub classname: String,
    pub testcase: String,
    pub platform: String,
    pub status: TestStatus,
}

/// Platform label for a result file: its parent directory name minus [`PLATFORM_DIR_PREFIX`].
pub fn platform_for(path: &Path) -> String {
    let dir = path
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match dir.strip_prefix(PLATFORM_DIR_PREFIX) {
        Some(platform) => platform.to_string(),
        None => dir,
    }
}

/// Parse every `testcase` below the document root.
pub fn parse_junit_xml(xml: &str, platform: &str) -> Result<Vec<TestRecord>, JunitError> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let doc = roxmltree::Document::parse_with_options(xml, options)?;
    let records = doc
        .root_element()
        .descendants()
        .skip(1)
        .filter(|node| node.is_element() && node.tag_name().name() == "testcase")
        .map(|tc| {
            let has_child = |tag: &str| {
                tc.children()
                    .any(|c| c.is_element() && c.tag_name().name() == tag)
            };
            let status = if has_child("failure") {
                TestStatus::Fail
            } else if has_child("skipped") {
                TestStatus::Skipped
            } else {
                TestStatus::Pass
            };
            TestRecord {
                classname: tc.attribute("classname").unwrap_or(UNKNOWN_CLASS).to_string(),
                testcase: tc.attribute("name").unwrap_or(UNKNOWN_TEST).to_string(),
                platform: platform.to_string(),
                status,
            }
        })
        .collect();
    Ok(records)
}

/// Decode raw XML: byte order mark first, then the declared `encoding`, else UTF-8.
pub fn decode_xml(bytes: &[u8]) -> Result<String, JunitError> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (sniff_encoding(bytes)?, bytes),
    };
    let (text, had_errors) = encoding.decode_without_bom_handling(body);
    if had_errors {
        return Err(JunitError::Decode(encoding.name()));
    }
    Ok(text.into_owned())
}

fn sniff_encoding(bytes: &[u8]) -> Result<&'static Encoding, JunitError> {
    // UTF-16 without a BOM still starts with `<?` as 16-bit units.
    if bytes.starts_with(&[b'<', 0, b'?', 0]) {
        return Ok(UTF_16LE);
    }
    if bytes.starts_with(&[0, b'<', 0, b'?']) {
        return Ok(UTF_16BE);
    }
    if !bytes.starts_with(b"<?xml") {
        return Ok(UTF_8);
    }
    let head = &bytes[..bytes.len().min(256)];
    let end = head
        .windows(2)
        .position(|w| w == b"?>")
        .unwrap_or(head.len());
    let decl = String::from_utf8_lossy(&head[..end]);
    let Some(label) = declared_encoding(&decl) else {
        return Ok(UTF_8);
    };
    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| JunitError::UnknownEncoding(label.to_string()))?;
    // An ASCII declaration cannot be UTF-16, whatever it claims.
    if encoding == UTF_16LE || encoding == UTF_16BE {
        return Ok(UTF_8);
    }
    Ok(encoding)
}

fn declared_encoding(decl: &str) -> Option<&str> {
    let rest = decl[decl.find("encoding")? + "encoding".len()..].trim_start();
    let rest = rest.strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| matches!(c, '"' | '\''))?;
    let value = &rest[1..];
    value.find(quote).map(|end| &value[..end])
}

fn parse_junit_file(path: &Path) -> Result<Vec<TestRecord>, JunitError> {
    let bytes = std::fs::read(path)?;
    let xml = decode_xml(&bytes)?;
    parse_junit_xml(&xml, &platform_for(path))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// Recursively list `*.xml` files under `root`, sorted, skipping hidden entries.
/// Symlinked files and directories are followed.
pub fn discover_xml_files(root: &Path) -> Result<Vec<PathBuf>, JunitError> {
    if !root.is_dir() {
        return Err(JunitError::NotADirectory(root.to_path_buf()));
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if entry.file_type().is_file() && entry.path().extension() == Some(OsStr::new("xml")) {
            files.push(entry.into_path());
        }
    }
    if files.is_empty() {
        return Err(JunitError::NoXmlFiles(root.to_path_buf()));
    }
    Ok(files)
}

/// Discover and parse all result files under `root`. Unparseable files are logged and skipped.
pub fn collect_results(root: &Path) -> Result<Vec<TestRecord>, JunitError> {
    let files = discover_xml_files(root)?;
    let mut records = Vec::new();
    for path in &files {
        match parse_junit_file(path) {
            Ok(mut parsed) => {
                debug!(path = %path.display(), count = parsed.len(), "parsed result file");
                records.append(&mut parsed);
            }
            Err(e) => warn!("Could not parse XML: {} ({})", path.display(), e),
        }
    }
    if records.is_empty() {
        return Err(JunitError::NoValidResults);
    }
    info!(files = files.len(), records = records.len(), "collected test results");
    Ok(records)
}
