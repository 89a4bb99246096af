//! Per-file header check and run summary.

use super::comments::{extract_comments, CommentSyntax};
use super::mime::{detect_mime, PLAIN_TEXT_MIME, PLAIN_TEXT_SUBSTITUTE};
use super::HeaderError;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// License line every checked file must carry in a comment.
pub const LICENSE_TEXT: &str = "SPDX-License-Identifier: Apache-2.0";

/// Outcome of checking one file.
#[derive(Debug)]
pub enum FileVerdict {
    /// Zero-length file; never sniffed, always passes.
    EmptySkipped,
    Checked {
        copyright_found: bool,
        license_found: bool,
    },
    /// Size, read, MIME or comment extraction failed.
    Unreadable(HeaderError),
}

#[derive(Debug)]
pub struct CheckResult {
    pub path: PathBuf,
    pub verdict: FileVerdict,
}

impl CheckResult {
    pub fn passed(&self) -> bool {
        match self.verdict {
            FileVerdict::EmptySkipped => true,
            FileVerdict::Checked {
                copyright_found,
                license_found,
            } => copyright_found && license_found,
            FileVerdict::Unreadable(_) => false,
        }
    }
}

/// Counts for a whole run. Exit status is non-zero if any file failed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub checked: usize,
    pub failed: usize,
}

impl CheckSummary {
    pub fn record(&mut self, result: &CheckResult) {
        self.checked += 1;
        if !result.passed() {
            self.failed += 1;
        }
    }

    pub fn exit_code(&self) -> i32 {
        i32::from(self.failed > 0)
    }
}

/// Checks files for the configured copyright text and [`LICENSE_TEXT`].
pub struct HeaderChecker {
    copyright: Regex,
}

impl HeaderChecker {
    /// Build a checker for a literal copyright text. Empty text is a configuration error.
    pub fn new(copyright_text: &str) -> Result<Self, HeaderError> {
        if copyright_text.is_empty() {
            return Err(HeaderError::MissingCopyrightText);
        }
        let copyright = Regex::new(&regex::escape(copyright_text))?;
        Ok(Self { copyright })
    }

    /// Check a single file, logging the reason on failure.
    pub fn check_file(&self, path: impl AsRef<Path>) -> CheckResult {
        let path = path.as_ref();
        let verdict = match self.inspect(path) {
            Ok(verdict) => verdict,
            Err(e) => {
                match &e {
                    HeaderError::UnsupportedMime(_) | HeaderError::UnterminatedComment(_) => {
                        error!("Failed to parse comments in {}: {}", path.display(), e)
                    }
                    _ => error!("Could not determine MIME type for {}: {}", path.display(), e),
                }
                FileVerdict::Unreadable(e)
            }
        };
        if let FileVerdict::Checked {
            copyright_found,
            license_found,
        } = verdict
        {
            if !(copyright_found && license_found) {
                let mut errstr = String::new();
                if !copyright_found {
                    errstr.push_str("\n\t # Missing or invalid copyright text.");
                }
                if !license_found {
                    errstr.push_str("\n\t # Missing or invalid license text. Please write : ");
                    errstr.push_str(LICENSE_TEXT);
                }
                error!("Copyright check error(s) in : {} {}", path.display(), errstr);
            }
        }
        CheckResult {
            path: path.to_path_buf(),
            verdict,
        }
    }

    /// Check every file in order and return the aggregate counts.
    pub fn check_files<P: AsRef<Path>>(&self, paths: &[P]) -> CheckSummary {
        let mut summary = CheckSummary::default();
        for path in paths {
            let result = self.check_file(path);
            summary.record(&result);
        }
        info!("Checked {} file(s).", summary.checked);
        if summary.failed > 0 {
            error!(">> error: One or more files are missing a valid copyright header");
        }
        summary
    }

    fn inspect(&self, path: &Path) -> Result<FileVerdict, HeaderError> {
        let io_err = |source| HeaderError::Io {
            path: path.to_path_buf(),
            source,
        };
        let len = std::fs::metadata(path).map_err(io_err)?.len();
        if len == 0 {
            info!("Skipping empty file: {}", path.display());
            return Ok(FileVerdict::EmptySkipped);
        }
        let bytes = std::fs::read(path).map_err(io_err)?;
        let mut mime = detect_mime(path, &bytes);
        if mime == PLAIN_TEXT_MIME {
            mime = PLAIN_TEXT_SUBSTITUTE;
        }
        let syntax = CommentSyntax::for_mime(mime)?;
        let source = String::from_utf8_lossy(&bytes);
        let mut comments = String::new();
        for comment in extract_comments(&source, syntax)? {
            comments.push_str(&comment.text);
            comments.push('\n');
        }
        Ok(FileVerdict::Checked {
            copyright_found: self.copyright.is_match(&comments),
            license_found: comments.contains(LICENSE_TEXT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const COPYRIGHT: &str = "Copyright (c) 2025 Arm Limited. All rights reserved.";

    fn checker() -> HeaderChecker {
        HeaderChecker::new(COPYRIGHT).unwrap()
    }

    fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn empty_copyright_text_rejected() {
        assert!(matches!(
            HeaderChecker::new(""),
            Err(HeaderError::MissingCopyrightText)
        ));
    }

    #[test]
    fn copyright_text_is_literal_not_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "a.go",
            "// Copyright c 2025 Arm Limited. All rights reserved.\n// SPDX-License-Identifier: Apache-2.0\n",
        );
        let result = checker().check_file(&path);
        assert!(matches!(
            result.verdict,
            FileVerdict::Checked {
                copyright_found: false,
                license_found: true
            }
        ));
    }

    #[test]
    fn go_file_with_both_passes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "main.go",
            "// -----\n// Copyright (c) 2025 Arm Limited. All rights reserved.\n//\n// SPDX-License-Identifier: Apache-2.0\n// -----\n\npackage main\n",
        );
        assert!(checker().check_file(&path).passed());
    }

    #[test]
    fn text_outside_comments_does_not_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "x.py",
            "LICENSE = \"SPDX-License-Identifier: Apache-2.0\"\n# Copyright (c) 2025 Arm Limited. All rights reserved.\n",
        );
        let result = checker().check_file(&path);
        assert!(!result.passed());
        assert!(matches!(
            result.verdict,
            FileVerdict::Checked {
                copyright_found: true,
                license_found: false
            }
        ));
    }

    #[test]
    fn empty_file_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "empty.bin", "");
        let result = checker().check_file(&path);
        assert!(matches!(result.verdict, FileVerdict::EmptySkipped));
        assert!(result.passed());
    }

    #[test]
    fn plain_text_uses_c_like_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "lib.rs",
            "// Copyright (c) 2025 Arm Limited. All rights reserved.\n// SPDX-License-Identifier: Apache-2.0\nfn main() {}\n",
        );
        assert!(checker().check_file(&path).passed());
    }

    #[test]
    fn binary_and_missing_files_fail() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("blob.dat");
        fs::write(&bin, [0u8, 1, 2, 3]).unwrap();
        let result = checker().check_file(&bin);
        assert!(matches!(
            result.verdict,
            FileVerdict::Unreadable(HeaderError::UnsupportedMime(_))
        ));
        let missing = checker().check_file(dir.path().join("nope.go"));
        assert!(matches!(
            missing.verdict,
            FileVerdict::Unreadable(HeaderError::Io { .. })
        ));
    }

    #[test]
    fn summary_is_or_of_results() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(
            &dir,
            "good.sh",
            "#!/bin/sh\n# Copyright (c) 2025 Arm Limited. All rights reserved.\n# SPDX-License-Identifier: Apache-2.0\n",
        );
        let bad = write(&dir, "bad.sh", "#!/bin/sh\necho hi\n");
        let empty = write(&dir, "empty.sh", "");

        let all_good = checker().check_files(&[&good, &empty]);
        assert_eq!(all_good, CheckSummary { checked: 2, failed: 0 });
        assert_eq!(all_good.exit_code(), 0);

        let mixed = checker().check_files(&[&good, &bad, &empty]);
        assert_eq!(mixed, CheckSummary { checked: 3, failed: 1 });
        assert_eq!(mixed.exit_code(), 1);

        let none = checker().check_files::<PathBuf>(&[]);
        assert_eq!(none.exit_code(), 0);
    }
}
