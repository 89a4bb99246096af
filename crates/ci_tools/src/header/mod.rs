//! Copyright and SPDX license header checking.

mod check;
mod comments;
mod mime;

pub use check::{CheckResult, CheckSummary, FileVerdict, HeaderChecker, LICENSE_TEXT};
pub use comments::{extract_comments, Comment, CommentSyntax};
pub use mime::{detect_mime, PLAIN_TEXT_MIME, PLAIN_TEXT_SUBSTITUTE};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("No copyright text provided. Please set the copyright-text input in the workflow.")]
    MissingCopyrightText,
    #[error("invalid copyright pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("io: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported MIME type for comment extraction: {0}")]
    UnsupportedMime(String),
    #[error("unterminated comment starting at line {0}")]
    UnterminatedComment(usize),
}
