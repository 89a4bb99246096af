//! check-copyright-notice: verify copyright and SPDX license headers in files.

mod logging;

use ci_tools::{HeaderChecker, HeaderError};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "check-copyright-notice")]
#[command(about = "Check copyright and license headers in files.")]
struct Cli {
    /// Copyright text to check
    #[arg(long)]
    copyright_text: Option<String>,
    /// Files to check
    filenames: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init();
    info!("Checking copyright headers...");
    let copyright_text = cli.copyright_text.unwrap_or_default();
    let checker = match HeaderChecker::new(&copyright_text) {
        Ok(checker) => checker,
        Err(e @ HeaderError::MissingCopyrightText) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            error!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    let summary = checker.check_files(&cli.filenames);
    if summary.exit_code() == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
