//! junit-html-report: collate JUnit XML results from several platforms into one HTML page.

mod logging;

use ci_tools::junit::{build_pivot, collect_results};
use ci_tools::{ReportData, DEFAULT_OUTPUT_FILE, DEFAULT_REPORT_HEADER};
use ci_tools_report::render_report;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "junit-html-report")]
#[command(about = "Generate a cross-platform HTML test report.")]
struct Cli {
    /// Directory containing test result XML files
    #[arg(long = "test_report_dir")]
    test_report_dir: PathBuf,
    /// Title for the HTML report
    #[arg(long = "report_header", default_value = DEFAULT_REPORT_HEADER)]
    report_header: String,
    /// Filename for the HTML output
    #[arg(long = "output_file", default_value = DEFAULT_OUTPUT_FILE)]
    output_file: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    logging::init();
    let records = match collect_results(&cli.test_report_dir) {
        Ok(records) => records,
        Err(e) if e.exit_code() == 1 => {
            println!("Error: {e}");
            std::process::exit(1);
        }
        Err(e) => {
            println!("Unexpected error: {e}");
            std::process::exit(2);
        }
    };
    let pivot = build_pivot(&records);
    info!(
        rows = pivot.rows.len(),
        platforms = pivot.platforms.len(),
        "built pivot"
    );
    let data = ReportData::new(&cli.report_header, pivot);
    if let Err(e) = render_report(&data, &cli.output_file) {
        println!("Unexpected error: {e}");
        std::process::exit(2);
    }
    println!("\u{2705} Report generated: {}", cli.output_file.display());
}
