use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
pub struct ReportArgs {
    /// Directory to write the report files into.
    #[clap(long = "report-dir", env = "REPORT_DIR", default_value = ".")]
    pub directory: PathBuf,

    /// Do not write the report files.
    #[clap(long = "no-reports")]
    pub skip: bool,
}
