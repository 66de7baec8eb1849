//! Report files rendered from a [`CalculationResult`].

mod json;
mod spreadsheet;
mod table;
mod workbook;

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};

pub use self::{
    json::JsonReport,
    spreadsheet::CsvReport,
    table::TableReport,
    workbook::WorkbookReport,
};
use crate::{calculator::CalculationResult, error::RenderError, prelude::*};

pub const TITLE: &str = "Energy consumption report";

pub trait Report {
    /// File name extension without the leading dot.
    const EXTENSION: &str;

    fn write(&self, result: &CalculationResult, writer: impl Write) -> Result<(), RenderError>;

    /// Render the result into `<directory>/<base_name>.<extension>` and return the path.
    #[instrument(skip_all, fields(extension = Self::EXTENSION))]
    fn save(
        &self,
        result: &CalculationResult,
        directory: &Path,
        base_name: &str,
    ) -> Result<PathBuf, RenderError> {
        let path = directory.join(format!("{base_name}.{}", Self::EXTENSION));
        let file = File::create(&path)
            .map_err(|source| RenderError::Create { path: path.clone(), source })?;
        let mut writer = BufWriter::new(file);
        self.write(result, &mut writer)?;
        writer.flush()?;
        info!(path = %path.display(), "saved the report");
        Ok(path)
    }
}

/// `energy_report_YYYYMMDD_HHMMSS`.
#[must_use]
pub fn base_name(generated_at: DateTime<Local>) -> String {
    format!("energy_report_{}", generated_at.format("%Y%m%d_%H%M%S"))
}

/// Save the result in every format.
///
/// A format that fails gets logged and does not prevent the others. Returns the paths of the
/// written files.
#[instrument(skip_all, fields(directory = %directory.display()))]
pub fn save_all(
    result: &CalculationResult,
    directory: &Path,
    generated_at: DateTime<Local>,
) -> Vec<PathBuf> {
    let base_name = base_name(generated_at);
    [
        try_save(&TableReport::new(generated_at), result, directory, &base_name),
        try_save(&CsvReport::new(generated_at), result, directory, &base_name),
        try_save(&WorkbookReport::new(generated_at), result, directory, &base_name),
        try_save(&JsonReport, result, directory, &base_name),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn try_save<R: Report>(
    report: &R,
    result: &CalculationResult,
    directory: &Path,
    base_name: &str,
) -> Option<PathBuf> {
    match report.save(result, directory, base_name) {
        Ok(path) => Some(path),
        Err(error) => {
            error!(extension = R::EXTENSION, "failed to save the report: {:#}", Error::from(error));
            None
        }
    }
}
