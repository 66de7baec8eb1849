use std::io::Write;

use crate::{calculator::CalculationResult, error::RenderError, report::Report};

/// The result as is, in its interchange shape.
pub struct JsonReport;

impl Report for JsonReport {
    const EXTENSION: &str = "json";

    fn write(&self, result: &CalculationResult, mut writer: impl Write) -> Result<(), RenderError> {
        serde_json::to_writer_pretty(&mut writer, result)?;
        writeln!(writer)?;
        Ok(())
    }
}
