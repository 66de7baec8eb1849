use std::io::Write;

use chrono::{DateTime, Local};

use crate::{
    calculator::CalculationResult,
    error::RenderError,
    report::{Report, TITLE},
    tables::build_result_table,
};

/// Plain-text document with the totals and the per-appliance table.
#[must_use]
pub struct TableReport {
    generated_at: DateTime<Local>,
}

impl TableReport {
    pub const fn new(generated_at: DateTime<Local>) -> Self {
        Self { generated_at }
    }
}

impl Report for TableReport {
    const EXTENSION: &str = "txt";

    fn write(&self, result: &CalculationResult, mut writer: impl Write) -> Result<(), RenderError> {
        let mut table = build_result_table(result);
        table.force_no_tty();

        writeln!(writer, "{TITLE}")?;
        writeln!(writer)?;
        writeln!(writer, "Generated at: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(writer, "Total consumption: {}", result.total_consumption)?;
        writeln!(writer, "Total cost: {}", result.total_cost)?;
        writeln!(writer)?;
        writeln!(writer, "Breakdown by appliance:")?;
        writeln!(writer, "{table}")?;
        Ok(())
    }
}
