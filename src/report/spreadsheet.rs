use std::io::Write;

use chrono::{DateTime, Local};

use crate::{
    calculator::CalculationResult,
    error::RenderError,
    report::{Report, TITLE},
};

/// Spreadsheet with a header block followed by one row per appliance.
#[must_use]
pub struct CsvReport {
    generated_at: DateTime<Local>,
}

impl CsvReport {
    pub const fn new(generated_at: DateTime<Local>) -> Self {
        Self { generated_at }
    }
}

impl Report for CsvReport {
    const EXTENSION: &str = "csv";

    fn write(&self, result: &CalculationResult, writer: impl Write) -> Result<(), RenderError> {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);
        let generated_at = self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string();
        writer.write_record([TITLE, generated_at.as_str()])?;
        let total_consumption = format!("{:.3}", result.total_consumption.0);
        writer.write_record(["Total consumption (kWh)", total_consumption.as_str()])?;
        let total_cost = format!("{:.2}", result.total_cost.0);
        writer.write_record(["Total cost", total_cost.as_str()])?;
        writer.write_record(["Appliance", "Consumption (kWh)", "Cost"])?;
        for detail in &result.details {
            let consumption = format!("{:.3}", detail.consumption.0);
            let cost = format!("{:.2}", detail.cost.0);
            writer.write_record([detail.name.as_str(), consumption.as_str(), cost.as_str()])?;
        }
        writer.flush()?;
        Ok(())
    }
}
