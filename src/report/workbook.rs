use std::io::Write;

use chrono::{DateTime, Local};
use rust_xlsxwriter::{Format, Workbook};

use crate::{
    calculator::CalculationResult,
    error::RenderError,
    report::{Report, TITLE},
};

/// Excel workbook with a single sheet laid out like [`super::CsvReport`].
#[must_use]
pub struct WorkbookReport {
    generated_at: DateTime<Local>,
}

impl WorkbookReport {
    pub const SHEET_NAME: &'static str = "Energy consumption";

    pub const fn new(generated_at: DateTime<Local>) -> Self {
        Self { generated_at }
    }
}

impl Report for WorkbookReport {
    const EXTENSION: &str = "xlsx";

    fn write(&self, result: &CalculationResult, mut writer: impl Write) -> Result<(), RenderError> {
        let bold = Format::new().set_bold();
        let kilowatt_hours = Format::new().set_num_format("0.000");
        let money = Format::new().set_num_format("0.00");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(Self::SHEET_NAME)?;

        sheet.write_string_with_format(0, 0, TITLE, &bold)?;
        sheet.write_string(0, 1, self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string())?;

        sheet.write_string(2, 0, "Total consumption (kWh)")?;
        sheet.write_number_with_format(2, 1, result.total_consumption.0, &kilowatt_hours)?;
        sheet.write_string(3, 0, "Total cost")?;
        sheet.write_number_with_format(3, 1, result.total_cost.0, &money)?;

        for (column, header) in (0..).zip(["Appliance", "Consumption (kWh)", "Cost"]) {
            sheet.write_string_with_format(5, column, header, &bold)?;
        }
        for (row, detail) in (6..).zip(&result.details) {
            sheet.write_string(row, 0, &detail.name)?;
            sheet.write_number_with_format(row, 1, detail.consumption.0, &kilowatt_hours)?;
            sheet.write_number_with_format(row, 2, detail.cost.0, &money)?;
        }
        sheet.autofit();

        writer.write_all(&workbook.save_to_buffer()?)?;
        Ok(())
    }
}
