use chrono::Local;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    calculator::CalculationResult,
    db::record::ConsumptionRecord,
    quantity::{cost::Cost, energy::KilowattHours},
};

pub fn build_result_table(result: &CalculationResult) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec!["Appliance", "Consumption", "Cost"]);
    for detail in &result.details {
        let row = vec![
            Cell::new(&detail.name),
            Cell::new(detail.consumption).set_alignment(CellAlignment::Right),
            Cell::new(detail.cost).set_alignment(CellAlignment::Right),
        ];
        if detail.consumption == KilowattHours::ZERO {
            table.add_row(row.into_iter().map(|cell| cell.add_attribute(Attribute::Dim)));
        } else {
            table.add_row(row);
        }
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(result.total_consumption)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
        Cell::new(result.total_cost)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold)
            .fg(if result.total_cost >= Cost::ONE_CENT { Color::Red } else { Color::Green }),
    ]);
    table
}

pub fn build_records_table(records: &[ConsumptionRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        "#", "Date", "Time", "Appliance", "Power", "Hours", "Consumption", "Cost", "Tariff",
    ]);
    for record in records {
        let timestamp = record.timestamp.with_timezone(&Local);
        table.add_row(vec![
            Cell::new(record.id).add_attribute(Attribute::Dim),
            Cell::new(timestamp.format("%Y-%m-%d")).add_attribute(Attribute::Dim),
            Cell::new(timestamp.format("%H:%M:%S")),
            Cell::new(&record.appliance_name),
            Cell::new(record.power).set_alignment(CellAlignment::Right),
            Cell::new(record.hours_used).set_alignment(CellAlignment::Right),
            Cell::new(record.consumption).set_alignment(CellAlignment::Right),
            Cell::new(record.cost).set_alignment(CellAlignment::Right),
            Cell::new(record.tariff).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
        ]);
    }
    table
}
