use bon::Builder;
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use rusqlite::{Row, types::Type};

use crate::{
    appliance::Appliance,
    quantity::{
        cost::Cost,
        energy::KilowattHours,
        power::Watts,
        rate::KilowattHourRate,
        time::Hours,
    },
};

/// Consumption of one appliance in one calculation run, about to be persisted.
///
/// The identifier and the timestamp are assigned by the store.
#[derive(Builder)]
pub struct NewRecord<'a> {
    pub appliance: &'a Appliance,
    pub hours_used: Hours,
    pub consumption: KilowattHours,
    pub cost: Cost,
    pub tariff: KilowattHourRate,
}

/// Persisted consumption record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsumptionRecord {
    pub id: i64,
    pub appliance_name: String,
    pub power: Watts,
    pub hours_used: Hours,
    pub consumption: KilowattHours,
    pub cost: Cost,
    pub tariff: KilowattHourRate,
    pub timestamp: DateTime<Utc>,
}

impl ConsumptionRecord {
    // language=sqlite
    pub const SELECT_ALL: &'static str = r"
        SELECT
            id,
            appliance_name,
            power_consumption_watts,
            hours_used,
            consumption_kwh,
            cost,
            tariff,
            timestamp
        FROM consumption_records
        ORDER BY timestamp DESC, id DESC
    ";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let timestamp: String = row.get(7)?;
        let timestamp = parse_timestamp(&timestamp).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                7,
                Type::Text,
                format!("invalid timestamp `{timestamp}`").into(),
            )
        })?;
        Ok(Self {
            id: row.get(0)?,
            appliance_name: row.get(1)?,
            power: Watts(row.get(2)?),
            hours_used: Hours(row.get(3)?),
            consumption: KilowattHours(row.get(4)?),
            cost: Cost(row.get(5)?),
            tariff: KilowattHourRate(row.get(6)?),
            timestamp,
        })
    }
}

/// RFC 3339, or ISO 8601 without an offset which is then taken as local time.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()?
        .and_local_timezone(Local)
        .earliest()
        .map(|timestamp| timestamp.with_timezone(&Utc))
}
