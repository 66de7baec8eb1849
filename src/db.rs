pub mod record;

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, params};

use crate::{
    calculator::{CalculationResult, EnergyCalculator},
    db::record::{ConsumptionRecord, NewRecord},
    error::StorageError,
    prelude::*,
    quantity::time::Hours,
};

/// SQLite-backed store of the consumption records.
#[must_use]
pub struct RecordStore {
    path: PathBuf,

    /// `None` once closed.
    connection: Option<Connection>,
}

impl RecordStore {
    // language=sqlite
    const SCHEMA: &'static str = r"
        CREATE TABLE IF NOT EXISTS consumption_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            appliance_name TEXT NOT NULL,
            power_consumption_watts INTEGER NOT NULL,
            hours_used REAL NOT NULL,
            consumption_kwh REAL NOT NULL,
            cost REAL NOT NULL,
            tariff REAL NOT NULL,
            timestamp TEXT NOT NULL
        )
    ";

    /// Open or create the database and ensure the schema.
    ///
    /// `:memory:` opens a private in-memory database.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let connection = Connection::open(path)
            .map_err(|source| StorageError::Open { path: path.to_owned(), source })?;
        connection.execute_batch(Self::SCHEMA).map_err(StorageError::Schema)?;
        info!("the database is ready");
        Ok(Self { path: path.to_owned(), connection: Some(connection) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connection(&self) -> Result<&Connection, StorageError> {
        self.connection.as_ref().ok_or(StorageError::Closed)
    }

    /// Append the record and return its identifier.
    #[instrument(skip_all, fields(appliance = record.appliance.name()))]
    pub fn save_record(&self, record: &NewRecord<'_>) -> Result<i64, StorageError> {
        // language=sqlite
        const SQL: &str = r"
            INSERT INTO consumption_records (
                appliance_name,
                power_consumption_watts,
                hours_used,
                consumption_kwh,
                cost,
                tariff,
                timestamp
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        ";

        let to_write_error = |source| StorageError::Write {
            appliance_name: record.appliance.name().to_owned(),
            source,
        };
        let connection = self.connection()?;
        connection
            .prepare_cached(SQL)
            .and_then(|mut statement| {
                statement.execute(params![
                    record.appliance.name(),
                    record.appliance.power().0,
                    record.hours_used.0,
                    record.consumption.0,
                    record.cost.0,
                    record.tariff.0,
                    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
                ])
            })
            .map_err(to_write_error)?;
        let id = connection.last_insert_rowid();
        info!(id, "saved the record");
        Ok(id)
    }

    /// Save one record per appliance of the calculation, pairing them positionally.
    ///
    /// Every record is attempted independently: a failure gets logged and the rest still get
    /// saved. Returns the number of the saved records.
    #[instrument(skip_all)]
    pub fn save_result(
        &self,
        calculator: &EnergyCalculator,
        result: &CalculationResult,
        period: Hours,
    ) -> usize {
        let mut n_saved = 0;
        for (appliance, detail) in calculator.appliances().iter().zip(&result.details) {
            let record = NewRecord::builder()
                .appliance(appliance)
                .hours_used(period)
                .consumption(detail.consumption)
                .cost(detail.cost)
                .tariff(calculator.tariff())
                .build();
            match self.save_record(&record) {
                Ok(_) => n_saved += 1,
                Err(error) => error!("{:#}", Error::from(error)),
            }
        }
        n_saved
    }

    /// All the records, newest first.
    ///
    /// An unreadable or closed store yields an empty list, the failure only gets logged.
    #[must_use]
    pub fn list_all_records(&self) -> Vec<ConsumptionRecord> {
        self.try_list_all_records().unwrap_or_else(|error| {
            warn!("{:#}", Error::from(error));
            Vec::new()
        })
    }

    /// Unreadable rows get skipped with a warning.
    fn try_list_all_records(&self) -> Result<Vec<ConsumptionRecord>, StorageError> {
        let mut records = self
            .connection()?
            .prepare_cached(ConsumptionRecord::SELECT_ALL)
            .and_then(|mut statement| {
                let rows = statement.query_map([], ConsumptionRecord::from_row)?;
                Ok(rows
                    .filter_map(|row| {
                        row.inspect_err(|error| warn!("skipping an unreadable record: {error:#}"))
                            .ok()
                    })
                    .collect::<Vec<_>>())
            })
            .map_err(StorageError::Read)?;
        // Timestamps in other offsets do not sort as text.
        records.sort_by(|lhs, rhs| {
            rhs.timestamp.cmp(&lhs.timestamp).then_with(|| rhs.id.cmp(&lhs.id))
        });
        Ok(records)
    }

    /// Release the connection. Subsequent calls are no-ops.
    pub fn close(&mut self) {
        if let Some(connection) = self.connection.take() {
            match connection.close() {
                Ok(()) => info!(path = %self.path.display(), "closed the database"),
                Err((_, error)) => warn!("failed to close the database cleanly: {error:#}"),
            }
        }
    }
}

impl Drop for RecordStore {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        appliance::Appliance,
        quantity::{
            cost::Cost,
            energy::KilowattHours,
            power::Watts,
            rate::KilowattHourRate,
            size::{Inches, Kilograms},
        },
    };

    fn save(store: &RecordStore, appliance: &Appliance, consumption: f64) -> i64 {
        store
            .save_record(
                &NewRecord::builder()
                    .appliance(appliance)
                    .hours_used(Hours(2.0))
                    .consumption(KilowattHours(consumption))
                    .cost(Cost(consumption * 0.15))
                    .tariff(KilowattHourRate(0.15))
                    .build(),
            )
            .unwrap()
    }

    #[test]
    fn empty_store_lists_nothing() {
        let store = RecordStore::open(":memory:").unwrap();
        assert!(store.list_all_records().is_empty());
    }

    #[test]
    fn save_then_list_ok() {
        let store = RecordStore::open(":memory:").unwrap();
        let iron = Appliance::iron("Iron", Watts(2000.0), true).unwrap();
        let before = Utc::now();

        let id = save(&store, &iron, 4.0);

        let records = store.list_all_records();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert!(id > 0);
        assert_eq!(record.id, id);
        assert_eq!(record.appliance_name, "Iron");
        assert_eq!(record.power, Watts(2000.0));
        assert_eq!(record.hours_used, Hours(2.0));
        assert_eq!(record.consumption, KilowattHours(4.0));
        assert_abs_diff_eq!(record.cost.0, 0.6, epsilon = 1e-12);
        assert_eq!(record.tariff, KilowattHourRate(0.15));
        assert!(record.timestamp >= before - chrono::TimeDelta::seconds(1));
    }

    #[test]
    fn newest_first() {
        let store = RecordStore::open(":memory:").unwrap();
        let tv = Appliance::tv("TV", Watts(150.0), Inches(55.0)).unwrap();
        let washer = Appliance::washing_machine("Washer", Watts(2200.0), Kilograms(7.0)).unwrap();

        let first_id = save(&store, &tv, 0.3);
        let second_id = save(&store, &washer, 4.4);

        let records = store.list_all_records();
        assert_eq!(records.len(), 2);
        assert!(second_id > first_id);
        assert_eq!(records[0].id, second_id);
        assert_eq!(records[0].appliance_name, "Washer");
        assert_eq!(records[1].id, first_id);
    }

    #[test]
    fn save_result_pairs_appliances_positionally() {
        let store = RecordStore::open(":memory:").unwrap();
        let mut first = Appliance::iron("Iron", Watts(1000.0), false).unwrap();
        first.turn_on();
        let second = Appliance::iron("Iron", Watts(3000.0), true).unwrap();
        let calculator =
            EnergyCalculator::try_new(vec![first, second], KilowattHourRate(0.2)).unwrap();
        let result = calculator.calculate(Hours(1.0)).unwrap();

        assert_eq!(store.save_result(&calculator, &result, Hours(1.0)), 2);

        let records = store.list_all_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].power, Watts(3000.0));
        assert_eq!(records[0].consumption, KilowattHours::ZERO);
        assert_eq!(records[1].power, Watts(1000.0));
        assert_eq!(records[1].consumption, KilowattHours(1.0));
        assert_eq!(records[1].tariff, KilowattHourRate(0.2));
    }

    #[test]
    fn closed_store_fails_softly() {
        let mut store = RecordStore::open(":memory:").unwrap();
        store.close();
        store.close();

        let tv = Appliance::tv("TV", Watts(150.0), Inches(55.0)).unwrap();
        let record = NewRecord::builder()
            .appliance(&tv)
            .hours_used(Hours(1.0))
            .consumption(KilowattHours::ZERO)
            .cost(Cost::ZERO)
            .tariff(KilowattHourRate(0.15))
            .build();
        assert!(matches!(store.save_record(&record), Err(StorageError::Closed)));
        assert!(store.list_all_records().is_empty());

        let calculator = EnergyCalculator::try_new(vec![tv], KilowattHourRate(0.15)).unwrap();
        let result = calculator.calculate(Hours(1.0)).unwrap();
        assert_eq!(store.save_result(&calculator, &result, Hours(1.0)), 0);
    }

    #[test]
    fn timestamps_without_offset_are_listed() {
        let store = RecordStore::open(":memory:").unwrap();
        let iron = Appliance::iron("Iron", Watts(2000.0), true).unwrap();
        let saved_id = save(&store, &iron, 4.0);
        store
            .connection()
            .unwrap()
            .execute_batch(
                r"
                INSERT INTO consumption_records (
                    appliance_name, power_consumption_watts, hours_used, consumption_kwh, cost,
                    tariff, timestamp
                ) VALUES ('TV', 150, 24.0, 3.6, 0.54, 0.15, '2025-01-01T10:00:00.123456');
                INSERT INTO consumption_records (
                    appliance_name, power_consumption_watts, hours_used, consumption_kwh, cost,
                    tariff, timestamp
                ) VALUES ('Washer', 2200, 1.0, 2.2, 0.33, 0.15, 'not a timestamp');
                ",
            )
            .unwrap();

        let records = store.list_all_records();
        let names = records.iter().map(|record| record.appliance_name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["Iron", "TV"]);
        assert_eq!(records[0].id, saved_id);
        assert_eq!(
            records[1].timestamp.with_timezone(&chrono::Local).format("%F %T%.6f").to_string(),
            "2025-01-01 10:00:00.123456",
        );
        assert_eq!(records[1].consumption, KilowattHours(3.6));
    }

    #[test]
    fn one_failed_record_does_not_stop_the_others() {
        let store = RecordStore::open(":memory:").unwrap();
        store
            .connection()
            .unwrap()
            .execute_batch(
                r"
                CREATE TRIGGER reject_tv BEFORE INSERT ON consumption_records
                WHEN NEW.appliance_name = 'TV'
                BEGIN
                    SELECT RAISE(ABORT, 'TV records are rejected');
                END;
                ",
            )
            .unwrap();
        let mut appliances = vec![
            Appliance::iron("Iron", Watts(2000.0), true).unwrap(),
            Appliance::tv("TV", Watts(150.0), Inches(55.0)).unwrap(),
            Appliance::washing_machine("Washer", Watts(2200.0), Kilograms(7.0)).unwrap(),
        ];
        appliances.iter_mut().for_each(Appliance::turn_on);
        let calculator = EnergyCalculator::try_new(appliances, KilowattHourRate(0.15)).unwrap();
        let result = calculator.calculate(Hours(1.0)).unwrap();

        assert_eq!(store.save_result(&calculator, &result, Hours(1.0)), 2);

        let records = store.list_all_records();
        let names = records.iter().map(|record| record.appliance_name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["Washer", "Iron"]);
        assert_eq!(records[0].consumption, KilowattHours(2.2));
    }

    #[test]
    fn records_survive_reopening() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("energy_consumption.db");
        let tv = Appliance::tv("TV", Watts(150.0), Inches(55.0)).unwrap();

        let mut store = RecordStore::open(&path).unwrap();
        save(&store, &tv, 0.15);
        store.close();

        let store = RecordStore::open(&path).unwrap();
        let records = store.list_all_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].appliance_name, "TV");
    }

    #[test]
    fn unopenable_path_fails() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("missing").join("energy_consumption.db");
        assert!(matches!(
            RecordStore::open(&path),
            Err(StorageError::Open { .. } | StorageError::Schema(_)),
        ));
    }
}
