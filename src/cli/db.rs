use std::path::{Path, PathBuf};

use clap::Parser;

use crate::{db::RecordStore, prelude::*};

#[derive(Parser)]
pub struct DbArgs {
    /// SQLite database file, must end with `.db`.
    #[clap(
        long = "db-path",
        env = "DATABASE_PATH",
        default_value = "energy_consumption.db",
        value_parser = parse_path,
    )]
    pub path: PathBuf,
}

impl DbArgs {
    pub fn open(&self) -> Result<RecordStore> {
        RecordStore::open(&self.path).context("failed to initialize the database")
    }

    /// Open the store, or carry on without saving the records.
    pub fn open_or_warn(&self) -> Option<RecordStore> {
        match self.open() {
            Ok(store) => {
                println!("The database `{}` is ready.", store.path().display());
                Some(store)
            }
            Err(error) => {
                warn!("{error:#}");
                println!("Could not initialize the database, the records will not be saved.");
                None
            }
        }
    }
}

fn parse_path(value: &str) -> Result<PathBuf> {
    ensure!(
        value == ":memory:"
            || Path::new(value).extension().is_some_and(|extension| extension == "db"),
        "the database file name must end with `.db`",
    );
    Ok(PathBuf::from(value))
}
