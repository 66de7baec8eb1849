use std::path::PathBuf;

use thiserror::Error;

use crate::quantity::{
    power::Watts,
    rate::KilowattHourRate,
    size::{Inches, Kilograms},
    time::Hours,
};

/// Rejected constructor or method argument.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("appliance name must not be empty")]
    EmptyName,

    #[error("power draw must be a positive number, got {0:?}")]
    NonPositivePower(Watts),

    #[error("screen size must be a positive number, got {0:?}")]
    NonPositiveScreenSize(Inches),

    #[error("capacity must be a positive number, got {0:?}")]
    NonPositiveCapacity(Kilograms),

    #[error("duration must be a non-negative number, got {0:?}")]
    NegativeHours(Hours),

    #[error("tariff must be a non-negative number, got {0:?}")]
    NegativeTariff(KilowattHourRate),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to open the database `{}`", path.display())]
    Open {
        path: PathBuf,

        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to ensure the database schema")]
    Schema(#[source] rusqlite::Error),

    #[error("failed to save the record for `{appliance_name}`")]
    Write {
        appliance_name: String,

        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to read the records")]
    Read(#[source] rusqlite::Error),

    #[error("the database is closed")]
    Closed,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create `{}`", path.display())]
    Create {
        path: PathBuf,

        #[source]
        source: std::io::Error,
    },

    #[error("failed to write the report")]
    Write(#[from] std::io::Error),

    #[error("failed to write the spreadsheet")]
    Csv(#[from] csv::Error),

    #[error("failed to serialize the report")]
    Json(#[from] serde_json::Error),

    #[error("failed to build the workbook")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("`{answer}` is not a valid answer to «{question}»")]
    Parse { question: String, answer: String },

    #[error("the input ended before all the questions were answered")]
    UnexpectedEof,

    #[error("failed to access the console")]
    Console(#[from] std::io::Error),
}
