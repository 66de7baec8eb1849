use clap::Parser;
use itertools::Itertools;

use crate::{cli::db::DbArgs, prelude::*, tables::build_records_table};

#[derive(Parser)]
pub struct HistoryArgs {
    #[clap(flatten)]
    db: DbArgs,

    /// Show only this many of the latest records.
    #[clap(long, env = "HISTORY_LIMIT")]
    limit: Option<usize>,
}

impl HistoryArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let mut store = self.db.open()?;
        let limit = self.limit.unwrap_or(usize::MAX);
        let records = store.list_all_records().into_iter().take(limit).collect_vec();
        if records.is_empty() {
            println!("There are no records in the database yet.");
        } else {
            println!("{}", build_records_table(&records));
        }
        store.close();
        Ok(())
    }
}
