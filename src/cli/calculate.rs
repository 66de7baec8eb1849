use std::io::{BufRead, Write, stdin, stdout};

use chrono::Local;
use clap::Parser;
use itertools::Itertools;

use crate::{
    cli::{db::DbArgs, report::ReportArgs},
    db::RecordStore,
    error::InputError,
    prelude::*,
    prompt::Prompter,
    report,
    tables::{build_records_table, build_result_table},
};

#[derive(Parser)]
pub struct CalculateArgs {
    #[clap(flatten)]
    db: DbArgs,

    #[clap(flatten)]
    reports: ReportArgs,

    /// Number of the latest saved records to show after the calculation.
    #[clap(long, env = "HISTORY_LIMIT", default_value = "5")]
    history_limit: usize,
}

impl CalculateArgs {
    pub fn run(self) -> Result {
        println!("Welcome to the household appliance energy calculator!");
        let mut store = self.db.open_or_warn();
        let result = self.run_with(store.as_ref(), &mut Prompter::new(stdin().lock(), stdout()));
        if let Some(store) = &mut store {
            store.close();
        }
        result
    }

    /// The whole run except for the database lifecycle.
    ///
    /// Invalid input ends the run early, yet successfully.
    #[instrument(skip_all)]
    fn run_with(
        &self,
        store: Option<&RecordStore>,
        prompter: &mut Prompter<impl BufRead, impl Write>,
    ) -> Result {
        let parameters = match prompter.ask_run_parameters() {
            Ok(parameters) => parameters,
            Err(error @ InputError::Console(_)) => return Err(error.into()),
            Err(error) => {
                error!("{error:#}");
                println!("Could not get valid input, exiting.");
                return Ok(());
            }
        };
        let calculator = match parameters.try_into_calculator() {
            Ok(calculator) => calculator,
            Err(error) => {
                error!("{error:#}");
                println!("Could not get valid input, exiting.");
                return Ok(());
            }
        };
        println!("{calculator}");

        let result = match calculator.calculate(parameters.period) {
            Ok(result) => result,
            Err(error) => {
                error!("{error:#}");
                println!("Calculation failed, exiting.");
                return Ok(());
            }
        };
        println!("{}", build_result_table(&result));

        if let Some(store) = store {
            let n_saved = store.save_result(&calculator, &result, parameters.period);
            info!(n_saved, n_total = result.details.len(), "saved the records");
            let latest = store.list_all_records().into_iter().take(self.history_limit).collect_vec();
            if latest.is_empty() {
                println!("There are no records in the database yet.");
            } else {
                println!("Latest records:");
                println!("{}", build_records_table(&latest));
            }
        }

        if self.reports.skip {
            info!("skipping the reports");
        } else {
            for path in report::save_all(&result, &self.reports.directory, Local::now()) {
                println!("Saved the report to `{}`", path.display());
            }
        }

        Ok(())
    }
}
