mod calculate;
mod db;
mod history;
mod report;

use clap::{Parser, Subcommand};

pub use self::{calculate::CalculateArgs, history::HistoryArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Ask for the tariff, period and appliances, then calculate, save and report.
    #[clap(name = "calculate")]
    Calculate(Box<CalculateArgs>),

    /// List the saved consumption records, newest first.
    #[clap(name = "history")]
    History(HistoryArgs),
}
