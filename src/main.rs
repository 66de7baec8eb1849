use std::io::stderr;

use appliance_energy::{
    cli::{Args, Command},
    prelude::*,
};
use clap::{Parser, crate_version};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(stderr).init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Calculate(args) => args.run()?,
        Command::History(args) => args.run()?,
    }

    info!("done!");
    Ok(())
}
