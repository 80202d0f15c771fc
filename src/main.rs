#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod billing;
mod cli;
mod core;
mod metrics;
mod prelude;
mod quantity;
mod redistribution;
mod strategy;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command, compare, simulate},
    prelude::*,
    strategy::Registry,
    tables::build_providers_table,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Providers => {
            println!("{}", build_providers_table(&Registry::default()));
        }
        Command::Simulate(args) => {
            simulate(&args)?;
        }
        Command::Compare(args) => {
            compare(&args)?;
        }
    }

    Ok(())
}
