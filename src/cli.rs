mod compare;
mod input;
mod parameters;
mod simulate;

use clap::{Parser, Subcommand};

pub use self::{compare::compare, simulate::simulate};
use crate::cli::{compare::CompareArgs, simulate::SimulateArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the known grid operators with their fee models and guidance.
    #[clap(name = "providers")]
    Providers,

    /// Redistribute the readings and compare the demand fee before and after.
    #[clap(name = "simulate")]
    Simulate(Box<SimulateArgs>),

    /// Run several redistributions under the same provider and rank their fees.
    #[clap(name = "compare")]
    Compare(Box<CompareArgs>),
}
