use clap::Parser;

use crate::{
    cli::{input::InputArgs, parameters::ParameterArgs},
    prelude::*,
    redistribution::AlgorithmKind,
    strategy::Registry,
    tables::{build_metrics_table, build_transfers_table},
};

#[derive(Parser)]
pub struct SimulateArgs {
    #[clap(flatten)]
    pub input: InputArgs,

    /// Redistribution to run instead of the provider's own.
    #[clap(long, env = "EFFEKT_ALGORITHM")]
    pub algorithm: Option<AlgorithmKind>,

    /// Print the metrics as JSON instead of the tables.
    #[clap(long)]
    pub json: bool,

    #[clap(flatten)]
    pub parameters: ParameterArgs,
}

#[instrument(skip_all, fields(provider = %args.input.provider))]
pub fn simulate(args: &SimulateArgs) -> Result {
    let registry = Registry::default();
    let base = registry.resolve(&args.input.provider)?;
    let kind = args.algorithm.unwrap_or_else(|| base.algorithm_kind());
    let strategy = args.parameters.strategy(base, kind)?;
    let series = args.input.read_series()?;

    let metrics = strategy.calculate_metrics(&series);
    info!(
        algorithm = %kind,
        fee = %metrics.optimized.fee,
        n_transfers = metrics.transfers.len(),
        "simulated",
    );
    if let Some(savings) = metrics.savings() {
        info!(%savings, "saved");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
    } else {
        println!("{}", build_metrics_table(&metrics));
        if !metrics.transfers.is_empty() {
            println!("{}", build_transfers_table(&metrics.transfers));
        }
    }
    Ok(())
}
