use clap::Parser;
use enumset::EnumSet;

use crate::{
    cli::{input::InputArgs, parameters::ParameterArgs},
    prelude::*,
    redistribution::AlgorithmKind,
    strategy::Registry,
    tables::build_comparison_table,
};

#[derive(Parser)]
pub struct CompareArgs {
    #[clap(flatten)]
    pub input: InputArgs,

    /// Redistributions to compare, all of them by default.
    #[clap(long, env = "EFFEKT_ALGORITHMS", value_delimiter = ',')]
    pub algorithms: Vec<AlgorithmKind>,

    #[clap(flatten)]
    pub parameters: ParameterArgs,
}

impl CompareArgs {
    fn algorithms(&self) -> EnumSet<AlgorithmKind> {
        if self.algorithms.is_empty() {
            EnumSet::all()
        } else {
            self.algorithms.iter().copied().collect()
        }
    }
}

#[instrument(skip_all, fields(provider = %args.input.provider))]
pub fn compare(args: &CompareArgs) -> Result {
    let registry = Registry::default();
    let base = registry.resolve(&args.input.provider)?;
    let series = args.input.read_series()?;

    let mut rows = Vec::new();
    for kind in args.algorithms() {
        let strategy = args.parameters.strategy(base, kind)?;
        rows.push((kind, strategy.calculate_metrics(&series)));
    }
    info!(n_algorithms = rows.len(), "compared");

    println!("{}", build_comparison_table(&rows));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_algorithms_by_default() {
        let args = CompareArgs::parse_from(["effekt", "--provider", "GE", "--input", "x.json"]);
        assert_eq!(args.algorithms(), EnumSet::all());
    }

    #[test]
    fn test_selected_algorithms() {
        let args = CompareArgs::parse_from([
            "effekt",
            "--provider",
            "GE",
            "--input",
            "x.json",
            "--algorithms",
            "smoothing,top-n,smoothing",
        ]);
        assert_eq!(args.algorithms(), AlgorithmKind::Smoothing | AlgorithmKind::TopN);
    }
}
