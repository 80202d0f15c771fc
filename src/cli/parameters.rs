use clap::Parser;

use crate::{
    billing::BillingRule,
    core::night_hours::NightHours,
    prelude::*,
    quantity::{energy::KilowattHours, price::KilowattPrice},
    redistribution::{
        Algorithm,
        AlgorithmKind,
        DailyRebalancing,
        LinearFlatten,
        PeakShaving,
        Smoothing,
        Targets,
        TopNPeakShift,
        ValleyFilling,
    },
    strategy::Strategy,
};

/// Overrides of the provider's rule and of the redistribution defaults.
#[derive(Parser)]
pub struct ParameterArgs {
    /// Demand-fee rate instead of the provider's one (the high rate for time-of-use).
    #[clap(long = "rate-kr-per-kw", env = "EFFEKT_RATE")]
    pub rate: Option<KilowattPrice>,

    /// Hours of day billed at a discount and preferred as redistribution targets.
    #[clap(
        long,
        env = "EFFEKT_NIGHT_HOURS",
        value_delimiter = ',',
        default_value = "22,23,0,1,2,3,4,5"
    )]
    pub night_hours: Vec<u32>,

    /// Maximum usage of a slot receiving the redistributed energy.
    #[clap(long = "capacity-kwh", env = "EFFEKT_CAPACITY", default_value = "10")]
    pub capacity: KilowattHours,

    /// Number of the highest peaks shifted by the top-N algorithm.
    #[clap(long, env = "EFFEKT_TOP_N", default_value = "3")]
    pub top_n: usize,

    /// Fraction of a top-N peak moved away.
    #[clap(long, env = "EFFEKT_MOVE_RATIO", default_value = "0.5")]
    pub move_ratio: f64,

    #[clap(long, env = "EFFEKT_NIGHT_WEIGHT", default_value = "2")]
    pub night_weight: f64,

    #[clap(long, env = "EFFEKT_DAY_WEIGHT", default_value = "1")]
    pub day_weight: f64,

    /// Sliding window of the peak shaving.
    #[clap(long, env = "EFFEKT_SHAVING_WINDOW_SIZE", default_value = "5")]
    pub shaving_window_size: usize,

    /// Slots above the window average times this factor are shaved.
    #[clap(long, env = "EFFEKT_THRESHOLD_FACTOR", default_value = "1.1")]
    pub threshold_factor: f64,

    #[clap(long, env = "EFFEKT_SHAVE_RATIO", default_value = "0.5")]
    pub shave_ratio: f64,

    /// Fraction of the peak-to-valley difference moved per valley-filling iteration.
    #[clap(long, env = "EFFEKT_TRANSFER_FACTOR", default_value = "0.2")]
    pub transfer_factor: f64,

    #[clap(long, env = "EFFEKT_MAX_ITERATIONS", default_value = "50")]
    pub max_iterations: usize,

    /// Daily-rebalancing amounts at or below this one are not moved.
    #[clap(long = "tolerance-kwh", env = "EFFEKT_TOLERANCE", default_value = "1e-9")]
    pub tolerance: KilowattHours,

    /// Moving-average window of the smoothing.
    #[clap(long, env = "EFFEKT_SMOOTHING_WINDOW_SIZE", default_value = "5")]
    pub smoothing_window_size: usize,

    #[clap(long, env = "EFFEKT_NUDGE_FACTOR", default_value = "0.1")]
    pub nudge_factor: f64,
}

impl ParameterArgs {
    /// Provider's strategy with the overrides applied and the requested redistribution.
    pub fn strategy(&self, base: &Strategy, kind: AlgorithmKind) -> Result<Strategy> {
        let night_hours = NightHours::try_from_iter(self.night_hours.iter().copied())?;
        if night_hours.is_empty() {
            warn!("no night hours, the night-targeted redistributions will not move anything");
        }
        let mut rule = base.rule.clone().with_night_hours(night_hours);
        if let Some(rate) = self.rate {
            rule = rule.with_rate(rate);
        }
        let algorithm = self.algorithm(kind, &rule, night_hours);
        Ok(Strategy { rule, algorithm, ..base.clone() })
    }

    fn algorithm(
        &self,
        kind: AlgorithmKind,
        rule: &BillingRule,
        night_hours: NightHours,
    ) -> Algorithm {
        match kind {
            AlgorithmKind::TopN => Algorithm::TopN(
                TopNPeakShift::builder()
                    .n(self.top_n)
                    .move_ratio(self.move_ratio)
                    .capacity(self.capacity)
                    .targets(Targets::for_rule(rule))
                    .ranking(rule.ranking())
                    .build(),
            ),
            AlgorithmKind::LinearFlatten => Algorithm::LinearFlatten(
                LinearFlatten::builder()
                    .night_hours(night_hours)
                    .night_weight(self.night_weight)
                    .day_weight(self.day_weight)
                    .build(),
            ),
            AlgorithmKind::PeakShaving => Algorithm::PeakShaving(
                PeakShaving::builder()
                    .window_size(self.shaving_window_size)
                    .threshold_factor(self.threshold_factor)
                    .shave_ratio(self.shave_ratio)
                    .capacity(self.capacity)
                    .night_hours(night_hours)
                    .build(),
            ),
            AlgorithmKind::ValleyFilling => Algorithm::ValleyFilling(
                ValleyFilling::builder()
                    .transfer_factor(self.transfer_factor)
                    .max_iterations(self.max_iterations)
                    .capacity(self.capacity)
                    .night_hours(night_hours)
                    .build(),
            ),
            AlgorithmKind::DailyRebalancing => Algorithm::DailyRebalancing(
                DailyRebalancing::builder()
                    .capacity(self.capacity)
                    .tolerance(self.tolerance)
                    .build(),
            ),
            AlgorithmKind::Smoothing => Algorithm::Smoothing(
                Smoothing::builder()
                    .window_size(self.smoothing_window_size)
                    .nudge_factor(self.nudge_factor)
                    .build(),
            ),
        }
    }
}
