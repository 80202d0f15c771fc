//! Provider strategies: a billing rule paired with the redistribution that suits it.

mod registry;

pub use self::registry::Registry;
use crate::{
    billing::{Billable, BillingRule},
    core::{night_hours::NightHours, reading::Reading},
    metrics::Metrics,
    prelude::*,
    redistribution::{Algorithm, AlgorithmKind},
};

#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct Strategy {
    /// Identifier the strategy is resolved by.
    pub id: &'static str,

    /// Grid operator's display name.
    pub name: &'static str,

    pub rule: BillingRule,
    pub algorithm: Algorithm,

    /// Operator's advice on lowering the demand fee, in display order.
    pub guidance: &'static [&'static str],

    pub additional_information: Option<&'static str>,
}

impl Strategy {
    /// Redistribute the series and rate it before and after.
    #[instrument(skip_all, fields(provider = self.id, algorithm = %self.algorithm.kind()))]
    pub fn calculate_metrics(&self, series: &[Reading]) -> Metrics {
        let redistribution = self.algorithm.redistribute(series);
        let original = self.apply_billing_rule(series);
        let optimized = self.apply_billing_rule(&redistribution.series);
        Metrics::compute()
            .raw(series)
            .original(&original)
            .optimized(&optimized)
            .redistribution(redistribution)
            .rate(self.rule.rate())
            .call()
    }

    #[must_use]
    pub fn apply_billing_rule(&self, series: &[Reading]) -> Vec<Billable> {
        self.rule.apply(series)
    }

    #[must_use]
    pub const fn guidance_text(&self) -> &'static [&'static str] {
        self.guidance
    }

    #[must_use]
    pub const fn night_hours(&self) -> Option<NightHours> {
        self.rule.night_hours()
    }

    #[must_use]
    pub const fn algorithm_kind(&self) -> AlgorithmKind {
        self.algorithm.kind()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        core::series::{TotalUsage, fixtures::hourly},
        quantity::{currency::Kronor, energy::KilowattHours},
    };

    /// All 5 kWh but a single 20 kWh day peak at 13:00.
    fn single_day_peak() -> Vec<Reading> {
        let mut usages = [5.0; 24];
        usages[13] = 20.0;
        hourly(&usages)
    }

    #[test]
    fn test_ellevio_metrics() -> Result {
        let registry = Registry::default();
        let metrics = registry.resolve("Ellevio")?.calculate_metrics(&single_day_peak());

        assert_abs_diff_eq!(metrics.total_usage.0, 135.0);
        assert_abs_diff_eq!(metrics.series.iter().total_usage().0, 135.0);

        // Before: 20 kWh peak plus two 5 kWh day slots.
        let original = metrics.original.context("no original")?;
        assert_eq!(original.top, [KilowattHours(20.0), KilowattHours(5.0), KilowattHours(5.0)]);
        assert_abs_diff_eq!(original.fee.0, 10.0 * 65.0);

        // After: half of the peak has moved into the night, where it is billed at a half.
        assert!(metrics.optimized.fee < original.fee);
        assert!(metrics.savings() > Some(Kronor(0.0)));
        assert!(!metrics.transfers.is_empty());
        Ok(())
    }

    #[test]
    fn test_apply_billing_rule_is_pure() {
        let registry = Registry::default();
        let series = single_day_peak();
        for strategy in registry.iter() {
            assert_eq!(strategy.apply_billing_rule(&series), strategy.apply_billing_rule(&series));
        }
        assert_eq!(series, single_day_peak());
    }

    #[test]
    fn test_night_hours() -> Result {
        let registry = Registry::default();
        assert_eq!(registry.resolve("Ellevio")?.night_hours(), Some(NightHours::DEFAULT));
        assert_eq!(registry.resolve("GE")?.night_hours(), None);
        assert_eq!(registry.resolve("GE-TOU")?.night_hours(), None);
        Ok(())
    }

    #[test]
    fn test_algorithm_kind() {
        for strategy in Registry::default().iter() {
            assert_eq!(strategy.algorithm_kind(), AlgorithmKind::TopN);
        }
    }
}
