use bon::bon;

use crate::{
    billing::{Billable, PeakSummary},
    core::{
        reading::Reading,
        series::{Series, TotalUsage},
        transfer::Transfer,
    },
    prelude::*,
    quantity::{currency::Kronor, energy::KilowattHours, price::KilowattPrice},
    redistribution::Redistribution,
};

/// Before and after comparison of a redistribution under a billing rule.
#[must_use]
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct Metrics {
    /// Total usage of the unmodified input.
    pub total_usage: KilowattHours,

    pub optimized: PeakSummary,

    /// Peaks of the unmodified input, when a comparison is requested.
    pub original: Option<PeakSummary>,

    pub transfers: Vec<Transfer>,

    /// Redistributed series.
    pub series: Series,

    pub rate: KilowattPrice,
}

#[bon]
impl Metrics {
    /// Summarize the rated series.
    ///
    /// Total usage is taken from the unmodified input, `original` and `optimized` are the input and
    /// the redistributed series rated by the billing rule.
    #[builder]
    pub fn compute(
        raw: &[Reading],
        original: Option<&[Billable]>,
        optimized: &[Billable],
        redistribution: Redistribution,
        rate: KilowattPrice,
    ) -> Self {
        let metrics = Self {
            total_usage: raw.iter().total_usage(),
            optimized: PeakSummary::from_rated(optimized, rate),
            original: original.map(|original| PeakSummary::from_rated(original, rate)),
            transfers: redistribution.transfers,
            series: redistribution.series,
            rate,
        };
        debug!(
            total_usage = %metrics.total_usage,
            fee = %metrics.optimized.fee,
            original_fee = ?metrics.original.map(|original| original.fee),
            "computed",
        );
        metrics
    }

    /// Fee reduction achieved by the redistribution.
    #[must_use]
    pub fn savings(&self) -> Option<Kronor> {
        self.original.map(|original| original.fee - self.optimized.fee)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        billing::{BillingRule, Flat},
        core::series::fixtures::hourly,
    };

    #[test]
    fn test_degenerate_series() {
        let series = hourly(&[10.0, 5.0, 0.0]);
        let rule = BillingRule::from(Flat::default());
        let rated = rule.apply(&series);
        let metrics = Metrics::compute()
            .raw(&series)
            .original(&rated)
            .optimized(&rated)
            .redistribution(series.clone().into())
            .rate(rule.rate())
            .call();

        assert_abs_diff_eq!(metrics.total_usage.0, 15.0);
        assert_abs_diff_eq!(metrics.optimized.average.0, 5.0);
        assert_abs_diff_eq!(metrics.optimized.fee.0, 225.0);
        assert_eq!(metrics.savings(), Some(Kronor(0.0)));
    }

    #[test]
    fn test_without_original() {
        let series = hourly(&[1.0]);
        let rule = BillingRule::default();
        let metrics = Metrics::compute()
            .raw(&series)
            .optimized(&rule.apply(&series))
            .redistribution(series.clone().into())
            .rate(rule.rate())
            .call();
        assert_eq!(metrics.original, None);
        assert_eq!(metrics.savings(), None);
        // Single night reading of 1 kWh is billed as a half, and divided by 3:
        assert_abs_diff_eq!(metrics.optimized.average.0, 0.5 / 3.0);
    }
}
