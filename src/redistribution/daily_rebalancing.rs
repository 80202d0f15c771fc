use bon::Builder;
use itertools::Itertools;

use crate::{
    core::{reading::Reading, series::Series},
    prelude::*,
    quantity::energy::KilowattHours,
    redistribution::{rebuild, usages},
};

/// Equalize the slots of each calendar day toward the daily mean by pairwise transfers.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Builder)]
pub struct DailyRebalancing {
    #[builder(default = KilowattHours::TEN)]
    pub capacity: KilowattHours,

    /// Amounts this small are left where they are.
    #[builder(default = KilowattHours(1e-9))]
    pub tolerance: KilowattHours,
}

impl Default for DailyRebalancing {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl DailyRebalancing {
    /// Repeat the passes over all the above-mean and below-mean pairs until a pass moves nothing.
    ///
    /// Every transfer brings both slots closer to the mean without crossing it,
    /// so the total deviation strictly decreases and the loop terminates.
    #[instrument(skip_all, fields(len = series.len()))]
    pub fn redistribute(&self, series: &[Reading]) -> Series {
        let mut usages = usages(series);
        let days = (0..series.len()).into_group_map_by(|index| series[*index].timestamp.date());
        let mut n_passes = 0_usize;

        for day in days.into_values() {
            #[allow(clippy::cast_precision_loss)]
            let mean =
                day.iter().map(|index| usages[*index]).sum::<KilowattHours>() / day.len() as f64;
            loop {
                n_passes += 1;
                let mut changed = false;
                for &from in &day {
                    for &to in &day {
                        if from == to || usages[from] <= mean || usages[to] >= mean {
                            continue;
                        }
                        let amount = (usages[from] - mean)
                            .min(mean - usages[to])
                            .min(self.capacity - usages[to]);
                        if amount > self.tolerance {
                            usages[from] -= amount;
                            usages[to] += amount;
                            changed = true;
                        }
                    }
                }
                if !changed {
                    break;
                }
            }
        }

        debug!(n_passes, "rebalanced the days");
        rebuild(series, usages)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::series::fixtures::{hourly, two_days};

    #[test]
    fn test_days_reach_their_means() {
        let series = two_days();
        let rebalanced = DailyRebalancing::default().redistribute(&series);
        for day in [&rebalanced[..24], &rebalanced[24..]] {
            let mean = day.iter().map(|reading| reading.usage.0).sum::<f64>() / 24.0;
            for reading in day {
                assert_abs_diff_eq!(reading.usage.0, mean, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_energy_stays_within_its_day() {
        let mut usages = [1.0; 48];
        usages[18] = 9.0;
        let series = hourly(&usages);
        let rebalanced = DailyRebalancing::default().redistribute(&series);
        let first_day: f64 = rebalanced[..24].iter().map(|reading| reading.usage.0).sum();
        assert_abs_diff_eq!(first_day, 32.0, epsilon = 1e-9);
        for reading in &rebalanced[24..] {
            assert_abs_diff_eq!(reading.usage.0, 1.0);
        }
    }

    #[test]
    fn test_capacity_limits_the_receivers() {
        // The daily mean is above the capacity, so nothing can be received:
        let series = hourly(&[10.0, 10.0, 16.0]);
        let algorithm = DailyRebalancing::builder().capacity(KilowattHours(10.0)).build();
        assert_eq!(algorithm.redistribute(&series), series);
    }

    #[test]
    fn test_balanced_day_is_unchanged() {
        let series = hourly(&[2.0; 24]);
        assert_eq!(DailyRebalancing::default().redistribute(&series), series);
    }
}
