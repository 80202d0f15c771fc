use bon::Builder;
use itertools::Itertools;

use crate::{
    core::{night_hours::NightHours, reading::Reading, series::Series},
    prelude::*,
    quantity::{Zero, energy::KilowattHours},
    redistribution::{rebuild, usages},
};

/// Shave local peaks found by a centered sliding window into the window's night slots.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Builder)]
pub struct PeakShaving {
    /// The window spans `window_size / 2` slots on each side of the center,
    /// so an even size behaves like the next odd one.
    #[builder(default = 5)]
    pub window_size: usize,

    /// A slot is a local peak when it exceeds the mean of its neighbours by this factor.
    #[builder(default = 1.1)]
    pub threshold_factor: f64,

    /// Fraction of the excess over the local mean to shave off.
    #[builder(default = 0.5)]
    pub shave_ratio: f64,

    #[builder(default = KilowattHours::TEN)]
    pub capacity: KilowattHours,

    #[builder(default)]
    pub night_hours: NightHours,
}

impl Default for PeakShaving {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl PeakShaving {
    /// Slots closer than half a window to either end are left untouched. The slots are visited
    /// in order, so a window sees the shaving already done to its left part.
    ///
    /// The shaved energy is split evenly between the night neighbours that still have room,
    /// each taking no more than fits under the capacity. Whatever does not fit stays in the peak.
    #[instrument(skip_all, fields(window_size = self.window_size, len = series.len()))]
    pub fn redistribute(&self, series: &[Reading]) -> Series {
        let half_window = self.window_size / 2;
        let mut usages = usages(series);
        if half_window == 0 {
            return rebuild(series, usages);
        }
        let mut n_shaved = 0_usize;

        for index in half_window..series.len().saturating_sub(half_window) {
            let neighbours = ((index - half_window)..=(index + half_window))
                .filter(|neighbour| *neighbour != index)
                .collect_vec();
            #[allow(clippy::cast_precision_loss)]
            let local_mean = neighbours
                .iter()
                .map(|neighbour| usages[*neighbour])
                .sum::<KilowattHours>()
                / neighbours.len() as f64;
            if usages[index] <= local_mean * self.threshold_factor {
                continue;
            }

            let receivers = neighbours
                .into_iter()
                .filter(|neighbour| {
                    self.night_hours.is_night(&series[*neighbour].timestamp)
                        && usages[*neighbour] < self.capacity
                })
                .collect_vec();
            if receivers.is_empty() {
                continue;
            }

            #[allow(clippy::cast_precision_loss)]
            let portion = (usages[index] - local_mean) * self.shave_ratio / receivers.len() as f64;
            let mut shaved = KilowattHours::ZERO;
            for receiver in receivers {
                let amount = portion.min(self.capacity - usages[receiver]);
                usages[receiver] += amount;
                shaved += amount;
            }
            usages[index] -= shaved;
            n_shaved += 1;
        }

        debug!(n_shaved, "shaved the local peaks");
        rebuild(series, usages)
    }
}
