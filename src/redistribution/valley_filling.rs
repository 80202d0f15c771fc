use bon::Builder;

use crate::{
    core::{night_hours::NightHours, reading::Reading, series::Series},
    prelude::*,
    quantity::{Zero, energy::KilowattHours},
    redistribution::{rebuild, usages},
};

/// Fill each night slot from whatever slot is currently the global peak.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Builder)]
pub struct ValleyFilling {
    /// Fraction of the current peak's usage moved per iteration.
    #[builder(default = 0.2)]
    pub transfer_factor: f64,

    /// Iteration limit per valley.
    #[builder(default = 50)]
    pub max_iterations: usize,

    #[builder(default = KilowattHours::TEN)]
    pub capacity: KilowattHours,

    #[builder(default)]
    pub night_hours: NightHours,
}

impl Default for ValleyFilling {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ValleyFilling {
    #[instrument(skip_all, fields(len = series.len()))]
    pub fn redistribute(&self, series: &[Reading]) -> Series {
        let mut usages = usages(series);
        let valleys = (0..series.len())
            .filter(|index| self.night_hours.is_night(&series[*index].timestamp))
            .collect::<Vec<_>>();
        let mut n_transfers = 0_usize;
        let mut n_exhausted = 0_usize;

        for valley in valleys {
            let mut n_iterations = 0;
            while n_iterations < self.max_iterations && usages[valley] < self.capacity {
                let Some(peak) = global_peak(&usages) else { break };
                if usages[peak] <= usages[valley] {
                    break;
                }
                let amount =
                    (usages[peak] * self.transfer_factor).min(self.capacity - usages[valley]);
                if amount <= KilowattHours::ZERO {
                    break;
                }
                usages[valley] += amount;
                usages[peak] -= amount;
                n_iterations += 1;
            }
            n_transfers += n_iterations;
            if n_iterations == self.max_iterations {
                n_exhausted += 1;
            }
        }

        debug!(n_transfers, n_exhausted, "filled the valleys");
        rebuild(series, usages)
    }
}

/// Index of the first highest usage.
fn global_peak(usages: &[KilowattHours]) -> Option<usize> {
    (0..usages.len()).reduce(|peak, index| if usages[index] > usages[peak] { index } else { peak })
}
