use bon::Builder;

use crate::{
    billing::BillingRule,
    core::{
        night_hours::NightHours,
        reading::Reading,
        series::{TopIndices, lowest_first},
        transfer::Transfer,
    },
    prelude::*,
    quantity::{Zero, energy::KilowattHours},
    redistribution::{Redistribution, rebuild, usages},
};

/// Slots eligible to receive the energy shifted away from a peak.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Targets {
    /// Only the slots within the night hours.
    Night(NightHours),

    /// Any slot other than the peak itself.
    Any,
}

impl Default for Targets {
    fn default() -> Self {
        Self::Night(NightHours::default())
    }
}

impl Targets {
    /// Night slots for a night-discount rule, every slot otherwise.
    pub fn for_rule(rule: &BillingRule) -> Self {
        rule.night_hours().map_or(Self::Any, Self::Night)
    }

    #[must_use]
    pub fn accepts(self, reading: &Reading) -> bool {
        match self {
            Self::Night(night_hours) => night_hours.is_night(&reading.timestamp),
            Self::Any => true,
        }
    }
}

/// Move a part of each of the top N peaks into the emptiest target slots.
#[must_use]
#[derive(Clone, Debug, PartialEq, Builder)]
pub struct TopNPeakShift {
    /// Number of peaks to shift.
    #[builder(default = 3)]
    pub n: usize,

    /// Fraction of a peak's usage to move away.
    #[builder(default = 0.5)]
    pub move_ratio: f64,

    /// Maximum usage a target slot may receive up to.
    #[builder(default = KilowattHours::TEN)]
    pub capacity: KilowattHours,

    #[builder(default)]
    pub targets: Targets,

    /// Rule the peaks are ranked by.
    #[builder(default)]
    pub ranking: BillingRule,
}

impl Default for TopNPeakShift {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl TopNPeakShift {
    /// Peaks are processed in their ranking order, and the targets are re-sorted before each peak,
    /// so a later peak sees the slots already topped up by an earlier one.
    #[instrument(skip_all, fields(n = self.n, len = series.len()))]
    pub fn redistribute(&self, series: &[Reading]) -> Redistribution {
        let mut usages = usages(series);
        let peaks = series.iter().map(|reading| self.ranking.billable(reading)).top_indices(self.n);
        let mut transfers = Vec::new();

        for peak in peaks {
            let mut remaining = usages[peak] * self.move_ratio;
            let targets = lowest_first(
                &usages,
                (0..series.len())
                    .filter(|index| *index != peak && self.targets.accepts(&series[*index])),
            );
            for target in targets {
                if remaining <= KilowattHours::ZERO {
                    break;
                }
                let space = self.capacity - usages[target];
                if space <= KilowattHours::ZERO {
                    continue;
                }
                let amount = space.min(remaining);
                usages[target] += amount;
                usages[peak] -= amount;
                remaining -= amount;
                transfers.push(Transfer {
                    from: series[peak].timestamp,
                    to: series[target].timestamp,
                    amount,
                });
            }
        }

        let moved: KilowattHours = transfers.iter().map(|transfer| transfer.amount).sum();
        debug!(n_transfers = transfers.len(), %moved, "shifted the top peaks");
        Redistribution { series: rebuild(series, usages), transfers }
    }
}
