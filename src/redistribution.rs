//! Load-redistribution algorithms.
//!
//! Every algorithm takes a borrowed series and returns a new one with the same total usage:
//! energy is only moved between slots, never created or lost.

mod daily_rebalancing;
mod flatten;
mod peak_shaving;
mod smoothing;
mod top_n;
mod valley_filling;

use std::fmt::{Display, Formatter};

pub use self::{
    daily_rebalancing::DailyRebalancing,
    flatten::LinearFlatten,
    peak_shaving::PeakShaving,
    smoothing::Smoothing,
    top_n::{Targets, TopNPeakShift},
    valley_filling::ValleyFilling,
};
use crate::{
    core::{reading::Reading, series::Series, transfer::Transfer},
    quantity::energy::KilowattHours,
};

#[must_use]
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct Redistribution {
    pub series: Series,

    /// Point-to-point moves, recorded by the top-N peak shift only.
    pub transfers: Vec<Transfer>,
}

impl From<Series> for Redistribution {
    fn from(series: Series) -> Self {
        Self { series, transfers: Vec::new() }
    }
}

#[derive(Debug, clap::ValueEnum, enumset::EnumSetType)]
pub enum AlgorithmKind {
    /// Shift half of each of the top N peaks into the emptiest target slots.
    TopN,

    /// Reallocate the total usage over all slots, weighting night slots higher.
    LinearFlatten,

    /// Shave local peaks in a sliding window into the neighbouring night slots.
    PeakShaving,

    /// Fill night slots from whatever slot is currently the global peak.
    ValleyFilling,

    /// Equalize the slots of each calendar day toward the daily mean.
    DailyRebalancing,

    /// Nudge every slot toward its moving average.
    Smoothing,
}

impl Display for AlgorithmKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TopN => write!(f, "Top-N peak shift"),
            Self::LinearFlatten => write!(f, "Linear flatten"),
            Self::PeakShaving => write!(f, "Peak shaving"),
            Self::ValleyFilling => write!(f, "Valley filling"),
            Self::DailyRebalancing => write!(f, "Daily rebalancing"),
            Self::Smoothing => write!(f, "Smoothing"),
        }
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub enum Algorithm {
    TopN(TopNPeakShift),
    LinearFlatten(LinearFlatten),
    PeakShaving(PeakShaving),
    ValleyFilling(ValleyFilling),
    DailyRebalancing(DailyRebalancing),
    Smoothing(Smoothing),
}

impl Algorithm {
    pub fn redistribute(&self, series: &[Reading]) -> Redistribution {
        match self {
            Self::TopN(algorithm) => algorithm.redistribute(series),
            Self::LinearFlatten(algorithm) => algorithm.redistribute(series).into(),
            Self::PeakShaving(algorithm) => algorithm.redistribute(series).into(),
            Self::ValleyFilling(algorithm) => algorithm.redistribute(series).into(),
            Self::DailyRebalancing(algorithm) => algorithm.redistribute(series).into(),
            Self::Smoothing(algorithm) => algorithm.redistribute(series).into(),
        }
    }

    pub const fn kind(&self) -> AlgorithmKind {
        match self {
            Self::TopN(_) => AlgorithmKind::TopN,
            Self::LinearFlatten(_) => AlgorithmKind::LinearFlatten,
            Self::PeakShaving(_) => AlgorithmKind::PeakShaving,
            Self::ValleyFilling(_) => AlgorithmKind::ValleyFilling,
            Self::DailyRebalancing(_) => AlgorithmKind::DailyRebalancing,
            Self::Smoothing(_) => AlgorithmKind::Smoothing,
        }
    }
}

impl From<AlgorithmKind> for Algorithm {
    /// Algorithm with its default parameters.
    fn from(kind: AlgorithmKind) -> Self {
        match kind {
            AlgorithmKind::TopN => Self::TopN(TopNPeakShift::default()),
            AlgorithmKind::LinearFlatten => Self::LinearFlatten(LinearFlatten::default()),
            AlgorithmKind::PeakShaving => Self::PeakShaving(PeakShaving::default()),
            AlgorithmKind::ValleyFilling => Self::ValleyFilling(ValleyFilling::default()),
            AlgorithmKind::DailyRebalancing => Self::DailyRebalancing(DailyRebalancing::default()),
            AlgorithmKind::Smoothing => Self::Smoothing(Smoothing::default()),
        }
    }
}

/// Copy the usages into a working buffer owned by a single algorithm call.
fn usages(series: &[Reading]) -> Vec<KilowattHours> {
    series.iter().map(|reading| reading.usage).collect()
}

/// Put the redistributed usages back onto the original timestamps.
fn rebuild(series: &[Reading], usages: Vec<KilowattHours>) -> Series {
    series.iter().zip(usages).map(|(reading, usage)| reading.with_usage(usage)).collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use enumset::EnumSet;

    use super::*;
    use crate::core::series::{
        TotalUsage,
        fixtures::{hourly, two_days},
    };

    fn fixtures() -> Vec<Series> {
        let mut day_only = vec![1.0; 20];
        day_only[12] = 8.0;
        let mut spiky = vec![0.5; 48];
        spiky[13] = 20.0;
        spiky[18] = 9.5;
        spiky[40] = 14.0;
        spiky[23] = 9.9;
        vec![
            two_days(),
            hourly(&spiky),
            hourly(&[10.0, 5.0, 0.0]),
            hourly(&[3.0]),
            hourly(&[]),
            // Day hours only:
            hourly(&day_only).into_iter().skip(6).collect(),
        ]
    }

    #[test]
    fn test_conservation() {
        for kind in EnumSet::<AlgorithmKind>::all() {
            for series in fixtures() {
                let redistribution = Algorithm::from(kind).redistribute(&series);
                assert_eq!(redistribution.series.len(), series.len(), "{kind}");
                assert_abs_diff_eq!(
                    redistribution.series.iter().total_usage().0,
                    series.iter().total_usage().0,
                    epsilon = 1e-9,
                );
            }
        }
    }

    #[test]
    fn test_timestamps_are_kept() {
        let series = two_days();
        for kind in EnumSet::<AlgorithmKind>::all() {
            let redistribution = Algorithm::from(kind).redistribute(&series);
            for (before, after) in series.iter().zip(&redistribution.series) {
                assert_eq!(before.timestamp, after.timestamp, "{kind}");
            }
        }
    }

    #[test]
    fn test_capacity_respect() {
        for kind in [AlgorithmKind::TopN, AlgorithmKind::PeakShaving, AlgorithmKind::ValleyFilling]
        {
            for series in fixtures() {
                let redistribution = Algorithm::from(kind).redistribute(&series);
                for (before, after) in series.iter().zip(&redistribution.series) {
                    if after.usage > before.usage {
                        assert!(after.usage.0 <= 10.0 + 1e-9, "{kind}: {after:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_determinism() {
        let series = two_days();
        for kind in EnumSet::<AlgorithmKind>::all() {
            let algorithm = Algorithm::from(kind);
            assert_eq!(algorithm.redistribute(&series), algorithm.redistribute(&series), "{kind}");
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let series = two_days();
        let copy = series.clone();
        for kind in EnumSet::<AlgorithmKind>::all() {
            let _ = Algorithm::from(kind).redistribute(&series);
        }
        assert_eq!(series, copy);
    }

    #[test]
    fn test_only_top_n_records_transfers() {
        let series = two_days();
        for kind in EnumSet::<AlgorithmKind>::all() {
            let redistribution = Algorithm::from(kind).redistribute(&series);
            assert_eq!(redistribution.transfers.is_empty(), kind != AlgorithmKind::TopN, "{kind}");
        }
    }

    #[test]
    fn test_kind() {
        for kind in EnumSet::<AlgorithmKind>::all() {
            assert_eq!(Algorithm::from(kind).kind(), kind);
        }
    }
}
