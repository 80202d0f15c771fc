use itertools::Itertools;

use crate::{
    billing::Billable,
    core::series::TopIndices,
    quantity::{
        Zero,
        currency::Kronor,
        energy::KilowattHours,
        power::Kilowatts,
        price::KilowattPrice,
    },
};

/// Number of the highest billable values averaged into the demand fee.
pub const N_PEAKS: usize = 3;

#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct PeakSummary {
    /// Highest billable values, largest first, padded with zeros for short series.
    pub top: [KilowattHours; N_PEAKS],

    /// Always divided by [`N_PEAKS`], even when the series is shorter.
    pub average: Kilowatts,

    pub fee: Kronor,
}

impl PeakSummary {
    pub fn from_billable(
        values: impl IntoIterator<Item = KilowattHours>,
        rate: KilowattPrice,
    ) -> Self {
        let values = values.into_iter().collect_vec();
        let mut top = [KilowattHours::ZERO; N_PEAKS];
        for (peak, index) in top.iter_mut().zip(values.iter().copied().top_indices(N_PEAKS)) {
            *peak = values[index];
        }
        #[allow(clippy::cast_precision_loss)]
        let average = Kilowatts::hourly_average(
            top.iter().copied().sum::<KilowattHours>() / N_PEAKS as f64,
        );
        Self { top, average, fee: average * rate }
    }

    pub fn from_rated(rated: &[Billable], rate: KilowattPrice) -> Self {
        Self::from_billable(rated.iter().map(|billable| billable.value), rate)
    }
}
