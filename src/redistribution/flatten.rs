use bon::Builder;

use crate::{
    core::{night_hours::NightHours, reading::Reading, series::Series},
    prelude::*,
    quantity::energy::KilowattHours,
};

/// Reallocate the total usage over every slot in proportion to the slot weights.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Builder)]
pub struct LinearFlatten {
    #[builder(default)]
    pub night_hours: NightHours,

    #[builder(default = 2.0)]
    pub night_weight: f64,

    #[builder(default = 1.0)]
    pub day_weight: f64,
}

impl Default for LinearFlatten {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LinearFlatten {
    fn weight(&self, reading: &Reading) -> f64 {
        if self.night_hours.is_night(&reading.timestamp) { self.night_weight } else { self.day_weight }
    }

    #[instrument(skip_all, fields(len = series.len()))]
    pub fn redistribute(&self, series: &[Reading]) -> Series {
        let total_usage: KilowattHours = series.iter().map(|reading| reading.usage).sum();
        let total_weight: f64 = series.iter().map(|reading| self.weight(reading)).sum();
        if total_weight <= 0.0 {
            return series.to_vec();
        }
        let share = total_usage / total_weight;
        debug!(%share, "flattened");
        series.iter().map(|reading| reading.with_usage(share * self.weight(reading))).collect()
    }
}
