use bon::Builder;

use crate::{
    core::{reading::Reading, series::Series},
    prelude::*,
    quantity::{Zero, energy::KilowattHours},
    redistribution::{rebuild, usages},
};

/// Nudge every slot toward its moving average, then rescale to the original total.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Builder)]
pub struct Smoothing {
    /// The window is clipped at the series ends.
    #[builder(default = 5)]
    pub window_size: usize,

    /// Fraction of the distance to the moving average to cover.
    #[builder(default = 0.1)]
    pub nudge_factor: f64,
}

impl Default for Smoothing {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Smoothing {
    #[instrument(skip_all, fields(window_size = self.window_size, len = series.len()))]
    pub fn redistribute(&self, series: &[Reading]) -> Series {
        let original = usages(series);
        if self.window_size == 0 || original.is_empty() {
            return series.to_vec();
        }

        let (before, after) = (self.window_size / 2, self.window_size.div_ceil(2));
        let mut usages: Vec<KilowattHours> = (0..original.len())
            .map(|index| {
                let window =
                    &original[index.saturating_sub(before)..(index + after).min(original.len())];
                #[allow(clippy::cast_precision_loss)]
                let mean = window.iter().copied().sum::<KilowattHours>() / window.len() as f64;
                original[index] + (mean - original[index]) * self.nudge_factor
            })
            .collect();

        let original_total: KilowattHours = original.iter().copied().sum();
        let nudged_total: KilowattHours = usages.iter().copied().sum();
        if nudged_total > KilowattHours::ZERO {
            let ratio = original_total / nudged_total;
            debug!(ratio, "rescaling");
            for usage in &mut usages {
                *usage = *usage * ratio;
            }
        }
        rebuild(series, usages)
    }
}
