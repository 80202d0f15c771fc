use bon::Builder;

use crate::{
    core::{night_hours::NightHours, reading::Reading},
    quantity::{energy::KilowattHours, price::KilowattPrice},
};

/// Readings within the night hours are billed at a fraction of their usage.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Builder)]
pub struct NightDiscount {
    #[builder(default)]
    pub night_hours: NightHours,

    /// Billed fraction of the night usage.
    #[builder(default = 0.5)]
    pub night_factor: f64,

    #[builder(default = KilowattPrice(65.0))]
    pub rate: KilowattPrice,
}

impl Default for NightDiscount {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl NightDiscount {
    #[must_use]
    pub fn billable(&self, reading: &Reading) -> KilowattHours {
        if self.night_hours.is_night(&reading.timestamp) {
            reading.usage * self.night_factor
        } else {
            reading.usage
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::series::fixtures::at;

    #[test]
    fn test_custom_night_hours() {
        let rule = NightDiscount::builder()
            .night_hours(NightHours::try_from_iter([12]).unwrap())
            .night_factor(0.25)
            .build();
        assert_eq!(rule.billable(&Reading::new(at(1, 12), KilowattHours(4.0))), KilowattHours(1.0));
        assert_eq!(rule.billable(&Reading::new(at(1, 23), KilowattHours(4.0))), KilowattHours(4.0));
    }
}
