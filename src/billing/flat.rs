use bon::Builder;

use crate::{
    core::reading::Reading,
    quantity::{energy::KilowattHours, price::KilowattPrice},
};

/// No time-of-day discount: every reading is billed as is.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Builder)]
pub struct Flat {
    #[builder(default = KilowattPrice(45.0))]
    pub rate: KilowattPrice,
}

impl Default for Flat {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Flat {
    #[must_use]
    pub const fn billable(&self, reading: &Reading) -> KilowattHours {
        reading.usage
    }
}
