use crate::quantity::{currency::Kronor, energy::KilowattHours, price::KilowattPrice};

quantity!(Kilowatts, suffix: "kW", precision: 2);

implement_mul!(Kilowatts, KilowattPrice, Kronor);

impl Kilowatts {
    /// Average power of an hourly reading.
    pub const fn hourly_average(energy: KilowattHours) -> Self {
        Self(energy.0)
    }
}
