quantity!(KilowattHours, suffix: "kWh", precision: 3);

impl KilowattHours {
    /// Default receivable maximum of a single slot.
    pub const TEN: Self = Self(10.0);
}
