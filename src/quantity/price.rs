quantity!(
    /// Monthly demand-fee rate per kilowatt of averaged peak power.
    KilowattPrice, suffix: "kr/kW", precision: 2
);
