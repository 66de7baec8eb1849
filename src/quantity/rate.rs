quantity!(KilowattHourRate, suffix: " per kWh", precision: 4);

impl KilowattHourRate {
    /// Tariff suggested to the user when nothing better is known.
    pub const TYPICAL: Self = Self(0.15);
}
