use std::ops::Mul;

use crate::quantity::{cost::Cost, rate::KilowattHourRate};

quantity!(KilowattHours, suffix: " kWh", precision: 3);

impl KilowattHours {
    /// Round to whole watt-hours, which is three decimal places of a kilowatt-hour.
    #[must_use]
    pub fn round_to_watt_hours(self) -> Self {
        self.round_to(3)
    }
}

impl Mul<KilowattHourRate> for KilowattHours {
    type Output = Cost;

    fn mul(self, rate: KilowattHourRate) -> Self::Output {
        Cost(self.0 * rate.0)
    }
}
