use std::fmt::{Display, Formatter};

use crate::{
    error::ValidationError,
    prelude::*,
    quantity::{
        energy::KilowattHours,
        power::Watts,
        size::{Inches, Kilograms},
        time::Hours,
    },
};

/// Appliance variant along with its descriptive attributes.
///
/// The attributes only show up in the rendering: every variant draws its nominal power
/// for as long as it is on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ApplianceKind {
    Iron { steam_booster: bool },
    Tv { screen_size: Inches },
    WashingMachine { capacity: Kilograms },
}

impl ApplianceKind {
    fn validate(self) -> Result<(), ValidationError> {
        match self {
            Self::Iron { .. } => Ok(()),
            Self::Tv { screen_size } if !screen_size.is_positive() => {
                Err(ValidationError::NonPositiveScreenSize(screen_size))
            }
            Self::WashingMachine { capacity } if !capacity.is_positive() => {
                Err(ValidationError::NonPositiveCapacity(capacity))
            }
            Self::Tv { .. } | Self::WashingMachine { .. } => Ok(()),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Iron { .. } => "Iron",
            Self::Tv { .. } => "TV",
            Self::WashingMachine { .. } => "Washing machine",
        }
    }
}

#[must_use]
#[derive(Clone, Debug)]
pub struct Appliance {
    name: String,
    power: Watts,
    is_on: bool,
    kind: ApplianceKind,
}

impl Appliance {
    /// Validate the attributes and build a switched-off appliance.
    pub fn try_new(
        name: impl Into<String>,
        power: Watts,
        kind: ApplianceKind,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !power.is_positive() {
            return Err(ValidationError::NonPositivePower(power));
        }
        kind.validate()?;
        Ok(Self { name, power, is_on: false, kind })
    }

    pub fn iron(
        name: impl Into<String>,
        power: Watts,
        steam_booster: bool,
    ) -> Result<Self, ValidationError> {
        Self::try_new(name, power, ApplianceKind::Iron { steam_booster })
    }

    pub fn tv(
        name: impl Into<String>,
        power: Watts,
        screen_size: Inches,
    ) -> Result<Self, ValidationError> {
        Self::try_new(name, power, ApplianceKind::Tv { screen_size })
    }

    pub fn washing_machine(
        name: impl Into<String>,
        power: Watts,
        capacity: Kilograms,
    ) -> Result<Self, ValidationError> {
        Self::try_new(name, power, ApplianceKind::WashingMachine { capacity })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn power(&self) -> Watts {
        self.power
    }

    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.is_on
    }

    #[must_use]
    pub const fn kind(&self) -> ApplianceKind {
        self.kind
    }

    pub fn turn_on(&mut self) {
        self.is_on = true;
        info!(name = %self.name, "switched on");
    }

    pub fn turn_off(&mut self) {
        self.is_on = false;
        info!(name = %self.name, "switched off");
    }

    /// Energy consumed over the duration.
    ///
    /// A switched-off appliance consumes nothing, but the duration gets validated anyway.
    pub fn consumption(&self, duration: Hours) -> Result<KilowattHours, ValidationError> {
        if !duration.is_non_negative() {
            return Err(ValidationError::NegativeHours(duration));
        }
        if !self.is_on {
            return Ok(KilowattHours::ZERO);
        }
        let consumption = match self.kind {
            ApplianceKind::Iron { .. }
            | ApplianceKind::Tv { .. }
            | ApplianceKind::WashingMachine { .. } => self.power * duration,
        };
        Ok(consumption)
    }

    const fn status(&self) -> &'static str {
        if self.is_on { "on" } else { "off" }
    }
}

impl Display for Appliance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} «{}» ({}, ", self.kind.label(), self.name, self.power)?;
        match self.kind {
            ApplianceKind::Iron { steam_booster: true } => write!(f, "with steam booster")?,
            ApplianceKind::Iron { steam_booster: false } => write!(f, "without steam booster")?,
            ApplianceKind::Tv { screen_size } => write!(f, "screen {screen_size}")?,
            ApplianceKind::WashingMachine { capacity } => write!(f, "load {capacity}")?,
        }
        write!(f, ", {})", self.status())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn appliances() -> Vec<Appliance> {
        vec![
            Appliance::iron("Iron", Watts(2000.0), true).unwrap(),
            Appliance::tv("TV", Watts(150.0), Inches(55.0)).unwrap(),
            Appliance::washing_machine("Washer", Watts(2200.0), Kilograms(7.0)).unwrap(),
        ]
    }

    #[test]
    fn new_appliance_is_off() {
        for appliance in appliances() {
            assert!(!appliance.is_on());
        }
    }

    #[test]
    fn empty_name_rejected() {
        assert_eq!(
            Appliance::iron("", Watts(1000.0), false).unwrap_err(),
            ValidationError::EmptyName,
        );
    }

    #[test]
    fn non_positive_power_rejected() {
        for power in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Appliance::tv("TV", Watts(power), Inches(40.0)),
                Err(ValidationError::NonPositivePower(_)),
            ));
        }
    }

    #[test]
    fn descriptive_attributes_validated() {
        assert_eq!(
            Appliance::tv("TV", Watts(100.0), Inches(0.0)).unwrap_err(),
            ValidationError::NonPositiveScreenSize(Inches(0.0)),
        );
        assert_eq!(
            Appliance::washing_machine("Washer", Watts(100.0), Kilograms(-1.0)).unwrap_err(),
            ValidationError::NonPositiveCapacity(Kilograms(-1.0)),
        );
    }

    #[test]
    fn switched_off_consumes_nothing() {
        for appliance in appliances() {
            for hours in [0.0, 0.5, 1.0, 24.0, 10_000.0] {
                assert_eq!(appliance.consumption(Hours(hours)).unwrap(), KilowattHours::ZERO);
            }
        }
    }

    #[test]
    fn switched_on_consumes_linearly() {
        for mut appliance in appliances() {
            appliance.turn_on();
            for hours in [0.0, 0.25, 1.0, 3.0, 24.0] {
                let expected = appliance.power().0 / 1000.0 * hours;
                assert_abs_diff_eq!(appliance.consumption(Hours(hours)).unwrap().0, expected);
            }
        }
    }

    #[test]
    fn descriptive_attributes_do_not_change_consumption() {
        let mut with_booster = Appliance::iron("Iron", Watts(1800.0), true).unwrap();
        let mut without_booster = Appliance::iron("Iron", Watts(1800.0), false).unwrap();
        with_booster.turn_on();
        without_booster.turn_on();
        assert_eq!(
            with_booster.consumption(Hours(2.0)).unwrap(),
            without_booster.consumption(Hours(2.0)).unwrap(),
        );
    }

    #[test]
    fn negative_hours_rejected_regardless_of_state() {
        let mut appliance = Appliance::tv("TV", Watts(150.0), Inches(55.0)).unwrap();
        assert_eq!(
            appliance.consumption(Hours(-1.0)).unwrap_err(),
            ValidationError::NegativeHours(Hours(-1.0)),
        );
        appliance.turn_on();
        assert!(appliance.consumption(Hours(-0.5)).is_err());
    }

    #[test]
    fn toggle_ok() {
        let mut appliance = Appliance::iron("Iron", Watts(2000.0), false).unwrap();
        appliance.turn_on();
        assert!(appliance.is_on());
        appliance.turn_off();
        assert!(!appliance.is_on());
        appliance.turn_off();
        assert!(!appliance.is_on());
    }

    #[test]
    fn display_ok() {
        let mut iron = Appliance::iron("Iron", Watts(2000.0), true).unwrap();
        iron.turn_on();
        assert_eq!(iron.to_string(), "Iron «Iron» (2000 W, with steam booster, on)");
        let washer = Appliance::washing_machine("Bosch", Watts(2200.0), Kilograms(7.0)).unwrap();
        assert_eq!(washer.to_string(), "Washing machine «Bosch» (2200 W, load 7.0 kg, off)");
    }
}
