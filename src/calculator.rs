use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
    appliance::Appliance,
    error::ValidationError,
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate, time::Hours},
};

#[must_use]
#[derive(Debug)]
pub struct EnergyCalculator {
    appliances: Vec<Appliance>,
    tariff: KilowattHourRate,
}

impl EnergyCalculator {
    pub fn try_new(
        appliances: Vec<Appliance>,
        tariff: KilowattHourRate,
    ) -> Result<Self, ValidationError> {
        validate_tariff(tariff)?;
        Ok(Self { appliances, tariff })
    }

    #[must_use]
    pub fn appliances(&self) -> &[Appliance] {
        &self.appliances
    }

    pub const fn tariff(&self) -> KilowattHourRate {
        self.tariff
    }

    /// Replace the tariff, leaving the calculator untouched when the new one is invalid.
    pub fn set_tariff(&mut self, tariff: KilowattHourRate) -> Result<(), ValidationError> {
        validate_tariff(tariff)?;
        self.tariff = tariff;
        Ok(())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.appliances.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.appliances.is_empty()
    }

    /// Calculate the consumption and cost of every appliance over the period.
    ///
    /// Totals are accumulated from the unrounded figures. Switched-off appliances are listed
    /// with zeros and do not contribute.
    #[instrument(skip_all, fields(period = %period, tariff = %self.tariff))]
    pub fn calculate(&self, period: Hours) -> Result<CalculationResult, ValidationError> {
        if !period.is_non_negative() {
            return Err(ValidationError::NegativeHours(period));
        }

        let mut total_consumption = KilowattHours::ZERO;
        let mut total_cost = Cost::ZERO;
        let mut details = Vec::with_capacity(self.appliances.len());

        for appliance in &self.appliances {
            if appliance.is_on() {
                let consumption = appliance.consumption(period)?;
                let cost = consumption * self.tariff;
                total_consumption += consumption;
                total_cost += cost;
                details.push(ApplianceDetail::new(appliance.name(), consumption, cost));
            } else {
                details.push(ApplianceDetail::idle(appliance.name()));
            }
        }

        let result = CalculationResult {
            total_consumption: total_consumption.round_to_watt_hours(),
            total_cost: total_cost.round_to_cents(),
            details,
        };
        debug!(
            total_consumption = %result.total_consumption,
            total_cost = %result.total_cost,
            "calculated",
        );
        Ok(result)
    }
}

impl Display for EnergyCalculator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Energy calculator:")?;
        writeln!(f, "  tariff: {}", self.tariff)?;
        write!(f, "  appliances: {}", self.len())?;
        for appliance in &self.appliances {
            write!(f, "\n  - {appliance}")?;
        }
        Ok(())
    }
}

fn validate_tariff(tariff: KilowattHourRate) -> Result<(), ValidationError> {
    if tariff.is_non_negative() { Ok(()) } else { Err(ValidationError::NegativeTariff(tariff)) }
}

/// Totals and per-appliance breakdown of a single calculation.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    #[serde(rename = "total_consumption_kwh")]
    pub total_consumption: KilowattHours,

    pub total_cost: Cost,

    /// One entry per appliance, in the calculator order.
    pub details: Vec<ApplianceDetail>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplianceDetail {
    pub name: String,

    #[serde(rename = "consumption_kwh")]
    pub consumption: KilowattHours,

    pub cost: Cost,
}

impl ApplianceDetail {
    fn new(name: &str, consumption: KilowattHours, cost: Cost) -> Self {
        Self {
            name: name.to_owned(),
            consumption: consumption.round_to_watt_hours(),
            cost: cost.round_to_cents(),
        }
    }

    fn idle(name: &str) -> Self {
        Self { name: name.to_owned(), consumption: KilowattHours::ZERO, cost: Cost::ZERO }
    }
}
