use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use crate::{
    appliance::{Appliance, ApplianceKind},
    calculator::EnergyCalculator,
    error::{InputError, ValidationError},
    quantity::{
        power::Watts,
        rate::KilowattHourRate,
        size::{Inches, Kilograms},
        time::Hours,
    },
};

/// Asks questions on the writer and parses the answers from the reader.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn ask<T: FromStr>(&mut self, question: &str) -> Result<T, InputError> {
        let answer = self.read_answer(question)?;
        answer.parse().map_err(|_| InputError::Parse { question: question.to_owned(), answer })
    }

    /// `yes` or `y` in any case is yes, anything else is no.
    pub fn confirm(&mut self, question: &str) -> Result<bool, InputError> {
        let answer = self.read_answer(&format!("{question} (yes/no)"))?;
        Ok(matches!(answer.to_lowercase().as_str(), "yes" | "y"))
    }

    fn read_answer(&mut self, question: &str) -> Result<String, InputError> {
        write!(self.writer, "{question}: ")?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(InputError::UnexpectedEof);
        }
        Ok(line.trim().to_owned())
    }

    /// Ask for everything a calculation run needs.
    pub fn ask_run_parameters(&mut self) -> Result<RunParameters, InputError> {
        let tariff = self.ask(&format!(
            "Electricity tariff per kWh (for example, {})",
            KilowattHourRate::TYPICAL.0,
        ))?;
        let period = self.ask("Usage period in hours (for example, 24)")?;

        let iron_power = self.ask("Iron power in watts (for example, 2000)")?;
        let steam_booster = self.confirm("Does the iron have a steam booster?")?;
        let tv_power = self.ask("TV power in watts (for example, 150)")?;
        let screen_size = self.ask("TV screen size in inches (for example, 55)")?;
        let washer_power = self.ask("Washing machine power in watts (for example, 2200)")?;
        let capacity = self.ask("Washing machine load capacity in kg (for example, 7)")?;

        Ok(RunParameters {
            tariff,
            period,
            appliances: vec![
                ApplianceParameters {
                    name: "Iron",
                    power: iron_power,
                    kind: ApplianceKind::Iron { steam_booster },
                },
                ApplianceParameters {
                    name: "TV",
                    power: tv_power,
                    kind: ApplianceKind::Tv { screen_size: Inches(screen_size) },
                },
                ApplianceParameters {
                    name: "Washing machine",
                    power: washer_power,
                    kind: ApplianceKind::WashingMachine { capacity: Kilograms(capacity) },
                },
            ],
        })
    }
}

/// Parsed but not yet validated answers.
#[derive(Debug)]
pub struct RunParameters {
    pub tariff: KilowattHourRate,
    pub period: Hours,
    pub appliances: Vec<ApplianceParameters>,
}

impl RunParameters {
    /// Validate the parameters and build the calculator with every appliance switched on.
    pub fn try_into_calculator(&self) -> Result<EnergyCalculator, ValidationError> {
        let appliances = self
            .appliances
            .iter()
            .map(|parameters| {
                let mut appliance =
                    Appliance::try_new(parameters.name, parameters.power, parameters.kind)?;
                appliance.turn_on();
                Ok(appliance)
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;
        EnergyCalculator::try_new(appliances, self.tariff)
    }
}

#[derive(Debug)]
pub struct ApplianceParameters {
    pub name: &'static str,
    pub power: Watts,
    pub kind: ApplianceKind,
}
