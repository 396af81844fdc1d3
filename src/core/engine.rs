use log::debug;

use super::error::InvalidInputError;
use super::types::{CompoundingFrequency, ProjectionInput, ProjectionPoint, ProjectionSeries};

/// Longest horizon a single projection will simulate.
pub const MAX_TERM_YEARS: u32 = 100;

const MONTHS_PER_YEAR: u32 = 12;

pub fn validate_input(input: &ProjectionInput) -> Result<(), InvalidInputError> {
    for (field, value) in [
        ("initial amount", input.initial_amount),
        ("monthly contribution", input.monthly_contribution),
        ("annual increase", input.annual_increase_percent),
        ("annual interest rate", input.annual_interest_rate_percent),
    ] {
        if !value.is_finite() {
            return Err(InvalidInputError::NonFinite { field });
        }
        if value < 0.0 {
            return Err(InvalidInputError::Negative { field, value });
        }
    }

    if input.term_years > MAX_TERM_YEARS {
        return Err(InvalidInputError::TermTooLong {
            years: f64::from(input.term_years),
            max: MAX_TERM_YEARS,
        });
    }

    Ok(())
}

/// Simulates the account month by month: the month's contribution lands
/// first, then interest accrues on the new balance.
///
/// A zero-year term is accepted and produces an empty series.
pub fn project(input: &ProjectionInput) -> Result<ProjectionSeries, InvalidInputError> {
    validate_input(input)?;

    let months = input.term_years * MONTHS_PER_YEAR;
    let escalation = 1.0 + input.annual_increase_percent / 100.0;
    let annual_rate = input.annual_interest_rate_percent / 100.0;

    let mut balance = input.initial_amount;
    let mut contributions_to_date = input.initial_amount;
    let mut points = Vec::with_capacity(months as usize);

    for month in 0..months {
        let contribution = effective_monthly_contribution(
            input.monthly_contribution,
            escalation,
            month / MONTHS_PER_YEAR,
        );
        balance += contribution;
        contributions_to_date += contribution;
        balance = accrue_interest(balance, annual_rate, input.compounding_frequency, month);
        if !balance.is_finite() || !contributions_to_date.is_finite() {
            return Err(InvalidInputError::Overflow {
                period_index: month,
            });
        }

        points.push(ProjectionPoint {
            period_index: month,
            contributions_to_date,
            total_value: balance,
        });
    }

    debug!(
        "projected {} years ({:?} compounding): final value {:.2}, contributions {:.2}",
        input.term_years, input.compounding_frequency, balance, contributions_to_date
    );

    Ok(ProjectionSeries::new(points))
}

// Escalation steps once per completed year, never mid-year.
fn effective_monthly_contribution(base: f64, escalation: f64, completed_years: u32) -> f64 {
    if base == 0.0 {
        return 0.0;
    }
    base * escalation.powi(completed_years as i32)
}

fn accrue_interest(
    balance: f64,
    annual_rate: f64,
    frequency: CompoundingFrequency,
    month: u32,
) -> f64 {
    match frequency {
        CompoundingFrequency::Monthly => {
            balance * (1.0 + annual_rate / f64::from(MONTHS_PER_YEAR))
        }
        CompoundingFrequency::Yearly if (month + 1) % MONTHS_PER_YEAR == 0 => {
            balance * (1.0 + annual_rate)
        }
        CompoundingFrequency::Yearly => balance,
    }
}
