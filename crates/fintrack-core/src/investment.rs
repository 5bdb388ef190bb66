use std::time::Instant;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::{add_months, count_installments, growth_factor, months_between};
use crate::error::FintrackError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::FintrackResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How the principal is contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContributionType {
    /// One lump sum at the start date.
    OneTime,
    /// One contribution of the principal amount every calendar month.
    Recurring,
}

/// A single investment record, as stored by the application layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentInput {
    pub contribution_type: ContributionType,
    /// Lump sum for one-time, monthly amount for recurring.
    pub principal_amount: Money,
    /// Date of the first contribution.
    pub start_date: NaiveDate,
    /// Expected annual return in percent (12 = 12%/year).
    pub expected_annual_return_rate: Percent,
    /// Planned horizon. None means open-ended: no future value is projected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Output of [`valuate_investment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationOutput {
    /// Principal actually contributed up to the evaluation date.
    pub total_invested: Money,
    /// Value at the evaluation date, never looking beyond the horizon.
    pub current_value: Money,
    /// Value exactly at the expected end date; None for open-ended records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub future_value: Option<Money>,
}

/// Input for [`valuate_portfolio`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioInput {
    pub investments: Vec<InvestmentInput>,
}

/// Aggregate valuation across one user's investments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioOutput {
    pub investment_count: usize,
    pub total_invested: Money,
    pub total_current_value: Money,
    /// Sum over investments with a declared horizon; None when none has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_future_value: Option<Money>,
    /// Combined lump-sum principal across one-time records.
    pub one_time_principal: Money,
    /// Combined monthly outlay across recurring records.
    pub recurring_monthly_outlay: Money,
}

/// Invested principal and compounded value at one evaluation date.
struct Valuation {
    invested: Money,
    value: Money,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Valuate one investment at `evaluation_date`.
///
/// The current value is evaluated at `min(expected_end_date,
/// evaluation_date)`: what a record is worth "now" never looks beyond today
/// or beyond its declared horizon. The future value is evaluated exactly at
/// `expected_end_date`, even when that date is already in the past. The
/// asymmetry separates "worth now" from "worth at the declared horizon".
pub fn valuate_investment(
    input: &InvestmentInput,
    evaluation_date: NaiveDate,
) -> FintrackResult<ComputationOutput<ValuationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate(input)?;

    if evaluation_date < input.start_date {
        warnings.push("Evaluation date precedes the start date".into());
    }

    let current_cutoff = match input.expected_end_date {
        Some(end) if end < evaluation_date => end,
        _ => evaluation_date,
    };

    let current = value_at(input, current_cutoff);
    let future = input.expected_end_date.map(|end| value_at(input, end).value);

    let result = ValuationOutput {
        total_invested: current.invested,
        current_value: current.value,
        future_value: future,
    };

    Ok(with_metadata(
        "Monthly-step compound valuation",
        input,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))
}

/// Aggregate valuation across a set of investments: a fold over
/// [`valuate_investment`]. Any per-record precondition failure fails the
/// whole portfolio.
pub fn valuate_portfolio(
    input: &PortfolioInput,
    evaluation_date: NaiveDate,
) -> FintrackResult<ComputationOutput<PortfolioOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let mut total_invested = Decimal::ZERO;
    let mut total_current_value = Decimal::ZERO;
    let mut total_future_value: Option<Money> = None;
    let mut one_time_principal = Decimal::ZERO;
    let mut recurring_monthly_outlay = Decimal::ZERO;

    for investment in &input.investments {
        let valuation = valuate_investment(investment, evaluation_date)?;
        warnings.extend(valuation.warnings);

        total_invested += valuation.result.total_invested;
        total_current_value += valuation.result.current_value;
        if let Some(fv) = valuation.result.future_value {
            total_future_value = Some(total_future_value.unwrap_or(Decimal::ZERO) + fv);
        }

        match investment.contribution_type {
            ContributionType::OneTime => one_time_principal += investment.principal_amount,
            ContributionType::Recurring => {
                recurring_monthly_outlay += investment.principal_amount
            }
        }
    }

    let result = PortfolioOutput {
        investment_count: input.investments.len(),
        total_invested,
        total_current_value,
        total_future_value,
        one_time_principal,
        recurring_monthly_outlay,
    };

    Ok(with_metadata(
        "Per-investment monthly-step valuation, summed",
        input,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate(input: &InvestmentInput) -> FintrackResult<()> {
    if input.principal_amount <= Decimal::ZERO {
        return Err(FintrackError::InvalidAmount {
            context: "principal_amount".into(),
            reason: "must be > 0".into(),
        });
    }
    if input.expected_annual_return_rate < Decimal::ZERO {
        return Err(FintrackError::InvalidInput {
            field: "expected_annual_return_rate".into(),
            reason: "must be >= 0".into(),
        });
    }
    if let Some(end) = input.expected_end_date {
        if end <= input.start_date {
            return Err(FintrackError::InvalidHorizon {
                start: input.start_date,
                end,
            });
        }
    }
    Ok(())
}

/// Invested principal and compounded value at `date`.
///
/// Zero-rate records short-circuit to the invested amount: no growth path
/// means no compounding, and it keeps `0^0` out of the arithmetic.
fn value_at(input: &InvestmentInput, date: NaiveDate) -> Valuation {
    let rate = input.expected_annual_return_rate;

    match input.contribution_type {
        ContributionType::OneTime => {
            // Contributed once, in full, at the start date.
            let invested = input.principal_amount;
            let value = if rate.is_zero() {
                invested
            } else {
                invested * growth_factor(rate, months_between(input.start_date, date))
            };
            Valuation { invested, value }
        }
        ContributionType::Recurring => {
            let installments = count_installments(input.start_date, date);
            let invested = input.principal_amount * Decimal::from(installments);
            let value = if rate.is_zero() {
                invested
            } else {
                (0..installments)
                    .map(|k| {
                        let contributed = add_months(input.start_date, k);
                        input.principal_amount
                            * growth_factor(rate, months_between(contributed, date))
                    })
                    .sum()
            };
            Valuation { invested, value }
        }
    }
}
