use chrono::NaiveDate;
use fintrack_core::investment::{
    valuate_investment, valuate_portfolio, ContributionType, InvestmentInput, PortfolioInput,
};
use fintrack_core::FintrackError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn one_time(principal: Decimal, rate: Decimal, start: NaiveDate) -> InvestmentInput {
    InvestmentInput {
        contribution_type: ContributionType::OneTime,
        principal_amount: principal,
        start_date: start,
        expected_annual_return_rate: rate,
        expected_end_date: None,
        label: None,
    }
}

fn recurring(monthly: Decimal, rate: Decimal, start: NaiveDate) -> InvestmentInput {
    InvestmentInput {
        contribution_type: ContributionType::Recurring,
        principal_amount: monthly,
        start_date: start,
        expected_annual_return_rate: rate,
        expected_end_date: None,
        label: None,
    }
}

// ---------------------------------------------------------------------------
// One-time contributions
// ---------------------------------------------------------------------------

#[test]
fn test_one_time_future_value_round_trip() {
    // 10000 at 12%/year for 12 months: 10000 * 1.01^12 = 11268.25
    let mut inv = one_time(dec!(10000), dec!(12), date(2024, 1, 1));
    inv.expected_end_date = Some(date(2025, 1, 1));
    let output = valuate_investment(&inv, date(2024, 6, 15)).unwrap().result;

    let fv = output.future_value.expect("horizon set, future value expected");
    assert!(
        (fv - dec!(11268.25)).abs() < dec!(0.01),
        "Expected ~11268.25, got {}",
        fv
    );
    // Current value at 2024-06-15 is 5 whole months of growth
    assert!(
        (output.current_value - dec!(10510.10)).abs() < dec!(0.01),
        "Expected ~10510.10, got {}",
        output.current_value
    );
    assert_eq!(output.total_invested, dec!(10000));
}

#[test]
fn test_one_time_zero_rate_idempotence() {
    let mut inv = one_time(dec!(5000), dec!(0), date(2023, 3, 10));
    inv.expected_end_date = Some(date(2026, 3, 10));
    let output = valuate_investment(&inv, date(2024, 9, 1)).unwrap().result;

    assert_eq!(output.total_invested, dec!(5000));
    assert_eq!(output.current_value, dec!(5000));
    assert_eq!(output.future_value, Some(dec!(5000)));
}

#[test]
fn test_one_time_partial_trailing_month_does_not_compound() {
    // 2024-01-15 to 2024-04-01 is 2 whole months, the partial third is dropped
    let inv = one_time(dec!(10000), dec!(12), date(2024, 1, 15));
    let output = valuate_investment(&inv, date(2024, 4, 1)).unwrap().result;
    assert_eq!(output.current_value, dec!(10201));
    assert!(output.future_value.is_none(), "open-ended record has no future value");
}

#[test]
fn test_evaluation_before_start_values_at_principal() {
    let inv = one_time(dec!(10000), dec!(12), date(2025, 6, 1));
    let output = valuate_investment(&inv, date(2024, 1, 1)).unwrap();
    assert_eq!(output.result.total_invested, dec!(10000));
    assert_eq!(output.result.current_value, dec!(10000));
    assert_eq!(output.warnings.len(), 1);
}

// ---------------------------------------------------------------------------
// Recurring contributions
// ---------------------------------------------------------------------------

#[test]
fn test_recurring_installment_count() {
    // Jan, Feb, Mar, Apr: 4 installments of 1000
    let inv = recurring(dec!(1000), dec!(0), date(2024, 1, 1));
    let output = valuate_investment(&inv, date(2024, 4, 1)).unwrap().result;
    assert_eq!(output.total_invested, dec!(4000));
    assert_eq!(output.current_value, dec!(4000));
}

#[test]
fn test_recurring_compounds_each_installment_separately() {
    // 1000/month at 12%: installments at Jan/Feb/Mar have 2/1/0 months of
    // growth by Mar 1: 1000 * (1.01^2 + 1.01 + 1) = 3030.10
    let inv = recurring(dec!(1000), dec!(12), date(2024, 1, 1));
    let output = valuate_investment(&inv, date(2024, 3, 1)).unwrap().result;
    assert_eq!(output.total_invested, dec!(3000));
    assert!(
        (output.current_value - dec!(3030.10)).abs() < dec!(0.01),
        "Expected ~3030.10, got {}",
        output.current_value
    );
}

#[test]
fn test_recurring_before_start_has_nothing_invested() {
    let inv = recurring(dec!(1000), dec!(12), date(2025, 1, 1));
    let output = valuate_investment(&inv, date(2024, 1, 1)).unwrap().result;
    assert_eq!(output.total_invested, Decimal::ZERO);
    assert_eq!(output.current_value, Decimal::ZERO);
}

// ---------------------------------------------------------------------------
// Horizon handling
// ---------------------------------------------------------------------------

#[test]
fn test_past_horizon_clamps_current_value() {
    // Horizon passed: "worth now" stops growing at the end date, and the
    // future value reflects exactly that same date
    let mut inv = one_time(dec!(10000), dec!(12), date(2023, 1, 1));
    inv.expected_end_date = Some(date(2023, 7, 1));
    let output = valuate_investment(&inv, date(2024, 1, 1)).unwrap().result;

    let at_horizon = dec!(10615.20);
    assert!(
        (output.current_value - at_horizon).abs() < dec!(0.01),
        "Expected clamp to ~{}, got {}",
        at_horizon,
        output.current_value
    );
    let fv = output.future_value.unwrap();
    assert_eq!(output.current_value, fv);
}

#[test]
fn test_horizon_not_after_start_rejected() {
    let mut inv = one_time(dec!(10000), dec!(12), date(2024, 5, 1));
    inv.expected_end_date = Some(date(2024, 5, 1));
    assert!(matches!(
        valuate_investment(&inv, date(2024, 6, 1)),
        Err(FintrackError::InvalidHorizon { .. })
    ));

    inv.expected_end_date = Some(date(2024, 1, 1));
    assert!(matches!(
        valuate_investment(&inv, date(2024, 6, 1)),
        Err(FintrackError::InvalidHorizon { .. })
    ));
}

#[test]
fn test_non_positive_principal_rejected() {
    let inv = one_time(dec!(0), dec!(12), date(2024, 1, 1));
    assert!(matches!(
        valuate_investment(&inv, date(2024, 6, 1)),
        Err(FintrackError::InvalidAmount { .. })
    ));
}

#[test]
fn test_negative_rate_rejected() {
    let inv = one_time(dec!(1000), dec!(-3), date(2024, 1, 1));
    assert!(matches!(
        valuate_investment(&inv, date(2024, 6, 1)),
        Err(FintrackError::InvalidInput { .. })
    ));
}

// ---------------------------------------------------------------------------
// Portfolio aggregation
// ---------------------------------------------------------------------------

#[test]
fn test_portfolio_sums_per_investment_results() {
    let mut with_horizon = one_time(dec!(10000), dec!(0), date(2024, 1, 1));
    with_horizon.expected_end_date = Some(date(2025, 1, 1));
    let portfolio = PortfolioInput {
        investments: vec![with_horizon, recurring(dec!(1000), dec!(0), date(2024, 1, 1))],
    };
    let output = valuate_portfolio(&portfolio, date(2024, 4, 1)).unwrap().result;

    assert_eq!(output.investment_count, 2);
    assert_eq!(output.total_invested, dec!(14000));
    assert_eq!(output.total_current_value, dec!(14000));
    // Only the record with a horizon contributes a future value
    assert_eq!(output.total_future_value, Some(dec!(10000)));
    assert_eq!(output.one_time_principal, dec!(10000));
    assert_eq!(output.recurring_monthly_outlay, dec!(1000));
}

#[test]
fn test_portfolio_without_horizons_has_no_future_value() {
    let portfolio = PortfolioInput {
        investments: vec![
            one_time(dec!(2000), dec!(8), date(2024, 1, 1)),
            recurring(dec!(500), dec!(10), date(2024, 2, 1)),
        ],
    };
    let output = valuate_portfolio(&portfolio, date(2024, 6, 1)).unwrap().result;
    assert!(output.total_future_value.is_none());
}

#[test]
fn test_portfolio_propagates_record_failures() {
    let portfolio = PortfolioInput {
        investments: vec![
            one_time(dec!(2000), dec!(8), date(2024, 1, 1)),
            one_time(dec!(-5), dec!(8), date(2024, 1, 1)),
        ],
    };
    assert!(valuate_portfolio(&portfolio, date(2024, 6, 1)).is_err());
}

#[test]
fn test_empty_portfolio_is_all_zeroes() {
    let portfolio = PortfolioInput { investments: vec![] };
    let output = valuate_portfolio(&portfolio, date(2024, 6, 1)).unwrap().result;
    assert_eq!(output.investment_count, 0);
    assert_eq!(output.total_invested, Decimal::ZERO);
    assert!(output.total_future_value.is_none());
}
