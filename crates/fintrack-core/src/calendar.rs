use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::Percent;

const PERCENT: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Whole calendar months between two dates.
///
/// A partial trailing month does not count: the raw year/month difference is
/// decremented when the end day-of-month is earlier than the start
/// day-of-month. Floored at zero when `end` precedes `start`.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let mut months =
        (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if end.day() < start.day() {
        months -= 1;
    }
    months.max(0) as u32
}

/// Calendar-month addition with day-of-month clamping
/// (2024-01-31 plus one month is 2024-02-29).
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    // None only past chrono's representable range; saturate rather than panic.
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Number of monthly contribution steps in `[start, end]`, counting both
/// endpoints' month boundary. Zero when `end` precedes `start`.
pub fn count_installments(start: NaiveDate, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }
    months_between(start, end) + 1
}

/// Periodic rate of one monthly step for an annual percentage rate.
pub fn monthly_rate(annual_percent: Percent) -> Decimal {
    annual_percent / PERCENT / MONTHS_PER_YEAR
}

/// Growth multiplier for `months` compounding steps at `annual_percent`
/// per year: `(1 + annual/100/12)^months`.
///
/// Computed by iterative multiplication (bounded by elapsed months, so at
/// most a few hundred steps) instead of `Decimal::powd` drift.
pub fn growth_factor(annual_percent: Percent, months: u32) -> Decimal {
    let factor = Decimal::ONE + monthly_rate(annual_percent);
    let mut result = Decimal::ONE;
    for _ in 0..months {
        result *= factor;
    }
    result
}
