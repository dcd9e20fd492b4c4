use super::domain::NormalizedSalary;
use crate::listings::{ListingRecord, SalaryPeriod};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Approximate EUR to GBP rate applied to euro-quoted listings.
fn eur_to_gbp() -> Decimal {
    Decimal::new(85, 2)
}

/// Annualizes a listing's pay into the reference currency.
///
/// Structured fields win when both `salary_min` and `salary_period` are set;
/// otherwise the free-text salary is parsed. Zero amounts count as no data.
pub fn normalize_salary(listing: &ListingRecord) -> Option<NormalizedSalary> {
    let (min, max, source_period) = match (listing.salary_min, listing.salary_period) {
        (Some(min), Some(period)) => structured_range(min, listing.salary_max, period)?,
        _ => {
            let amount = parse_salary_text(listing.salary_text())?;
            (amount, amount, SalaryPeriod::Yearly)
        }
    };

    let rate = currency_rate(listing.currency_code().as_deref());
    let min_annual = min.checked_mul(rate)?;
    let max_annual = max.checked_mul(rate)?;
    if min_annual <= Decimal::ZERO {
        return None;
    }

    let (min_annual, max_annual) = if max_annual < min_annual {
        (max_annual, min_annual)
    } else {
        (min_annual, max_annual)
    };
    let avg_annual = min_annual.checked_add(max_annual)? / Decimal::TWO;

    Some(NormalizedSalary {
        min_annual: min_annual.normalize(),
        max_annual: max_annual.normalize(),
        avg_annual: avg_annual.normalize(),
        source_period,
    })
}

/// A non-positive structured minimum is no salary data; the free text is not
/// consulted.
fn structured_range(
    min: Decimal,
    max: Option<Decimal>,
    period: SalaryPeriod,
) -> Option<(Decimal, Decimal, SalaryPeriod)> {
    if min <= Decimal::ZERO {
        return None;
    }
    let max = max.filter(|amount| *amount > Decimal::ZERO).unwrap_or(min);

    let factor = period.annual_factor();
    Some((min.checked_mul(factor)?, max.checked_mul(factor)?, period))
}

/// Reads a number out of free text such as `"£45k"` or `"45000 per year"`.
///
/// Everything but digits and `k` is dropped; a `k` scales the digits by a
/// thousand. Returns `None` when no positive amount remains.
pub fn parse_salary_text(text: &str) -> Option<Decimal> {
    let mut digits = String::new();
    let mut thousands = false;
    for c in text.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if c.eq_ignore_ascii_case(&'k') {
            thousands = true;
        }
    }

    if digits.is_empty() {
        return None;
    }

    let amount = Decimal::from_str(&digits).ok()?;
    let amount = if thousands {
        amount.checked_mul(Decimal::ONE_THOUSAND)?
    } else {
        amount
    };

    (amount > Decimal::ZERO).then_some(amount)
}

/// Multiplier into GBP. Only EUR has a conversion; every other code passes
/// through unchanged.
pub fn currency_rate(code: Option<&str>) -> Decimal {
    match code {
        Some(code) if code.eq_ignore_ascii_case("EUR") => eur_to_gbp(),
        _ => Decimal::ONE,
    }
}

/// Human-readable rendering of the structured pay fields, e.g.
/// `£50,000-60,000 per year`.
pub fn format_salary(listing: &ListingRecord) -> String {
    let (Some(period), Some(min)) = (listing.salary_period, listing.salary_min) else {
        return "Salary not specified".to_string();
    };
    let max = listing.salary_max.unwrap_or(min);

    let symbol = match listing.currency_code().as_deref() {
        None | Some("GBP") => "£".to_string(),
        Some("EUR") => "€".to_string(),
        Some(other) => format!("{other} "),
    };

    format!(
        "{symbol}{}-{} {}",
        group_thousands(min),
        group_thousands(max),
        period.label()
    )
}

/// Whole-pound rendering of an annualised figure, e.g. `£51,583`.
pub fn format_gbp(amount: Decimal) -> String {
    format!("£{}", group_thousands(amount))
}

fn group_thousands(amount: Decimal) -> String {
    let whole = amount.round().abs().to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if amount.is_sign_negative() && !amount.round().is_zero() {
        grouped.insert(0, '-');
    }
    grouped
}
