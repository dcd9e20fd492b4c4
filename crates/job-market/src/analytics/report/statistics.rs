use super::views::SalaryStatistics;
use rust_decimal::Decimal;

/// Money figures are reported to the penny.
pub(crate) fn round_money(value: Decimal) -> Decimal {
    value.round_dp(2).normalize()
}

pub(crate) fn mean(sum: Decimal, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    round_money(sum / Decimal::from(count))
}

pub(crate) fn sum(values: &[Decimal]) -> Decimal {
    values
        .iter()
        .fold(Decimal::ZERO, |total, value| total.saturating_add(*value))
}

/// Middle element of a sorted slice, or the mean of the two middle elements
/// when the length is even.
pub(crate) fn median(sorted: &[Decimal]) -> Option<Decimal> {
    let len = sorted.len();
    if len == 0 {
        return None;
    }

    let mid = len / 2;
    let value = if len % 2 == 0 {
        sorted[mid - 1].saturating_add(sorted[mid]) / Decimal::TWO
    } else {
        sorted[mid]
    };
    Some(round_money(value))
}

pub(crate) fn summarize(values: &[Decimal]) -> Option<SalaryStatistics> {
    let mut sorted = values.to_vec();
    sorted.sort();

    let min = *sorted.first()?;
    let max = *sorted.last()?;
    let median = median(&sorted)?;

    Some(SalaryStatistics {
        min,
        max,
        avg: mean(sum(&sorted), sorted.len()),
        median,
        count: sorted.len(),
    })
}
