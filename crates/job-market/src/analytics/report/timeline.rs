use super::statistics::mean;
use super::views::TimelineEntry;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
struct MonthTally {
    count: usize,
    salary_total: Decimal,
    with_salary: usize,
}

/// Posting counts and salary totals bucketed by calendar month.
#[derive(Debug, Default, Clone)]
pub(crate) struct MonthlyTimeline {
    months: BTreeMap<(i32, u32), MonthTally>,
}

impl MonthlyTimeline {
    pub(crate) fn record(&mut self, posted: NaiveDate, annual_salary: Option<Decimal>) {
        let tally = self
            .months
            .entry((posted.year(), posted.month()))
            .or_default();
        tally.count += 1;

        if let Some(salary) = annual_salary.filter(|salary| *salary > Decimal::ZERO) {
            tally.salary_total = tally.salary_total.saturating_add(salary);
            tally.with_salary += 1;
        }
    }

    /// Chronological entries for the most recent `window` months.
    pub(crate) fn finish(self, window: usize) -> Vec<TimelineEntry> {
        let skip = self.months.len().saturating_sub(window);
        self.months
            .into_iter()
            .skip(skip)
            .map(|((year, month), tally)| TimelineEntry {
                month: format!("{year:04}-{month:02}"),
                count: tally.count,
                avg_salary: mean(tally.salary_total, tally.with_salary),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, 15).expect("valid date")
    }

    #[test]
    fn averages_only_salaried_postings() {
        let mut timeline = MonthlyTimeline::default();
        timeline.record(date(2025, 1), Some(Decimal::from(30_000)));
        timeline.record(date(2025, 1), Some(Decimal::from(50_000)));
        timeline.record(date(2025, 1), None);
        timeline.record(date(2025, 2), None);

        let entries = timeline.finish(24);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].month, "2025-01");
        assert_eq!(entries[0].count, 3);
        assert_eq!(entries[0].avg_salary, Decimal::from(40_000));
        assert_eq!(entries[1].month, "2025-02");
        assert_eq!(entries[1].avg_salary, Decimal::ZERO);
    }

    #[test]
    fn keeps_most_recent_months_in_order() {
        let mut timeline = MonthlyTimeline::default();
        for offset in (0..30).rev() {
            let year = 2023 + offset / 12;
            let month = (offset % 12) as u32 + 1;
            timeline.record(date(year, month), None);
        }

        let entries = timeline.finish(24);
        assert_eq!(entries.len(), 24);
        assert_eq!(entries.first().map(|e| e.month.as_str()), Some("2023-07"));
        assert_eq!(entries.last().map(|e| e.month.as_str()), Some("2025-06"));
    }
}
