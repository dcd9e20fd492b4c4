use super::super::domain::{EmploymentMode, ExperienceTier};
use rust_decimal::Decimal;
use serde::Serialize;

/// One permanent/contract pair of values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ByEmploymentMode<T> {
    pub permanent: T,
    pub contract: T,
}

impl<T> ByEmploymentMode<T> {
    pub fn get(&self, mode: EmploymentMode) -> &T {
        match mode {
            EmploymentMode::Permanent => &self.permanent,
            EmploymentMode::Contract => &self.contract,
        }
    }

    pub fn get_mut(&mut self, mode: EmploymentMode) -> &mut T {
        match mode {
            EmploymentMode::Permanent => &mut self.permanent,
            EmploymentMode::Contract => &mut self.contract,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(EmploymentMode, T) -> U) -> ByEmploymentMode<U> {
        ByEmploymentMode {
            permanent: f(EmploymentMode::Permanent, self.permanent),
            contract: f(EmploymentMode::Contract, self.contract),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalaryRangeEntry {
    pub min: Decimal,
    pub max: Decimal,
    pub avg: Decimal,
    pub company: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SalaryStatistics {
    pub min: Decimal,
    pub max: Decimal,
    pub avg: Decimal,
    pub median: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanySalary {
    pub company: String,
    pub count: usize,
    pub avg_salary: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExperienceLevels {
    pub senior: usize,
    pub mid: usize,
    pub junior: usize,
}

impl ExperienceLevels {
    pub fn get(&self, tier: ExperienceTier) -> usize {
        match tier {
            ExperienceTier::Senior => self.senior,
            ExperienceTier::Mid => self.mid,
            ExperienceTier::Junior => self.junior,
        }
    }

    pub(crate) fn increment(&mut self, tier: ExperienceTier) {
        match tier {
            ExperienceTier::Senior => self.senior += 1,
            ExperienceTier::Mid => self.mid += 1,
            ExperienceTier::Junior => self.junior += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.senior + self.mid + self.junior
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    /// Calendar month as `YYYY-MM`.
    pub month: String,
    pub count: usize,
    pub avg_salary: Decimal,
}

/// Everything derived from one collection of listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalyticsSummary {
    pub total_jobs: usize,
    pub salary_ranges: ByEmploymentMode<Vec<SalaryRangeEntry>>,
    pub salary_statistics: ByEmploymentMode<Option<SalaryStatistics>>,
    pub companies: Vec<CompanySalary>,
    pub skills: Vec<SkillCount>,
    pub experience_levels: ExperienceLevels,
    pub timeline: Vec<TimelineEntry>,
}

impl AnalyticsSummary {
    /// Listings that produced a salary data point, across both modes.
    pub fn salaried_jobs(&self) -> usize {
        EmploymentMode::ordered()
            .into_iter()
            .filter_map(|mode| self.salary_statistics.get(mode).as_ref())
            .map(|stats| stats.count)
            .sum()
    }
}
