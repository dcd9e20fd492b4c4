use super::super::engine::{AnalyticsLimits, ListingFacts};
use super::statistics::{mean, summarize};
use super::timeline::MonthlyTimeline;
use super::views::{
    AnalyticsSummary, ByEmploymentMode, CompanySalary, ExperienceLevels, SalaryRangeEntry,
    SkillCount,
};
use crate::listings::ListingRecord;
use rust_decimal::Decimal;
use std::collections::HashMap;

#[derive(Debug)]
struct CompanyTally {
    name: String,
    count: usize,
    salary_total: Decimal,
}

/// Running totals for one analytics pass. Listings must be recorded in input
/// order: the display ranges and the tracked company set are first-come.
#[derive(Debug)]
pub(crate) struct AnalyticsAccumulator<'v> {
    limits: AnalyticsLimits,
    total_jobs: usize,
    mode_averages: ByEmploymentMode<Vec<Decimal>>,
    salary_ranges: ByEmploymentMode<Vec<SalaryRangeEntry>>,
    companies: Vec<CompanyTally>,
    company_index: HashMap<String, usize>,
    skills: Vec<(&'v str, usize)>,
    skill_index: HashMap<&'v str, usize>,
    experience_levels: ExperienceLevels,
    timeline: MonthlyTimeline,
}

impl<'v> AnalyticsAccumulator<'v> {
    pub(crate) fn new(limits: AnalyticsLimits) -> Self {
        Self {
            limits,
            total_jobs: 0,
            mode_averages: ByEmploymentMode::default(),
            salary_ranges: ByEmploymentMode::default(),
            companies: Vec::new(),
            company_index: HashMap::new(),
            skills: Vec::new(),
            skill_index: HashMap::new(),
            experience_levels: ExperienceLevels::default(),
            timeline: MonthlyTimeline::default(),
        }
    }

    pub(crate) fn record(&mut self, listing: &ListingRecord, facts: ListingFacts<'v>) {
        self.total_jobs += 1;
        self.experience_levels
            .increment(facts.classification.experience_tier);
        self.timeline.record(
            listing.posting_date,
            facts.salary.as_ref().map(|salary| salary.min_annual),
        );

        for skill in facts.skills {
            match self.skill_index.get(skill) {
                Some(&index) => self.skills[index].1 += 1,
                None => {
                    self.skill_index.insert(skill, self.skills.len());
                    self.skills.push((skill, 1));
                }
            }
        }

        let Some(salary) = facts.salary else {
            return;
        };
        let mode = facts.classification.mode();
        let company = listing.company_name();

        self.mode_averages.get_mut(mode).push(salary.avg_annual);

        let ranges = self.salary_ranges.get_mut(mode);
        if ranges.len() < self.limits.salary_range_entries {
            ranges.push(SalaryRangeEntry {
                min: salary.min_annual,
                max: salary.max_annual,
                avg: salary.avg_annual,
                company: company.to_string(),
            });
        }

        self.record_company(company, salary.avg_annual);
    }

    fn record_company(&mut self, company: &str, avg_salary: Decimal) {
        if let Some(&index) = self.company_index.get(company) {
            let tally = &mut self.companies[index];
            tally.count += 1;
            tally.salary_total = tally.salary_total.saturating_add(avg_salary);
            return;
        }

        if self.companies.len() >= self.limits.tracked_companies {
            return;
        }

        self.company_index
            .insert(company.to_string(), self.companies.len());
        self.companies.push(CompanyTally {
            name: company.to_string(),
            count: 1,
            salary_total: avg_salary,
        });
    }

    pub(crate) fn finish(self) -> AnalyticsSummary {
        let limits = self.limits;

        let salary_statistics = self
            .mode_averages
            .map(|_, averages| summarize(&averages));

        let salary_ranges = self.salary_ranges.map(|_, mut entries| {
            entries.sort_by(|a, b| b.max.cmp(&a.max));
            entries
        });

        let mut companies: Vec<CompanySalary> = self
            .companies
            .into_iter()
            .map(|tally| CompanySalary {
                avg_salary: mean(tally.salary_total, tally.count),
                company: tally.name,
                count: tally.count,
            })
            .collect();
        companies.sort_by(|a, b| b.avg_salary.cmp(&a.avg_salary));
        companies.truncate(limits.top_companies);

        let mut skills: Vec<SkillCount> = self
            .skills
            .into_iter()
            .map(|(skill, count)| SkillCount {
                skill: skill.to_string(),
                count,
            })
            .collect();
        skills.sort_by(|a, b| b.count.cmp(&a.count));
        skills.truncate(limits.top_skills);

        AnalyticsSummary {
            total_jobs: self.total_jobs,
            salary_ranges,
            salary_statistics,
            companies,
            skills,
            experience_levels: self.experience_levels,
            timeline: self.timeline.finish(limits.timeline_months),
        }
    }
}
