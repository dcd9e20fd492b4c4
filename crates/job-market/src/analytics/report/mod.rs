pub(crate) mod accumulator;
mod statistics;
pub(crate) mod timeline;
mod views;

pub use views::{
    AnalyticsSummary, ByEmploymentMode, CompanySalary, ExperienceLevels, SalaryRangeEntry,
    SalaryStatistics, SkillCount, TimelineEntry,
};
