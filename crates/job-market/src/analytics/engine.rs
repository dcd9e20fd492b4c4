use super::classifier::classify;
use super::domain::{Classification, NormalizedSalary};
use super::report::accumulator::AnalyticsAccumulator;
use super::report::timeline::MonthlyTimeline;
use super::report::{AnalyticsSummary, TimelineEntry};
use super::salary::normalize_salary;
use super::skills::extract_skills;
use super::vocabulary::Vocabulary;
use crate::listings::ListingRecord;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// Output caps applied while summarising.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsLimits {
    /// Display salary ranges kept per employment mode.
    pub salary_range_entries: usize,
    /// Distinct companies tracked, first come.
    pub tracked_companies: usize,
    pub top_companies: usize,
    pub top_skills: usize,
    pub timeline_months: usize,
}

impl Default for AnalyticsLimits {
    fn default() -> Self {
        Self {
            salary_range_entries: 10,
            tracked_companies: 50,
            top_companies: 10,
            top_skills: 15,
            timeline_months: 24,
        }
    }
}

/// What the engine derives from a single listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingFacts<'v> {
    pub salary: Option<NormalizedSalary>,
    pub classification: Classification,
    pub skills: Vec<&'v str>,
}

#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    vocabulary: Arc<Vocabulary>,
    limits: AnalyticsLimits,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl AnalyticsEngine {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self {
            vocabulary,
            limits: AnalyticsLimits::default(),
        }
    }

    /// Engine over the built-in vocabulary tables.
    pub fn standard() -> Self {
        Self::new(Vocabulary::standard())
    }

    pub fn with_limits(mut self, limits: AnalyticsLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn limits(&self) -> AnalyticsLimits {
        self.limits
    }

    pub fn assess(&self, listing: &ListingRecord) -> ListingFacts<'_> {
        let salary = normalize_salary(listing);
        let classification = classify(listing, salary.as_ref(), &self.vocabulary);
        let skills = extract_skills(&listing.description, &self.vocabulary);
        ListingFacts {
            salary,
            classification,
            skills,
        }
    }

    /// Summarises `listings` in input order. The input is never modified and
    /// the same input always yields the same summary.
    pub fn analyze(&self, listings: &[ListingRecord]) -> AnalyticsSummary {
        let mut accumulator = AnalyticsAccumulator::new(self.limits);
        for listing in listings {
            accumulator.record(listing, self.assess(listing));
        }

        let summary = accumulator.finish();
        debug!(
            total_jobs = summary.total_jobs,
            salaried = summary.salaried_jobs(),
            "analytics summary computed"
        );
        summary
    }

    /// Same result as [`AnalyticsEngine::analyze`], with per-listing work
    /// spread over the rayon pool `batch_size` listings at a time. Batches are
    /// folded back in input order.
    pub fn analyze_in_batches(
        &self,
        listings: &[ListingRecord],
        batch_size: usize,
    ) -> AnalyticsSummary {
        let batch_size = batch_size.max(1);
        let assessed: Vec<Vec<ListingFacts<'_>>> = listings
            .par_chunks(batch_size)
            .map(|batch| batch.iter().map(|listing| self.assess(listing)).collect())
            .collect();

        let mut accumulator = AnalyticsAccumulator::new(self.limits);
        for (listing, facts) in listings.iter().zip(assessed.into_iter().flatten()) {
            accumulator.record(listing, facts);
        }

        let summary = accumulator.finish();
        debug!(
            total_jobs = summary.total_jobs,
            batch_size,
            batches = listings.len().div_ceil(batch_size),
            "batched analytics summary computed"
        );
        summary
    }

    /// Monthly posting counts and average annual salary without the rest of
    /// the summary.
    pub fn timeline(&self, listings: &[ListingRecord]) -> Vec<TimelineEntry> {
        let mut timeline = MonthlyTimeline::default();
        for listing in listings {
            let salary = normalize_salary(listing).map(|salary| salary.min_annual);
            timeline.record(listing.posting_date, salary);
        }
        timeline.finish(self.limits.timeline_months)
    }
}
