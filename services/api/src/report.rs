use chrono::{DateTime, Utc};
use job_market::analytics::AnalyticsSummary;
use job_market::listings::ListingQuery;
use serde::Serialize;

pub(crate) const EMPTY_QUERY_MESSAGE: &str =
    "Provide keywords or a location to analyse; empty searches are not run against the whole store";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ReportMeta {
    pub(crate) jobs_analyzed: usize,
    pub(crate) analysis_date: DateTime<Utc>,
    pub(crate) cached: bool,
}

/// Analytics summary wrapped with the search that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct AnalyticsReport {
    pub(crate) search_params: ListingQuery,
    #[serde(flatten)]
    pub(crate) summary: AnalyticsSummary,
    pub(crate) meta: ReportMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
}

impl AnalyticsReport {
    pub(crate) fn new(
        search_params: ListingQuery,
        summary: AnalyticsSummary,
        analysis_date: DateTime<Utc>,
    ) -> Self {
        Self {
            search_params,
            meta: ReportMeta {
                jobs_analyzed: summary.total_jobs,
                analysis_date,
                cached: false,
            },
            summary,
            error: None,
        }
    }

    pub(crate) fn empty_query(search_params: ListingQuery, analysis_date: DateTime<Utc>) -> Self {
        Self {
            error: Some(EMPTY_QUERY_MESSAGE.to_string()),
            ..Self::new(search_params, AnalyticsSummary::default(), analysis_date)
        }
    }
}
