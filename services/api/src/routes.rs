use crate::infra::AppState;
use crate::report::{AnalyticsReport, EMPTY_QUERY_MESSAGE};
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use job_market::analytics::report::TimelineEntry;
use job_market::error::AppError;
use job_market::listings::{ListingImporter, ListingQuery, ListingRecord, UpsertOutcome};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AnalyticsParams {
    #[serde(default)]
    pub(crate) keywords: String,
    #[serde(default)]
    pub(crate) location: String,
    /// Skip the cache and recompute.
    #[serde(default)]
    pub(crate) refresh: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum AdHocAnalysisRequest {
    Listings(Vec<ListingRecord>),
    Csv { csv: String },
}

#[derive(Debug, Serialize)]
pub(crate) struct TimelineResponse {
    pub(crate) search_params: ListingQuery,
    pub(crate) timeline: Vec<TimelineEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
}

pub(crate) fn api_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/listings", post(upsert_listings_endpoint))
        .route(
            "/api/v1/analytics",
            get(analytics_endpoint).post(adhoc_analytics_endpoint),
        )
        .route("/api/v1/analytics/timeline", get(timeline_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn upsert_listings_endpoint(
    Extension(state): Extension<AppState>,
    Json(listings): Json<Vec<ListingRecord>>,
) -> Result<Json<UpsertOutcome>, AppError> {
    let outcome = state.store.upsert_many(listings)?;
    info!(
        inserted = outcome.inserted,
        updated = outcome.updated,
        skipped = outcome.skipped,
        "listings upserted"
    );
    Ok(Json(outcome))
}

pub(crate) async fn analytics_endpoint(
    Extension(state): Extension<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> Result<Json<AnalyticsReport>, AppError> {
    let AnalyticsParams {
        keywords,
        location,
        refresh,
    } = params;
    let query = ListingQuery::new(keywords, location);
    let now = Utc::now();

    if query.is_empty() {
        return Ok(Json(AnalyticsReport::empty_query(query, now)));
    }

    if !refresh {
        if let Some(report) = state.cache.get(&query, now) {
            return Ok(Json(report));
        }
    }

    let listings = state.store.search(&query)?;
    let summary = state.engine.analyze_in_batches(&listings, state.batch_size);
    let report = AnalyticsReport::new(query.clone(), summary, now);
    state.cache.put(&query, report.clone(), now);

    info!(
        keywords = %query.keywords,
        location = %query.location,
        jobs_analyzed = report.meta.jobs_analyzed,
        refresh,
        "analytics report generated"
    );
    Ok(Json(report))
}

pub(crate) async fn adhoc_analytics_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AdHocAnalysisRequest>,
) -> Result<Json<AnalyticsReport>, AppError> {
    let listings = match payload {
        AdHocAnalysisRequest::Listings(listings) => listings,
        AdHocAnalysisRequest::Csv { csv } => {
            ListingImporter::from_reader(Cursor::new(csv.into_bytes()))?.listings
        }
    };

    let summary = state.engine.analyze_in_batches(&listings, state.batch_size);
    Ok(Json(AnalyticsReport::new(
        ListingQuery::default(),
        summary,
        Utc::now(),
    )))
}

pub(crate) async fn timeline_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<TimelineResponse>, AppError> {
    if query.is_empty() {
        return Ok(Json(TimelineResponse {
            search_params: query,
            timeline: Vec::new(),
            error: Some(EMPTY_QUERY_MESSAGE.to_string()),
        }));
    }

    let listings = state.store.search(&query)?;
    let timeline = state.engine.timeline(&listings);
    Ok(Json(TimelineResponse {
        search_params: query,
        timeline,
        error: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{AnalyticsCache, InMemoryListingStore};
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request};
    use job_market::analytics::AnalyticsEngine;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(recorder.handle()),
            store: Arc::new(InMemoryListingStore::default()),
            cache: Arc::new(AnalyticsCache::new(chrono::Duration::hours(24))),
            engine: Arc::new(AnalyticsEngine::standard()),
            batch_size: 2,
        }
    }

    fn listings_payload() -> serde_json::Value {
        json!([
            {
                "title": "Senior Rust Developer",
                "description": "Rust, Docker and AWS",
                "company": "Acme",
                "location_text": "London",
                "posting_date": "2025-05-02",
                "salary_min": 70000,
                "salary_max": 90000,
                "salary_period": "Y",
                "url": "https://jobs.example.com/1"
            },
            {
                "title": "Rust Contractor",
                "description": "Kubernetes migration",
                "company": "Beta",
                "location_text": "London",
                "posting_date": "2025-04-20",
                "salary_text": "£550 per day",
                "url": "https://jobs.example.com/2"
            },
            {
                "title": "Python Developer",
                "description": "Django",
                "location_text": "Leeds",
                "posting_date": "2025-04-11"
            }
        ])
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.expect("request handled");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request builds")
    }

    #[tokio::test]
    async fn upsert_then_analyze_stored_listings() {
        let app = api_routes().layer(Extension(test_state()));

        let (status, outcome) = send(
            app.clone(),
            json_request(Method::POST, "/api/v1/listings", listings_payload()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(outcome["inserted"], 2);
        assert_eq!(outcome["skipped"], 1);

        let (status, report) = send(
            app.clone(),
            get_request("/api/v1/analytics?keywords=rust&location=london"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["total_jobs"], 2);
        assert_eq!(report["meta"]["jobs_analyzed"], 2);
        assert_eq!(report["meta"]["cached"], false);
        assert_eq!(report["experience_levels"]["senior"], 1);
        assert_eq!(report["salary_statistics"]["contract"]["count"], 1);

        let (_, cached) = send(
            app.clone(),
            get_request("/api/v1/analytics?keywords=RUST&location=London"),
        )
        .await;
        assert_eq!(cached["meta"]["cached"], true);

        let (_, refreshed) = send(
            app,
            get_request("/api/v1/analytics?keywords=rust&location=london&refresh=true"),
        )
        .await;
        assert_eq!(refreshed["meta"]["cached"], false);
    }

    #[tokio::test]
    async fn empty_search_is_not_run() {
        let app = api_routes().layer(Extension(test_state()));
        let (status, report) = send(app, get_request("/api/v1/analytics")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["total_jobs"], 0);
        assert_eq!(report["error"], EMPTY_QUERY_MESSAGE);
    }

    #[tokio::test]
    async fn adhoc_analysis_accepts_listing_arrays() {
        let app = api_routes().layer(Extension(test_state()));
        let (status, report) = send(
            app,
            json_request(Method::POST, "/api/v1/analytics", listings_payload()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["total_jobs"], 3);
        assert_eq!(report["experience_levels"]["senior"], 1);
        assert_eq!(report["experience_levels"]["mid"], 1);
        assert_eq!(report["search_params"]["keywords"], "");
    }

    #[tokio::test]
    async fn adhoc_analysis_accepts_csv_bodies() {
        let app = api_routes().layer(Extension(test_state()));
        let csv = "title,description,company,locations,url,salary,date,salary_min,salary_max,salary_type,salary_currency_code\n\
Junior Developer,React,Acme,London,https://jobs.example.com/9,,2025-03-01,25000,30000,Y,\n\
Broken,,,,,,yesterday,,,,\n";
        let (status, report) = send(
            app,
            json_request(Method::POST, "/api/v1/analytics", json!({ "csv": csv })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["total_jobs"], 1);
        assert_eq!(report["experience_levels"]["junior"], 1);
        assert_eq!(report["skills"][0]["skill"], "react");
    }

    #[tokio::test]
    async fn timeline_groups_stored_listings_by_month() {
        let state = test_state();
        state
            .store
            .upsert_many(
                serde_json::from_value(listings_payload()).expect("listings deserialize"),
            )
            .expect("upsert succeeds");
        let app = api_routes().layer(Extension(state));

        let (status, body) = send(app, get_request("/api/v1/analytics/timeline?keywords=rust")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timeline"][0]["month"], "2025-04");
        assert_eq!(body["timeline"][1]["month"], "2025-05");
        assert_eq!(body["timeline"][1]["avg_salary"], 70000.0);
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let state = test_state();
        state
            .readiness
            .store(false, std::sync::atomic::Ordering::Release);
        let app = api_routes().layer(Extension(state));

        let (status, body) = send(app, get_request("/ready")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");
    }
}
