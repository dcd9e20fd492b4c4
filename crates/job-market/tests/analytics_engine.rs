use chrono::NaiveDate;
use job_market::analytics::AnalyticsEngine;
use job_market::listings::{ListingRecord, SalaryPeriod};
use rust_decimal::Decimal;

fn posted(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("valid posting date")
}

fn salaried_listing(company: String, min: i64, posted_on: NaiveDate) -> ListingRecord {
    let mut listing = ListingRecord::new("Software Developer", posted_on);
    listing.description = "Rust services with PostgreSQL and Docker".to_string();
    listing.company = Some(company);
    listing.salary_min = Some(Decimal::from(min));
    listing.salary_max = Some(Decimal::from(min + 10_000));
    listing.salary_period = Some(SalaryPeriod::Yearly);
    listing
}

fn hundred_companies() -> Vec<ListingRecord> {
    (0..100)
        .map(|index| {
            salaried_listing(
                format!("Company {index:03}"),
                40_000 + index * 500,
                posted(2025, 1),
            )
        })
        .collect()
}

#[test]
fn output_caps_hold_for_large_inputs() {
    let summary = AnalyticsEngine::standard().analyze(&hundred_companies());

    assert_eq!(summary.total_jobs, 100);
    assert_eq!(summary.salary_ranges.permanent.len(), 10);
    assert!(summary.salary_ranges.contract.is_empty());
    assert_eq!(summary.companies.len(), 10);
    assert!(summary.skills.len() <= 15);

    // Display ranges are the first ten salaried listings, highest max first.
    assert_eq!(summary.salary_ranges.permanent[0].company, "Company 009");
    assert_eq!(summary.salary_ranges.permanent[9].company, "Company 000");

    // Companies beyond the first fifty are never tracked.
    assert_eq!(summary.companies[0].company, "Company 049");
    assert_eq!(summary.companies[9].company, "Company 040");

    // Statistics cover every salaried listing.
    let stats = summary.salary_statistics.permanent.expect("statistics");
    assert_eq!(stats.count, 100);
    assert_eq!(stats.max, Decimal::from(94_500));
}

#[test]
fn timeline_keeps_latest_twenty_four_months() {
    let listings: Vec<ListingRecord> = (0..30)
        .map(|offset| {
            let date = posted(2023 + offset / 12, (offset % 12) as u32 + 1);
            salaried_listing(format!("Company {offset}"), 50_000, date)
        })
        .collect();

    let summary = AnalyticsEngine::standard().analyze(&listings);
    assert_eq!(summary.timeline.len(), 24);
    assert_eq!(summary.timeline[0].month, "2023-07");
    assert_eq!(summary.timeline[23].month, "2025-06");
    assert!(summary
        .timeline
        .windows(2)
        .all(|pair| pair[0].month < pair[1].month));
}

#[test]
fn analysis_is_idempotent_and_leaves_input_untouched() {
    let listings = hundred_companies();
    let snapshot = listings.clone();
    let engine = AnalyticsEngine::standard();

    let first = serde_json::to_value(engine.analyze(&listings)).expect("summary serializes");
    let second = serde_json::to_value(engine.analyze(&listings)).expect("summary serializes");

    assert_eq!(first, second);
    assert_eq!(listings, snapshot);
}

#[test]
fn empty_input_yields_zeroed_summary() {
    let summary = AnalyticsEngine::standard().analyze(&[]);
    assert_eq!(summary.total_jobs, 0);
    assert!(summary.companies.is_empty());
    assert!(summary.skills.is_empty());
    assert!(summary.timeline.is_empty());
    assert_eq!(summary.experience_levels.total(), 0);

    let json = serde_json::to_value(&summary).expect("summary serializes");
    assert!(json["salary_statistics"]["permanent"].is_null());
    assert!(json["salary_statistics"]["contract"].is_null());
    assert_eq!(json["salary_ranges"]["permanent"], serde_json::json!([]));
}

#[test]
fn batched_analysis_matches_sequential() {
    let mut listings = hundred_companies();
    for (index, listing) in listings.iter_mut().enumerate().step_by(3) {
        listing.title = "Contract Developer".to_string();
        listing.salary_period = Some(SalaryPeriod::Daily);
        listing.salary_min = Some(Decimal::from(300 + index as i64));
        listing.salary_max = None;
    }

    let engine = AnalyticsEngine::standard();
    let sequential = engine.analyze(&listings);
    for batch_size in [1, 7, 64, 500] {
        assert_eq!(
            engine.analyze_in_batches(&listings, batch_size),
            sequential,
            "batch size {batch_size}"
        );
    }
}
