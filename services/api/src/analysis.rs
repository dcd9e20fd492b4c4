use crate::report::AnalyticsReport;
use chrono::Utc;
use clap::Args;
use job_market::analytics::report::{SalaryStatistics, TimelineEntry};
use job_market::analytics::{
    format_gbp, format_salary, AnalyticsEngine, EmploymentMode, ExperienceTier,
};
use job_market::config::AppConfig;
use job_market::error::AppError;
use job_market::listings::{ListingImporter, ListingQuery, ListingRecord};
use std::path::PathBuf;

const RECENT_LISTINGS: usize = 5;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Listing export to analyse (CSV with the stored column layout)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Only include listings mentioning these keywords
    #[arg(long, default_value = "")]
    pub(crate) keywords: String,
    /// Only include listings whose location contains this text
    #[arg(long, default_value = "")]
    pub(crate) location: String,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct TimelineArgs {
    /// Listing export to analyse (CSV with the stored column layout)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Only include listings mentioning these keywords
    #[arg(long, default_value = "")]
    pub(crate) keywords: String,
    /// Only include listings whose location contains this text
    #[arg(long, default_value = "")]
    pub(crate) location: String,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        csv,
        keywords,
        location,
        json,
    } = args;

    let config = AppConfig::load()?;
    let query = ListingQuery::new(keywords, location);
    let (listings, skipped_rows) = load_listings(csv, &query)?;

    let summary =
        AnalyticsEngine::standard().analyze_in_batches(&listings, config.analytics.batch_size);
    let report = AnalyticsReport::new(query, summary, Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report, &listings, skipped_rows);
    }

    Ok(())
}

pub(crate) fn run_timeline(args: TimelineArgs) -> Result<(), AppError> {
    let TimelineArgs {
        csv,
        keywords,
        location,
    } = args;

    let query = ListingQuery::new(keywords, location);
    let (listings, _) = load_listings(csv, &query)?;
    let timeline = AnalyticsEngine::standard().timeline(&listings);

    println!("Monthly postings ({})", describe_query(&query));
    render_timeline(&timeline);
    Ok(())
}

/// Imports the export and keeps listings matching `query`, newest first. An
/// empty query keeps the whole file.
fn load_listings(
    path: PathBuf,
    query: &ListingQuery,
) -> Result<(Vec<ListingRecord>, usize), AppError> {
    let import = ListingImporter::from_path(path)?;
    let listings = if query.is_empty() {
        import.listings
    } else {
        query.select(&import.listings)
    };
    Ok((listings, import.skipped_rows))
}

fn describe_query(query: &ListingQuery) -> String {
    match (query.keywords.trim(), query.location.trim()) {
        ("", "") => "all listings".to_string(),
        (keywords, "") => format!("keywords \"{keywords}\""),
        ("", location) => format!("location \"{location}\""),
        (keywords, location) => format!("keywords \"{keywords}\" in \"{location}\""),
    }
}

fn render_report(report: &AnalyticsReport, listings: &[ListingRecord], skipped_rows: usize) {
    let summary = &report.summary;

    println!("Job market analysis for {}", describe_query(&report.search_params));
    println!(
        "- {} listings analysed | {} with salary data | {} rows skipped",
        report.meta.jobs_analyzed,
        summary.salaried_jobs(),
        skipped_rows
    );

    println!("\nSalary statistics (annual, GBP)");
    for mode in EmploymentMode::ordered() {
        match summary.salary_statistics.get(mode) {
            Some(stats) => println!("  {}: {}", mode.label(), describe_statistics(stats)),
            None => println!("  {}: no salary data", mode.label()),
        }
    }

    for mode in EmploymentMode::ordered() {
        let ranges = summary.salary_ranges.get(mode);
        if ranges.is_empty() {
            continue;
        }
        println!("\nHighest {} salary ranges", mode.label().to_lowercase());
        for entry in ranges {
            println!(
                "  - {}: {}-{} (avg {})",
                entry.company,
                format_gbp(entry.min),
                format_gbp(entry.max),
                format_gbp(entry.avg)
            );
        }
    }

    if !summary.companies.is_empty() {
        println!("\nTop companies by average salary");
        for company in &summary.companies {
            println!(
                "  - {}: {} avg across {} listings",
                company.company,
                format_gbp(company.avg_salary),
                company.count
            );
        }
    }

    if !summary.skills.is_empty() {
        println!("\nMost requested skills");
        for skill in &summary.skills {
            println!("  - {}: {}", skill.skill, skill.count);
        }
    }

    println!("\nExperience levels");
    let levels: Vec<String> = ExperienceTier::ordered()
        .into_iter()
        .map(|tier| format!("{}: {}", tier.label(), summary.experience_levels.get(tier)))
        .collect();
    println!("  {}", levels.join(" | "));

    if !summary.timeline.is_empty() {
        println!("\nMonthly postings");
        render_timeline(&summary.timeline);
    }

    if !listings.is_empty() {
        println!("\nMost recent listings");
        for listing in listings.iter().take(RECENT_LISTINGS) {
            println!(
                "  - {} | {} | {} | {}",
                listing.posting_date,
                listing.title,
                listing.company_name(),
                format_salary(listing)
            );
        }
    }
}

fn describe_statistics(stats: &SalaryStatistics) -> String {
    format!(
        "{} listings | min {} | median {} | avg {} | max {}",
        stats.count,
        format_gbp(stats.min),
        format_gbp(stats.median),
        format_gbp(stats.avg),
        format_gbp(stats.max)
    )
}

fn render_timeline(timeline: &[TimelineEntry]) {
    if timeline.is_empty() {
        println!("  no postings");
        return;
    }
    for entry in timeline {
        println!(
            "  - {}: {} postings | avg {}",
            entry.month,
            entry.count,
            format_gbp(entry.avg_salary)
        );
    }
}
