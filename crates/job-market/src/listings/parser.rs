use super::normalizer::normalize_text;
use super::record::{ListingRecord, SalaryPeriod};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::str::FromStr;
use tracing::warn;

pub(crate) struct ParsedListings {
    pub(crate) listings: Vec<ListingRecord>,
    pub(crate) skipped: usize,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<ParsedListings, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut listings = Vec::new();
    let mut skipped = 0;

    for (index, record) in csv_reader.deserialize::<ListingRow>().enumerate() {
        let row = record?;
        match row.into_listing() {
            Ok(listing) => listings.push(listing),
            Err(reason) => {
                // header is line 1
                warn!(line = index + 2, %reason, "skipping listing row");
                skipped += 1;
            }
        }
    }

    Ok(ParsedListings { listings, skipped })
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    #[serde(default)]
    title: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    company: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    locations: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    url: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    salary: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    salary_min: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    salary_max: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    salary_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    salary_currency_code: Option<String>,
}

impl ListingRow {
    fn into_listing(self) -> Result<ListingRecord, String> {
        let posting_date = match self.date.as_deref() {
            Some(raw) => parse_datetime(raw)
                .map(|dt| dt.date())
                .ok_or_else(|| format!("unreadable posting date '{raw}'"))?,
            None => return Err("missing posting date".to_string()),
        };

        Ok(ListingRecord {
            title: normalize_text(&self.title),
            description: self
                .description
                .as_deref()
                .map(normalize_text)
                .unwrap_or_default(),
            company: self.company.as_deref().map(normalize_text),
            location_text: self
                .locations
                .as_deref()
                .map(normalize_text)
                .unwrap_or_default(),
            posting_date,
            salary_text: self.salary.as_deref().map(normalize_text),
            salary_min: parse_amount("salary_min", self.salary_min.as_deref())?,
            salary_max: parse_amount("salary_max", self.salary_max.as_deref())?,
            salary_period: self.salary_type.as_deref().map(SalaryPeriod::from_code),
            salary_currency: self.salary_currency_code,
            url: self.url,
        })
    }
}

fn parse_amount(column: &str, value: Option<&str>) -> Result<Option<Decimal>, String> {
    let Some(raw) = value else {
        return Ok(None);
    };

    let cleaned = raw.replace(',', "");
    Decimal::from_str(cleaned.trim())
        .map(Some)
        .map_err(|_| format!("{column} '{raw}' is not numeric"))
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_datetime_for_tests(value: &str) -> Option<NaiveDateTime> {
    parse_datetime(value)
}
