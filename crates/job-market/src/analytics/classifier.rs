use super::domain::{Classification, ExperienceTier, NormalizedSalary};
use super::vocabulary::Vocabulary;
use crate::listings::{ListingRecord, SalaryPeriod};
use rust_decimal::Decimal;

const SENIOR_SALARY_FLOOR: i64 = 80_000;
const JUNIOR_SALARY_CEILING: i64 = 35_000;

pub fn classify(
    listing: &ListingRecord,
    salary: Option<&NormalizedSalary>,
    vocabulary: &Vocabulary,
) -> Classification {
    let text = listing_text(listing);
    Classification {
        is_contract: contract_signals(listing, &text, vocabulary),
        experience_tier: tier_from_text(&text, salary, vocabulary),
    }
}

/// Any contract term in the title, description or salary text, a day-rate
/// salary string, or a daily pay period marks the role as contract work.
pub fn is_contract_role(listing: &ListingRecord, vocabulary: &Vocabulary) -> bool {
    contract_signals(listing, &listing_text(listing), vocabulary)
}

pub fn experience_tier(
    listing: &ListingRecord,
    salary: Option<&NormalizedSalary>,
    vocabulary: &Vocabulary,
) -> ExperienceTier {
    tier_from_text(&listing_text(listing), salary, vocabulary)
}

fn listing_text(listing: &ListingRecord) -> String {
    format!("{} {}", listing.title, listing.description).to_lowercase()
}

fn contract_signals(listing: &ListingRecord, text: &str, vocabulary: &Vocabulary) -> bool {
    let salary_text = listing.salary_text().to_lowercase();
    let has_term = |haystack: &str| {
        vocabulary
            .contract_terms()
            .iter()
            .any(|term| haystack.contains(term.as_str()))
    };

    has_term(text)
        || has_term(&salary_text)
        || salary_text.contains("day")
        || salary_text.contains("daily")
        || listing.salary_period == Some(SalaryPeriod::Daily)
}

/// First matching rule wins: senior terms, junior terms, mid terms, stated
/// years of experience, yearly salary bands, leadership language, then mid.
fn tier_from_text(
    text: &str,
    salary: Option<&NormalizedSalary>,
    vocabulary: &Vocabulary,
) -> ExperienceTier {
    if vocabulary.senior().matches(text) {
        return ExperienceTier::Senior;
    }
    if vocabulary.junior().matches(text) {
        return ExperienceTier::Junior;
    }
    if vocabulary.mid().matches(text) {
        return ExperienceTier::Mid;
    }

    if let Some(years) = vocabulary.stated_years(text) {
        return match years {
            0..=2 => ExperienceTier::Junior,
            3..=4 => ExperienceTier::Mid,
            _ => ExperienceTier::Senior,
        };
    }

    if let Some(salary) = salary.filter(|salary| salary.source_period == SalaryPeriod::Yearly) {
        if salary.avg_annual >= Decimal::from(SENIOR_SALARY_FLOOR) {
            return ExperienceTier::Senior;
        }
        if salary.avg_annual <= Decimal::from(JUNIOR_SALARY_CEILING) {
            return ExperienceTier::Junior;
        }
    }

    if vocabulary.responsibility().matches(text) {
        return ExperienceTier::Senior;
    }

    ExperienceTier::Mid
}
