use super::normalizer::fold_case;
use super::record::ListingRecord;
use serde::{Deserialize, Serialize};

/// Persistence seam for listings, keyed by each listing's URL.
pub trait ListingStore: Send + Sync {
    /// Inserts or replaces listings by URL. Listings without a URL are skipped.
    fn upsert_many(&self, listings: Vec<ListingRecord>) -> Result<UpsertOutcome, StoreError>;
    /// Listings matching `query`, newest posting first.
    fn search(&self, query: &ListingQuery) -> Result<Vec<ListingRecord>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("listing store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertOutcome {
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// Keyword/location filter applied before analytics run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub location: String,
}

impl ListingQuery {
    pub fn new(keywords: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            location: location.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.trim().is_empty() && self.location.trim().is_empty()
    }

    /// Case- and whitespace-insensitive identity, used as a cache key.
    pub fn normalized(&self) -> Self {
        Self {
            keywords: fold_case(&self.keywords),
            location: fold_case(&self.location),
        }
    }

    /// Every keyword longer than two characters must appear in the title or
    /// description; the location must appear in the location text.
    pub fn matches(&self, listing: &ListingRecord) -> bool {
        let keywords = fold_case(&self.keywords);
        let haystack = fold_case(&format!("{} {}", listing.title, listing.description));
        let keywords_match = keywords
            .split(' ')
            .filter(|keyword| keyword.chars().count() > 2)
            .all(|keyword| haystack.contains(keyword));

        let location = fold_case(&self.location);
        let location_match =
            location.is_empty() || fold_case(&listing.location_text).contains(&location);

        keywords_match && location_match
    }

    /// Applies the query to an in-memory collection, newest posting first.
    /// Same-day listings are ordered by URL, so the result does not depend on
    /// the order the collection was read in.
    pub fn select(&self, listings: &[ListingRecord]) -> Vec<ListingRecord> {
        let mut selected: Vec<ListingRecord> = listings
            .iter()
            .filter(|listing| self.matches(listing))
            .cloned()
            .collect();
        selected.sort_by(|a, b| {
            b.posting_date
                .cmp(&a.posting_date)
                .then_with(|| a.url.cmp(&b.url))
        });
        selected
    }
}
