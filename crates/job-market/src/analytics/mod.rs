//! Salary normalisation, role classification and aggregate reporting over
//! [`ListingRecord`](crate::listings::ListingRecord) collections.

pub mod classifier;
pub mod domain;
mod engine;
pub mod report;
pub mod salary;
pub mod skills;
pub mod vocabulary;

pub use domain::{Classification, EmploymentMode, ExperienceTier, NormalizedSalary};
pub use engine::{AnalyticsEngine, AnalyticsLimits, ListingFacts};
pub use report::AnalyticsSummary;
pub use salary::{format_gbp, format_salary, normalize_salary};
pub use vocabulary::{Vocabulary, VocabularyError, VocabularyTables};
