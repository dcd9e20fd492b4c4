//! Term tables shared by the skill extractor and the classifier.
//!
//! Tables are compiled once into case-insensitive whole-word patterns and
//! handed around behind an [`Arc`]; nothing re-declares them per listing.

use regex::Regex;
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

static STANDARD_VOCABULARY: OnceLock<Arc<Vocabulary>> = OnceLock::new();

const SKILLS: &[&str] = &[
    // Languages
    "java", "python", "javascript", "typescript", "php", "ruby", "golang", "kotlin", "swift",
    // Frameworks
    "react", "angular", "vue", "node", "express", "django", "flask", "laravel", "symfony",
    // Data stores
    "sql", "mysql", "postgresql", "mongodb", "redis", "elasticsearch",
    // Cloud & delivery
    "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "jenkins", "ci/cd",
    // Methodology & tooling
    "agile", "scrum", "kanban", "jira", "git", "github", "gitlab",
    // Front end
    "html", "css", "sass", "less", "tailwind", "bootstrap",
    // Data & architecture
    "machine learning", "artificial intelligence", "ai", "ml", "data science",
    "devops", "system design", "microservices", "api",
];

const CONTRACT_TERMS: &[&str] = &[
    "contract",
    "freelance",
    "contractor",
    "interim",
    "temporary",
    "per day",
    "daily rate",
];

const SENIOR_TERMS: &[&str] = &[
    "senior", "lead", "principal", "head", "director", "manager", "chief", "architect", "vp",
    "vice president", "expert", "specialist", "sr.", "sr ", "experienced", "staff", "advanced",
    "5+ years", "6+ years", "7+ years", "8+ years", "9+ years", "10+ years", "5 years",
];

const JUNIOR_TERMS: &[&str] = &[
    "junior", "graduate", "trainee", "entry", "entry level", "apprentice", "intern", "assistant",
    "associate", "jr.", "jr ", "0-2 years", "0-1 years", "1-2 years", "1 year", "2 years",
    "no experience", "fresh graduate", "recent graduate",
];

// "3-5 years" also contains the senior term "5 years", which is checked first.
const MID_TERMS: &[&str] = &[
    "mid level",
    "intermediate",
    "mid-level",
    "mid-senior",
    "mid senior",
    "3-5 years",
    "2-4 years",
    "product owner",
    "product manager",
    "product analyst",
];

const RESPONSIBILITY_TERMS: &[&str] = &[
    "team lead",
    "managing",
    "leadership",
    "strategic",
    "strategy",
];

const TENURE_PATTERN: &str = r"(?i)(\d+)\+?\s*(?:-\s*\d+)?\s*years?(?:\s+of)?\s+experience";

#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    #[error("vocabulary table '{table}' contains an empty term")]
    EmptyTerm { table: &'static str },
    #[error("failed to compile pattern for '{term}': {source}")]
    Pattern {
        term: String,
        #[source]
        source: regex::Error,
    },
}

/// Raw term lists from which a [`Vocabulary`] is compiled.
#[derive(Debug, Clone)]
pub struct VocabularyTables {
    pub skills: Vec<String>,
    pub contract_terms: Vec<String>,
    pub senior_terms: Vec<String>,
    pub junior_terms: Vec<String>,
    pub mid_terms: Vec<String>,
    pub responsibility_terms: Vec<String>,
}

impl VocabularyTables {
    pub fn standard() -> Self {
        Self {
            skills: owned(SKILLS),
            contract_terms: owned(CONTRACT_TERMS),
            senior_terms: owned(SENIOR_TERMS),
            junior_terms: owned(JUNIOR_TERMS),
            mid_terms: owned(MID_TERMS),
            responsibility_terms: owned(RESPONSIBILITY_TERMS),
        }
    }
}

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|term| term.to_string()).collect()
}

/// A skill name and the whole-word pattern confirming it.
#[derive(Debug)]
pub struct SkillPattern {
    pub name: String,
    pattern: Regex,
}

impl SkillPattern {
    /// `text` must already be lowercase.
    pub(crate) fn found_in(&self, text: &str) -> bool {
        text.contains(self.name.as_str()) && self.pattern.is_match(text)
    }
}

/// A group of terms tested together as one alternation.
#[derive(Debug)]
pub struct TermSet {
    terms: Vec<String>,
    pattern: Option<Regex>,
}

impl TermSet {
    fn compile(table: &'static str, terms: &[String]) -> Result<Self, VocabularyError> {
        let terms = dedup_lowercase(table, terms)?;
        if terms.is_empty() {
            return Ok(Self {
                terms,
                pattern: None,
            });
        }

        let alternation = terms
            .iter()
            .map(|term| whole_word(term))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!("(?i)(?:{alternation})")).map_err(|source| {
            VocabularyError::Pattern {
                term: table.to_string(),
                source,
            }
        })?;

        Ok(Self {
            terms,
            pattern: Some(pattern),
        })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// True when any term occurs in `text` as a whole word or phrase.
    pub fn matches(&self, text: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(text))
    }
}

/// Compiled, immutable term tables.
#[derive(Debug)]
pub struct Vocabulary {
    skills: Vec<SkillPattern>,
    contract_terms: Vec<String>,
    senior: TermSet,
    junior: TermSet,
    mid: TermSet,
    responsibility: TermSet,
    tenure: Regex,
}

impl Vocabulary {
    pub fn new(tables: VocabularyTables) -> Result<Self, VocabularyError> {
        let skills = dedup_lowercase("skills", &tables.skills)?
            .into_iter()
            .map(|name| {
                Regex::new(&format!("(?i){}", whole_word(&name)))
                    .map(|pattern| SkillPattern {
                        name: name.clone(),
                        pattern,
                    })
                    .map_err(|source| VocabularyError::Pattern { term: name, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let tenure = Regex::new(TENURE_PATTERN).map_err(|source| VocabularyError::Pattern {
            term: "tenure".to_string(),
            source,
        })?;

        Ok(Self {
            skills,
            contract_terms: dedup_lowercase("contract_terms", &tables.contract_terms)?,
            senior: TermSet::compile("senior_terms", &tables.senior_terms)?,
            junior: TermSet::compile("junior_terms", &tables.junior_terms)?,
            mid: TermSet::compile("mid_terms", &tables.mid_terms)?,
            responsibility: TermSet::compile("responsibility_terms", &tables.responsibility_terms)?,
            tenure,
        })
    }

    /// Shared instance built from the built-in tables.
    pub fn standard() -> Arc<Self> {
        STANDARD_VOCABULARY
            .get_or_init(|| {
                Arc::new(
                    Self::new(VocabularyTables::standard())
                        .expect("built-in vocabulary tables compile"),
                )
            })
            .clone()
    }

    pub fn skills(&self) -> &[SkillPattern] {
        &self.skills
    }

    pub fn contract_terms(&self) -> &[String] {
        &self.contract_terms
    }

    pub fn senior(&self) -> &TermSet {
        &self.senior
    }

    pub fn junior(&self) -> &TermSet {
        &self.junior
    }

    pub fn mid(&self) -> &TermSet {
        &self.mid
    }

    pub fn responsibility(&self) -> &TermSet {
        &self.responsibility
    }

    /// Leading year count from a "N(+) years (of) experience" phrase.
    pub fn stated_years(&self, text: &str) -> Option<u32> {
        self.tenure
            .captures(text)
            .and_then(|captures| captures.get(1))
            .and_then(|years| years.as_str().parse().ok())
    }
}

fn dedup_lowercase(table: &'static str, terms: &[String]) -> Result<Vec<String>, VocabularyError> {
    let mut seen = HashSet::new();
    let mut result = Vec::with_capacity(terms.len());
    for term in terms {
        let lowered = term.to_lowercase();
        if lowered.trim().is_empty() {
            return Err(VocabularyError::EmptyTerm { table });
        }
        if seen.insert(lowered.clone()) {
            result.push(lowered);
        }
    }
    Ok(result)
}

/// Escaped pattern that only matches `term` between word boundaries. Edges
/// that are punctuation or whitespace (`sr.`, `jr `) carry no boundary.
fn whole_word(term: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let lead = if term.chars().next().is_some_and(is_word) {
        r"\b"
    } else {
        ""
    };
    let trail = if term.chars().last().is_some_and(is_word) {
        r"\b"
    } else {
        ""
    };
    format!("{lead}{}{trail}", regex::escape(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_vocabulary_is_shared() {
        let first = Vocabulary::standard();
        let second = Vocabulary::standard();
        assert!(Arc::ptr_eq(&first, &second));
        assert!((40..=60).contains(&first.skills().len()));
    }

    #[test]
    fn term_sets_match_whole_words_only() {
        let vocabulary = Vocabulary::standard();
        assert!(vocabulary.senior().matches("lead developer"));
        assert!(!vocabulary.senior().matches("misleading title"));
        assert!(vocabulary.senior().matches("sr. engineer"));
        assert!(vocabulary.senior().matches("needs 5+ years in rust"));
        assert!(!vocabulary.senior().matches("needs 15+ yearsish"));
        assert!(vocabulary.junior().matches("entry level role"));
        assert!(!vocabulary.junior().matches("reentry"));
    }

    #[test]
    fn stated_years_reads_leading_number() {
        let vocabulary = Vocabulary::standard();
        assert_eq!(vocabulary.stated_years("3+ years of experience"), Some(3));
        assert_eq!(vocabulary.stated_years("4-6 years experience"), Some(4));
        assert_eq!(vocabulary.stated_years("1 year experience"), Some(1));
        assert_eq!(vocabulary.stated_years("years of fun"), None);
    }

    #[test]
    fn empty_terms_are_rejected() {
        let tables = VocabularyTables {
            skills: vec!["rust".to_string(), " ".to_string()],
            ..VocabularyTables::standard()
        };
        assert!(matches!(
            Vocabulary::new(tables),
            Err(VocabularyError::EmptyTerm { table: "skills" })
        ));
    }

    #[test]
    fn duplicate_terms_collapse() {
        let tables = VocabularyTables {
            skills: vec!["Rust".to_string(), "rust".to_string()],
            ..VocabularyTables::standard()
        };
        let vocabulary = Vocabulary::new(tables).expect("vocabulary compiles");
        assert_eq!(vocabulary.skills().len(), 1);
        assert_eq!(vocabulary.skills()[0].name, "rust");
    }
}
