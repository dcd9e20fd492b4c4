use super::vocabulary::Vocabulary;

/// Skills from the vocabulary mentioned in `description`, in vocabulary
/// order. A cheap substring check runs first; the word-boundary pattern then
/// rejects partial matches such as "less" inside "unless".
pub fn extract_skills<'v>(description: &str, vocabulary: &'v Vocabulary) -> Vec<&'v str> {
    if description.trim().is_empty() {
        return Vec::new();
    }

    let text = description.to_lowercase();
    vocabulary
        .skills()
        .iter()
        .filter(|skill| skill.found_in(&text))
        .map(|skill| skill.name.as_str())
        .collect()
}
