/// Strips invisible markers that CSV exports carry and collapses whitespace.
pub(crate) fn normalize_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-folded form used for substring matching in queries.
pub(crate) fn fold_case(value: &str) -> String {
    normalize_text(value).to_lowercase()
}
