/// Splits a comma-separated field (post tags, project technologies) into
/// trimmed tokens. Order and duplicates are preserved, and an empty input
/// yields a single empty token.
pub fn split_delimited(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|token| token.trim().to_string())
        .collect()
}
