//! Heading anchors in the GitHub style.

/// Convert heading text to a GitHub-style anchor slug.
///
/// Lowercases, drops punctuation and symbols, and turns every space into a
/// hyphen. Runs of spaces are not collapsed, matching GitHub's anchors.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else if c == ' ' {
                Some('-')
            } else {
                None
            }
        })
        .collect()
}
