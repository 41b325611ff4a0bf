//! Shell-glob matching of patterns against item ids.
use glob::{MatchOptions, Pattern};

/// `*` is allowed to cross `/`, so a pattern applies to the full item id.
const OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Return the candidates matched by `pattern`, preserving their order.
///
/// An invalid glob (for example an unclosed `[`) only matches a candidate
/// that is literally equal to it.  No matches is not an error.
///
/// # Examples
///
/// ```
/// use extsync::library::wildcard::matches;
///
/// let items = vec!["a.md".to_string(), "group/b.md".to_string()];
/// assert_eq!(matches("*.md", &items), items);
/// assert_eq!(matches("group/*", &items), vec!["group/b.md".to_string()]);
/// assert!(matches("zzz", &items).is_empty());
/// ```
#[must_use]
pub fn matches(pattern: &str, candidates: &[String]) -> Vec<String> {
    match Pattern::new(pattern) {
        Ok(glob) => candidates
            .iter()
            .filter(|c| glob.matches_with(c, OPTIONS))
            .cloned()
            .collect(),
        Err(_) => candidates
            .iter()
            .filter(|c| c.as_str() == pattern)
            .cloned()
            .collect(),
    }
}

/// Whether `pattern` contains glob metacharacters.
#[must_use]
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}
