//! Banned-term auto-moderation.

use regex::Regex;
use std::collections::HashSet;
use tracing::info;

/// Matches text against a fixed set of banned terms.
///
/// Terms are literal, matched case-insensitively on word boundaries, so a
/// banned `badword` catches `BADWORD!` but not `badwordly`.
#[derive(Debug, Clone)]
pub struct ModerationFilter {
    pattern: Option<Regex>,
}

impl ModerationFilter {
    /// Compile the filter. An empty list yields a filter that never matches.
    pub fn new(terms: &[String]) -> Result<Self, regex::Error> {
        let mut seen = HashSet::new();
        let mut terms: Vec<String> = terms
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty() && seen.insert(t.clone()))
            .collect();

        if terms.is_empty() {
            return Ok(Self { pattern: None });
        }

        // Longest first so a multi-word term wins over its own prefix.
        terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = terms
            .iter()
            .map(|t| bounded(t))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?i)(?:{})", alternation))?;

        info!("Auto-moderation active with {} banned terms", terms.len());
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    pub fn is_active(&self) -> bool {
        self.pattern.is_some()
    }

    /// The first banned term found in `text`, lower-cased.
    pub fn check(&self, text: &str) -> Option<String> {
        let pattern = self.pattern.as_ref()?;
        pattern
            .find(&text.to_lowercase())
            .map(|m| m.as_str().to_string())
    }
}

/// Escape `term`, with `\b` only on ends that are word characters.
fn bounded(term: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let start = if term.starts_with(is_word) { r"\b" } else { "" };
    let end = if term.ends_with(is_word) { r"\b" } else { "" };
    format!("{}{}{}", start, regex::escape(term), end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(terms: &[&str]) -> ModerationFilter {
        let terms: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
        ModerationFilter::new(&terms).unwrap()
    }

    #[test]
    fn test_empty_list_never_matches() {
        let filter = filter(&[]);
        assert!(!filter.is_active());
        assert_eq!(filter.check(""), None);
        assert_eq!(filter.check("anything at all"), None);

        let blank = ModerationFilter::new(&["  ".to_string()]).unwrap();
        assert!(!blank.is_active());
    }

    #[test]
    fn test_whole_word_case_insensitive() {
        let filter = filter(&["badword"]);
        assert_eq!(filter.check("this is a BADWORD here").as_deref(), Some("badword"));
        assert_eq!(filter.check("badword!").as_deref(), Some("badword"));
        assert_eq!(filter.check("this is badwordly"), None);
        assert_eq!(filter.check("notbadword"), None);
    }

    #[test]
    fn test_terms_are_literal() {
        let filter = filter(&["a.b", "c+"]);
        assert_eq!(filter.check("axb"), None);
        assert_eq!(filter.check("say a.b now").as_deref(), Some("a.b"));
        assert_eq!(filter.check("cc"), None);
    }

    #[test]
    fn test_terms_with_symbol_edges() {
        let filter = filter(&["c++", "@admin", "$$$"]);
        assert_eq!(filter.check("i love c++ a lot").as_deref(), Some("c++"));
        assert_eq!(filter.check("hey @admin look").as_deref(), Some("@admin"));
        assert_eq!(filter.check("make $$$ fast").as_deref(), Some("$$$"));
        // The word side still needs a boundary.
        assert_eq!(filter.check("abc++"), None);
        assert_eq!(filter.check("@administrator"), None);
    }

    #[test]
    fn test_multiple_terms() {
        let filter = filter(&["Foo", "bar", "foo"]);
        assert_eq!(filter.check("BAR none").as_deref(), Some("bar"));
        assert_eq!(filter.check("a foo b").as_deref(), Some("foo"));
        assert_eq!(filter.check("foobar"), None);
    }

    #[test]
    fn test_longest_term_reported() {
        let filter = filter(&["bad", "bad word"]);
        assert_eq!(filter.check("such a bad word").as_deref(), Some("bad word"));
    }
}
