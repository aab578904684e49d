use crate::result::Result;
use regex::Regex;

/// Prefix that lets a pattern match anywhere in the path.
const ANY_PREFIX: &str = ".*?";

/** Compiled set of ignore patterns
 *
 * Patterns are partial-match regular expressions: a pattern that does not
 * already start with `.*?` gets it prepended, and the result must match
 * starting at the beginning of the path. `b/` therefore matches
 * `/src/a/b/y.py`.
 *
 * # Example
 * ```
 * use pyseal::build::IgnoreSet;
 *
 * let ignores = IgnoreSet::new(&["tests/".to_string()]).unwrap();
 * assert!(ignores.matches("/project/tests/test_app.py"));
 * assert!(!ignores.matches("/project/app.py"));
 * ```
 */
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    patterns: Vec<Regex>,
}

impl IgnoreSet {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                let extended = if pattern.starts_with(ANY_PREFIX) {
                    pattern.clone()
                } else {
                    format!("{}{}", ANY_PREFIX, pattern)
                };
                Regex::new(&format!("^(?:{})", extended))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// True on the first matching pattern; an empty set matches nothing.
    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(path))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

/// One-shot form of [`IgnoreSet::matches`].
pub fn matches(path: &str, patterns: &[String]) -> Result<bool> {
    Ok(IgnoreSet::new(patterns)?.matches(path))
}
