use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Compiled regex constraint attached to a parameter (`:id([0-9]+)`).
///
/// The expression is anchored so it must match the whole captured segment.
/// Two constraints are equal when their source text is equal.
#[derive(Clone)]
pub struct Constraint {
    source: Arc<str>,
    regex: Regex,
}

impl Constraint {
    /// Compile `source`; fails with the regex engine's error on invalid syntax.
    pub fn compile(source: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{source})$"))?;
        Ok(Self {
            source: Arc::from(source),
            regex,
        })
    }

    /// Expression as written in the pattern.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// `true` when `text` satisfies the constraint.
    #[inline]
    #[must_use]
    pub fn test(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Constraint").field(&self.source).finish()
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Constraint {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_is_anchored() {
        let digits = Constraint::compile("[0-9]+").unwrap();
        assert!(digits.test("42"));
        assert!(!digits.test("abc"));
        assert!(!digits.test("4a2"));
        assert!(!digits.test(""));
    }

    #[test]
    fn test_alternation_stays_anchored() {
        let c = Constraint::compile("png|jpe?g").unwrap();
        assert!(c.test("jpg"));
        assert!(c.test("png"));
        assert!(!c.test("xpng"));
        assert!(!c.test("pngx"));
    }

    #[test]
    fn test_invalid_expression() {
        assert!(Constraint::compile("[0-9").is_err());
    }

    #[test]
    fn test_equality_by_source() {
        let a = Constraint::compile("\\d+").unwrap();
        let b = Constraint::compile("\\d+").unwrap();
        let c = Constraint::compile("[0-9]+").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
