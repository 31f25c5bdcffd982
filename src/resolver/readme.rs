//! License detection from README headings.
//!
//! Rules are tried in order and the first one returning a match wins:
//!
//! 1. [`HeadingWithToken`]: `## License (MIT)` → `MIT`
//! 2. [`HeadingThenKeyword`]: the first `mit`, `apache` or `gpl` after a
//!    bare `## License` heading.

use anyhow::Result;
use regex::Regex;

pub trait ReadmeRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, text: &str) -> Option<String>;
}

/// A license heading followed by a token on the same line.
pub struct HeadingWithToken {
    pattern: Regex,
}

impl HeadingWithToken {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(r"(?i)#+ (?:licence|license) (\S*)")?,
        })
    }
}

impl ReadmeRule for HeadingWithToken {
    fn name(&self) -> &'static str {
        "heading-with-token"
    }

    /// Only the first heading is considered; an empty token after cleaning is
    /// no match.
    fn apply(&self, text: &str) -> Option<String> {
        let token = self.pattern.captures(text)?.get(1)?.as_str();
        let token = token.strip_prefix('(').unwrap_or(token);
        let token = token.strip_suffix(')').unwrap_or(token);
        let cleaned = token.replace('#', "");
        (!cleaned.is_empty()).then_some(cleaned)
    }
}

/// The first license keyword found anywhere after a license heading.
pub struct HeadingThenKeyword {
    heading: Regex,
    keyword: Regex,
}

impl HeadingThenKeyword {
    pub fn new() -> Result<Self> {
        Ok(Self {
            heading: Regex::new(r"(?i)#+ (?:licence|license)")?,
            keyword: Regex::new(r"(?i)mit|apache|gpl")?,
        })
    }
}

impl ReadmeRule for HeadingThenKeyword {
    fn name(&self) -> &'static str {
        "heading-then-keyword"
    }

    fn apply(&self, text: &str) -> Option<String> {
        let start = self.heading.find(text)?.start();
        self.keyword
            .find(&text[start..])
            .map(|m| m.as_str().to_string())
    }
}

/// The ordered rule set.
pub struct ReadmeRules {
    rules: Vec<Box<dyn ReadmeRule>>,
}

impl ReadmeRules {
    pub fn new() -> Result<Self> {
        Ok(Self {
            rules: vec![
                Box::new(HeadingWithToken::new()?),
                Box::new(HeadingThenKeyword::new()?),
            ],
        })
    }

    /// The first matching rule's name and the identifier it produced.
    pub fn find(&self, text: &str) -> Option<(&'static str, String)> {
        self.rules
            .iter()
            .find_map(|rule| rule.apply(text).map(|id| (rule.name(), id)))
    }
}
