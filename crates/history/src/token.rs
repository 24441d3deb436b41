//! Application state tokens
//!
//! A token is the URL fragment describing what the UI shows, for example
//! `#/1/Untitled/cell/A1/formatter`. Tokens are normalised on parse so that
//! equal states compare equal regardless of the spelling of the fragment.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Normalised state token
///
/// Always starts with a single `/`, never ends with `/` (except the root
/// token) and never contains empty segments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HistoryToken(String);

impl HistoryToken {
    /// Parse a fragment; every input yields a token
    ///
    /// Surrounding whitespace and a leading `#` are ignored. Empty input is
    /// the root token `/`.
    pub fn parse(fragment: &str) -> Self {
        let trimmed = fragment.trim();
        let trimmed = trimmed.strip_prefix('#').unwrap_or(trimmed);

        let mut normalised = String::with_capacity(trimmed.len() + 1);
        for segment in trimmed.split('/').filter(|s| !s.is_empty()) {
            normalised.push('/');
            normalised.push_str(segment);
        }

        if normalised.is_empty() {
            normalised.push('/');
        }

        Self(normalised)
    }

    /// The root token `/`
    pub fn root() -> Self {
        Self("/".to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty path segments in order
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    pub fn has_segment(&self, segment: &str) -> bool {
        self.segments().any(|s| s == segment)
    }

    /// True when `prefix` matches this token segment by segment
    pub fn starts_with(&self, prefix: &HistoryToken) -> bool {
        let mut own = self.segments();
        prefix.segments().all(|segment| own.next() == Some(segment))
    }
}

impl fmt::Display for HistoryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HistoryToken {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for HistoryToken {
    fn from(fragment: &str) -> Self {
        Self::parse(fragment)
    }
}

impl AsRef<str> for HistoryToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
