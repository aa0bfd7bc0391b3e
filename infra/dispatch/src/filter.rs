use crate::error::DispatchError;
use std::fmt;

const WILDCARD: char = '*';

/// Selects which event ids a listener receives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventFilter {
    /// Exactly one event id.
    Exact(String),
    /// Every id starting with the prefix, e.g. `alpha.core/` for a whole mod namespace.
    Prefix(String),
    /// Every event id.
    Any,
}

impl EventFilter {
    pub fn exact(id: impl Into<String>) -> Self {
        Self::Exact(id.into())
    }

    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix(prefix.into())
    }

    /// Parses a pattern: `*` matches everything, `ns/*` matches a prefix and
    /// anything without a wildcard matches exactly.
    ///
    /// # Errors
    /// [`DispatchError::InvalidFilter`] for an empty pattern or a `*` that is
    /// not the last character.
    pub fn parse(pattern: &str) -> Result<Self, DispatchError> {
        let invalid = |reason: &'static str| DispatchError::InvalidFilter {
            pattern: pattern.to_owned(),
            context: Some(reason.into()),
        };

        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(invalid("pattern is empty"));
        }
        if pattern == "*" {
            return Ok(Self::Any);
        }
        match pattern.find(WILDCARD) {
            None => Ok(Self::Exact(pattern.to_owned())),
            Some(pos) if pos == pattern.len() - 1 => {
                Ok(Self::Prefix(pattern[..pos].to_owned()))
            },
            Some(_) => Err(invalid("wildcard is only allowed at the end")),
        }
    }

    #[must_use]
    pub fn matches(&self, event_id: &str) -> bool {
        match self {
            Self::Exact(id) => id == event_id,
            Self::Prefix(prefix) => event_id.starts_with(prefix.as_str()),
            Self::Any => true,
        }
    }

    /// The single id this filter selects, if it is exact.
    #[must_use]
    pub fn exact_id(&self) -> Option<&str> {
        match self {
            Self::Exact(id) => Some(id),
            _ => None,
        }
    }
}

impl From<&str> for EventFilter {
    fn from(id: &str) -> Self {
        Self::Exact(id.to_owned())
    }
}

impl From<String> for EventFilter {
    fn from(id: String) -> Self {
        Self::Exact(id)
    }
}

impl fmt::Display for EventFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(id) => f.write_str(id),
            Self::Prefix(prefix) => write!(f, "{prefix}{WILDCARD}"),
            Self::Any => write!(f, "{WILDCARD}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recognizes_all_forms() {
        assert_eq!(EventFilter::parse("*").unwrap(), EventFilter::Any);
        assert_eq!(
            EventFilter::parse("alpha.core/*").unwrap(),
            EventFilter::Prefix("alpha.core/".to_owned())
        );
        assert_eq!(
            EventFilter::parse(" alpha.core/Ping ").unwrap(),
            EventFilter::Exact("alpha.core/Ping".to_owned())
        );
    }

    #[test]
    fn parse_rejects_misplaced_wildcards() {
        assert!(matches!(EventFilter::parse(""), Err(DispatchError::InvalidFilter { .. })));
        assert!(matches!(EventFilter::parse("a/*/b"), Err(DispatchError::InvalidFilter { .. })));
    }

    #[test]
    fn matching_follows_variant() {
        let prefix = EventFilter::prefix("alpha.core/");
        assert!(prefix.matches("alpha.core/Ping"));
        assert!(!prefix.matches("beta.ui/Ping"));
        assert!(EventFilter::Any.matches("anything"));
        assert!(!EventFilter::exact("a/b").matches("a/bc"));
        assert_eq!(prefix.to_string(), "alpha.core/*");
    }
}
