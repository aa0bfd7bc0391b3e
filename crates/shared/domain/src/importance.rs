use serde::{Deserialize, Serialize};
use std::fmt;

/// How strongly a mod depends on another one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    /// The mod cannot build or run without it; always linked.
    #[default]
    Required,
    /// Linked when the loader is allowed to fetch dependencies automatically.
    Recommended,
    /// Never linked; only reachable through dispatch events and attributes.
    Suggested,
}

impl Importance {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Recommended => "recommended",
            Self::Suggested => "suggested",
        }
    }

    /// Whether a located dependency of this importance is exposed to the build.
    #[must_use]
    pub const fn links(self, auto_fetch: bool) -> bool {
        match self {
            Self::Required => true,
            Self::Recommended => auto_fetch,
            Self::Suggested => false,
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
