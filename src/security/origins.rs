//! Allowed origin set.

use std::collections::HashSet;

/// Immutable set of origins allowed to receive the license token.
///
/// Membership is an exact, ASCII case-insensitive comparison of the full
/// `scheme://host[:port]` string. There is no prefix, suffix or wildcard
/// matching: `https://a.example.evil` is not `https://a.example`.
#[derive(Debug, Clone, Default)]
pub struct AllowedOrigins {
    origins: HashSet<String>,
}

impl AllowedOrigins {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            origins: origins
                .into_iter()
                .map(|o| o.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Returns true if `origin` is in the set. Empty strings never match.
    pub fn contains(&self, origin: &str) -> bool {
        !origin.is_empty() && self.origins.contains(&origin.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}
