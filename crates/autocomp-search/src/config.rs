//! Search store configuration

use std::time::Duration;

use tracing::warn;

/// Tunables for a `SearchStore`
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// How long a built index is served before the next access rebuilds it
    pub index_ttl: Duration,

    /// Page size when a query does not ask for one
    pub default_limit: usize,

    /// Largest page size a query may ask for
    pub max_limit: usize,

    /// Number of suggestions when the caller does not ask for a count
    pub suggest_limit: usize,
}

impl SearchConfig {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

    /// Defaults, overridden by `AUTOCOMP_INDEX_TTL_SECS`, `AUTOCOMP_DEFAULT_LIMIT`
    /// and `AUTOCOMP_MAX_LIMIT` when set
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(secs) = env_number("AUTOCOMP_INDEX_TTL_SECS") {
            config.index_ttl = Duration::from_secs(secs as u64);
        }
        if let Some(limit) = env_number("AUTOCOMP_DEFAULT_LIMIT") {
            config.default_limit = limit;
        }
        if let Some(limit) = env_number("AUTOCOMP_MAX_LIMIT") {
            config.max_limit = limit;
        }

        config.max_limit = config.max_limit.max(1);
        config
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.index_ttl = ttl;
        self
    }

    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index_ttl: Self::DEFAULT_TTL,
            default_limit: 20,
            max_limit: 100,
            suggest_limit: 8,
        }
    }
}

fn env_number(name: &str) -> Option<usize> {
    let value = std::env::var(name).ok()?;
    match value.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a number", name, value);
            None
        }
    }
}
