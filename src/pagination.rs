//! This modules defines the common functionality for paging lists of records.

/// The config for pagination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// The number of records to return when a request does not specify a limit.
    pub default_limit: u64,
    /// The largest number of records a single request may ask for.
    pub max_limit: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 100,
            max_limit: 100,
        }
    }
}

impl PaginationConfig {
    /// The limit to use for a request that asked for `requested` records.
    ///
    /// Missing limits fall back to the default and oversized limits are
    /// clamped to the maximum.
    pub fn resolve_limit(&self, requested: Option<u64>) -> u64 {
        requested
            .unwrap_or(self.default_limit)
            .min(self.max_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::PaginationConfig;

    #[test]
    fn resolve_limit_uses_default() {
        let config = PaginationConfig {
            default_limit: 20,
            max_limit: 50,
        };

        assert_eq!(config.resolve_limit(None), 20);
    }

    #[test]
    fn resolve_limit_clamps_to_max() {
        let config = PaginationConfig::default();

        assert_eq!(config.resolve_limit(Some(1000)), 100);
        assert_eq!(config.resolve_limit(Some(5)), 5);
    }
}
