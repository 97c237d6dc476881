/// Engine configuration parsed from environment variables.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Transposition-table size in entries (rounded up to a power of two).
    /// 16M entries is 256 MB, sized for a memory-constrained deployment.
    pub tt_entries: usize,
    /// Default fixed search depth for the harnesses.
    pub search_depth: u8,
}

impl EngineConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        EngineConfig {
            tt_entries: std::env::var("GAMBIT_TT_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(16_777_216),
            search_depth: std::env::var("GAMBIT_SEARCH_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            tt_entries: 16_777_216,
            search_depth: 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.tt_entries, 16_777_216);
        assert_eq!(config.search_depth, 7);
    }

    #[test]
    fn from_env_defaults() {
        // Without the env vars set, fall back to defaults.
        let config = EngineConfig::from_env();
        assert_eq!(config.tt_entries, 16_777_216);
        assert_eq!(config.search_depth, 7);
    }
}
