//! Pipeline configuration from environment variables

use std::env;
use std::time::Duration;

/// Configuration for the ETL runtime
///
/// Loaded from environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Path to SQLite database file
    pub db_path: String,

    /// PokéAPI root, without trailing `/pokemon`
    pub api_base_url: String,

    /// Number of Pokémon requested per run
    pub fetch_limit: u32,

    /// Per-request HTTP timeout in seconds
    pub fetch_timeout_secs: u64,

    /// Repeat the run on this interval; `None` runs once and exits
    pub run_interval_secs: Option<u64>,
}

impl PipelineConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `POKEFLOW_DB_PATH` (default: local.db)
    /// - `POKEAPI_BASE_URL` (default: https://pokeapi.co/api/v2)
    /// - `POKEAPI_LIMIT` (default: 10)
    /// - `FETCH_TIMEOUT_SECS` (default: 10)
    /// - `RUN_INTERVAL_SECS` (default: unset, single run)
    pub fn from_env() -> Self {
        Self {
            db_path: env::var("POKEFLOW_DB_PATH").unwrap_or_else(|_| "local.db".to_string()),

            api_base_url: env::var("POKEAPI_BASE_URL")
                .unwrap_or_else(|_| "https://pokeapi.co/api/v2".to_string()),

            fetch_limit: env::var("POKEAPI_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),

            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),

            run_interval_secs: env::var("RUN_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|secs: &u64| *secs > 0),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn run_interval(&self) -> Option<Duration> {
        self.run_interval_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both cases share process-wide env vars, so they run as one test
    #[test]
    fn test_config_from_env() {
        // Defaults when nothing is set
        env::remove_var("POKEFLOW_DB_PATH");
        env::remove_var("POKEAPI_BASE_URL");
        env::remove_var("POKEAPI_LIMIT");
        env::remove_var("FETCH_TIMEOUT_SECS");
        env::remove_var("RUN_INTERVAL_SECS");

        let config = PipelineConfig::from_env();

        assert_eq!(config.db_path, "local.db");
        assert_eq!(config.api_base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.fetch_limit, 10);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.run_interval(), None);

        // Custom values
        env::set_var("POKEFLOW_DB_PATH", "/tmp/pokeflow-test.db");
        env::set_var("POKEAPI_LIMIT", "151");
        env::set_var("FETCH_TIMEOUT_SECS", "not-a-number");
        env::set_var("RUN_INTERVAL_SECS", "3600");

        let config = PipelineConfig::from_env();

        assert_eq!(config.db_path, "/tmp/pokeflow-test.db");
        assert_eq!(config.fetch_limit, 151);
        assert_eq!(config.fetch_timeout_secs, 10); // Unparseable falls back
        assert_eq!(config.run_interval(), Some(Duration::from_secs(3600)));

        // Zero interval means single run
        env::set_var("RUN_INTERVAL_SECS", "0");
        assert_eq!(PipelineConfig::from_env().run_interval_secs, None);

        // Cleanup
        env::remove_var("POKEFLOW_DB_PATH");
        env::remove_var("POKEAPI_LIMIT");
        env::remove_var("FETCH_TIMEOUT_SECS");
        env::remove_var("RUN_INTERVAL_SECS");
    }
}
