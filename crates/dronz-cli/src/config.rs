//! Runtime configuration from environment.

use dronz_core::FlightRules;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the result files are written to
    pub output_dir: PathBuf,
    /// Search expansion budget per restaurant (unbounded when unset)
    pub max_expansions: Option<usize>,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            output_dir: env::var("DRONZ_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("resultfiles")),
            max_expansions: env::var("DRONZ_MAX_EXPANSIONS")
                .ok()
                .and_then(|s| parse_max_expansions(&s)),
            http_timeout: Duration::from_secs(
                env::var("DRONZ_HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }

    pub fn flight_rules(&self) -> FlightRules {
        FlightRules {
            max_expansions: self.max_expansions,
            ..FlightRules::default()
        }
    }
}

fn parse_max_expansions(value: &str) -> Option<usize> {
    match value.trim().parse() {
        Ok(limit) => Some(limit),
        Err(e) => {
            tracing::warn!(
                value,
                error = %e,
                "ignoring unparsable DRONZ_MAX_EXPANSIONS, search is unbounded"
            );
            None
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("resultfiles"),
            max_expansions: None,
            http_timeout: Duration::from_secs(30),
        }
    }
}
