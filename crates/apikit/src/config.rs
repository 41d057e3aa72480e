//! Application configuration

use std::env;
use std::str::FromStr;

use tracing::Level;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server listens on
    pub listen_port: u16,

    /// Maximum request body size in bytes accepted by the decode adapters
    pub max_body_size: usize,

    /// Telemetry interceptor settings
    pub telemetry: TelemetrySettings,
}

/// Settings for the telemetry request interceptor
#[derive(Debug, Clone)]
pub struct TelemetrySettings {
    /// Whether the interceptor is attached at all
    pub enabled: bool,

    /// Collector endpoint URL the interceptor reports to
    pub endpoint: String,

    /// Application name reported with every request record
    pub application_name: String,

    /// Deployment environment tag, e.g. "stage" or "prod"
    pub environment: String,

    /// Whether the interceptor emits log events for observed requests
    pub logging_enabled: bool,

    /// Verbosity of the emitted log events
    pub log_level: Level,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            listen_port: env_parse("APIKIT_LISTEN_PORT", 8300),

            max_body_size: env_parse("APIKIT_MAX_BODY_SIZE", 1024 * 1024),

            telemetry: TelemetrySettings {
                enabled: env_parse("APIKIT_TELEMETRY_ENABLED", true),

                endpoint: env::var("APIKIT_TELEMETRY_ENDPOINT")
                    .unwrap_or_else(|_| "http://localhost:8080".to_string()),

                application_name: env::var("APIKIT_TELEMETRY_APP_NAME")
                    .unwrap_or_else(|_| "apikit-demo".to_string()),

                environment: env::var("APIKIT_TELEMETRY_ENVIRONMENT")
                    .unwrap_or_else(|_| "stage".to_string()),

                logging_enabled: env_parse("APIKIT_TELEMETRY_LOGGING_ENABLED", true),

                log_level: env_parse("APIKIT_TELEMETRY_LOG_LEVEL", Level::INFO),
            },
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Read an env var and parse it, falling back to the default when the
/// variable is unset or does not parse
fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_parse_falls_back_when_unset() {
        assert_eq!(env_parse("APIKIT_TEST_UNSET_PORT", 8300u16), 8300);
    }

    #[test]
    fn test_env_parse_reads_set_value() {
        env::set_var("APIKIT_TEST_SET_PORT", "9000");
        assert_eq!(env_parse("APIKIT_TEST_SET_PORT", 8300u16), 9000);
        env::remove_var("APIKIT_TEST_SET_PORT");
    }

    #[test]
    fn test_env_parse_falls_back_on_garbage() {
        env::set_var("APIKIT_TEST_BAD_PORT", "not-a-port");
        assert_eq!(env_parse("APIKIT_TEST_BAD_PORT", 8300u16), 8300);
        env::remove_var("APIKIT_TEST_BAD_PORT");
    }

    #[test]
    fn test_log_level_parses_case_insensitively() {
        env::set_var("APIKIT_TEST_LOG_LEVEL", "DEBUG");
        assert_eq!(env_parse("APIKIT_TEST_LOG_LEVEL", Level::INFO), Level::DEBUG);
        env::remove_var("APIKIT_TEST_LOG_LEVEL");
    }

    #[test]
    fn test_defaults_match_reference_deployment() {
        // Isolated keys above cover the override paths; the defaults here
        // only hold when the APIKIT_* vars are not set in the environment.
        if env::var("APIKIT_LISTEN_PORT").is_err() {
            let config = AppConfig::from_env();
            assert_eq!(config.listen_port, 8300);
            assert_eq!(config.max_body_size, 1024 * 1024);
            assert_eq!(config.telemetry.environment, "stage");
            assert_eq!(config.telemetry.application_name, "apikit-demo");
            assert_eq!(config.telemetry.endpoint, "http://localhost:8080");
        }
    }
}
