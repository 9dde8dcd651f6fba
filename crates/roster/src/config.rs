use std::{env, time::Duration};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Plain
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "roster.db")
    pub sqlite_path: String,
    /// Per-lookup store timeout in milliseconds (default: 5,000)
    pub store_timeout_ms: u64,
    /// Whole-request timeout in seconds (default: 10)
    pub request_timeout_secs: u64,
    /// Seed demo characters into empty stores at startup (default: false)
    pub seed_demo_data: bool,
    /// Log output format (default: plain)
    pub log_format: LogFormat,
    /// DynamoDB table name (default: "roster")
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub dynamodb_table_name: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "roster.db")
    /// - `STORE_TIMEOUT_MS` - Store lookup timeout (default: 5000)
    /// - `REQUEST_TIMEOUT_SECS` - Request timeout (default: 10)
    /// - `SEED_DEMO_DATA` - `true`/`1` to seed demo data (default: false)
    /// - `LOG_FORMAT` - `json` for JSON logs (default: plain)
    /// - `DYNAMODB_TABLE_NAME` - DynamoDB table (default: "roster")
    pub fn from_env() -> Self {
        Self {
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "roster.db".to_string()),
            store_timeout_ms: env::var("STORE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5_000),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            log_format: env::var("LOG_FORMAT")
                .ok()
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
            dynamodb_table_name: env::var("DYNAMODB_TABLE_NAME")
                .unwrap_or_else(|_| "roster".to_string()),
        }
    }

    /// Get the store lookup timeout as a Duration.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}
