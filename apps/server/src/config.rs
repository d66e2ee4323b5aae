use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context;
use chrono_tz::Tz;
use receivables_core::utils::time_utils::DEFAULT_AS_OF_TZ;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub static_dir: String,
    /// Zone used to turn "now" into today's as-of date.
    pub timezone: Tz,
    /// JSON file with extra bucket schemes.
    pub bucket_schemes_file: Option<PathBuf>,
    /// Base URL of the accounting API; report fetching is off when unset.
    pub accounting_api_url: Option<String>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("AR_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid AR_LISTEN_ADDR")?;
        let db_path =
            std::env::var("AR_DB_PATH").unwrap_or_else(|_| "./db/receivables.db".into());
        let cors_allow = std::env::var("AR_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("AR_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let static_dir = std::env::var("AR_STATIC_DIR").unwrap_or_else(|_| "dist".into());
        let timezone = match non_empty_var("AR_TIMEZONE") {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|e| anyhow::anyhow!("Invalid AR_TIMEZONE '{}': {}", name, e))?,
            None => DEFAULT_AS_OF_TZ,
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            static_dir,
            timezone,
            bucket_schemes_file: non_empty_var("AR_BUCKET_SCHEMES_FILE").map(PathBuf::from),
            accounting_api_url: non_empty_var("AR_ACCOUNTING_API_URL"),
        })
    }
}
