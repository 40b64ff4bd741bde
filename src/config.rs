use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    /// Base URL of the scan service used by `submit`.
    pub scan_endpoint: String,
    pub max_documents: usize,
    pub context_chars: usize,
    pub fetch_timeout: Duration,
    pub scan_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            scan_endpoint: "http://127.0.0.1:8000".to_string(),
            max_documents: 5,
            context_chars: 10_000,
            fetch_timeout: Duration::from_secs(15),
            scan_timeout: Duration::from_secs(90),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();
        let defaults = Config::default();

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = parse_var("PORT", defaults.server_addr.port())?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let scan_endpoint = env::var("SCAN_ENDPOINT").unwrap_or(defaults.scan_endpoint);

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            scan_endpoint,
            max_documents: parse_var("MAX_DOCUMENTS", defaults.max_documents)?,
            context_chars: parse_var("CONTEXT_CHARS", defaults.context_chars)?,
            fetch_timeout: Duration::from_secs(parse_var("FETCH_TIMEOUT_SECS", defaults.fetch_timeout.as_secs())?),
            scan_timeout: Duration::from_secs(parse_var("SCAN_TIMEOUT_SECS", defaults.scan_timeout.as_secs())?),
        })
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::ConfigError(format!("Invalid {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}
