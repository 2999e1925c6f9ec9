use anyhow::{bail, Result};

// -----------------------------------------------
// PRICING SERVER ENDPOINTS
// -----------------------------------------------
pub const PRICING_BASE_URL: &str = "http://localhost:8080";
pub const PRICE_PATH: &str = "/price";

pub fn price_url(base_url: &str, symbol: &str, rate: f64) -> String {
    format!(
        "{}{}?symbol={}&r={}",
        base_url.trim_end_matches('/'),
        PRICE_PATH,
        urlencoding::encode(symbol),
        rate
    )
}

// -----------------------------------------------
// HTTP CLIENT CONFIG
// -----------------------------------------------
pub const USER_AGENT: &str = concat!("options-pricer-client/", env!("CARGO_PKG_VERSION"));
pub const HEADER_ACCEPT_JSON: &str = "application/json";

// Length of body previews kept in error messages
pub const BODY_PREVIEW_CHARS: usize = 200;

// -----------------------------------------------
// RUNTIME DEFAULTS
// -----------------------------------------------
pub const DEFAULT_SYMBOLS: &str = "AAPL";
pub const DEFAULT_RATE: f64 = 0.05;
pub const DEFAULT_MAX_CONCURRENT: usize = 4;
pub const MAX_CONCURRENT_LIMIT: usize = 32;
pub const DEFAULT_OUTPUT_PATH: &str = "output.json";

/// Runtime configuration gathered from `PRICER_*` environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub symbols: Vec<String>,
    pub rate: f64,
    pub max_concurrent: usize,
    pub output_path: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: get_base_url(),
            symbols: parse_symbols(
                &std::env::var("PRICER_SYMBOLS").unwrap_or_else(|_| DEFAULT_SYMBOLS.to_string()),
            ),
            rate: parse_rate(std::env::var("PRICER_RATE").ok().as_deref()),
            max_concurrent: parse_max_concurrent(std::env::var("PRICER_MAX_CONCURRENT").ok().as_deref()),
            output_path: std::env::var("PRICER_OUTPUT")
                .unwrap_or_else(|_| DEFAULT_OUTPUT_PATH.to_string()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.symbols.is_empty() {
            bail!("No symbols configured (PRICER_SYMBOLS is empty)");
        }
        if !self.rate.is_finite() {
            bail!("Rate must be a finite number, got {}", self.rate);
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            bail!("Base URL must start with http:// or https://, got {}", self.base_url);
        }
        Ok(())
    }
}

/// Get pricing server base URL from environment or default
pub fn get_base_url() -> String {
    std::env::var("PRICER_BASE_URL").unwrap_or_else(|_| PRICING_BASE_URL.to_string())
}

/// Split a comma-separated list, trimming and upper-casing each ticker
pub fn parse_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_uppercase())
        .collect()
}

pub fn parse_rate(raw: Option<&str>) -> f64 {
    raw.and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(DEFAULT_RATE)
}

pub fn parse_max_concurrent(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .map(|n| n.clamp(1, MAX_CONCURRENT_LIMIT))
        .unwrap_or(DEFAULT_MAX_CONCURRENT)
}
