use anyhow::{Context, Result};

const DEFAULT_READER_BASE_URL: &str = "https://r.jina.ai/";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Prefix prepended to job-offer URLs to fetch them through a reader proxy.
    pub reader_base_url: String,
    pub billing: BillingConfig,
}

/// Stripe settings. Everything is optional so the review API can run without billing.
#[derive(Debug, Clone, Default)]
pub struct BillingConfig {
    pub stripe_secret_key: Option<String>,
    pub webhook_secret: Option<String>,
    pub plus_price_id: Option<String>,
    pub ultra_price_id: Option<String>,
    /// Accept webhook events without a signature. Development only.
    pub allow_unsigned_webhooks: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            reader_base_url: optional_env("READER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_READER_BASE_URL.to_string()),
            billing: BillingConfig {
                stripe_secret_key: optional_env("STRIPE_SECRET_KEY"),
                webhook_secret: optional_env("STRIPE_WEBHOOK_SECRET"),
                plus_price_id: optional_env("STRIPE_PRICE_PLUS"),
                ultra_price_id: optional_env("STRIPE_PRICE_ULTRA"),
                allow_unsigned_webhooks: optional_env("ALLOW_UNSIGNED_WEBHOOKS")
                    .map(|v| parse_flag(&v))
                    .unwrap_or(false),
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" YES "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
