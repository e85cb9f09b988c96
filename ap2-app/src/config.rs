//! Configuration loading from environment.

use std::env;

use anyhow::Context;

/// How the payment processor picks the code a challenge expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpMode {
    /// Every challenge expects the same code.
    Fixed(String),
    /// Every challenge expects a fresh random six-digit code.
    Random,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub known_agents: Vec<String>,
    pub otp_mode: OtpMode,
    pub rate_limit_per_minute: u32,
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "8000".to_string())
            .parse()
            .context("PORT must be a port number")?;

        let known_agents = match lookup("AP2_KNOWN_AGENTS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(String::from)
                .collect(),
            None => ap2_hex::service::DEFAULT_KNOWN_AGENTS
                .iter()
                .map(|a| a.to_string())
                .collect(),
        };

        let otp_mode = match lookup("AP2_OTP_MODE").as_deref().unwrap_or("fixed") {
            "fixed" => OtpMode::Fixed(
                lookup("AP2_OTP_CODE").unwrap_or_else(|| ap2_repo::DEMO_CODE.to_string()),
            ),
            "random" => OtpMode::Random,
            other => anyhow::bail!("AP2_OTP_MODE must be 'fixed' or 'random', got '{}'", other),
        };

        let rate_limit_per_minute = lookup("RATE_LIMIT_PER_MINUTE")
            .map(|v| v.parse::<u32>())
            .transpose()
            .context("RATE_LIMIT_PER_MINUTE must be a positive integer")?
            .unwrap_or(ap2_hex::inbound::DEFAULT_REQUESTS_PER_MINUTE);

        let otlp_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.is_empty());

        Ok(Self {
            port,
            known_agents,
            otp_mode,
            rate_limit_per_minute,
            otlp_endpoint,
        })
    }
}
