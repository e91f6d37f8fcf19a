use crate::api::ApiConfig;
use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::time::Duration;

pub const ARG_API_BASE_URL: &str = "api-base-url";
pub const ARG_API_TOKEN: &str = "api-token";
pub const ARG_TIMEOUT_SECONDS: &str = "timeout-seconds";

#[derive(Debug)]
pub struct Options {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_seconds: u64,
}

impl Options {
    /// Parse backend connection arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the base URL is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let base_url = matches
            .get_one::<String>(ARG_API_BASE_URL)
            .cloned()
            .filter(|v| !v.trim().is_empty())
            .with_context(|| format!("missing required argument: --{ARG_API_BASE_URL}"))?;

        Ok(Self {
            base_url,
            token: matches.get_one::<String>(ARG_API_TOKEN).cloned(),
            timeout_seconds: matches
                .get_one::<u64>(ARG_TIMEOUT_SECONDS)
                .copied()
                .unwrap_or(10),
        })
    }

    /// # Errors
    /// Returns an error if the base URL is not a valid http(s) URL.
    pub fn config(&self) -> Result<ApiConfig> {
        let config = ApiConfig::new(&self.base_url)
            .context("invalid CLIENTDESK_API_BASE_URL")?
            .with_token(self.token.as_deref())
            .with_timeout(Duration::from_secs(self.timeout_seconds));
        Ok(config)
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_BASE_URL)
                .short('u')
                .long(ARG_API_BASE_URL)
                .help("Backend API base URL, example: https://api.example.com/api")
                .env("CLIENTDESK_API_BASE_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_API_TOKEN)
                .long(ARG_API_TOKEN)
                .help("Bearer token sent with every request")
                .env("CLIENTDESK_API_TOKEN")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT_SECONDS)
                .long(ARG_TIMEOUT_SECONDS)
                .help("Request timeout in seconds")
                .env("CLIENTDESK_TIMEOUT_SECONDS")
                .default_value("10")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..=300)),
        )
}
