use crate::api::{DEFAULT_API_URL, session::normalize_token};
use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command, builder::ValueParser};
use secrecy::SecretString;
use std::{path::PathBuf, time::Duration};
use url::Url;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_TOKEN: &str = "token";
pub const ARG_SESSION_FILE: &str = "session-file";
pub const ARG_TIMEOUT: &str = "timeout";

#[must_use]
pub fn validator_api_url() -> ValueParser {
    ValueParser::from(move |url: &str| -> std::result::Result<Url, String> {
        let parsed = Url::parse(url.trim()).map_err(|e| format!("invalid URL: {e}"))?;

        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            scheme => Err(format!("unsupported scheme {scheme}, expected http or https")),
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Base URL of the hostel backend API")
                .env("STAYEASE_API_URL")
                .default_value(DEFAULT_API_URL)
                .global(true)
                .value_parser(validator_api_url()),
        )
        .arg(
            Arg::new(ARG_TOKEN)
                .long(ARG_TOKEN)
                .help("Bearer token sent with every request (overrides --session-file)")
                .env("STAYEASE_API_TOKEN")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long(ARG_SESSION_FILE)
                .help("Saved session JSON document holding a \"token\" field")
                .env("STAYEASE_SESSION_FILE")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds")
                .env("STAYEASE_TIMEOUT")
                .default_value("10")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..=300)),
        )
}

/// Upstream API options as given on the command line; the session file is
/// not read here.
#[derive(Debug)]
pub struct Options {
    pub api_url: Url,
    pub token: Option<SecretString>,
    pub session_file: Option<PathBuf>,
    pub timeout: Duration,
}

impl Options {
    /// # Errors
    /// Returns an error if the API URL is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let api_url = matches
            .get_one::<Url>(ARG_API_URL)
            .cloned()
            .context("missing required argument: --api-url")?;

        let token = matches
            .get_one::<String>(ARG_TOKEN)
            .and_then(|token| normalize_token(token));

        let timeout = matches
            .get_one::<u64>(ARG_TIMEOUT)
            .copied()
            .map_or(crate::api::DEFAULT_TIMEOUT, Duration::from_secs);

        Ok(Self {
            api_url,
            token,
            session_file: matches.get_one::<PathBuf>(ARG_SESSION_FILE).cloned(),
            timeout,
        })
    }
}
