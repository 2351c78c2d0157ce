use crate::api::{ApiConfig, DEFAULT_TIMEOUT};
use secrecy::SecretString;
use std::time::Duration;
use url::Url;

/// Upstream connection settings shared by every action.
#[derive(Clone)]
pub struct GlobalArgs {
    pub api_url: Url,
    pub api_token: Option<SecretString>,
    pub timeout: Duration,
}

impl GlobalArgs {
    #[must_use]
    pub const fn new(api_url: Url) -> Self {
        Self {
            api_url,
            api_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn set_token(&mut self, token: Option<SecretString>) {
        self.api_token = token;
    }

    pub const fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api_url.clone())
            .with_token(self.api_token.clone())
            .with_timeout(self.timeout)
    }
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("api_url", &self.api_url.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}
