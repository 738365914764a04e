use crate::fetch::TIMEOUT_SEC;
use crate::request::DEFAULT_BASE_URL;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Settings needed to build a [`crate::KloutClient`], usually read from `auth.json`.
///
/// ```json
/// { "api_key": "...", "twitter_username": "jack" }
/// ```
#[derive(Deserialize, Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    #[serde(default)]
    pub twitter_username: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            twitter_username: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> Url {
    Url::from_str(DEFAULT_BASE_URL).expect("default base url is valid")
}

fn default_timeout_secs() -> u64 {
    TIMEOUT_SEC
}
