use anyhow::Context as _;
use serde::Deserialize;

/// Default Slack Web API base URL
fn default_slack_api_url() -> String {
    "https://slack.com/api/".to_string()
}

/// Default HTTP request timeout in seconds
fn default_http_timeout() -> u64 {
    30
}

/// Default HTTP connection timeout in seconds
fn default_http_connect_timeout() -> u64 {
    10
}

#[derive(Deserialize, Clone)]
pub struct Params {
    #[serde(default)]
    pub insecure_mode: bool,
    pub slack_token: String,
    #[serde(default = "default_slack_api_url")]
    pub slack_api_url: String,

    // HTTP Client Configuration
    #[serde(default = "default_http_timeout")]
    pub http_timeout: u64,
    #[serde(default = "default_http_connect_timeout")]
    pub http_connect_timeout: u64,
}

/// Mask sensitive strings by showing only first and last few characters
fn mask_token(s: &str) -> String {
    const VISIBLE_CHARS: usize = 4;

    let chars: Vec<char> = s.chars().collect();

    if chars.len() <= VISIBLE_CHARS * 2 {
        // If string is too short, mask everything except first char
        return match chars.first() {
            Some(first) => format!("{first}***"),
            None => "<empty>".to_string(),
        };
    }

    let head: String = chars[..VISIBLE_CHARS].iter().collect();
    let tail: String = chars[chars.len() - VISIBLE_CHARS..].iter().collect();
    format!("{head}***{tail}")
}

impl std::fmt::Debug for Params {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Params")
            .field("insecure_mode", &self.insecure_mode)
            .field("slack_token", &mask_token(&self.slack_token))
            .field("slack_api_url", &self.slack_api_url)
            .field("http_timeout", &self.http_timeout)
            .field("http_connect_timeout", &self.http_connect_timeout)
            .finish()
    }
}

impl Params {
    pub fn new() -> anyhow::Result<Params> {
        envy::from_env::<Params>().context("Failed to load configuration")
    }
}
