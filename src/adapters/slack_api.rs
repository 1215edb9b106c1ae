//! Minimal Slack Web API transport
//!
//! Every method is a `POST {api_url}/{method}` with a bearer token; write
//! methods take a JSON body and read methods a form body. Slack reports
//! failures in the body (`"ok": false, "error": "..."`) rather than through
//! the HTTP status.

use anyhow::{Context as _, anyhow, bail};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Page size requested from paginated list methods
const PAGE_LIMIT: u32 = 200;

/// Channel entry returned by `conversations.list` / `conversations.open`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiConversation {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_im: bool,
    /// Counterpart user of a DM
    #[serde(default)]
    pub user: Option<String>,
}

/// Member entry returned by `users.list`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiUser {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub deleted: bool,
}

#[derive(Debug, Deserialize)]
struct ConversationsPage {
    #[serde(default)]
    channels: Vec<ApiConversation>,
    #[serde(default)]
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Deserialize)]
struct UsersPage {
    #[serde(default)]
    members: Vec<ApiUser>,
    #[serde(default)]
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Deserialize)]
struct ResponseMetadata {
    #[serde(default)]
    next_cursor: String,
}

#[derive(Debug, Deserialize)]
struct OpenedConversation {
    channel: ApiConversation,
}

impl ResponseMetadata {
    fn cursor(metadata: Option<Self>) -> Option<String> {
        metadata
            .map(|m| m.next_cursor)
            .filter(|cursor| !cursor.is_empty())
    }
}

/// HTTP client bound to one workspace token
pub struct SlackApi {
    client: reqwest::Client,
    api_url: Url,
    token: String,
}

impl SlackApi {
    /// Create a new SlackApi
    ///
    /// # Arguments
    ///
    /// * `token` - Bot token (`xoxb-…`)
    /// * `api_url` - Base URL of the Web API; a trailing `/` is added if missing
    /// * `timeout` - Total request timeout
    /// * `connect_timeout` - Connection timeout
    /// * `insecure_mode` - If true, accept invalid TLS certificates
    pub fn new(
        token: String,
        mut api_url: Url,
        timeout: Duration,
        connect_timeout: Duration,
        insecure_mode: bool,
    ) -> anyhow::Result<Self> {
        if !api_url.path().ends_with('/') {
            let path = format!("{}/", api_url.path());
            api_url.set_path(&path);
        }

        let client = reqwest::ClientBuilder::new()
            .danger_accept_invalid_certs(insecure_mode)
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .context("Building HTTP Client")?;

        Ok(Self {
            client,
            api_url,
            token,
        })
    }

    /// Full URL of a Web API method
    pub fn method_url(&self, method: &str) -> anyhow::Result<Url> {
        self.api_url
            .join(method)
            .with_context(|| format!("Building URL for Slack method {method}"))
    }

    /// Call a write method with a JSON body
    pub async fn call<T: DeserializeOwned>(&self, method: &str, body: &Value) -> anyhow::Result<T> {
        let request = self
            .client
            .post(self.method_url(method)?)
            .bearer_auth(&self.token)
            .json(body);
        self.execute(method, request).await
    }

    /// Call a read method with form-encoded arguments
    ///
    /// Slack's read methods do not accept JSON bodies.
    pub async fn call_form<T: DeserializeOwned>(
        &self,
        method: &str,
        form: &[(&str, String)],
    ) -> anyhow::Result<T> {
        let request = self
            .client
            .post(self.method_url(method)?)
            .bearer_auth(&self.token)
            .form(form);
        self.execute(method, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: &str,
        request: reqwest::RequestBuilder,
    ) -> anyhow::Result<T> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Sending Slack request {method}"))?;

        let status = response.status();
        let value: Value = response
            .json()
            .await
            .with_context(|| format!("Parsing Slack response for {method} (status {status})"))?;

        let value = check_ok(method, value)?;
        debug!(%method, %status, "Slack method succeeded");

        serde_json::from_value(value)
            .with_context(|| format!("Unexpected Slack response shape for {method}"))
    }

    /// `conversations.open` for a single user
    pub async fn open_conversation(&self, user_id: &str) -> anyhow::Result<ApiConversation> {
        let opened: OpenedConversation = self
            .call_form(
                "conversations.open",
                &[("users", user_id.to_string()), ("return_im", "true".to_string())],
            )
            .await?;
        Ok(opened.channel)
    }

    /// All pages of `conversations.list` for channels, private groups and DMs
    pub async fn list_conversations(&self) -> anyhow::Result<Vec<ApiConversation>> {
        let mut conversations = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut form = vec![
                ("types", "public_channel,private_channel,im".to_string()),
                ("exclude_archived", "true".to_string()),
                ("limit", PAGE_LIMIT.to_string()),
            ];
            if let Some(cursor) = cursor.take() {
                form.push(("cursor", cursor));
            }

            let page: ConversationsPage = self.call_form("conversations.list", &form).await?;

            conversations.extend(page.channels);
            cursor = ResponseMetadata::cursor(page.response_metadata);
            if cursor.is_none() {
                return Ok(conversations);
            }
        }
    }

    /// All pages of `users.list`
    pub async fn list_users(&self) -> anyhow::Result<Vec<ApiUser>> {
        let mut users = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut form = vec![("limit", PAGE_LIMIT.to_string())];
            if let Some(cursor) = cursor.take() {
                form.push(("cursor", cursor));
            }

            let page: UsersPage = self.call_form("users.list", &form).await?;

            users.extend(page.members);
            cursor = ResponseMetadata::cursor(page.response_metadata);
            if cursor.is_none() {
                return Ok(users);
            }
        }
    }

    /// `chat.postMessage` to a conversation
    pub async fn post_message(&self, channel_id: &str, body: &Value) -> anyhow::Result<()> {
        let mut body = body.clone();
        let object = body
            .as_object_mut()
            .ok_or_else(|| anyhow!("Message body must be a JSON object"))?;
        object.insert("channel".to_string(), Value::String(channel_id.to_string()));

        let _: Value = self.call("chat.postMessage", &body).await?;
        Ok(())
    }
}

/// Turn an `"ok": false` response into an error carrying Slack's error code
fn check_ok(method: &str, value: Value) -> anyhow::Result<Value> {
    if value.get("ok").and_then(Value::as_bool) == Some(true) {
        return Ok(value);
    }

    let error = value
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("unknown_error");
    warn!(%method, %error, "Slack method returned an error");
    bail!("Slack method {method} failed: {error}")
}
