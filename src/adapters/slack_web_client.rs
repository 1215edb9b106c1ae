use super::chat_client::{ChatClient, Conversation};
use super::slack_api::SlackApi;
use super::slack_directory::{ConversationInfo, SlackDirectory};
use crate::params::Params;
use crate::request::DestinationKind;
use anyhow::Context as _;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, info};

/// Implementation for chat operations via the Slack Web API
///
/// Lookups are answered from an in-memory directory filled by
/// [`SlackWebClient::refresh`] and kept current by [`ChatClient::open_dm`].
pub struct SlackWebClient {
    api: Arc<SlackApi>,
    directory: RwLock<SlackDirectory>,
}

impl SlackWebClient {
    /// Create a new SlackWebClient from application parameters
    pub fn new(params: &Params) -> anyhow::Result<Self> {
        let api_url = url::Url::parse(&params.slack_api_url).context("Parsing SLACK_API_URL")?;

        let api = SlackApi::new(
            params.slack_token.clone(),
            api_url,
            Duration::from_secs(params.http_timeout),
            Duration::from_secs(params.http_connect_timeout),
            params.insecure_mode,
        )?;

        Ok(Self {
            api: Arc::new(api),
            directory: RwLock::new(SlackDirectory::default()),
        })
    }

    /// Reload users and conversations from the workspace
    pub async fn refresh(&self) -> anyhow::Result<()> {
        let users = self.api.list_users().await.context("Listing Slack users")?;
        let conversations = self
            .api
            .list_conversations()
            .await
            .context("Listing Slack conversations")?;

        let mut directory = self.write_directory();
        directory.load(users, conversations);

        info!(
            users = directory.user_count(),
            conversations = directory.conversation_count(),
            "Slack directory refreshed"
        );
        Ok(())
    }

    /// Handle for an arbitrary conversation ID, known to the directory or not
    ///
    /// Used to build the reply target of an inbound event.
    pub fn conversation(&self, id: &str) -> Arc<dyn Conversation> {
        let info = self
            .read_directory()
            .by_id(id)
            .cloned()
            .unwrap_or_else(|| ConversationInfo {
                id: id.to_string(),
                name: id.to_string(),
                kind: DestinationKind::from_id(id),
                user_id: None,
            });
        self.handle(info)
    }

    fn handle(&self, info: ConversationInfo) -> Arc<dyn Conversation> {
        Arc::new(SlackConversation {
            api: Arc::clone(&self.api),
            info,
        })
    }

    fn lookup<F>(&self, find: F) -> Option<Arc<dyn Conversation>>
    where
        F: FnOnce(&SlackDirectory) -> Option<&ConversationInfo>,
    {
        let info = find(&self.read_directory()).cloned()?;
        Some(self.handle(info))
    }

    fn read_directory(&self) -> std::sync::RwLockReadGuard<'_, SlackDirectory> {
        self.directory
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_directory(&self) -> std::sync::RwLockWriteGuard<'_, SlackDirectory> {
        self.directory
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl ChatClient for SlackWebClient {
    async fn open_dm(&self, user_id: &str) -> anyhow::Result<()> {
        let conversation = self
            .api
            .open_conversation(user_id)
            .await
            .with_context(|| format!("Opening DM with {user_id}"))?;

        // conversations.open does not always echo the user back
        let conversation = super::slack_api::ApiConversation {
            is_im: true,
            user: conversation.user.or_else(|| Some(user_id.to_string())),
            ..conversation
        };

        let info = self.write_directory().insert(conversation);
        debug!(user_id, dm_id = %info.id, "Opened DM");
        Ok(())
    }

    fn dm_by_id(&self, id: &str) -> Option<Arc<dyn Conversation>> {
        self.lookup(|directory| directory.dm_by_id(id))
    }

    fn dm_by_name(&self, name: &str) -> Option<Arc<dyn Conversation>> {
        self.lookup(|directory| directory.dm_by_name(name))
    }

    fn channel_group_or_dm_by_name(&self, name: &str) -> Option<Arc<dyn Conversation>> {
        self.lookup(|directory| directory.channel_group_or_dm_by_name(name))
    }
}

/// Conversation handle posting through the Web API
pub struct SlackConversation {
    api: Arc<SlackApi>,
    info: ConversationInfo,
}

impl SlackConversation {
    pub fn name(&self) -> &str {
        &self.info.name
    }
}

#[async_trait]
impl Conversation for SlackConversation {
    fn id(&self) -> &str {
        &self.info.id
    }

    fn kind(&self) -> DestinationKind {
        self.info.kind
    }

    async fn post_message(&self, body: &Value) -> anyhow::Result<()> {
        self.api
            .post_message(&self.info.id, body)
            .await
            .with_context(|| format!("Posting message to {}", self.info.name))
    }
}
