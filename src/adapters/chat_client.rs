use crate::request::DestinationKind;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Handle to a conversation that messages can be posted to
#[async_trait]
pub trait Conversation: Send + Sync {
    /// Conversation ID (`C…`, `G…` or `D…`)
    fn id(&self) -> &str;

    /// Kind of the conversation, derived from its ID
    fn kind(&self) -> DestinationKind {
        DestinationKind::from_id(self.id())
    }

    /// Post a message
    ///
    /// # Arguments
    ///
    /// * `body` - JSON object sent as the message payload (e.g. `{"as_user": true, "text": "hi"}`)
    async fn post_message(&self, body: &Value) -> anyhow::Result<()>;
}

/// Chat platform operations needed to route replies
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Open (or reopen) a direct message conversation with a user
    ///
    /// Completes once the platform acknowledged the request; the DM handle is
    /// obtained afterwards through [`ChatClient::dm_by_id`] or
    /// [`ChatClient::dm_by_name`].
    async fn open_dm(&self, user_id: &str) -> anyhow::Result<()>;

    /// Look up a DM by its ID
    fn dm_by_id(&self, id: &str) -> Option<Arc<dyn Conversation>>;

    /// Look up a DM by the counterpart user's name
    fn dm_by_name(&self, name: &str) -> Option<Arc<dyn Conversation>>;

    /// Look up a channel, group or DM by name (`general`, `#general`, `@bob`)
    fn channel_group_or_dm_by_name(&self, name: &str) -> Option<Arc<dyn Conversation>>;
}
