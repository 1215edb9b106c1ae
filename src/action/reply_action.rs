use super::dm_resolver::resolve_dm;
use super::error::ActionError;
use super::mention;
use super::outgoing::{build_outgoing, text_body};
use crate::adapters::{ChatClient, Conversation};
use crate::request::Sender;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Context of the event being answered
#[derive(Clone)]
pub struct ActionPayload {
    /// Sender of the triggering message
    pub user: Sender,
    /// Conversation the triggering message arrived on
    pub channel: Arc<dyn Conversation>,
}

impl ActionPayload {
    pub fn new(user: Sender, channel: Arc<dyn Conversation>) -> Self {
        Self { user, channel }
    }
}

impl std::fmt::Debug for ActionPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionPayload")
            .field("user", &self.user)
            .field("channel", &self.channel.id())
            .finish()
    }
}

/// Reply to the event being handled, or send to another conversation
///
/// Created per dispatched event; attach the event context with
/// [`ReplyAction::payload`] before replying. Every message is sent with
/// `as_user: true`.
pub struct ReplyAction<C>
where
    C: ChatClient + ?Sized,
{
    client: Arc<C>,
    message_payload: Option<ActionPayload>,
}

impl<C> ReplyAction<C>
where
    C: ChatClient + ?Sized,
{
    /// Create a new ReplyAction
    ///
    /// # Arguments
    ///
    /// * `client` - The chat client used to resolve and reach destinations
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            message_payload: None,
        }
    }

    /// Attach the context of the triggering event
    pub fn payload(mut self, payload: ActionPayload) -> Self {
        self.message_payload = Some(payload);
        self
    }

    pub fn message_payload(&self) -> Option<&ActionPayload> {
        self.message_payload.as_ref()
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    /// Reply in the conversation the event arrived on
    pub async fn reply(&self, body: Value) -> Result<(), ActionError> {
        let payload = self.require_payload()?;
        send(payload.channel.as_ref(), body).await
    }

    pub async fn reply_text(&self, text: &str) -> Result<(), ActionError> {
        self.reply(text_body(text)).await
    }

    /// Reply to the sender in a direct message
    ///
    /// # Errors
    ///
    /// Fails with [`ActionError::CannotResolveDm`] when the DM cannot be found
    /// after opening it.
    pub async fn reply_dm(&self, body: Value) -> Result<(), ActionError> {
        let payload = self.require_payload()?;
        let dm = resolve_dm(self.client.as_ref(), &payload.user).await?;
        send(dm.as_ref(), body).await
    }

    pub async fn reply_text_dm(&self, text: &str) -> Result<(), ActionError> {
        self.reply_dm(text_body(text)).await
    }

    /// Send to a channel, group or DM by name
    ///
    /// # Arguments
    ///
    /// * `name` - Destination name (`general`, `#general`, `@bob`)
    /// * `body` - Message body (JSON object)
    pub async fn send_to(&self, name: &str, body: Value) -> Result<(), ActionError> {
        let destination = self
            .client
            .channel_group_or_dm_by_name(name)
            .ok_or_else(|| ActionError::DestinationNotFound {
                name: name.to_string(),
            })?;
        send(destination.as_ref(), body).await
    }

    pub async fn send_text_to(&self, name: &str, text: &str) -> Result<(), ActionError> {
        self.send_to(name, text_body(text)).await
    }

    pub fn mention_user(&self, name_or_id: &str) -> String {
        mention::mention_user(name_or_id)
    }

    pub fn mention_channel(&self, name_or_id: &str) -> String {
        mention::mention_channel(name_or_id)
    }

    fn require_payload(&self) -> Result<&ActionPayload, ActionError> {
        self.message_payload
            .as_ref()
            .ok_or(ActionError::MissingPayload)
    }
}

/// Post `body` to `destination` with the fixed outgoing defaults applied
async fn send(destination: &dyn Conversation, body: Value) -> Result<(), ActionError> {
    let outgoing = build_outgoing(body)?;
    destination.post_message(&outgoing).await?;

    info!(
        destination = %destination.id(),
        kind = ?destination.kind(),
        "Successfully sent message"
    );
    Ok(())
}
