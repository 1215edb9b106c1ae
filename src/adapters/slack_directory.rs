use super::slack_api::{ApiConversation, ApiUser};
use crate::request::DestinationKind;
use std::collections::HashMap;

/// Conversation known to the directory
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationInfo {
    pub id: String,
    /// Channel name, or the counterpart user's name (or ID) for a DM
    pub name: String,
    pub kind: DestinationKind,
    /// Counterpart user of a DM
    pub user_id: Option<String>,
}

/// In-memory index of users and conversations of a workspace
#[derive(Debug, Default)]
pub struct SlackDirectory {
    users: HashMap<String, String>,
    conversations: HashMap<String, ConversationInfo>,
}

impl SlackDirectory {
    /// Replace the directory contents with a fresh listing
    pub fn load(&mut self, users: Vec<ApiUser>, conversations: Vec<ApiConversation>) {
        self.users = users
            .into_iter()
            .filter(|user| !user.deleted)
            .map(|user| (user.id, user.name))
            .collect();

        self.conversations.clear();
        for conversation in conversations {
            self.insert(conversation);
        }
    }

    /// Record a conversation, resolving a DM's name through the user index
    pub fn insert(&mut self, conversation: ApiConversation) -> ConversationInfo {
        let kind = if conversation.is_im {
            DestinationKind::DirectMessage
        } else {
            DestinationKind::from_id(&conversation.id)
        };

        let name = match (&conversation.user, conversation.name) {
            (Some(user_id), _) if kind == DestinationKind::DirectMessage => self
                .users
                .get(user_id)
                .cloned()
                .unwrap_or_else(|| user_id.clone()),
            (_, Some(name)) => name,
            (_, None) => conversation.id.clone(),
        };

        let info = ConversationInfo {
            id: conversation.id,
            name,
            kind,
            user_id: conversation.user,
        };
        self.conversations.insert(info.id.clone(), info.clone());
        info
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn conversation_count(&self) -> usize {
        self.conversations.len()
    }

    pub fn by_id(&self, id: &str) -> Option<&ConversationInfo> {
        self.conversations.get(id)
    }

    /// Find a DM by its conversation ID or by the counterpart user's ID
    pub fn dm_by_id(&self, id: &str) -> Option<&ConversationInfo> {
        self.by_id(id)
            .filter(|info| info.kind == DestinationKind::DirectMessage)
            .or_else(|| self.dms().find(|info| info.user_id.as_deref() == Some(id)))
    }

    /// Find a DM by the counterpart user's name (leading `@` ignored)
    pub fn dm_by_name(&self, name: &str) -> Option<&ConversationInfo> {
        let name = name.strip_prefix('@').unwrap_or(name);
        self.find_named(DestinationKind::DirectMessage, name)
    }

    /// Find a conversation by name
    ///
    /// The prefix selects where to look:
    /// - `@name` - DMs only, by the counterpart user's name
    /// - `#name` - channels, then groups
    /// - `name` - channels, then groups, then DMs
    pub fn channel_group_or_dm_by_name(&self, name: &str) -> Option<&ConversationInfo> {
        if let Some(user_name) = name.strip_prefix('@') {
            return self.dm_by_name(user_name);
        }
        if let Some(channel_name) = name.strip_prefix('#') {
            return self.channel_or_group_by_name(channel_name);
        }

        self.channel_or_group_by_name(name)
            .or_else(|| self.dm_by_name(name))
    }

    fn channel_or_group_by_name(&self, name: &str) -> Option<&ConversationInfo> {
        [DestinationKind::Channel, DestinationKind::Group]
            .into_iter()
            .find_map(|kind| self.find_named(kind, name))
    }

    /// Lowest ID wins when several conversations of a kind share a name
    fn find_named(&self, kind: DestinationKind, name: &str) -> Option<&ConversationInfo> {
        self.conversations
            .values()
            .filter(|info| info.kind == kind && info.name == name)
            .min_by(|a, b| a.id.cmp(&b.id))
    }

    fn dms(&self) -> impl Iterator<Item = &ConversationInfo> {
        self.conversations
            .values()
            .filter(|info| info.kind == DestinationKind::DirectMessage)
    }
}
