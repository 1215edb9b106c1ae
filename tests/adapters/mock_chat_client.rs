use async_trait::async_trait;
use serde_json::Value;
use slackrelay::adapters::{ChatClient, Conversation};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Conversation handle recording every posted body
pub struct MockConversation {
    id: String,
    pub posts: Arc<Mutex<Vec<Value>>>,
    error: Option<String>,
}

impl MockConversation {
    pub fn new(id: &str) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            posts: Arc::new(Mutex::new(Vec::new())),
            error: None,
        })
    }

    /// テスト用: 送信に失敗するハンドルを作成
    pub fn failing(id: &str, error: &str) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            posts: Arc::new(Mutex::new(Vec::new())),
            error: Some(error.to_string()),
        })
    }

    pub fn get_posts(&self) -> Vec<Value> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Conversation for MockConversation {
    fn id(&self) -> &str {
        &self.id
    }

    async fn post_message(&self, body: &Value) -> anyhow::Result<()> {
        if let Some(error) = &self.error {
            anyhow::bail!("{error}");
        }
        self.posts.lock().unwrap().push(body.clone());
        Ok(())
    }
}

/// Call made against the mock client, in order
#[derive(Debug, Clone, PartialEq)]
pub enum ClientCall {
    OpenDm(String),
    DmById(String),
    DmByName(String),
    ChannelGroupOrDmByName(String),
}

pub struct MockChatClient {
    pub calls: Arc<Mutex<Vec<ClientCall>>>,
    dm_by_id: Option<Arc<MockConversation>>,
    dm_by_name: Option<Arc<MockConversation>>,
    named: HashMap<String, Arc<MockConversation>>,
    open_dm_error: Option<String>,
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            dm_by_id: None,
            dm_by_name: None,
            named: HashMap::new(),
            open_dm_error: None,
        }
    }

    pub fn with_dm_by_id(mut self, dm: Arc<MockConversation>) -> Self {
        self.dm_by_id = Some(dm);
        self
    }

    pub fn with_dm_by_name(mut self, dm: Arc<MockConversation>) -> Self {
        self.dm_by_name = Some(dm);
        self
    }

    pub fn with_named(mut self, name: &str, conversation: Arc<MockConversation>) -> Self {
        self.named.insert(name.to_string(), conversation);
        self
    }

    pub fn with_open_dm_error(mut self, error: &str) -> Self {
        self.open_dm_error = Some(error.to_string());
        self
    }

    pub fn get_calls(&self) -> Vec<ClientCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ClientCall) {
        self.calls.lock().unwrap().push(call);
    }
}

fn as_handle(conversation: &Option<Arc<MockConversation>>) -> Option<Arc<dyn Conversation>> {
    conversation
        .as_ref()
        .map(|c| Arc::clone(c) as Arc<dyn Conversation>)
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn open_dm(&self, user_id: &str) -> anyhow::Result<()> {
        self.record(ClientCall::OpenDm(user_id.to_string()));
        match &self.open_dm_error {
            Some(error) => anyhow::bail!("{error}"),
            None => Ok(()),
        }
    }

    fn dm_by_id(&self, id: &str) -> Option<Arc<dyn Conversation>> {
        self.record(ClientCall::DmById(id.to_string()));
        as_handle(&self.dm_by_id)
    }

    fn dm_by_name(&self, name: &str) -> Option<Arc<dyn Conversation>> {
        self.record(ClientCall::DmByName(name.to_string()));
        as_handle(&self.dm_by_name)
    }

    fn channel_group_or_dm_by_name(&self, name: &str) -> Option<Arc<dyn Conversation>> {
        self.record(ClientCall::ChannelGroupOrDmByName(name.to_string()));
        as_handle(&self.named.get(name).cloned())
    }
}
