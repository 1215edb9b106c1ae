use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inbound event as delivered by the platform client
///
/// Only the fields this crate reads are typed; everything else is kept in the
/// `extra` maps so that it can be passed through to handlers.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub from: Sender,
    #[serde(default)]
    pub to: Option<RawDestination>,
    #[serde(default)]
    pub value: EventValue,
    #[serde(default)]
    pub timestamp: f64,
    /// Fields outside the normalized message shape (never copied into a Request)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sender of an event
///
/// `name` is optional since not every event source resolves the user's
/// handle; DM lookup by name is skipped when it is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sender {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Sender {
    pub fn new(id: impl Into<String>, name: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.map(str::to_string),
            extra: Map::new(),
        }
    }
}

/// Destination as found in the raw event, before its kind is derived
#[derive(Debug, Clone, Deserialize)]
pub struct RawDestination {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Event body; `text` is what listeners match against
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventValue {
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EventValue {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            extra: Map::new(),
        }
    }
}
