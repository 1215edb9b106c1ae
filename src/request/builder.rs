use super::destination::Destination;
use super::extract::{get_matches, get_params};
use super::listener::Listener;
use super::raw_event::{EventValue, RawEvent, Sender};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Event type whose text is matched against listeners
const MESSAGE_EVENT: &str = "message";

/// Normalized copy of the raw event's message fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: EventValue,
    pub timestamp: f64,
}

/// Request handed to a listener's handler
///
/// Built once per event by [`Request::build`]. `user()` and `channel()` are
/// read-only views over `from` and `to`; they are not serialized.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    message: Message,
    from: Sender,
    to: Option<Destination>,
    params: BTreeMap<String, String>,
    matches: Vec<String>,
    listener: Listener,
}

impl Request {
    /// Normalize `raw` for the listener that matched it
    ///
    /// Only `type`, `value` and `timestamp` are copied into the message. The
    /// destination kind is derived from its ID. For `message` events, named
    /// params are extracted first and positional matches only when no params
    /// were found.
    pub fn build(raw: RawEvent, listener: &Listener) -> Self {
        let message = Message {
            kind: raw.kind,
            value: raw.value,
            timestamp: raw.timestamp,
        };
        let to = raw.to.map(|to| Destination::new(to.id, to.extra));

        let mut params = BTreeMap::new();
        let mut matches = Vec::new();

        if message.kind == MESSAGE_EVENT {
            params = get_params(&message.value.text, &listener.value, &listener.matcher);

            if params.is_empty() {
                matches = get_matches(&message.value.text, &listener.matcher);
            }
        }

        debug!(
            from = %raw.from.id,
            to = ?to.as_ref().map(|to| (&to.id, to.kind)),
            params = params.len(),
            matches = matches.len(),
            "Built request"
        );

        Self {
            message,
            from: raw.from,
            to,
            params,
            matches,
            listener: listener.clone(),
        }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn from(&self) -> &Sender {
        &self.from
    }

    pub fn to(&self) -> Option<&Destination> {
        self.to.as_ref()
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn matches(&self) -> &[String] {
        &self.matches
    }

    pub fn listener(&self) -> &Listener {
        &self.listener
    }

    /// Alias of [`Request::from`]
    pub fn user(&self) -> &Sender {
        &self.from
    }

    /// Alias of [`Request::to`]
    pub fn channel(&self) -> Option<&Destination> {
        self.to.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::destination::DestinationKind;
    use regex::Regex;
    use serde_json::json;

    fn raw_event(kind: &str, to: &str, text: &str) -> RawEvent {
        serde_json::from_value(json!({
            "type": kind,
            "from": {"id": "U001", "name": "x-men"},
            "to": {"id": to, "type": "group"},
            "value": {"text": text},
            "timestamp": 1.5,
            "subtype": "bot_message"
        }))
        .unwrap()
    }

    #[test]
    fn test_build_copies_message_fields_only() {
        let listener = Listener::literal("hello").unwrap();
        let request = Request::build(raw_event("message", "C001", "hello"), &listener);

        assert_eq!(request.message().kind, "message");
        assert_eq!(request.message().value.text, "hello");
        assert_eq!(request.message().timestamp, 1.5);

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("subtype").is_none());
        assert!(value["message"].get("subtype").is_none());
    }

    #[test]
    fn test_build_derives_destination_kind() {
        let listener = Listener::literal("hello").unwrap();
        let request = Request::build(raw_event("message", "D001", "hello"), &listener);

        let to = request.to().unwrap();
        assert_eq!(to.kind, DestinationKind::DirectMessage);
    }

    #[test]
    fn test_build_without_destination() {
        let listener = Listener::literal("hello").unwrap();
        let raw: RawEvent = serde_json::from_value(json!({
            "type": "message",
            "from": {"id": "U001"},
            "value": {"text": "hello"}
        }))
        .unwrap();

        let request = Request::build(raw, &listener);

        assert!(request.to().is_none());
        assert!(request.channel().is_none());
    }

    #[test]
    fn test_aliases_point_to_same_values() {
        let listener = Listener::literal("hello").unwrap();
        let request = Request::build(raw_event("message", "C001", "hello"), &listener);

        assert!(std::ptr::eq(request.user(), request.from()));
        assert_eq!(
            request.channel().map(|c| c as *const Destination),
            request.to().map(|t| t as *const Destination)
        );
    }

    #[test]
    fn test_params_suppress_matches() {
        let listener = Listener::literal("get :user").unwrap();
        let request = Request::build(raw_event("message", "C001", "get bob"), &listener);

        assert_eq!(request.params()["user"], "bob");
        assert!(request.matches().is_empty());
    }

    #[test]
    fn test_regex_listener_fills_matches() {
        let listener = Listener::regex(Regex::new(r"^(\w+) loves (\w+)$").unwrap());
        let request = Request::build(raw_event("message", "C001", "alice loves bob"), &listener);

        assert!(request.params().is_empty());
        assert_eq!(request.matches(), ["alice", "bob"]);
    }

    #[test]
    fn test_non_message_event_skips_extraction() {
        let listener = Listener::literal("get :user").unwrap();
        let request = Request::build(raw_event("reaction_added", "C001", "get bob"), &listener);

        assert!(request.params().is_empty());
        assert!(request.matches().is_empty());
    }
}
