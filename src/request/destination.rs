use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of conversation a message was delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationKind {
    Channel,
    Group,
    #[serde(rename = "dm")]
    DirectMessage,
}

impl DestinationKind {
    /// Infer the kind from the shape of a conversation ID
    ///
    /// Slack prefixes conversation IDs with `C` (channel), `G` (private group)
    /// or `D` (direct message). The check is case-insensitive; anything else,
    /// including an empty ID, is treated as a channel.
    pub fn from_id(id: &str) -> Self {
        match id.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('c') => Self::Channel,
            Some('g') => Self::Group,
            Some('d') => Self::DirectMessage,
            _ => Self::Channel,
        }
    }
}

/// Destination of an inbound event, tagged with its derived kind.
///
/// Fields other than `id` and `type` are carried through from the raw event
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Destination {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DestinationKind,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Destination {
    /// Build a destination from its raw ID and passthrough fields
    ///
    /// Any `type` field present in `extra` is discarded; the kind is always
    /// derived from `id`.
    pub fn new(id: impl Into<String>, mut extra: Map<String, Value>) -> Self {
        let id = id.into();
        extra.remove("type");

        Self {
            kind: DestinationKind::from_id(&id),
            id,
            extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::channel("C123", DestinationKind::Channel)]
    #[case::group("G456", DestinationKind::Group)]
    #[case::dm("D789", DestinationKind::DirectMessage)]
    #[case::lowercase_group("g456", DestinationKind::Group)]
    #[case::lowercase_dm("d789", DestinationKind::DirectMessage)]
    #[case::unknown_prefix("Z000", DestinationKind::Channel)]
    #[case::empty("", DestinationKind::Channel)]
    fn test_kind_from_id(#[case] id: &str, #[case] expected: DestinationKind) {
        assert_eq!(DestinationKind::from_id(id), expected);
    }

    #[test]
    fn test_new_ignores_incoming_type() {
        let extra = json!({"type": "channel", "name": "x-men"})
            .as_object()
            .cloned()
            .unwrap();

        let destination = Destination::new("D001", extra);

        assert_eq!(destination.kind, DestinationKind::DirectMessage);
        assert!(!destination.extra.contains_key("type"));
        assert_eq!(destination.extra["name"], "x-men");
    }

    #[test]
    fn test_serializes_kind_as_type() {
        let destination = Destination::new("D001", Map::new());
        let value = serde_json::to_value(&destination).unwrap();

        assert_eq!(value, json!({"id": "D001", "type": "dm"}));
    }
}
