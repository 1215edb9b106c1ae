use super::error::ActionError;
use serde_json::{Value, json};

/// Flag every outgoing message carries so it is posted as the bot user
const AS_USER: &str = "as_user";

/// Build the body sent by every send path: `body` with `as_user: true`
///
/// `as_user` is always `true` in the result, even if `body` set it otherwise.
pub fn build_outgoing(body: Value) -> Result<Value, ActionError> {
    match body {
        Value::Object(mut object) => {
            object.insert(AS_USER.to_string(), Value::Bool(true));
            Ok(Value::Object(object))
        }
        other => Err(ActionError::InvalidBody {
            kind: json_kind(&other),
        }),
    }
}

/// Body of a plain text message
pub fn text_body(text: &str) -> Value {
    json!({ "text": text })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
