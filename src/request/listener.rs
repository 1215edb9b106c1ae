use regex::Regex;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::sync::LazyLock;

/// `:name` placeholders inside a literal listener pattern
pub(crate) static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":[a-zA-Z]+").expect("token pattern is valid"));

/// What a single `:name` token captures in a compiled literal pattern
const TOKEN_CAPTURE: &str = r"([a-zA-Z0-9._-]+)";

/// Pattern a listener was registered with
#[derive(Debug, Clone)]
pub enum ListenerPattern {
    /// Literal text, optionally containing `:name` tokens
    Literal(String),
    /// Regular expression used as-is
    Regex(Regex),
}

impl ListenerPattern {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(value) => value,
            Self::Regex(regex) => regex.as_str(),
        }
    }
}

/// A registered pattern together with its compiled matcher
#[derive(Debug, Clone)]
pub struct Listener {
    pub value: ListenerPattern,
    pub matcher: Regex,
}

impl Listener {
    /// Compile a literal pattern such as `"deploy :app to :env"`
    ///
    /// Text outside tokens is matched literally; each token captures one
    /// `[a-zA-Z0-9._-]+` segment. The matcher is anchored to the whole text.
    pub fn literal(pattern: impl Into<String>) -> Result<Self, regex::Error> {
        let pattern = pattern.into();

        let mut source = String::from("^");
        let mut last = 0;
        for token in TOKEN_PATTERN.find_iter(&pattern) {
            source.push_str(&regex::escape(&pattern[last..token.start()]));
            source.push_str(TOKEN_CAPTURE);
            last = token.end();
        }
        source.push_str(&regex::escape(&pattern[last..]));
        source.push('$');

        Ok(Self {
            matcher: Regex::new(&source)?,
            value: ListenerPattern::Literal(pattern),
        })
    }

    /// Use a regular expression directly; captures become `matches`
    pub fn regex(regex: Regex) -> Self {
        Self {
            matcher: regex.clone(),
            value: ListenerPattern::Regex(regex),
        }
    }

    /// Check whether this listener should handle `text`
    pub fn matches(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }
}

impl Serialize for Listener {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Listener", 2)?;
        state.serialize_field("value", self.value.as_str())?;
        state.serialize_field("matcher", self.matcher.as_str())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("hello", "^hello$")]
    #[case::single_token("get :user", r"^get ([a-zA-Z0-9._-]+)$")]
    #[case::two_tokens(
        "deploy :app to :env",
        r"^deploy ([a-zA-Z0-9._-]+) to ([a-zA-Z0-9._-]+)$"
    )]
    #[case::escaped_text("why? :reason", r"^why\? ([a-zA-Z0-9._-]+)$")]
    fn test_literal_compiles_matcher(#[case] pattern: &str, #[case] expected: &str) {
        let listener = Listener::literal(pattern).unwrap();
        assert_eq!(listener.matcher.as_str(), expected);
    }

    #[rstest]
    #[case::exact("get x-men", true)]
    #[case::trailing_text("get x-men now", false)]
    #[case::missing_token("get ", false)]
    fn test_literal_matches(#[case] text: &str, #[case] expected: bool) {
        let listener = Listener::literal("get :user").unwrap();
        assert_eq!(listener.matches(text), expected);
    }

    #[test]
    fn test_regex_listener_uses_regex_as_matcher() {
        let regex = Regex::new(r"(\d+) \+ (\d+)").unwrap();
        let listener = Listener::regex(regex);

        assert_eq!(listener.matcher.as_str(), r"(\d+) \+ (\d+)");
        assert!(matches!(listener.value, ListenerPattern::Regex(_)));
        assert!(listener.matches("1 + 2"));
    }

    #[test]
    fn test_listener_serialization() {
        let listener = Listener::literal("get :user").unwrap();
        let value = serde_json::to_value(&listener).unwrap();

        assert_eq!(value["value"], "get :user");
        assert_eq!(value["matcher"], r"^get ([a-zA-Z0-9._-]+)$");
    }
}
