//! Parameter and capture extraction for matched messages
//!
//! Literal listeners (`"deploy :app to :env"`) produce named `params`;
//! regex listeners produce positional `matches`.

use super::listener::{ListenerPattern, TOKEN_PATTERN};
use regex::{NoExpand, Regex};
use std::collections::BTreeMap;
use tracing::debug;

/// Extract named parameters from `text`
///
/// Token *i* (counted from 1, left to right) takes the value obtained by
/// replacing the first match of `matcher` in `text` with capture group *i*.
/// Text around the match is kept, and `text` is returned unchanged when the
/// matcher does not match. A name that appears twice is computed twice and
/// the later occurrence wins. A token without a matching capture group gets
/// the literal reference (`$3`) in place of the match.
pub fn get_params(
    text: &str,
    pattern: &ListenerPattern,
    matcher: &Regex,
) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();

    let ListenerPattern::Literal(value) = pattern else {
        return params;
    };

    for (index, token) in TOKEN_PATTERN.find_iter(value).enumerate() {
        let name = token.as_str().trim_start_matches(':');
        let group = index + 1;
        let extracted = if group < matcher.captures_len() {
            matcher.replace(text, format!("${{{group}}}").as_str())
        } else {
            matcher.replace(text, NoExpand(&format!("${group}")))
        };
        params.insert(name.to_string(), extracted.into_owned());
    }

    params
}

/// Extract capture groups of the first match, without the full match
///
/// Groups that did not participate in the match are returned as empty
/// strings. Callers are expected to have confirmed the match already; a
/// non-matching text yields an empty list.
pub fn get_matches(text: &str, matcher: &Regex) -> Vec<String> {
    let Some(captures) = matcher.captures(text) else {
        debug!(matcher = %matcher.as_str(), "Matcher did not match text, no captures extracted");
        return Vec::new();
    };

    captures
        .iter()
        .skip(1)
        .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string()))
        .collect()
}
