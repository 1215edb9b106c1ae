/// Format a user mention: `bob` or `@bob` becomes `<@bob>`
pub fn mention_user(name_or_id: &str) -> String {
    let name = name_or_id.strip_prefix('@').unwrap_or(name_or_id);
    format!("<@{name}>")
}

/// Format a channel mention: `general` or `#general` becomes `<#general>`
pub fn mention_channel(name_or_id: &str) -> String {
    let name = name_or_id.strip_prefix('#').unwrap_or(name_or_id);
    format!("<#{name}>")
}
