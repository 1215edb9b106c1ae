// Trait definitions
pub mod chat_client;

// Slack Web API implementation
pub mod slack_api;
pub mod slack_directory;
pub mod slack_web_client;

// Re-exports for convenience
pub use chat_client::{ChatClient, Conversation};
pub use slack_directory::{ConversationInfo, SlackDirectory};
pub use slack_web_client::{SlackConversation, SlackWebClient};
