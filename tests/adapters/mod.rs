// Mock implementations for adapter layer testing

pub mod mock_chat_client;

pub use mock_chat_client::{ClientCall, MockChatClient, MockConversation};
