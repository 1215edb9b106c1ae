/// Failures of reply and send operations
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// A reply was requested before a payload was attached
    #[error("no message payload attached to action")]
    MissingPayload,

    /// Neither lookup strategy produced a DM after opening it
    #[error("cannot resolve DM channel for user {user_id}")]
    CannotResolveDm { user_id: String },

    /// `send_to` could not find the named conversation
    #[error("cannot find channel, group or DM named {name}")]
    DestinationNotFound { name: String },

    /// Outgoing body was not a JSON object
    #[error("message body must be a JSON object, got {kind}")]
    InvalidBody { kind: &'static str },

    /// Failure reported by the chat client, passed through unchanged
    #[error(transparent)]
    Client(#[from] anyhow::Error),
}
