//! Reply routing for handled events

pub mod dm_resolver;
pub mod error;
pub mod mention;
pub mod outgoing;
mod reply_action;

pub use dm_resolver::{DM_LOOKUP_ORDER, DmLookup, resolve_dm};
pub use error::ActionError;
pub use reply_action::{ActionPayload, ReplyAction};
