//! Direct message resolution
//!
//! The DM is opened first, then looked up with each [`DmLookup`] strategy in
//! [`DM_LOOKUP_ORDER`]; the first handle found wins. There is no deadline on
//! the open step: a platform that never acknowledges it stalls resolution.

use super::error::ActionError;
use crate::adapters::{ChatClient, Conversation};
use crate::request::Sender;
use std::sync::Arc;
use tracing::{debug, warn};

/// Way of finding a DM handle for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmLookup {
    /// By the user's ID
    ById,
    /// By the user's name; skipped when the sender carries no name
    ByName,
}

/// Strategies tried, in order, after the DM was opened
pub const DM_LOOKUP_ORDER: [DmLookup; 2] = [DmLookup::ById, DmLookup::ByName];

impl DmLookup {
    fn lookup<C>(self, client: &C, user: &Sender) -> Option<Arc<dyn Conversation>>
    where
        C: ChatClient + ?Sized,
    {
        match self {
            Self::ById => client.dm_by_id(&user.id),
            Self::ByName => user
                .name
                .as_deref()
                .and_then(|name| client.dm_by_name(name)),
        }
    }
}

/// Open a DM with `user` and return a handle to it
///
/// # Errors
///
/// * [`ActionError::Client`] - opening the DM failed
/// * [`ActionError::CannotResolveDm`] - no strategy found the DM afterwards
pub async fn resolve_dm<C>(client: &C, user: &Sender) -> Result<Arc<dyn Conversation>, ActionError>
where
    C: ChatClient + ?Sized,
{
    client.open_dm(&user.id).await?;

    DM_LOOKUP_ORDER
        .iter()
        .find_map(|strategy| {
            let found = strategy.lookup(client, user);
            debug!(
                user_id = %user.id,
                ?strategy,
                found = found.is_some(),
                "DM lookup"
            );
            found
        })
        .ok_or_else(|| {
            warn!(user_id = %user.id, user_name = ?user.name, "Cannot resolve DM channel");
            ActionError::CannotResolveDm {
                user_id: user.id.clone(),
            }
        })
}
