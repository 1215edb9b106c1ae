//! Normalization of inbound events into [`Request`]s

mod builder;
pub mod destination;
pub mod extract;
pub mod listener;
pub mod raw_event;

pub use builder::{Message, Request};
pub use destination::{Destination, DestinationKind};
pub use listener::{Listener, ListenerPattern};
pub use raw_event::{EventValue, RawDestination, RawEvent, Sender};
