//! The conversation engine
//!
//! A per-user dialog state machine (cuisine → rating → radius → location),
//! a recommendation cursor that de-duplicates repeated suggestions, and a
//! pure dispatcher that routes inbound events between them. All I/O goes
//! through the `places::PlaceSource` seam; transports and rendering live
//! outside this module.

mod cursor;
mod dispatch;
mod event;
mod executor;
mod filter;
mod response;
mod session;
mod store;

#[cfg(test)]
mod proptests;

pub use cursor::SearchResult;
pub use dispatch::{dispatch, DispatchResult, Plan, SearchTarget, SessionUpdate};
pub use event::{ActionPayload, InboundEvent};
pub use executor::Engine;
pub use filter::filter_candidates;
pub use response::{prompts, Response};
pub use session::{Cuisine, DialogSession, DialogStep, Preferences, UserId};
pub use store::{
    Batch, CursorStore, InMemoryCursorStore, InMemorySessionStore, SessionStore, UserLocks,
};

/// Production engine with concrete implementations
pub type ProductionEngine =
    Engine<crate::places::GoogleMapsService, InMemorySessionStore, InMemoryCursorStore>;
