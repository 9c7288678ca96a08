//! Concurrent per-client drift cache.
//!
//! Process-wide shared state: every request handler holds at most a
//! transient reference into it. Entries live for the process lifetime or
//! until their group is invalidated; there is no persistence.

mod filter;
mod item;
mod store;

pub(crate) use filter::*;
pub use item::*;
pub use store::*;
