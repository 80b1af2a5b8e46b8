//! Wire types for the browser lock.
//!
//! This crate contains the serde-serializable shapes exchanged between the
//! lock coordinator and its hosts: the persisted lock record, window and tab
//! descriptions reported by the window manager, and the request/response
//! messages sent by the lock and setup pages.
//!
//! Field names follow the storage keys and message fields the extension has
//! always used, so records written by older builds still load. Nothing here
//! performs I/O; the coordinator in `browser-lock` does that through its host
//! traits.

pub mod message;
pub mod record;
pub mod window;

pub use message::*;
pub use record::*;
pub use window::*;
