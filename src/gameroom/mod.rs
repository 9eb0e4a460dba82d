//! Async session coordinator for live tables.
//!
//! One [`Room`] per table owns the rules engine exclusively behind a single
//! async mutex and serialises every mutation: connection handlers and timer
//! tasks all funnel through it, so no two engine calls ever interleave and
//! every client observes events in engine order.
//!
//! - [`Room`] — coordinator: joins, action handling, prompting, hand loop
//! - [`Table`] — connection fan-out: seat attachments and spectators
//! - [`Session`] — a live seat ↔ websocket attachment
//! - [`Timer`] — the per-turn deadline and its enforcement task
//! - [`ServerMessage`] / [`ClientMessage`] — the wire protocol
mod protocol;
mod room;
mod session;
mod table;
mod timer;

pub use protocol::*;
pub use room::*;
pub use session::*;
pub use table::*;
pub use timer::*;
