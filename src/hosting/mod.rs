//! HTTP shell for hosting a live table.
//!
//! Upgrades connections to websockets and bridges each socket to the
//! [`crate::gameroom::Room`]; all game logic lives on the other side of the
//! bridge.
mod server;

pub use server::*;
