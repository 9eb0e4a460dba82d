use super::protocol::ServerMessage;
use super::session::Outbound;
use super::session::Session;
use crate::Position;
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;

/// Manages the table's connection state: seat attachments and spectators.
/// Separates socket fan-out from game logic.
///
/// Broadcasts are best-effort per subscriber over a stable snapshot of the
/// subscriber list; one dead socket never blocks the rest.
#[derive(Debug, Default)]
pub struct Table {
    sessions: HashMap<Position, Session>,
    spectators: HashMap<u64, UnboundedSender<Outbound>>,
    gallery: u64,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }
    /// Installs a session for its seat, returning any displaced one.
    pub fn attach(&mut self, session: Session) -> Option<Session> {
        self.sessions.insert(session.seat(), session)
    }
    /// Removes the attachment for a seat.
    pub fn detach(&mut self, pos: Position) -> Option<Session> {
        self.sessions.remove(&pos)
    }
    pub fn session(&self, pos: Position) -> Option<&Session> {
        self.sessions.get(&pos)
    }
    pub fn is_connected(&self, pos: Position) -> bool {
        self.sessions.contains_key(&pos)
    }
    /// Sends a message to a specific seat, if connected.
    pub fn unicast(&self, pos: Position, message: &ServerMessage) {
        log::debug!("[table] unicast to P{}", pos);
        match self.sessions.get(&pos) {
            Some(session) => session.send(message),
            None => log::debug!("[table] unicast to P{}: not connected", pos),
        }
    }
    /// Sends a message to every player and spectator.
    pub fn broadcast(&self, message: &ServerMessage) {
        let frame = message.to_frame();
        for session in self.sessions.values() {
            session.send(message);
        }
        for (id, spectator) in self.spectators.iter() {
            match spectator.send(Outbound::Frame(frame.clone())) {
                Ok(()) => {}
                Err(e) => log::warn!("[table] broadcast to spectator {} failed: {:?}", id, e),
            }
        }
    }
    /// Registers a read-only subscriber; returns its handle for removal.
    pub fn spectate(&mut self, outbox: UnboundedSender<Outbound>) -> u64 {
        self.gallery += 1;
        self.spectators.insert(self.gallery, outbox);
        self.gallery
    }
    pub fn unspectate(&mut self, id: u64) {
        self.spectators.remove(&id);
    }
}
