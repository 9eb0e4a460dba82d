use super::protocol::ServerMessage;
use crate::Position;
use tokio::sync::mpsc::UnboundedSender;

/// What the coordinator hands a bridge task to forward to its websocket.
#[derive(Debug, Clone)]
pub enum Outbound {
    /// A JSON frame to write as a text message.
    Frame(String),
    /// Close the websocket with the given reason.
    Close(&'static str),
}

/// A live attachment between a seat and a websocket connection.
///
/// The seat exists independently of the session: a session dying leaves the
/// seat (stack, identity) behind for the bot to reconnect to.
#[derive(Debug)]
pub struct Session {
    seat: Position,
    team: String,
    outbox: UnboundedSender<Outbound>,
}

impl Session {
    pub fn new(seat: Position, team: &str, outbox: UnboundedSender<Outbound>) -> Self {
        Self {
            seat,
            team: team.to_string(),
            outbox,
        }
    }
    pub fn seat(&self) -> Position {
        self.seat
    }
    pub fn team(&self) -> &str {
        &self.team
    }
    /// True if this session writes to the same channel as `outbox`.
    pub fn is(&self, outbox: &UnboundedSender<Outbound>) -> bool {
        self.outbox.same_channel(outbox)
    }
    /// Best-effort frame delivery; a dead bridge only costs a warning.
    pub fn send(&self, message: &ServerMessage) {
        match self.outbox.send(Outbound::Frame(message.to_frame())) {
            Ok(()) => {}
            Err(e) => log::warn!("[session P{}] send failed: {:?}", self.seat, e),
        }
    }
    /// Asks the bridge to close the socket, e.g. when replaced.
    pub fn close(&self, reason: &'static str) {
        let _ = self.outbox.send(Outbound::Close(reason));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn identity_by_channel() {
        let (tx_a, _rx_a) = unbounded_channel();
        let (tx_b, _rx_b) = unbounded_channel();
        let session = Session::new(0, "alpha", tx_a.clone());
        assert!(session.is(&tx_a));
        assert!(!session.is(&tx_b));
    }

    #[test]
    fn close_reaches_bridge() {
        let (tx, mut rx) = unbounded_channel();
        let session = Session::new(0, "alpha", tx);
        session.close("replaced by new connection");
        assert!(matches!(rx.try_recv(), Ok(Outbound::Close(_))));
    }
}
