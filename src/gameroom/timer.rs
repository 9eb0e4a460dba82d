use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// The per-turn deadline and the task enforcing it.
///
/// Arming hands out a generation token; the expiry task carries it back and
/// is ignored unless it still matches, so a prompt that was answered (or
/// superseded by a new turn) can never fire a stale fallback. The turn timer
/// is per-seat-turn, not per-hand.
#[derive(Debug, Default)]
pub struct Timer {
    deadline: Option<Instant>,
    task: Option<JoinHandle<()>>,
    generation: u64,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }
    /// Cancels any outstanding deadline and its task.
    pub fn disarm(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.deadline = None;
        self.generation += 1;
    }
    /// Starts a fresh deadline, cancelling any prior one, and returns the
    /// token the expiry task must present.
    pub fn arm(&mut self, duration: Duration) -> u64 {
        self.disarm();
        self.deadline = Some(Instant::now() + duration);
        self.generation
    }
    /// Hands the spawned expiry task to the timer for later cancellation.
    pub fn attach(&mut self, task: JoinHandle<()>) {
        self.task = Some(task);
    }
    /// True if the token belongs to the currently armed deadline.
    pub fn matches(&self, generation: u64) -> bool {
        self.deadline.is_some() && self.generation == generation
    }
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_cleared() {
        let timer = Timer::new();
        assert!(timer.remaining().is_none());
        assert!(!timer.matches(0));
    }

    #[tokio::test]
    async fn arm_sets_deadline() {
        let mut timer = Timer::new();
        let generation = timer.arm(Duration::from_secs(10));
        assert!(timer.matches(generation));
        assert!(timer.remaining().unwrap() <= Duration::from_secs(10));
    }

    #[tokio::test]
    async fn disarm_invalidates_token() {
        let mut timer = Timer::new();
        let generation = timer.arm(Duration::from_secs(10));
        timer.disarm();
        assert!(!timer.matches(generation));
        assert!(timer.remaining().is_none());
    }

    #[tokio::test]
    async fn rearm_supersedes() {
        let mut timer = Timer::new();
        let old = timer.arm(Duration::from_secs(10));
        let new = timer.arm(Duration::from_secs(10));
        assert!(!timer.matches(old));
        assert!(timer.matches(new));
    }
}
