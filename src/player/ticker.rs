//! Playback cadence
//!
//! A [`Ticker`] decides when the next step is due. Every start or cancel
//! bumps its generation, and each due tick is handed out as a [`TickToken`]
//! stamped with the generation it was issued under. A token from before a
//! pause or reset is never live again, so a tick that was already in flight
//! when playback stopped cannot apply a step.

use std::time::{Duration, Instant};

/// Proof that a tick fell due while the ticker was running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken {
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
    generation: u64,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Ticker {
            interval,
            next_due: None,
            generation: 0,
        }
    }

    /// Start ticking. The first tick is due immediately.
    pub fn start(&mut self, now: Instant) {
        self.generation += 1;
        self.next_due = Some(now);
    }

    /// Stop ticking and invalidate every outstanding token
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the cadence; takes effect from the next scheduled tick
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Hand out a token if a tick is due at `now`, and schedule the next one
    pub fn poll(&mut self, now: Instant) -> Option<TickToken> {
        let due = self.next_due?;
        if now < due {
            return None;
        }
        self.next_due = Some(now + self.interval);
        Some(TickToken {
            generation: self.generation,
        })
    }

    /// Whether `token` was issued since the last start and nothing has cancelled it
    pub fn is_live(&self, token: TickToken) -> bool {
        self.is_running() && token.generation == self.generation
    }

    /// Time left before the next tick, if running
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_at_cadence() {
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_millis(500));
        assert!(ticker.poll(start).is_none());

        ticker.start(start);
        assert!(ticker.poll(start).is_some());
        assert!(ticker.poll(start + Duration::from_millis(499)).is_none());
        assert!(ticker.poll(start + Duration::from_millis(500)).is_some());
    }

    #[test]
    fn test_cancel_invalidates_tokens() {
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_millis(100));
        ticker.start(start);
        let token = ticker.poll(start).expect("tick due");
        assert!(ticker.is_live(token));

        ticker.cancel();
        assert!(!ticker.is_live(token));
        assert!(ticker.poll(start + Duration::from_secs(10)).is_none());

        // restarting does not revive old tokens
        ticker.start(start);
        assert!(!ticker.is_live(token));
    }
}
