//! Cancellable periodic tick source for session countdowns and samplers
//!
//! A [`Ticker`] hands out a [`TickToken`] every time it is started. Stopping
//! (or restarting) bumps the generation, so any tick carrying an older token is
//! rejected by [`Ticker::accepts`]. Engines route every tick through that check,
//! which means a cancelled ticker can never deliver a tick, no matter how the
//! ticks are scheduled.
//!
//! [`TickDriver`] is the tokio-backed scheduler used by the binary. Tests and
//! other front ends are free to call the engines' `tick` methods directly.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Proof that a tick belongs to a specific run of a [`Ticker`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken {
    generation: u64,
}

/// Start/stop state of one periodic task
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    generation: u64,
    running: bool,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            generation: 0,
            running: false,
        }
    }

    /// Start a new run, invalidating tokens from any previous run
    pub fn start(&mut self) -> TickToken {
        self.generation += 1;
        self.running = true;
        TickToken {
            generation: self.generation,
        }
    }

    /// Stop the current run. Safe to call any number of times.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.generation += 1;
        }
    }

    /// Whether a tick carrying `token` should be delivered
    pub fn accepts(&self, token: TickToken) -> bool {
        self.running && token.generation == self.generation
    }

    /// Token of the current run, if running
    pub fn token(&self) -> Option<TickToken> {
        self.running.then_some(TickToken {
            generation: self.generation,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

/// Background task that emits a token at a fixed period
///
/// The receiver gets `token` once per period, starting one period after spawn.
/// The task is aborted on [`TickDriver::stop`] or drop; ticks already queued in
/// the channel are filtered out by the owning [`Ticker`].
#[derive(Debug)]
pub struct TickDriver {
    handle: JoinHandle<()>,
}

impl TickDriver {
    /// Spawn on the current tokio runtime
    pub fn spawn(period: Duration, token: TickToken) -> (Self, mpsc::UnboundedReceiver<TickToken>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                interval.tick().await;
                if tx.send(token).is_err() {
                    break;
                }
            }
        });
        (Self { handle }, rx)
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_invalidates_token() {
        let mut ticker = Ticker::new(Duration::from_secs(1));
        let token = ticker.start();
        assert!(ticker.accepts(token));

        ticker.stop();
        assert!(!ticker.accepts(token));
        assert!(ticker.token().is_none());

        // Idempotent
        ticker.stop();
        assert!(!ticker.is_running());
    }

    #[test]
    fn test_restart_rejects_previous_run() {
        let mut ticker = Ticker::new(Duration::from_millis(100));
        let first = ticker.start();
        let second = ticker.start();
        assert!(!ticker.accepts(first));
        assert!(ticker.accepts(second));
        assert_eq!(ticker.token(), Some(second));
    }

    #[tokio::test]
    async fn test_driver_delivers_until_stopped() {
        let mut ticker = Ticker::new(Duration::from_millis(5));
        let token = ticker.start();
        let (driver, mut rx) = TickDriver::spawn(ticker.period(), token);

        let received = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("tick in time")
            .expect("channel open");
        assert!(ticker.accepts(received));

        driver.stop();
        ticker.stop();

        // Whatever is still queued must be rejected
        while let Ok(Some(late)) =
            tokio::time::timeout(Duration::from_millis(50), rx.recv()).await
        {
            assert!(!ticker.accepts(late));
        }
    }
}
