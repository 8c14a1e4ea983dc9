//! Trailing-edge debouncing of input values.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

/// Delays values until a quiet period has passed without a newer value.
///
/// Owns a single timer. Every [`Debouncer::push`] cancels the pending timer
/// and starts a new one, so only the last value of a burst is delivered,
/// exactly `quiet` after it was pushed. Nothing fires on the leading edge.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    output: mpsc::UnboundedSender<T>,
    timer: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Creates a debouncer and the receiver its settled values arrive on.
    pub fn new(quiet: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (output, receiver) = mpsc::unbounded_channel();
        let debouncer = Self {
            quiet,
            output,
            timer: None,
        };
        (debouncer, receiver)
    }

    /// Replaces the pending value and restarts the quiet period.
    pub fn push(&mut self, value: T) {
        self.cancel();

        let deadline = Instant::now() + self.quiet;
        let output = self.output.clone();
        self.timer = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            // Receiver gone means the owner shut down.
            let _ = output.send(value);
        }));
    }

    /// Drops the pending value, if any.
    pub fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    /// Returns true while a value is waiting for its quiet period to end.
    pub fn is_pending(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| !timer.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
