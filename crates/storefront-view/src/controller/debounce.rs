use std::time::Duration;

use tokio::time::{sleep_until, Instant};

/// A cancellable, single-slot scheduled value.
///
/// Each [`schedule`](Debouncer::schedule) replaces any pending value and
/// restarts the delay, so a burst of inputs yields only the last one, once
/// the burst has been quiet for the full delay. Deadlines use tokio's clock,
/// which tests can pause and advance.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn schedule(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    /// Drops the pending value, returning it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    /// Takes the pending value if its deadline has passed at `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, at)) if at <= now => self.cancel(),
            _ => None,
        }
    }

    /// Waits for the pending value's deadline and takes it. Never resolves
    /// while nothing is pending. Cancel-safe: dropping the future leaves the
    /// pending value in place.
    pub async fn fired(&mut self) -> T {
        loop {
            match self.deadline() {
                Some(at) => {
                    sleep_until(at).await;
                    if let Some(value) = self.take_due(Instant::now()) {
                        return value;
                    }
                }
                None => std::future::pending::<()>().await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::advance;

    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn value_is_not_due_before_delay() {
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.schedule("a");
        advance(Duration::from_millis(299)).await;
        assert_eq!(debouncer.take_due(Instant::now()), None);
        advance(Duration::from_millis(1)).await;
        assert_eq!(debouncer.take_due(Instant::now()), Some("a"));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn reschedule_restarts_delay_and_keeps_last_value() {
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.schedule("s");
        advance(Duration::from_millis(200)).await;
        debouncer.schedule("so");
        advance(Duration::from_millis(200)).await;
        debouncer.schedule("son");
        advance(Duration::from_millis(200)).await;
        assert_eq!(debouncer.take_due(Instant::now()), None);

        let started = Instant::now();
        assert_eq!(debouncer.fired().await, "son");
        assert_eq!(Instant::now() - started, Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_value() {
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.schedule(1);
        assert_eq!(debouncer.cancel(), Some(1));
        advance(DELAY).await;
        assert_eq!(debouncer.take_due(Instant::now()), None);
    }
}
