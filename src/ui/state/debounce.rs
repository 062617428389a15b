use std::time::{Duration, Instant};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Holds the most recent input and releases it once `window` has passed
/// without a newer one.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, at)) if now.saturating_duration_since(*at) >= self.window => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
