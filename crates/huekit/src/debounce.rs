//! Latest-value-after-quiet-period.
//!
//! Color pickers emit a value per pointer move. [`Debouncer`] holds the most
//! recent one back until no new value has arrived for the configured delay,
//! and only then exposes it as the settled value that expensive work (scale
//! generation, CSS compilation) runs on.
//!
//! Time is passed in explicitly, so the primitive has no timer of its own
//! and behaves the same in tests as in an event loop.
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use huekit::Debouncer;
//!
//! let start = Instant::now();
//! let mut color = Debouncer::new("#d946ef".to_string(), Duration::from_millis(200));
//!
//! color.push("#d9".to_string(), start);
//! color.push("#d94".to_string(), start + Duration::from_millis(50));
//! assert_eq!(color.poll(start + Duration::from_millis(200)), None);
//! assert_eq!(
//!     color.poll(start + Duration::from_millis(250)).map(String::as_str),
//!     Some("#d94")
//! );
//! ```

use std::time::{Duration, Instant};

/// Default quiet period for editor input.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    settled: T,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Starts with `initial` already settled.
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            settled: initial,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records a new value and restarts the quiet period.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Settles the pending value if the quiet period has elapsed.
    ///
    /// Returns the newly settled value, or `None` if nothing settled on this
    /// call.
    pub fn poll(&mut self, now: Instant) -> Option<&T> {
        let due = matches!(
            &self.pending,
            Some((_, pushed_at)) if now.saturating_duration_since(*pushed_at) >= self.delay
        );
        if due {
            self.flush()
        } else {
            None
        }
    }

    /// Settles the pending value immediately, if there is one.
    pub fn flush(&mut self) -> Option<&T> {
        let (value, _) = self.pending.take()?;
        self.settled = value;
        Some(&self.settled)
    }

    /// The last settled value.
    pub fn value(&self) -> &T {
        &self.settled
    }

    /// Mutable access to the settled value, for derived fields.
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.settled
    }

    /// The most recent value, settled or not.
    pub fn latest(&self) -> &T {
        self.pending
            .as_ref()
            .map(|(value, _)| value)
            .unwrap_or(&self.settled)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Replaces the settled value and drops anything pending.
    pub fn reset(&mut self, value: T) {
        self.settled = value;
        self.pending = None;
    }
}

impl<T: Default> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(T::default(), DEFAULT_DELAY)
    }
}
