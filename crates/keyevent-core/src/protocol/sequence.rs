//! Numbering of in-flight dispatches.
//!
//! Every key event sent to the framework gets a [`DispatchId`] so that log
//! lines for its send, reply, fallback, and completion can be correlated.
//! Several dispatches may be outstanding at once and may resolve in any
//! order, so the id, not arrival order, identifies them.
//!
//! # Thread safety
//!
//! The counter is an `AtomicU64`, so a plugin shared across threads can hand
//! out ids without a lock.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of one dispatched key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DispatchId(pub u64);

impl fmt::Display for DispatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonically increasing source of [`DispatchId`]s.
///
/// Ids start at 0 and wrap at `u64::MAX` without panicking.
///
/// ```rust
/// use keyevent_core::protocol::{DispatchId, DispatchSequence};
///
/// let seq = DispatchSequence::new();
/// assert_eq!(seq.next(), DispatchId(0));
/// assert_eq!(seq.next(), DispatchId(1));
/// ```
#[derive(Debug, Default)]
pub struct DispatchSequence {
    inner: AtomicU64,
}

impl DispatchSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next id.
    ///
    /// `Relaxed` is enough: ids label log lines and never order memory.
    pub fn next(&self) -> DispatchId {
        DispatchId(self.inner.fetch_add(1, Ordering::Relaxed))
    }

    /// Number of ids handed out so far (modulo wrap-around).
    pub fn issued(&self) -> u64 {
        self.inner.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_ids_are_increasing() {
        let seq = DispatchSequence::new();

        let ids: Vec<DispatchId> = (0..50).map(|_| seq.next()).collect();

        for window in ids.windows(2) {
            assert!(window[1] > window[0]);
        }
        assert_eq!(seq.issued(), 50);
    }

    #[test]
    fn test_wraps_at_u64_max() {
        // Arrange – one step before overflow
        let seq = DispatchSequence {
            inner: AtomicU64::new(u64::MAX),
        };

        // Act / Assert
        assert_eq!(seq.next(), DispatchId(u64::MAX));
        assert_eq!(seq.next(), DispatchId(0));
    }

    #[test]
    fn test_ids_are_unique_across_threads() {
        // Arrange
        let seq = Arc::new(DispatchSequence::new());

        // Act
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let s = Arc::clone(&seq);
                thread::spawn(move || (0..250).map(|_| s.next()).collect::<Vec<_>>())
            })
            .collect();
        let mut all: Vec<DispatchId> = handles
            .into_iter()
            .flat_map(|h| h.join().expect("thread panicked"))
            .collect();

        // Assert
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 1000);
    }

    #[test]
    fn test_display_format() {
        assert_eq!(DispatchId(7).to_string(), "#7");
    }
}
