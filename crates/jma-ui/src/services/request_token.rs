//! Tags forecast requests so that only the newest selection is displayed.
//!
//! In-flight requests are not cancelled; a response is simply ignored when a
//! newer request was issued after it.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one issued request. Later requests compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tokens and remembers the latest one.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token newer than every token issued before.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether no request has been issued after `token`.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn tokens_increase() {
        let tracker = RequestTracker::new();
        let a = tracker.issue();
        let b = tracker.issue();
        assert!(b > a);
        assert_eq!(a.value(), 1);
        assert_eq!(b.value(), 2);
    }

    #[test]
    fn only_newest_token_is_current() {
        let tracker = RequestTracker::new();
        let first = tracker.issue();
        assert!(tracker.is_current(first));
        let second = tracker.issue();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn tokens_unique_across_threads() {
        let tracker = Arc::new(RequestTracker::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tracker = tracker.clone();
                std::thread::spawn(move || (0..100).map(|_| tracker.issue()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<_> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 400);
        let newest = all[all.len() - 1];
        assert_eq!(newest.value(), 400);
        assert!(tracker.is_current(newest));
    }
}
