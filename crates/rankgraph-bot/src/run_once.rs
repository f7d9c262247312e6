//! Guard that lets the ready handler start the pipeline a single time.

use std::sync::atomic::{AtomicBool, Ordering};

/// One-shot latch.
///
/// The gateway may deliver `Ready` again after a reconnect; only the first
/// [`RunOnce::try_claim`] succeeds.
#[derive(Debug, Default)]
pub struct RunOnce {
    fired: AtomicBool,
}

impl RunOnce {
    /// Creates an unclaimed guard.
    pub const fn new() -> Self {
        Self {
            fired: AtomicBool::new(false),
        }
    }

    /// Claims the guard. Returns `true` for exactly one caller.
    pub fn try_claim(&self) -> bool {
        self.fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Whether the guard has been claimed.
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_single_claim() {
        let guard = RunOnce::new();
        assert!(!guard.has_fired());
        assert!(guard.try_claim());
        assert!(guard.has_fired());
        assert!(!guard.try_claim());
    }

    #[test]
    fn test_concurrent_claims() {
        let guard = Arc::new(RunOnce::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let guard = Arc::clone(&guard);
                std::thread::spawn(move || guard.try_claim())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }
}
