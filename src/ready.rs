//! One-shot startup hook.
//!
//! Fires once the host has finished starting up and logs that the toolkit
//! is available. Later calls are no-ops.

use std::sync::atomic::{AtomicBool, Ordering};

pub const READY_MESSAGE: &str = "Home Loan Toolkit loaded";

static DOCUMENT_READY: ReadyHook = ReadyHook::new();

#[derive(Debug, Default)]
pub struct ReadyHook {
    fired: AtomicBool,
}

impl ReadyHook {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fired: AtomicBool::new(false),
        }
    }

    /// Emit the ready message. Returns `true` only for the call that emitted it.
    pub fn fire(&self) -> bool {
        if self.fired.swap(true, Ordering::AcqRel) {
            return false;
        }
        tracing::info!(version = env!("CARGO_PKG_VERSION"), "{READY_MESSAGE}");
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}

/// Fire the process-wide hook.
pub fn on_ready() -> bool {
    DOCUMENT_READY.fire()
}

#[cfg(test)]
mod tests {
    use super::ReadyHook;
    use std::sync::Arc;

    #[test]
    fn fires_only_once() {
        let hook = ReadyHook::new();
        assert!(!hook.has_fired());
        assert!(hook.fire());
        assert!(hook.has_fired());
        assert!(!hook.fire());
        assert!(!hook.fire());
    }

    #[test]
    fn concurrent_callers_agree_on_one_emitter() {
        let hook = Arc::new(ReadyHook::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let hook = Arc::clone(&hook);
                std::thread::spawn(move || hook.fire())
            })
            .collect();

        let emitted = handles
            .into_iter()
            .map(|handle| handle.join().expect("thread panicked"))
            .filter(|fired| *fired)
            .count();
        assert_eq!(emitted, 1);
    }
}
