//! One-shot, thread-safe arming flag.

use std::sync::atomic::{AtomicBool, Ordering};

/// A flag that transitions from unarmed to armed exactly once.
///
/// Any number of threads may race on [`try_arm`](Self::try_arm); exactly
/// one observes `true`. There is no way back to unarmed.
#[derive(Debug, Default)]
pub struct ActivationLatch {
    armed: AtomicBool,
}

impl ActivationLatch {
    /// A new, unarmed latch.
    pub const fn new() -> Self {
        Self {
            armed: AtomicBool::new(false),
        }
    }

    /// Arm the latch. Returns `true` only for the caller that armed it.
    pub fn try_arm(&self) -> bool {
        self.armed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Whether any caller has armed the latch.
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }
}
