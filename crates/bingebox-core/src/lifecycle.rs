//! Liveness guard for continuations that outlive their owner
//!
//! An engine owns a [`Liveness`] and hands out [`LivenessToken`]s to every
//! asynchronous continuation it starts (a spawned lookup, a frame driver).
//! Continuations check the token before touching shared state. The owner
//! invalidates the guard exactly once at teardown, or implicitly on drop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug)]
pub struct Liveness {
    alive: Arc<AtomicBool>,
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl Liveness {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Token for a continuation started by the owner
    pub fn token(&self) -> LivenessToken {
        LivenessToken {
            alive: Arc::clone(&self.alive),
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Invalidate every token handed out so far.
    ///
    /// Returns `true` only for the call that actually flipped the flag.
    pub fn invalidate(&self) -> bool {
        self.alive
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl Drop for Liveness {
    fn drop(&mut self) {
        self.invalidate();
    }
}

#[derive(Debug, Clone)]
pub struct LivenessToken {
    alive: Arc<AtomicBool>,
}

impl LivenessToken {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Whether this token was issued by `owner`
    pub fn belongs_to(&self, owner: &Liveness) -> bool {
        Arc::ptr_eq(&self.alive, &owner.alive)
    }
}
