//! Cooperative cancellation for in-flight backend work.
//!
//! A `CancelToken` is a cheap cloneable flag a screen or session hands
//! to long-running flows; the flow checks it between steps and the
//! client checks it before dispatching a request. Cancelling does not
//! tear down a request already on the wire — it guarantees no further
//! step runs and no late state update is applied.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancelToken::new();
        let held_by_flow = token.clone();
        assert!(!held_by_flow.is_cancelled());
        token.cancel();
        assert!(held_by_flow.is_cancelled());
    }
}
