//! Button session context
//!
//! A session is the span between observing the pressed state and the
//! release that ends it. Restart requests arrive mid-dispatch, so they are
//! only recorded here and acted on by the button task afterwards.

use core::cell::Cell;

use pinwatch_core::RestartContext;

/// Restart flag for the current session
pub struct SessionRestart {
    pending: Cell<bool>,
}

impl SessionRestart {
    pub const fn new() -> Self {
        Self {
            pending: Cell::new(false),
        }
    }

    /// Check if the session should end
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Clear the flag at the start of a session
    pub fn clear(&self) {
        self.pending.set(false);
    }
}

impl RestartContext for SessionRestart {
    fn request_restart(&self) {
        self.pending.set(true);
    }
}
