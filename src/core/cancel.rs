use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::error::{ListError, Result};

/// Cooperative cancellation handle.
///
/// Clones share the same flag, so a clone handed to another thread can
/// stop a listing that runs on a worker thread. The listing only notices
/// at its checkpoints: before config enumeration, before legacy directory
/// scanning and filtering, before extraction and between extracted files.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Checkpoint: `Err(ListError::Cancelled)` once cancellation was requested.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(ListError::Cancelled)
        } else {
            Ok(())
        }
    }
}
