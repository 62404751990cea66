/// Single-slot frame scheduler: at most one frame is ever pending.
///
/// Arming while a frame is pending does not queue a second one, and a
/// cancelled frame is gone for good.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the next frame.
    pub fn arm(&mut self) {
        self.pending = true;
    }

    /// Drop the pending frame. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_armed(&self) -> bool {
        self.pending
    }

    /// Consume the pending frame, if any. Returns whether one was due.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}
