use std::collections::VecDeque;

/// Opaque handle to one scheduled frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickHandle(pub(crate) u64);

/// Cooperative per-frame scheduling primitive provided by the host.
///
/// The engine assumes only that ticks are delivered roughly periodically and
/// can be canceled; it never depends on a specific clock source. At most one
/// tick is in flight at a time: the engine re-arms only after completing the
/// current tick.
pub trait FrameScheduler {
    /// Request one future tick.
    fn request_tick(&mut self) -> TickHandle;

    /// Cancel a previously requested tick. Canceling an already-delivered or
    /// already-canceled handle is a no-op.
    fn cancel_tick(&mut self, handle: TickHandle);
}

/// Deterministic scheduler for tests and offline rendering.
///
/// Handles are monotonic; armed callbacks are delivered in request order by
/// draining [`ManualScheduler::take_due`].
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_handle: u64,
    armed: VecDeque<TickHandle>,
}

impl ManualScheduler {
    /// Construct an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest armed callback, if any.
    pub fn take_due(&mut self) -> Option<TickHandle> {
        self.armed.pop_front()
    }

    /// Number of armed callbacks not yet delivered or canceled.
    pub fn pending(&self) -> usize {
        self.armed.len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_tick(&mut self) -> TickHandle {
        self.next_handle += 1;
        let handle = TickHandle(self.next_handle);
        self.armed.push_back(handle);
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        self.armed.retain(|h| *h != handle);
    }
}
