//! Deferred work that must run outside a synchronous layout pass.
//!
//! Two kinds of work arrive late: the post-pass "attach observers" step and
//! size-change notifications from whatever renders the destination. Both go
//! through a [`TaskQueue`] and are drained one at a time by the engine, so
//! they can never interleave with an in-progress pass.

use folio_types::Size;
use std::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskQueueError {
    #[error("Task queue is closed")]
    Closed,
}

/// The destination box's new extent, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeChange {
    pub size: Size,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeferredTask {
    /// Start reacting to size changes of the settled page.
    AttachObservers,
    SizeChanged(SizeChange),
}

/// A host-owned "run this later, off the hot path" queue.
pub trait TaskQueue: Send + Sync + Debug {
    fn schedule(&self, task: DeferredTask) -> Result<(), TaskQueueError>;

    /// Removes and returns every task queued so far, oldest first.
    fn take_ready(&self) -> Vec<DeferredTask>;

    fn close(&self);

    /// Returns a human-readable name for this queue (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Unbounded FIFO queue on top of an `async-channel` pair.
///
/// Producers may live on other threads; draining never blocks.
#[derive(Debug, Clone)]
pub struct ChannelTaskQueue {
    sender: async_channel::Sender<DeferredTask>,
    receiver: async_channel::Receiver<DeferredTask>,
}

impl ChannelTaskQueue {
    pub fn new() -> Self {
        let (sender, receiver) = async_channel::unbounded();
        Self { sender, receiver }
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl Default for ChannelTaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskQueue for ChannelTaskQueue {
    fn schedule(&self, task: DeferredTask) -> Result<(), TaskQueueError> {
        self.sender
            .try_send(task)
            .map_err(|_| TaskQueueError::Closed)
    }

    fn take_ready(&self) -> Vec<DeferredTask> {
        let mut tasks = Vec::with_capacity(self.receiver.len());
        while let Ok(task) = self.receiver.try_recv() {
            tasks.push(task);
        }
        tasks
    }

    fn close(&self) {
        self.sender.close();
    }

    fn name(&self) -> &'static str {
        "channel"
    }
}
