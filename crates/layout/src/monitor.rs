//! Reacting to changes after a page has settled.
//!
//! A settled page can still overflow when something outside the engine
//! resizes it, and it can be handed content back from a later page. Both
//! paths end in the same extract-and-notify sequence as a layout pass, and
//! both run only from [`LayoutEngine::run_pending`] or direct calls, never
//! inside a pass.

use crate::LayoutError;
use crate::engine::LayoutEngine;
use folio_dom::{Fragment, NodeData, NodeId, Tree};
use folio_traits::{DeferredTask, SizeChange, TaskQueue, TaskQueueError};
use folio_types::Size;
use std::sync::Arc;

pub type OverflowCallback = Box<dyn FnMut(Fragment)>;
pub type UnderflowCallback = Box<dyn FnMut()>;

/// Push-based size-change source for the destination box.
///
/// Cheap to clone and safe to hand to other threads; notifications are
/// queued and handled by the next [`LayoutEngine::run_pending`].
#[derive(Debug, Clone)]
pub struct ResizeNotifier {
    queue: Arc<dyn TaskQueue>,
}

impl ResizeNotifier {
    pub fn notify(&self, size: Size) -> Result<(), TaskQueueError> {
        self.queue.schedule(DeferredTask::SizeChanged(SizeChange { size }))
    }
}

impl LayoutEngine {
    /// Receives content pushed off the page after its pass has finished.
    pub fn on_overflow(&mut self, callback: impl FnMut(Fragment) + 'static) {
        self.on_overflow = Some(Box::new(callback));
    }

    /// Called when the settled page shrinks and could take more content.
    pub fn on_underflow(&mut self, callback: impl FnMut() + 'static) {
        self.on_underflow = Some(Box::new(callback));
    }

    pub fn resize_notifier(&self) -> ResizeNotifier {
        ResizeNotifier {
            queue: Arc::clone(&self.queue),
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Drains the task queue, one task at a time. Returns how many tasks
    /// were handled.
    pub fn run_pending(&mut self) -> Result<usize, LayoutError> {
        if self.busy {
            return Err(LayoutError::PassInProgress);
        }
        self.busy = true;
        let tasks = self.queue.take_ready();
        for task in &tasks {
            match task {
                DeferredTask::AttachObservers => self.attach_observers(),
                DeferredTask::SizeChanged(change) => self.handle_size_change(change.size),
            }
        }
        self.busy = false;
        Ok(tasks.len())
    }

    pub(crate) fn attach_observers(&mut self) {
        if !self.config.observe_resize || self.listening {
            return;
        }
        self.listening = true;
        self.baseline = self.cross_extent();
        log::trace!("Observing size changes from {:?}.", self.baseline);
    }

    fn cross_extent(&self) -> Option<f32> {
        let cross = self.config.flow_axis.cross();
        self.oracle
            .content_extent(&self.destination)
            .map(|size| size.along(cross))
    }

    fn handle_size_change(&mut self, size: Size) {
        if !self.listening {
            log::trace!("Ignoring size change while not observing.");
            return;
        }
        let current = size.along(self.config.flow_axis.cross());
        let Some(previous) = self.baseline else {
            self.baseline = Some(current);
            return;
        };

        if current > previous {
            if !self.has_overflow() {
                self.baseline = Some(current);
                return;
            }
            if let Some(range) = self.overflow() {
                let extracted = self.remove_overflow(range);
                self.emit_overflow(extracted);
                self.baseline = self.cross_extent().or(Some(current));
            }
        } else if current < previous {
            self.emit_underflow();
            self.baseline = Some(current);
        }
    }

    /// Extracts any overflow of the settled page and hands it to the
    /// overflow callback. Returns whether anything was extracted.
    pub fn check_overflow(&mut self) -> bool {
        let Some(range) = self.overflow() else {
            return false;
        };
        let extracted = self.remove_overflow(range);
        self.emit_overflow(extracted);
        true
    }

    pub fn signal_underflow(&mut self) {
        self.emit_underflow();
    }

    fn emit_overflow(&mut self, fragment: Fragment) {
        match self.on_overflow.as_mut() {
            Some(callback) => callback(fragment),
            None => log::debug!("Late overflow with no callback registered; dropped."),
        }
    }

    fn emit_underflow(&mut self) {
        if let Some(callback) = self.on_underflow.as_mut() {
            callback();
        }
    }

    /// Stops observing and drops the callbacks. Queued tasks are discarded.
    pub fn destroy(&mut self) {
        self.listening = false;
        self.baseline = None;
        self.on_overflow = None;
        self.on_underflow = None;
        let dropped = self.queue.take_ready().len();
        if dropped > 0 {
            log::debug!("Discarded {} pending task(s).", dropped);
        }
    }

    /// Inserts `fragment` at the front of the destination, merging nodes
    /// whose ref is already present instead of duplicating them.
    ///
    /// If the merged page overflows, the tail is extracted again and handed
    /// to the overflow callback.
    pub fn prepend(&mut self, fragment: Fragment) -> Result<(), LayoutError> {
        if self.busy {
            return Err(LayoutError::PassInProgress);
        }
        let root = self.destination.root();
        merge_front(&mut self.destination, &fragment, fragment.root(), root)?;

        if self.has_overflow() {
            self.check_overflow();
        }
        if !self.listening {
            self.attach_observers();
        }
        Ok(())
    }
}

/// Merges the children of `from` (in `fragment`) into the front of `into`.
fn merge_front(
    dest: &mut Tree,
    fragment: &Fragment,
    from: NodeId,
    into: NodeId,
) -> Result<(), LayoutError> {
    let mut index = 0;
    for &child in fragment.children(from) {
        let existing = fragment
            .node_ref(child)
            .and_then(|r| dest.find_by_ref(r))
            .filter(|&e| same_kind(dest, e, fragment, child));

        let Some(existing) = existing else {
            let copy = dest.deep_clone_from(fragment, child);
            dest.insert(into, index, copy)?;
            index += 1;
            continue;
        };

        match &fragment.node(child).data {
            NodeData::Text(head) => {
                let joined = format!("{}{}", head, dest.text(existing).unwrap_or_default());
                dest.set_text(existing, joined);
            }
            _ => {
                // The fragment holds the element's start: drop the
                // continuation markers of the existing clone.
                let head = fragment.node(child);
                if !head.split_from {
                    let data = head.data.clone();
                    let node = dest.node_mut(existing);
                    node.data = data;
                    node.split_from = false;
                }
                merge_front(dest, fragment, child, existing)?;
            }
        }
        if dest.parent(existing) == Some(into) {
            if let Some(position) = dest.index_in_parent(existing) {
                index = position + 1;
            }
        }
    }
    Ok(())
}

fn same_kind(dest: &Tree, existing: NodeId, fragment: &Fragment, child: NodeId) -> bool {
    dest.node(existing).is_text() == fragment.node(child).is_text()
}
