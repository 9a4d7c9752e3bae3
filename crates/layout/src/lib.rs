use folio_dom::{DomError, NodeId};
use thiserror::Error;

/// Contract violations by the caller.
///
/// Measurement failures and ref mismatches never surface here: they degrade
/// to "fits" or "no further break" so pagination always terminates.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Break token points at node {0}, which is not attached to the content tree.")]
    DetachedBreakToken(NodeId),
    #[error("Break token offset {offset} exceeds the {len} characters of node {node}.")]
    OffsetOutOfBounds {
        node: NodeId,
        offset: usize,
        len: usize,
    },
    #[error("A layout pass is already in progress.")]
    PassInProgress,
    #[error("Tree error: {0}")]
    Dom(#[from] DomError),
}

pub mod break_token;
pub mod config;
pub(crate) mod engine;
pub mod extract;
pub mod hooks;
mod monitor;
pub mod node_kind;
pub mod overflow;
pub mod perf;
pub mod render;
pub mod testing;
pub mod text;
pub mod walker;

pub use self::break_token::{BreakToken, find_break_token};
pub use self::config::LayoutConfig;
pub use self::engine::LayoutEngine;
pub use self::hooks::LayoutHooks;
pub use self::monitor::ResizeNotifier;
pub use self::node_kind::{NodeKind, classify, is_container};
pub use self::overflow::{OverflowRange, RangeStart, find_overflow};
pub use self::walker::{Walker, node_after};

// Re-export the types that appear in this crate's signatures
pub use folio_dom::{Fragment, Tree};
pub use folio_traits::{BreakRules, GeometryOracle, StyleBreakRules, TaskQueue};
pub use folio_types::{BoxRect, FlowAxis, Size};

#[cfg(test)]
mod test_utils;
