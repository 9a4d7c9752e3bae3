//! folio: paginates a content tree into fixed-size destination boxes.
//!
//! Each page is filled by [`LayoutEngine::layout`], which clones content into
//! a fresh destination until the host's [`GeometryOracle`] reports overflow,
//! then extracts the overflow and returns a [`BreakToken`] the next page
//! resumes from. The caller owns the page loop: it keeps calling `layout`
//! with the previous token until `None` comes back.

pub use folio_dom::{
    BreakValue, ContentSpec, Display, DomError, Element, Float, Fragment, NodeData, NodeId,
    NodeRef, Style, Tag, Tree,
};
pub use folio_layout::testing::ColumnFlowOracle;
pub use folio_layout::{
    BreakToken, LayoutConfig, LayoutEngine, LayoutError, LayoutHooks, NodeKind, OverflowRange,
    RangeStart, ResizeNotifier,
};
pub use folio_traits::{
    BreakRules, ChannelTaskQueue, DeferredTask, GeometryOracle, SizeChange, StyleBreakRules,
    TaskQueue, TaskQueueError,
};
pub use folio_types::{BoxRect, FlowAxis, Size};
