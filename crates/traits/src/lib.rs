pub mod breaks;
pub mod geometry;
pub mod task;

pub use breaks::{BreakRules, StyleBreakRules};
pub use geometry::GeometryOracle;
pub use task::{ChannelTaskQueue, DeferredTask, SizeChange, TaskQueue, TaskQueueError};
