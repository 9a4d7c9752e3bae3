pub mod geometry;
pub mod ids;

pub use geometry::{BoxRect, FlowAxis, Size};
pub use ids::NodeRef;
