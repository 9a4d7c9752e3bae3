use serde::{Deserialize, Serialize};

/// An axis-aligned box in page-box coordinates.
///
/// Edges rather than origin + size, because the overflow search compares
/// leading and trailing edges directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxRect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl BoxRect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// The edge where content along `axis` starts.
    pub fn leading(&self, axis: FlowAxis) -> f32 {
        match axis {
            FlowAxis::Horizontal => self.left,
            FlowAxis::Vertical => self.top,
        }
    }

    /// The edge where content along `axis` must stop.
    pub fn trailing(&self, axis: FlowAxis) -> f32 {
        match axis {
            FlowAxis::Horizontal => self.right,
            FlowAxis::Vertical => self.bottom,
        }
    }

    /// Extent along `axis`.
    pub fn extent(&self, axis: FlowAxis) -> f32 {
        self.trailing(axis) - self.leading(axis)
    }

    /// Extent across `axis`.
    pub fn cross_extent(&self, axis: FlowAxis) -> f32 {
        self.extent(axis.cross())
    }

    pub fn union(&self, other: &BoxRect) -> BoxRect {
        BoxRect {
            left: self.left.min(other.left),
            right: self.right.max(other.right),
            top: self.top.min(other.top),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn along(&self, axis: FlowAxis) -> f32 {
        match axis {
            FlowAxis::Horizontal => self.width,
            FlowAxis::Vertical => self.height,
        }
    }
}

/// The axis along which a page overflows into the next one.
///
/// Column-based fragmentation overflows horizontally (into the next column),
/// plain block stacking overflows vertically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowAxis {
    #[default]
    Horizontal,
    Vertical,
}

impl FlowAxis {
    pub fn cross(self) -> FlowAxis {
        match self {
            FlowAxis::Horizontal => FlowAxis::Vertical,
            FlowAxis::Vertical => FlowAxis::Horizontal,
        }
    }
}
