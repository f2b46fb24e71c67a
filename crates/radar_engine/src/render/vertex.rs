//! Vertex types for radar rendering

use crate::foundation::math::Point2;
use bytemuck::{Pod, Zeroable};

/// Position-only screen-space vertex (8 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct RadarVertex {
    /// Position in screen pixels, origin bottom-left
    pub position: [f32; 2],
}

impl RadarVertex {
    /// Create a vertex from screen coordinates
    pub const fn new(x: f32, y: f32) -> Self {
        Self { position: [x, y] }
    }

    /// Vertex position as a point
    pub fn point(&self) -> Point2 {
        Point2::new(self.position[0], self.position[1])
    }
}

impl From<Point2> for RadarVertex {
    fn from(point: Point2) -> Self {
        Self::new(point.x, point.y)
    }
}
