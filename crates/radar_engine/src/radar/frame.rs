//! Per-tick radar snapshot and on-screen layout

use crate::foundation::math::Point2;
use serde::{Deserialize, Serialize};

/// Smallest sight radius used when deriving the world-to-screen scale
const MIN_SIGHT_RADIUS: f32 = 1e-3;

/// Immutable per-tick view of the radar
///
/// Screen space has its origin at the bottom-left corner of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarFrame {
    /// World point the radar is centered on (the tracked viewer)
    pub viewer_position: Point2,
    /// Screen point of the radar center
    pub render_center: Point2,
    /// Radar radius in screen units
    pub render_radius: f32,
    /// Screen units per world unit
    pub current_scale: f32,
    /// Magnification relative to the widest zoom level, always >= 1
    pub current_zoom_level: f32,
    /// World distance from the viewer shown at the radar edge
    pub sight_radius: f32,
    /// Alpha multiplier for radar chrome
    pub radar_alpha: f32,
    /// Alpha multiplier for contacts
    pub contact_alpha: f32,
}

impl RadarFrame {
    /// Build a frame whose scale maps `sight_radius` onto `render_radius`
    pub fn new(viewer_position: Point2, render_center: Point2, render_radius: f32, sight_radius: f32) -> Self {
        let sight_radius = sight_radius.max(MIN_SIGHT_RADIUS);
        Self {
            viewer_position,
            render_center,
            render_radius,
            current_scale: render_radius / sight_radius,
            current_zoom_level: 1.0,
            sight_radius,
            radar_alpha: 1.0,
            contact_alpha: 1.0,
        }
    }

    /// Set the magnification used as a visual size multiplier
    pub fn with_zoom_level(mut self, zoom_level: f32) -> Self {
        self.current_zoom_level = zoom_level.max(1.0);
        self
    }

    /// Set alpha multipliers
    pub fn with_alpha(mut self, radar_alpha: f32, contact_alpha: f32) -> Self {
        self.radar_alpha = radar_alpha;
        self.contact_alpha = contact_alpha;
        self
    }
}

/// Viewport dimensions in screen units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Viewport {
    /// Create a viewport
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Screen corner used for anchored placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    /// Top-left
    TopLeft,
    /// Top-right
    TopRight,
    /// Bottom-left
    BottomLeft,
    /// Bottom-right
    BottomRight,
}

/// Where the radar center sits on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RadarPosition {
    /// Absolute screen position of the center
    Fixed {
        /// Center x
        x: f32,
        /// Center y
        y: f32,
    },
    /// Radar disc tucked into a viewport corner with `margin` to both edges
    Anchored {
        /// Corner to anchor to
        corner: Corner,
        /// Gap between the disc and the viewport edges
        margin: f32,
    },
}

/// Radar placement and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarLayout {
    /// Radius in screen units
    pub radius: f32,
    /// Center placement
    pub position: RadarPosition,
}

impl RadarLayout {
    /// Resolve the radar center for a viewport
    pub fn center(&self, viewport: Viewport) -> Point2 {
        match self.position {
            RadarPosition::Fixed { x, y } => Point2::new(x, y),
            RadarPosition::Anchored { corner, margin } => {
                let inset = self.radius + margin;
                let (x, y) = match corner {
                    Corner::TopLeft => (inset, viewport.height - inset),
                    Corner::TopRight => (viewport.width - inset, viewport.height - inset),
                    Corner::BottomLeft => (inset, inset),
                    Corner::BottomRight => (viewport.width - inset, inset),
                };
                Point2::new(x, y)
            }
        }
    }
}

impl Default for RadarLayout {
    fn default() -> Self {
        Self {
            radius: 120.0,
            position: RadarPosition::Anchored {
                corner: Corner::BottomRight,
                margin: 24.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scale_maps_sight_radius_to_render_radius() {
        let frame = RadarFrame::new(Point2::origin(), Point2::new(0.0, 0.0), 150.0, 3000.0);
        assert_relative_eq!(frame.current_scale * frame.sight_radius, 150.0);
    }

    #[test]
    fn test_zero_sight_radius_is_guarded() {
        let frame = RadarFrame::new(Point2::origin(), Point2::origin(), 100.0, 0.0);
        assert!(frame.current_scale.is_finite());
    }

    #[test]
    fn test_anchored_corners() {
        let viewport = Viewport::new(1000.0, 800.0);
        let layout = |corner| RadarLayout {
            radius: 100.0,
            position: RadarPosition::Anchored { corner, margin: 10.0 },
        };

        assert_eq!(layout(Corner::BottomLeft).center(viewport), Point2::new(110.0, 110.0));
        assert_eq!(layout(Corner::BottomRight).center(viewport), Point2::new(890.0, 110.0));
        assert_eq!(layout(Corner::TopLeft).center(viewport), Point2::new(110.0, 690.0));
        assert_eq!(layout(Corner::TopRight).center(viewport), Point2::new(890.0, 690.0));
    }

    #[test]
    fn test_fixed_ignores_viewport() {
        let layout = RadarLayout { radius: 50.0, position: RadarPosition::Fixed { x: 3.0, y: 4.0 } };
        assert_eq!(layout.center(Viewport::new(10.0, 10.0)), Point2::new(3.0, 4.0));
    }
}
