//! Math utilities and types
//!
//! The radar works in two flat spaces: world space (simulation units) and
//! screen space (pixels, origin bottom-left). Both use `f32` nalgebra types.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Full turn in radians
pub const TAU: f32 = std::f32::consts::TAU;

/// Squared distance between two points
#[inline]
pub fn distance_squared(a: &Point2, b: &Point2) -> f32 {
    (a - b).norm_squared()
}

/// Point on a circle of `radius` around `center` at `angle` radians
#[inline]
pub fn point_on_circle(center: &Point2, radius: f32, angle: f32) -> Point2 {
    let (sin, cos) = angle.sin_cos();
    Point2::new(center.x + cos * radius, center.y + sin * radius)
}
