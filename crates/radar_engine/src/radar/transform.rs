//! World-to-radar coordinate transform
//!
//! `screen = (world - viewer) * scale + center`
//!
//! The viewer offset is subtracted before scaling so that large world
//! coordinates lose no precision at wide zoom levels.

use super::frame::RadarFrame;
use crate::foundation::math::{distance_squared, Point2};

/// Transform misuse
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// Output slice length differs from input length
    #[error("Output buffer holds {output} points but {input} were given")]
    LengthMismatch {
        /// Input point count
        input: usize,
        /// Output slot count
        output: usize,
    },
}

/// Project one world point into radar screen space
#[inline]
pub fn to_radar_space(world: &Point2, frame: &RadarFrame) -> Point2 {
    let offset = world - frame.viewer_position;
    frame.render_center + offset * frame.current_scale
}

/// Project many world points, replacing the contents of `out`
///
/// `out` is cleared and refilled; its allocation is reused and only grows
/// when it is smaller than `world`.
pub fn to_radar_space_batch(world: &[Point2], frame: &RadarFrame, out: &mut Vec<Point2>) {
    out.clear();
    out.extend(world.iter().map(|point| to_radar_space(point, frame)));
}

/// Project many world points into an exactly sized output slice
pub fn to_radar_space_into(world: &[Point2], frame: &RadarFrame, out: &mut [Point2]) -> Result<(), TransformError> {
    if world.len() != out.len() {
        return Err(TransformError::LengthMismatch {
            input: world.len(),
            output: out.len(),
        });
    }
    for (slot, point) in out.iter_mut().zip(world) {
        *slot = to_radar_space(point, frame);
    }
    Ok(())
}

/// Whether a world point, grown by `padding`, reaches inside the sight radius
#[inline]
pub fn is_on_radar(world: &Point2, padding: f32, frame: &RadarFrame) -> bool {
    let reach = frame.sight_radius + padding;
    distance_squared(world, &frame.viewer_position) <= reach * reach
}

/// Convert a world-space length (e.g. an entity radius) to screen units
#[inline]
pub fn scale_length(world_length: f32, frame: &RadarFrame) -> f32 {
    world_length * frame.current_scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frame() -> RadarFrame {
        RadarFrame::new(Point2::new(-250.0, 40.0), Point2::new(800.0, 600.0), 120.0, 1500.0)
    }

    #[test]
    fn test_matches_formula() {
        let frame = frame();
        let world = Point2::new(310.5, -72.25);
        let screen = to_radar_space(&world, &frame);

        let expected = (world - frame.viewer_position) * frame.current_scale + frame.render_center.coords;
        assert_relative_eq!(screen.x, expected.x);
        assert_relative_eq!(screen.y, expected.y);
    }

    #[test]
    fn test_viewer_maps_to_center() {
        let frame = frame();
        assert_eq!(to_radar_space(&frame.viewer_position, &frame), frame.render_center);
    }

    #[test]
    fn test_batch_agrees_bit_for_bit() {
        let frame = frame();
        let world: Vec<Point2> = (0..50)
            .map(|i| Point2::new(i as f32 * 37.3 - 900.0, (i * i) as f32 * 0.7 + 1.0e5))
            .collect();

        let mut batch = Vec::with_capacity(world.len());
        to_radar_space_batch(&world, &frame, &mut batch);

        let mut fixed = vec![Point2::origin(); world.len()];
        to_radar_space_into(&world, &frame, &mut fixed).unwrap();

        for ((point, a), b) in world.iter().zip(&batch).zip(&fixed) {
            let single = to_radar_space(point, &frame);
            assert_eq!(single.x.to_bits(), a.x.to_bits());
            assert_eq!(single.y.to_bits(), a.y.to_bits());
            assert_eq!(single, *b);
        }
    }

    #[test]
    fn test_batch_reuses_buffer() {
        let frame = frame();
        let world = [Point2::new(1.0, 1.0); 8];
        let mut out = Vec::with_capacity(16);
        out.push(Point2::new(9.0, 9.0));
        let ptr = out.as_ptr();

        to_radar_space_batch(&world, &frame, &mut out);
        assert_eq!(out.len(), 8);
        assert_eq!(out.as_ptr(), ptr);
    }

    #[test]
    fn test_into_rejects_length_mismatch() {
        let mut out = [Point2::origin(); 2];
        let result = to_radar_space_into(&[Point2::origin()], &frame(), &mut out);
        assert!(matches!(result, Err(TransformError::LengthMismatch { input: 1, output: 2 })));
    }

    #[test]
    fn test_far_from_origin_is_stable() {
        let viewer = Point2::new(1.0e6, -1.0e6);
        let frame = RadarFrame::new(viewer, Point2::new(100.0, 100.0), 100.0, 1000.0);
        let screen = to_radar_space(&Point2::new(1.0e6 + 500.0, -1.0e6), &frame);
        assert_relative_eq!(screen.x, 150.0, epsilon = 1e-3);
        assert_relative_eq!(screen.y, 100.0, epsilon = 1e-3);
    }

    #[test]
    fn test_is_on_radar_boundary() {
        let frame = RadarFrame::new(Point2::origin(), Point2::origin(), 100.0, 1000.0);

        assert!(is_on_radar(&Point2::new(1000.0, 0.0), 0.0, &frame));
        assert!(!is_on_radar(&Point2::new(1000.5, 0.0), 0.0, &frame));
        assert!(is_on_radar(&Point2::new(0.0, -1050.0), 50.0, &frame));
        assert!(!is_on_radar(&Point2::new(0.0, -1051.0), 50.0, &frame));
    }

    #[test]
    fn test_is_on_radar_large_padding() {
        let frame = RadarFrame::new(Point2::origin(), Point2::origin(), 100.0, 1000.0);

        // Padding larger than the sight radius itself
        assert!(is_on_radar(&Point2::new(2999.0, 0.0), 2000.0, &frame));
        assert!(!is_on_radar(&Point2::new(3001.0, 0.0), 2000.0, &frame));
    }

    #[test]
    fn test_is_on_radar_matches_squared_distance() {
        let frame = frame();
        for i in 0..200 {
            let angle = i as f32 * 0.37;
            let distance = i as f32 * 11.0;
            let point = Point2::new(
                frame.viewer_position.x + angle.cos() * distance,
                frame.viewer_position.y + angle.sin() * distance,
            );
            for padding in [0.0, 25.0, 5000.0] {
                let reach = frame.sight_radius + padding;
                let expected = distance_squared(&point, &frame.viewer_position) <= reach * reach;
                assert_eq!(is_on_radar(&point, padding, &frame), expected);
            }
        }
    }

    #[test]
    fn test_scale_length() {
        let frame = RadarFrame::new(Point2::origin(), Point2::origin(), 100.0, 1000.0);
        assert_relative_eq!(scale_length(50.0, &frame), 5.0);
    }
}
