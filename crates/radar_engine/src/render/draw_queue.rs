//! # Draw Queue
//!
//! Pre-sized vertex/color buffer that is built once per scan and replayed on
//! every render frame until it is rebuilt.
//!
//! ## Lifecycle
//!
//! ```text
//! with_capacity ─► Building ──finish()──► Finished ──draw()*──► ...
//!                     ▲                      │
//!                     └──────clear()─────────┘
//! ```
//!
//! - `set_color` / `add_vertices` / `finish_shape` only while building
//! - `draw` only once finished, any number of times
//! - `clear` keeps every allocation; buffers are never grown after creation
//!
//! Protocol violations return [`DrawQueueError`] immediately and leave the
//! queue untouched.

use super::backend::{BackendError, RadarBackend};
use super::color::Rgba8;
use super::vertex::RadarVertex;
use crate::foundation::math::{point_on_circle, Point2, TAU};
use crate::radar::transform::to_radar_space;
use crate::radar::RadarFrame;

/// How a run of vertices is assembled into primitives on replay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Independent points
    Points,
    /// Independent line segments (vertex pairs)
    Lines,
    /// Connected line segments
    LineStrip,
    /// Connected line segments closed back to the first vertex
    LineLoop,
    /// Independent triangles (vertex triples)
    Triangles,
    /// Triangles sharing the first vertex
    TriangleFan,
    /// Independent quads (vertex quadruples)
    Quads,
}

/// Contiguous run of vertices replayed as one primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeRun {
    /// Primitive kind for this run
    pub kind: PrimitiveKind,
    /// Index of the first vertex
    pub start: usize,
    /// Number of vertices
    pub count: usize,
}

impl ShapeRun {
    /// One past the last vertex index
    pub fn end(&self) -> usize {
        self.start + self.count
    }
}

/// Draw queue protocol violations
#[derive(Debug, thiserror::Error)]
pub enum DrawQueueError {
    /// Appending would overrun the pre-sized buffers
    #[error("Draw queue capacity exceeded: {requested} vertices requested, capacity {capacity}")]
    CapacityExceeded {
        /// Total vertices the append would have required
        requested: usize,
        /// Vertex capacity fixed at creation
        capacity: usize,
    },

    /// Queue was finished and must be cleared before it is written again
    #[error("Draw queue already finished; call clear() before rebuilding")]
    AlreadyFinished,

    /// Queue was drawn before `finish()`
    #[error("Draw queue drawn before finish()")]
    NotFinished,

    /// `finish()` was called with vertices not closed by `finish_shape()`
    #[error("Draw queue finished with {pending} vertices outside a shape")]
    UnfinishedShape {
        /// Vertices appended since the last `finish_shape()`
        pending: usize,
    },

    /// Backend rejected a replayed run
    #[error("Backend rejected replay: {0}")]
    Backend(#[from] BackendError),
}

/// Result type for draw queue operations
pub type DrawQueueResult<T> = Result<T, DrawQueueError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueueState {
    Building,
    Finished,
}

/// Batched vertex/color buffer replayed every render frame
#[derive(Debug)]
pub struct DrawQueue {
    vertices: Vec<RadarVertex>,
    colors: Vec<Rgba8>,
    runs: Vec<ShapeRun>,
    capacity: usize,
    current_color: Rgba8,
    shape_start: usize,
    state: QueueState,
}

impl DrawQueue {
    /// Create a queue able to hold `max_vertices` vertices for its whole lifetime
    pub fn with_capacity(max_vertices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(max_vertices),
            colors: Vec::with_capacity(max_vertices),
            // Empty runs are never recorded, so runs <= vertices
            runs: Vec::with_capacity(max_vertices),
            capacity: max_vertices,
            current_color: Rgba8::WHITE,
            shape_start: 0,
            state: QueueState::Building,
        }
    }

    /// Set the color applied to subsequently appended vertices
    pub fn set_color(&mut self, color: Rgba8, alpha_mult: f32) {
        self.current_color = color.with_alpha_mult(alpha_mult);
    }

    /// Color currently applied to appended vertices
    pub fn current_color(&self) -> Rgba8 {
        self.current_color
    }

    fn ensure_room(&self, additional: usize) -> DrawQueueResult<()> {
        if self.state == QueueState::Finished {
            return Err(DrawQueueError::AlreadyFinished);
        }
        let requested = self.vertices.len() + additional;
        if requested > self.capacity {
            return Err(DrawQueueError::CapacityExceeded {
                requested,
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    fn push_unchecked(&mut self, point: Point2) {
        self.vertices.push(RadarVertex::from(point));
        self.colors.push(self.current_color);
    }

    /// Append one vertex in screen space
    pub fn add_vertex(&mut self, point: Point2) -> DrawQueueResult<()> {
        self.ensure_room(1)?;
        self.push_unchecked(point);
        Ok(())
    }

    /// Append screen-space vertices, all or nothing
    pub fn add_vertices(&mut self, points: &[Point2]) -> DrawQueueResult<()> {
        self.ensure_room(points.len())?;
        for &point in points {
            self.push_unchecked(point);
        }
        Ok(())
    }

    /// Project world-space points through `frame` and append them
    ///
    /// Equivalent to transforming into a scratch buffer and calling
    /// [`add_vertices`](Self::add_vertices), without the scratch buffer.
    pub fn add_world_vertices(&mut self, world_points: &[Point2], frame: &RadarFrame) -> DrawQueueResult<()> {
        self.ensure_room(world_points.len())?;
        for point in world_points {
            self.push_unchecked(to_radar_space(point, frame));
        }
        Ok(())
    }

    /// Close the current run of vertices as `kind`
    ///
    /// Does nothing when no vertex was appended since the previous run.
    pub fn finish_shape(&mut self, kind: PrimitiveKind) -> DrawQueueResult<()> {
        if self.state == QueueState::Finished {
            return Err(DrawQueueError::AlreadyFinished);
        }
        let count = self.vertices.len() - self.shape_start;
        if count > 0 {
            self.runs.push(ShapeRun {
                kind,
                start: self.shape_start,
                count,
            });
            self.shape_start = self.vertices.len();
        }
        Ok(())
    }

    /// Append a filled regular polygon approximating a circle
    ///
    /// Recorded as a triangle fan of `segments + 2` vertices: the center,
    /// the rim, and the first rim vertex again to close it.
    pub fn fill_circle(&mut self, center: Point2, radius: f32, segments: usize) -> DrawQueueResult<()> {
        let segments = segments.max(3);
        self.ensure_room(segments + 2)?;
        self.ensure_no_pending()?;

        self.push_unchecked(center);
        let step = TAU / segments as f32;
        for i in 0..=segments {
            // Reuse the exact first rim vertex to avoid a seam
            let index = if i == segments { 0 } else { i };
            self.push_unchecked(point_on_circle(&center, radius, step * index as f32));
        }
        self.finish_shape(PrimitiveKind::TriangleFan)
    }

    /// Append a circle outline as a line loop of `segments` vertices
    pub fn stroke_circle(&mut self, center: Point2, radius: f32, segments: usize) -> DrawQueueResult<()> {
        let segments = segments.max(3);
        self.ensure_room(segments)?;
        self.ensure_no_pending()?;

        let step = TAU / segments as f32;
        for i in 0..segments {
            self.push_unchecked(point_on_circle(&center, radius, step * i as f32));
        }
        self.finish_shape(PrimitiveKind::LineLoop)
    }

    /// Shape helpers start their own run and must not swallow loose vertices
    fn ensure_no_pending(&self) -> DrawQueueResult<()> {
        let pending = self.pending_vertices();
        if pending > 0 {
            return Err(DrawQueueError::UnfinishedShape { pending });
        }
        Ok(())
    }

    /// Mark the queue ready for replay
    pub fn finish(&mut self) -> DrawQueueResult<()> {
        if self.state == QueueState::Finished {
            return Err(DrawQueueError::AlreadyFinished);
        }
        let pending = self.pending_vertices();
        if pending > 0 {
            return Err(DrawQueueError::UnfinishedShape { pending });
        }
        self.state = QueueState::Finished;
        Ok(())
    }

    /// Reset the queue for rebuilding, keeping its allocations
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.colors.clear();
        self.runs.clear();
        self.shape_start = 0;
        self.state = QueueState::Building;
    }

    /// Replay every recorded run against `backend`, in recording order
    pub fn draw(&self, backend: &mut dyn RadarBackend) -> DrawQueueResult<()> {
        if self.state != QueueState::Finished {
            return Err(DrawQueueError::NotFinished);
        }
        for run in &self.runs {
            backend.draw_arrays(
                run.kind,
                &self.vertices[run.start..run.end()],
                &self.colors[run.start..run.end()],
            )?;
        }
        Ok(())
    }

    /// Recorded runs in replay order
    pub fn runs(&self) -> &[ShapeRun] {
        &self.runs
    }

    /// Vertices written so far
    pub fn vertices(&self) -> &[RadarVertex] {
        &self.vertices
    }

    /// Per-vertex colors written so far
    pub fn colors(&self) -> &[Rgba8] {
        &self.colors
    }

    /// Raw vertex bytes for upload into a GPU vertex buffer
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw color bytes for upload into a GPU vertex buffer
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Number of vertices written
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of closed shapes
    pub fn shape_count(&self) -> usize {
        self.runs.len()
    }

    /// Vertices appended since the last closed shape
    pub fn pending_vertices(&self) -> usize {
        self.vertices.len() - self.shape_start
    }

    /// Vertex capacity fixed at creation
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Vertices that can still be appended
    pub fn remaining(&self) -> usize {
        self.capacity - self.vertices.len()
    }

    /// Whether no shape has been recorded
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Whether the queue is ready for replay
    pub fn is_finished(&self) -> bool {
        self.state == QueueState::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backend::RecordingBackend;
    use approx::assert_relative_eq;

    fn frame() -> RadarFrame {
        RadarFrame::new(Point2::origin(), Point2::new(200.0, 200.0), 100.0, 1000.0)
    }

    fn triangle() -> [Point2; 3] {
        [Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), Point2::new(0.0, 10.0)]
    }

    fn replay(queue: &DrawQueue) -> Vec<crate::render::DrawCall> {
        let mut backend = RecordingBackend::new();
        backend.begin_overlay(&frame()).unwrap();
        queue.draw(&mut backend).unwrap();
        backend.end_overlay().unwrap();
        backend.calls().to_vec()
    }

    #[test]
    fn test_records_runs_in_order() {
        let mut queue = DrawQueue::with_capacity(16);
        queue.set_color(Rgba8::new(255, 0, 0, 255), 1.0);
        queue.add_vertices(&triangle()).unwrap();
        queue.finish_shape(PrimitiveKind::Triangles).unwrap();

        queue.set_color(Rgba8::new(0, 255, 0, 255), 0.5);
        queue.add_vertex(Point2::new(5.0, 5.0)).unwrap();
        queue.finish_shape(PrimitiveKind::Points).unwrap();
        queue.finish().unwrap();

        assert_eq!(
            queue.runs(),
            &[
                ShapeRun { kind: PrimitiveKind::Triangles, start: 0, count: 3 },
                ShapeRun { kind: PrimitiveKind::Points, start: 3, count: 1 },
            ]
        );

        let calls = replay(&queue);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].kind, PrimitiveKind::Triangles);
        assert_eq!(calls[0].colors, vec![Rgba8::new(255, 0, 0, 255); 3]);
        assert_eq!(calls[1].colors, vec![Rgba8::new(0, 255, 0, 128)]);
        assert_eq!(calls[1].vertices, vec![RadarVertex::new(5.0, 5.0)]);
    }

    #[test]
    fn test_replay_is_idempotent() {
        let mut queue = DrawQueue::with_capacity(64);
        queue.add_vertices(&triangle()).unwrap();
        queue.finish_shape(PrimitiveKind::LineLoop).unwrap();
        queue.fill_circle(Point2::new(50.0, 50.0), 4.0, 6).unwrap();
        queue.finish().unwrap();

        let first = replay(&queue);
        for _ in 0..5 {
            assert_eq!(replay(&queue), first);
        }
        assert_eq!(queue.vertex_count(), 3 + 8);
        assert!(queue.is_finished());
    }

    #[test]
    fn test_overflow_is_rejected_without_writing() {
        let mut queue = DrawQueue::with_capacity(4);
        queue.add_vertices(&triangle()).unwrap();

        let err = queue.add_vertices(&triangle()).unwrap_err();
        assert!(matches!(err, DrawQueueError::CapacityExceeded { requested: 6, capacity: 4 }));
        assert_eq!(queue.vertex_count(), 3);

        queue.add_vertex(Point2::new(1.0, 1.0)).unwrap();
        assert_eq!(queue.remaining(), 0);
        assert!(matches!(
            queue.add_vertex(Point2::new(1.0, 1.0)),
            Err(DrawQueueError::CapacityExceeded { requested: 5, capacity: 4 })
        ));
    }

    #[test]
    fn test_draw_before_finish_is_an_error() {
        let queue = DrawQueue::with_capacity(4);
        let mut backend = RecordingBackend::new();
        backend.begin_overlay(&frame()).unwrap();
        assert!(matches!(queue.draw(&mut backend), Err(DrawQueueError::NotFinished)));
    }

    #[test]
    fn test_double_finish_is_an_error() {
        let mut queue = DrawQueue::with_capacity(4);
        queue.finish().unwrap();
        assert!(matches!(queue.finish(), Err(DrawQueueError::AlreadyFinished)));

        queue.clear();
        assert!(queue.finish().is_ok());
    }

    #[test]
    fn test_writes_after_finish_are_rejected() {
        let mut queue = DrawQueue::with_capacity(4);
        queue.finish().unwrap();
        assert!(matches!(queue.add_vertex(Point2::origin()), Err(DrawQueueError::AlreadyFinished)));
        assert!(matches!(queue.finish_shape(PrimitiveKind::Points), Err(DrawQueueError::AlreadyFinished)));
    }

    #[test]
    fn test_finish_with_open_shape_is_an_error() {
        let mut queue = DrawQueue::with_capacity(4);
        queue.add_vertex(Point2::origin()).unwrap();
        assert!(matches!(queue.finish(), Err(DrawQueueError::UnfinishedShape { pending: 1 })));
        assert!(!queue.is_finished());
    }

    #[test]
    fn test_empty_queue_draws_nothing() {
        let mut queue = DrawQueue::with_capacity(0);
        queue.finish_shape(PrimitiveKind::Points).unwrap();
        queue.finish().unwrap();

        assert!(queue.is_empty());
        assert!(replay(&queue).is_empty());
    }

    #[test]
    fn test_clear_keeps_allocation() {
        let mut queue = DrawQueue::with_capacity(32);
        let vertex_ptr = queue.vertices().as_ptr();

        for _ in 0..3 {
            queue.clear();
            queue.fill_circle(Point2::new(0.0, 0.0), 1.0, 30).unwrap();
            queue.finish().unwrap();
        }

        assert_eq!(queue.vertices().as_ptr(), vertex_ptr);
        assert_eq!(queue.vertex_count(), 32);
        assert_eq!(queue.shape_count(), 1);
    }

    #[test]
    fn test_fill_circle_closes_on_first_rim_vertex() {
        let mut queue = DrawQueue::with_capacity(16);
        queue.fill_circle(Point2::new(10.0, 10.0), 2.0, 4).unwrap();

        let vertices = queue.vertices();
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[0], RadarVertex::new(10.0, 10.0));
        assert_eq!(vertices[1], vertices[5]);
        assert_relative_eq!(vertices[1].position[0], 12.0);
        assert_eq!(queue.runs()[0].kind, PrimitiveKind::TriangleFan);
    }

    #[test]
    fn test_shape_helper_rejects_loose_vertices() {
        let mut queue = DrawQueue::with_capacity(16);
        queue.add_vertex(Point2::origin()).unwrap();
        assert!(matches!(
            queue.stroke_circle(Point2::origin(), 1.0, 4),
            Err(DrawQueueError::UnfinishedShape { pending: 1 })
        ));
    }

    #[test]
    fn test_add_world_vertices_projects_through_frame() {
        let mut queue = DrawQueue::with_capacity(2);
        queue.add_world_vertices(&[Point2::new(500.0, -500.0)], &frame()).unwrap();

        let vertex = queue.vertices()[0];
        assert_relative_eq!(vertex.position[0], 250.0, epsilon = 1e-3);
        assert_relative_eq!(vertex.position[1], 150.0, epsilon = 1e-3);
    }

    #[test]
    fn test_byte_views_match_layout() {
        let mut queue = DrawQueue::with_capacity(4);
        queue.add_vertices(&triangle()).unwrap();
        assert_eq!(queue.vertex_bytes().len(), 3 * 8);
        assert_eq!(queue.color_bytes().len(), 3 * 4);
    }
}
