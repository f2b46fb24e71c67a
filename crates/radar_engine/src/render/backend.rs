//! Radar Render Backend Trait
//!
//! Defines the interface between the radar pipeline and rendering backends.
//! Keeps the radar independent of Vulkan/OpenGL specifics: a backend only
//! has to accept vertex and color arrays keyed by primitive kind.

use super::color::Rgba8;
use super::draw_queue::PrimitiveKind;
use super::vertex::RadarVertex;
use crate::radar::RadarFrame;

/// Errors reported by a rendering backend
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The backend does not support a primitive kind
    #[error("Unsupported primitive: {0:?}")]
    UnsupportedPrimitive(PrimitiveKind),

    /// Vertex and color arrays differ in length
    #[error("Mismatched arrays: {vertices} vertices, {colors} colors")]
    MismatchedArrays {
        /// Vertex count
        vertices: usize,
        /// Color count
        colors: usize,
    },

    /// Draw call issued outside of an overlay pass
    #[error("No overlay pass is active")]
    NoActivePass,

    /// Backend-specific failure
    #[error("Backend failure: {0}")]
    Other(String),
}

/// Backend-agnostic radar rendering interface
pub trait RadarBackend {
    /// Begin the radar overlay pass for this render frame
    ///
    /// Backends typically set up an orthographic projection and clip to the
    /// radar disc described by `frame` here.
    fn begin_overlay(&mut self, frame: &RadarFrame) -> Result<(), BackendError>;

    /// Draw one run of vertices as `kind`
    ///
    /// `vertices` and `colors` always have the same length.
    fn draw_arrays(
        &mut self,
        kind: PrimitiveKind,
        vertices: &[RadarVertex],
        colors: &[Rgba8],
    ) -> Result<(), BackendError>;

    /// End the radar overlay pass
    fn end_overlay(&mut self) -> Result<(), BackendError>;
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Primitive kind requested
    pub kind: PrimitiveKind,
    /// Vertex data
    pub vertices: Vec<RadarVertex>,
    /// Per-vertex colors
    pub colors: Vec<Rgba8>,
}

/// Backend that records calls instead of issuing them
///
/// Used by headless hosts and tests. Calls from the most recent overlay pass
/// are kept; earlier passes only contribute to the counters.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<DrawCall>,
    pass_active: bool,
    passes: u64,
    total_calls: u64,
    total_vertices: u64,
}

impl RecordingBackend {
    /// Create an empty recording backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls of the latest overlay pass
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of completed or active overlay passes
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Draw calls across every pass
    pub fn total_calls(&self) -> u64 {
        self.total_calls
    }

    /// Vertices submitted across every pass
    pub fn total_vertices(&self) -> u64 {
        self.total_vertices
    }

    /// Whether an overlay pass is currently open
    pub fn is_pass_active(&self) -> bool {
        self.pass_active
    }
}

impl RadarBackend for RecordingBackend {
    fn begin_overlay(&mut self, _frame: &RadarFrame) -> Result<(), BackendError> {
        self.calls.clear();
        self.pass_active = true;
        self.passes += 1;
        Ok(())
    }

    fn draw_arrays(
        &mut self,
        kind: PrimitiveKind,
        vertices: &[RadarVertex],
        colors: &[Rgba8],
    ) -> Result<(), BackendError> {
        if !self.pass_active {
            return Err(BackendError::NoActivePass);
        }
        if vertices.len() != colors.len() {
            return Err(BackendError::MismatchedArrays {
                vertices: vertices.len(),
                colors: colors.len(),
            });
        }

        log::trace!("draw_arrays {:?} with {} vertices", kind, vertices.len());
        self.total_calls += 1;
        self.total_vertices += vertices.len() as u64;
        self.calls.push(DrawCall {
            kind,
            vertices: vertices.to_vec(),
            colors: colors.to_vec(),
        });
        Ok(())
    }

    fn end_overlay(&mut self) -> Result<(), BackendError> {
        if !self.pass_active {
            return Err(BackendError::NoActivePass);
        }
        self.pass_active = false;
        Ok(())
    }
}
