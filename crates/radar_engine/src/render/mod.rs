//! Rendering module
//!
//! Backend-agnostic batching for the radar overlay. Renderers write shapes
//! into a [`DrawQueue`] on update frames; the queue replays them through a
//! [`RadarBackend`] on every render frame.

pub mod backend;
pub mod color;
pub mod draw_queue;
pub mod vertex;

pub use backend::{BackendError, DrawCall, RadarBackend, RecordingBackend};
pub use color::Rgba8;
pub use draw_queue::{DrawQueue, DrawQueueError, PrimitiveKind, ShapeRun};
pub use vertex::RadarVertex;
