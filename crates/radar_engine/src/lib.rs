//! # Radar Engine
//!
//! Screen-space radar overlay pipeline for real-time simulations.
//!
//! ## Features
//!
//! - **Throttled Scans**: Entity filtering and projection run at a configurable update rate
//! - **Batched Replay**: Draw queues are rebuilt on update frames and replayed every render frame
//! - **Animated Zoom**: Discrete zoom levels with smooth, non-overshooting transitions
//! - **Backend Agnostic**: Rendering goes through the small [`render::RadarBackend`] trait
//! - **Pluggable Renderers**: Contact renderers are injected as an ordered list
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use radar_engine::prelude::*;
//!
//! struct Blip { position: Point2 }
//!
//! impl Contact for Blip {
//!     fn position(&self) -> Point2 { self.position }
//!     fn radius(&self) -> f32 { 10.0 }
//!     fn relationship(&self) -> Relationship { Relationship::Enemy }
//!     fn is_visible(&self) -> bool { true }
//!     fn kind_id(&self) -> &str { "blip" }
//! }
//!
//! struct Scene { blips: Vec<Blip> }
//!
//! impl ContactSource for Scene {
//!     type Contact = Blip;
//!     fn viewer_position(&self) -> Option<Point2> { Some(Point2::origin()) }
//!     fn candidates(&self, _center: Point2, _radius: f32) -> &[Blip] { &self.blips }
//! }
//!
//! fn main() -> Result<(), RadarError> {
//!     let settings = Arc::new(RadarSettings::default());
//!     let mut session = RadarSession::builder(settings).with_default_renderers().build()?;
//!     let mut backend = RecordingBackend::new();
//!     let scene = Scene { blips: Vec::new() };
//!
//!     session.tick(1.0 / 60.0, &scene, &mut backend, Viewport::new(1920.0, 1080.0))?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod render;
pub mod radar;
pub mod input;

mod error;

pub use error::RadarError;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        RadarError,
        config::{Config, ConfigError, ContactColors, RadarSettings},
        foundation::math::{Point2, Vec2},
        input::{EdgeTrigger, KeyCode, RadarInputMapper, RadarKeyBindings},
        radar::{
            Contact, ContactSource, Relationship, RelationshipMask,
            RadarController, RadarFrame, RadarInput, RadarLayout, RadarPosition, Corner, Viewport,
            RadarRenderer, RenderTick, RendererInit,
            RadarSession, RadarSessionBuilder, TickOutcome,
            ExclusionRule, FogOfWarRule, ExcludedTypesRule, RelationshipRule,
            renderers::{ContactBlipRenderer, RadarRingRenderer},
        },
        render::{
            DrawQueue, DrawQueueError, PrimitiveKind, RadarBackend, RecordingBackend,
            BackendError, RadarVertex, Rgba8,
        },
    };
}
