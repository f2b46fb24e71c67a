//! Radar pipeline
//!
//! Leaf-first: [`transform`] projects world points, [`filter`] selects the
//! contacts worth drawing, [`zoom`] and [`controller`] own zoom animation
//! and update-frame scheduling, and [`session`] ties them to the renderers.

pub mod contact;
pub mod controller;
pub mod filter;
pub mod frame;
pub mod renderer;
pub mod renderers;
pub mod session;
pub mod transform;
pub mod zoom;

pub use contact::{Contact, ContactSource, Relationship, RelationshipMask};
pub use controller::{ControllerTick, RadarController, RadarInput};
pub use filter::{
    ExcludedTypesRule, ExclusionRule, FilterStats, FnRule, FogOfWarRule, RelationshipRule,
};
pub use frame::{Corner, RadarFrame, RadarLayout, RadarPosition, Viewport};
pub use renderer::{RadarRenderer, RenderTick, RendererInit};
pub use session::{RadarSession, RadarSessionBuilder, SessionStats, TickOutcome};
pub use zoom::ZoomState;
