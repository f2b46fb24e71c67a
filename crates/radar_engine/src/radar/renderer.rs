//! Contact renderer capability
//!
//! A session owns an ordered list of renderers. Each is initialised once
//! with the session bounds, then asked to render on every shown tick. On
//! update frames a renderer rebuilds its draw queues from
//! [`RenderTick::contacts`]; on other ticks it replays what it built last.

use super::contact::Contact;
use super::frame::RadarFrame;
use crate::config::RadarSettings;
use crate::render::RadarBackend;
use crate::RadarError;
use std::sync::Arc;

/// Session bounds handed to renderers at initialisation
#[derive(Debug, Clone)]
pub struct RendererInit {
    /// Settings in effect
    pub settings: Arc<RadarSettings>,
    /// Most contacts a single scan may hand over
    pub max_contacts: usize,
}

impl RendererInit {
    /// Bounds derived from `settings`
    pub fn from_settings(settings: Arc<RadarSettings>) -> Self {
        let max_contacts = settings.max_contacts;
        Self { settings, max_contacts }
    }

    /// Vertex capacity for a queue holding one shape of `vertices_per_contact` per contact
    pub fn queue_capacity(&self, vertices_per_contact: usize) -> usize {
        self.max_contacts.saturating_mul(vertices_per_contact)
    }
}

/// Per-tick input to a renderer
pub struct RenderTick<'a, C> {
    /// Frame snapshot for this tick
    pub frame: &'a RadarFrame,
    /// Whether queues must be rebuilt this tick
    pub update_frame: bool,
    /// Settings in effect
    pub settings: &'a RadarSettings,
    candidates: &'a [C],
    visible: &'a [usize],
}

impl<'a, C> RenderTick<'a, C> {
    /// Assemble a tick from a candidate slice and indices of the visible ones
    ///
    /// Every index in `visible` must be in bounds for `candidates`; callers
    /// pass the output of the visibility filter. On non-update frames
    /// `visible` is empty.
    pub fn new(
        frame: &'a RadarFrame,
        update_frame: bool,
        settings: &'a RadarSettings,
        candidates: &'a [C],
        visible: &'a [usize],
    ) -> Self {
        Self {
            frame,
            update_frame,
            settings,
            candidates,
            visible,
        }
    }

    /// Contacts selected by the filter, in source order
    pub fn contacts(&self) -> impl Iterator<Item = &'a C> + 'a {
        let candidates = self.candidates;
        self.visible.iter().filter_map(move |&index| candidates.get(index))
    }

    /// Number of contacts selected
    pub fn contact_count(&self) -> usize {
        self.visible.len()
    }
}

/// A pluggable radar layer
pub trait RadarRenderer<C: Contact> {
    /// Name used in logs and errors
    fn name(&self) -> &str;

    /// Allocate queues for the session bounds
    ///
    /// Called once when the session is built and again on settings reload.
    fn init(&mut self, init: &RendererInit) -> Result<(), RadarError>;

    /// Rebuild on update frames, then draw
    fn render(&mut self, tick: &RenderTick<'_, C>, backend: &mut dyn RadarBackend) -> Result<(), RadarError>;
}
