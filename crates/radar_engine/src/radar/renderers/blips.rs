//! Contact blips
//!
//! One filled disc per contact, colored by relationship. Blips never shrink
//! below `min_blip_size` pixels, scaled up with magnification so that small
//! contacts stay readable when zoomed in.

use crate::radar::renderer::{RadarRenderer, RenderTick, RendererInit};
use crate::radar::transform::{scale_length, to_radar_space};
use crate::radar::Contact;
use crate::render::{DrawQueue, RadarBackend};
use crate::RadarError;

/// Draws every visible contact as a filled disc
#[derive(Debug)]
pub struct ContactBlipRenderer {
    queue: DrawQueue,
    segments: usize,
}

impl ContactBlipRenderer {
    /// Create an uninitialised renderer; the session sizes it on init
    pub fn new() -> Self {
        Self {
            queue: DrawQueue::with_capacity(0),
            segments: 3,
        }
    }

    /// Queue replayed every tick
    pub fn queue(&self) -> &DrawQueue {
        &self.queue
    }

    fn rebuild<C: Contact>(&mut self, tick: &RenderTick<'_, C>) -> Result<(), RadarError> {
        let frame = tick.frame;
        let colors = &tick.settings.colors;
        let min_radius = tick.settings.min_blip_size * frame.current_zoom_level;

        self.queue.clear();
        for contact in tick.contacts() {
            self.queue.set_color(colors.for_relationship(contact.relationship()), frame.contact_alpha);
            let center = to_radar_space(&contact.position(), frame);
            let radius = scale_length(contact.radius().max(0.0), frame).max(min_radius);
            self.queue.fill_circle(center, radius, self.segments)?;
        }
        self.queue.finish()?;
        Ok(())
    }
}

impl Default for ContactBlipRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Contact> RadarRenderer<C> for ContactBlipRenderer {
    fn name(&self) -> &str {
        "contact_blips"
    }

    fn init(&mut self, init: &RendererInit) -> Result<(), RadarError> {
        self.segments = init.settings.blip_segments.max(3);
        let capacity = init.queue_capacity(self.segments + 2);
        self.queue = DrawQueue::with_capacity(capacity);
        log::debug!("Contact blip queue sized for {} vertices", capacity);
        Ok(())
    }

    fn render(&mut self, tick: &RenderTick<'_, C>, backend: &mut dyn RadarBackend) -> Result<(), RadarError> {
        if tick.update_frame {
            self.rebuild(tick)?;
        }
        if self.queue.is_finished() {
            self.queue.draw(backend)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RadarSettings;
    use crate::foundation::math::Point2;
    use crate::radar::renderers::test_support::Dot;
    use crate::radar::{RadarFrame, Relationship};
    use crate::render::{DrawQueueError, PrimitiveKind, RecordingBackend};
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn settings(max_contacts: usize) -> Arc<RadarSettings> {
        Arc::new(RadarSettings {
            max_contacts,
            blip_segments: 6,
            min_blip_size: 2.0,
            ..Default::default()
        })
    }

    fn frame() -> RadarFrame {
        RadarFrame::new(Point2::origin(), Point2::new(500.0, 500.0), 100.0, 1000.0)
    }

    fn render_once(
        renderer: &mut ContactBlipRenderer,
        settings: &RadarSettings,
        contacts: &[Dot],
        visible: &[usize],
        update_frame: bool,
        backend: &mut RecordingBackend,
    ) -> Result<(), RadarError> {
        let frame = frame();
        let tick = RenderTick::new(&frame, update_frame, settings, contacts, visible);
        backend.begin_overlay(&frame)?;
        RadarRenderer::<Dot>::render(renderer, &tick, backend)?;
        backend.end_overlay()?;
        Ok(())
    }

    #[test]
    fn test_blips_are_projected_and_colored() {
        let settings = settings(4);
        let mut renderer = ContactBlipRenderer::new();
        RadarRenderer::<Dot>::init(&mut renderer, &RendererInit::from_settings(settings.clone())).unwrap();

        let contacts = vec![
            Dot::new(900.0, 0.0, Relationship::Enemy),
            Dot::new(0.0, -500.0, Relationship::Friendly),
        ];
        let mut backend = RecordingBackend::new();
        render_once(&mut renderer, &settings, &contacts, &[0, 1], true, &mut backend).unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| c.kind == PrimitiveKind::TriangleFan && c.vertices.len() == 8));

        assert_relative_eq!(calls[0].vertices[0].position[0], 590.0, epsilon = 1e-3);
        assert_relative_eq!(calls[0].vertices[0].position[1], 500.0, epsilon = 1e-3);
        assert_eq!(calls[0].colors[0], settings.colors.enemy);
        assert_relative_eq!(calls[1].vertices[0].position[1], 450.0, epsilon = 1e-3);
        assert_eq!(calls[1].colors[0], settings.colors.friendly);
    }

    #[test]
    fn test_minimum_blip_size() {
        let settings = settings(1);
        let mut renderer = ContactBlipRenderer::new();
        RadarRenderer::<Dot>::init(&mut renderer, &RendererInit::from_settings(settings.clone())).unwrap();

        let contacts = vec![Dot::new(0.0, 0.0, Relationship::Neutral)];
        let mut backend = RecordingBackend::new();
        render_once(&mut renderer, &settings, &contacts, &[0], true, &mut backend).unwrap();

        // First rim vertex sits at angle 0
        let rim = backend.calls()[0].vertices[1].position[0];
        assert_relative_eq!(rim - 500.0, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_non_update_frame_replays() {
        let settings = settings(2);
        let mut renderer = ContactBlipRenderer::new();
        RadarRenderer::<Dot>::init(&mut renderer, &RendererInit::from_settings(settings.clone())).unwrap();

        let contacts = vec![Dot::new(100.0, 100.0, Relationship::Allied)];
        let mut backend = RecordingBackend::new();
        render_once(&mut renderer, &settings, &contacts, &[0], true, &mut backend).unwrap();
        let first = backend.calls().to_vec();

        render_once(&mut renderer, &settings, &contacts, &[], false, &mut backend).unwrap();
        assert_eq!(backend.calls(), first.as_slice());
    }

    #[test]
    fn test_more_contacts_than_sized_for_is_an_error() {
        let settings = settings(1);
        let mut renderer = ContactBlipRenderer::new();
        RadarRenderer::<Dot>::init(&mut renderer, &RendererInit::from_settings(settings.clone())).unwrap();

        let contacts = vec![Dot::new(0.0, 0.0, Relationship::Enemy), Dot::new(1.0, 0.0, Relationship::Enemy)];
        let mut backend = RecordingBackend::new();
        let result = render_once(&mut renderer, &settings, &contacts, &[0, 1], true, &mut backend);
        assert!(matches!(
            result,
            Err(RadarError::DrawQueue(DrawQueueError::CapacityExceeded { .. }))
        ));
    }
}
