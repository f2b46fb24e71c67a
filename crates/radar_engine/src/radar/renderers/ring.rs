//! Radar chrome: background disc, edge and range rings

use crate::radar::renderer::{RadarRenderer, RenderTick, RendererInit};
use crate::radar::Contact;
use crate::render::{DrawQueue, RadarBackend};
use crate::RadarError;

/// Draws the radar background, its edge and evenly spaced range rings
#[derive(Debug)]
pub struct RadarRingRenderer {
    queue: DrawQueue,
    segments: usize,
    range_rings: usize,
}

impl RadarRingRenderer {
    /// Create an uninitialised renderer; the session sizes it on init
    pub fn new() -> Self {
        Self {
            queue: DrawQueue::with_capacity(0),
            segments: 3,
            range_rings: 0,
        }
    }

    /// Vertices needed for the background fan plus every outline
    fn capacity_for(segments: usize, range_rings: usize) -> usize {
        (segments + 2) + segments * (range_rings + 1)
    }

    fn rebuild<C>(&mut self, tick: &RenderTick<'_, C>) -> Result<(), RadarError> {
        let frame = tick.frame;
        let colors = &tick.settings.colors;

        self.queue.clear();

        self.queue.set_color(colors.background, frame.radar_alpha);
        self.queue.fill_circle(frame.render_center, frame.render_radius, self.segments)?;

        self.queue.set_color(colors.ring, frame.radar_alpha);
        self.queue.stroke_circle(frame.render_center, frame.render_radius, self.segments)?;
        let spacing = frame.render_radius / (self.range_rings + 1) as f32;
        for ring in 1..=self.range_rings {
            self.queue.stroke_circle(frame.render_center, spacing * ring as f32, self.segments)?;
        }

        self.queue.finish()?;
        Ok(())
    }
}

impl Default for RadarRingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Contact> RadarRenderer<C> for RadarRingRenderer {
    fn name(&self) -> &str {
        "radar_rings"
    }

    fn init(&mut self, init: &RendererInit) -> Result<(), RadarError> {
        self.segments = init.settings.ring_segments.max(3);
        self.range_rings = init.settings.range_rings;
        self.queue = DrawQueue::with_capacity(Self::capacity_for(self.segments, self.range_rings));
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
    use crate::foundation::math::{distance_squared, Point2};
    use crate::radar::renderers::test_support::Dot;
    use crate::radar::RadarFrame;
    use crate::render::{PrimitiveKind, RecordingBackend};
    use approx::assert_relative_eq;
    use std::sync::Arc;

    #[test]
    fn test_draws_background_edge_and_rings() {
        let settings = Arc::new(RadarSettings {
            range_rings: 3,
            ring_segments: 16,
            radar_alpha: 0.5,
            ..Default::default()
        });
        let mut renderer = RadarRingRenderer::new();
        RadarRenderer::<Dot>::init(&mut renderer, &RendererInit::from_settings(settings.clone())).unwrap();

        let frame = RadarFrame::new(Point2::origin(), Point2::new(200.0, 200.0), 80.0, 1000.0)
            .with_alpha(settings.radar_alpha, settings.contact_alpha);
        let candidates: [Dot; 0] = [];
        let tick = RenderTick::new(&frame, true, &settings, &candidates, &[]);

        let mut backend = RecordingBackend::new();
        backend.begin_overlay(&frame).unwrap();
        RadarRenderer::<Dot>::render(&mut renderer, &tick, &mut backend).unwrap();
        backend.end_overlay().unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 5);
        assert_eq!(calls[0].kind, PrimitiveKind::TriangleFan);
        assert!(calls[1..].iter().all(|c| c.kind == PrimitiveKind::LineLoop));
        assert_eq!(calls[0].colors[0], settings.colors.background.with_alpha_mult(0.5));

        // Rings at 20, 40 and 60 pixels inside the 80 pixel edge
        for (call, expected) in calls[1..].iter().zip([80.0_f32, 20.0, 40.0, 60.0]) {
            let radius = distance_squared(&call.vertices[0].point(), &frame.render_center).sqrt();
            assert_relative_eq!(radius, expected, epsilon = 1e-3);
        }
        assert_eq!(renderer.queue.remaining(), 0);
    }
}
