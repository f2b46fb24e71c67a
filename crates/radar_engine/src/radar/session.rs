//! # Radar Session
//!
//! Per-tick driver of the pipeline. Each tick:
//!
//! 1. skip when disabled, or when the host has no viewer
//! 2. advance zoom and the update timer
//! 3. on update frames, filter the host's candidates into the visible set
//! 4. open an overlay pass, let every renderer rebuild or replay, close it
//!
//! All state is owned by the session; hosts drive it from one thread.

use super::contact::{Contact, ContactSource};
use super::controller::{ControllerTick, RadarController, RadarInput};
use super::filter::{filter_indices, settings_rules, ExclusionRule, FilterStats};
use super::frame::Viewport;
use super::renderer::{RadarRenderer, RenderTick, RendererInit};
use super::renderers::{ContactBlipRenderer, RadarRingRenderer};
use crate::config::RadarSettings;
use crate::render::RadarBackend;
use crate::RadarError;
use std::sync::Arc;
use std::time::Instant;

/// Result of one session tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Radar hidden; nothing ran
    Disabled,
    /// Host had no viewer; nothing was drawn and the next shown tick is forced to rescan
    NoViewer,
    /// Overlay drawn
    Drawn {
        /// Whether the queues were rebuilt this tick
        update_frame: bool,
        /// Contacts selected by the latest scan
        contacts: usize,
    },
}

/// Session counters
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStats {
    /// Ticks received
    pub ticks: u64,
    /// Ticks that rebuilt the queues
    pub update_frames: u64,
    /// Ticks skipped for lack of a viewer
    pub skipped_no_viewer: u64,
    /// Counters from the latest scan
    pub last_filter: FilterStats,
    /// Duration of the latest scan in microseconds
    pub last_scan_micros: u64,
}

type RendererList<C> = Vec<Box<dyn RadarRenderer<C>>>;
type RuleList<C> = Vec<Box<dyn ExclusionRule<C>>>;

/// Builder for [`RadarSession`]
pub struct RadarSessionBuilder<C: Contact> {
    settings: Arc<RadarSettings>,
    renderers: RendererList<C>,
    rules: RuleList<C>,
}

impl<C: Contact> RadarSessionBuilder<C> {
    /// Start a builder from settings
    pub fn new(settings: Arc<RadarSettings>) -> Self {
        Self {
            settings,
            renderers: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Append a renderer; renderers draw in the order added
    pub fn with_renderer(mut self, renderer: impl RadarRenderer<C> + 'static) -> Self {
        self.renderers.push(Box::new(renderer));
        self
    }

    /// Append an exclusion rule, evaluated after the settings-derived ones
    pub fn with_rule(mut self, rule: impl ExclusionRule<C> + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Append the radar chrome and contact blip renderers
    pub fn with_default_renderers(self) -> Self {
        self.with_renderer(RadarRingRenderer::new())
            .with_renderer(ContactBlipRenderer::new())
    }

    /// Initialise every renderer and build the session
    pub fn build(self) -> Result<RadarSession<C>, RadarError> {
        let settings = checked_settings(self.settings);

        let mut rules = settings_rules(&settings);
        let builtin_rules = rules.len();
        rules.extend(self.rules);

        let mut renderers = self.renderers;
        init_renderers(&mut renderers, &settings)?;

        log::info!(
            "Radar session ready: {} renderers, {} rules, {} contacts max",
            renderers.len(),
            rules.len(),
            settings.max_contacts
        );

        Ok(RadarSession {
            visible: Vec::with_capacity(settings.max_contacts),
            controller: RadarController::new(settings),
            renderers,
            rules,
            builtin_rules,
            stats: SessionStats::default(),
        })
    }
}

/// Replace out-of-range settings with clamped ones
fn checked_settings(settings: Arc<RadarSettings>) -> Arc<RadarSettings> {
    match settings.validate() {
        Ok(()) => settings,
        Err(e) => {
            log::warn!("{e}; clamping radar settings");
            Arc::new(RadarSettings::clone(&settings).sanitized())
        }
    }
}

fn init_renderers<C: Contact>(renderers: &mut RendererList<C>, settings: &Arc<RadarSettings>) -> Result<(), RadarError> {
    let init = RendererInit::from_settings(Arc::clone(settings));
    for renderer in renderers.iter_mut() {
        renderer.init(&init).map_err(|e| {
            log::error!("Renderer '{}' failed to initialise: {}", renderer.name(), e);
            e
        })?;
    }
    Ok(())
}

/// Radar overlay driven once per render tick
pub struct RadarSession<C: Contact> {
    controller: RadarController,
    renderers: RendererList<C>,
    rules: RuleList<C>,
    builtin_rules: usize,
    visible: Vec<usize>,
    stats: SessionStats,
}

impl<C: Contact> RadarSession<C> {
    /// Start building a session
    pub fn builder(settings: Arc<RadarSettings>) -> RadarSessionBuilder<C> {
        RadarSessionBuilder::new(settings)
    }

    /// Settings in effect
    pub fn settings(&self) -> &Arc<RadarSettings> {
        self.controller.settings()
    }

    /// Zoom and update-frame controller
    pub fn controller(&self) -> &RadarController {
        &self.controller
    }

    /// Session counters
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Whether the radar is shown
    pub fn is_enabled(&self) -> bool {
        self.controller.is_enabled()
    }

    /// Number of registered renderers
    pub fn renderer_count(&self) -> usize {
        self.renderers.len()
    }

    /// Apply one edge-triggered input event
    pub fn handle_input(&mut self, input: RadarInput) -> bool {
        self.controller.handle_input(input)
    }

    /// Run one render tick
    pub fn tick<S>(
        &mut self,
        delta_time: f32,
        source: &S,
        backend: &mut dyn RadarBackend,
        viewport: Viewport,
    ) -> Result<TickOutcome, RadarError>
    where
        S: ContactSource<Contact = C>,
    {
        self.stats.ticks += 1;

        if !self.controller.is_enabled() {
            return Ok(TickOutcome::Disabled);
        }
        let Some(viewer) = source.viewer_position() else {
            self.stats.skipped_no_viewer += 1;
            // Queues describe a stale viewer; rebuild once one returns
            self.controller.request_update();
            return Ok(TickOutcome::NoViewer);
        };

        let ControllerTick { update_frame, .. } = self.controller.tick(delta_time);
        let frame = self.controller.frame(viewer, viewport);
        let settings = Arc::clone(self.controller.settings());

        let candidates: &[C] = if update_frame {
            let candidates = source.candidates(viewer, frame.sight_radius);
            let started = Instant::now();
            let filtered = filter_indices(candidates, Some(settings.max_contacts), &frame, &self.rules, &mut self.visible);
            self.stats.last_scan_micros = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
            self.stats.last_filter = filtered;
            self.stats.update_frames += 1;
            log::trace!(
                "Radar scan: {} candidates, {} in range, {} shown",
                filtered.scanned,
                filtered.scanned - filtered.out_of_range,
                filtered.accepted
            );
            candidates
        } else {
            Default::default()
        };
        let visible: &[usize] = if update_frame { &self.visible } else { &[] };
        let tick = RenderTick::new(&frame, update_frame, &settings, candidates, visible);

        backend.begin_overlay(&frame)?;
        let mut rendered = Ok(());
        for renderer in &mut self.renderers {
            if let Err(e) = renderer.render(&tick, backend) {
                log::error!("Renderer '{}' failed: {}", renderer.name(), e);
                rendered = Err(e);
                break;
            }
        }
        let ended = backend.end_overlay();

        if rendered.is_err() {
            // A renderer may be left mid-rebuild
            self.controller.request_update();
        }
        rendered?;
        ended?;

        Ok(TickOutcome::Drawn {
            update_frame,
            contacts: self.stats.last_filter.accepted,
        })
    }

    /// Swap in new settings
    ///
    /// Settings-derived rules are rebuilt, custom rules kept, and every
    /// renderer re-initialised against the new bounds.
    pub fn reload(&mut self, settings: Arc<RadarSettings>) -> Result<(), RadarError> {
        let settings = checked_settings(settings);

        let rules = settings_rules(&settings);
        let builtin_rules = rules.len();
        self.rules.splice(..self.builtin_rules, rules);
        self.builtin_rules = builtin_rules;

        init_renderers(&mut self.renderers, &settings)?;
        self.visible = Vec::with_capacity(settings.max_contacts);
        self.stats.last_filter = FilterStats::default();
        self.controller.reload(settings);

        log::info!("Radar settings reloaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point2;
    use crate::radar::renderers::test_support::Dot;
    use crate::radar::{FnRule, Relationship};
    use crate::render::RecordingBackend;

    struct Scene {
        viewer: Option<Point2>,
        dots: Vec<Dot>,
    }

    impl ContactSource for Scene {
        type Contact = Dot;

        fn viewer_position(&self) -> Option<Point2> {
            self.viewer
        }

        fn candidates(&self, _center: Point2, _radius: f32) -> &[Dot] {
            &self.dots
        }
    }

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn test_default_renderers_draw_in_order() {
        let settings = Arc::new(RadarSettings { fog_of_war: false, ..Default::default() });
        let mut session = RadarSession::builder(settings).with_default_renderers().build().unwrap();
        assert_eq!(session.renderer_count(), 2);

        let scene = Scene {
            viewer: Some(Point2::origin()),
            dots: vec![Dot::new(10.0, 10.0, Relationship::Enemy)],
        };
        let mut backend = RecordingBackend::new();
        let outcome = session.tick(0.016, &scene, &mut backend, viewport()).unwrap();

        assert_eq!(outcome, TickOutcome::Drawn { update_frame: true, contacts: 1 });
        // Background fan, edge, two range rings, then one blip
        assert_eq!(backend.calls().len(), 5);
    }

    #[test]
    fn test_invalid_settings_are_clamped() {
        let settings = Arc::new(RadarSettings { zoom_levels: 0, update_fps: 0.0, ..Default::default() });
        let session: RadarSession<Dot> = RadarSession::builder(settings).build().unwrap();
        assert_eq!(session.settings().zoom_levels, 1);
        assert!(session.settings().update_fps > 0.0);
    }

    #[test]
    fn test_oversized_max_contacts_is_clamped_at_build() {
        let settings = Arc::new(RadarSettings { max_contacts: usize::MAX, ..Default::default() });
        let mut session = RadarSession::builder(settings).with_default_renderers().build().unwrap();
        assert_eq!(session.settings().max_contacts, crate::config::MAX_CONTACTS_LIMIT);

        let scene = Scene {
            viewer: Some(Point2::origin()),
            dots: vec![Dot::new(10.0, 10.0, Relationship::Enemy)],
        };
        let mut backend = RecordingBackend::new();
        let outcome = session.tick(0.016, &scene, &mut backend, viewport()).unwrap();
        assert_eq!(outcome, TickOutcome::Drawn { update_frame: true, contacts: 1 });
    }

    #[test]
    fn test_custom_rules_survive_reload() {
        let settings = Arc::new(RadarSettings { fog_of_war: true, ..Default::default() });
        let hide_enemies = FnRule::new("hide_enemies", |dot: &Dot, _: &crate::radar::RadarFrame| {
            dot.relationship == Relationship::Enemy
        });
        let mut session = RadarSession::builder(settings)
            .with_default_renderers()
            .with_rule(hide_enemies)
            .build()
            .unwrap();
        assert_eq!(session.rules.len(), 2);

        session.reload(Arc::new(RadarSettings { fog_of_war: false, ..Default::default() })).unwrap();
        let names: Vec<&str> = session.rules.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["hide_enemies"]);
        assert_eq!(session.builtin_rules, 0);
    }

    #[test]
    fn test_no_viewer_skips_tick() {
        let settings = Arc::new(RadarSettings::default());
        let mut session = RadarSession::builder(settings).with_default_renderers().build().unwrap();
        let scene = Scene { viewer: None, dots: Vec::new() };
        let mut backend = RecordingBackend::new();

        let outcome = session.tick(0.016, &scene, &mut backend, viewport()).unwrap();
        assert_eq!(outcome, TickOutcome::NoViewer);
        assert_eq!(backend.passes(), 0);
        assert_eq!(session.stats().skipped_no_viewer, 1);
        assert!(session.controller().timer().is_update_pending());
    }
}
