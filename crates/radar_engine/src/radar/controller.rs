//! Zoom and update-frame controller

use super::frame::{RadarFrame, Viewport};
use super::zoom::ZoomState;
use crate::config::RadarSettings;
use crate::foundation::math::Point2;
use crate::foundation::time::UpdateTimer;
use std::sync::Arc;

/// Logical radar input, already edge-triggered by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadarInput {
    /// Show or hide the radar
    Toggle,
    /// Narrow the sight range by one level
    ZoomIn,
    /// Widen the sight range by one level
    ZoomOut,
}

/// What the controller decided for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerTick {
    /// Whether the radar is shown this tick
    pub enabled: bool,
    /// Whether this tick rebuilds the draw queues
    pub update_frame: bool,
}

/// Owns the zoom state and the update-frame timer
#[derive(Debug, Clone)]
pub struct RadarController {
    settings: Arc<RadarSettings>,
    zoom: ZoomState,
    timer: UpdateTimer,
}

impl RadarController {
    /// Create a controller from settings
    pub fn new(settings: Arc<RadarSettings>) -> Self {
        let zoom = ZoomState::new(settings.zoom_levels, settings.initial_zoom_level);
        let timer = UpdateTimer::from_fps(settings.update_fps);
        Self { settings, zoom, timer }
    }

    /// Settings currently in effect
    pub fn settings(&self) -> &Arc<RadarSettings> {
        &self.settings
    }

    /// Zoom state
    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    /// Update-frame timer
    pub fn timer(&self) -> &UpdateTimer {
        &self.timer
    }

    /// Whether the radar is shown
    pub fn is_enabled(&self) -> bool {
        self.zoom.is_enabled()
    }

    /// Apply one input event, returning whether anything changed
    pub fn handle_input(&mut self, input: RadarInput) -> bool {
        let changed = match input {
            RadarInput::Toggle => {
                self.zoom.toggle();
                if self.zoom.is_enabled() {
                    // The queues are stale after time spent hidden
                    self.timer.request_update();
                }
                true
            }
            RadarInput::ZoomIn => self.zoom.zoom_in(),
            RadarInput::ZoomOut => self.zoom.zoom_out(),
        };

        if changed {
            log::debug!("Radar input {:?}, zoom level {}", input, self.zoom.level());
        }
        changed
    }

    /// Force the next enabled tick to be an update frame
    pub fn request_update(&mut self) {
        self.timer.request_update();
    }

    /// Advance the zoom animation and the update timer
    ///
    /// While disabled neither advances, so re-enabling resumes from the
    /// state the radar was hidden in.
    pub fn tick(&mut self, delta_time: f32) -> ControllerTick {
        if !self.zoom.is_enabled() {
            return ControllerTick {
                enabled: false,
                update_frame: false,
            };
        }

        self.zoom.advance(delta_time, self.settings.zoom_animation_duration);
        ControllerTick {
            enabled: true,
            update_frame: self.timer.advance(delta_time),
        }
    }

    /// World distance shown at the radar edge at the current zoom
    pub fn sight_radius(&self) -> f32 {
        self.settings.max_sight_range * self.zoom.current_fraction()
    }

    /// Build the frame snapshot for this tick
    pub fn frame(&self, viewer_position: Point2, viewport: Viewport) -> RadarFrame {
        let layout = &self.settings.layout;
        RadarFrame::new(viewer_position, layout.center(viewport), layout.radius, self.sight_radius())
            .with_zoom_level(self.zoom.magnification())
            .with_alpha(self.settings.radar_alpha, self.settings.contact_alpha)
    }

    /// Swap in new settings
    ///
    /// Keeps the selected zoom level when it still exists and forces an
    /// update frame so the queues reflect the new settings.
    pub fn reload(&mut self, settings: Arc<RadarSettings>) {
        self.zoom.set_levels(settings.zoom_levels);
        self.timer.set_fps(settings.update_fps);
        self.timer.request_update();
        self.settings = settings;
    }
}
