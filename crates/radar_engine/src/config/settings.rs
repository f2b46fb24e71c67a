//! # Radar Settings
//!
//! Scalar settings consumed by the controller, the filter and the built-in
//! renderers. Every field has a default, so partial files are accepted.

use super::{Config, ConfigError};
use crate::input::RadarKeyBindings;
use crate::radar::{RadarLayout, Relationship};
use crate::render::Rgba8;
use serde::{Deserialize, Serialize};

/// Colors used for contacts and radar chrome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactColors {
    /// Player-owned contacts
    pub friendly: Rgba8,
    /// Hostile contacts
    pub enemy: Rgba8,
    /// Unaligned contacts (asteroids, derelicts, bodies)
    pub neutral: Rgba8,
    /// Contacts of allied factions
    pub allied: Rgba8,
    /// Radar edge and range rings
    pub ring: Rgba8,
    /// Radar disc background
    pub background: Rgba8,
}

impl ContactColors {
    /// Color for a contact relationship
    pub fn for_relationship(&self, relationship: Relationship) -> Rgba8 {
        match relationship {
            Relationship::Friendly => self.friendly,
            Relationship::Enemy => self.enemy,
            Relationship::Neutral => self.neutral,
            Relationship::Allied => self.allied,
        }
    }
}

impl Default for ContactColors {
    fn default() -> Self {
        Self {
            friendly: Rgba8::new(0, 255, 0, 255),
            enemy: Rgba8::new(255, 0, 0, 255),
            neutral: Rgba8::new(150, 150, 150, 255),
            allied: Rgba8::new(0, 200, 255, 255),
            ring: Rgba8::new(0, 255, 255, 255),
            background: Rgba8::new(0, 0, 0, 160),
        }
    }
}

/// Largest accepted `max_contacts`
pub const MAX_CONTACTS_LIMIT: usize = 10_000;
/// Largest accepted `blip_segments` or `ring_segments`
pub const MAX_SEGMENTS: usize = 1024;
/// Largest accepted `range_rings`
pub const MAX_RANGE_RINGS: usize = 32;

/// # Radar Settings
///
/// Immutable once handed to a session. Use [`RadarSettings::sanitized`] to
/// clamp hand-edited values into range before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarSettings {
    /// Entity scans per second (independent of the render rate)
    pub update_fps: f32,
    /// Number of enabled zoom levels (N)
    pub zoom_levels: u32,
    /// Zoom level at session start, 0 starts disabled
    pub initial_zoom_level: u32,
    /// Seconds for the zoom fraction to travel the full 0..1 range
    pub zoom_animation_duration: f32,
    /// Sight radius in world units at zoom level N
    pub max_sight_range: f32,
    /// Widget placement and size on screen
    pub layout: RadarLayout,
    /// Most contacts drawn per scan; also sizes every draw queue
    pub max_contacts: usize,
    /// Hide contacts the viewer cannot currently see
    pub fog_of_war: bool,
    /// Entity kind ids never shown
    pub excluded_types: Vec<String>,
    /// Entity kind id prefixes never shown
    pub excluded_prefixes: Vec<String>,
    /// Contact and chrome colors
    pub colors: ContactColors,
    /// Alpha multiplier for the radar chrome
    pub radar_alpha: f32,
    /// Alpha multiplier for contacts
    pub contact_alpha: f32,
    /// Smallest blip radius in pixels at magnification 1
    pub min_blip_size: f32,
    /// Polygon sides used for contact blips
    pub blip_segments: usize,
    /// Number of inner range rings
    pub range_rings: usize,
    /// Polygon sides used for rings
    pub ring_segments: usize,
    /// Key bindings for toggle and zoom
    pub keys: RadarKeyBindings,
}

impl RadarSettings {
    /// Vertices a single blip needs (center, rim, closing rim vertex)
    pub fn vertices_per_contact(&self) -> usize {
        self.blip_segments + 2
    }

    /// Check every range constraint without modifying anything
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.update_fps.is_finite() && self.update_fps > 0.0) {
            return Err(invalid("update_fps", format!("must be positive, got {}", self.update_fps)));
        }
        if self.zoom_levels == 0 {
            return Err(invalid("zoom_levels", "must be at least 1".to_string()));
        }
        if self.initial_zoom_level > self.zoom_levels {
            return Err(invalid(
                "initial_zoom_level",
                format!("{} exceeds zoom_levels {}", self.initial_zoom_level, self.zoom_levels),
            ));
        }
        if !(self.max_sight_range.is_finite() && self.max_sight_range > 0.0) {
            return Err(invalid("max_sight_range", format!("must be positive, got {}", self.max_sight_range)));
        }
        if !(self.layout.radius.is_finite() && self.layout.radius > 0.0) {
            return Err(invalid("layout.radius", format!("must be positive, got {}", self.layout.radius)));
        }
        if self.zoom_animation_duration.is_nan() || self.zoom_animation_duration < 0.0 {
            return Err(invalid("zoom_animation_duration", "must not be negative".to_string()));
        }
        if self.max_contacts > MAX_CONTACTS_LIMIT {
            return Err(invalid(
                "max_contacts",
                format!("{} exceeds {}", self.max_contacts, MAX_CONTACTS_LIMIT),
            ));
        }
        if !(3..=MAX_SEGMENTS).contains(&self.blip_segments) {
            return Err(invalid("blip_segments", format!("must be within 3..={MAX_SEGMENTS}")));
        }
        if !(3..=MAX_SEGMENTS).contains(&self.ring_segments) {
            return Err(invalid("ring_segments", format!("must be within 3..={MAX_SEGMENTS}")));
        }
        if self.range_rings > MAX_RANGE_RINGS {
            return Err(invalid("range_rings", format!("must be at most {MAX_RANGE_RINGS}")));
        }
        if !is_unit(self.radar_alpha) {
            return Err(invalid("radar_alpha", format!("must be within 0..=1, got {}", self.radar_alpha)));
        }
        if !is_unit(self.contact_alpha) {
            return Err(invalid("contact_alpha", format!("must be within 0..=1, got {}", self.contact_alpha)));
        }
        if !(self.min_blip_size.is_finite() && self.min_blip_size >= 0.0) {
            return Err(invalid("min_blip_size", format!("must not be negative, got {}", self.min_blip_size)));
        }
        Ok(())
    }

    /// Clamp out-of-range values, logging each correction
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.update_fps.is_finite() && self.update_fps > 0.0) {
            log::warn!("update_fps {} out of range, using {}", self.update_fps, defaults.update_fps);
            self.update_fps = defaults.update_fps;
        }
        if self.zoom_levels == 0 {
            log::warn!("zoom_levels must be at least 1, clamping");
            self.zoom_levels = 1;
        }
        if self.initial_zoom_level > self.zoom_levels {
            log::warn!(
                "initial_zoom_level {} exceeds zoom_levels {}, clamping",
                self.initial_zoom_level,
                self.zoom_levels
            );
            self.initial_zoom_level = self.zoom_levels;
        }
        if !(self.max_sight_range.is_finite() && self.max_sight_range > 0.0) {
            log::warn!("max_sight_range {} out of range, using {}", self.max_sight_range, defaults.max_sight_range);
            self.max_sight_range = defaults.max_sight_range;
        }
        if !(self.layout.radius.is_finite() && self.layout.radius > 0.0) {
            log::warn!("layout.radius {} out of range, using {}", self.layout.radius, defaults.layout.radius);
            self.layout.radius = defaults.layout.radius;
        }
        if self.zoom_animation_duration.is_nan() || self.zoom_animation_duration < 0.0 {
            log::warn!("zoom_animation_duration must not be negative, disabling animation");
            self.zoom_animation_duration = 0.0;
        }
        if self.max_contacts > MAX_CONTACTS_LIMIT {
            log::warn!("max_contacts {} exceeds {}, clamping", self.max_contacts, MAX_CONTACTS_LIMIT);
            self.max_contacts = MAX_CONTACTS_LIMIT;
        }
        if !(3..=MAX_SEGMENTS).contains(&self.blip_segments) {
            log::warn!("blip_segments {} out of range, clamping", self.blip_segments);
            self.blip_segments = self.blip_segments.clamp(3, MAX_SEGMENTS);
        }
        if !(3..=MAX_SEGMENTS).contains(&self.ring_segments) {
            log::warn!("ring_segments {} out of range, clamping", self.ring_segments);
            self.ring_segments = self.ring_segments.clamp(3, MAX_SEGMENTS);
        }
        if self.range_rings > MAX_RANGE_RINGS {
            log::warn!("range_rings {} exceeds {}, clamping", self.range_rings, MAX_RANGE_RINGS);
            self.range_rings = MAX_RANGE_RINGS;
        }
        if !is_unit(self.radar_alpha) {
            log::warn!("radar_alpha {} out of range, clamping", self.radar_alpha);
            self.radar_alpha = clamp_unit(self.radar_alpha, defaults.radar_alpha);
        }
        if !is_unit(self.contact_alpha) {
            log::warn!("contact_alpha {} out of range, clamping", self.contact_alpha);
            self.contact_alpha = clamp_unit(self.contact_alpha, defaults.contact_alpha);
        }
        if !(self.min_blip_size.is_finite() && self.min_blip_size >= 0.0) {
            log::warn!("min_blip_size {} out of range, using {}", self.min_blip_size, defaults.min_blip_size);
            self.min_blip_size = defaults.min_blip_size;
        }
        self
    }
}

fn is_unit(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}

/// NaN takes the fallback; anything else is clamped into 0..=1
fn clamp_unit(value: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

impl Default for RadarSettings {
    fn default() -> Self {
        Self {
            update_fps: 10.0,
            zoom_levels: 3,
            initial_zoom_level: 3,
            zoom_animation_duration: 0.4,
            max_sight_range: 4000.0,
            layout: RadarLayout::default(),
            max_contacts: 300,
            fog_of_war: true,
            excluded_types: Vec::new(),
            excluded_prefixes: Vec::new(),
            colors: ContactColors::default(),
            radar_alpha: 0.8,
            contact_alpha: 1.0,
            min_blip_size: 2.0,
            blip_segments: 8,
            range_rings: 2,
            ring_segments: 64,
            keys: RadarKeyBindings::default(),
        }
    }
}

impl Config for RadarSettings {}
