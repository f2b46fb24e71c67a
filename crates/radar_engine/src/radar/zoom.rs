//! Zoom state machine
//!
//! Level 0 is disabled; levels `1..=N` are enabled, level `N` showing the
//! full sight range. The intended zoom fraction is `level / N` and the
//! current fraction moves toward it at a constant rate.

/// Discrete zoom level plus its animated fraction
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomState {
    levels: u32,
    level: u32,
    last_enabled_level: u32,
    current_fraction: f32,
    intended_fraction: f32,
}

impl ZoomState {
    /// Create a state with `levels` enabled levels starting at `initial_level`
    ///
    /// `levels` is clamped to at least 1 and `initial_level` to `0..=levels`.
    /// The current fraction starts at its target, without animation.
    pub fn new(levels: u32, initial_level: u32) -> Self {
        let levels = levels.max(1);
        let level = initial_level.min(levels);
        let last_enabled_level = if level == 0 { levels } else { level };
        let fraction = last_enabled_level as f32 / levels as f32;

        Self {
            levels,
            level,
            last_enabled_level,
            current_fraction: fraction,
            intended_fraction: fraction,
        }
    }

    /// Number of enabled levels (N)
    pub fn levels(&self) -> u32 {
        self.levels
    }

    /// Selected level, 0 when disabled
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Whether the radar is shown
    pub fn is_enabled(&self) -> bool {
        self.level != 0
    }

    /// Animated fraction of the full sight range, in `(0, 1]`
    pub fn current_fraction(&self) -> f32 {
        self.current_fraction
    }

    /// Fraction the animation is heading toward
    pub fn intended_fraction(&self) -> f32 {
        self.intended_fraction
    }

    /// Whether the current fraction has reached its target
    pub fn is_settled(&self) -> bool {
        self.current_fraction == self.intended_fraction
    }

    /// Magnification relative to the widest level, in `[1, N]`
    pub fn magnification(&self) -> f32 {
        1.0 / self.current_fraction
    }

    fn select(&mut self, level: u32) {
        self.level = level;
        if level != 0 {
            self.last_enabled_level = level;
            self.intended_fraction = level as f32 / self.levels as f32;
        }
    }

    /// Flip between disabled and the last enabled level
    pub fn toggle(&mut self) {
        if self.is_enabled() {
            self.level = 0;
        } else {
            self.select(self.last_enabled_level);
        }
    }

    /// Step one level closer, wrapping from 1 to N
    ///
    /// Returns `false` and does nothing while disabled.
    pub fn zoom_in(&mut self) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let next = if self.level <= 1 { self.levels } else { self.level - 1 };
        self.select(next);
        true
    }

    /// Step one level wider, wrapping from N to 1
    ///
    /// Returns `false` and does nothing while disabled.
    pub fn zoom_out(&mut self) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let next = if self.level >= self.levels { 1 } else { self.level + 1 };
        self.select(next);
        true
    }

    /// Change the level count, keeping the selected level where possible
    pub fn set_levels(&mut self, levels: u32) {
        let levels = levels.max(1);
        if levels == self.levels {
            return;
        }
        self.levels = levels;
        self.last_enabled_level = self.last_enabled_level.min(levels);
        if self.is_enabled() {
            self.select(self.level.min(levels));
        } else {
            self.intended_fraction = self.last_enabled_level as f32 / levels as f32;
        }
    }

    /// Move the current fraction toward its target
    ///
    /// The fraction covers the full `0..1` range in `duration` seconds and
    /// lands exactly on the target instead of passing it. A non-positive
    /// duration snaps immediately.
    pub fn advance(&mut self, delta_time: f32, duration: f32) {
        let remaining = self.intended_fraction - self.current_fraction;
        if remaining == 0.0 {
            return;
        }
        if duration <= 0.0 || !duration.is_finite() {
            self.current_fraction = self.intended_fraction;
            return;
        }

        let step = delta_time.max(0.0) / duration;
        if remaining.abs() <= step {
            self.current_fraction = self.intended_fraction;
        } else {
            self.current_fraction += step.copysign(remaining);
        }
    }
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::new(3, 3)
    }
}
