//! Time management utilities

/// Lowest update rate accepted; smaller or non-finite rates are clamped to it
pub const MIN_UPDATE_FPS: f32 = 0.1;

/// Accumulator that decides which render ticks are update frames
///
/// Elapsed time is accumulated every tick. Once it reaches the update period
/// the tick is an update frame and the accumulator keeps only its phase
/// within the period: whole missed periods are discarded, so a long hitch
/// yields a single update frame instead of a burst, and steady frame times
/// do not drift.
#[derive(Debug, Clone)]
pub struct UpdateTimer {
    period: f32,
    accumulated: f32,
    pending: bool,
    update_count: u64,
}

impl UpdateTimer {
    /// Create a timer firing `fps` times per second
    ///
    /// The first call to [`advance`](Self::advance) is always an update frame.
    pub fn from_fps(fps: f32) -> Self {
        Self {
            period: Self::period_for(fps),
            accumulated: 0.0,
            pending: true,
            update_count: 0,
        }
    }

    fn period_for(fps: f32) -> f32 {
        let fps = if fps.is_finite() { fps.max(MIN_UPDATE_FPS) } else { MIN_UPDATE_FPS };
        1.0 / fps
    }

    /// Change the update rate, keeping accumulated time
    pub fn set_fps(&mut self, fps: f32) {
        self.period = Self::period_for(fps);
        self.accumulated = self.accumulated.min(self.period);
    }

    /// Force the next [`advance`](Self::advance) to be an update frame
    pub fn request_update(&mut self) {
        self.pending = true;
    }

    /// Whether an update has been requested and not yet consumed
    pub fn is_update_pending(&self) -> bool {
        self.pending
    }

    /// Advance by `delta_time` seconds, returning whether this is an update frame
    pub fn advance(&mut self, delta_time: f32) -> bool {
        // Negative, NaN and infinite deltas count as no time passing
        if delta_time.is_finite() && delta_time > 0.0 {
            self.accumulated += delta_time;
        }

        if self.pending {
            self.pending = false;
            self.accumulated = 0.0;
            self.update_count += 1;
            return true;
        }

        if self.accumulated >= self.period {
            self.accumulated = (self.accumulated - self.period) % self.period;
            self.update_count += 1;
            true
        } else {
            false
        }
    }

    /// Seconds between update frames
    pub fn period(&self) -> f32 {
        self.period
    }

    /// Time accumulated toward the next update frame
    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }

    /// Number of update frames fired so far
    pub fn update_count(&self) -> u64 {
        self.update_count
    }
}

impl Default for UpdateTimer {
    fn default() -> Self {
        Self::from_fps(10.0)
    }
}
