//! Radar input mapping
//!
//! Turns level-triggered key state into the edge-triggered [`RadarInput`]
//! events the controller expects: holding a key fires once.

use crate::radar::RadarInput;
use serde::{Deserialize, Serialize};

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Tab key
    Tab,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Minus key
    Minus,
    /// Equals key
    Equals,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Keys bound to the three radar actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarKeyBindings {
    /// Show or hide the radar
    pub toggle: KeyCode,
    /// Narrow the sight range
    pub zoom_in: KeyCode,
    /// Widen the sight range
    pub zoom_out: KeyCode,
}

impl Default for RadarKeyBindings {
    fn default() -> Self {
        Self {
            toggle: KeyCode::Tab,
            zoom_in: KeyCode::Equals,
            zoom_out: KeyCode::Minus,
        }
    }
}

/// Reports the rising edge of a boolean signal
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTrigger {
    held: bool,
}

impl EdgeTrigger {
    /// Feed the current state; `true` only on a released-to-pressed change
    pub fn update(&mut self, pressed: bool) -> bool {
        let fired = pressed && !self.held;
        self.held = pressed;
        fired
    }

    /// Whether the signal was high at the last update
    pub fn is_held(&self) -> bool {
        self.held
    }
}

/// Maps key state to radar input events
#[derive(Debug, Clone)]
pub struct RadarInputMapper {
    bindings: RadarKeyBindings,
    toggle: EdgeTrigger,
    zoom_in: EdgeTrigger,
    zoom_out: EdgeTrigger,
}

impl RadarInputMapper {
    /// Create a mapper for `bindings`
    pub fn new(bindings: RadarKeyBindings) -> Self {
        Self {
            bindings,
            toggle: EdgeTrigger::default(),
            zoom_in: EdgeTrigger::default(),
            zoom_out: EdgeTrigger::default(),
        }
    }

    /// Bindings in use
    pub fn bindings(&self) -> &RadarKeyBindings {
        &self.bindings
    }

    /// Replace the bindings, forgetting held keys
    pub fn set_bindings(&mut self, bindings: RadarKeyBindings) {
        *self = Self::new(bindings);
    }

    /// Sample polled key state once per tick
    ///
    /// `emit` receives events in toggle, zoom-in, zoom-out order.
    pub fn poll(&mut self, is_down: impl Fn(KeyCode) -> bool, mut emit: impl FnMut(RadarInput)) {
        if self.toggle.update(is_down(self.bindings.toggle)) {
            emit(RadarInput::Toggle);
        }
        if self.zoom_in.update(is_down(self.bindings.zoom_in)) {
            emit(RadarInput::ZoomIn);
        }
        if self.zoom_out.update(is_down(self.bindings.zoom_out)) {
            emit(RadarInput::ZoomOut);
        }
    }

    /// Handle a key event from an event-driven host
    ///
    /// OS key repeats arrive as further presses and are swallowed.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> Option<RadarInput> {
        let (trigger, input) = if key == self.bindings.toggle {
            (&mut self.toggle, RadarInput::Toggle)
        } else if key == self.bindings.zoom_in {
            (&mut self.zoom_in, RadarInput::ZoomIn)
        } else if key == self.bindings.zoom_out {
            (&mut self.zoom_out, RadarInput::ZoomOut)
        } else {
            return None;
        };
        trigger.update(pressed).then_some(input)
    }
}

impl Default for RadarInputMapper {
    fn default() -> Self {
        Self::new(RadarKeyBindings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_trigger_fires_once_per_press() {
        let mut trigger = EdgeTrigger::default();
        let fired: Vec<bool> = [true, true, true, false, true].into_iter().map(|p| trigger.update(p)).collect();
        assert_eq!(fired, vec![true, false, false, false, true]);
    }

    #[test]
    fn test_poll_holding_key_emits_once() {
        let mut mapper = RadarInputMapper::default();
        let mut events = Vec::new();

        for _ in 0..5 {
            mapper.poll(|key| key == KeyCode::Equals, |input| events.push(input));
        }
        mapper.poll(|_| false, |input| events.push(input));
        mapper.poll(|key| key == KeyCode::Equals || key == KeyCode::Tab, |input| events.push(input));

        assert_eq!(events, vec![RadarInput::ZoomIn, RadarInput::Toggle, RadarInput::ZoomIn]);
    }

    #[test]
    fn test_handle_key_swallows_repeats() {
        let mut mapper = RadarInputMapper::new(RadarKeyBindings {
            toggle: KeyCode::R,
            zoom_in: KeyCode::PageUp,
            zoom_out: KeyCode::PageDown,
        });

        assert_eq!(mapper.handle_key(KeyCode::PageDown, true), Some(RadarInput::ZoomOut));
        assert_eq!(mapper.handle_key(KeyCode::PageDown, true), None);
        assert_eq!(mapper.handle_key(KeyCode::PageDown, false), None);
        assert_eq!(mapper.handle_key(KeyCode::PageDown, true), Some(RadarInput::ZoomOut));
        assert_eq!(mapper.handle_key(KeyCode::Q, true), None);
        assert_eq!(mapper.handle_key(KeyCode::R, true), Some(RadarInput::Toggle));
    }

    #[test]
    fn test_bindings_from_toml() {
        let bindings: RadarKeyBindings = toml::from_str("toggle = \"M\"").unwrap();
        assert_eq!(bindings.toggle, KeyCode::M);
        assert_eq!(bindings.zoom_in, KeyCode::Equals);
    }
}
