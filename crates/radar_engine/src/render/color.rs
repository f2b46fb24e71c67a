//! Vertex colors

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 8-bit RGBA color, laid out for direct upload as a vertex attribute
///
/// Serialized as a `[r, g, b, a]` array.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba8 {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha scaled by `alpha_mult` (clamped to 0..=1)
    pub fn with_alpha_mult(self, alpha_mult: f32) -> Self {
        let mult = if alpha_mult.is_nan() { 0.0 } else { alpha_mult.clamp(0.0, 1.0) };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let a = (f32::from(self.a) * mult).round() as u8;
        Self { a, ..self }
    }

    /// Channels as normalized floats
    pub fn to_f32(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        ]
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(color: Rgba8) -> Self {
        [color.r, color.g, color.b, color.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_mult() {
        let color = Rgba8::new(10, 20, 30, 200);
        assert_eq!(color.with_alpha_mult(0.5), Rgba8::new(10, 20, 30, 100));
        assert_eq!(color.with_alpha_mult(2.0), color);
        assert_eq!(color.with_alpha_mult(-1.0).a, 0);
        assert_eq!(color.with_alpha_mult(f32::NAN).a, 0);
    }

    #[test]
    fn test_to_f32() {
        assert_eq!(Rgba8::WHITE.to_f32(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(Rgba8::TRANSPARENT.to_f32(), [0.0, 0.0, 0.0, 0.0]);
    }
}
