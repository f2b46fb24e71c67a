//! Built-in radar renderers

mod blips;
mod ring;

pub use blips::ContactBlipRenderer;
pub use ring::RadarRingRenderer;
