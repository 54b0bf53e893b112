//! Approximate color of the light the lamp emits.
//!
//! Useful for mirroring the lamp on an RGB status LED or a preview display.
//! The two channel colors are nominal white points, not measured LED spectra.

use crate::types::LightRatios;
use palette::{Mix, Srgb};

/// Nominal cool white channel, roughly 6500 K.
pub const COOL_WHITE: Srgb = Srgb::new(1.0, 0.976, 0.992);

/// Nominal warm white channel, roughly 2700 K.
pub const WARM_WHITE: Srgb = Srgb::new(1.0, 0.663, 0.341);

/// Both channels off.
pub const LAMP_OFF: Srgb = Srgb::new(0.0, 0.0, 0.0);

/// Blends the channel white points by warmth and scales by brightness.
pub fn emitted_color(ratios: &LightRatios) -> Srgb {
    let brightness = ratios.brightness.clamp(0.0, 1.0) as f32;
    let warmth = ratios.warmth.clamp(0.0, 1.0) as f32;

    let white = COOL_WHITE.mix(WARM_WHITE, warmth);
    Srgb::new(
        white.red * brightness,
        white.green * brightness,
        white.blue * brightness,
    )
}
