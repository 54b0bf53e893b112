//! Perceptual mapping from linear ratios to 8-bit PWM duty cycles.
//!
//! LEDs respond linearly to duty cycle while the eye does not, so every ratio is
//! passed through a gamma curve before it reaches the hardware.

/// Standard display gamma used for both LED channels.
pub const GAMMA: f64 = 2.2;

/// Largest reading of the 10-bit ADC used for brightness potentiometers.
pub const ANALOG_MAX: u16 = 1023;

/// Applies gamma correction to a linear ratio.
///
/// The ratio is clamped to 0.0-1.0 first. Zero (and NaN) map to exactly 0.0
/// without going through `pow`. `gamma` must be positive and finite; any other
/// value falls back to [`GAMMA`].
#[inline]
pub fn gamma_corrected_ratio(ratio: f64, gamma: f64) -> f64 {
    if ratio.is_nan() || ratio <= 0.0 {
        return 0.0;
    }
    let gamma = if gamma.is_finite() && gamma > 0.0 {
        gamma
    } else {
        GAMMA
    };
    libm::pow(ratio.min(1.0), gamma)
}

/// Converts a linear ratio to a duty cycle using [`GAMMA`].
#[inline]
pub fn duty_from_ratio(ratio: f64) -> u8 {
    duty_from_ratio_with_gamma(ratio, GAMMA)
}

/// Converts a linear ratio to a duty cycle using a custom gamma.
///
/// Computes `round(255 × ratio^gamma)`. The result is monotonically
/// non-decreasing in `ratio`, `0.0` maps to `0` and `1.0` maps to `255`.
/// A gamma that is not positive and finite is replaced by [`GAMMA`].
pub fn duty_from_ratio_with_gamma(ratio: f64, gamma: f64) -> u8 {
    let corrected = gamma_corrected_ratio(ratio, gamma);
    libm::round(255.0 * corrected) as u8
}

/// Converts a raw 10-bit ADC reading to a linear ratio.
///
/// Readings above [`ANALOG_MAX`] are clamped.
#[inline]
pub fn ratio_from_analog(raw: u16) -> f64 {
    f64::from(raw.min(ANALOG_MAX)) / f64::from(ANALOG_MAX)
}

/// Converts a raw 10-bit ADC reading straight to a gamma-corrected duty cycle.
#[inline]
pub fn duty_from_analog(raw: u16) -> u8 {
    duty_from_ratio(ratio_from_analog(raw))
}
