//! Core value types shared by the schedule, the engine and the lamp.

use crate::curve::duty_from_ratio;
use time::Duration;

/// The phase a sunrise cycle is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Light is off.
    Idle,
    /// Brightness ramping up towards the alarm time.
    FadeIn,
    /// Full brightness, coolest white.
    Steady,
    /// Brightness ramping down after the cycle ended or the alarm was disabled.
    FadeOut,
}

/// Brightness and warmth computed for one tick, both in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRatios {
    /// Overall light output, 0.0 (off) to 1.0 (full).
    pub brightness: f64,
    /// Blend between the channels, 0.0 (coolest) to 1.0 (warmest).
    pub warmth: f64,
}

impl LightRatios {
    /// Light off, warmest blend.
    pub const OFF: Self = Self {
        brightness: 0.0,
        warmth: 1.0,
    };

    /// Full brightness, coolest blend.
    pub const FULL: Self = Self {
        brightness: 1.0,
        warmth: 0.0,
    };

    /// Creates ratios, clamping both values to 0.0-1.0.
    pub fn new(brightness: f64, warmth: f64) -> Self {
        Self {
            brightness: brightness.clamp(0.0, 1.0),
            warmth: warmth.clamp(0.0, 1.0),
        }
    }

    /// Linear output of the cool white channel.
    #[inline]
    pub fn cool_ratio(&self) -> f64 {
        self.brightness * (1.0 - self.warmth)
    }

    /// Linear output of the warm white channel.
    #[inline]
    pub fn warm_ratio(&self) -> f64 {
        self.brightness * self.warmth
    }
}

/// Gamma-corrected 8-bit duty values for both LED channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelDuty {
    /// Cool white channel duty.
    pub cool: u8,
    /// Warm white channel duty.
    pub warm: u8,
}

impl ChannelDuty {
    /// Both channels off.
    pub const OFF: Self = Self { cool: 0, warm: 0 };

    /// Derives both channel duties from brightness and warmth.
    pub fn from_ratios(ratios: &LightRatios) -> Self {
        Self {
            cool: duty_from_ratio(ratios.cool_ratio()),
            warm: duty_from_ratio(ratios.warm_ratio()),
        }
    }
}

impl From<LightRatios> for ChannelDuty {
    fn from(ratios: LightRatios) -> Self {
        Self::from_ratios(&ratios)
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Alarm hour outside 0-23.
    InvalidHour(u8),

    /// Alarm minute outside 0-59.
    InvalidMinute(u8),

    /// A phase duration is negative.
    NegativeDuration {
        /// Name of the offending phase.
        phase: &'static str,
    },

    /// A phase duration is zero.
    ZeroDuration {
        /// Name of the offending phase.
        phase: &'static str,
    },

    /// The active cycle (fade-in, steady and hold) lasts a day or longer, so daily
    /// cycles would overlap.
    CycleTooLong,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidHour(hour) => {
                write!(f, "alarm hour {} out of range (0-23)", hour)
            }
            ConfigError::InvalidMinute(minute) => {
                write!(f, "alarm minute {} out of range (0-59)", minute)
            }
            ConfigError::NegativeDuration { phase } => {
                write!(f, "{} duration must not be negative", phase)
            }
            ConfigError::ZeroDuration { phase } => {
                write!(f, "{} duration must not be zero", phase)
            }
            ConfigError::CycleTooLong => {
                write!(f, "alarm cycle must be shorter than a day")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Durations of the three active phases of a sunrise cycle.
///
/// Always valid: construct through [`PhaseConfig::builder`] or use the default
/// (20 min fade-in, 20 min steady, 10 s fade-out).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseConfig {
    fade_in: Duration,
    steady: Duration,
    fade_out: Duration,
}

impl PhaseConfig {
    /// Default fade-in duration.
    pub const DEFAULT_FADE_IN: Duration = Duration::minutes(20);
    /// Default steady duration.
    pub const DEFAULT_STEADY: Duration = Duration::minutes(20);
    /// Default fade-out duration.
    pub const DEFAULT_FADE_OUT: Duration = Duration::seconds(10);

    /// Creates a builder seeded with the default durations.
    pub fn builder() -> PhaseConfigBuilder {
        PhaseConfigBuilder::new()
    }

    /// Ramp-up time before the alarm.
    pub fn fade_in(&self) -> Duration {
        self.fade_in
    }

    /// Full-brightness time after the alarm.
    pub fn steady(&self) -> Duration {
        self.steady
    }

    /// Ramp-down time once the light is no longer due.
    pub fn fade_out(&self) -> Duration {
        self.fade_out
    }

    /// Time after the alarm during which the light is still due.
    ///
    /// Covers steady plus a hold of one fade-in length at full brightness.
    pub fn active_span(&self) -> Duration {
        self.fade_in.saturating_add(self.steady)
    }
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            fade_in: Self::DEFAULT_FADE_IN,
            steady: Self::DEFAULT_STEADY,
            fade_out: Self::DEFAULT_FADE_OUT,
        }
    }
}

/// Builder for validated phase configurations.
#[derive(Debug, Clone, Copy)]
pub struct PhaseConfigBuilder {
    fade_in: Duration,
    steady: Duration,
    fade_out: Duration,
}

impl PhaseConfigBuilder {
    /// Creates a builder seeded with the default durations.
    pub fn new() -> Self {
        Self {
            fade_in: PhaseConfig::DEFAULT_FADE_IN,
            steady: PhaseConfig::DEFAULT_STEADY,
            fade_out: PhaseConfig::DEFAULT_FADE_OUT,
        }
    }

    /// Sets the fade-in duration.
    pub fn fade_in(mut self, duration: Duration) -> Self {
        self.fade_in = duration;
        self
    }

    /// Sets the steady duration.
    pub fn steady(mut self, duration: Duration) -> Self {
        self.steady = duration;
        self
    }

    /// Sets the fade-out duration.
    pub fn fade_out(mut self, duration: Duration) -> Self {
        self.fade_out = duration;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// * `NegativeDuration` - A duration is negative
    /// * `ZeroDuration` - A duration is zero
    /// * `CycleTooLong` - Twice the fade-in plus steady is a day or longer
    pub fn build(self) -> Result<PhaseConfig, ConfigError> {
        let phases = [
            ("fade-in", self.fade_in),
            ("steady", self.steady),
            ("fade-out", self.fade_out),
        ];

        for (phase, duration) in phases {
            if duration.is_negative() {
                return Err(ConfigError::NegativeDuration { phase });
            }
            if duration.is_zero() {
                return Err(ConfigError::ZeroDuration { phase });
            }
        }

        let cycle = self
            .fade_in
            .saturating_add(self.fade_in)
            .saturating_add(self.steady);
        if cycle >= Duration::DAY {
            return Err(ConfigError::CycleTooLong);
        }

        Ok(PhaseConfig {
            fade_in: self.fade_in,
            steady: self.steady,
            fade_out: self.fade_out,
        })
    }
}

impl Default for PhaseConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
