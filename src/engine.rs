//! Light curve state machine.
//!
//! Provides [`LightCurveEngine`], which decides the brightness and warmth of the
//! lamp for a given wall-clock instant. Phase membership is recomputed from
//! absolute timestamps on every call, so the engine can be sampled at any
//! cadence, skip ticks, or see the same instant twice.
//!
//! A cycle around an occurrence `T` looks like this:
//!
//! ```text
//!   idle | fade-in     | steady      | hold             | fade-out | idle
//!        T - fade_in   T             T + steady         T + fade_in + steady
//! ```
//!
//! During the hold the previous ratios are kept unchanged. Fade-out also starts
//! whenever the alarm is disabled while the light is on.

use crate::schedule::AlarmState;
use crate::types::{ChannelDuty, LightRatios, Phase, PhaseConfig};
use time::{Duration, PrimitiveDateTime};

/// Backwards clock jumps up to this size are treated as jitter, not regressions.
pub const CLOCK_JITTER: Duration = Duration::seconds(2);

/// Warmth for a given brightness along the sunrise curve.
///
/// Cubic, so the light stays warm for most of the ramp and turns cool quickly
/// near full brightness.
#[inline]
pub fn warmth_for(brightness: f64) -> f64 {
    1.0 - brightness * brightness * brightness
}

/// Computes per-tick brightness and warmth from the alarm state and wall clock.
#[derive(Debug, Clone)]
pub struct LightCurveEngine {
    phases: PhaseConfig,
    brightness_ratio: f64,
    warmth_ratio: f64,
    is_fading_out: bool,
    fade_out_started_at: Option<PrimitiveDateTime>,
    fade_out_from: f64,
    phase: Phase,
    last_seen: Option<PrimitiveDateTime>,
    last_regression: Option<Duration>,
}

impl LightCurveEngine {
    /// Creates an idle engine with the light off.
    pub fn new(phases: PhaseConfig) -> Self {
        Self {
            phases,
            brightness_ratio: LightRatios::OFF.brightness,
            warmth_ratio: LightRatios::OFF.warmth,
            is_fading_out: false,
            fade_out_started_at: None,
            fade_out_from: 0.0,
            phase: Phase::Idle,
            last_seen: None,
            last_regression: None,
        }
    }

    /// Advances the curve to `now` and returns the resulting ratios.
    ///
    /// Calling this repeatedly with the same arguments yields the same result.
    pub fn advance(&mut self, now: PrimitiveDateTime, alarm: &AlarmState) -> LightRatios {
        self.observe_clock(now);

        let occurrence = alarm.next_occurrence();
        let fade_in_start = occurrence.saturating_sub(self.phases.fade_in());
        let steady_end = occurrence.saturating_add(self.phases.steady());
        let cycle_end = occurrence.saturating_add(self.phases.active_span());
        let due = alarm.is_enabled() && now >= fade_in_start && now < cycle_end;

        let phase = if !due {
            self.wind_down(now)
        } else if now >= steady_end {
            // Past steady but still due: keep the previous ratios.
            self.phase
        } else if now < occurrence {
            let remaining = (occurrence - now).as_seconds_f64();
            let window = self.phases.fade_in().as_seconds_f64();
            self.cancel_fade_out();
            self.set_brightness(1.0 - remaining / window);
            Phase::FadeIn
        } else {
            self.cancel_fade_out();
            self.brightness_ratio = LightRatios::FULL.brightness;
            self.warmth_ratio = LightRatios::FULL.warmth;
            Phase::Steady
        };

        self.enter(phase);
        self.ratios()
    }

    fn wind_down(&mut self, now: PrimitiveDateTime) -> Phase {
        if !self.is_fading_out && self.brightness_ratio > 0.0 {
            self.begin_fade_out(now);
        }

        let Some(started) = self.fade_out_started_at.filter(|_| self.is_fading_out) else {
            self.turn_off();
            return Phase::Idle;
        };

        if now < started {
            // Clock went back past the stamp: hold the current level and fade from here.
            self.begin_fade_out(now);
            return Phase::FadeOut;
        }

        let elapsed = now - started;
        let fade_out = self.phases.fade_out();
        if elapsed < fade_out {
            let progress = elapsed.as_seconds_f64() / fade_out.as_seconds_f64();
            self.set_brightness(self.fade_out_from * (1.0 - progress));
            Phase::FadeOut
        } else {
            self.cancel_fade_out();
            self.turn_off();
            Phase::Idle
        }
    }

    fn begin_fade_out(&mut self, now: PrimitiveDateTime) {
        self.is_fading_out = true;
        self.fade_out_started_at = Some(now);
        self.fade_out_from = self.brightness_ratio;
    }

    fn cancel_fade_out(&mut self) {
        self.is_fading_out = false;
        self.fade_out_started_at = None;
    }

    fn turn_off(&mut self) {
        self.brightness_ratio = LightRatios::OFF.brightness;
        self.warmth_ratio = LightRatios::OFF.warmth;
    }

    fn set_brightness(&mut self, brightness: f64) {
        self.brightness_ratio = brightness.clamp(0.0, 1.0);
        self.warmth_ratio = warmth_for(self.brightness_ratio).clamp(0.0, 1.0);
    }

    fn observe_clock(&mut self, now: PrimitiveDateTime) {
        self.last_regression = None;

        if let Some(last) = self.last_seen {
            let went_back = last - now;
            if went_back > CLOCK_JITTER {
                #[cfg(feature = "defmt")]
                defmt::warn!("wall clock went back {} s", went_back.whole_seconds());
                self.last_regression = Some(went_back);
            }
        }

        self.last_seen = Some(now);
    }

    fn enter(&mut self, phase: Phase) {
        if phase != self.phase {
            #[cfg(feature = "defmt")]
            defmt::debug!("light phase {} -> {}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Replaces the phase durations. Takes effect on the next call to [`advance`](Self::advance).
    pub fn set_phases(&mut self, phases: PhaseConfig) {
        self.phases = phases;
    }

    /// Returns the active phase durations.
    pub fn phases(&self) -> PhaseConfig {
        self.phases
    }

    /// Returns the phase determined by the last call to [`advance`](Self::advance).
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the current brightness and warmth.
    pub fn ratios(&self) -> LightRatios {
        LightRatios {
            brightness: self.brightness_ratio,
            warmth: self.warmth_ratio,
        }
    }

    /// Returns the current brightness, 0.0-1.0.
    pub fn brightness_ratio(&self) -> f64 {
        self.brightness_ratio
    }

    /// Returns the current warmth, 0.0-1.0.
    pub fn warmth_ratio(&self) -> f64 {
        self.warmth_ratio
    }

    /// Returns the gamma-corrected duty values for the current ratios.
    pub fn duty(&self) -> ChannelDuty {
        ChannelDuty::from_ratios(&self.ratios())
    }

    /// Returns true while a fade-out is in progress.
    pub fn is_fading_out(&self) -> bool {
        self.is_fading_out
    }

    /// Returns when the current fade-out started, if one is in progress.
    pub fn fade_out_started_at(&self) -> Option<PrimitiveDateTime> {
        self.fade_out_started_at
    }

    /// Returns how far the clock jumped back on the last tick, if beyond [`CLOCK_JITTER`].
    pub fn last_regression(&self) -> Option<Duration> {
        self.last_regression
    }
}

impl Default for LightCurveEngine {
    fn default() -> Self {
        Self::new(PhaseConfig::default())
    }
}
