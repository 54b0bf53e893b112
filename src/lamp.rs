//! Top-level sunrise lamp with alarm state, light curve and hardware output.
//!
//! Provides [`SunriseLamp`], which owns the PWM output and the alarm state,
//! borrows a wall clock, and drives the [`LightCurveEngine`] once per
//! [`service`](SunriseLamp::service) call. Also defines the [`DutySink`] trait
//! for hardware abstraction.

use crate::clock::WallClock;
use crate::colors::emitted_color;
use crate::command::LampAction;
use crate::engine::LightCurveEngine;
use crate::schedule::{AlarmState, AlarmTarget};
use crate::types::{ChannelDuty, ConfigError, LightRatios, Phase, PhaseConfig};
use palette::Srgb;
use time::{Duration, PrimitiveDateTime};

/// Trait for abstracting the two-channel LED hardware.
///
/// Implement this for your PWM peripheral (timer channels, LED driver IC,
/// etc.). Handle any hardware errors internally - this method cannot fail.
pub trait DutySink {
    /// Applies 8-bit duty values to the cool and warm white channels.
    fn set_duty(&mut self, duty: ChannelDuty);
}

/// Timing hint returned by [`SunriseLamp::service`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceTiming {
    /// A fade is in progress. Service again at your desired update rate.
    ///
    /// A few times per second is plenty for an 8-bit output.
    Continuous,

    /// The output holds steady. Service again after the specified delay.
    ///
    /// Returned while waiting for the next fade-in and while the light holds at
    /// full brightness.
    Delay(Duration),

    /// Alarm disabled and light off. Nothing changes until the next action.
    Dormant,
}

/// A sunrise lamp driving a cool and a warm white channel.
///
/// # Type Parameters
/// * `'c` - Lifetime of the wall-clock reference
/// * `C` - Wall-clock implementation type
/// * `S` - PWM output implementation type
pub struct SunriseLamp<'c, C: WallClock, S: DutySink> {
    sink: S,
    clock: &'c C,
    alarm: AlarmState,
    engine: LightCurveEngine,
    duty: ChannelDuty,
}

impl<'c, C: WallClock, S: DutySink> SunriseLamp<'c, C, S> {
    /// Creates a lamp with the output turned off.
    pub fn new(
        mut sink: S,
        clock: &'c C,
        target: AlarmTarget,
        enabled: bool,
        phases: PhaseConfig,
    ) -> Self {
        sink.set_duty(ChannelDuty::OFF);

        Self {
            sink,
            clock,
            alarm: AlarmState::new(target, enabled, clock.now()),
            engine: LightCurveEngine::new(phases),
            duty: ChannelDuty::OFF,
        }
    }

    /// Applies a configuration change.
    ///
    /// On error nothing is changed.
    pub fn handle_action(&mut self, action: LampAction) -> Result<(), ConfigError> {
        let now = self.clock.now();

        match action {
            LampAction::Enable => self.alarm.set_enabled(true, now),
            LampAction::Disable => self.alarm.set_enabled(false, now),
            LampAction::Toggle => self.alarm.toggle(now),
            LampAction::SetTarget { hour, minute } => {
                let target = AlarmTarget::new(hour, minute)?;
                self.alarm.set_target(target, now);
            }
            LampAction::SetPhases(phases) => self.engine.set_phases(phases),
        }

        #[cfg(feature = "defmt")]
        defmt::info!(
            "alarm {}:{} enabled={}",
            self.alarm.target().hour(),
            self.alarm.target().minute(),
            self.alarm.is_enabled()
        );

        Ok(())
    }

    /// Samples the clock, advances the light curve and updates the output.
    ///
    /// Duty values are written to the sink only when they change.
    pub fn service(&mut self) -> ServiceTiming {
        let now = self.clock.now();

        self.alarm.roll_forward(now, self.engine.phases().active_span());
        let ratios = self.engine.advance(now, &self.alarm);

        let duty = ChannelDuty::from(ratios);
        if duty != self.duty {
            self.sink.set_duty(duty);
            self.duty = duty;
        }

        self.timing(now)
    }

    fn timing(&self, now: PrimitiveDateTime) -> ServiceTiming {
        let phases = self.engine.phases();
        let occurrence = self.alarm.next_occurrence();
        let fade_in_start = occurrence.saturating_sub(phases.fade_in());
        let cycle_end = occurrence.saturating_add(phases.active_span());

        let boundary = match self.engine.phase() {
            Phase::FadeIn | Phase::FadeOut => return ServiceTiming::Continuous,
            Phase::Steady => cycle_end,
            // Started up during the hold: stay dark until the cycle ends.
            Phase::Idle if self.alarm.is_enabled() && now >= fade_in_start => cycle_end,
            Phase::Idle if self.alarm.is_enabled() => fade_in_start,
            Phase::Idle => return ServiceTiming::Dormant,
        };

        let delay = boundary - now;
        if delay.is_positive() {
            ServiceTiming::Delay(delay)
        } else {
            ServiceTiming::Continuous
        }
    }

    /// Returns the alarm state.
    pub fn alarm(&self) -> &AlarmState {
        &self.alarm
    }

    /// Returns the light curve engine.
    pub fn engine(&self) -> &LightCurveEngine {
        &self.engine
    }

    /// Returns the output hardware.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    /// Returns the current brightness and warmth.
    pub fn ratios(&self) -> LightRatios {
        self.engine.ratios()
    }

    /// Returns the duty values last written to the output.
    pub fn current_duty(&self) -> ChannelDuty {
        self.duty
    }

    /// Returns the approximate color currently emitted.
    pub fn current_color(&self) -> Srgb {
        emitted_color(&self.engine.ratios())
    }

    /// Returns the time left until the alarm fires, or `None` if disabled.
    pub fn time_until_alarm(&self) -> Option<Duration> {
        self.alarm
            .is_enabled()
            .then(|| self.alarm.target().time_until(self.clock.now()))
    }
}
