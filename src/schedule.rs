//! Daily alarm schedule.
//!
//! Turns a recurring time-of-day target into concrete wall-clock occurrences and
//! tracks the occurrence the light curve is currently working towards.

use crate::types::ConfigError;
use time::{Duration, PrimitiveDateTime, Time};

/// A recurring daily alarm time with no date component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmTarget {
    hour: u8,
    minute: u8,
}

impl AlarmTarget {
    /// Creates a target, validating hour (0-23) and minute (0-59).
    pub fn new(hour: u8, minute: u8) -> Result<Self, ConfigError> {
        if hour > 23 {
            return Err(ConfigError::InvalidHour(hour));
        }
        if minute > 59 {
            return Err(ConfigError::InvalidMinute(minute));
        }
        Ok(Self { hour, minute })
    }

    /// Hour of day, 0-23.
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute of hour, 0-59.
    pub fn minute(&self) -> u8 {
        self.minute
    }

    fn since_midnight(&self) -> Duration {
        Duration::hours(i64::from(self.hour)) + Duration::minutes(i64::from(self.minute))
    }

    /// Returns the next instant the wall clock reads `hour:minute:00`.
    ///
    /// Compared at minute granularity: once `now` has reached the target
    /// minute (any second) the alarm counts as fired and the occurrence rolls
    /// to the following day. Month and year boundaries are normalized by the
    /// calendar arithmetic.
    pub fn next_occurrence(&self, now: PrimitiveDateTime) -> PrimitiveDateTime {
        let passed = (self.hour, self.minute) <= (now.hour(), now.minute());

        let mut offset = self.since_midnight();
        if passed {
            offset += Duration::DAY;
        }

        now.replace_time(Time::MIDNIGHT).saturating_add(offset)
    }

    /// Time remaining until [`next_occurrence`](Self::next_occurrence). Never negative.
    pub fn time_until(&self, now: PrimitiveDateTime) -> Duration {
        let remaining = self.next_occurrence(now) - now;
        if remaining.is_negative() {
            Duration::ZERO
        } else {
            remaining
        }
    }
}

impl Default for AlarmTarget {
    /// 07:00.
    fn default() -> Self {
        Self { hour: 7, minute: 0 }
    }
}

/// Enabled flag, target and the occurrence currently scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmState {
    enabled: bool,
    target: AlarmTarget,
    next_occurrence: PrimitiveDateTime,
}

impl AlarmState {
    /// Creates a state with the occurrence derived from `now`.
    pub fn new(target: AlarmTarget, enabled: bool, now: PrimitiveDateTime) -> Self {
        Self {
            enabled,
            target,
            next_occurrence: target.next_occurrence(now),
        }
    }

    /// Returns true if the alarm is armed.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the configured time of day.
    pub fn target(&self) -> AlarmTarget {
        self.target
    }

    /// Returns the occurrence the light is scheduled around.
    pub fn next_occurrence(&self) -> PrimitiveDateTime {
        self.next_occurrence
    }

    /// Arms or disarms the alarm.
    ///
    /// Arming re-derives the occurrence from `now`, so a stale occurrence
    /// from before the alarm was disarmed never fires.
    pub fn set_enabled(&mut self, enabled: bool, now: PrimitiveDateTime) {
        if enabled && !self.enabled {
            self.next_occurrence = self.target.next_occurrence(now);
        }
        self.enabled = enabled;
    }

    /// Flips the enabled flag.
    pub fn toggle(&mut self, now: PrimitiveDateTime) {
        self.set_enabled(!self.enabled, now);
    }

    /// Replaces the target and re-derives the occurrence from `now`.
    pub fn set_target(&mut self, target: AlarmTarget, now: PrimitiveDateTime) {
        self.target = target;
        self.next_occurrence = target.next_occurrence(now);
    }

    /// Moves to the following occurrence once `active_span` past the current one
    /// has elapsed.
    ///
    /// Returns true if the occurrence changed.
    pub fn roll_forward(&mut self, now: PrimitiveDateTime, active_span: Duration) -> bool {
        if now < self.next_occurrence.saturating_add(active_span) {
            return false;
        }

        self.next_occurrence = self.target.next_occurrence(now);
        true
    }
}
