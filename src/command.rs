//! Command-based configuration for the lamp.

use crate::types::PhaseConfig;

/// Configuration changes applied to a lamp between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LampAction {
    /// Arm the alarm.
    Enable,
    /// Disarm the alarm. A lit lamp fades out.
    Disable,
    /// Flip the armed flag.
    Toggle,
    /// Change the alarm time. Validated before anything is applied.
    SetTarget {
        /// Hour of day, 0-23.
        hour: u8,
        /// Minute of hour, 0-59.
        minute: u8,
    },
    /// Replace the phase durations.
    SetPhases(PhaseConfig),
}
