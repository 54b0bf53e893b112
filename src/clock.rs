//! Wall-clock abstraction for platform-agnostic timekeeping.

use time::PrimitiveDateTime;

/// Trait for abstracting wall-clock sources (RTC chips, GPS, host clocks).
///
/// Readings should be non-decreasing apart from legitimate corrections. The
/// light curve recomputes everything from absolute timestamps, so a reading
/// that jumps backwards is tolerated.
pub trait WallClock {
    /// Returns the current local date and time.
    fn now(&self) -> PrimitiveDateTime;
}

