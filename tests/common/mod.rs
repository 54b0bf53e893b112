//! Shared test infrastructure for sunrise-light integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use sunrise_light::{ChannelDuty, DutySink, Duration, PrimitiveDateTime, WallClock};

// ============================================================================
// Mock Wall Clock
// ============================================================================

/// Mock wall clock with controllable time
pub struct MockClock {
    current_time: core::cell::Cell<PrimitiveDateTime>,
}

impl MockClock {
    pub fn new(start: PrimitiveDateTime) -> Self {
        Self {
            current_time: core::cell::Cell::new(start),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: Duration) {
        let current = self.current_time.get();
        self.current_time.set(current + duration);
    }

    pub fn set_time(&self, time: PrimitiveDateTime) {
        self.current_time.set(time);
    }
}

impl WallClock for MockClock {
    fn now(&self) -> PrimitiveDateTime {
        self.current_time.get()
    }
}

// ============================================================================
// Mock PWM Output
// ============================================================================

/// Mock PWM output that records every duty write
pub struct MockPwm {
    current: ChannelDuty,
    history: heapless::Vec<ChannelDuty, 64>,
}

impl MockPwm {
    pub fn new() -> Self {
        Self {
            current: ChannelDuty::OFF,
            history: heapless::Vec::new(),
        }
    }

    pub fn last_duty(&self) -> ChannelDuty {
        self.current
    }

    pub fn history(&self) -> &[ChannelDuty] {
        &self.history
    }
}

impl DutySink for MockPwm {
    fn set_duty(&mut self, duty: ChannelDuty) {
        self.current = duty;
        let _ = self.history.push(duty);
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Compare two ratios with floating-point tolerance
pub fn approx_eq(a: f64, b: f64) -> bool {
    const EPSILON: f64 = 1e-9;
    (a - b).abs() < EPSILON
}
