#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`AlarmTarget`**: A validated daily time of day (hour and minute)
//! - **`AlarmState`**: Enabled flag, target and the concrete next occurrence
//! - **`PhaseConfig`**: Fade-in, steady and fade-out durations
//! - **`LightCurveEngine`**: Decides brightness and warmth for any wall-clock instant
//! - **`LightRatios`**: Brightness and warmth in the 0.0-1.0 range
//! - **`ChannelDuty`**: Gamma-corrected 8-bit duty values for the cool and warm channels
//! - **`SunriseLamp`**: Ties the alarm, the engine, a clock and the output together
//! - **`DutySink`**: Trait to implement for your PWM hardware
//! - **`WallClock`**: Trait to implement for your real-time clock
//! - **`LampAction`**: Configuration changes applied between ticks
//!
//! Wall-clock instants are `time::PrimitiveDateTime`; durations are `time::Duration`.

pub use time::{Duration, PrimitiveDateTime};

pub mod clock;
pub mod colors;
pub mod command;
pub mod curve;
pub mod engine;
pub mod lamp;
pub mod schedule;
pub mod types;

pub use clock::WallClock;
pub use command::LampAction;
pub use curve::{GAMMA, duty_from_ratio};
pub use engine::{CLOCK_JITTER, LightCurveEngine};
pub use lamp::{DutySink, ServiceTiming, SunriseLamp};
pub use schedule::{AlarmState, AlarmTarget};
pub use types::{ChannelDuty, ConfigError, LightRatios, Phase, PhaseConfig, PhaseConfigBuilder};
