//! Integration tests for SunriseLamp

mod common;
use common::*;

use palette::Srgb;
use sunrise_light::colors::COOL_WHITE;
use sunrise_light::{
    AlarmTarget, ChannelDuty, ConfigError, Duration, LampAction, Phase, PhaseConfig,
    ServiceTiming, SunriseLamp,
};
use time::macros::datetime;

fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.001;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}

fn seven_oclock() -> AlarmTarget {
    AlarmTarget::new(7, 0).unwrap()
}

#[test]
fn new_lamp_writes_off_to_hardware() {
    let clock = MockClock::new(datetime!(2024-03-10 22:00));
    let lamp = SunriseLamp::new(
        MockPwm::new(),
        &clock,
        seven_oclock(),
        true,
        PhaseConfig::default(),
    );

    assert_eq!(lamp.sink().history(), &[ChannelDuty::OFF]);
    assert_eq!(lamp.current_duty(), ChannelDuty::OFF);
    assert_eq!(lamp.alarm().next_occurrence(), datetime!(2024-03-11 07:00));
}

#[test]
fn full_cycle_walks_through_every_phase() {
    let clock = MockClock::new(datetime!(2024-03-10 06:30));
    let mut lamp = SunriseLamp::new(
        MockPwm::new(),
        &clock,
        seven_oclock(),
        true,
        PhaseConfig::default(),
    );

    assert_eq!(lamp.service(), ServiceTiming::Delay(Duration::minutes(10)));
    assert_eq!(lamp.phase(), Phase::Idle);

    clock.set_time(datetime!(2024-03-10 06:50));
    assert_eq!(lamp.service(), ServiceTiming::Continuous);
    assert_eq!(lamp.phase(), Phase::FadeIn);
    assert_eq!(lamp.current_duty(), ChannelDuty::from(lamp.ratios()));
    assert!(lamp.current_duty().warm > lamp.current_duty().cool);

    clock.set_time(datetime!(2024-03-10 07:00));
    assert_eq!(lamp.service(), ServiceTiming::Delay(Duration::minutes(40)));
    assert_eq!(lamp.phase(), Phase::Steady);
    assert_eq!(lamp.current_duty(), ChannelDuty { cool: 255, warm: 0 });

    clock.set_time(datetime!(2024-03-10 07:25));
    assert_eq!(lamp.service(), ServiceTiming::Delay(Duration::minutes(15)));
    assert_eq!(lamp.current_duty(), ChannelDuty { cool: 255, warm: 0 });

    clock.set_time(datetime!(2024-03-10 07:40));
    assert_eq!(lamp.service(), ServiceTiming::Continuous);
    assert_eq!(lamp.phase(), Phase::FadeOut);
    assert_eq!(lamp.alarm().next_occurrence(), datetime!(2024-03-11 07:00));

    clock.advance(Duration::seconds(10));
    let timing = lamp.service();
    assert_eq!(lamp.phase(), Phase::Idle);
    assert_eq!(lamp.current_duty(), ChannelDuty::OFF);
    assert_eq!(
        timing,
        ServiceTiming::Delay(Duration::hours(22) + Duration::minutes(59) + Duration::seconds(50))
    );
}

#[test]
fn occurrence_is_kept_until_cycle_end() {
    let clock = MockClock::new(datetime!(2024-03-10 06:00));
    let mut lamp = SunriseLamp::new(
        MockPwm::new(),
        &clock,
        seven_oclock(),
        true,
        PhaseConfig::default(),
    );

    for now in [
        datetime!(2024-03-10 07:10),
        datetime!(2024-03-10 07:20),
        datetime!(2024-03-10 07:39:59),
    ] {
        clock.set_time(now);
        lamp.service();
        assert_eq!(lamp.alarm().next_occurrence(), datetime!(2024-03-10 07:00));
        assert_eq!(lamp.current_duty(), ChannelDuty { cool: 255, warm: 0 });
        assert!(!lamp.engine().is_fading_out());
    }
    assert_eq!(lamp.sink().history().len(), 2);

    clock.set_time(datetime!(2024-03-10 07:40));
    lamp.service();
    assert_eq!(lamp.alarm().next_occurrence(), datetime!(2024-03-11 07:00));
    assert!(lamp.engine().is_fading_out());
}

#[test]
fn starting_up_during_hold_waits_for_cycle_end() {
    let clock = MockClock::new(datetime!(2024-03-10 06:30));
    let mut lamp = SunriseLamp::new(
        MockPwm::new(),
        &clock,
        seven_oclock(),
        true,
        PhaseConfig::default(),
    );

    clock.set_time(datetime!(2024-03-10 07:30));
    assert_eq!(lamp.service(), ServiceTiming::Delay(Duration::minutes(10)));
    assert_eq!(lamp.phase(), Phase::Idle);
    assert_eq!(lamp.current_duty(), ChannelDuty::OFF);
}

#[test]
fn output_is_written_only_when_duty_changes() {
    let clock = MockClock::new(datetime!(2024-03-10 07:05));
    let mut lamp = SunriseLamp::new(
        MockPwm::new(),
        &clock,
        seven_oclock(),
        false,
        PhaseConfig::default(),
    );
    lamp.handle_action(LampAction::Enable).unwrap();
    // Enabled after the alarm minute: next occurrence is tomorrow.
    assert_eq!(lamp.alarm().next_occurrence(), datetime!(2024-03-11 07:00));

    for _ in 0..5 {
        lamp.service();
    }
    assert_eq!(lamp.sink().history().len(), 1);

    clock.set_time(datetime!(2024-03-11 07:01));
    for _ in 0..5 {
        lamp.service();
    }
    assert_eq!(lamp.sink().history().len(), 2);
    assert_eq!(lamp.sink().last_duty(), ChannelDuty { cool: 255, warm: 0 });
}

#[test]
fn disabling_during_steady_fades_out_then_goes_dormant() {
    let clock = MockClock::new(datetime!(2024-03-10 06:00));
    let mut lamp = SunriseLamp::new(
        MockPwm::new(),
        &clock,
        seven_oclock(),
        true,
        PhaseConfig::default(),
    );

    clock.set_time(datetime!(2024-03-10 07:05));
    lamp.service();
    assert_eq!(lamp.phase(), Phase::Steady);

    lamp.handle_action(LampAction::Disable).unwrap();
    assert_eq!(lamp.service(), ServiceTiming::Continuous);
    assert_eq!(lamp.phase(), Phase::FadeOut);
    assert!(lamp.engine().is_fading_out());

    clock.advance(Duration::seconds(5));
    lamp.service();
    let mid = lamp.current_duty();
    assert!(mid.cool < 255);
    assert!(mid.warm > 0);

    clock.advance(Duration::seconds(5));
    assert_eq!(lamp.service(), ServiceTiming::Dormant);
    assert_eq!(lamp.current_duty(), ChannelDuty::OFF);
    assert_eq!(lamp.time_until_alarm(), None);
}

#[test]
fn toggle_arms_alarm_and_reports_time_until() {
    let clock = MockClock::new(datetime!(2024-03-10 23:30));
    let mut lamp = SunriseLamp::new(
        MockPwm::new(),
        &clock,
        seven_oclock(),
        false,
        PhaseConfig::default(),
    );
    assert_eq!(lamp.service(), ServiceTiming::Dormant);
    assert_eq!(lamp.time_until_alarm(), None);

    lamp.handle_action(LampAction::Toggle).unwrap();
    assert!(lamp.alarm().is_enabled());
    assert_eq!(
        lamp.time_until_alarm(),
        Some(Duration::hours(7) + Duration::minutes(30))
    );
}

#[test]
fn set_target_moves_cycle() {
    let clock = MockClock::new(datetime!(2024-03-10 22:00));
    let mut lamp = SunriseLamp::new(
        MockPwm::new(),
        &clock,
        seven_oclock(),
        true,
        PhaseConfig::default(),
    );

    lamp.handle_action(LampAction::SetTarget {
        hour: 22,
        minute: 30,
    })
    .unwrap();
    assert_eq!(lamp.alarm().next_occurrence(), datetime!(2024-03-10 22:30));

    clock.set_time(datetime!(2024-03-10 22:15));
    assert_eq!(lamp.service(), ServiceTiming::Continuous);
    assert_eq!(lamp.phase(), Phase::FadeIn);
    assert!(approx_eq(lamp.ratios().brightness, 0.25));
}

#[test]
fn invalid_actions_are_rejected_without_side_effects() {
    let clock = MockClock::new(datetime!(2024-03-10 22:00));
    let mut lamp = SunriseLamp::new(
        MockPwm::new(),
        &clock,
        seven_oclock(),
        true,
        PhaseConfig::default(),
    );

    let result = lamp.handle_action(LampAction::SetTarget {
        hour: 7,
        minute: 75,
    });
    assert_eq!(result, Err(ConfigError::InvalidMinute(75)));
    assert_eq!(lamp.alarm().target(), seven_oclock());
    assert_eq!(lamp.alarm().next_occurrence(), datetime!(2024-03-11 07:00));
}

#[test]
fn set_phases_widens_fade_in_window() {
    let clock = MockClock::new(datetime!(2024-03-10 06:30));
    let mut lamp = SunriseLamp::new(
        MockPwm::new(),
        &clock,
        seven_oclock(),
        true,
        PhaseConfig::default(),
    );
    lamp.service();
    assert_eq!(lamp.phase(), Phase::Idle);

    let phases = PhaseConfig::builder()
        .fade_in(Duration::hours(1))
        .build()
        .unwrap();
    lamp.handle_action(LampAction::SetPhases(phases)).unwrap();

    assert_eq!(lamp.service(), ServiceTiming::Continuous);
    assert_eq!(lamp.phase(), Phase::FadeIn);
    assert!(approx_eq(lamp.ratios().brightness, 0.5));
}

#[test]
fn steady_light_is_cool_white() {
    let clock = MockClock::new(datetime!(2024-03-10 06:00));
    let mut lamp = SunriseLamp::new(
        MockPwm::new(),
        &clock,
        seven_oclock(),
        true,
        PhaseConfig::default(),
    );

    clock.set_time(datetime!(2024-03-10 07:10));
    lamp.service();
    assert!(colors_equal(lamp.current_color(), COOL_WHITE));
}

#[test]
fn sparse_servicing_still_reaches_steady_and_rolls_over() {
    let clock = MockClock::new(datetime!(2024-03-31 20:00));
    let mut lamp = SunriseLamp::new(
        MockPwm::new(),
        &clock,
        seven_oclock(),
        true,
        PhaseConfig::default(),
    );

    // One sample in the middle of steady, then nothing until the afternoon.
    clock.set_time(datetime!(2024-04-01 07:10));
    lamp.service();
    assert_eq!(lamp.phase(), Phase::Steady);

    clock.set_time(datetime!(2024-04-01 15:00));
    lamp.service();
    assert_eq!(lamp.phase(), Phase::FadeOut);
    assert_eq!(lamp.alarm().next_occurrence(), datetime!(2024-04-02 07:00));

    clock.advance(Duration::seconds(10));
    lamp.service();
    assert_eq!(lamp.phase(), Phase::Idle);
}
