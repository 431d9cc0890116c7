//! Integration tests for the BrewService → BrewController → trigger-line
//! pipeline.

use crate::mock_hw::{MockHardware, PotScript, RecordingSink};

use coffeepot::app::commands::BrewCommand;
use coffeepot::app::service::BrewService;
use coffeepot::brew::BrewPhase;
use coffeepot::config::BrewConfig;
use coffeepot::error::{ActuationError, Error};

fn make_service(hw: &mut MockHardware) -> (BrewService, RecordingSink) {
    let mut sink = RecordingSink::new();
    let service = BrewService::new(BrewConfig::default(), hw, 0, &mut sink);
    (service, sink)
}

// ── Startup ──────────────────────────────────────────────────

#[test]
fn started_event_carries_initial_phase() {
    let mut hw = MockHardware::cold(PotScript::Dead);
    let (service, sink) = make_service(&mut hw);

    assert_eq!(service.controller().phase(), BrewPhase::Off);
    assert!(sink.saw("Started(Off)"));
    assert!(hw.writes.is_empty(), "startup must not press the button");
}

#[test]
fn startup_against_a_hot_pot_arms_keep_hot() {
    let mut hw = MockHardware::hot(PotScript::Dead);
    let (service, sink) = make_service(&mut hw);

    assert!(sink.saw("Started(BrewOnDemand)"));
    assert!(service.controller().power_off_deadline_ms().is_some());
    assert!(hw.writes.is_empty());
}

// ── The full §brew walk: 1 cup, 30 s keep-hot ────────────────

#[test]
fn single_cup_brew_runs_to_power_off() {
    let mut hw = MockHardware::cold(PotScript::LatchOnAfterPresses(1));
    let (mut service, mut sink) = make_service(&mut hw);

    // Start: latches on the first press.
    service
        .handle_command(
            BrewCommand::StartBrew {
                cups: 1,
                keep_hot_ms: 30_000,
            },
            &mut hw,
            &mut sink,
        )
        .unwrap();
    assert_eq!(hw.writes, vec![true], "one sustained press");
    assert!(sink.saw("BrewStarted"));

    // The hardware loop-back confirms: on-edge at t=0 arms the window.
    service.on_sense_edge(MockHardware::rising(0), &mut sink);
    assert!(sink.saw("PhaseChanged { from: Off, to: BrewOnDemand }"));
    assert!(service.controller().is_brewing());
    assert_eq!(service.controller().brew_deadline_ms(), Some(60_000));

    // Brew window holds until the deadline...
    service.tick(59_999, &mut hw, &mut sink);
    assert!(service.controller().is_brewing());
    assert!(!sink.saw("BrewFinished"));

    // ...then expires and hands over to keep-hot.
    service.tick(60_000, &mut hw, &mut sink);
    assert!(!service.controller().is_brewing());
    assert!(sink.saw("BrewFinished"));
    assert_eq!(service.controller().power_off_deadline_ms(), Some(90_000));

    // Keep-hot expires; the pot answers the off double-pulse.
    hw.writes.clear();
    hw.script = PotScript::LatchOffAfterPresses(hw.presses + 2);
    service.tick(90_000, &mut hw, &mut sink);

    assert!(sink.saw("KeepHotExpired"));
    assert_eq!(hw.writes, vec![true, false, true, false]);
    assert!(!hw.heating);
    assert_eq!(service.controller().power_off_deadline_ms(), None);
}

// ── Idempotent no-ops ────────────────────────────────────────

#[test]
fn start_brew_on_a_hot_pot_is_a_distinct_no_op() {
    let mut hw = MockHardware::hot(PotScript::Dead);
    let (mut service, mut sink) = make_service(&mut hw);

    service
        .handle_command(
            BrewCommand::StartBrew {
                cups: 4,
                keep_hot_ms: 10_000,
            },
            &mut hw,
            &mut sink,
        )
        .unwrap();

    assert!(sink.saw("AlreadyOn"));
    assert!(!sink.saw("BrewStarted"));
    assert!(hw.writes.is_empty());
}

#[test]
fn power_off_round_trip_then_no_op() {
    let mut hw = MockHardware::hot(PotScript::LatchOffAfterPresses(2));
    let (mut service, mut sink) = make_service(&mut hw);

    service
        .handle_command(BrewCommand::PowerOff, &mut hw, &mut sink)
        .unwrap();
    assert!(sink.saw("PoweredOff"));

    hw.writes.clear();
    service
        .handle_command(BrewCommand::PowerOff, &mut hw, &mut sink)
        .unwrap();
    assert!(sink.saw("AlreadyOff"));
    assert!(hw.writes.is_empty(), "second power-off must not press");
}

// ── Failure surfacing ────────────────────────────────────────

#[test]
fn start_failure_returns_error_and_emits_fault() {
    let mut hw = MockHardware::cold(PotScript::Dead);
    let (mut service, mut sink) = make_service(&mut hw);

    let err = service
        .handle_command(
            BrewCommand::StartBrew {
                cups: 1,
                keep_hot_ms: 0,
            },
            &mut hw,
            &mut sink,
        )
        .unwrap_err();

    assert_eq!(err, Error::Actuation(ActuationError::StartFailed));
    assert!(sink.saw("ActuationFailed(StartFailed)"));
    // Exactly the press-cycle length, then give up.
    assert_eq!(hw.writes, vec![true, true, true]);
}

#[test]
fn stop_failure_returns_error_and_emits_fault() {
    let mut hw = MockHardware::hot(PotScript::Dead);
    let (mut service, mut sink) = make_service(&mut hw);

    let err = service
        .handle_command(BrewCommand::PowerOff, &mut hw, &mut sink)
        .unwrap_err();

    assert_eq!(err, Error::Actuation(ActuationError::StopFailed));
    assert!(sink.saw("ActuationFailed(StopFailed)"));
    // Three attempts of two full pulses each.
    assert_eq!(hw.writes.len(), 12);
}

// ── Edge handling through the service ────────────────────────

#[test]
fn falling_edge_disarms_keep_hot_and_reports_phase() {
    let mut hw = MockHardware::hot(PotScript::Dead);
    let (mut service, mut sink) = make_service(&mut hw);
    assert!(service.controller().power_off_deadline_ms().is_some());

    // The human switched the pot off; the keep-hot expiry is stale.
    hw.set_heating(false);
    service.on_sense_edge(MockHardware::falling(5_000), &mut sink);

    assert!(sink.saw("PhaseChanged { from: BrewOnDemand, to: Off }"));
    assert_eq!(service.controller().power_off_deadline_ms(), None);
}

// ── Status and config ────────────────────────────────────────

#[test]
fn status_reports_remaining_windows() {
    let mut hw = MockHardware::cold(PotScript::LatchOnAfterPresses(1));
    let (mut service, mut sink) = make_service(&mut hw);

    service
        .handle_command(
            BrewCommand::StartBrew {
                cups: 2,
                keep_hot_ms: 5_000,
            },
            &mut hw,
            &mut sink,
        )
        .unwrap();
    service.on_sense_edge(MockHardware::rising(0), &mut sink);

    let status = service.status(30_000, &mut hw);
    assert_eq!(status.phase, BrewPhase::BrewOnDemand);
    assert!(status.is_heating);
    assert!(status.is_brewing);
    assert_eq!(status.brew_remaining_ms, Some(90_000));
    assert_eq!(status.keep_hot_remaining_ms, None);
}

#[test]
fn config_update_applies_to_the_next_brew() {
    let mut hw = MockHardware::cold(PotScript::LatchOnAfterPresses(1));
    let (mut service, mut sink) = make_service(&mut hw);

    let mut config = BrewConfig::default();
    config.brew_ms_per_cup = 1_000;
    service
        .handle_command(BrewCommand::UpdateConfig(config), &mut hw, &mut sink)
        .unwrap();

    service
        .handle_command(
            BrewCommand::StartBrew {
                cups: 2,
                keep_hot_ms: 0,
            },
            &mut hw,
            &mut sink,
        )
        .unwrap();
    service.on_sense_edge(MockHardware::rising(0), &mut sink);

    assert_eq!(service.controller().brew_deadline_ms(), Some(2_000));
}
