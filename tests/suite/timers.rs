//! Scheduled work never outlives the scenario or session that scheduled it.

use std::time::Duration;

use serde_json::json;

use fairwalk_core::{
    AvatarId, AvatarNavigator, Destination, NavPhase, Scheduler, StudyEvent, TimerKind,
};
use fairwalk_types::{Epoch, GroundPoint, NavigationSettings, Stage};

use crate::common::{
    FRAME, SCENARIO_FRAME_LIMIT, playing_study, tick_for, tick_until, two_scenario_catalog,
};

#[test]
fn reset_during_dwell_cancels_the_return_trip() {
    let mut study = playing_study(two_scenario_catalog());
    study.select_option_at_anchor("red");
    tick_until(&mut study, SCENARIO_FRAME_LIMIT, |s| {
        s.navigator().phase() == NavPhase::Arrived
    });
    assert_eq!(study.pending_timers(), 1);

    study.reset();
    study.drain_events();
    tick_for(&mut study, 400);

    assert_eq!(study.stage(), Stage::Registration);
    assert_eq!(study.navigator().phase(), NavPhase::Idle);
    assert!(
        !study
            .drain_events()
            .iter()
            .any(|e| matches!(e, StudyEvent::DepartedForHome))
    );
}

#[test]
fn reset_during_settle_never_advances_the_new_session() {
    let mut study = playing_study(two_scenario_catalog());
    study.select_option_at_anchor("red");
    tick_until(&mut study, SCENARIO_FRAME_LIMIT, |s| s.is_transition_locked());
    assert_eq!(study.pending_timers(), 1);

    study.reset();
    study.register(json!({ "name": "Grace" })).unwrap();
    study.select_avatar(AvatarId::new("walker")).unwrap();
    study.begin().unwrap();
    tick_for(&mut study, 100);

    assert_eq!(study.session().current_index(), 0);
    assert!(study.export().choices.is_empty());
    assert!(!study.is_transition_locked());
}

#[test]
fn timers_from_an_old_epoch_are_reported_stale() {
    let mut scheduler = Scheduler::new();
    let old = Epoch::new(1);
    let current = old.next();

    scheduler.schedule(Duration::from_millis(100), old, TimerKind::Settle);
    scheduler.schedule(Duration::from_millis(100), current, TimerKind::Dwell);

    let fired = scheduler.advance(Duration::from_millis(100));
    let live: Vec<_> = fired.iter().filter(|t| t.epoch == current).collect();
    assert_eq!(fired.len(), 2);
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].kind, TimerKind::Dwell);

    scheduler.schedule(Duration::from_millis(50), old, TimerKind::Settle);
    assert_eq!(scheduler.cancel_stale(current), 1);
    assert!(scheduler.advance(Duration::from_secs(1)).is_empty());
}

#[test]
fn dwell_and_settle_are_honoured_in_simulated_time() {
    let mut study = playing_study(two_scenario_catalog());
    let timing = study.timing();
    study.select_option_at_anchor("red");

    tick_until(&mut study, SCENARIO_FRAME_LIMIT, |s| {
        s.navigator().phase() == NavPhase::Arrived
    });
    let arrived = study.elapsed();
    tick_until(&mut study, SCENARIO_FRAME_LIMIT, |s| {
        s.navigator().phase() == NavPhase::WalkingBack
    });
    let departed = study.elapsed();
    assert!(departed - arrived >= timing.dwell);
    assert!(departed - arrived < timing.dwell + FRAME * 2);

    tick_until(&mut study, SCENARIO_FRAME_LIMIT, |s| s.is_transition_locked());
    let home = study.elapsed();
    tick_until(&mut study, SCENARIO_FRAME_LIMIT, |s| {
        s.session().current_index() == 1
    });
    assert!(study.elapsed() - home >= timing.settle);
}

#[test]
fn navigation_takes_distance_over_stride_ticks() {
    let settings = NavigationSettings::default();
    let dt = Duration::from_millis(100);
    let target = GroundPoint::new(3.5, 1.5);
    let distance = settings.home().distance_to(target);
    let expected = (distance / (settings.speed() * dt.as_secs_f64())).ceil() as usize;

    let mut nav = AvatarNavigator::new(settings);
    nav.move_to(Destination::Point(target));
    let mut ticks: usize = 0;
    let mut arrivals = 0;
    for _ in 0..1_000 {
        ticks += 1;
        if nav.step(dt).is_some() {
            arrivals += 1;
            break;
        }
    }
    assert_eq!(arrivals, 1);
    assert!(ticks.abs_diff(expected) <= 1, "{ticks} vs {expected}");
    assert!((0..100).all(|_| nav.step(dt).is_none()));
}
