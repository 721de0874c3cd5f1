//! Duplicate selections and duplicate transitions are absorbed, never queued.

use fairwalk_core::{NavPhase, SelectionOutcome};
use fairwalk_types::Stage;

use crate::common::{
    SCENARIO_FRAME_LIMIT, finish_scenario, new_study, playing_study, tick_for, tick_until,
    two_scenario_catalog,
};

#[test]
fn double_click_before_any_tick_records_once() {
    let mut study = playing_study(two_scenario_catalog());

    let first = study.select_option("red", [3.5, 0.0, 0.0]);
    let second = study.select_option("red", [3.5, 0.0, 0.0]);

    assert!(first.is_accepted());
    assert_eq!(second, SelectionOutcome::AlreadyDecided);
    assert_eq!(study.export().choices.len(), 1);
}

#[test]
fn repeated_clicks_across_every_phase_record_once() {
    let mut study = playing_study(two_scenario_catalog());
    study.select_option_at_anchor("green");

    let mut seen_phases = Vec::new();
    tick_until(&mut study, SCENARIO_FRAME_LIMIT, |s| {
        s.session().current_index() == 1
    });
    // Click both options on every frame of scenario 2.
    for _ in 0..SCENARIO_FRAME_LIMIT {
        let phase = study.navigator().phase();
        if seen_phases.last() != Some(&phase) {
            seen_phases.push(phase);
        }
        study.select_option_at_anchor("narrow");
        study.select_option_at_anchor("wide");
        study.tick(crate::common::FRAME);
        if study.session().is_complete() {
            break;
        }
    }

    assert!(study.session().is_complete());
    assert_eq!(
        seen_phases,
        [
            NavPhase::Idle,
            NavPhase::WalkingToTarget,
            NavPhase::Arrived,
            NavPhase::WalkingBack,
            NavPhase::Idle,
        ]
    );
    let choices: Vec<_> = study
        .export()
        .choices
        .iter()
        .map(|c| c.choice.to_string())
        .collect();
    assert_eq!(choices, ["green", "narrow"]);
}

#[test]
fn each_scenario_advances_exactly_once() {
    let mut study = playing_study(two_scenario_catalog());
    study.select_option_at_anchor("red");
    finish_scenario(&mut study, 0);
    assert_eq!(study.session().current_index(), 1);

    // Idle on scenario 2 well past dwell and settle: nothing else moves.
    tick_for(&mut study, 600);
    assert_eq!(study.session().current_index(), 1);
    assert_eq!(study.stage(), Stage::Playing);
    assert!(!study.is_transition_locked());
}

#[test]
fn guard_stays_locked_after_completion() {
    let mut study = playing_study(two_scenario_catalog());
    study.select_option_at_anchor("red");
    finish_scenario(&mut study, 0);
    study.select_option_at_anchor("wide");
    finish_scenario(&mut study, 1);

    assert!(study.session().is_complete());
    assert!(study.is_transition_locked());
    tick_for(&mut study, 600);
    assert!(study.session().is_complete());
    assert_eq!(study.session().current_index(), 1);
    assert_eq!(
        study.select_option_at_anchor("narrow"),
        SelectionOutcome::NotPlaying
    );
    assert_eq!(study.export().choices.len(), 2);
}

#[test]
fn unknown_option_does_not_decide_the_scenario() {
    let mut study = playing_study(two_scenario_catalog());
    assert_eq!(
        study.select_option("purple", [0.0, 0.0, 0.0]),
        SelectionOutcome::UnknownOption
    );
    assert!(!study.view().is_decided());
    assert!(study.select_option_at_anchor("green").is_accepted());
}

#[test]
fn stage_actions_out_of_order_are_rejected() {
    let mut study = new_study(two_scenario_catalog());
    let err = study.begin().unwrap_err();
    assert_eq!(err.from, Stage::Registration);
    assert_eq!(study.stage(), Stage::Registration);
    assert!(err.to_string().contains("registration"));
}

#[test]
fn non_finite_click_position_cannot_stall_the_study() {
    let mut study = playing_study(two_scenario_catalog());
    assert_eq!(
        study.select_option("green", [f64::NAN, 0.0, 0.0]),
        SelectionOutcome::InvalidPosition
    );
    tick_for(&mut study, 50);
    assert!(!study.view().is_decided());
    assert_eq!(study.navigator().phase(), NavPhase::Idle);

    assert!(study.select_option_at_anchor("green").is_accepted());
    finish_scenario(&mut study, 0);
    assert_eq!(study.session().current_index(), 1);
    assert_eq!(study.export().choices.len(), 1);
}
