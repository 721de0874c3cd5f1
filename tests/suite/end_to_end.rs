//! Full study runs through the public `Study` API.

use fairwalk_core::{NavPhase, SelectionOutcome, StudyEvent, option_anchor};
use fairwalk_types::{GroundPoint, ScenarioCatalog, ScenarioType, Side, Stage};

use crate::common::{
    SCENARIO_FRAME_LIMIT, finish_scenario, playing_study, tick_until, two_scenario_catalog,
};

#[test]
fn two_scenario_run_records_choices_in_order() {
    let mut study = playing_study(two_scenario_catalog());

    assert!(study.select_option_at_anchor("red").is_accepted());
    let records = study.export().choices;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].choice, "red");

    finish_scenario(&mut study, 0);
    assert_eq!(study.session().current_index(), 1);
    assert_eq!(study.stage(), Stage::Playing);

    assert!(study.select_option_at_anchor("wide").is_accepted());
    finish_scenario(&mut study, 1);

    assert_eq!(study.stage(), Stage::Complete);
    let choices: Vec<_> = study
        .export()
        .choices
        .iter()
        .map(|record| (record.scenario_id.value(), record.choice.to_string()))
        .collect();
    assert_eq!(choices, [(1, "red".to_string()), (2, "wide".to_string())]);
}

#[test]
fn default_study_yields_one_record_per_scenario() {
    let mut study = playing_study(ScenarioCatalog::default_study());
    let total = study.session().catalog().len();

    for index in 0..total {
        let [left, right] = study.view().scenario.expect("scenario").options();
        assert!(study.select_option_at_anchor(left.as_str()).is_accepted());
        // Hammer the other option while the avatar is still walking.
        for _ in 0..5 {
            study.tick(crate::common::FRAME);
            assert!(!study.select_option_at_anchor(right.as_str()).is_accepted());
        }
        finish_scenario(&mut study, index);
    }

    assert!(study.session().is_complete());
    let export = study.export();
    assert_eq!(export.choices.len(), total);
    let ids: Vec<u32> = export.choices.iter().map(|c| c.scenario_id.value()).collect();
    assert_eq!(ids, (1..=8).collect::<Vec<_>>());
}

#[test]
fn events_follow_the_scenario_lifecycle() {
    let mut study = playing_study(two_scenario_catalog());
    let opening: Vec<_> = study.drain_events();
    assert!(matches!(
        opening.last(),
        Some(StudyEvent::ScenarioPresented { index: 0, .. })
    ));

    study.select_option("red", [3.5, 0.0, 0.0]);
    finish_scenario(&mut study, 0);

    let labels: Vec<_> = study.drain_events().iter().map(StudyEvent::label).collect();
    assert_eq!(
        labels,
        [
            "choice-accepted",
            "arrived-at-option",
            "departed-for-home",
            "arrived-home",
            "advance-requested",
            "scenario-presented",
        ]
    );
}

#[test]
fn carnival_choice_walks_to_the_queue_tail() {
    let mut study = playing_study(ScenarioCatalog::default_study());
    for index in 0..5 {
        let [left, _] = study.view().scenario.expect("scenario").options();
        study.select_option_at_anchor(left.as_str());
        finish_scenario(&mut study, index);
    }
    let scenario = study.view().scenario.expect("carnival scenario");
    assert_eq!(scenario.scenario_type(), ScenarioType::CarnivalAttractions);
    study.drain_events();

    let anchor = option_anchor(ScenarioType::CarnivalAttractions, Side::Left);
    let outcome = study.select_option("ferris-wheel", anchor);
    let SelectionOutcome::Accepted { destination, .. } = outcome else {
        panic!("ferris wheel should be accepted, got {outcome:?}");
    };
    // Queue of 12: 2.0 + (6 * 0.7 + 1.0) + 1.0
    assert_eq!(destination.x, -5.0);
    assert!((destination.z - 8.2).abs() < 1e-9);

    tick_until(&mut study, SCENARIO_FRAME_LIMIT, |s| {
        s.navigator().phase() == NavPhase::Arrived
    });
    let arrived_at = study.drain_events().into_iter().find_map(|event| match event {
        StudyEvent::ArrivedAtOption { position } => Some(position),
        _ => None,
    });
    let arrived_at = arrived_at.expect("arrival event");
    assert!(arrived_at.distance_to(GroundPoint::new(-5.0, 8.2)) < 1e-9);
}

#[test]
fn view_tracks_avatar_through_a_scenario() {
    let mut study = playing_study(two_scenario_catalog());
    let home = study.view().avatar.position;

    study.select_option_at_anchor("green");
    assert!(study.view().is_decided());
    tick_until(&mut study, SCENARIO_FRAME_LIMIT, |s| {
        s.view().avatar.phase == NavPhase::Arrived
    });
    let view = study.view();
    assert_eq!(view.avatar.position.x, -3.5);
    assert_eq!(view.avatar.position.z, 1.5);
    assert_eq!(view.option_anchors.map(|a| a[0].x), Some(-3.5));

    finish_scenario(&mut study, 0);
    let view = study.view();
    assert_eq!(view.avatar.position, home);
    assert!(!view.is_decided());
    assert_eq!(view.progress_label(), "2 / 2");
}
