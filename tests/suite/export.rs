//! Session export shape, reset semantics, and persistence.

use fairwalk_core::SessionExport;
use fairwalk_types::Stage;
use fairwalk_utils::{export_file_name, write_export};

use crate::common::{finish_scenario, new_study, playing_study, two_scenario_catalog};

#[test]
fn export_json_has_documented_keys() {
    let mut study = playing_study(two_scenario_catalog());
    study.select_option_at_anchor("red");

    let value = serde_json::to_value(study.export()).unwrap();
    let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(
        keys,
        [
            "avatarSelection",
            "choices",
            "exportTimestamp",
            "participantId",
            "userInfo"
        ]
    );

    let record = &value["choices"][0];
    assert_eq!(record["scenarioId"], 1);
    assert_eq!(record["choice"], "red");
    assert_eq!(record["decisionLatencyMs"], 0);
    assert_eq!(record["timestamp"], "2025-06-01T12:00:00.000Z");
    assert_eq!(value["userInfo"]["age"], 31);
    assert_eq!(value["avatarSelection"], "explorer");
}

#[test]
fn export_is_available_at_every_stage() {
    let study = new_study(two_scenario_catalog());
    let export = study.export();
    assert!(export.user_info.is_none());
    assert!(export.avatar_selection.is_none());
    assert!(export.choices.is_empty());
}

#[test]
fn reset_then_export_is_empty_with_new_participant() {
    let mut study = playing_study(two_scenario_catalog());
    study.select_option_at_anchor("red");
    finish_scenario(&mut study, 0);
    let before = study.export();

    let receipt = study.reset();
    assert_eq!(receipt.from(), Stage::Playing);
    assert_eq!(study.stage(), Stage::Registration);

    let after = study.export();
    assert!(after.choices.is_empty());
    assert_ne!(after.participant_id, before.participant_id);
    assert!(after.user_info.is_none());
    assert_eq!(study.session().current_index(), 0);
}

#[test]
fn completed_export_round_trips_through_disk() {
    let mut study = playing_study(two_scenario_catalog());
    study.select_option_at_anchor("red");
    finish_scenario(&mut study, 0);
    study.select_option_at_anchor("wide");
    finish_scenario(&mut study, 1);
    let export = study.export();

    let dir = tempfile::tempdir().unwrap();
    let path = write_export(dir.path(), &export.participant_id, &export).unwrap();
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some(export_file_name(&export.participant_id).as_str())
    );

    let text = std::fs::read_to_string(&path).unwrap();
    let restored: SessionExport = serde_json::from_str(&text).unwrap();
    assert_eq!(restored, export);
    assert_eq!(
        restored.summary_lines(),
        ["Scenario 1: red (0.0s)", "Scenario 2: wide (0.0s)"]
    );
}
