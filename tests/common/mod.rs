//! Shared test utilities and fixtures
//!
//! Study builders and tick drivers for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use fairwalk_core::{AvatarId, FixedClock, Study};
use fairwalk_types::{
    OptionId, Scenario, ScenarioCatalog, ScenarioId, ScenarioKind, Street, StreetWidth,
    StudySettings,
};

/// One 60 Hz frame.
pub const FRAME: Duration = Duration::from_micros(16_667);

/// Generous upper bound on frames for one full scenario (walk, dwell, walk back, settle).
pub const SCENARIO_FRAME_LIMIT: usize = 2_000;

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub fn scenario_id(id: u32) -> ScenarioId {
    ScenarioId::new(id).unwrap()
}

/// Scenario 1: color green/red. Scenario 2: street narrow/wide.
pub fn two_scenario_catalog() -> ScenarioCatalog {
    ScenarioCatalog::new(vec![
        Scenario::new(
            scenario_id(1),
            "Choose a stand",
            ScenarioKind::ColorChoice {
                colors: [OptionId::from_static("green"), OptionId::from_static("red")],
            },
        ),
        Scenario::new(
            scenario_id(2),
            "Which path would you take?",
            ScenarioKind::StreetWidth {
                left_street: Street {
                    width: StreetWidth::Narrow,
                },
                right_street: Street {
                    width: StreetWidth::Wide,
                },
            },
        ),
    ])
    .unwrap()
}

pub fn new_study(catalog: ScenarioCatalog) -> Study {
    Study::new(
        catalog,
        StudySettings::default(),
        Box::new(FixedClock::new(fixed_time())),
    )
}

/// A study that has been registered, given an avatar, and begun.
pub fn playing_study(catalog: ScenarioCatalog) -> Study {
    let mut study = new_study(catalog);
    study.register(json!({ "name": "Ada", "age": 31 })).unwrap();
    study.select_avatar(AvatarId::new("explorer")).unwrap();
    study.begin().unwrap();
    study
}

/// Tick until `done` holds, panicking after `limit` frames.
pub fn tick_until(study: &mut Study, limit: usize, done: impl Fn(&Study) -> bool) -> usize {
    for frame in 0..limit {
        if done(study) {
            return frame;
        }
        study.tick(FRAME);
    }
    assert!(done(study), "condition not reached within {limit} frames");
    limit
}

/// Tick until the scenario index moves past `index` or the study completes.
pub fn finish_scenario(study: &mut Study, index: usize) {
    tick_until(study, SCENARIO_FRAME_LIMIT, |s| {
        s.session().current_index() > index || s.session().is_complete()
    });
}

pub fn tick_for(study: &mut Study, frames: usize) {
    for _ in 0..frames {
        study.tick(FRAME);
    }
}
