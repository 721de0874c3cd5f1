//! Default world anchors for the two options of each scenario type.
//!
//! A renderer supplies real option positions with every click; hosts without one
//! (the headless runner, tests) click at these anchors instead.

use fairwalk_types::{ScenarioType, Side, WorldPosition};

/// `(|x|, z)` of the option pair; the left option sits at `-x`.
const fn anchor_offsets(scenario_type: ScenarioType) -> (f64, f64) {
    match scenario_type {
        ScenarioType::ColorChoice | ScenarioType::CrowdInfluence | ScenarioType::AnimatedCrowd => {
            (3.5, 0.0)
        }
        ScenarioType::CarnivalAttractions => (5.0, -2.0),
        ScenarioType::StreetWidth => (5.0, 0.0),
        ScenarioType::ChristmasLights => (5.5, 0.0),
    }
}

#[must_use]
pub fn option_anchor(scenario_type: ScenarioType, side: Side) -> WorldPosition {
    let (x, z) = anchor_offsets(scenario_type);
    match side {
        Side::Left => WorldPosition::new(-x, 0.0, z),
        Side::Right => WorldPosition::new(x, 0.0, z),
    }
}

#[must_use]
pub fn option_anchors(scenario_type: ScenarioType) -> [WorldPosition; 2] {
    [
        option_anchor(scenario_type, Side::Left),
        option_anchor(scenario_type, Side::Right),
    ]
}
