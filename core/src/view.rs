//! Read-only snapshot of the study for renderers.

use serde::Serialize;

use fairwalk_types::{OptionId, Scenario, Stage, WorldPosition};

use crate::navigator::NavPhase;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AvatarView {
    pub position: WorldPosition,
    pub facing: f64,
    pub phase: NavPhase,
}

/// Everything a host needs to draw one frame. Borrowed from the study; cheap to build.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyView<'a> {
    pub stage: Stage,
    pub scenario_index: usize,
    pub scenario_count: usize,
    pub scenario: Option<&'a Scenario>,
    pub decided: Option<&'a OptionId>,
    pub avatar: AvatarView,
    /// Default positions of the current scenario's left and right options.
    pub option_anchors: Option<[WorldPosition; 2]>,
}

impl StudyView<'_> {
    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.decided.is_some()
    }

    /// 1-based progress label, e.g. `"3 / 8"`.
    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("{} / {}", self.scenario_index + 1, self.scenario_count)
    }
}
