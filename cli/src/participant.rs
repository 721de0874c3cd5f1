//! Scripted stand-in for a human participant.

use std::time::Duration;

use fairwalk_config::ParticipantScript;
use fairwalk_core::StudyView;
use fairwalk_types::Stage;

/// Watches the study view and clicks once per scenario after "thinking" for a while.
#[derive(Debug)]
pub struct ScriptedParticipant {
    script: ParticipantScript,
    watching: Option<(usize, Duration)>,
    clicked: Option<usize>,
}

impl ScriptedParticipant {
    pub fn new(script: ParticipantScript) -> Self {
        Self {
            script,
            watching: None,
            clicked: None,
        }
    }

    /// The option id to click this frame, if any.
    ///
    /// The scripted choice for the scenario is used when it names one of the
    /// scenario's options; otherwise the left option is picked.
    pub fn next_click(&mut self, view: &StudyView<'_>, now: Duration) -> Option<String> {
        if view.stage != Stage::Playing || view.is_decided() {
            return None;
        }
        let scenario = view.scenario?;
        let index = view.scenario_index;

        let since = match self.watching {
            Some((watched, since)) if watched == index => since,
            _ => {
                self.watching = Some((index, now));
                now
            }
        };
        if self.clicked == Some(index) || now.saturating_sub(since) < self.script.think {
            return None;
        }
        self.clicked = Some(index);

        let [left, _] = scenario.options();
        let choice = match self.script.choice_for(index) {
            Some(choice) if scenario.side_of(choice).is_some() => choice.to_owned(),
            Some(choice) => {
                tracing::warn!(
                    scenario = %scenario.id,
                    choice,
                    fallback = %left,
                    "Scripted choice is not an option of this scenario"
                );
                left.to_string()
            }
            None => left.to_string(),
        };
        Some(choice)
    }
}
