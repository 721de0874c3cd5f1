//! Study events for host feedback.
//!
//! The core pushes one event per observable step of a scenario; hosts drain the
//! queue after each call and use it for logging, UI cues, or test assertions.

use std::fmt;

use fairwalk_types::{GroundPoint, OptionId, ScenarioId, Stage};

/// A closed set of things that happened inside the study.
#[derive(Debug, Clone, PartialEq)]
pub enum StudyEvent {
    StageChanged {
        from: Stage,
        to: Stage,
    },
    /// A scenario is now being presented.
    ScenarioPresented {
        index: usize,
        scenario_id: ScenarioId,
    },
    ChoiceAccepted {
        scenario_id: ScenarioId,
        choice: OptionId,
        latency_ms: u64,
    },
    /// A selection was dropped (duplicate, unknown option, or not playing).
    SelectionIgnored {
        choice: String,
    },
    ArrivedAtOption {
        position: GroundPoint,
    },
    /// The dwell at the option is over and the avatar is walking home.
    DepartedForHome,
    ArrivedHome,
    /// The scenario index is about to move (or the study to complete).
    AdvanceRequested {
        scenario_id: ScenarioId,
    },
    Completed {
        choices: usize,
    },
    /// A timer from an earlier scenario or session fired and was discarded.
    StaleTimerDropped,
    Reset,
}

impl StudyEvent {
    /// Short stable label, used as the `event` field in logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::StageChanged { .. } => "stage-changed",
            Self::ScenarioPresented { .. } => "scenario-presented",
            Self::ChoiceAccepted { .. } => "choice-accepted",
            Self::SelectionIgnored { .. } => "selection-ignored",
            Self::ArrivedAtOption { .. } => "arrived-at-option",
            Self::DepartedForHome => "departed-for-home",
            Self::ArrivedHome => "arrived-home",
            Self::AdvanceRequested { .. } => "advance-requested",
            Self::Completed { .. } => "completed",
            Self::StaleTimerDropped => "stale-timer-dropped",
            Self::Reset => "reset",
        }
    }
}

impl fmt::Display for StudyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StageChanged { from, to } => write!(f, "stage {from} -> {to}"),
            Self::ScenarioPresented { index, scenario_id } => {
                write!(f, "presenting scenario {scenario_id} (#{})", index + 1)
            }
            Self::ChoiceAccepted {
                scenario_id,
                choice,
                latency_ms,
            } => write!(f, "scenario {scenario_id}: chose {choice} after {latency_ms} ms"),
            Self::SelectionIgnored { choice } => write!(f, "ignored selection {choice:?}"),
            Self::ArrivedAtOption { position } => {
                write!(f, "arrived at option ({:.2}, {:.2})", position.x, position.z)
            }
            Self::DepartedForHome => f.write_str("walking home"),
            Self::ArrivedHome => f.write_str("arrived home"),
            Self::AdvanceRequested { scenario_id } => {
                write!(f, "advancing past scenario {scenario_id}")
            }
            Self::Completed { choices } => write!(f, "study complete with {choices} choice(s)"),
            Self::StaleTimerDropped => f.write_str("dropped stale timer"),
            Self::Reset => f.write_str("session reset"),
        }
    }
}

/// Pending events, in the order they happened.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Vec<StudyEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: StudyEvent) {
        tracing::trace!(event = event.label(), "{event}");
        self.pending.push(event);
    }

    /// Take all pending events, clearing the queue.
    pub fn take(&mut self) -> Vec<StudyEvent> {
        std::mem::take(&mut self.pending)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_preserves_order_and_clears() {
        let mut queue = EventQueue::default();
        queue.push(StudyEvent::ArrivedHome);
        queue.push(StudyEvent::Completed { choices: 2 });
        queue.push(StudyEvent::ArrivedHome);

        assert_eq!(queue.len(), 3);
        let events = queue.take();
        assert_eq!(
            events,
            vec![
                StudyEvent::ArrivedHome,
                StudyEvent::Completed { choices: 2 },
                StudyEvent::ArrivedHome,
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn display_is_human_readable() {
        let event = StudyEvent::StageChanged {
            from: Stage::Playing,
            to: Stage::Complete,
        };
        assert_eq!(event.to_string(), "stage playing -> complete");
        assert_eq!(
            StudyEvent::ScenarioPresented {
                index: 0,
                scenario_id: ScenarioId::new(4).unwrap(),
            }
            .to_string(),
            "presenting scenario 4 (#1)"
        );
    }
}
