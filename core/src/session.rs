//! Session state container.
//!
//! `SessionStore` is the single owner of everything the study accumulates. Its fields
//! are private; every mutation goes through a named action. Choice recording and
//! scenario advancement are crate-private so the only way to reach them from outside
//! is through the interaction controller and the transition guard.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use fairwalk_types::{
    ChoiceRecord, Epoch, OptionId, ParticipantId, Scenario, ScenarioCatalog, ScenarioId, Stage,
};

use crate::clock::WallClock;
use crate::export::SessionExport;
use crate::recorder::ChoiceRecorder;
use crate::transitions::{StageEdge, StageError, StageReceipt, take_edge};

/// Opaque avatar identifier chosen during avatar selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvatarId(String);

impl AvatarId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AvatarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of asking the session to move past the current scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioAdvance {
    /// The next scenario (at this index) is now current.
    Next { index: usize },
    /// The last scenario was finished; the session is complete.
    Completed,
    /// Not playing; nothing changed.
    Ignored,
}

fn generate_participant_id() -> ParticipantId {
    ParticipantId::new(Uuid::new_v4().to_string())
}

pub struct SessionStore {
    catalog: ScenarioCatalog,
    clock: Box<dyn WallClock>,
    stage: Stage,
    participant_id: ParticipantId,
    user_info: Option<Value>,
    avatar: Option<AvatarId>,
    current_index: usize,
    choices: ChoiceRecorder,
    epoch: Epoch,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("stage", &self.stage)
            .field("participant_id", &self.participant_id)
            .field("current_index", &self.current_index)
            .field("choices", &self.choices.len())
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new(catalog: ScenarioCatalog, clock: Box<dyn WallClock>) -> Self {
        Self {
            catalog,
            clock,
            stage: Stage::Registration,
            participant_id: generate_participant_id(),
            user_info: None,
            avatar: None,
            current_index: 0,
            choices: ChoiceRecorder::default(),
            epoch: Epoch::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.stage == Stage::Complete
    }

    #[inline]
    #[must_use]
    pub fn participant_id(&self) -> &ParticipantId {
        &self.participant_id
    }

    #[must_use]
    pub fn user_info(&self) -> Option<&Value> {
        self.user_info.as_ref()
    }

    #[must_use]
    pub fn avatar(&self) -> Option<&AvatarId> {
        self.avatar.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &ScenarioCatalog {
        &self.catalog
    }

    #[inline]
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The scenario being presented. `None` outside the playing stage.
    #[must_use]
    pub fn current_scenario(&self) -> Option<&Scenario> {
        if self.stage == Stage::Playing {
            self.catalog.get(self.current_index)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn choices(&self) -> &ChoiceRecorder {
        &self.choices
    }

    /// Token for the current scenario context. Changes on every scenario change and reset.
    #[inline]
    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn register(&mut self, user_info: Value) -> Result<StageReceipt, StageError> {
        let receipt = take_edge(self.stage, StageEdge::Register)?;
        self.user_info = Some(user_info);
        self.stage = receipt.to();
        Ok(receipt)
    }

    pub fn select_avatar(&mut self, avatar: AvatarId) -> Result<StageReceipt, StageError> {
        let receipt = take_edge(self.stage, StageEdge::SelectAvatar)?;
        self.avatar = Some(avatar);
        self.stage = receipt.to();
        Ok(receipt)
    }

    /// Present the first scenario.
    pub fn begin_playing(&mut self) -> Result<StageReceipt, StageError> {
        let receipt = take_edge(self.stage, StageEdge::BeginPlaying)?;
        self.current_index = 0;
        self.stage = receipt.to();
        self.epoch = self.epoch.next();
        Ok(receipt)
    }

    /// Append a choice stamped with the wall clock. Never fails.
    ///
    /// At most one record per scenario is the caller's responsibility; only the
    /// interaction controller calls this.
    pub(crate) fn record_choice(
        &mut self,
        scenario_id: ScenarioId,
        choice: OptionId,
        decision_latency_ms: u64,
    ) {
        self.choices.append(ChoiceRecord {
            scenario_id,
            choice,
            decision_latency_ms,
            timestamp: self.clock.now(),
        });
    }

    /// Move to the next scenario, or complete the session after the last one.
    ///
    /// Must run at most once per scenario; the transition guard enforces that.
    pub(crate) fn advance_scenario(&mut self) -> ScenarioAdvance {
        if self.stage != Stage::Playing {
            return ScenarioAdvance::Ignored;
        }

        if self.current_index < self.catalog.last_index() {
            self.current_index += 1;
            self.epoch = self.epoch.next();
            tracing::info!(
                index = self.current_index,
                total = self.catalog.len(),
                "Moving to next scenario"
            );
            return ScenarioAdvance::Next {
                index: self.current_index,
            };
        }

        match take_edge(self.stage, StageEdge::Complete) {
            Ok(receipt) => {
                self.stage = receipt.to();
                self.epoch = self.epoch.next();
                tracing::info!(choices = self.choices.len(), "Study complete");
                ScenarioAdvance::Completed
            }
            Err(err) => {
                tracing::warn!("{err}");
                ScenarioAdvance::Ignored
            }
        }
    }

    /// Return every mutable field to its initial value and issue a new participant id.
    pub fn reset(&mut self) -> StageReceipt {
        let receipt = StageReceipt::reset_from(self.stage);
        let previous = std::mem::replace(&mut self.participant_id, generate_participant_id());
        while self.participant_id == previous {
            self.participant_id = generate_participant_id();
        }
        self.stage = Stage::Registration;
        self.user_info = None;
        self.avatar = None;
        self.current_index = 0;
        self.choices.clear();
        self.epoch = self.epoch.next();
        tracing::debug!(from = %receipt.from(), "Session reset");
        receipt
    }

    /// Snapshot of the session for persistence. Pure; callable at any stage.
    #[must_use]
    pub fn export(&self) -> SessionExport {
        SessionExport {
            participant_id: self.participant_id.clone(),
            user_info: self.user_info.clone(),
            avatar_selection: self.avatar.clone(),
            choices: self.choices.records().to_vec(),
            export_timestamp: self.clock.now(),
        }
    }
}
