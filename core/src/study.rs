//! The study orchestrator.
//!
//! `Study` owns one of every component and is the only entry point a host needs.
//! All mutation flows through its methods, so cross-component rules (scenario
//! change resets navigation, cancels timers, and unlocks the guard) live in one
//! place.

use std::time::Duration;

use serde_json::Value;

use fairwalk_types::{ScenarioCatalog, Stage, StudySettings, TimingSettings, WorldPosition};

use crate::clock::{SystemClock, WallClock};
use crate::events::{EventQueue, StudyEvent};
use crate::export::SessionExport;
use crate::guard::{GuardOutcome, TransitionGuard};
use crate::interaction::{ArrivalFollowUp, InteractionController, SelectionOutcome, TargetPolicy};
use crate::layout::{option_anchor, option_anchors};
use crate::navigator::{Arrival, AvatarNavigator, Leg};
use crate::scheduler::{FiredTimer, Scheduler, TimerKind};
use crate::session::{AvatarId, ScenarioAdvance, SessionStore};
use crate::transitions::{StageError, StageReceipt};
use crate::view::{AvatarView, StudyView};

#[derive(Debug)]
pub struct Study {
    session: SessionStore,
    controller: InteractionController,
    navigator: AvatarNavigator,
    guard: TransitionGuard,
    scheduler: Scheduler,
    timing: TimingSettings,
    events: EventQueue,
}

impl Study {
    #[must_use]
    pub fn new(
        catalog: ScenarioCatalog,
        settings: StudySettings,
        clock: Box<dyn WallClock>,
    ) -> Self {
        Self {
            session: SessionStore::new(catalog, clock),
            controller: InteractionController::new(TargetPolicy::new(settings.targets)),
            navigator: AvatarNavigator::new(settings.navigation),
            guard: TransitionGuard::default(),
            scheduler: Scheduler::new(),
            timing: settings.timing,
            events: EventQueue::default(),
        }
    }

    /// The eight-scenario default study with default settings and the system clock.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(
            ScenarioCatalog::default_study(),
            StudySettings::default(),
            Box::new(SystemClock),
        )
    }

    #[inline]
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[inline]
    #[must_use]
    pub fn navigator(&self) -> &AvatarNavigator {
        &self.navigator
    }

    #[inline]
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.session.stage()
    }

    /// Simulated time accumulated from ticks.
    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.scheduler.now()
    }

    #[must_use]
    pub fn timing(&self) -> TimingSettings {
        self.timing
    }

    #[must_use]
    pub fn is_transition_locked(&self) -> bool {
        self.guard.is_locked()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_len()
    }

    pub fn register(&mut self, user_info: Value) -> Result<StageReceipt, StageError> {
        let receipt = self.session.register(user_info)?;
        self.push_stage_change(receipt);
        Ok(receipt)
    }

    pub fn select_avatar(&mut self, avatar: AvatarId) -> Result<StageReceipt, StageError> {
        let receipt = self.session.select_avatar(avatar)?;
        self.push_stage_change(receipt);
        Ok(receipt)
    }

    /// Leave the instructions and present the first scenario.
    pub fn begin(&mut self) -> Result<StageReceipt, StageError> {
        let receipt = self.session.begin_playing()?;
        self.push_stage_change(receipt);
        self.present_current();
        Ok(receipt)
    }

    /// A participant clicked the option `choice`, rendered at `position`.
    pub fn select_option(
        &mut self,
        choice: &str,
        position: impl Into<WorldPosition>,
    ) -> SelectionOutcome {
        let outcome = self.controller.on_option_selected(
            &mut self.session,
            &mut self.navigator,
            self.scheduler.now(),
            choice,
            position.into(),
        );
        match &outcome {
            SelectionOutcome::Accepted {
                scenario_id,
                choice,
                latency_ms,
                ..
            } => self.events.push(StudyEvent::ChoiceAccepted {
                scenario_id: *scenario_id,
                choice: choice.clone(),
                latency_ms: *latency_ms,
            }),
            SelectionOutcome::AlreadyDecided
            | SelectionOutcome::NotPlaying
            | SelectionOutcome::UnknownOption
            | SelectionOutcome::InvalidPosition => {
                self.events.push(StudyEvent::SelectionIgnored {
                    choice: choice.to_owned(),
                });
            }
        }
        outcome
    }

    /// Click `choice` at its default layout anchor.
    pub fn select_option_at_anchor(&mut self, choice: &str) -> SelectionOutcome {
        let anchor = self
            .session
            .current_scenario()
            .and_then(|scenario| {
                scenario
                    .side_of(choice)
                    .map(|side| option_anchor(scenario.scenario_type(), side))
            })
            .unwrap_or_default();
        self.select_option(choice, anchor)
    }

    /// Advance simulated time by `dt`.
    ///
    /// Due timers are dispatched first, in due order; then the avatar takes one step.
    pub fn tick(&mut self, dt: Duration) {
        for fired in self.scheduler.advance(dt) {
            self.dispatch_timer(fired);
        }
        if let Some(arrival) = self.navigator.step(dt) {
            self.dispatch_arrival(arrival);
        }
    }

    #[must_use]
    pub fn view(&self) -> StudyView<'_> {
        let scenario = self.session.current_scenario();
        let state = self.navigator.state();
        StudyView {
            stage: self.session.stage(),
            scenario_index: self.session.current_index(),
            scenario_count: self.session.catalog().len(),
            scenario,
            decided: scenario.and(self.controller.decided()),
            avatar: AvatarView {
                position: state.position,
                facing: state.facing,
                phase: state.phase,
            },
            option_anchors: scenario.map(|s| option_anchors(s.scenario_type())),
        }
    }

    #[must_use]
    pub fn export(&self) -> SessionExport {
        self.session.export()
    }

    /// Abandon the session and start over at registration with a new participant id.
    pub fn reset(&mut self) -> StageReceipt {
        let receipt = self.session.reset();
        self.scheduler.cancel_all();
        self.guard.release(&mut self.scheduler);
        self.navigator.reset();
        self.controller.present(self.session.epoch(), self.scheduler.now(), &mut self.scheduler);
        self.events.push(StudyEvent::Reset);
        self.push_stage_change(receipt);
        receipt
    }

    pub fn drain_events(&mut self) -> Vec<StudyEvent> {
        self.events.take()
    }

    fn push_stage_change(&mut self, receipt: StageReceipt) {
        if receipt.from() != receipt.to() {
            self.events.push(StudyEvent::StageChanged {
                from: receipt.from(),
                to: receipt.to(),
            });
        }
    }

    /// A new scenario is current: fresh navigation, no timers, unlocked guard.
    fn present_current(&mut self) {
        let epoch = self.session.epoch();
        let cancelled = self.scheduler.cancel_stale(epoch);
        if cancelled > 0 {
            tracing::debug!(cancelled, "Cancelled timers from previous scenario");
        }
        self.guard.release(&mut self.scheduler);
        self.navigator.reset();
        self.controller.present(epoch, self.scheduler.now(), &mut self.scheduler);

        if let Some(scenario) = self.session.current_scenario() {
            tracing::info!(
                scenario = %scenario.id,
                kind = %scenario.scenario_type(),
                "Presenting scenario"
            );
            self.events.push(StudyEvent::ScenarioPresented {
                index: self.session.current_index(),
                scenario_id: scenario.id,
            });
        }
    }

    fn dispatch_timer(&mut self, fired: FiredTimer) {
        if fired.epoch != self.session.epoch() {
            tracing::debug!(kind = ?fired.kind, epoch = %fired.epoch, "Dropping stale timer");
            self.events.push(StudyEvent::StaleTimerDropped);
            return;
        }
        match fired.kind {
            TimerKind::Dwell => {
                self.controller.on_dwell_elapsed(&mut self.navigator);
                self.events.push(StudyEvent::DepartedForHome);
            }
            TimerKind::Settle => {
                self.guard.settled();
                self.advance_scenario();
            }
        }
    }

    fn dispatch_arrival(&mut self, arrival: Arrival) {
        self.events.push(match arrival.leg {
            Leg::ToTarget => StudyEvent::ArrivedAtOption {
                position: arrival.position,
            },
            Leg::ToHome => StudyEvent::ArrivedHome,
        });

        let follow_up = self.controller.on_arrival(
            arrival,
            &mut self.scheduler,
            &mut self.guard,
            self.timing.dwell,
            self.timing.settle,
        );
        if let ArrivalFollowUp::TransitionRequested(GuardOutcome::Armed(_)) = follow_up
            && let Some(scenario) = self.session.current_scenario()
        {
            self.events.push(StudyEvent::AdvanceRequested {
                scenario_id: scenario.id,
            });
        }
    }

    fn advance_scenario(&mut self) {
        match self.session.advance_scenario() {
            ScenarioAdvance::Next { .. } => self.present_current(),
            ScenarioAdvance::Completed => {
                self.scheduler.cancel_all();
                self.events.push(StudyEvent::StageChanged {
                    from: Stage::Playing,
                    to: Stage::Complete,
                });
                self.events.push(StudyEvent::Completed {
                    choices: self.session.choices().len(),
                });
            }
            ScenarioAdvance::Ignored => {
                tracing::debug!(stage = %self.session.stage(), "Advance ignored");
            }
        }
    }
}
