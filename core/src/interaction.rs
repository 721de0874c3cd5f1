//! Click-to-decision pipeline.
//!
//! The controller turns a raw "option clicked" event into exactly one choice record
//! and one walking destination per scenario, then sequences the dwell-and-return
//! trip and hands the final arrival to the transition guard.

use std::time::Duration;

use fairwalk_types::{
    Epoch, GroundPoint, OptionId, Scenario, ScenarioId, ScenarioType, Side, TargetSettings,
    WorldPosition,
};

use crate::guard::{GuardOutcome, TransitionGuard};
use crate::navigator::{Arrival, AvatarNavigator, Destination, Leg};
use crate::scheduler::{Scheduler, TimerHandle, TimerKind};
use crate::session::SessionStore;

/// Per-type rule for where the avatar stops in front of a chosen option.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TargetPolicy {
    settings: TargetSettings,
}

impl TargetPolicy {
    #[must_use]
    pub const fn new(settings: TargetSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub const fn settings(&self) -> &TargetSettings {
        &self.settings
    }

    /// The ground point the avatar walks to after choosing `side` of `scenario`,
    /// whose option sits at `option`.
    #[must_use]
    pub fn destination(
        &self,
        scenario: &Scenario,
        side: Side,
        option: WorldPosition,
    ) -> GroundPoint {
        let s = &self.settings;
        let z = match scenario.scenario_type() {
            ScenarioType::CarnivalAttractions => {
                let queue_size = scenario.kind.queue_size(side).unwrap_or(0);
                let pairs = f64::from(queue_size.div_ceil(2));
                let queue_length = pairs * s.queue_spacing() + s.queue_padding();
                s.queue_origin_z() + queue_length + s.queue_margin()
            }
            ScenarioType::StreetWidth | ScenarioType::ChristmasLights => s.path_entrance_z(),
            ScenarioType::ColorChoice
            | ScenarioType::CrowdInfluence
            | ScenarioType::AnimatedCrowd => option.z + s.standoff(),
        };
        GroundPoint::new(option.x, z)
    }
}

/// Why a selection was or was not accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    Accepted {
        scenario_id: ScenarioId,
        choice: OptionId,
        latency_ms: u64,
        destination: GroundPoint,
    },
    /// A choice was already accepted for this scenario.
    AlreadyDecided,
    /// No scenario is being presented.
    NotPlaying,
    /// The id is not one of the current scenario's options.
    UnknownOption,
    /// The clicked position has a non-finite ground coordinate.
    InvalidPosition,
}

impl SelectionOutcome {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// What the controller did with an arrival notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalFollowUp {
    DwellScheduled(TimerHandle),
    TransitionRequested(GuardOutcome),
}

#[derive(Debug)]
pub struct InteractionController {
    policy: TargetPolicy,
    decided: Option<OptionId>,
    presented_at: Duration,
    epoch: Epoch,
    dwell: Option<TimerHandle>,
}

impl InteractionController {
    #[must_use]
    pub fn new(policy: TargetPolicy) -> Self {
        Self {
            policy,
            decided: None,
            presented_at: Duration::ZERO,
            epoch: Epoch::default(),
            dwell: None,
        }
    }

    #[must_use]
    pub fn decided(&self) -> Option<&OptionId> {
        self.decided.as_ref()
    }

    #[must_use]
    pub fn policy(&self) -> &TargetPolicy {
        &self.policy
    }

    /// A new scenario is current: forget the previous decision and its timers.
    pub fn present(&mut self, epoch: Epoch, now: Duration, scheduler: &mut Scheduler) {
        if let Some(handle) = self.dwell.take() {
            scheduler.cancel(handle);
        }
        self.decided = None;
        self.presented_at = now;
        self.epoch = epoch;
    }

    /// Accept the first valid selection for the current scenario.
    ///
    /// Every later call for the same scenario is a no-op, whatever the arguments.
    pub fn on_option_selected(
        &mut self,
        session: &mut SessionStore,
        navigator: &mut AvatarNavigator,
        now: Duration,
        choice: &str,
        option_position: WorldPosition,
    ) -> SelectionOutcome {
        let Some(scenario) = session.current_scenario() else {
            return SelectionOutcome::NotPlaying;
        };
        if self.decided.is_some() || session.choices().contains(scenario.id) {
            tracing::debug!(scenario = %scenario.id, choice, "Selection ignored - already decided");
            return SelectionOutcome::AlreadyDecided;
        }
        let Some(side) = scenario.side_of(choice) else {
            tracing::warn!(scenario = %scenario.id, choice, "Selection ignored - unknown option");
            return SelectionOutcome::UnknownOption;
        };
        if !option_position.ground().is_finite() {
            tracing::warn!(
                scenario = %scenario.id,
                choice,
                ?option_position,
                "Selection ignored - non-finite position"
            );
            return SelectionOutcome::InvalidPosition;
        }

        let scenario_id = scenario.id;
        let option = scenario.kind.option(side);
        let destination = self.policy.destination(scenario, side, option_position);
        let latency_ms =
            u64::try_from(now.saturating_sub(self.presented_at).as_millis()).unwrap_or(u64::MAX);

        session.record_choice(scenario_id, option.clone(), latency_ms);
        self.decided = Some(option.clone());
        navigator.move_to(Destination::Point(destination));

        tracing::info!(
            scenario = %scenario_id,
            choice = %option,
            latency_ms,
            x = destination.x,
            z = destination.z,
            "Choice accepted"
        );

        SelectionOutcome::Accepted {
            scenario_id,
            choice: option,
            latency_ms,
            destination,
        }
    }

    /// React to the end of a navigation leg: wait at the option, or ask to advance.
    pub fn on_arrival(
        &mut self,
        arrival: Arrival,
        scheduler: &mut Scheduler,
        guard: &mut TransitionGuard,
        dwell: Duration,
        settle: Duration,
    ) -> ArrivalFollowUp {
        match arrival.leg {
            Leg::ToTarget => {
                let handle = scheduler.schedule(dwell, self.epoch, TimerKind::Dwell);
                self.dwell = Some(handle);
                ArrivalFollowUp::DwellScheduled(handle)
            }
            Leg::ToHome => {
                ArrivalFollowUp::TransitionRequested(guard.advance(scheduler, self.epoch, settle))
            }
        }
    }

    /// The dwell timer fired: walk back home.
    pub fn on_dwell_elapsed(&mut self, navigator: &mut AvatarNavigator) {
        self.dwell = None;
        navigator.move_to(Destination::Home);
    }
}
