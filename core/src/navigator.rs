//! Avatar navigation state machine.
//!
//! ```text
//! Idle --move_to(Point)--> WalkingToTarget --arrive--> Arrived
//!   ^                                                     |
//!   +------arrive------ WalkingBack <--move_to(Home)------+
//! ```
//!
//! Movement is straight-line at constant speed. Each leg produces exactly one
//! [`Arrival`]: once the target is reached the phase leaves the walking states, and
//! later ticks are no-ops until the next `move_to`.

use std::time::Duration;

use serde::Serialize;

use fairwalk_types::{GroundPoint, NavigationSettings, WorldPosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavPhase {
    Idle,
    WalkingToTarget,
    Arrived,
    WalkingBack,
}

impl NavPhase {
    #[must_use]
    pub const fn is_walking(self) -> bool {
        matches!(self, Self::WalkingToTarget | Self::WalkingBack)
    }

    const fn leg(self) -> Option<Leg> {
        match self {
            Self::WalkingToTarget => Some(Leg::ToTarget),
            Self::WalkingBack => Some(Leg::ToHome),
            Self::Idle | Self::Arrived => None,
        }
    }
}

/// Where to walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Destination {
    /// The chosen option's stopping point.
    Point(GroundPoint),
    /// The configured home position.
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    ToTarget,
    ToHome,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrival {
    pub leg: Leg,
    pub position: GroundPoint,
}

/// Transient per-scenario navigation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationState {
    pub position: WorldPosition,
    pub target: Option<GroundPoint>,
    pub phase: NavPhase,
    /// Yaw in radians, `atan2(dx, dz)` of the last movement.
    pub facing: f64,
}

impl NavigationState {
    fn at_home(settings: &NavigationSettings) -> Self {
        Self {
            position: settings.home().at_height(settings.height()),
            target: None,
            phase: NavPhase::Idle,
            facing: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AvatarNavigator {
    settings: NavigationSettings,
    state: NavigationState,
}

impl AvatarNavigator {
    #[must_use]
    pub fn new(settings: NavigationSettings) -> Self {
        Self {
            state: NavigationState::at_home(&settings),
            settings,
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> NavPhase {
        self.state.phase
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> WorldPosition {
        self.state.position
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &NavigationSettings {
        &self.settings
    }

    /// Start a leg. `Home` walks back; any point walks toward the target.
    pub fn move_to(&mut self, destination: Destination) {
        let (target, phase) = match destination {
            Destination::Point(point) => (point, NavPhase::WalkingToTarget),
            Destination::Home => (self.settings.home(), NavPhase::WalkingBack),
        };
        self.state.target = Some(target);
        self.state.phase = phase;
    }

    /// Advance one simulation tick of length `dt`.
    ///
    /// Returns the arrival for the current leg on the tick it completes, and `None`
    /// otherwise.
    pub fn step(&mut self, dt: Duration) -> Option<Arrival> {
        let leg = self.state.phase.leg()?;
        let Some(target) = self.state.target else {
            self.state.phase = NavPhase::Idle;
            return None;
        };

        let here = self.state.position.ground();
        let dx = target.x - here.x;
        let dz = target.z - here.z;
        let distance = dx.hypot(dz);
        let stride = self.settings.speed() * dt.as_secs_f64();

        if distance < self.settings.arrival_threshold() || stride >= distance {
            self.state.position = target.at_height(self.settings.height());
            self.state.target = None;
            self.state.phase = match leg {
                Leg::ToTarget => NavPhase::Arrived,
                Leg::ToHome => NavPhase::Idle,
            };
            return Some(Arrival {
                leg,
                position: target,
            });
        }

        self.state.position.x += dx / distance * stride;
        self.state.position.z += dz / distance * stride;
        self.state.facing = dx.atan2(dz);
        None
    }

    /// Discard all motion and stand at home.
    pub fn reset(&mut self) {
        self.state = NavigationState::at_home(&self.settings);
    }
}
