//! Core state machines for Fairwalk.
//!
//! This crate holds everything that decides what happens during a study session:
//! the session store and its stage table, choice recording, the interaction
//! controller, avatar navigation, the transition guard, and the virtual-time
//! scheduler that sequences them. [`Study`] ties them together and is the single
//! entry point for hosts.
//!
//! Nothing here performs IO or reads the system clock except through
//! [`WallClock`]; simulated time only advances via [`Study::tick`].

mod clock;
mod events;
mod export;
mod guard;
mod interaction;
pub mod layout;
mod navigator;
mod recorder;
mod scheduler;
mod session;
mod study;
mod transitions;
mod view;

pub use clock::{FixedClock, SystemClock, WallClock};
pub use events::{EventQueue, StudyEvent};
pub use export::SessionExport;
pub use guard::{GuardOutcome, TransitionGuard};
pub use interaction::{ArrivalFollowUp, InteractionController, SelectionOutcome, TargetPolicy};
pub use layout::{option_anchor, option_anchors};
pub use navigator::{Arrival, AvatarNavigator, Destination, Leg, NavPhase, NavigationState};
pub use recorder::ChoiceRecorder;
pub use scheduler::{FiredTimer, Scheduler, TimerHandle, TimerKind};
pub use session::{AvatarId, ScenarioAdvance, SessionStore};
pub use study::Study;
pub use transitions::{StageEdge, StageError, StageReceipt, stage_target, take_edge};
pub use view::{AvatarView, StudyView};
