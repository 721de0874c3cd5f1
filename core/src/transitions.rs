//! Stage transition graph authority.
//!
//! This module is the single encoding point for named `Stage` edges and legality
//! checks. The session delegates every stage change here instead of embedding the
//! graph in each action.

use fairwalk_types::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEdge {
    Register,
    SelectAvatar,
    BeginPlaying,
    Complete,
    Reset,
}

impl StageEdge {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::SelectAvatar => "select-avatar",
            Self::BeginPlaying => "begin-playing",
            Self::Complete => "complete",
            Self::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot {} while the session is in the {from} stage", .edge.as_str())]
pub struct StageError {
    pub from: Stage,
    pub edge: StageEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageReceipt {
    from: Stage,
    edge: StageEdge,
    to: Stage,
}

impl StageReceipt {
    #[must_use]
    pub const fn from(self) -> Stage {
        self.from
    }

    #[must_use]
    pub const fn edge(self) -> StageEdge {
        self.edge
    }

    #[must_use]
    pub const fn to(self) -> Stage {
        self.to
    }

    /// Reset is legal from every stage.
    #[must_use]
    pub(crate) const fn reset_from(from: Stage) -> Self {
        Self {
            from,
            edge: StageEdge::Reset,
            to: Stage::Registration,
        }
    }
}

/// The stage an edge leads to when taken from `from`, if it is legal there.
#[must_use]
pub fn stage_target(from: Stage, edge: StageEdge) -> Option<Stage> {
    use Stage::{AvatarSelection, Complete, Instructions, Playing, Registration};

    match (edge, from) {
        (StageEdge::Register, Registration) => Some(AvatarSelection),
        (StageEdge::SelectAvatar, AvatarSelection) => Some(Instructions),
        (StageEdge::BeginPlaying, Instructions) => Some(Playing),
        (StageEdge::Complete, Playing) => Some(Complete),
        (StageEdge::Reset, _) => Some(Registration),
        _ => None,
    }
}

pub fn take_edge(from: Stage, edge: StageEdge) -> Result<StageReceipt, StageError> {
    stage_target(from, edge)
        .map(|to| StageReceipt { from, edge, to })
        .ok_or(StageError { from, edge })
}
