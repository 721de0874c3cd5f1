//! Coarse session lifecycle phases.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Session stage.
///
/// Normal flow: `Registration -> AvatarSelection -> Instructions -> Playing -> Complete`,
/// and `reset` returns to `Registration` from anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    #[default]
    Registration,
    AvatarSelection,
    Instructions,
    Playing,
    Complete,
}

impl Stage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::AvatarSelection => "avatar-selection",
            Self::Instructions => "instructions",
            Self::Playing => "playing",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
