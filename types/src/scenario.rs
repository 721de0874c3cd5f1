//! Scenario descriptors.
//!
//! A scenario is one forced binary choice. Its type tag selects both the parameter
//! bag the renderer needs and the pair of option ids the participant can pick from.
//! Descriptors are immutable once the catalog is built.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::{OptionId, ScenarioId};

/// Which of the two presented options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Closed set of scenario types (the tag alone, without parameters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioType {
    ColorChoice,
    CrowdInfluence,
    AnimatedCrowd,
    CarnivalAttractions,
    StreetWidth,
    ChristmasLights,
}

impl ScenarioType {
    pub const ALL: [ScenarioType; 6] = [
        ScenarioType::ColorChoice,
        ScenarioType::CrowdInfluence,
        ScenarioType::AnimatedCrowd,
        ScenarioType::CarnivalAttractions,
        ScenarioType::StreetWidth,
        ScenarioType::ChristmasLights,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ColorChoice => "color-choice",
            Self::CrowdInfluence => "crowd-influence",
            Self::AnimatedCrowd => "animated-crowd",
            Self::CarnivalAttractions => "carnival-attractions",
            Self::StreetWidth => "street-width",
            Self::ChristmasLights => "christmas-lights",
        }
    }
}

impl fmt::Display for ScenarioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// People already waiting at a stand, plus scripted late arrivals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandCrowd {
    pub initial_count: u32,
    #[serde(default)]
    pub arriving: Vec<CrowdArrival>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrowdArrival {
    pub count: u32,
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttractionKind {
    FerrisWheel,
    Carousel,
}

impl AttractionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FerrisWheel => "ferris-wheel",
            Self::Carousel => "carousel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attraction {
    pub kind: AttractionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_size: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreetWidth {
    Narrow,
    Wide,
}

impl StreetWidth {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Narrow => "narrow",
            Self::Wide => "wide",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Street {
    pub width: StreetWidth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinterPath {
    pub has_lights: bool,
}

impl WinterPath {
    #[must_use]
    pub const fn option_label(self) -> &'static str {
        if self.has_lights { "lights" } else { "no-lights" }
    }
}

/// Type tag plus type-specific parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ScenarioKind {
    ColorChoice {
        colors: [OptionId; 2],
    },
    CrowdInfluence {
        crowd_sizes: [u32; 2],
    },
    AnimatedCrowd {
        left_stand: StandCrowd,
        right_stand: StandCrowd,
    },
    CarnivalAttractions {
        left_attraction: Attraction,
        right_attraction: Attraction,
    },
    StreetWidth {
        left_street: Street,
        right_street: Street,
    },
    ChristmasLights {
        left_path: WinterPath,
        right_path: WinterPath,
    },
}

const LEFT_OPTION: &str = "left";
const RIGHT_OPTION: &str = "right";

// Queue sizes assumed when a carnival attraction omits one.
const DEFAULT_LEFT_QUEUE: u32 = 10;
const DEFAULT_RIGHT_QUEUE: u32 = 2;

impl ScenarioKind {
    #[must_use]
    pub const fn scenario_type(&self) -> ScenarioType {
        match self {
            Self::ColorChoice { .. } => ScenarioType::ColorChoice,
            Self::CrowdInfluence { .. } => ScenarioType::CrowdInfluence,
            Self::AnimatedCrowd { .. } => ScenarioType::AnimatedCrowd,
            Self::CarnivalAttractions { .. } => ScenarioType::CarnivalAttractions,
            Self::StreetWidth { .. } => ScenarioType::StreetWidth,
            Self::ChristmasLights { .. } => ScenarioType::ChristmasLights,
        }
    }

    /// The option id for one side.
    #[must_use]
    pub fn option(&self, side: Side) -> OptionId {
        let label: &'static str = match (self, side) {
            (Self::ColorChoice { colors }, side) => return colors[side.index()].clone(),
            (Self::CrowdInfluence { .. } | Self::AnimatedCrowd { .. }, Side::Left) => LEFT_OPTION,
            (Self::CrowdInfluence { .. } | Self::AnimatedCrowd { .. }, Side::Right) => {
                RIGHT_OPTION
            }
            (Self::CarnivalAttractions { left_attraction, .. }, Side::Left) => {
                left_attraction.kind.as_str()
            }
            (
                Self::CarnivalAttractions {
                    right_attraction, ..
                },
                Side::Right,
            ) => right_attraction.kind.as_str(),
            (Self::StreetWidth { left_street, .. }, Side::Left) => left_street.width.as_str(),
            (Self::StreetWidth { right_street, .. }, Side::Right) => right_street.width.as_str(),
            (Self::ChristmasLights { left_path, .. }, Side::Left) => left_path.option_label(),
            (Self::ChristmasLights { right_path, .. }, Side::Right) => right_path.option_label(),
        };
        OptionId::from_static(label)
    }

    /// Queue length in front of a carnival attraction, if this scenario has queues.
    #[must_use]
    pub fn queue_size(&self, side: Side) -> Option<u32> {
        match self {
            Self::CarnivalAttractions {
                left_attraction,
                right_attraction,
            } => Some(match side {
                Side::Left => left_attraction.queue_size.unwrap_or(DEFAULT_LEFT_QUEUE),
                Side::Right => right_attraction.queue_size.unwrap_or(DEFAULT_RIGHT_QUEUE),
            }),
            _ => None,
        }
    }
}

/// One forced-choice trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub question: String,
    #[serde(flatten)]
    pub kind: ScenarioKind,
}

impl Scenario {
    #[must_use]
    pub fn new(id: ScenarioId, question: impl Into<String>, kind: ScenarioKind) -> Self {
        Self {
            id,
            question: question.into(),
            kind,
        }
    }

    #[must_use]
    pub const fn scenario_type(&self) -> ScenarioType {
        self.kind.scenario_type()
    }

    #[must_use]
    pub fn options(&self) -> [OptionId; 2] {
        [self.kind.option(Side::Left), self.kind.option(Side::Right)]
    }

    /// Resolve a raw choice id to the side it names, if it is one of this scenario's options.
    #[must_use]
    pub fn side_of(&self, choice: &str) -> Option<Side> {
        Side::BOTH
            .into_iter()
            .find(|side| self.kind.option(*side) == choice)
    }
}
