//! Immutable, ordered scenario catalog.

use std::collections::HashSet;

use thiserror::Error;

use crate::ids::{OptionId, ScenarioId};
use crate::scenario::{
    Attraction, AttractionKind, CrowdArrival, Scenario, ScenarioKind, StandCrowd, Street,
    StreetWidth, WinterPath,
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("scenario catalog must contain at least one scenario")]
    Empty,
    #[error("scenario id {0} appears more than once")]
    DuplicateId(ScenarioId),
    #[error("scenario {0} offers the same option `{1}` on both sides")]
    IndistinctOptions(ScenarioId, OptionId),
}

/// Ordered sequence of scenarios, sorted by ascending id.
///
/// Invariant: non-empty, ids unique, each scenario's two options distinct.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
}

impl ScenarioCatalog {
    pub fn new(mut scenarios: Vec<Scenario>) -> Result<Self, CatalogError> {
        if scenarios.is_empty() {
            return Err(CatalogError::Empty);
        }
        scenarios.sort_by_key(|scenario| scenario.id);

        let mut seen = HashSet::with_capacity(scenarios.len());
        for scenario in &scenarios {
            if !seen.insert(scenario.id) {
                return Err(CatalogError::DuplicateId(scenario.id));
            }
            let [left, right] = scenario.options();
            if left == right {
                return Err(CatalogError::IndistinctOptions(scenario.id, left));
            }
        }

        Ok(Self { scenarios })
    }

    /// The eight-scenario fair study.
    #[must_use]
    pub fn default_study() -> Self {
        Self {
            scenarios: default_scenarios(),
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Scenario> {
        self.scenarios.get(index)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.scenarios.len().saturating_sub(1)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Scenario> {
        self.scenarios.iter()
    }

    #[must_use]
    pub fn position_of(&self, id: ScenarioId) -> Option<usize> {
        self.scenarios.iter().position(|scenario| scenario.id == id)
    }
}

impl Default for ScenarioCatalog {
    fn default() -> Self {
        Self::default_study()
    }
}

impl<'a> IntoIterator for &'a ScenarioCatalog {
    type Item = &'a Scenario;
    type IntoIter = std::slice::Iter<'a, Scenario>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn sid(id: u32) -> ScenarioId {
    ScenarioId::new(id).unwrap_or_else(|_| unreachable!("default scenario ids are positive"))
}

fn colors(left: &'static str, right: &'static str) -> ScenarioKind {
    ScenarioKind::ColorChoice {
        colors: [OptionId::from_static(left), OptionId::from_static(right)],
    }
}

fn default_scenarios() -> Vec<Scenario> {
    const STAND: &str = "Choose a stand";

    vec![
        Scenario::new(sid(1), STAND, colors("green", "red")),
        Scenario::new(sid(2), STAND, colors("blue", "red")),
        Scenario::new(sid(3), STAND, colors("blue", "green")),
        Scenario::new(
            sid(4),
            STAND,
            ScenarioKind::CrowdInfluence {
                crowd_sizes: [15, 3],
            },
        ),
        Scenario::new(
            sid(5),
            STAND,
            ScenarioKind::AnimatedCrowd {
                left_stand: StandCrowd {
                    initial_count: 3,
                    arriving: Vec::new(),
                },
                right_stand: StandCrowd {
                    initial_count: 1,
                    arriving: vec![
                        CrowdArrival {
                            count: 1,
                            delay_ms: 2000,
                        },
                        CrowdArrival {
                            count: 2,
                            delay_ms: 4000,
                        },
                        CrowdArrival {
                            count: 2,
                            delay_ms: 6000,
                        },
                    ],
                },
            },
        ),
        Scenario::new(
            sid(6),
            "Which attraction would you visit?",
            ScenarioKind::CarnivalAttractions {
                left_attraction: Attraction {
                    kind: AttractionKind::FerrisWheel,
                    queue_size: Some(12),
                },
                right_attraction: Attraction {
                    kind: AttractionKind::Carousel,
                    queue_size: Some(2),
                },
            },
        ),
        Scenario::new(
            sid(7),
            "Which path would you take?",
            ScenarioKind::StreetWidth {
                left_street: Street {
                    width: StreetWidth::Narrow,
                },
                right_street: Street {
                    width: StreetWidth::Wide,
                },
            },
        ),
        Scenario::new(
            sid(8),
            "Which path would you walk down?",
            ScenarioKind::ChristmasLights {
                left_path: WinterPath { has_lights: true },
                right_path: WinterPath { has_lights: false },
            },
        ),
    ]
}
