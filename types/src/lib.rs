//! Core domain types for Fairwalk.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies:
//! identifiers, the session stage, ground-plane geometry, scenario descriptors and the
//! catalog that orders them, choice records, and resolved tuning settings.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod catalog;
mod geometry;
mod ids;
mod record;
mod scenario;
pub mod settings;
mod stage;

pub use catalog::{CatalogError, ScenarioCatalog};
pub use geometry::{GroundPoint, WorldPosition};
pub use ids::{Epoch, OptionId, OptionIdError, ParticipantId, ScenarioId, ScenarioIdError};
pub use record::{ChoiceRecord, format_timestamp, iso8601_millis};
pub use scenario::{
    Attraction, AttractionKind, CrowdArrival, Scenario, ScenarioKind, ScenarioType, Side,
    StandCrowd, Street, StreetWidth, WinterPath,
};
pub use settings::{
    NavigationSettings, SettingsError, StudySettings, TargetSettings, TimingSettings,
};
pub use stage::Stage;
