//! Serializable session snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use fairwalk_types::{ChoiceRecord, ParticipantId, iso8601_millis};

use crate::session::AvatarId;

/// The sole persisted artifact of a session.
///
/// Serializes as `{participantId, userInfo, avatarSelection, choices, exportTimestamp}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionExport {
    pub participant_id: ParticipantId,
    pub user_info: Option<Value>,
    pub avatar_selection: Option<AvatarId>,
    pub choices: Vec<ChoiceRecord>,
    #[serde(with = "iso8601_millis")]
    pub export_timestamp: DateTime<Utc>,
}

impl SessionExport {
    /// One line per choice, in the order they were made.
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        self.choices
            .iter()
            .map(|record| {
                format!(
                    "Scenario {}: {} ({})",
                    record.scenario_id,
                    record.choice,
                    record.latency_seconds_label()
                )
            })
            .collect()
    }

    /// Participant display name, when the registration payload carries one.
    #[must_use]
    pub fn participant_name(&self) -> Option<&str> {
        self.user_info
            .as_ref()
            .and_then(|info| info.get("name"))
            .and_then(Value::as_str)
    }
}
