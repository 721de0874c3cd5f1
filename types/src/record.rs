use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{OptionId, ScenarioId};

/// One accepted decision. Immutable once appended to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceRecord {
    pub scenario_id: ScenarioId,
    pub choice: OptionId,
    /// Milliseconds from scenario presentation to acceptance.
    pub decision_latency_ms: u64,
    #[serde(with = "iso8601_millis")]
    pub timestamp: DateTime<Utc>,
}

impl ChoiceRecord {
    /// Latency in seconds with one decimal, as shown on the completion summary.
    #[must_use]
    pub fn latency_seconds_label(&self) -> String {
        format!("{:.1}s", self.decision_latency_ms as f64 / 1000.0)
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix (`2024-05-01T12:00:00.000Z`).
pub mod iso8601_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|value| value.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[must_use]
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
