//! Memory log types for Recall Stack.
//!
//! A memory log is one action/reason/outcome entry written by an agent.
//! Logs are append-only: they are created once and never updated.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Decay score assigned when the caller does not supply one.
pub const DEFAULT_DECAY_SCORE: f64 = 0.8;

/// Maximum number of records a recall returns when no limit is given.
pub const DEFAULT_RECALL_LIMIT: i64 = 100;

/// A stored memory log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryLog {
    pub id: Uuid,
    pub agent_id: String,
    pub session_id: String,
    pub context_id: Option<String>,
    /// What the agent did.
    pub action: String,
    /// Why the agent did it.
    pub reason: String,
    pub outcome: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Stored relevance weight. Never recomputed by this service.
    pub decay_score: f64,
    /// Logical event time as supplied by the caller.
    pub timestamp: String,
    /// Server insertion time.
    #[serde(with = "utc_micros")]
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a memory log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewMemoryLog {
    pub agent_id: String,
    pub session_id: String,
    #[serde(default)]
    pub context_id: Option<String>,
    pub action: String,
    pub reason: String,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub decay_score: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Column a recall is ordered by. Always descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Timestamp,
    DecayScore,
    CreatedAt,
}

impl SortKey {
    /// Column name used in the ORDER BY clause.
    pub fn column(&self) -> &'static str {
        match self {
            SortKey::Timestamp => "timestamp",
            SortKey::DecayScore => "decay_score",
            SortKey::CreatedAt => "created_at",
        }
    }

    /// Parse a caller-supplied key, falling back to [`SortKey::Timestamp`]
    /// for anything unrecognised.
    pub fn from_lenient(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "timestamp" => Ok(SortKey::Timestamp),
            "decay_score" => Ok(SortKey::DecayScore),
            "created_at" => Ok(SortKey::CreatedAt),
            other => Err(format!("invalid sort key: '{other}'")),
        }
    }
}

/// Filter criteria for recalling memory logs.
///
/// Every field is optional. A present value adds an AND-ed predicate; an
/// absent (or empty) value adds nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecallFilter {
    /// Exact match.
    pub agent_id: Option<String>,
    /// Exact match.
    pub session_id: Option<String>,
    /// Exact match.
    pub context_id: Option<String>,
    /// Substring match.
    pub action: Option<String>,
    /// Substring match.
    pub reason: Option<String>,
    /// Substring match.
    pub outcome: Option<String>,
    /// Record must carry this tag.
    pub tag: Option<String>,
    /// Inclusive lower bound on `decay_score`. `0.0` means no bound.
    pub min_decay: Option<f64>,
    /// One of `timestamp`, `decay_score`, `created_at`. Anything else
    /// orders by `timestamp`.
    pub sort_by: Option<String>,
    /// Maximum number of results (default 100).
    pub limit: Option<i64>,
}

impl RecallFilter {
    pub fn sort_key(&self) -> SortKey {
        SortKey::from_lenient(self.sort_by.as_deref())
    }

    pub fn effective_limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_RECALL_LIMIT)
    }
}

/// Render a server time the way it is stored and returned:
/// RFC 3339, UTC, microsecond precision, `Z` suffix.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored server time.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

mod utc_micros {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_timestamp(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("timestamp".parse::<SortKey>().unwrap(), SortKey::Timestamp);
        assert_eq!("decay_score".parse::<SortKey>().unwrap(), SortKey::DecayScore);
        assert_eq!("created_at".parse::<SortKey>().unwrap(), SortKey::CreatedAt);
        assert!("agent_id".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_key_lenient_fallback() {
        assert_eq!(SortKey::from_lenient(None), SortKey::Timestamp);
        assert_eq!(SortKey::from_lenient(Some("bogus")), SortKey::Timestamp);
        assert_eq!(SortKey::from_lenient(Some("")), SortKey::Timestamp);
        assert_eq!(SortKey::from_lenient(Some("decay_score")), SortKey::DecayScore);
    }

    #[test]
    fn test_recall_filter_defaults() {
        let filter = RecallFilter::default();
        assert_eq!(filter.sort_key(), SortKey::Timestamp);
        assert_eq!(filter.effective_limit(), 100);
    }

    #[test]
    fn test_format_timestamp_micros_zulu() {
        let dt = Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap();
        assert_eq!(format_timestamp(&dt), "2026-10-14T09:30:00.000000Z");
        assert_eq!(parse_timestamp(&format_timestamp(&dt)).unwrap(), dt);
    }

    #[test]
    fn test_new_memory_log_optional_fields() {
        let json = r#"{"agent_id":"A1","session_id":"S1","action":"fetch","reason":"test"}"#;
        let req: NewMemoryLog = serde_json::from_str(json).unwrap();
        assert_eq!(req.agent_id, "A1");
        assert!(req.context_id.is_none());
        assert!(req.tags.is_none());
        assert!(req.decay_score.is_none());
        assert!(req.timestamp.is_none());
    }

    #[test]
    fn test_new_memory_log_missing_required_field() {
        let json = r#"{"agent_id":"A1","session_id":"S1","action":"fetch"}"#;
        let err = serde_json::from_str::<NewMemoryLog>(json).unwrap_err();
        assert!(err.to_string().contains("reason"));
    }

    #[test]
    fn test_memory_log_created_at_serializes_like_timestamp() {
        let created_at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let log = MemoryLog {
            id: Uuid::new_v4(),
            agent_id: "A1".to_string(),
            session_id: "S1".to_string(),
            context_id: None,
            action: "fetch".to_string(),
            reason: "test".to_string(),
            outcome: None,
            tags: vec!["x".to_string()],
            decay_score: DEFAULT_DECAY_SCORE,
            timestamp: format_timestamp(&created_at),
            created_at,
        };

        let value = serde_json::to_value(&log).unwrap();
        assert_eq!(value["created_at"], value["timestamp"]);
        assert_eq!(value["created_at"], "2026-01-02T03:04:05.000000Z");
    }
}
