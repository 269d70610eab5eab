//! SQLite memory log repository implementation.
//!
//! Implements `MemoryLogRepository` from `recall-core` using sqlx with split
//! read/write pools: inserts go to the writer, recalls to the reader.

use recall_core::repository::memory_log::MemoryLogRepository;
use recall_types::error::RepositoryError;
use recall_types::memory::{MemoryLog, RecallFilter, format_timestamp, parse_timestamp};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::recall_query::RecallQuery;

/// SQLite-backed implementation of `MemoryLogRepository`.
pub struct SqliteMemoryLogRepository {
    pool: DatabasePool,
}

impl SqliteMemoryLogRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row type for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct MemoryLogRow {
    id: String,
    agent_id: String,
    session_id: String,
    context_id: Option<String>,
    action: String,
    reason: String,
    outcome: Option<String>,
    tags: Option<String>,
    decay_score: f64,
    timestamp: String,
    created_at: String,
}

impl MemoryLogRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            agent_id: row.try_get("agent_id")?,
            session_id: row.try_get("session_id")?,
            context_id: row.try_get("context_id")?,
            action: row.try_get("action")?,
            reason: row.try_get("reason")?,
            outcome: row.try_get("outcome")?,
            tags: row.try_get("tags")?,
            decay_score: row.try_get("decay_score")?,
            timestamp: row.try_get("timestamp")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_log(self) -> Result<MemoryLog, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid memory log id: {e}")))?;
        let tags = decode_tags(self.tags.as_deref())?;
        let created_at = parse_timestamp(&self.created_at)
            .map_err(|e| RepositoryError::Query(format!("invalid created_at: {e}")))?;

        Ok(MemoryLog {
            id,
            agent_id: self.agent_id,
            session_id: self.session_id,
            context_id: self.context_id,
            action: self.action,
            reason: self.reason,
            outcome: self.outcome,
            tags,
            decay_score: self.decay_score,
            timestamp: self.timestamp,
            created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A NULL or blank column reads back as no tags.
fn decode_tags(raw: Option<&str>) -> Result<Vec<String>, RepositoryError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(json) => serde_json::from_str(json)
            .map_err(|e| RepositoryError::Query(format!("invalid tags: {e}"))),
    }
}

fn encode_tags(tags: &[String]) -> Result<String, RepositoryError> {
    serde_json::to_string(tags).map_err(|e| RepositoryError::Query(e.to_string()))
}

// ---------------------------------------------------------------------------
// MemoryLogRepository implementation
// ---------------------------------------------------------------------------

impl MemoryLogRepository for SqliteMemoryLogRepository {
    async fn insert(&self, log: &MemoryLog) -> Result<MemoryLog, RepositoryError> {
        let tags_json = encode_tags(&log.tags)?;

        sqlx::query(
            r#"INSERT INTO memory_logs (id, agent_id, session_id, context_id, action, reason, outcome, tags, decay_score, timestamp, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(log.id.to_string())
        .bind(&log.agent_id)
        .bind(&log.session_id)
        .bind(&log.context_id)
        .bind(&log.action)
        .bind(&log.reason)
        .bind(&log.outcome)
        .bind(&tags_json)
        .bind(log.decay_score)
        .bind(&log.timestamp)
        .bind(format_timestamp(&log.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(log.clone())
    }

    async fn query(&self, filter: &RecallFilter) -> Result<Vec<MemoryLog>, RepositoryError> {
        let recall = RecallQuery::from_filter(filter);
        tracing::trace!(sql = recall.sql(), params = recall.params().len(), "recall query");

        let rows = recall
            .to_query()
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut logs = Vec::with_capacity(rows.len());
        for row in &rows {
            let log_row =
                MemoryLogRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            logs.push(log_row.into_log()?);
        }

        Ok(logs)
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM memory_logs")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(row.0)
    }
}
