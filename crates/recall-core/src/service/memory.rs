//! Memory log service.
//!
//! Owns the server-assigned fields of a log (`id`, `created_at`, the resolved
//! `timestamp`) and the request defaults, then hands the finished record to
//! the repository.

use chrono::{SubsecRound, Utc};
use uuid::Uuid;

use recall_types::error::MemoryLogError;
use recall_types::memory::{
    DEFAULT_DECAY_SCORE, DEFAULT_RECALL_LIMIT, MemoryLog, NewMemoryLog, RecallFilter,
    format_timestamp,
};

use crate::repository::memory_log::MemoryLogRepository;

/// Service for writing and recalling memory logs.
///
/// Generic over the repository trait so recall-core never depends on
/// recall-infra.
pub struct MemoryLogService<R: MemoryLogRepository> {
    repo: R,
    default_limit: i64,
}

impl<R: MemoryLogRepository> MemoryLogService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            default_limit: DEFAULT_RECALL_LIMIT,
        }
    }

    /// Override the limit used when a recall does not carry one.
    pub fn with_default_limit(mut self, limit: i64) -> Self {
        self.default_limit = limit;
        self
    }

    /// Access the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Validate a create request, assign server fields and persist it.
    pub async fn log(&self, request: NewMemoryLog) -> Result<MemoryLog, MemoryLogError> {
        let decay_score = request.decay_score.unwrap_or(DEFAULT_DECAY_SCORE);
        if !decay_score.is_finite() {
            return Err(MemoryLogError::Validation(format!(
                "decay_score must be a finite number, got {decay_score}"
            )));
        }

        // Stored with microsecond precision, so truncate before it is copied
        // into `timestamp`.
        let created_at = Utc::now().trunc_subsecs(6);
        let timestamp = request
            .timestamp
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format_timestamp(&created_at));

        let log = MemoryLog {
            id: Uuid::new_v4(),
            agent_id: request.agent_id,
            session_id: request.session_id,
            context_id: request.context_id,
            action: request.action,
            reason: request.reason,
            outcome: request.outcome,
            tags: request.tags.unwrap_or_default(),
            decay_score,
            timestamp,
            created_at,
        };

        let stored = self.repo.insert(&log).await?;
        tracing::debug!(
            id = %stored.id,
            agent_id = %stored.agent_id,
            session_id = %stored.session_id,
            tags = stored.tags.len(),
            "memory log stored"
        );
        Ok(stored)
    }

    /// Recall logs matching `filter`, applying the default limit.
    pub async fn recall(&self, mut filter: RecallFilter) -> Result<Vec<MemoryLog>, MemoryLogError> {
        match filter.limit {
            Some(limit) if limit < 0 => {
                return Err(MemoryLogError::Validation(format!(
                    "limit must not be negative, got {limit}"
                )));
            }
            Some(_) => {}
            None => filter.limit = Some(self.default_limit),
        }

        let logs = self.repo.query(&filter).await?;
        tracing::debug!(
            results = logs.len(),
            sort_by = %filter.sort_key(),
            "memory logs recalled"
        );
        Ok(logs)
    }

    /// Total number of stored logs.
    pub async fn count(&self) -> Result<i64, MemoryLogError> {
        Ok(self.repo.count().await?)
    }
}
