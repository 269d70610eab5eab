//! Memory log repository trait definition.

use recall_types::error::RepositoryError;
use recall_types::memory::{MemoryLog, RecallFilter};

/// Repository trait for memory log persistence.
///
/// Implementations live in recall-infra (e.g., SqliteMemoryLogRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait MemoryLogRepository: Send + Sync {
    /// Persist a fully populated log. Returns the stored log.
    fn insert(
        &self,
        log: &MemoryLog,
    ) -> impl std::future::Future<Output = Result<MemoryLog, RepositoryError>> + Send;

    /// Fetch logs matching every criterion in `filter`, ordered by the
    /// filter's sort key (descending) and capped at its limit.
    fn query(
        &self,
        filter: &RecallFilter,
    ) -> impl std::future::Future<Output = Result<Vec<MemoryLog>, RepositoryError>> + Send;

    /// Total number of stored logs.
    fn count(&self) -> impl std::future::Future<Output = Result<i64, RepositoryError>> + Send;
}
