//! Application state wiring the store and service together.
//!
//! AppState holds the concrete service instance used by both CLI commands and
//! REST API handlers. It is built once at startup and cloned into handlers.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use recall_core::service::memory::MemoryLogService;
use recall_infra::sqlite::memory_log::SqliteMemoryLogRepository;
use recall_infra::sqlite::pool::DatabasePool;
use recall_types::config::ServerConfig;

/// Memory log service pinned to the SQLite repository.
pub type ConcreteMemoryLogService = MemoryLogService<SqliteMemoryLogRepository>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub memory_service: Arc<ConcreteMemoryLogService>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Open the database (ensuring its schema) and wire the service.
    pub async fn init(config: ServerConfig) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(&config.database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let db_pool = DatabasePool::new(&config.database_url())
            .await
            .with_context(|| format!("Failed to open database {}", config.database_path))?;

        Ok(Self::from_pool(db_pool, config))
    }

    pub fn from_pool(db_pool: DatabasePool, config: ServerConfig) -> Self {
        let memory_service = MemoryLogService::new(SqliteMemoryLogRepository::new(db_pool))
            .with_default_limit(config.default_recall_limit);

        Self {
            memory_service: Arc::new(memory_service),
            config: Arc::new(config),
        }
    }
}
