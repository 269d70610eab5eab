//! Schema management for the memory log table.
//!
//! Every statement is `IF NOT EXISTS`, so running it against an existing
//! database is a no-op.

use sqlx::sqlite::SqlitePool;

const CREATE_MEMORY_LOGS: &str = r#"CREATE TABLE IF NOT EXISTS memory_logs (
    id          TEXT PRIMARY KEY,
    agent_id    TEXT NOT NULL,
    session_id  TEXT NOT NULL,
    context_id  TEXT,
    action      TEXT NOT NULL,
    reason      TEXT NOT NULL,
    outcome     TEXT,
    tags        TEXT NOT NULL DEFAULT '[]',
    decay_score REAL NOT NULL DEFAULT 0.8,
    timestamp   TEXT NOT NULL,
    created_at  TEXT NOT NULL
)"#;

const CREATE_INDEXES: [&str; 4] = [
    "CREATE INDEX IF NOT EXISTS idx_memory_logs_agent_id ON memory_logs(agent_id)",
    "CREATE INDEX IF NOT EXISTS idx_memory_logs_session_id ON memory_logs(session_id)",
    "CREATE INDEX IF NOT EXISTS idx_memory_logs_context_id ON memory_logs(context_id)",
    "CREATE INDEX IF NOT EXISTS idx_memory_logs_timestamp ON memory_logs(timestamp)",
];

/// Create the `memory_logs` table and its secondary indexes if absent.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_MEMORY_LOGS).execute(pool).await?;
    for statement in CREATE_INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!(indexes = CREATE_INDEXES.len(), "memory_logs schema ensured");
    Ok(())
}
