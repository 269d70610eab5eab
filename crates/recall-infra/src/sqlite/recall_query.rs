//! Recall query builder.
//!
//! Turns a [`RecallFilter`] into a SELECT statement whose text only ever
//! contains fixed column names and `?` placeholders. Caller values travel
//! separately as [`BindValue`]s and are bound in order.

use recall_types::memory::{DEFAULT_RECALL_LIMIT, RecallFilter};
use sqlx::sqlite::{Sqlite, SqliteArguments};

/// A value bound to one `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Real(f64),
    Integer(i64),
}

/// A parameterized recall statement.
#[derive(Debug, Clone)]
pub struct RecallQuery {
    sql: String,
    params: Vec<BindValue>,
}

impl RecallQuery {
    /// Build the statement for `filter`.
    ///
    /// Absent and empty criteria add no predicate. `min_decay == 0.0` is
    /// treated the same as absent.
    pub fn from_filter(filter: &RecallFilter) -> Self {
        let mut conditions: Vec<&'static str> = Vec::new();
        let mut params = Vec::new();

        let exact = [
            ("agent_id = ?", &filter.agent_id),
            ("session_id = ?", &filter.session_id),
            ("context_id = ?", &filter.context_id),
        ];
        for (clause, value) in exact {
            if let Some(value) = present(value) {
                conditions.push(clause);
                params.push(BindValue::Text(value.to_string()));
            }
        }

        let contains = [
            ("action LIKE ? ESCAPE '\\'", &filter.action),
            ("reason LIKE ? ESCAPE '\\'", &filter.reason),
            ("outcome LIKE ? ESCAPE '\\'", &filter.outcome),
        ];
        for (clause, value) in contains {
            if let Some(value) = present(value) {
                conditions.push(clause);
                params.push(BindValue::Text(format!("%{}%", escape_like(value))));
            }
        }

        if let Some(tag) = present(&filter.tag) {
            conditions.push("instr(tags, ?) > 0");
            params.push(BindValue::Text(encode_tag(tag)));
        }

        if let Some(min_decay) = filter.min_decay.filter(|m| *m != 0.0) {
            conditions.push("decay_score >= ?");
            params.push(BindValue::Real(min_decay));
        }

        let mut sql = String::from("SELECT * FROM memory_logs");
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        // Column name comes from a closed enum, never from the caller.
        sql.push_str(" ORDER BY ");
        sql.push_str(filter.sort_key().column());
        sql.push_str(" DESC, rowid DESC LIMIT ?");
        params.push(BindValue::Integer(
            filter.limit.unwrap_or(DEFAULT_RECALL_LIMIT),
        ));

        Self { sql, params }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[BindValue] {
        &self.params
    }

    /// Build an executable sqlx query with every parameter bound.
    pub fn to_query(&self) -> sqlx::query::Query<'_, Sqlite, SqliteArguments<'_>> {
        let mut query = sqlx::query(&self.sql);
        for param in &self.params {
            query = match param {
                BindValue::Text(v) => query.bind(v.as_str()),
                BindValue::Real(v) => query.bind(*v),
                BindValue::Integer(v) => query.bind(*v),
            };
        }
        query
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Escape LIKE wildcards so the pattern matches the value literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Encode a single tag exactly as it appears inside the stored JSON array.
fn encode_tag(tag: &str) -> String {
    serde_json::Value::String(tag.to_string()).to_string()
}
