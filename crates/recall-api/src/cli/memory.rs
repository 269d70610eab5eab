//! Memory log CLI commands: log, recall.
//!
//! Both commands go through the same service as the HTTP API, against the
//! configured database file.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use recall_types::memory::{MemoryLog, NewMemoryLog, RecallFilter};

use crate::state::AppState;

/// Store one memory log and print it.
///
/// # Examples
///
/// ```bash
/// recall-stack log --agent-id A1 --session-id S1 --action fetch --reason test --tag x
/// ```
pub async fn log_memory(state: &AppState, request: NewMemoryLog, json: bool) -> Result<()> {
    let log = state.memory_service.log(request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&log)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Stored memory {}",
        style("✓").green().bold(),
        style(log.id).cyan()
    );
    println!("  {}  {}", style("agent").dim(), log.agent_id);
    println!("  {}  {}", style("session").dim(), log.session_id);
    println!("  {}  {}", style("timestamp").dim(), log.timestamp);
    println!("  {}  {}", style("decay").dim(), log.decay_score);
    println!();

    Ok(())
}

/// Recall memory logs and print them as a table.
///
/// # Examples
///
/// ```bash
/// recall-stack recall --agent-id A1 --limit 10
/// recall-stack recall --tag deploy --sort-by decay_score --json
/// ```
pub async fn recall_memories(state: &AppState, filter: RecallFilter, json: bool) -> Result<()> {
    let logs = state.memory_service.recall(filter).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&logs)?);
        return Ok(());
    }

    if logs.is_empty() {
        let total = state.memory_service.count().await?;
        println!();
        println!(
            "  {} No memories matched ({} stored).",
            style("i").blue().bold(),
            total
        );
        println!();
        return Ok(());
    }

    println!("{}", render_table(&logs));
    println!(
        "  {} {} memor{}",
        style("→").dim(),
        logs.len(),
        if logs.len() == 1 { "y" } else { "ies" }
    );

    Ok(())
}

fn render_table(logs: &[MemoryLog]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Timestamp").fg(Color::White),
        Cell::new("Agent").fg(Color::White),
        Cell::new("Session").fg(Color::White),
        Cell::new("Action").fg(Color::White),
        Cell::new("Reason").fg(Color::White),
        Cell::new("Outcome").fg(Color::White),
        Cell::new("Tags").fg(Color::White),
        Cell::new("Decay").fg(Color::White),
    ]);

    for log in logs {
        let decay_color = if log.decay_score >= 0.7 {
            Color::Green
        } else if log.decay_score >= 0.4 {
            Color::Yellow
        } else {
            Color::Red
        };

        table.add_row(vec![
            Cell::new(&log.timestamp),
            Cell::new(&log.agent_id).fg(Color::Cyan),
            Cell::new(&log.session_id),
            Cell::new(&log.action),
            Cell::new(truncate(&log.reason, 48)),
            Cell::new(log.outcome.as_deref().map(|o| truncate(o, 32)).unwrap_or_default()),
            Cell::new(log.tags.join(", ")),
            Cell::new(format!("{:.2}", log.decay_score)).fg(decay_color),
        ]);
    }

    table
}

/// Shorten `text` to at most `max` characters, marking the cut with "...".
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
